use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::KeyboardEvent;

use crate::analysis::{ANALYZE_ENDPOINT, AnalysisSession, HttpBackend, analyze};
use crate::components::force_graph::{ForceGraphCanvas, GraphConfig};

/// Analyzer page: repository input, status line and the graph view.
#[component]
pub fn Home() -> impl IntoView {
	let session = RwSignal::new(AnalysisSession::default());
	let repo_url = RwSignal::new(String::new());

	// The view rebuilds only when a new graph lands, not on status changes.
	let revision = Memo::new(move |_| session.with(|s| s.revision()));
	let graph_data = Signal::derive(move || {
		revision.track();
		session.with_untracked(|s| s.graph().cloned().unwrap_or_default())
	});
	let loading = Memo::new(move |_| session.with(|s| s.is_loading()));

	let run_analysis = move || {
		let input = repo_url.get_untracked();
		let Some(url) = session.try_update(|s| s.begin(&input)).flatten() else {
			return;
		};
		spawn_local(async move {
			let result = match HttpBackend::for_page(ANALYZE_ENDPOINT) {
				Ok(backend) => analyze(&backend, &url).await,
				Err(err) => Err(err),
			};
			session.update(|s| {
				s.finish(result);
			});
		});
	};

	let on_keydown = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" && !loading.get_untracked() {
			run_analysis();
		}
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<ForceGraphCanvas data=graph_data config=GraphConfig::default() fullscreen=true />
				<div class="graph-overlay">
					<h1>"Code Graph"</h1>
					<div class="controls">
						<input
							type="text"
							class="repo-input"
							placeholder="https://github.com/owner/repo"
							prop:value=move || repo_url.get()
							on:input=move |ev| repo_url.set(event_target_value(&ev))
							on:keydown=on_keydown
						/>
						<button
							class="analyze-button"
							disabled=move || loading.get()
							on:click=move |_| run_analysis()
						>
							"Analyze"
						</button>
						<Show when=move || loading.get()>
							<span class="spinner"></span>
						</Show>
					</div>
					<p class="status">{move || session.with(|s| s.status().to_owned())}</p>
					<p class="subtitle">
						"Hover to highlight neighbours. Drag nodes to move them. Scroll to zoom, drag the background to pan."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
