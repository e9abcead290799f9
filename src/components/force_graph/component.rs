use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{
	Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement,
	MouseEvent, Url, WheelEvent, Window,
};

use super::render;
use super::scene::Scene;
use super::state::{ForceGraphState, TooltipInfo};
use super::svg;
use super::theme::GraphConfig;
use super::types::GraphData;

/// Tooltip placement relative to the cursor, in pixels.
const TOOLTIP_OFFSET: f64 = 12.0;
const FRAME_DT: f32 = 0.016;

#[derive(Clone, Debug, PartialEq)]
struct TooltipView {
	left: f64,
	top: f64,
	info: TooltipInfo,
}

type Shared<T> = Rc<RefCell<Option<T>>>;

fn measure(
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	let window_size = |w: &Window| {
		(
			w.inner_width().ok().and_then(|v| v.as_f64()),
			w.inner_height().ok().and_then(|v| v.as_f64()),
		)
	};
	if fullscreen {
		if let Some((Some(w), Some(h))) = web_sys::window().as_ref().map(window_size) {
			return (w, h);
		}
	}
	(
		width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.filter(|w| *w > 0.0)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_height() as f64)
				.filter(|h| *h > 0.0)
				.unwrap_or(600.0)
		}),
	)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
}

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn download_svg(contents: &str, filename: &str) -> Result<(), JsValue> {
	let parts = js_sys::Array::of1(&JsValue::from_str(contents));
	let options = BlobPropertyBag::new();
	options.set_type("image/svg+xml");
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let href = Url::create_object_url_with_blob(&blob)?;
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	anchor.set_href(&href);
	anchor.set_download(filename);
	anchor.click();
	Url::revoke_object_url(&href)
}

/// Canvas view of a code graph with hover highlighting, drag, zoom and pan.
///
/// The simulation is rebuilt from scratch whenever `data` changes.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional)] config: GraphConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Shared<ForceGraphState> = Rc::new(RefCell::new(None));
	let animate: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let resize_cb: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let tooltip = RwSignal::new(None::<TooltipView>);
	let config = Rc::new(config);

	// Full teardown and rebuild on every new graph.
	let (state_data, config_data) = (state.clone(), config.clone());
	Effect::new(move |_| {
		let graph = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = measure(&canvas, fullscreen, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		debug!("rebuilding graph view with {} nodes", graph.nodes.len());
		*state_data.borrow_mut() = Some(ForceGraphState::new(
			&graph,
			&config_data.simulation,
			&config_data.zoom,
			w,
			h,
		));
		tooltip.set(None);
	});

	let (state_init, animate_init, resize_cb_init, config_init) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		config.clone(),
	);
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if animate_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("no window, graph view disabled");
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			error!("canvas 2d context unavailable");
			return;
		};

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let (nw, nh) = measure(&canvas_resize, true, None, None);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner, theme) =
			(state_init.clone(), animate_init.clone(), config_init.theme.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(FRAME_DT);
				render::render(s, &theme, &ctx);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
			if s.drag.active {
				tooltip.set(None);
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas, &ev);
		let next = {
			let mut guard = state_mm.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			s.pointer_move(x, y);
			s.tooltip().map(|info| TooltipView {
				left: ev.page_x() as f64 + TOOLTIP_OFFSET,
				top: ev.page_y() as f64 + TOOLTIP_OFFSET,
				info,
			})
		};
		if tooltip.with_untracked(|current| current != &next) {
			tooltip.set(next);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.pointer_up();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
		}
		tooltip.set(None);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			if s.wheel(x, y, ev.delta_y(), ev.alt_key()) {
				ev.prevent_default();
			}
		}
	};

	let (state_export, theme_export) = (state.clone(), config.theme.clone());
	let on_export = move |_: MouseEvent| {
		let guard = state_export.borrow();
		let Some(s) = guard.as_ref() else {
			return;
		};
		let scene = Scene::build(s, &theme_export);
		let document = svg::to_svg(&scene, s.width, s.height, &s.transform);
		if let Err(err) = download_svg(&document, "code-graph.svg") {
			error!("svg export failed: {err:?}");
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
		<button class="export-svg" on:click=on_export>
			"Export SVG"
		</button>
		{move || {
			tooltip
				.get()
				.map(|tip| {
					view! {
						<div
							class="graph-tooltip"
							style=format!("left: {}px; top: {}px;", tip.left, tip.top)
						>
							<strong>{tip.info.fqname}</strong>
							<br />
							{format!("type: {}", tip.info.kind)}
							{tip
								.info
								.location
								.map(|loc| view! { <br /> <span class="location">{loc}</span> })}
						</div>
					}
				})
		}}
	}
}
