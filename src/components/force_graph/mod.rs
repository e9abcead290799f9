mod component;
mod neighbors;
mod render;
mod scene;
mod state;
pub mod svg;
mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use neighbors::NeighborMap;
pub use scene::{EdgeShape, Fill, NodeShape, Scene};
pub use state::{ForceGraphState, HoverTarget, TooltipInfo};
pub use theme::{GraphConfig, LabelPlacement, NodeStyle, SimulationConfig, Theme, ZoomConfig};
pub use types::{GraphData, GraphLink, GraphNode, NodeId, NodeKind};
