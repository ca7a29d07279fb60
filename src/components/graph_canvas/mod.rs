//! Interactive graph canvas: layout, camera, rendering, path finding and
//! path animation, plus the Leptos component that wires them to a browser canvas.

pub mod animation;
pub mod camera;
mod component;
pub mod config;
mod controller;
pub mod interaction;
pub mod layout;
pub mod painter;
pub mod pathfinder;
pub mod render;
pub mod render_loop;
pub mod state;
#[cfg(test)]
mod test_support;
pub mod tooltip;
pub mod types;

pub use component::GraphCanvas;
pub use controller::GraphController;
pub use layout::LayoutStrategy;
pub use state::GraphCanvasState;
pub use types::{Graph, GraphData, GraphLink, GraphNode, Node, NodeId, Position};
