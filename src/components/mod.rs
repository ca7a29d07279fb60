//! UI components.

pub mod graph_canvas;
