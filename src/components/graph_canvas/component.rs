use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, WheelEvent, Window,
};

use super::controller::GraphController;
use super::types::Graph;

/// Canvas plus floating tooltip, driven through `controller`. The first
/// dataset mounts the canvas; later ones replace the graph.
#[component]
pub fn GraphCanvas(
	controller: GraphController,
	#[prop(into)] data: Signal<Graph>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let tooltip_ref = NodeRef::<leptos::html::Div>::new();
	let tooltip_text_ref = NodeRef::<leptos::html::Span>::new();

	let controller_init = controller.clone();
	Effect::new(move |_| {
		let graph = data.get();
		if controller_init.is_mounted() {
			controller_init.set_graph(graph);
			return;
		}
		let (Some(canvas), Some(tooltip), Some(tooltip_text)) =
			(canvas_ref.get(), tooltip_ref.get(), tooltip_text_ref.get())
		else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window): Option<Window> = web_sys::window() else {
			warn!("no window, graph canvas not mounted");
			return;
		};
		let ctx = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx.dyn_into::<CanvasRenderingContext2d>().ok(),
			_ => None,
		};
		let Some(ctx) = ctx else {
			warn!("2d canvas context unavailable");
			return;
		};
		let tooltip: HtmlElement = tooltip.unchecked_into();
		let tooltip_text: HtmlElement = tooltip_text.unchecked_into();
		controller_init.mount(window, canvas, ctx, (tooltip, tooltip_text), graph);
	});

	let controller_md = controller.clone();
	let on_mousedown = move |ev: MouseEvent| controller_md.mouse_down(&ev);

	let controller_mm = controller.clone();
	let on_mousemove = move |ev: MouseEvent| controller_mm.mouse_move(&ev);

	let controller_mu = controller.clone();
	let on_mouseup = move |ev: MouseEvent| controller_mu.mouse_up(&ev);

	let controller_ml = controller.clone();
	let on_mouseleave = move |_: MouseEvent| controller_ml.mouse_leave();

	let controller_wh = controller;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		controller_wh.wheel(&ev);
	};

	view! {
		<div class="canvas-wrapper">
			<canvas
				node_ref=canvas_ref
				class="graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div
				node_ref=tooltip_ref
				class="tooltip"
				style="position: fixed; left: 0; top: 0; display: none; pointer-events: none;"
			>
				<span node_ref=tooltip_text_ref></span>
			</div>
		</div>
	}
}
