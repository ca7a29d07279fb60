use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlElement, MouseEvent, WheelEvent, Window};

use super::animation::{Completion, PathStart, Schedule};
use super::interaction::PointerAction;
use super::layout::LayoutStrategy;
use super::painter::CanvasPainter;
use super::render_loop::FrameHost;
use super::state::GraphCanvasState;
use super::tooltip::{DomTooltip, Tooltip};
use super::types::{Graph, NodeId};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` driving a shared callback.
struct WindowFrames {
	window: Window,
	callback: FrameCallback,
}

impl FrameHost for WindowFrames {
	fn request_frame(&mut self) -> Option<i32> {
		let callback = self.callback.borrow();
		let callback = callback.as_ref()?;
		self.window
			.request_animation_frame(callback.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel_frame(&mut self, handle: i32) {
		let _ = self.window.cancel_animation_frame(handle);
	}
}

struct Runtime {
	state: GraphCanvasState,
	painter: CanvasPainter,
	tooltip: DomTooltip,
	frames: WindowFrames,
	canvas: HtmlCanvasElement,
	_resize: Option<Closure<dyn FnMut()>>,
}

impl Runtime {
	/// Pointer position relative to the canvas.
	fn local(&self, ev: &MouseEvent) -> (f64, f64) {
		let rect = self.canvas.get_bounding_client_rect();
		(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		)
	}

	/// Sizes the canvas to its wrapper, minus a small margin.
	fn fit_canvas(&mut self) {
		let (w, h) = self
			.canvas
			.parent_element()
			.map(|p| (p.client_width() as f64 - 10.0, p.client_height() as f64 - 10.0))
			.unwrap_or((self.state.width, self.state.height));
		let (w, h) = (w.max(0.0), h.max(0.0));
		self.canvas.set_width(w as u32);
		self.canvas.set_height(h as u32);
		self.state.resize(w, h);
	}

	/// Wipes any previously drawn path before a new one goes on top.
	fn prepare_path(&mut self) {
		if self.state.settings.path_shown && !self.state.is_busy() {
			self.state.clear_path(&mut self.painter);
		}
	}
}

/// Shared handle to the mounted canvas. Cloning is cheap; every clone drives
/// the same canvas. Calls made before the canvas is mounted are no-ops.
#[derive(Clone, Default)]
pub struct GraphController {
	inner: Rc<RefCell<Option<Runtime>>>,
}

impl GraphController {
	/// Runs `f` against the mounted runtime. Re-entrant calls are dropped.
	fn with<R>(&self, f: impl FnOnce(&mut Runtime) -> R) -> Option<R> {
		let mut inner = self.inner.try_borrow_mut().ok()?;
		inner.as_mut().map(f)
	}

	pub fn is_mounted(&self) -> bool {
		self.inner.try_borrow().map(|r| r.is_some()).unwrap_or(true)
	}

	pub(super) fn mount(
		&self,
		window: Window,
		canvas: HtmlCanvasElement,
		ctx: web_sys::CanvasRenderingContext2d,
		tooltip: (HtmlElement, HtmlElement),
		graph: Graph,
	) {
		let seed = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let frame_controller = self.clone();
		*callback.borrow_mut() = Some(Closure::new(move || frame_controller.render_frame()));

		let resize_controller = self.clone();
		let resize: Closure<dyn FnMut()> = Closure::new(move || resize_controller.resize());
		if let Err(err) =
			window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
		{
			warn!("could not listen for window resizes: {err:?}");
		}

		let mut runtime = Runtime {
			state: GraphCanvasState::new(graph, 0.0, 0.0, seed),
			painter: CanvasPainter::new(ctx),
			tooltip: DomTooltip::new(window.clone(), canvas.clone(), tooltip.0, tooltip.1),
			frames: WindowFrames { window, callback },
			canvas,
			_resize: Some(resize),
		};
		runtime.fit_canvas();
		debug!("graph canvas mounted at {}x{}", runtime.state.width, runtime.state.height);
		*self.inner.borrow_mut() = Some(runtime);
	}

	fn render_frame(&self) {
		self.with(|rt| rt.state.render_frame(&mut rt.painter, &mut rt.frames));
	}

	fn resize(&self) {
		self.with(|rt| {
			rt.fit_canvas();
			if rt.state.settings.graph_enabled && !rt.state.is_busy() {
				rt.state.draw_full_graph(&mut rt.painter, true);
			}
		});
	}

	/// Replaces the dataset; the graph must be drawn again before paths can be shown.
	pub fn set_graph(&self, graph: Graph) {
		self.with(|rt| {
			rt.state.set_graph(graph);
			rt.state.clear(&mut rt.painter);
			rt.tooltip.hide();
		});
	}

	pub fn set_strategy(&self, strategy: LayoutStrategy) {
		self.with(|rt| {
			rt.state.set_strategy(strategy);
			rt.state.clear(&mut rt.painter);
			rt.tooltip.hide();
		});
	}

	pub fn set_tooltips(&self, enabled: bool) {
		self.with(|rt| {
			rt.state.settings.tooltips_enabled = enabled;
			rt.tooltip.hide();
		});
	}

	/// Draws the graph with a fresh layout. Returns the sorted node ids shown.
	pub fn draw(&self) -> Vec<NodeId> {
		self.with(|rt| {
			if rt.state.is_busy() {
				return Vec::new();
			}
			rt.state.settings.graph_enabled = true;
			rt.state.settings.path_shown = false;
			rt.fit_canvas();
			rt.state.draw_full_graph(&mut rt.painter, true);
			rt.state.graph.ids().map(str::to_string).collect()
		})
		.unwrap_or_default()
	}

	pub fn reset_zoom(&self) {
		self.with(|rt| {
			if !rt.state.settings.graph_enabled || rt.state.is_busy() {
				return;
			}
			rt.state.reset_zoom();
			rt.state.redraw(&mut rt.painter);
		});
	}

	pub fn zoom_step(&self, zoom_in: bool) {
		self.with(|rt| {
			if !rt.state.settings.graph_enabled || rt.state.is_busy() {
				return;
			}
			rt.state.zoom_step(zoom_in);
			rt.state.redraw(&mut rt.painter);
		});
	}

	/// Animates a shortest path between two nodes. `on_complete` always runs
	/// unless another animation is already in flight, including when the
	/// canvas never mounted.
	pub fn connect(&self, from: &str, to: &str, on_complete: Completion) {
		let mut pending = Some(on_complete);
		let start = self.with(|rt| {
			rt.prepare_path();
			pending.take().map(|done| rt.state.connect(from, to, done))
		});
		self.follow(start.flatten(), pending);
	}

	/// Draws a caller-supplied path, animated when `delay_ms` is non-zero.
	pub fn draw_path(&self, path: &[NodeId], delay_ms: u32, on_complete: Completion) {
		let mut pending = Some(on_complete);
		let start = self.with(|rt| {
			rt.prepare_path();
			pending.take().map(|done| rt.state.draw_path(path, delay_ms, done))
		});
		self.follow(start.flatten(), pending);
	}

	pub fn clear_path(&self) {
		self.with(|rt| rt.state.clear_path(&mut rt.painter));
	}

	/// `unused` is the completion the runtime never took: it runs here so
	/// the page can re-enable its controls.
	fn follow(&self, start: Option<PathStart>, unused: Option<Completion>) {
		match start {
			Some(PathStart::Scheduled(schedule)) => self.schedule(schedule),
			Some(PathStart::Rejected) => debug!("path request ignored while busy"),
			Some(PathStart::Completed) => {}
			None => {
				debug!("graph canvas unavailable, completing path request");
				if let Some(done) = unused {
					done();
				}
			}
		}
	}

	/// Hands every step to `setTimeout`. Zero-delay steps still run after the
	/// current event handler, in order.
	fn schedule(&self, schedule: Schedule) {
		let Some(window) = web_sys::window() else {
			warn!("no window to schedule path animation on");
			return;
		};
		for step in schedule {
			let controller = self.clone();
			let callback = Closure::once_into_js(move || controller.run_step(step.index));
			if let Err(err) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
				callback.unchecked_ref(),
				step.delay_ms.min(i32::MAX as u32) as i32,
			) {
				warn!("failed to schedule path step {}: {err:?}", step.index);
			}
		}
	}

	fn run_step(&self, index: usize) {
		let done = self
			.with(|rt| rt.state.path_step(index, &mut rt.painter, &mut rt.tooltip))
			.flatten();
		if let Some(done) = done {
			done();
		}
	}

	pub(super) fn mouse_down(&self, ev: &MouseEvent) {
		self.with(|rt| {
			let (x, y) = rt.local(ev);
			rt.state.pointer_down(ev.button(), x, y);
		});
	}

	pub(super) fn mouse_move(&self, ev: &MouseEvent) {
		self.with(|rt| {
			let (x, y) = rt.local(ev);
			match rt.state.pointer_move(x, y) {
				PointerAction::Pan { started: true, .. } => {
					rt.tooltip.hide();
					rt.state.start_render_loop(&mut rt.painter, &mut rt.frames);
				}
				PointerAction::Pan { .. } => {}
				_ => rt.state.hover(&mut rt.tooltip, x, y),
			}
		});
	}

	pub(super) fn mouse_up(&self, ev: &MouseEvent) {
		self.with(|rt| {
			let (x, y) = rt.local(ev);
			if rt.state.pointer_up(&mut rt.painter, x, y) == PointerAction::DragEnded {
				rt.state.stop_render_loop(&mut rt.frames);
				rt.state.redraw(&mut rt.painter);
			}
		});
	}

	pub(super) fn mouse_leave(&self) {
		self.with(|rt| {
			if rt.state.pointer_leave() == PointerAction::DragEnded {
				rt.state.stop_render_loop(&mut rt.frames);
				rt.state.redraw(&mut rt.painter);
			}
			if !rt.state.is_busy() {
				rt.tooltip.hide();
			}
		});
	}

	pub(super) fn wheel(&self, ev: &WheelEvent) {
		self.with(|rt| {
			let (x, y) = rt.local(ev);
			if rt.state.wheel(x, y, ev.delta_y()) {
				rt.state.redraw(&mut rt.painter);
			}
		});
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	fn counter() -> (Rc<Cell<u32>>, Completion) {
		let calls = Rc::new(Cell::new(0));
		let inner = calls.clone();
		(calls, Box::new(move || inner.set(inner.get() + 1)))
	}

	#[test]
	fn unmounted_canvas_still_completes_paths() {
		let controller = GraphController::default();
		assert!(!controller.is_mounted());

		let (calls, done) = counter();
		controller.connect("a", "b", done);
		assert_eq!(calls.get(), 1);

		let (calls, done) = counter();
		controller.draw_path(&["a".to_string(), "b".to_string()], 250, done);
		assert_eq!(calls.get(), 1);
	}

	#[test]
	fn reentrant_path_request_still_completes() {
		let controller = GraphController::default();
		let _held = controller.inner.borrow();

		let (calls, done) = counter();
		controller.draw_path(&[], 0, done);
		assert_eq!(calls.get(), 1);
	}
}
