use web_sys::{HtmlCanvasElement, HtmlElement, Window};

use super::types::{ACCENT_LIGHTNESS, hsl};

/// Floating label shown on hover and while a path animates.
pub trait Tooltip {
	fn show_label(&mut self, text: &str);
	/// Tints the label with a node hue.
	fn set_accent_color(&mut self, hue: f64);
	/// Moves the label next to a canvas-relative screen point: centred on it
	/// horizontally when `centered`, below it when `below`, above it otherwise.
	fn position_near(&mut self, x: f64, y: f64, centered: bool, below: bool);
	fn hide(&mut self);
}

/// Gap kept between the label and its anchor or the window edge.
const SPACING: f64 = 8.0;

/// [`Tooltip`] backed by a fixed-position element with a separate text child.
/// Anchors are translated from canvas to window coordinates and clamped to the window.
pub struct DomTooltip {
	window: Window,
	canvas: HtmlCanvasElement,
	element: HtmlElement,
	text: HtmlElement,
}

impl DomTooltip {
	pub fn new(
		window: Window,
		canvas: HtmlCanvasElement,
		element: HtmlElement,
		text: HtmlElement,
	) -> Self {
		Self {
			window,
			canvas,
			element,
			text,
		}
	}

	fn set_style(&self, property: &str, value: &str) {
		let _ = self.element.style().set_property(property, value);
	}

	fn window_size(&self) -> (f64, f64) {
		let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
			v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
		};
		(dim(self.window.inner_width()), dim(self.window.inner_height()))
	}
}

impl Tooltip for DomTooltip {
	fn show_label(&mut self, text: &str) {
		self.set_style("display", "block");
		self.text.set_inner_text(text);
	}

	fn set_accent_color(&mut self, hue: f64) {
		self.set_style("border-color", &hsl(hue, ACCENT_LIGHTNESS));
	}

	fn position_near(&mut self, x: f64, y: f64, centered: bool, below: bool) {
		self.set_style("display", "block");
		self.set_style("transform", "translate(0, 0)");

		let origin = self.canvas.get_bounding_client_rect();
		let (x, y) = (x + origin.left(), y + origin.top());
		let rect = self.element.get_bounding_client_rect();
		let (win_w, win_h) = self.window_size();
		let (w, h) = (rect.width(), rect.height());

		let mut left = if centered { x - w / 2.0 } else { x };
		if left + w > win_w {
			left = win_w - w - SPACING;
		}
		left = left.max(SPACING);

		let mut top = if below { y + SPACING } else { y - h - SPACING };
		if top + h > win_h {
			top = win_h - h - SPACING;
		}
		top = top.max(SPACING);

		self.set_style("transform", &format!("translate({left}px, {top}px)"));
	}

	fn hide(&mut self) {
		self.set_style("display", "none");
	}
}
