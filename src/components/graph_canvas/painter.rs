use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::camera::Camera;
use super::types::Position;

/// Minimal drawing surface the render pipeline and path animation draw on.
pub trait Painter {
	/// Resets the transform and wipes a `width` x `height` area.
	fn clear(&mut self, width: f64, height: f64);
	fn set_transform(&mut self, camera: &Camera);
	fn set_stroke(&mut self, color: &str, width: f64);
	fn begin_path(&mut self);
	fn move_to(&mut self, to: Position);
	fn line_to(&mut self, to: Position);
	fn stroke(&mut self);
	fn fill_circle(&mut self, center: Position, radius: f64, color: &str);
	fn stroke_circle(&mut self, center: Position, radius: f64, color: &str, width: f64);

	/// Strokes one straight segment with the current stroke style.
	fn segment(&mut self, from: Position, to: Position) {
		self.begin_path();
		self.move_to(from);
		self.line_to(to);
		self.stroke();
	}
}

/// [`Painter`] over a browser 2d canvas context.
pub struct CanvasPainter {
	ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
	pub fn new(ctx: CanvasRenderingContext2d) -> Self {
		Self { ctx }
	}
}

impl Painter for CanvasPainter {
	fn clear(&mut self, width: f64, height: f64) {
		let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
		self.ctx.clear_rect(0.0, 0.0, width, height);
	}

	fn set_transform(&mut self, camera: &Camera) {
		let _ = self.ctx.set_transform(
			camera.scale,
			0.0,
			0.0,
			camera.scale,
			camera.offset_x,
			camera.offset_y,
		);
	}

	fn set_stroke(&mut self, color: &str, width: f64) {
		self.ctx.set_stroke_style_str(color);
		self.ctx.set_line_width(width);
	}

	fn begin_path(&mut self) {
		self.ctx.begin_path();
	}

	fn move_to(&mut self, to: Position) {
		self.ctx.move_to(to.x, to.y);
	}

	fn line_to(&mut self, to: Position) {
		self.ctx.line_to(to.x, to.y);
	}

	fn stroke(&mut self) {
		self.ctx.stroke();
	}

	fn fill_circle(&mut self, center: Position, radius: f64, color: &str) {
		self.ctx.begin_path();
		let _ = self.ctx.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
		self.ctx.set_fill_style_str(color);
		self.ctx.fill();
	}

	fn stroke_circle(&mut self, center: Position, radius: f64, color: &str, width: f64) {
		self.ctx.begin_path();
		let _ = self.ctx.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
		self.set_stroke(color, width);
		self.ctx.stroke();
	}
}
