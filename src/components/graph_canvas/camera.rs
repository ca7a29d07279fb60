use super::types::Position;

/// World to screen affine transform: `screen = world * scale + offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
	pub scale: f64,
	pub offset_x: f64,
	pub offset_y: f64,
}

impl Default for Camera {
	fn default() -> Self {
		Self {
			scale: 1.0,
			offset_x: 0.0,
			offset_y: 0.0,
		}
	}
}

impl Camera {
	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.offset_x) / self.scale,
			(sy - self.offset_y) / self.scale,
		)
	}

	pub fn world_to_screen(&self, position: Position) -> (f64, f64) {
		(
			position.x * self.scale + self.offset_x,
			position.y * self.scale + self.offset_y,
		)
	}

	/// Multiplies the scale by `factor` keeping the world point under
	/// `(sx, sy)` fixed on screen. Unbounded; callers rate-limit `factor`.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let (wx, wy) = self.screen_to_world(sx, sy);
		self.scale *= factor;
		self.offset_x = sx - wx * self.scale;
		self.offset_y = sy - wy * self.scale;
	}

	pub fn pan_to(&mut self, offset_x: f64, offset_y: f64) {
		self.offset_x = offset_x;
		self.offset_y = offset_y;
	}

	pub fn reset(&mut self) {
		*self = Self::default();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: (f64, f64), b: (f64, f64)) -> bool {
		(a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
	}

	#[test]
	fn screen_to_world_inverts_transform() {
		let camera = Camera {
			scale: 2.0,
			offset_x: 10.0,
			offset_y: -4.0,
		};
		assert_eq!(camera.screen_to_world(30.0, 16.0), (10.0, 10.0));
		assert!(close(
			camera.world_to_screen(Position::new(10.0, 10.0)),
			(30.0, 16.0)
		));
	}

	#[test]
	fn zoom_keeps_anchor_fixed() {
		let mut camera = Camera::default();
		let steps = [
			(450.0, 300.0, 1.2),
			(12.0, 580.0, 1.0 / 1.2),
			(0.0, 0.0, 3.5),
			(833.3, 41.7, 0.25),
		];
		for (sx, sy, factor) in steps {
			let before = camera.screen_to_world(sx, sy);
			camera.zoom_at(sx, sy, factor);
			assert!(close(before, camera.screen_to_world(sx, sy)));
		}
	}

	#[test]
	fn reset_restores_identity() {
		let mut camera = Camera::default();
		camera.zoom_at(100.0, 50.0, 4.0);
		camera.pan_to(-300.0, 75.0);
		camera.reset();
		assert_eq!(camera, Camera::default());
		assert_eq!(camera.scale, 1.0);
	}
}
