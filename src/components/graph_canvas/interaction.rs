use super::camera::Camera;

/// `MouseEvent.button` of the primary button.
pub const PRIMARY_BUTTON: i16 = 0;

/// What a pointer event means for the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerAction {
	None,
	/// Move the camera offset; `started` is set on the move that committed to dragging.
	Pan {
		offset_x: f64,
		offset_y: f64,
		started: bool,
	},
	DragEnded,
	/// Press and release without crossing the drag threshold.
	Click { x: f64, y: f64 },
}

/// Press/drag/click tracking for panning.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub dragging: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

impl PanState {
	/// Begins a potential drag. Only the primary button counts.
	pub fn press(&mut self, button: i16, x: f64, y: f64, camera: &Camera) -> bool {
		if button != PRIMARY_BUTTON {
			return false;
		}
		*self = Self {
			active: true,
			dragging: false,
			start_x: x,
			start_y: y,
			transform_start_x: camera.offset_x,
			transform_start_y: camera.offset_y,
		};
		true
	}

	pub fn moved(&mut self, x: f64, y: f64, threshold: f64) -> PointerAction {
		if !self.active {
			return PointerAction::None;
		}
		let (dx, dy) = (x - self.start_x, y - self.start_y);
		let started = !self.dragging && (dx.abs() > threshold || dy.abs() > threshold);
		if !self.dragging && !started {
			return PointerAction::None;
		}
		self.dragging = true;
		PointerAction::Pan {
			offset_x: self.transform_start_x + dx,
			offset_y: self.transform_start_y + dy,
			started,
		}
	}

	pub fn release(&mut self, x: f64, y: f64) -> PointerAction {
		let action = match (self.active, self.dragging) {
			(false, _) => PointerAction::None,
			(true, true) => PointerAction::DragEnded,
			(true, false) => PointerAction::Click { x, y },
		};
		*self = Self::default();
		action
	}

	/// The pointer left the canvas: drop the press without producing a click.
	pub fn leave(&mut self) -> PointerAction {
		let action = if self.dragging {
			PointerAction::DragEnded
		} else {
			PointerAction::None
		};
		*self = Self::default();
		action
	}
}
