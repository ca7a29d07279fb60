use log::debug;

/// Per-frame callback scheduling provided by the host (`requestAnimationFrame`).
pub trait FrameHost {
	/// Schedules the next frame, returning a handle usable with [`FrameHost::cancel_frame`].
	fn request_frame(&mut self) -> Option<i32>;
	fn cancel_frame(&mut self, handle: i32);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopPhase {
	#[default]
	Idle,
	Running,
}

/// Continuous redraw while the user pans or zooms.
///
/// The caller redraws whenever [`RenderLoop::start`] or [`RenderLoop::on_frame`]
/// returns true.
#[derive(Debug, Default)]
pub struct RenderLoop {
	phase: LoopPhase,
	pending: Option<i32>,
}

impl RenderLoop {
	pub fn phase(&self) -> LoopPhase {
		self.phase
	}

	pub fn is_running(&self) -> bool {
		self.phase == LoopPhase::Running
	}

	/// Idle to running. Returns false, changing nothing, when already running.
	pub fn start<H: FrameHost + ?Sized>(&mut self, host: &mut H) -> bool {
		if self.is_running() {
			return false;
		}
		debug!("render loop started");
		self.phase = LoopPhase::Running;
		self.pending = host.request_frame();
		true
	}

	/// Called from the host's frame callback. Schedules the next frame and
	/// returns true while running.
	pub fn on_frame<H: FrameHost + ?Sized>(&mut self, host: &mut H) -> bool {
		self.pending = None;
		if !self.is_running() {
			return false;
		}
		self.pending = host.request_frame();
		true
	}

	/// Running to idle; a no-op when already idle.
	pub fn cancel<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
		if let Some(handle) = self.pending.take() {
			host.cancel_frame(handle);
		}
		if self.is_running() {
			debug!("render loop stopped");
		}
		self.phase = LoopPhase::Idle;
	}
}
