/// Averages the frame rate over windows of at least one second.
#[derive(Debug, Clone)]
pub struct FrameRateMeter {
    window: f32,
    accumulated: f32,
    frames: u32,
}

impl Default for FrameRateMeter {
    fn default() -> Self {
        Self::with_window(1.0)
    }
}

impl FrameRateMeter {
    pub fn with_window(window: f32) -> Self {
        Self {
            window,
            accumulated: 0.0,
            frames: 0,
        }
    }

    /// Records one frame that took `dt` seconds.
    ///
    /// Returns the average frames per second of the window that just closed,
    /// or `None` while the current window is still filling.
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        let mut reading = None;
        if self.accumulated >= self.window && self.frames > 0 {
            reading = Some(self.frames as f32 / self.accumulated);
            self.accumulated = 0.0;
            self.frames = 0;
        }
        self.accumulated += dt;
        self.frames += 1;
        reading
    }
}
