//! Per-session culling context.
//!
//! Mutated once per frame by the caller, read by the distance- and
//! time-sensitive heuristics.

/// Default render distance in blocks.
pub const DEFAULT_RENDER_DISTANCE: f64 = 256.0;

/// Seed for the rolling frame time (60 FPS).
pub const INITIAL_FRAME_TIME_MS: f64 = 16.67;

/// Weight kept from the previous average on every sample.
pub const FRAME_TIME_DECAY: f64 = 0.95;

/// Camera, view distance and frame timing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CullingContext {
    /// Camera position in world space.
    camera: [f64; 3],
    /// Render distance in blocks.
    render_distance: f64,
    /// Frames recorded so far.
    frame: u64,
    /// Exponentially weighted frame time in milliseconds.
    average_frame_time_ms: f64,
}

impl CullingContext {
    /// Creates a context with the camera at the origin and default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            camera: [0.0; 3],
            render_distance: DEFAULT_RENDER_DISTANCE,
            frame: 0,
            average_frame_time_ms: INITIAL_FRAME_TIME_MS,
        }
    }

    /// Creates a context with the given camera and render distance.
    #[must_use]
    pub const fn with_view(camera: [f64; 3], render_distance: f64) -> Self {
        Self {
            camera,
            render_distance,
            frame: 0,
            average_frame_time_ms: INITIAL_FRAME_TIME_MS,
        }
    }

    /// Camera position.
    #[inline]
    #[must_use]
    pub const fn camera(&self) -> [f64; 3] {
        self.camera
    }

    /// Moves the camera.
    pub fn set_camera(&mut self, camera: [f64; 3]) {
        self.camera = camera;
    }

    /// Render distance in blocks.
    #[inline]
    #[must_use]
    pub const fn render_distance(&self) -> f64 {
        self.render_distance
    }

    /// Sets the render distance.
    pub fn set_render_distance(&mut self, distance: f64) {
        self.render_distance = distance;
    }

    /// Number of frames recorded.
    #[inline]
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Rolling average frame time in milliseconds.
    #[inline]
    #[must_use]
    pub const fn average_frame_time_ms(&self) -> f64 {
        self.average_frame_time_ms
    }

    /// Overrides the rolling average. Used to pin a known load level.
    pub fn set_average_frame_time_ms(&mut self, ms: f64) {
        self.average_frame_time_ms = ms;
    }

    /// Records one frame's duration and advances the frame counter.
    pub fn record_frame(&mut self, frame_time_ms: f64) {
        self.average_frame_time_ms = self.average_frame_time_ms * FRAME_TIME_DECAY
            + frame_time_ms * (1.0 - FRAME_TIME_DECAY);
        self.frame += 1;
    }

    /// Rolling average expressed as frames per second.
    #[must_use]
    pub fn fps(&self) -> f64 {
        if self.average_frame_time_ms > 0.0 {
            1000.0 / self.average_frame_time_ms
        } else {
            0.0
        }
    }
}

impl Default for CullingContext {
    fn default() -> Self {
        Self::new()
    }
}
