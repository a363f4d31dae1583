/// Converts host animation-frame timestamps into simulation-time deltas.
///
/// The first tick after `start` only records a baseline and yields no delta,
/// so a long gap before the first frame is never integrated as real time.
/// `stop` is idempotent and clears the baseline; restarting re-baselines.
#[derive(Debug)]
pub struct FrameClock {
    timescale: f32,
    running: bool,
    last: Option<f64>,
}

impl FrameClock {
    /// `timescale` divides raw timestamp deltas into simulation time
    /// (e.g. 1500.0 for the sprite engine, 16.67 for frame-ratio units).
    pub fn new(timescale: f32) -> Self {
        Self {
            timescale,
            running: false,
            last: None,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.last = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feeds the clock a host timestamp in milliseconds. Returns the elapsed
    /// simulation time since the previous tick, or `None` while stopped or
    /// on the baseline-establishing first tick. A timestamp that goes
    /// backwards yields a zero delta, never negative time.
    pub fn tick(&mut self, now_ms: f64) -> Option<f32> {
        if !self.running {
            return None;
        }
        match self.last.replace(now_ms) {
            None => None,
            Some(last) => Some((now_ms - last).max(0.0) as f32 / self.timescale),
        }
    }
}
