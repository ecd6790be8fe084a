/// Throttles logic ticks to a fixed period, independent of the frame rate.
///
/// At most one tick fires per `advance`. A long frame does not queue up
/// catch-up ticks; the elapsed time is discarded once a tick fires.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedStep {
    period: f32,
    elapsed: f32,
}

impl FixedStep {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
        }
    }

    pub fn from_hz(hz: f32) -> Self {
        Self::new(1.0 / hz)
    }

    /// Add one frame's worth of time; true when a tick is due
    pub fn advance(&mut self, delta_time: f32) -> bool {
        self.elapsed += delta_time.max(0.0);
        if self.elapsed >= self.period {
            self.elapsed = 0.0;
            return true;
        }
        false
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
