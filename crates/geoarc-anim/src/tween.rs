use serde::{Deserialize, Serialize};

/// Whether a tween stops at its end value or wraps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Repeat {
    Once,
    Forever,
}

/// Linear interpolation of a scalar from `from` to `to` over `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
    pub repeat: Repeat,
    elapsed_ms: f64,
}

impl Tween {
    pub fn once(from: f64, to: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms,
            repeat: Repeat::Once,
            elapsed_ms: 0.0,
        }
    }

    pub fn looping(from: f64, to: f64, duration_ms: f64) -> Self {
        Self {
            repeat: Repeat::Forever,
            ..Self::once(from, to, duration_ms)
        }
    }

    /// Fraction of the current cycle in `[0, 1]`. Zero or negative durations
    /// count as already complete.
    pub fn progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn value(&self) -> f64 {
        self.from + (self.to - self.from) * self.progress()
    }

    pub fn is_finished(&self) -> bool {
        self.repeat == Repeat::Once && self.progress() >= 1.0
    }

    /// Advance by `dt_ms` and return the new value. Repeating tweens wrap
    /// and never finish.
    pub fn advance(&mut self, dt_ms: f64) -> f64 {
        let dt_ms = dt_ms.max(0.0);
        match self.repeat {
            Repeat::Once => {
                self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms.max(0.0));
            }
            Repeat::Forever if self.duration_ms > 0.0 => {
                self.elapsed_ms = (self.elapsed_ms + dt_ms) % self.duration_ms;
            }
            Repeat::Forever => {}
        }
        self.value()
    }
}
