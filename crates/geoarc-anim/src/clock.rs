use slotmap::{new_key_type, SlotMap};
use tracing::trace;

use crate::camera::OrbitCamera;
use crate::tween::Tween;

new_key_type! {
    pub struct TweenId;
}

#[derive(Debug, Clone)]
struct Track<T> {
    target: T,
    tween: Tween,
}

/// New value of one tween after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenUpdate<T> {
    pub id: TweenId,
    pub target: T,
    pub value: f64,
}

/// A one-shot tween that reached its end during a tick. It has already been
/// dropped from the clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenCompletion<T> {
    pub id: TweenId,
    pub target: T,
}

/// Everything that changed during one tick, in tween insertion order.
#[derive(Debug, Clone)]
pub struct TickReport<T> {
    pub updates: Vec<TweenUpdate<T>>,
    pub completed: Vec<TweenCompletion<T>>,
}

impl<T> Default for TickReport<T> {
    fn default() -> Self {
        Self {
            updates: Vec::new(),
            completed: Vec::new(),
        }
    }
}

impl<T> TickReport<T> {
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.completed.is_empty()
    }
}

/// The single per-frame driver.
///
/// The clock knows nothing about what its tweens animate: each tween carries
/// an opaque `target` handle that is echoed back in the [`TickReport`]. The
/// caller applies the report after the tick, so entity collections are never
/// mutated while tweens are being iterated.
#[derive(Debug, Clone)]
pub struct AnimationClock<T> {
    pub camera: OrbitCamera,
    tweens: SlotMap<TweenId, Track<T>>,
    elapsed_ms: f64,
    ticks: u64,
}

impl<T: Copy> AnimationClock<T> {
    pub fn new(camera: OrbitCamera) -> Self {
        Self {
            camera,
            tweens: SlotMap::with_key(),
            elapsed_ms: 0.0,
            ticks: 0,
        }
    }

    /// Register a tween. It is first advanced on the next tick.
    pub fn start(&mut self, target: T, tween: Tween) -> TweenId {
        self.tweens.insert(Track { target, tween })
    }

    /// Remove a tween. Returns `false` if it was already gone, so repeated
    /// cancellation is harmless.
    pub fn cancel(&mut self, id: TweenId) -> bool {
        self.tweens.remove(id).is_some()
    }

    /// Remove every tween whose target matches `pred`; returns how many.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|_, track| !pred(&track.target));
        before - self.tweens.len()
    }

    pub fn tween(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(id).map(|track| &track.tween)
    }

    pub fn target(&self, id: TweenId) -> Option<T> {
        self.tweens.get(id).map(|track| track.target)
    }

    pub fn is_active(&self, id: TweenId) -> bool {
        self.tweens.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Total time fed into the clock, in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance the camera and every tween by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: f64) -> TickReport<T> {
        let dt = elapsed_ms.max(0.0);
        self.elapsed_ms += dt;
        self.ticks += 1;

        self.camera.advance(dt);

        let mut report = TickReport::default();
        for (id, track) in self.tweens.iter_mut() {
            let value = track.tween.advance(dt);
            report.updates.push(TweenUpdate {
                id,
                target: track.target,
                value,
            });
            if track.tween.is_finished() {
                report.completed.push(TweenCompletion {
                    id,
                    target: track.target,
                });
            }
        }

        for done in &report.completed {
            self.tweens.remove(done.id);
        }

        trace!(
            tick = self.ticks,
            updates = report.updates.len(),
            completed = report.completed.len(),
            "clock tick"
        );
        report
    }
}

impl<T: Copy> Default for AnimationClock<T> {
    fn default() -> Self {
        Self::new(OrbitCamera::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Target {
        A,
        B,
    }

    #[test]
    fn test_tick_reports_values_and_completions() {
        let mut clock = AnimationClock::default();
        let a = clock.start(Target::A, Tween::once(0.0, 1.0, 100.0));
        let b = clock.start(Target::B, Tween::looping(0.0, 1.0, 100.0));

        let report = clock.tick(50.0);
        assert_eq!(report.updates.len(), 2);
        assert!(report.completed.is_empty());

        let report = clock.tick(60.0);
        assert_eq!(report.completed.len(), 1);
        assert_eq!(report.completed[0].id, a);
        assert_eq!(report.completed[0].target, Target::A);
        assert!(!clock.is_active(a));
        assert!(clock.is_active(b));
        assert_eq!(clock.len(), 1);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut clock = AnimationClock::default();
        let id = clock.start(Target::A, Tween::looping(0.0, 1.0, 10.0));
        assert!(clock.cancel(id));
        assert!(!clock.cancel(id));
        assert!(clock.tick(16.0).updates.is_empty());
    }

    #[test]
    fn test_cancel_where() {
        let mut clock = AnimationClock::default();
        clock.start(Target::A, Tween::looping(0.0, 1.0, 10.0));
        clock.start(Target::A, Tween::once(0.0, 1.0, 10.0));
        clock.start(Target::B, Tween::once(0.0, 1.0, 10.0));
        assert_eq!(clock.cancel_where(|t| *t == Target::A), 2);
        assert_eq!(clock.len(), 1);
    }

    #[test]
    fn test_looping_tween_never_completes() {
        let mut clock = AnimationClock::default();
        let id = clock.start(Target::B, Tween::looping(0.0, 1.0, 100.0));
        for _ in 0..100 {
            assert!(clock.tick(16.0).completed.is_empty());
        }
        assert!(clock.is_active(id));
        assert_eq!(clock.ticks(), 100);
        assert!((clock.elapsed_ms() - 1600.0).abs() < 1e-9);
    }
}
