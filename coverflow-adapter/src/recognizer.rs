use coverflow::DRAG_CLAIM_THRESHOLD_PX;

/// What a touch sample turned out to mean.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PanEvent {
    /// Nothing to act on (no touch in progress, or still below the claim threshold).
    None,
    /// The touch crossed the movement threshold and became a drag; apply this first delta.
    DragStart(f32),
    /// The claimed drag moved; `dx` is cumulative pixels since the touch began.
    DragMove(f32),
    /// The claimed drag was released with this velocity (pixels per second).
    DragEnd(f32),
    /// The touch ended without ever becoming a drag: a tap on an item.
    Tap,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    /// Touch is down but has not moved far enough to claim the gesture.
    Pending,
    Claimed,
}

/// Disambiguates taps from drags.
///
/// A touch only becomes a drag once its horizontal travel exceeds the claim threshold, so
/// presses still reach individual items. Feed it raw samples and act on the returned
/// [`PanEvent`]s; `Controller` does exactly that.
#[derive(Clone, Copy, Debug)]
pub struct PanRecognizer {
    threshold: f32,
    phase: Phase,
}

impl PanRecognizer {
    pub fn new() -> Self {
        Self::with_threshold(DRAG_CLAIM_THRESHOLD_PX)
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold,
            phase: Phase::Idle,
        }
    }

    pub fn is_claimed(&self) -> bool {
        self.phase == Phase::Claimed
    }

    /// Call when a touch begins.
    pub fn touch_down(&mut self) {
        self.phase = Phase::Pending;
    }

    /// Call on every move sample; `dx_px` is cumulative horizontal travel since touch-down.
    pub fn touch_move(&mut self, dx_px: f32) -> PanEvent {
        match self.phase {
            Phase::Idle => PanEvent::None,
            Phase::Pending => {
                if dx_px.abs() > self.threshold {
                    self.phase = Phase::Claimed;
                    PanEvent::DragStart(dx_px)
                } else {
                    PanEvent::None
                }
            }
            Phase::Claimed => PanEvent::DragMove(dx_px),
        }
    }

    /// Call when the touch ends; `vx_px_per_s` is the release velocity.
    pub fn touch_up(&mut self, vx_px_per_s: f32) -> PanEvent {
        let phase = core::mem::replace(&mut self.phase, Phase::Idle);
        match phase {
            Phase::Idle => PanEvent::None,
            Phase::Pending => PanEvent::Tap,
            Phase::Claimed => PanEvent::DragEnd(vx_px_per_s),
        }
    }

    /// Abandons the current touch without emitting anything (e.g. the host revoked the
    /// gesture, or the engine refused the drag).
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
    }
}

impl Default for PanRecognizer {
    fn default() -> Self {
        Self::new()
    }
}
