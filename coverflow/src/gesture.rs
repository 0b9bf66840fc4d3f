use crate::Sensitivity;

/// Minimum finger travel in pixels before a gesture is claimed as a drag.
///
/// Below this, the touch is treated as a tap on an item, so presses still reach individual
/// items.
pub const DRAG_CLAIM_THRESHOLD_PX: f32 = 10.0;

/// A release only decays when its converted velocity exceeds one index per second.
const DECAY_TRIGGER_VELOCITY: f32 = 1.0;
/// Decay launch speed band, position units per second.
const DECAY_MIN_SPEED: f32 = 3.0;
const DECAY_MAX_SPEED: f32 = 5.0;

/// Converts a raw horizontal drag delta (pixels since gesture start) into a position-space
/// delta. The sign inverts: dragging right (positive `dx`) moves the viewed window left
/// (decreasing index).
pub fn drag_delta_to_position(dx_px: f32, sensitivity: Sensitivity) -> f32 {
    -dx_px / sensitivity.divisor()
}

/// Converts a release velocity (pixels per second) into position units per second, with the
/// same sign inversion as [`drag_delta_to_position`].
pub fn release_velocity_to_position(vx_px_per_s: f32, sensitivity: Sensitivity) -> f32 {
    -vx_px_per_s / sensitivity.divisor()
}

/// What to do with the scroll position when a drag is released.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReleaseAction {
    /// Launch a kinetic decay with this velocity (position units per second). On graceful
    /// completion the caller is expected to chain a snap spring to the nearest index.
    Decay { velocity: f32 },
    /// Snap directly to the nearest valid index.
    Snap,
}

/// Decides between kinetic decay and a direct snap for a released drag.
///
/// `selection` is the rounded current selection, `velocity` the release velocity already
/// converted to position units per second.
///
/// Decay requires the selection to lie strictly inside the interior (not within the last two
/// items from either edge) and a fast enough release. Near the edges there is not enough
/// travel room to decelerate gracefully before hitting a boundary, so edge releases always
/// snap directly. The launch speed is clamped into [3, 5] units/s.
pub fn release_action(selection: usize, count: usize, velocity: f32) -> ReleaseAction {
    let interior = selection > 0 && selection + 2 < count;
    if interior && velocity.abs() > DECAY_TRIGGER_VELOCITY {
        let speed = velocity.abs().clamp(DECAY_MIN_SPEED, DECAY_MAX_SPEED);
        ReleaseAction::Decay {
            velocity: velocity.signum() * speed,
        }
    } else {
        ReleaseAction::Snap
    }
}
