use std::sync::Arc;

use crate::AnimationState;

/// A listener invoked synchronously with the new value on every position change (drag sample,
/// decay tick, spring tick, direct set).
///
/// Listeners observe the value; they cannot mutate the model, so a notification can never
/// re-enter an in-flight update.
pub type PositionListener = Arc<dyn Fn(f32) + Send + Sync>;

/// Handle returned by [`ScrollPosition::subscribe`], used to unsubscribe deterministically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Decay terminates once the velocity magnitude falls below this, in position units/second.
pub(crate) const DECAY_MIN_VELOCITY: f32 = 0.05;

/// Natural frequency of the critically damped snap spring, rad/s.
pub(crate) const SPRING_OMEGA: f32 = 12.0;
/// Spring rest thresholds: within this distance of the target...
pub(crate) const SPRING_REST_DELTA: f32 = 1e-3;
/// ...and below this velocity, the spring snaps exactly to the target and stops.
pub(crate) const SPRING_REST_VELOCITY: f32 = 1e-2;

/// The currently active driver of the value.
#[derive(Clone, Copy, Debug)]
enum Drive {
    Idle,
    Dragging {
        /// Value captured at `begin_drag`; drag deltas are applied relative to it.
        origin: f32,
    },
    Decaying {
        /// Position units per second.
        velocity: f32,
        /// Geometric decay factor per elapsed millisecond.
        deceleration: f32,
        last_ms: Option<u64>,
    },
    Springing {
        target: f32,
        velocity: f32,
        last_ms: Option<u64>,
    },
}

/// Outcome of one animation tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PositionTick {
    /// No animation is running.
    Idle,
    /// An animation advanced; the value is the new position.
    Moved(f32),
    /// The decay ran to graceful completion this tick. A cancelled decay (new gesture,
    /// explicit stop) never reports this, so it never triggers the post-decay snap chain.
    DecayFinished(f32),
    /// The spring reached its target and snapped exactly onto it.
    SpringFinished(f32),
}

/// The single continuous scroll position.
///
/// Owns the one piece of shared mutable state in the engine. All other components read it or
/// command it through the methods below; exactly one of drag/decay/spring may be mutating it
/// at a time, and starting a new driver deterministically cancels the previous one.
///
/// Animations are frame-driven: the host calls [`tick`](Self::tick) with a millisecond
/// timestamp each frame, and the integrators advance by the elapsed time.
pub struct ScrollPosition {
    value: f32,
    drive: Drive,
    listeners: Vec<(ListenerId, PositionListener)>,
    next_listener: u64,
}

impl ScrollPosition {
    pub fn new(initial: f32) -> Self {
        Self {
            value: initial,
            drive: Drive::Idle,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn state(&self) -> AnimationState {
        match self.drive {
            Drive::Idle => AnimationState::Idle,
            Drive::Dragging { .. } => AnimationState::Dragging,
            Drive::Decaying { .. } => AnimationState::Decaying,
            Drive::Springing { .. } => AnimationState::Springing,
        }
    }

    /// The target of the running snap spring, if one is active.
    pub fn spring_target(&self) -> Option<f32> {
        match self.drive {
            Drive::Springing { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(
            self.drive,
            Drive::Decaying { .. } | Drive::Springing { .. }
        )
    }

    /// Direct assignment: immediate, no animation. Cancels any running driver.
    pub fn set_absolute(&mut self, value: f32) {
        cftrace!(value, "ScrollPosition::set_absolute");
        self.drive = Drive::Idle;
        self.update(value);
    }

    /// Captures the current value as the drag baseline and transitions to `Dragging`.
    ///
    /// Cancels any in-flight decay/spring immediately, freezing the value where it is.
    pub fn begin_drag(&mut self) {
        cftrace!(origin = self.value, "ScrollPosition::begin_drag");
        self.drive = Drive::Dragging { origin: self.value };
    }

    /// Sets the value to `baseline + delta`. Valid only while `Dragging`; no clamping, so
    /// during a drag the value may transiently leave `[0, count - 1]`.
    pub fn apply_drag_delta(&mut self, delta: f32) {
        let Drive::Dragging { origin } = self.drive else {
            cfwarn!(state = ?self.state(), "apply_drag_delta outside a drag; ignored");
            debug_assert!(
                matches!(self.drive, Drive::Dragging { .. }),
                "apply_drag_delta outside a drag"
            );
            return;
        };
        self.update(origin + delta);
    }

    /// Begins a kinetic decay: velocity (position units/s) decays geometrically by
    /// `deceleration` per elapsed millisecond, position integrates velocity, until the
    /// velocity epsilon is reached.
    pub fn start_decay(&mut self, velocity: f32, deceleration: f32) {
        cfdebug!(velocity, deceleration, "ScrollPosition::start_decay");
        self.drive = Drive::Decaying {
            velocity,
            deceleration,
            last_ms: None,
        };
    }

    /// Begins a critically damped spring toward `target`; on rest it snaps exactly to
    /// `target` and goes idle.
    pub fn start_spring(&mut self, target: f32) {
        cfdebug!(target, from = self.value, "ScrollPosition::start_spring");
        self.drive = Drive::Springing {
            target,
            velocity: 0.0,
            last_ms: None,
        };
    }

    /// Halts any running driver immediately, freezing the current value.
    pub fn stop(&mut self) {
        self.drive = Drive::Idle;
    }

    /// Advances the active animation to `now_ms`.
    ///
    /// The first tick after starting an animation only records the timestamp; integration
    /// begins on the next one.
    pub fn tick(&mut self, now_ms: u64) -> PositionTick {
        match self.drive {
            Drive::Idle | Drive::Dragging { .. } => PositionTick::Idle,
            Drive::Decaying {
                velocity,
                deceleration,
                last_ms,
            } => {
                let Some(last) = last_ms else {
                    self.drive = Drive::Decaying {
                        velocity,
                        deceleration,
                        last_ms: Some(now_ms),
                    };
                    return PositionTick::Moved(self.value);
                };
                let dt_ms = now_ms.saturating_sub(last);
                if dt_ms == 0 {
                    return PositionTick::Moved(self.value);
                }

                let velocity = velocity * deceleration.powf(dt_ms as f32);
                let next = self.value + velocity * (dt_ms as f32 / 1000.0);
                if velocity.abs() < DECAY_MIN_VELOCITY {
                    self.drive = Drive::Idle;
                    self.update(next);
                    cfdebug!(value = next, "decay finished");
                    return PositionTick::DecayFinished(next);
                }
                self.drive = Drive::Decaying {
                    velocity,
                    deceleration,
                    last_ms: Some(now_ms),
                };
                self.update(next);
                PositionTick::Moved(next)
            }
            Drive::Springing {
                target,
                velocity,
                last_ms,
            } => {
                let Some(last) = last_ms else {
                    self.drive = Drive::Springing {
                        target,
                        velocity,
                        last_ms: Some(now_ms),
                    };
                    return PositionTick::Moved(self.value);
                };
                let dt_ms = now_ms.saturating_sub(last);
                if dt_ms == 0 {
                    return PositionTick::Moved(self.value);
                }
                let dt = dt_ms as f32 / 1000.0;

                // Closed-form step of the critically damped oscillator
                // x(t) = (A + Bt)e^(-wt), A = delta, B = v0 + w*delta.
                let delta = self.value - target;
                let b = velocity + SPRING_OMEGA * delta;
                let e = (-SPRING_OMEGA * dt).exp();
                let next_delta = (delta + b * dt) * e;
                let next_velocity = (b - SPRING_OMEGA * (delta + b * dt)) * e;

                if next_delta.abs() < SPRING_REST_DELTA
                    && next_velocity.abs() < SPRING_REST_VELOCITY
                {
                    self.drive = Drive::Idle;
                    self.update(target);
                    cfdebug!(target, "spring finished");
                    return PositionTick::SpringFinished(target);
                }
                self.drive = Drive::Springing {
                    target,
                    velocity: next_velocity,
                    last_ms: Some(now_ms),
                };
                self.update(target + next_delta);
                PositionTick::Moved(self.value)
            }
        }
    }

    /// Registers a listener; it is invoked synchronously on every value change until
    /// unsubscribed.
    pub fn subscribe(&mut self, listener: PositionListener) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Removes a listener. Returns `false` if the id was already unsubscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    fn update(&mut self, value: f32) {
        self.value = value;
        for (_, listener) in &self.listeners {
            listener(value);
        }
    }
}

impl core::fmt::Debug for ScrollPosition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollPosition")
            .field("value", &self.value)
            .field("drive", &self.drive)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
