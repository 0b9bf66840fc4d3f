use coverflow::{Coverflow, CoverflowOptions};

use crate::{PanEvent, PanRecognizer};

/// A framework-neutral controller that wraps a [`coverflow::Coverflow`] and provides the common
/// adapter workflow: touch-event wiring with tap/drag disambiguation, and frame ticking.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_touch_down` / `on_touch_move` / `on_touch_up` when pointer events occur
/// - `tick(now_ms)` each frame/timer tick while `is_animating()`
///
/// The item index passed to `on_touch_down` is the host's hit-test result; it is what a tap
/// resolves to if the touch never becomes a drag.
#[derive(Debug)]
pub struct Controller<K> {
    cf: Coverflow<K>,
    pan: PanRecognizer,
    pressed_item: Option<usize>,
}

impl<K> Controller<K> {
    pub fn new(options: CoverflowOptions<K>) -> Self {
        Self::from_coverflow(Coverflow::new(options))
    }

    pub fn from_coverflow(cf: Coverflow<K>) -> Self {
        Self {
            cf,
            pan: PanRecognizer::new(),
            pressed_item: None,
        }
    }

    pub fn coverflow(&self) -> &Coverflow<K> {
        &self.cf
    }

    pub fn coverflow_mut(&mut self) -> &mut Coverflow<K> {
        &mut self.cf
    }

    pub fn into_coverflow(self) -> Coverflow<K> {
        self.cf
    }

    pub fn is_animating(&self) -> bool {
        self.cf.is_animating()
    }

    /// Call when the host measures (or re-measures) the container.
    pub fn on_layout(&mut self, width: u32) {
        self.cf.set_container_width(width);
    }

    /// Call when a touch begins. `item_index` is the item under the finger, if any; a touch
    /// that ends without becoming a drag is dispatched as a tap on it.
    pub fn on_touch_down(&mut self, item_index: Option<usize>) {
        self.pressed_item = item_index;
        self.pan.touch_down();
    }

    /// Call on every move sample; `dx_px` is cumulative horizontal travel since touch-down.
    pub fn on_touch_move(&mut self, dx_px: f32) {
        match self.pan.touch_move(dx_px) {
            PanEvent::DragStart(dx) => {
                // Claiming the gesture cancels any in-flight animation.
                if self.cf.drag_start() {
                    self.cf.drag_move(dx);
                } else {
                    self.pan.cancel();
                }
            }
            PanEvent::DragMove(dx) => self.cf.drag_move(dx),
            _ => {}
        }
    }

    /// Call when the touch ends; `vx_px_per_s` is the release velocity in pixels per second.
    pub fn on_touch_up(&mut self, vx_px_per_s: f32) {
        match self.pan.touch_up(vx_px_per_s) {
            PanEvent::DragEnd(vx) => self.cf.drag_release(vx),
            PanEvent::Tap => {
                if let Some(index) = self.pressed_item {
                    self.cf.tap_item(index);
                }
            }
            _ => {}
        }
        self.pressed_item = None;
    }

    /// Advances any running animation. Returns the new position while one is active.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        self.cf.tick(now_ms)
    }
}
