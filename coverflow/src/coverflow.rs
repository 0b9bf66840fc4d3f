use std::sync::Arc;

use crate::gesture::{self, ReleaseAction};
use crate::order::for_each_paint_index;
use crate::position::{PositionTick, ScrollPosition};
use crate::transform::{self, TransformParams};
use crate::{
    AnimationState, CoverflowItem, CoverflowItemKeyed, CoverflowOptions, ItemKey, ItemTransform,
    ListenerId, PositionListener,
};

/// A headless coverflow carousel engine.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects.
/// - Your adapter drives it by feeding drag samples, taps, and per-frame ticks.
/// - Rendering is exposed via zero-allocation iteration in paint order (`for_each_item*`).
///
/// It owns the continuous scroll position and derives everything else from it: the discrete
/// selection (`clamp(round(position), 0, count - 1)`), the paint order, and the per-item 3D
/// transforms. The host is notified through `on_change` only when the authoritative selection
/// changes; selection movement during a drag or decay only reorders painting.
///
/// For gesture recognition (tap vs drag) and tick scheduling, see the `coverflow-adapter`
/// crate.
#[derive(Debug)]
pub struct Coverflow<K = ItemKey> {
    options: CoverflowOptions<K>,
    position: ScrollPosition,
    selection: usize,
    /// Last index reported through `on_change`; a snap notifies iff its target differs.
    notified_selection: usize,
    container_width: u32,
}

impl<K> Coverflow<K> {
    /// Creates a new coverflow from options.
    ///
    /// `options.initial_selection` is clamped into `[0, count - 1]` and becomes the starting
    /// position; no `on_change` fires for it.
    pub fn new(options: CoverflowOptions<K>) -> Self {
        let selection = if options.count == 0 {
            0
        } else {
            options.initial_selection.min(options.count - 1)
        };
        cfdebug!(
            count = options.count,
            initial_selection = selection,
            "Coverflow::new"
        );
        Self {
            position: ScrollPosition::new(selection as f32),
            selection,
            notified_selection: selection,
            container_width: 0,
            options,
        }
    }

    pub fn options(&self) -> &CoverflowOptions<K> {
        &self.options
    }

    /// Replaces the options and reconciles state.
    ///
    /// If the clamped selection changes (e.g. the item collection shrank), the position is
    /// reset to the clamped value without animation and no `on_change` fires (a corrective
    /// reset is not a user-driven change).
    pub fn set_options(&mut self, options: CoverflowOptions<K>) {
        self.options = options;
        cftrace!(
            count = self.options.count,
            disable_interaction = self.options.disable_interaction,
            "Coverflow::set_options"
        );
        self.reconcile();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut CoverflowOptions<K>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    /// Updates the item count, clamping the selection if it fell out of range.
    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        self.options.count = count;
        self.reconcile();
    }

    pub fn set_on_press(&mut self, on_press: Option<impl Fn(usize) + Send + Sync + 'static>) {
        self.options.on_press = on_press.map(|f| Arc::new(f) as _);
    }

    pub fn set_disable_interaction(&mut self, disable_interaction: bool) {
        self.options.disable_interaction = disable_interaction;
    }

    /// The measured container width, in pixels. Transforms are not produced until this is
    /// nonzero.
    pub fn container_width(&self) -> u32 {
        self.container_width
    }

    pub fn set_container_width(&mut self, width: u32) {
        if self.container_width != width {
            cfdebug!(width, "set_container_width");
            self.container_width = width;
        }
    }

    /// The continuous scroll position. Integer part: nearest item; fractional part:
    /// in-between drag state.
    pub fn scroll_position(&self) -> f32 {
        self.position.value()
    }

    /// The discrete selection derived from the scroll position. Meaningful only when
    /// `count > 0`.
    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn animation_state(&self) -> AnimationState {
        self.position.state()
    }

    pub fn is_animating(&self) -> bool {
        self.position.is_animating()
    }

    /// Registers a position listener, invoked synchronously on every value change.
    pub fn subscribe_position(&mut self, listener: PositionListener) -> ListenerId {
        self.position.subscribe(listener)
    }

    pub fn unsubscribe_position(&mut self, id: ListenerId) -> bool {
        self.position.unsubscribe(id)
    }

    /// Programmatic jump: sets the position directly, no animation, no `on_change`.
    ///
    /// Works even when interaction is disabled.
    pub fn set_scroll_position(&mut self, value: f32) {
        self.position.set_absolute(value);
        self.sync_selection();
        self.notified_selection = self.selection;
    }

    /// Snaps to `index` (clamped): notifies the host eagerly if the target differs from the
    /// last reported selection, then springs the position onto the exact integer target.
    ///
    /// Works even when interaction is disabled.
    pub fn select(&mut self, index: usize) {
        if self.options.count == 0 {
            return;
        }
        let target = index.min(self.options.count - 1);
        if target != self.notified_selection {
            cfdebug!(target, "selection change");
            self.notified_selection = target;
            (self.options.on_change)(target);
        }
        if self.position.value() != target as f32 {
            self.position.start_spring(target as f32);
        }
    }

    /// A tap on the item at `index`: activates it (`on_press`) when it is already exactly
    /// centered, otherwise snaps to it. Ignored while interaction is disabled.
    pub fn tap_item(&mut self, index: usize) {
        if self.options.disable_interaction || self.options.count == 0 {
            return;
        }
        if index == self.rounded_selection() {
            if let Some(on_press) = &self.options.on_press {
                cfdebug!(index, "press");
                on_press(index);
            }
        } else {
            self.select(index);
        }
    }

    /// Begins a drag: cancels any in-flight animation and captures the drag baseline.
    ///
    /// Returns `false` (without touching state) when interaction is disabled or there are no
    /// items.
    pub fn drag_start(&mut self) -> bool {
        if self.options.disable_interaction || self.options.count == 0 {
            return false;
        }
        self.position.stop();
        self.position.begin_drag();
        true
    }

    /// Applies a drag sample: `dx_px` is the cumulative horizontal pixel delta since the
    /// gesture started.
    pub fn drag_move(&mut self, dx_px: f32) {
        if self.options.disable_interaction {
            return;
        }
        self.position
            .apply_drag_delta(gesture::drag_delta_to_position(
                dx_px,
                self.options.sensitivity,
            ));
        self.sync_selection();
    }

    /// Releases a drag with velocity `vx_px_per_s` (pixels per second).
    ///
    /// Fast releases in the interior launch a kinetic decay (chained into a snap spring on
    /// graceful completion); everything else snaps directly to the nearest index.
    pub fn drag_release(&mut self, vx_px_per_s: f32) {
        if self.options.disable_interaction || self.options.count == 0 {
            return;
        }
        // The drag ends here regardless of which action follows; a snap whose target equals
        // the current position starts no spring, so the drive must not stay `Dragging`.
        self.position.stop();
        let velocity =
            gesture::release_velocity_to_position(vx_px_per_s, self.options.sensitivity);
        match gesture::release_action(self.rounded_selection(), self.options.count, velocity) {
            ReleaseAction::Decay { velocity } => {
                self.position
                    .start_decay(velocity, self.options.deceleration.factor());
            }
            ReleaseAction::Snap => self.snap_to_nearest(),
        }
    }

    /// Advances the running animation to `now_ms`.
    ///
    /// Returns the new position while an animation is active, `None` otherwise. A decay that
    /// completes gracefully chains into a snap spring here; an interrupted decay does not.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        match self.position.tick(now_ms) {
            PositionTick::Idle => None,
            PositionTick::Moved(value) | PositionTick::SpringFinished(value) => {
                self.sync_selection();
                Some(value)
            }
            PositionTick::DecayFinished(value) => {
                self.sync_selection();
                self.snap_to_nearest();
                Some(value)
            }
        }
    }

    pub fn key_for(&self, index: usize) -> K {
        (self.options.get_item_key)(index)
    }

    /// The transform for the item at `index`, or `None` until a nonzero container width is
    /// known (or when `index` is out of range).
    pub fn item_transform(&self, index: usize) -> Option<ItemTransform> {
        if self.container_width == 0 || index >= self.options.count {
            return None;
        }
        let params = TransformParams::from(&self.options);
        Some(transform::item_transform(self.offset_of(index), &params))
    }

    /// The focus-proximity signal for the item at `index`: 0 when exactly centered,
    /// saturating at ±1.
    pub fn focus_proximity(&self, index: usize) -> f32 {
        if index >= self.options.count {
            return 0.0;
        }
        transform::focus_proximity(self.offset_of(index))
    }

    /// Visits every item in paint order with its transform.
    ///
    /// Emits nothing until a nonzero container width is known.
    pub fn for_each_item(&self, mut f: impl FnMut(CoverflowItem)) {
        if self.options.count == 0 || self.container_width == 0 {
            return;
        }
        let params = TransformParams::from(&self.options);
        for_each_paint_index(self.options.count, self.selection, |index| {
            f(CoverflowItem {
                index,
                transform: transform::item_transform(self.offset_of(index), &params),
            })
        });
    }

    /// Visits every item in paint order with its stable key and transform.
    pub fn for_each_item_keyed(&self, mut f: impl FnMut(CoverflowItemKeyed<K>)) {
        if self.options.count == 0 || self.container_width == 0 {
            return;
        }
        let params = TransformParams::from(&self.options);
        for_each_paint_index(self.options.count, self.selection, |index| {
            f(CoverflowItemKeyed {
                key: self.key_for(index),
                index,
                transform: transform::item_transform(self.offset_of(index), &params),
            })
        });
    }

    /// Collects the paint-ordered items into `out` (clears `out` first).
    pub fn collect_items(&self, out: &mut Vec<CoverflowItem>) {
        out.clear();
        self.for_each_item(|it| out.push(it));
    }

    /// Collects the paint-ordered keyed items into `out` (clears `out` first).
    pub fn collect_items_keyed(&self, out: &mut Vec<CoverflowItemKeyed<K>>) {
        out.clear();
        self.for_each_item_keyed(|it| out.push(it));
    }

    fn offset_of(&self, index: usize) -> f32 {
        index as f32 - self.position.value()
    }

    fn rounded_selection(&self) -> usize {
        debug_assert!(self.options.count > 0);
        let rounded = self.position.value().round().max(0.0) as usize;
        rounded.min(self.options.count - 1)
    }

    fn snap_to_nearest(&mut self) {
        self.select(self.rounded_selection());
    }

    /// Re-derives the discrete selection from the continuous position. A change here only
    /// reorders painting; it never notifies the host.
    fn sync_selection(&mut self) {
        if self.options.count == 0 {
            return;
        }
        let new_selection = self.rounded_selection();
        if new_selection != self.selection {
            cftrace!(from = self.selection, to = new_selection, "reorder");
            self.selection = new_selection;
        }
    }

    fn reconcile(&mut self) {
        if self.options.count == 0 {
            self.selection = 0;
            self.notified_selection = 0;
            self.position.stop();
            self.position.set_absolute(0.0);
            return;
        }
        let max = (self.options.count - 1) as f32;
        let clamped = self.selection.min(self.options.count - 1);
        // A spring launched before the change may still be heading for an index that no
        // longer exists; its target counts as out of range just like the value itself.
        let out_of_range = self.position.value() < 0.0
            || self.position.value() > max
            || self.position.spring_target().is_some_and(|t| t > max);
        if clamped != self.selection || out_of_range {
            self.selection = clamped;
            self.notified_selection = clamped;
            self.position.set_absolute(clamped as f32);
        }
    }
}
