use std::sync::Arc;

use crate::{Deceleration, ItemKey, Sensitivity};

/// A callback fired when the authoritative selection changes.
///
/// Fired eagerly: the host is told the new selection before the snap animation that visually
/// performs the move has settled.
pub type OnChangeCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// A callback fired when the already-centered item is tapped.
pub type OnPressCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Configuration for [`crate::Coverflow`].
///
/// This type is designed to be cheap to clone: callbacks are stored in `Arc`s so adapters can
/// update a few fields and call `Coverflow::set_options` without reallocating closures.
///
/// `on_change` is a constructor argument rather than an optional field: a coverflow without a
/// change notification has no way to report its one authoritative output, so the requirement is
/// enforced at the type level.
pub struct CoverflowOptions<K = ItemKey> {
    pub count: usize,
    pub on_change: OnChangeCallback,
    pub get_item_key: Arc<dyn Fn(usize) -> K + Send + Sync>,

    /// Fired when the item that is already exactly centered is tapped.
    pub on_press: Option<OnPressCallback>,

    pub sensitivity: Sensitivity,
    pub deceleration: Deceleration,

    /// Starting index; clamped into `[0, count - 1]` at construction.
    pub initial_selection: usize,

    /// Horizontal offset of the immediate neighbors, in pixels.
    pub spacing: f32,
    /// Additional offset of the second-ring neighbors, in pixels.
    pub wing_span: f32,
    /// Max tilt of outer items, in degrees.
    pub rotation: f32,
    /// Tilt at the half-offset control point, in degrees.
    pub mid_rotation: f32,
    /// 3D perspective distance for the transform.
    pub perspective: f32,
    /// Scale of the immediate neighbors (0–1).
    pub scale_down: f32,
    /// Scale of the second-ring neighbors (0–1).
    pub scale_further: f32,

    /// Suppresses gesture capture and taps. Programmatic selection still functions.
    pub disable_interaction: bool,
}

impl CoverflowOptions<ItemKey> {
    /// Creates options for a carousel keyed by index (`ItemKey = u64`).
    ///
    /// Defaults match the classic coverflow look: spacing 100, wing span 80, rotation 50°,
    /// perspective 800, neighbor scale 0.8.
    pub fn new(count: usize, on_change: impl Fn(usize) + Send + Sync + 'static) -> Self {
        Self {
            count,
            on_change: Arc::new(on_change),
            get_item_key: Arc::new(|i| i as u64),
            on_press: None,
            sensitivity: Sensitivity::Normal,
            deceleration: Deceleration::Normal,
            initial_selection: 0,
            spacing: 100.0,
            wing_span: 80.0,
            rotation: 50.0,
            mid_rotation: 50.0,
            perspective: 800.0,
            scale_down: 0.8,
            scale_further: 0.75,
            disable_interaction: false,
        }
    }
}

impl<K> CoverflowOptions<K> {
    /// Creates options with a custom key mapping.
    ///
    /// Use this when you want identity to follow items across reordering/replacement:
    /// `get_item_key(i)` should return a stable identity for the item at ordinal `i`.
    pub fn new_with_key(
        count: usize,
        on_change: impl Fn(usize) + Send + Sync + 'static,
        get_item_key: impl Fn(usize) -> K + Send + Sync + 'static,
    ) -> Self {
        Self {
            count,
            on_change: Arc::new(on_change),
            get_item_key: Arc::new(get_item_key),
            on_press: None,
            sensitivity: Sensitivity::Normal,
            deceleration: Deceleration::Normal,
            initial_selection: 0,
            spacing: 100.0,
            wing_span: 80.0,
            rotation: 50.0,
            mid_rotation: 50.0,
            perspective: 800.0,
            scale_down: 0.8,
            scale_further: 0.75,
            disable_interaction: false,
        }
    }

    pub fn with_get_item_key(
        mut self,
        get_item_key: impl Fn(usize) -> K + Send + Sync + 'static,
    ) -> Self {
        self.get_item_key = Arc::new(get_item_key);
        self
    }

    pub fn with_on_press(
        mut self,
        on_press: Option<impl Fn(usize) + Send + Sync + 'static>,
    ) -> Self {
        self.on_press = on_press.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: Sensitivity) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_deceleration(mut self, deceleration: Deceleration) -> Self {
        self.deceleration = deceleration;
        self
    }

    pub fn with_initial_selection(mut self, initial_selection: usize) -> Self {
        self.initial_selection = initial_selection;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_wing_span(mut self, wing_span: f32) -> Self {
        self.wing_span = wing_span;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_mid_rotation(mut self, mid_rotation: f32) -> Self {
        self.mid_rotation = mid_rotation;
        self
    }

    pub fn with_perspective(mut self, perspective: f32) -> Self {
        self.perspective = perspective;
        self
    }

    pub fn with_scale_down(mut self, scale_down: f32) -> Self {
        self.scale_down = scale_down;
        self
    }

    pub fn with_scale_further(mut self, scale_further: f32) -> Self {
        self.scale_further = scale_further;
        self
    }

    pub fn with_disable_interaction(mut self, disable_interaction: bool) -> Self {
        self.disable_interaction = disable_interaction;
        self
    }
}

impl<K> Clone for CoverflowOptions<K> {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            on_change: Arc::clone(&self.on_change),
            get_item_key: Arc::clone(&self.get_item_key),
            on_press: self.on_press.clone(),
            sensitivity: self.sensitivity,
            deceleration: self.deceleration,
            initial_selection: self.initial_selection,
            spacing: self.spacing,
            wing_span: self.wing_span,
            rotation: self.rotation,
            mid_rotation: self.mid_rotation,
            perspective: self.perspective,
            scale_down: self.scale_down,
            scale_further: self.scale_further,
            disable_interaction: self.disable_interaction,
        }
    }
}

impl<K> core::fmt::Debug for CoverflowOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CoverflowOptions")
            .field("count", &self.count)
            .field("sensitivity", &self.sensitivity)
            .field("deceleration", &self.deceleration)
            .field("initial_selection", &self.initial_selection)
            .field("spacing", &self.spacing)
            .field("wing_span", &self.wing_span)
            .field("rotation", &self.rotation)
            .field("mid_rotation", &self.mid_rotation)
            .field("perspective", &self.perspective)
            .field("scale_down", &self.scale_down)
            .field("scale_further", &self.scale_further)
            .field("disable_interaction", &self.disable_interaction)
            .finish_non_exhaustive()
    }
}
