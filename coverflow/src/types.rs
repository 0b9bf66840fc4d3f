/// Drag sensitivity class.
///
/// Resolves to the divisor used to convert pixel deltas into position-space deltas: a lower
/// divisor means the same finger travel moves the carousel further.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sensitivity {
    Low,
    #[default]
    Normal,
    High,
}

impl Sensitivity {
    /// Pixels of finger travel per position unit.
    pub fn divisor(self) -> f32 {
        match self {
            Self::Low => 120.0,
            Self::Normal => 60.0,
            Self::High => 40.0,
        }
    }
}

/// Kinetic decay class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Deceleration {
    #[default]
    Normal,
    Fast,
}

impl Deceleration {
    /// Geometric velocity-decay factor, applied per elapsed millisecond.
    pub fn factor(self) -> f32 {
        match self {
            Self::Normal => 0.998,
            Self::Fast => 0.99,
        }
    }
}

/// What currently owns the scroll position.
///
/// Exactly one driver is active at a time; starting a new gesture or animation deterministically
/// cancels the previous one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationState {
    #[default]
    Idle,
    Dragging,
    Decaying,
    Springing,
}

/// The 3D transform for one item at its current offset from the scroll position.
///
/// `rotate_y` is in degrees; `perspective` is the configured perspective distance, passed
/// through so the paint layer can apply the full transform in one place.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTransform {
    pub translate_x: f32,
    pub scale: f32,
    pub rotate_y: f32,
    pub perspective: f32,
}

/// An item in paint order, with its transform.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverflowItem {
    pub index: usize,
    pub transform: ItemTransform,
}

/// An item in paint order, carrying its stable identity key.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverflowItemKeyed<K> {
    pub key: K,
    pub index: usize,
    pub transform: ItemTransform,
}

pub type ItemKey = u64;
