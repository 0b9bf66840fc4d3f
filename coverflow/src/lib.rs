//! A headless coverflow carousel engine.
//!
//! For adapter-level utilities (gesture recognition, frame-tick controllers), see the
//! `coverflow-adapter` crate.
//!
//! This crate focuses on the interaction/animation core of a coverflow widget: a single
//! continuous scroll position driven by drag gestures, kinetic decay and spring settling,
//! the discrete selection derived from it, and the per-item 3D "fan" transforms.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - raw drag samples (horizontal pixel delta since gesture start, release velocity)
//! - a per-frame animation tick with a millisecond timestamp
//! - the measured container width
//! - a paint surface that can apply a perspective/scale/rotation transform
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod coverflow;
mod gesture;
mod options;
mod order;
mod position;
mod transform;
mod types;

#[cfg(test)]
mod tests;

pub use coverflow::Coverflow;
pub use gesture::{
    DRAG_CLAIM_THRESHOLD_PX, ReleaseAction, drag_delta_to_position, release_action,
    release_velocity_to_position,
};
pub use options::{CoverflowOptions, OnChangeCallback, OnPressCallback};
pub use order::{collect_paint_order, for_each_paint_index};
pub use position::{ListenerId, PositionListener, PositionTick, ScrollPosition};
pub use transform::{TransformParams, focus_proximity, item_transform};
pub use types::{
    AnimationState, CoverflowItem, CoverflowItemKeyed, Deceleration, ItemKey, ItemTransform,
    Sensitivity,
};
