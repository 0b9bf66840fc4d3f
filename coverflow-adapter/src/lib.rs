//! Adapter utilities for the `coverflow` crate.
//!
//! The `coverflow` crate is UI-agnostic and focuses on the core math and state. This crate
//! provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - Pan recognition: deciding whether a touch sequence is a tap on an item or a drag of the
//!   carousel, using a movement threshold
//! - A controller that wires touch events and per-frame ticks into a `Coverflow`
//!
//! This crate is intentionally framework-agnostic (no winit/egui bindings).
#![forbid(unsafe_code)]

mod controller;
mod recognizer;


pub use controller::Controller;
pub use recognizer::{PanEvent, PanRecognizer};
