//! Gradient model and CSS gradient compiler for **Ombre**.
//!
//! This crate has no rendering or platform code so it can back any front
//! end: the terminal studio, an exporter, or a test harness.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`stop`] | `ColorStop`, `StopEdit` |
//! | [`kind`] | `GradientKind` |
//! | [`model`] | `GradientModel`, `EditPolicy` |
//! | [`compile`] | `compile`, `sorted_stops`, `declaration` |
//! | [`color`] | color syntax checks, `Rgba` |
//! | [`error`] | `ValidationError` |
//!
//! # Quick start
//!
//! ```rust
//! use ombre_core::{GradientKind, GradientModel};
//!
//! let mut model = GradientModel::new();
//! model.set_kind(GradientKind::Radial);
//! assert_eq!(model.css(), "radial-gradient(circle, #667eea 0%, #764ba2 100%)");
//! ```

pub mod color;
pub mod compile;
pub mod error;
pub mod kind;
pub mod model;
pub mod stop;

pub use compile::{compile, declaration, sorted_stops};
pub use error::ValidationError;
pub use kind::GradientKind;
pub use model::{EditPolicy, GradientModel, MIN_STOPS};
pub use stop::{ColorStop, StopEdit};
