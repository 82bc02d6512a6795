// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Orbit camera controls for Gaussian-splat viewers, with synchronized
//! multi-viewer support.
//!
//! The crate turns pointer, wheel and touch input into a damped spherical
//! orbit around a look-at point and writes the resulting pose to an
//! observable camera. Several viewers on one page can be driven as one:
//! a master viewer's orbit state is mirrored onto the others every frame.
//! Drawing and model parsing stay with the host, behind the traits in
//! [`viewer::backend`].
//!
//! # Key entry points
//!
//! - [`camera::OrbitController`] - the per-viewer orbit controller
//! - [`input::InputSurface`] - the listener registry a controller binds to
//! - [`viewer::ViewerRegistry`] - master/slave coordination and model
//!   loading
//! - [`options::Options`] - control bounds, viewer behavior and gallery
//!   layout, loadable from TOML

pub mod camera;
pub mod error;
pub mod input;
pub mod options;
pub mod util;
pub mod viewer;
#[cfg(feature = "web")]
pub mod web;

pub use camera::{OrbitController, OrbitPose, OrbitSnapshot, SharedCamera};
pub use error::OrbitError;
pub use input::{InputEvent, InputSurface};
pub use options::Options;
pub use viewer::ViewerRegistry;
