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
#![deny(clippy::excessive_nesting)]
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
#![deny(unused_qualifications)]
// Cast hygiene: trivial casts banned, numeric narrowing allowed since
// graphics math converts between f32/f64/usize constantly
#![deny(trivial_casts)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
// Float comparisons against exact constants (0.0, 1.0) are deliberate here
#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

//! Trackball camera interaction toolkit with BVH-accelerated ray picking
//! math.
//!
//! The crate has three layers, each usable on its own:
//!
//! - [`math`] - points, vectors, 4x4 matrices, and quaternions tuned for
//!   graphics work (column-major, GPU-uploadable via bytemuck)
//! - [`geometry`] - triangle meshes, axis-aligned bounding boxes, rays,
//!   and a bounding volume hierarchy for fast mesh picking
//! - [`camera`] - the [`camera::UniCam`] one-button camera controller:
//!   pan, dolly, trackball rotation, and momentum spinning from a single
//!   pointer button
//!
//! # Key entry points
//!
//! - [`camera::UniCam`] - the camera controller driven by
//!   [`input::PointerEvent`] values
//! - [`geometry::Ray::fast_intersect_mesh`] - BVH-accelerated picking
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! The crate never talks to a window system or a GPU. Applications feed
//! it pointer events in normalized device coordinates and read back the
//! view matrix each frame.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod input;
pub mod math;
pub mod options;

pub use camera::{GestureState, PivotMarker, UniCam};
pub use error::UnicamError;
pub use geometry::{Aabb, Bvh, MeshHit, Ray, TriangleMesh};
pub use input::PointerEvent;
pub use math::{Matrix4, Point2, Point3, Quaternion, Vector2, Vector3};
pub use options::{CameraOptions, Options};
