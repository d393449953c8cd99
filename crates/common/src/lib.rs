//! Shared types for the showcase scenes.
//!
//! # Invariants
//! - Euler angles are stored in degrees and always wrapped into `[0, 360)`.
//! - Model matrices compose translate, then scale, then rotate X, Y, Z as
//!   successive right multiplications.

mod types;

pub use types::{EulerDegrees, Transform, normal_matrix, wrap_degrees};
