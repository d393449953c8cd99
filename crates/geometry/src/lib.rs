//! Geometry builders: pure functions producing vertex/colour/index arrays.
//!
//! Builders never touch the GPU. Their output is validated before upload.
//!
//! # Invariants
//! - Every index references an existing vertex.
//! - Triangle lists carry a multiple of 3 indices, line lists a multiple of 2.
//! - Solid triangles are wound counter-clockwise seen from outside the shape
//!   (or from above, for ground geometry).

mod cube;
mod mesh;
mod road;
mod ring;
mod sky;
mod sphere;

pub use cube::{CUBE_FACE_NORMALS, cube, glass_cube, showcase_cube};
pub use mesh::{GeometryError, MAX_VERTICES, MeshData, Topology};
pub use road::{
    DashLayout, RoadLayout, dash_count, edge_lines, ground_plane, road, road_dashes,
};
pub use ring::{RingSpec, ring, ring_yz};
pub use sky::{SKY_DEPTH, sky_quad};
pub use sphere::{BALL_COLOR, sphere};
