use glam::{Mat4, Vec3};
use showcase_geometry::{
    BALL_COLOR, DashLayout, GeometryError, MeshData, RingSpec, RoadLayout, edge_lines,
    glass_cube, ground_plane, ring, ring_yz, road, road_dashes, showcase_cube, sky_quad,
    sphere,
};

/// Every mesh either scene draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshId {
    ShowcaseCube,
    Sky,
    Ground,
    Road,
    EdgeLines,
    Dashes,
    Ball,
    GlassCube,
    RingXz,
    RingYz,
}

impl MeshId {
    pub const ALL: [MeshId; 10] = [
        MeshId::ShowcaseCube,
        MeshId::Sky,
        MeshId::Ground,
        MeshId::Road,
        MeshId::EdgeLines,
        MeshId::Dashes,
        MeshId::Ball,
        MeshId::GlassCube,
        MeshId::RingXz,
        MeshId::RingYz,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MeshId::ShowcaseCube => "showcase_cube",
            MeshId::Sky => "sky",
            MeshId::Ground => "ground",
            MeshId::Road => "road",
            MeshId::EdgeLines => "edge_lines",
            MeshId::Dashes => "dashes",
            MeshId::Ball => "ball",
            MeshId::GlassCube => "glass_cube",
            MeshId::RingXz => "ring_xz",
            MeshId::RingYz => "ring_yz",
        }
    }

    /// Build the CPU geometry for this mesh.
    pub fn build(self) -> Result<MeshData, GeometryError> {
        let mesh = match self {
            MeshId::ShowcaseCube => showcase_cube(),
            MeshId::Sky => sky_quad(),
            MeshId::Ground => ground_plane(100_000.0, -20.0, -25.0, [0.25, 0.12, 0.0, 1.0]),
            MeshId::Road => road(&RoadLayout::default()),
            MeshId::EdgeLines => edge_lines(),
            MeshId::Dashes => road_dashes(&DashLayout::default())?,
            MeshId::Ball => sphere(0.23, 30, BALL_COLOR)?,
            MeshId::GlassCube => glass_cube(),
            MeshId::RingXz => ring(&RingSpec::default())?,
            MeshId::RingYz => ring_yz(&RingSpec::default())?,
        };
        Ok(mesh)
    }
}

/// Colour blending for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlendMode {
    Opaque,
    /// `src_alpha, one_minus_src_alpha`.
    Alpha,
}

/// Depth state for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DepthMode {
    /// Test and write.
    ReadWrite,
    /// Test without writing, for blended geometry.
    ReadOnly,
    /// Neither test nor write.
    Disabled,
}

/// One indexed draw with its per-draw uniforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub mesh: MeshId,
    pub model: Mat4,
    pub mvp: Mat4,
    pub normal_matrix: Mat4,
    pub blend: BlendMode,
    pub depth: DepthMode,
    pub use_texture: bool,
}

/// Per-frame lighting uniforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLighting {
    pub light_color: Vec3,
    pub light_direction: Vec3,
    pub ambient: Vec3,
    pub point_light_position: Vec3,
}

impl Default for FrameLighting {
    /// Full-bright ambient, no diffuse: colours pass through unchanged.
    fn default() -> Self {
        Self {
            light_color: Vec3::ZERO,
            light_direction: Vec3::Y,
            ambient: Vec3::ONE,
            point_light_position: Vec3::ZERO,
        }
    }
}

/// Everything a backend needs to draw one frame, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub clear_color: [f64; 4],
    pub lighting: FrameLighting,
    pub view_projection: Mat4,
    pub draws: Vec<DrawCall>,
}

impl FramePlan {
    pub fn draws_of(&self, mesh: MeshId) -> impl Iterator<Item = &DrawCall> {
        self.draws.iter().filter(move |d| d.mesh == mesh)
    }
}
