use crate::mesh::{GeometryError, MeshData, Topology, check_vertex_count};

const UP: [f32; 3] = [0.0, 1.0, 0.0];
const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Large sloping ground quad far below the assembly.
pub fn ground_plane(extent: f32, front_y: f32, back_y: f32, color: [f32; 4]) -> MeshData {
    let mut mesh = MeshData::new(Topology::TriangleList);
    mesh.positions = vec![
        [-extent, front_y, extent],
        [extent, front_y, extent],
        [extent, back_y, -extent],
        [-extent, back_y, -extent],
    ];
    mesh.colors = vec![color; 4];
    mesh.normals = Some(vec![UP; 4]);
    mesh.indices = vec![0, 1, 2, 0, 2, 3];
    mesh
}

/// Trapezoid road and its perspective taper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadLayout {
    pub front_half_width: f32,
    pub back_half_width: f32,
    pub front_z: f32,
    pub back_z: f32,
    pub front_y: f32,
    pub back_y: f32,
    pub color: [f32; 4],
}

impl Default for RoadLayout {
    fn default() -> Self {
        Self {
            front_half_width: 20.0,
            back_half_width: 5.0,
            front_z: 100.0,
            back_z: -100.0,
            front_y: -20.0,
            back_y: -22.0,
            color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

pub fn road(layout: &RoadLayout) -> MeshData {
    let mut mesh = MeshData::new(Topology::TriangleList);
    mesh.positions = vec![
        [-layout.front_half_width, layout.front_y, layout.front_z],
        [layout.front_half_width, layout.front_y, layout.front_z],
        [-layout.back_half_width, layout.back_y, layout.back_z],
        [layout.back_half_width, layout.back_y, layout.back_z],
    ];
    mesh.colors = vec![layout.color; 4];
    mesh.normals = Some(vec![UP; 4]);
    mesh.indices = vec![0, 1, 2, 1, 3, 2];
    mesh
}

/// Dashed centre markings. Widths taper linearly from `width_front` at
/// `front_z` to `width_back` at `back_z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashLayout {
    pub width_front: f32,
    pub width_back: f32,
    pub height: f32,
    pub spacing: f32,
    pub front_z: f32,
    pub back_z: f32,
    pub y: f32,
}

impl Default for DashLayout {
    fn default() -> Self {
        Self {
            width_front: 2.0,
            width_back: 0.5,
            height: 5.0,
            spacing: 10.0,
            front_z: 100.0,
            back_z: -100.0,
            y: -19.9,
        }
    }
}

impl DashLayout {
    fn width_at(&self, z: f32) -> f32 {
        let length = self.front_z - self.back_z;
        self.width_front - (self.front_z - z) * (self.width_front - self.width_back) / length
    }

    /// `(z_front, z_back)` of every dash, front to back.
    ///
    /// A dash is emitted only while `z_front - height > back_z`; a dash that
    /// would end exactly on `back_z` is not emitted.
    fn spans(&self) -> Vec<(f32, f32)> {
        let mut spans = Vec::new();
        if self.height <= 0.0 || self.height + self.spacing <= 0.0 {
            return spans;
        }
        let mut z_front = self.front_z;
        while z_front - self.height > self.back_z {
            let z_back = z_front - self.height;
            spans.push((z_front, z_back));
            z_front = z_back - self.spacing;
        }
        spans
    }
}

/// Number of dashes [`road_dashes`] emits for `layout`.
pub fn dash_count(layout: &DashLayout) -> usize {
    layout.spans().len()
}

/// Four vertices per dash. Fails when the layout needs more dashes than
/// 16-bit indices can reach.
pub fn road_dashes(layout: &DashLayout) -> Result<MeshData, GeometryError> {
    let spans = layout.spans();
    check_vertex_count(spans.len() * 4)?;
    let mut mesh = MeshData::new(Topology::TriangleList);

    for &(z_front, z_back) in &spans {
        let half_front = layout.width_at(z_front) / 2.0;
        let half_back = layout.width_at(z_back) / 2.0;
        let base = mesh.positions.len() as u16;
        mesh.positions.extend_from_slice(&[
            [-half_front, layout.y, z_front],
            [half_front, layout.y, z_front],
            [-half_back, layout.y, z_back],
            [half_back, layout.y, z_back],
        ]);
        mesh.colors.extend_from_slice(&[WHITE; 4]);
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 1, base + 3, base + 2]);
    }

    mesh.normals = Some(vec![UP; mesh.positions.len()]);
    tracing::debug!(dashes = spans.len(), "built road dashes");
    Ok(mesh)
}

/// White edge markers on both sides of the road, as a line list.
pub fn edge_lines() -> MeshData {
    let mut mesh = MeshData::new(Topology::LineList);
    mesh.positions = vec![
        [-21.5, -20.0, 125.0],
        [-4.0, -20.0, -85.0],
        [22.5, -20.0, 140.0],
        [4.0, -20.0, -90.0],
    ];
    mesh.colors = vec![WHITE; 4];
    mesh.normals = Some(vec![UP; 4]);
    mesh.indices = vec![0, 1, 2, 3];
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn assert_faces_up(mesh: &MeshData) {
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] =
                [tri[0], tri[1], tri[2]].map(|i| Vec3::from(mesh.positions[i as usize]));
            assert!((b - a).cross(c - a).y > 0.0, "triangle {tri:?} faces down");
        }
    }

    #[test]
    fn default_dash_count_matches_period() {
        let layout = DashLayout::default();
        let length = layout.front_z - layout.back_z;
        let expected = (length / (layout.height + layout.spacing)).floor() as usize;
        assert_eq!(dash_count(&layout), expected);
        assert_eq!(dash_count(&layout), 13);
    }

    #[test]
    fn dash_ending_exactly_on_back_edge_is_dropped() {
        // Second dash would span z = -5 .. -10 and touch back_z exactly.
        let layout = DashLayout {
            front_z: 10.0,
            back_z: -10.0,
            ..DashLayout::default()
        };
        assert_eq!(dash_count(&layout), 1);

        let exact = DashLayout {
            front_z: 5.0,
            back_z: 0.0,
            ..DashLayout::default()
        };
        assert_eq!(dash_count(&exact), 0);
    }

    #[test]
    fn dashes_taper_towards_back() {
        let mesh = road_dashes(&DashLayout::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 13 * 4);
        assert_eq!(mesh.index_count(), 13 * 6);
        assert_eq!(mesh.validate(), Ok(()));

        let first_front = mesh.positions[1][0] * 2.0;
        let last_back = mesh.positions[mesh.vertex_count() - 1][0] * 2.0;
        assert!((first_front - 2.0).abs() < 1e-6);
        assert!(last_back < first_front);
        assert!(last_back > 0.5);
        assert_faces_up(&mesh);
    }

    #[test]
    fn dense_dashes_keep_their_own_vertices() {
        let at_limit = DashLayout {
            height: 0.5,
            spacing: 0.5,
            front_z: 8192.0,
            back_z: -8192.0,
            ..DashLayout::default()
        };
        assert_eq!(dash_count(&at_limit), 16_384);
        let mesh = road_dashes(&at_limit).unwrap();
        assert_eq!(mesh.validate(), Ok(()));
        let last = &mesh.indices[mesh.index_count() - 6..];
        let base = (mesh.vertex_count() - 4) as u16;
        assert_eq!(last, &[base, base + 1, base + 2, base + 1, base + 3, base + 2]);

        let too_dense = DashLayout {
            front_z: 10_000.0,
            back_z: -10_000.0,
            ..at_limit
        };
        assert!(matches!(
            road_dashes(&too_dense),
            Err(GeometryError::TooManyVertices { count: 80_000, .. })
        ));
    }

    #[test]
    fn road_and_plane_face_up() {
        let road = road(&RoadLayout::default());
        assert_eq!(road.validate(), Ok(()));
        assert_faces_up(&road);

        let plane = ground_plane(100_000.0, -20.0, -25.0, [0.25, 0.12, 0.0, 1.0]);
        assert_eq!(plane.validate(), Ok(()));
        assert_faces_up(&plane);
    }

    #[test]
    fn edge_lines_are_a_line_list() {
        let lines = edge_lines();
        assert_eq!(lines.topology, Topology::LineList);
        assert_eq!(lines.primitive_count(), 2);
        assert_eq!(lines.validate(), Ok(()));
    }
}
