use std::fmt;

/// Primitive assembly for an index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topology {
    TriangleList,
    TriangleStrip,
    LineList,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Topology::TriangleList => "triangles",
            Topology::TriangleStrip => "triangle-strip",
            Topology::LineList => "lines",
        };
        f.write_str(name)
    }
}

/// Most vertices a 16-bit index buffer can address.
pub const MAX_VERTICES: usize = u16::MAX as usize + 1;

/// Fail when `count` vertices cannot all be reached by `u16` indices.
pub(crate) fn check_vertex_count(count: usize) -> Result<(), GeometryError> {
    if count > MAX_VERTICES {
        return Err(GeometryError::TooManyVertices {
            count,
            max: MAX_VERTICES,
        });
    }
    Ok(())
}

/// Errors from mesh building and validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        index: u16,
        position: usize,
        vertex_count: usize,
    },
    #[error("{topology} needs a multiple of {multiple} indices, got {count}")]
    IndexCount {
        topology: Topology,
        multiple: usize,
        count: usize,
    },
    #[error("{attribute} has {actual} entries, expected {expected}")]
    AttributeLength {
        attribute: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("mesh has no vertices")]
    Empty,
    #[error("{count} vertices exceed the {max} reachable with 16-bit indices")]
    TooManyVertices { count: usize, max: usize },
}

/// CPU-side vertex buffer set for one object.
///
/// Colours are RGBA. Normals and texture coordinates are optional; the GPU
/// binder substitutes defaults when they are missing.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub normals: Option<Vec<[f32; 3]>>,
    pub tex_coords: Option<Vec<[f32; 2]>>,
    pub indices: Vec<u16>,
    pub topology: Topology,
}

impl MeshData {
    pub fn new(topology: Topology) -> Self {
        Self {
            positions: Vec::new(),
            colors: Vec::new(),
            normals: None,
            tex_coords: None,
            indices: Vec::new(),
            topology,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of primitives the index buffer assembles.
    pub fn primitive_count(&self) -> usize {
        match self.topology {
            Topology::TriangleList => self.indices.len() / 3,
            Topology::TriangleStrip => self.indices.len().saturating_sub(2),
            Topology::LineList => self.indices.len() / 2,
        }
    }

    /// Rewrite every position (and normal) with `f`.
    pub fn map_positions(&mut self, f: impl Fn([f32; 3]) -> [f32; 3]) {
        for p in &mut self.positions {
            *p = f(*p);
        }
        if let Some(normals) = &mut self.normals {
            for n in normals.iter_mut() {
                *n = f(*n);
            }
        }
    }

    /// Check index ranges, index counts and attribute lengths.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let vertex_count = self.positions.len();
        if vertex_count == 0 {
            return Err(GeometryError::Empty);
        }
        check_vertex_count(vertex_count)?;
        if self.colors.len() != vertex_count {
            return Err(GeometryError::AttributeLength {
                attribute: "colors",
                expected: vertex_count,
                actual: self.colors.len(),
            });
        }
        if let Some(normals) = &self.normals {
            if normals.len() != vertex_count {
                return Err(GeometryError::AttributeLength {
                    attribute: "normals",
                    expected: vertex_count,
                    actual: normals.len(),
                });
            }
        }
        if let Some(tex_coords) = &self.tex_coords {
            if tex_coords.len() != vertex_count {
                return Err(GeometryError::AttributeLength {
                    attribute: "tex_coords",
                    expected: vertex_count,
                    actual: tex_coords.len(),
                });
            }
        }

        let count = self.indices.len();
        let (multiple, ok) = match self.topology {
            Topology::TriangleList => (3, count > 0 && count % 3 == 0),
            Topology::LineList => (2, count > 0 && count % 2 == 0),
            Topology::TriangleStrip => (1, count >= 3),
        };
        if !ok {
            return Err(GeometryError::IndexCount {
                topology: self.topology,
                multiple,
                count,
            });
        }

        for (position, &index) in self.indices.iter().enumerate() {
            if index as usize >= vertex_count {
                return Err(GeometryError::IndexOutOfRange {
                    index,
                    position,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}
