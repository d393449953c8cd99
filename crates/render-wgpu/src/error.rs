use showcase_geometry::GeometryError;

/// Failures while setting up or driving the GPU backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("{program} program does not declare `{name}`")]
    MissingBinding {
        program: &'static str,
        name: &'static str,
    },
    #[error("{program} program failed validation: {message}")]
    ShaderValidation {
        program: &'static str,
        message: String,
    },
    #[error("mesh `{mesh}` is invalid: {source}")]
    InvalidMesh {
        mesh: &'static str,
        #[source]
        source: GeometryError,
    },
    #[error("frame has {count} draws, at most {max} fit the uniform buffer")]
    TooManyDraws { count: usize, max: usize },
}
