use std::fmt;

/// Load status of the sky texture.
///
/// Starts at `NotLoaded`, moves once to `Loaded` or `Failed`, and is polled
/// every frame. Only `Loaded` lets the sky be drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextureState {
    #[default]
    NotLoaded,
    Loaded,
    Failed,
}

impl TextureState {
    pub fn is_ready(self) -> bool {
        self == TextureState::Loaded
    }
}

impl fmt::Display for TextureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextureState::NotLoaded => "not loaded",
            TextureState::Loaded => "loaded",
            TextureState::Failed => "failed",
        };
        f.write_str(name)
    }
}
