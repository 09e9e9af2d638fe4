use std::path::{Path, PathBuf};

/// Directory the asset list is resolved against, relative to the working directory
pub const TEXTURE_DIR: &str = "assets/textures";

/// Every texture the scene can reference. The asset list below has exactly one
/// file per key, so a key is always a valid handle once startup succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKey {
    Floor,
    Wall,
    Ceiling,
    Painting0,
    Painting1,
    Painting2,
    Painting3,
    Frame,
    Skin,
}

impl TextureKey {
    pub const ALL: [TextureKey; 9] = [
        TextureKey::Floor,
        TextureKey::Wall,
        TextureKey::Ceiling,
        TextureKey::Painting0,
        TextureKey::Painting1,
        TextureKey::Painting2,
        TextureKey::Painting3,
        TextureKey::Frame,
        TextureKey::Skin,
    ];

    pub const PAINTINGS: [TextureKey; 4] = [
        TextureKey::Painting0,
        TextureKey::Painting1,
        TextureKey::Painting2,
        TextureKey::Painting3,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Canvas `n`, wrapping around the available paintings
    pub fn painting(n: usize) -> Self {
        Self::PAINTINGS[n % Self::PAINTINGS.len()]
    }

    pub fn file_name(self) -> &'static str {
        match self {
            TextureKey::Floor => "floor.png",
            TextureKey::Wall => "wall.png",
            TextureKey::Ceiling => "ceiling.png",
            TextureKey::Painting0 => "painting_0.png",
            TextureKey::Painting1 => "painting_1.png",
            TextureKey::Painting2 => "painting_2.png",
            TextureKey::Painting3 => "painting_3.png",
            TextureKey::Frame => "frame.png",
            TextureKey::Skin => "skin.png",
        }
    }

    pub fn path_in(self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

/// GPU bind groups for the loaded textures, indexed by `TextureKey`
pub struct TextureTable {
    bind_groups: Vec<wgpu::BindGroup>,
}

impl TextureTable {
    /// `bind_groups` must be in `TextureKey::ALL` order
    pub fn new(bind_groups: Vec<wgpu::BindGroup>) -> Self {
        Self { bind_groups }
    }

    pub fn bind_group(&self, key: TextureKey) -> Option<&wgpu::BindGroup> {
        self.bind_groups.get(key.index())
    }

    pub fn len(&self) -> usize {
        self.bind_groups.len()
    }
}
