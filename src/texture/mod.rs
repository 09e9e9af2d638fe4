pub mod loader;
pub mod manager;

pub use loader::{LoadedTexture, load_all};
pub use manager::{TEXTURE_DIR, TextureKey, TextureTable};
