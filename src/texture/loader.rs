use std::path::{Path, PathBuf};

use tokio::task::JoinSet;

use crate::error::GalleryError;
use crate::texture::manager::TextureKey;

/// Decoded RGBA8 pixels for one asset
#[derive(Debug, Clone)]
pub struct LoadedTexture {
    pub key: TextureKey,
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Load texture bytes from a local file
pub async fn load_from_file(path: &Path) -> Result<Vec<u8>, GalleryError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| GalleryError::TextureIo {
            path: path.to_path_buf(),
            source,
        })
}

/// Decode any format the `image` crate understands into RGBA8
pub fn decode_image(path: &Path, data: &[u8]) -> Result<(Vec<u8>, u32, u32), GalleryError> {
    let img = image::load_from_memory(data).map_err(|source| GalleryError::TextureDecode {
        path: path.to_path_buf(),
        source,
    })?;

    let rgba_img = img.to_rgba8();
    let (width, height) = rgba_img.dimensions();
    Ok((rgba_img.into_raw(), width, height))
}

pub async fn load_texture(key: TextureKey, dir: &Path) -> Result<LoadedTexture, GalleryError> {
    let path = key.path_in(dir);
    let data = load_from_file(&path).await?;
    let (rgba, width, height) = decode_image(&path, &data)?;
    log::info!("Loaded texture {}: {}x{}", path.display(), width, height);
    Ok(LoadedTexture {
        key,
        rgba,
        width,
        height,
    })
}

/// Load the whole asset list concurrently. The first failure aborts startup.
/// Results come back in `TextureKey::ALL` order.
pub async fn load_all(dir: &Path) -> Result<Vec<LoadedTexture>, GalleryError> {
    let mut tasks = JoinSet::new();
    for key in TextureKey::ALL {
        let dir: PathBuf = dir.to_path_buf();
        tasks.spawn(async move { load_texture(key, &dir).await });
    }

    let mut textures = Vec::with_capacity(TextureKey::ALL.len());
    while let Some(joined) = tasks.join_next().await {
        textures.push(joined??);
    }
    textures.sort_by_key(|t| t.key.index());
    Ok(textures)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gallery-rs-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_png(path: &Path, width: u32, height: u32) {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 100, 50, 255]));
        img.save(path).unwrap();
    }

    #[test]
    fn decode_produces_rgba8() {
        let dir = scratch_dir("decode");
        let path = dir.join("tiny.png");
        write_png(&path, 4, 2);

        let data = std::fs::read(&path).unwrap();
        let (rgba, width, height) = decode_image(&path, &data).unwrap();
        assert_eq!((width, height), (4, 2));
        assert_eq!(rgba.len(), 4 * 2 * 4);
        assert_eq!(&rgba[..4], &[200, 100, 50, 255]);
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let path = Path::new("broken.png");
        let err = decode_image(path, b"not an image").unwrap_err();
        assert!(matches!(err, GalleryError::TextureDecode { .. }));
        assert!(err.to_string().contains("broken.png"));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error_naming_the_path() {
        let dir = scratch_dir("missing");
        let err = load_texture(TextureKey::Wall, &dir).await.unwrap_err();
        match err {
            GalleryError::TextureIo { path, .. } => assert_eq!(path, dir.join("wall.png")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn load_all_returns_every_key_in_order() {
        let dir = scratch_dir("all");
        for (i, key) in TextureKey::ALL.iter().enumerate() {
            write_png(&key.path_in(&dir), i as u32 + 1, 2);
        }

        let textures = load_all(&dir).await.unwrap();
        assert_eq!(textures.len(), TextureKey::ALL.len());
        for (i, texture) in textures.iter().enumerate() {
            assert_eq!(texture.key, TextureKey::ALL[i]);
            assert_eq!(texture.width, i as u32 + 1);
        }
    }

    #[tokio::test]
    async fn load_all_fails_when_one_asset_is_missing() {
        let dir = scratch_dir("partial");
        for key in TextureKey::ALL.iter().filter(|k| **k != TextureKey::Frame) {
            write_png(&key.path_in(&dir), 2, 2);
        }
        let _ = std::fs::remove_file(TextureKey::Frame.path_in(&dir));

        let err = load_all(&dir).await.unwrap_err();
        assert!(err.to_string().contains("frame.png"));
    }
}
