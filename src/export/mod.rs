//! PNG export of the current avatar: bytes, `data:` URI, and the fixed-name download.

use crate::foundation::error::{AvatarError, AvatarResult};
use crate::render::output::AvatarImage;
use anyhow::Context as _;
use base64::Engine as _;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Name every downloaded avatar is saved under.
pub const DOWNLOAD_FILE_NAME: &str = "emoji-avatar.png";

const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

impl AvatarImage {
    /// Encode as PNG with straight alpha.
    #[tracing::instrument(skip(self), fields(width = self.width, height = self.height))]
    pub fn encode_png(&self) -> AvatarResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba8())
            .ok_or_else(|| AvatarError::encode("avatar pixel buffer does not match its size"))?;

        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| AvatarError::encode(format!("png encode: {e}")))?;
        Ok(buf)
    }

    /// `data:image/png;base64,...` for the PNG encoding.
    pub fn to_data_uri(&self) -> AvatarResult<String> {
        let png = self.encode_png()?;
        let mut uri = String::with_capacity(PNG_DATA_URI_PREFIX.len() + png.len() * 4 / 3 + 4);
        uri.push_str(PNG_DATA_URI_PREFIX);
        base64::engine::general_purpose::STANDARD.encode_string(&png, &mut uri);
        Ok(uri)
    }
}

/// Decode the payload of a PNG `data:` URI.
pub fn decode_data_uri(uri: &str) -> AvatarResult<Vec<u8>> {
    let payload = uri
        .strip_prefix(PNG_DATA_URI_PREFIX)
        .ok_or_else(|| AvatarError::validation("not a base64 png data uri"))?;
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| AvatarError::validation(format!("invalid base64 payload: {e}")))
}

/// Write `image` as `DOWNLOAD_FILE_NAME` inside `dir`, creating `dir` if needed.
///
/// An existing file of the same name is replaced.
pub fn save_download(image: &AvatarImage, dir: &Path) -> AvatarResult<PathBuf> {
    let png = image.encode_png()?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create download dir '{}'", dir.display()))?;
    let path = dir.join(DOWNLOAD_FILE_NAME);
    std::fs::write(&path, &png).with_context(|| format!("write png '{}'", path.display()))?;
    tracing::info!(path = %path.display(), bytes = png.len(), "avatar saved");
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
