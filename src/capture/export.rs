use std::fmt;
use std::io::Cursor;

use anyhow::Context as _;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;

use crate::foundation::error::{SigntrackError, SigntrackResult};
use crate::foundation::math::unpremultiply_in_place;

const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// A signature bitmap as a PNG `data:` URI.
///
/// The empty string stands for "no image": it is what an unready surface exports.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EncodedImage(String);

impl EncodedImage {
    /// Wrap an existing data URI without validating it.
    pub fn from_data_uri(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Encode a premultiplied RGBA8 buffer as a straight-alpha PNG data URI.
    pub fn encode_rgba8_premul(width: u32, height: u32, premul: &[u8]) -> SigntrackResult<Self> {
        let expected = width as usize * height as usize * 4;
        if premul.len() != expected {
            return Err(SigntrackError::encode(format!(
                "rgba buffer is {} bytes, expected {expected} for {width}x{height}",
                premul.len()
            )));
        }

        let mut straight = premul.to_vec();
        unpremultiply_in_place(&mut straight);
        let img = image::RgbaImage::from_raw(width, height, straight)
            .ok_or_else(|| SigntrackError::encode("invalid rgba buffer size"))?;

        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .context("encode signature png")?;

        let mut uri = String::with_capacity(PNG_DATA_URI_PREFIX.len() + png.len() * 4 / 3 + 4);
        uri.push_str(PNG_DATA_URI_PREFIX);
        B64.encode_string(&png, &mut uri);
        Ok(Self(uri))
    }

    /// The full URI text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` for the "no image" value.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw PNG bytes carried by the URI.
    pub fn png_bytes(&self) -> SigntrackResult<Vec<u8>> {
        let payload = self
            .0
            .strip_prefix(PNG_DATA_URI_PREFIX)
            .ok_or_else(|| SigntrackError::encode("not a base64 png data uri"))?;
        let bytes = B64
            .decode(payload.as_bytes())
            .context("decode signature base64")?;
        Ok(bytes)
    }

    /// Decode back into straight-alpha RGBA8 pixels.
    pub fn decode(&self) -> SigntrackResult<image::RgbaImage> {
        let bytes = self.png_bytes()?;
        let img = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)
            .context("decode signature png")?;
        Ok(img.to_rgba8())
    }
}

impl fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
