use base64::Engine as _;

use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{WallfitError, WallfitResult};

/// Decode encoded image bytes (PNG, JPEG, ...) into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> WallfitResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| WallfitError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(WallfitError::decode(format!(
            "decoded image has no pixels ({width}x{height})"
        )));
    }
    PixelBuffer::from_raw(width, height, rgba.into_raw())
}

/// Decode a base64 payload, accepting an optional `data:<mime>;base64,` prefix, embedded
/// whitespace and missing padding.
pub fn decode_base64_payload(payload: &str) -> WallfitResult<Vec<u8>> {
    let body = strip_data_url(payload.trim());
    let compact: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Err(WallfitError::decode("base64 payload is empty"));
    }

    let engine = base64::engine::GeneralPurpose::new(
        &base64::alphabet::STANDARD,
        base64::engine::GeneralPurposeConfig::new()
            .with_decode_padding_mode(base64::engine::DecodePaddingMode::Indifferent),
    );
    engine
        .decode(compact.as_bytes())
        .map_err(|e| WallfitError::decode(format!("base64: {e}")))
}

fn strip_data_url(s: &str) -> &str {
    if !s.starts_with("data:") {
        return s;
    }
    match s.find(";base64,") {
        Some(idx) => &s[idx + ";base64,".len()..],
        None => s,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
