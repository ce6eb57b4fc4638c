use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{WallfitError, WallfitResult};
use crate::layout::resolver::Transform;
use crate::render::resample::place_scaled;

/// Produce a `dst_width x dst_height` buffer from `src` placed by `transform`.
///
/// The destination starts fully transparent. For fill, the crop window is read directly out of
/// the virtual scaled image, so the pre-crop intermediate is never materialized. Pixels with no
/// source contribution stay `[0, 0, 0, 0]`.
#[tracing::instrument(level = "debug", skip(src), fields(src_w = src.width(), src_h = src.height()))]
pub fn compose(src: PixelBuffer, transform: &Transform) -> WallfitResult<PixelBuffer> {
    if src.is_empty() {
        return Err(WallfitError::composition(format!(
            "source buffer is empty ({}x{})",
            src.width(),
            src.height()
        )));
    }
    if (src.width(), src.height()) != (transform.src_width, transform.src_height) {
        return Err(WallfitError::composition(format!(
            "source is {}x{} but transform was resolved for {}x{}",
            src.width(),
            src.height(),
            transform.src_width,
            transform.src_height
        )));
    }

    let mut dst = PixelBuffer::transparent(transform.dst_width, transform.dst_height)?;
    place_scaled(
        &src,
        transform.scaled_width,
        transform.scaled_height,
        transform.offset(),
        &mut dst,
    );
    Ok(dst)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
