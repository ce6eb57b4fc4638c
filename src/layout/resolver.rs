use crate::foundation::core::{Affine, LayoutMode, Vec2};
use crate::foundation::error::{WallfitError, WallfitResult};

/// Sub-region of the scaled source that lands in the destination (fill only).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CropRect {
    pub x: u64,
    pub y: u64,
    pub width: u64,
    pub height: u64,
}

/// Placement of a source image inside a destination surface.
///
/// The source is resampled to `scaled_width x scaled_height` and its top-left corner is placed
/// at `(translate_x, translate_y)` in destination pixels. Translations are always whole pixels.
/// For [`LayoutMode::Fill`], `crop` names the window of the scaled image that becomes the
/// destination and the translation equals the negated crop offset. Scaled sizes are `u64`: a
/// fill can enlarge one axis far past `u32` without that image ever being allocated.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Transform {
    pub mode: LayoutMode,
    pub src_width: u32,
    pub src_height: u32,
    pub dst_width: u32,
    pub dst_height: u32,
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub scaled_width: u64,
    pub scaled_height: u64,
    pub crop: Option<CropRect>,
}

impl Transform {
    /// Source-pixel to destination-pixel mapping, using the realized (rounded) scaled size.
    pub fn to_affine(&self) -> Affine {
        let sx = self.scaled_width as f64 / f64::from(self.src_width);
        let sy = self.scaled_height as f64 / f64::from(self.src_height);
        Affine::translate(Vec2::new(self.translate_x, self.translate_y))
            * Affine::scale_non_uniform(sx, sy)
    }

    /// Integer offset of the scaled image's top-left corner in the destination.
    pub fn offset(&self) -> (i64, i64) {
        match self.crop {
            Some(c) => (negated(c.x), negated(c.y)),
            None => (self.translate_x as i64, self.translate_y as i64),
        }
    }
}

/// Compute the placement of a `src_w x src_h` image in a `dst_w x dst_h` surface.
///
/// Pure function of its inputs. Fails with [`WallfitError::InvalidGeometry`] if any dimension
/// is zero; every positive combination resolves.
#[tracing::instrument(level = "debug")]
pub fn resolve(
    src_w: u32,
    src_h: u32,
    dst_w: u32,
    dst_h: u32,
    mode: LayoutMode,
) -> WallfitResult<Transform> {
    if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
        return Err(WallfitError::invalid_geometry(format!(
            "dimensions must be positive, got source {src_w}x{src_h} and destination {dst_w}x{dst_h}"
        )));
    }

    let scale_x = f64::from(dst_w) / f64::from(src_w);
    let scale_y = f64::from(dst_h) / f64::from(src_h);

    let base = Transform {
        mode,
        src_width: src_w,
        src_height: src_h,
        dst_width: dst_w,
        dst_height: dst_h,
        scale_x,
        scale_y,
        translate_x: 0.0,
        translate_y: 0.0,
        scaled_width: u64::from(dst_w),
        scaled_height: u64::from(dst_h),
        crop: None,
    };

    let t = match mode {
        LayoutMode::Fill => {
            let scale = scale_x.max(scale_y);
            // Rounding may land one pixel short of the covered axis; never crop outside.
            let (dw, dh) = (u64::from(dst_w), u64::from(dst_h));
            let scaled_w = scaled_len(src_w, scale)?.max(dw);
            let scaled_h = scaled_len(src_h, scale)?.max(dh);
            let crop = CropRect {
                x: (scaled_w - dw) / 2,
                y: (scaled_h - dh) / 2,
                width: dw,
                height: dh,
            };
            Transform {
                scale_x: scale,
                scale_y: scale,
                translate_x: 0.0 - crop.x as f64,
                translate_y: 0.0 - crop.y as f64,
                scaled_width: scaled_w,
                scaled_height: scaled_h,
                crop: Some(crop),
                ..base
            }
        }
        LayoutMode::Fit => {
            let scale = scale_x.min(scale_y);
            let scaled_w = scaled_len(src_w, scale)?.clamp(1, u64::from(dst_w));
            let scaled_h = scaled_len(src_h, scale)?.clamp(1, u64::from(dst_h));
            Transform {
                scale_x: scale,
                scale_y: scale,
                translate_x: ((u64::from(dst_w) - scaled_w) / 2) as f64,
                translate_y: ((u64::from(dst_h) - scaled_h) / 2) as f64,
                scaled_width: scaled_w,
                scaled_height: scaled_h,
                ..base
            }
        }
        LayoutMode::Stretch => base,
        LayoutMode::Center => Transform {
            scale_x: 1.0,
            scale_y: 1.0,
            translate_x: centered_offset(dst_w, src_w) as f64,
            translate_y: centered_offset(dst_h, src_h) as f64,
            scaled_width: u64::from(src_w),
            scaled_height: u64::from(src_h),
            ..base
        },
    };

    tracing::debug!(
        scaled_w = t.scaled_width,
        scaled_h = t.scaled_height,
        tx = t.translate_x,
        ty = t.translate_y,
        crop = ?t.crop,
        "resolved transform"
    );
    Ok(t)
}

/// `round(len * scale)` with ties away from zero.
///
/// For `u32` lengths and ratios the product stays below `2^64`.
fn scaled_len(len: u32, scale: f64) -> WallfitResult<u64> {
    let v = (f64::from(len) * scale).round();
    if !v.is_finite() || v >= u64::MAX as f64 {
        return Err(WallfitError::invalid_geometry(format!(
            "scaled length {v} for {len}px at scale {scale} overflows"
        )));
    }
    Ok(v as u64)
}

// Crop offsets are at most half of a `u64` scaled length.
fn negated(v: u64) -> i64 {
    i64::try_from(v).map_or(i64::MIN, |v| -v)
}

// Truncates toward zero, so a source one pixel larger than the destination is not shifted.
fn centered_offset(dst: u32, src: u32) -> i64 {
    (i64::from(dst) - i64::from(src)) / 2
}

#[cfg(test)]
#[path = "../../tests/unit/layout/resolver.rs"]
mod tests;
