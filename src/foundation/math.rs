/// Straight RGBA8 to premultiplied `f32` channels in `[0, 255]`.
#[inline]
pub(crate) fn premul_f32(px: [u8; 4]) -> [f32; 4] {
    let a = f32::from(px[3]) / 255.0;
    [
        f32::from(px[0]) * a,
        f32::from(px[1]) * a,
        f32::from(px[2]) * a,
        f32::from(px[3]),
    ]
}

/// Premultiplied `f32` channels back to straight RGBA8, rounding to nearest.
#[inline]
pub(crate) fn unpremul_u8(px: [f32; 4]) -> [u8; 4] {
    let a = px[3].clamp(0.0, 255.0);
    if a <= 0.0 {
        return [0, 0, 0, 0];
    }
    let k = 255.0 / a;
    [
        to_u8(px[0] * k),
        to_u8(px[1] * k),
        to_u8(px[2] * k),
        to_u8(a),
    ]
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
