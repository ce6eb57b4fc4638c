use rayon::prelude::*;

use crate::foundation::core::PixelBuffer;
use crate::foundation::math::{premul_f32, unpremul_u8};

/// Bilinear taps for one destination coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Tap {
    pub i0: usize,
    pub i1: usize,
    pub frac: f32,
}

/// Visible span of a scaled image along one destination axis.
#[derive(Clone, Debug)]
pub(crate) struct AxisSpan {
    /// First covered destination index.
    pub start: usize,
    /// Taps for destination indices `start..start + taps.len()`.
    pub taps: Vec<Tap>,
    /// Source index of the first covered pixel when no resampling is needed.
    pub copy_from: usize,
}

impl AxisSpan {
    /// Map destination indices `0..dst_len` onto a source axis of `src_len` pixels that has
    /// been scaled to `scaled_len` pixels and placed at `offset`.
    ///
    /// Returns `None` when the scaled image does not overlap the destination on this axis.
    pub(crate) fn new(src_len: u32, scaled_len: u64, offset: i64, dst_len: u32) -> Option<Self> {
        let offset = i128::from(offset);
        let start = offset.max(0);
        let end = (offset + i128::from(scaled_len)).min(i128::from(dst_len));
        if start >= end {
            return None;
        }

        let ratio = f64::from(src_len) / scaled_len as f64;
        let max = f64::from(src_len - 1);
        let taps = (start..end)
            .map(|d| {
                // Pixel-centre alignment in the scaled image's own coordinates.
                let u = (((d - offset) as f64 + 0.5) * ratio - 0.5).clamp(0.0, max);
                let i0 = u.floor() as usize;
                let i1 = (i0 + 1).min(src_len as usize - 1);
                Tap {
                    i0,
                    i1,
                    frac: (u - i0 as f64) as f32,
                }
            })
            .collect();

        Some(Self {
            start: start as usize,
            taps,
            copy_from: usize::try_from(start - offset).unwrap_or(usize::MAX),
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.taps.len()
    }
}

/// Draw `src`, scaled to `scaled_w x scaled_h` and placed at `offset`, into `dst`.
///
/// Only destination pixels covered by the scaled image are written; everything else keeps its
/// current value. Rows are processed in parallel.
pub(crate) fn place_scaled(
    src: &PixelBuffer,
    scaled_w: u64,
    scaled_h: u64,
    offset: (i64, i64),
    dst: &mut PixelBuffer,
) {
    let Some(xs) = AxisSpan::new(src.width(), scaled_w, offset.0, dst.width()) else {
        return;
    };
    let Some(ys) = AxisSpan::new(src.height(), scaled_h, offset.1, dst.height()) else {
        return;
    };

    let native = scaled_w == u64::from(src.width()) && scaled_h == u64::from(src.height());
    let src_row = src.row_bytes();
    let src_px = src.as_raw();
    let dst_row = dst.row_bytes();
    let y_range = ys.start..ys.start + ys.len();

    dst.as_raw_mut()
        .par_chunks_mut(dst_row)
        .enumerate()
        .filter(|(y, _)| y_range.contains(y))
        .for_each(|(y, row)| {
            let span = &mut row[xs.start * 4..(xs.start + xs.len()) * 4];
            if native {
                let sy = ys.copy_from + (y - ys.start);
                let from = sy * src_row + xs.copy_from * 4;
                span.copy_from_slice(&src_px[from..from + span.len()]);
                return;
            }

            let ty = ys.taps[y - ys.start];
            let r0 = &src_px[ty.i0 * src_row..(ty.i0 + 1) * src_row];
            let r1 = &src_px[ty.i1 * src_row..(ty.i1 + 1) * src_row];
            for (out, tx) in span.chunks_exact_mut(4).zip(xs.taps.iter()) {
                let px = bilinear(r0, r1, *tx, ty.frac);
                out.copy_from_slice(&px);
            }
        });
}

fn bilinear(r0: &[u8], r1: &[u8], tx: Tap, fy: f32) -> [u8; 4] {
    let p00 = fetch(r0, tx.i0);
    let p10 = fetch(r0, tx.i1);
    let p01 = fetch(r1, tx.i0);
    let p11 = fetch(r1, tx.i1);

    let fx = tx.frac;
    let mut acc = [0.0f32; 4];
    for c in 0..4 {
        let top = p00[c] + (p10[c] - p00[c]) * fx;
        let bottom = p01[c] + (p11[c] - p01[c]) * fx;
        acc[c] = top + (bottom - top) * fy;
    }
    unpremul_u8(acc)
}

#[inline]
fn fetch(row: &[u8], i: usize) -> [f32; 4] {
    let px = &row[i * 4..i * 4 + 4];
    premul_f32([px[0], px[1], px[2], px[3]])
}

#[cfg(test)]
#[path = "../../tests/unit/render/resample.rs"]
mod tests;
