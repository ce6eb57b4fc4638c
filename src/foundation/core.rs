use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{WallfitError, WallfitResult};

pub use kurbo::{Affine, Vec2};

/// Destination surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> WallfitResult<Self> {
        if width == 0 || height == 0 {
            return Err(WallfitError::invalid_geometry(format!(
                "canvas must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
        }
    }
}

/// Straight-alpha RGBA8 pixels, tightly packed, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl PixelBuffer {
    /// Wrap existing RGBA8 bytes. The length must be exactly `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> WallfitResult<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(WallfitError::invalid_geometry(format!(
                "pixel data length {} does not match {width}x{height}x4",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Allocate a zero-initialized (transparent black) buffer.
    ///
    /// Allocation failure is reported as [`WallfitError::CompositionFailure`] instead of aborting.
    pub fn transparent(width: u32, height: u32) -> WallfitResult<Self> {
        let len = byte_len(width, height)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            WallfitError::composition(format!("allocate {width}x{height} buffer: {e}"))
        })?;
        data.resize(len, 0);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Buffer filled with a single straight-alpha color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> WallfitResult<Self> {
        let mut buf = Self::transparent(width, height)?;
        for px in buf.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
        Ok(buf)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn row_bytes(&self) -> usize {
        self.width as usize * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }
}

fn byte_len(width: u32, height: u32) -> WallfitResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| WallfitError::composition(format!("{width}x{height} buffer size overflow")))
}

/// Policy for fitting a source image into a differently-sized destination.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Uniform scale covering the destination, center-cropped.
    #[default]
    Fill,
    /// Uniform scale contained in the destination, centered.
    Fit,
    /// Independent per-axis scale.
    Stretch,
    /// Native size, centered and clipped.
    Center,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 4] = [Self::Fill, Self::Fit, Self::Stretch, Self::Center];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Fit => "fit",
            Self::Stretch => "stretch",
            Self::Center => "center",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutMode {
    type Err = WallfitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(norm))
            .ok_or_else(|| WallfitError::unknown_layout_mode(format!("'{s}'")))
    }
}

/// Named wallpaper destination(s).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TargetSurface {
    Home,
    Lock,
    #[default]
    Both,
}

impl TargetSurface {
    pub const ALL: [TargetSurface; 3] = [Self::Home, Self::Lock, Self::Both];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Lock => "lock",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for TargetSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetSurface {
    type Err = WallfitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(norm))
            .ok_or_else(|| WallfitError::unknown_target(format!("'{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
