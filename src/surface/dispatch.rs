use crate::foundation::core::{PixelBuffer, TargetSurface};
use crate::foundation::error::{WallfitError, WallfitResult};

bitflags::bitflags! {
    /// Physical surfaces a single write commits to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SurfaceFlags: u8 {
        const HOME = 0b01;
        const LOCK = 0b10;
    }
}

impl From<TargetSurface> for SurfaceFlags {
    fn from(target: TargetSurface) -> Self {
        match target {
            TargetSurface::Home => SurfaceFlags::HOME,
            TargetSurface::Lock => SurfaceFlags::LOCK,
            TargetSurface::Both => SurfaceFlags::HOME | SurfaceFlags::LOCK,
        }
    }
}

/// Platform capability that commits a finished buffer as the active wallpaper.
///
/// A call with both flags set must update both surfaces as one operation. Implementations are
/// not required to be safe against concurrent writes; callers serialize requests.
pub trait SurfaceWriter {
    fn write(&mut self, buffer: &PixelBuffer, flags: SurfaceFlags) -> anyhow::Result<()>;
}

/// Commit `buffer` to the surface(s) named by `target`.
///
/// Performs exactly one writer call and never retries.
#[tracing::instrument(level = "debug", skip(buffer, writer))]
pub fn dispatch<W: SurfaceWriter + ?Sized>(
    buffer: PixelBuffer,
    target: TargetSurface,
    writer: &mut W,
) -> WallfitResult<()> {
    let flags = SurfaceFlags::from(target);
    writer.write(&buffer, flags).map_err(|e| {
        WallfitError::surface_write(format!("commit to {target} surface failed: {e:#}"))
    })?;
    tracing::info!(
        %target,
        width = buffer.width(),
        height = buffer.height(),
        "wallpaper committed"
    );
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/surface/dispatch.rs"]
mod tests;
