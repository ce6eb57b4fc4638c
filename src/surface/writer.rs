use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::PixelBuffer;
use crate::surface::dispatch::{SurfaceFlags, SurfaceWriter};

/// Writer that commits surfaces as PNG files (`home.png`, `lock.png`) under a root directory.
///
/// Multi-surface writes encode once, stage every file, then swap them into place. Existing
/// surfaces are moved aside first and restored if any swap fails, so a failed write leaves
/// every surface as it was.
#[derive(Clone, Debug)]
pub struct DirectorySurfaceWriter {
    root: PathBuf,
}

impl DirectorySurfaceWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Final path of the file backing a single surface flag.
    pub fn surface_path(&self, flag: SurfaceFlags) -> Option<PathBuf> {
        let name = if flag == SurfaceFlags::HOME {
            "home.png"
        } else if flag == SurfaceFlags::LOCK {
            "lock.png"
        } else {
            return None;
        };
        Some(self.root.join(name))
    }
}

impl SurfaceWriter for DirectorySurfaceWriter {
    fn write(&mut self, buffer: &PixelBuffer, flags: SurfaceFlags) -> anyhow::Result<()> {
        if flags.is_empty() {
            anyhow::bail!("no surface selected");
        }
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("create surface dir '{}'", self.root.display()))?;

        let mut targets = Vec::new();
        for flag in flags.iter() {
            let Some(dest) = self.surface_path(flag) else {
                continue;
            };
            if let Ok(meta) = std::fs::metadata(&dest)
                && !meta.is_file()
            {
                anyhow::bail!("surface '{}' is not a regular file", dest.display());
            }
            targets.push(dest);
        }

        let png = encode_png(buffer)?;

        let mut staged = Vec::with_capacity(targets.len());
        for dest in targets {
            let tmp = dest.with_extension("png.tmp");
            if let Err(e) = std::fs::write(&tmp, &png) {
                let _ = std::fs::remove_file(&tmp);
                for (t, _) in &staged {
                    let _ = std::fs::remove_file(t);
                }
                return Err(e).with_context(|| format!("stage '{}'", tmp.display()));
            }
            staged.push((tmp, dest));
        }

        commit_staged(&staged)
    }
}

/// Swap staged files into place as a unit.
fn commit_staged(staged: &[(PathBuf, PathBuf)]) -> anyhow::Result<()> {
    let mut backups = Vec::new();
    let mut committed = Vec::new();
    if let Err(e) = swap_in(staged, &mut backups, &mut committed) {
        for dest in &committed {
            let _ = std::fs::remove_file(dest);
        }
        for (bak, dest) in &backups {
            let _ = std::fs::rename(bak, dest);
        }
        for (tmp, _) in staged {
            let _ = std::fs::remove_file(tmp);
        }
        return Err(e);
    }
    for (bak, _) in &backups {
        let _ = std::fs::remove_file(bak);
    }
    Ok(())
}

fn swap_in(
    staged: &[(PathBuf, PathBuf)],
    backups: &mut Vec<(PathBuf, PathBuf)>,
    committed: &mut Vec<PathBuf>,
) -> anyhow::Result<()> {
    for (tmp, dest) in staged {
        if dest.exists() {
            let bak = dest.with_extension("png.bak");
            std::fs::rename(dest, &bak)
                .with_context(|| format!("move aside '{}'", dest.display()))?;
            backups.push((bak, dest.clone()));
        }
        std::fs::rename(tmp, dest).with_context(|| format!("commit '{}'", dest.display()))?;
        committed.push(dest.clone());
    }
    Ok(())
}

fn encode_png(buffer: &PixelBuffer) -> anyhow::Result<Vec<u8>> {
    let mut out = std::io::Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut out,
        buffer.as_raw(),
        buffer.width(),
        buffer.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .context("encode png")?;
    Ok(out.into_inner())
}

/// In-memory writer that records every commit. Useful for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySurfaceWriter {
    writes: Vec<(SurfaceFlags, PixelBuffer)>,
}

impl MemorySurfaceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits in call order.
    pub fn writes(&self) -> &[(SurfaceFlags, PixelBuffer)] {
        &self.writes
    }

    /// Number of commits that touched any of `flags`.
    pub fn count_touching(&self, flags: SurfaceFlags) -> usize {
        self.writes.iter().filter(|(f, _)| f.intersects(flags)).count()
    }
}

impl SurfaceWriter for MemorySurfaceWriter {
    fn write(&mut self, buffer: &PixelBuffer, flags: SurfaceFlags) -> anyhow::Result<()> {
        self.writes.push((flags, buffer.clone()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/writer.rs"]
mod tests;
