use crate::assets::source::{ImageSource, InputKind};
use crate::foundation::core::{Canvas, LayoutMode, PixelBuffer, TargetSurface};
use crate::foundation::error::{Stage, WallfitError, WallfitResult};
use crate::layout::resolver::resolve;
use crate::render::compose::compose;
use crate::surface::dispatch::{SurfaceWriter, dispatch};

/// One adaptation: a decoded source, where it goes and how it is laid out.
///
/// Consumed by [`adapt`]; nothing is retained after the request completes.
#[derive(Debug)]
pub struct AdaptationRequest {
    pub source: PixelBuffer,
    pub destination: Canvas,
    pub mode: LayoutMode,
    pub target: TargetSurface,
}

/// Acknowledgement of a committed wallpaper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Applied {
    pub mode: LayoutMode,
    pub target: TargetSurface,
    pub width: u32,
    pub height: u32,
}

impl Applied {
    pub fn message(&self) -> String {
        format!(
            "Wallpaper ({}) updated successfully for {} screen!",
            self.mode, self.target
        )
    }
}

/// Resolve, compose and dispatch a request. Stops at the first failing stage.
pub fn adapt<W: SurfaceWriter + ?Sized>(
    request: AdaptationRequest,
    writer: &mut W,
) -> WallfitResult<Applied> {
    let AdaptationRequest {
        source,
        destination,
        mode,
        target,
    } = request;

    let transform = resolve(
        source.width(),
        source.height(),
        destination.width,
        destination.height,
        mode,
    )?;
    let out = compose(source, &transform)?;
    let (width, height) = (out.width(), out.height());
    dispatch(out, target, writer)?;

    Ok(Applied {
        mode,
        target,
        width,
        height,
    })
}

/// Raw parameters as they arrive at the invocation boundary (CLI flags, RPC fields).
#[derive(Clone, Debug, Default)]
pub struct Invocation {
    pub input: Option<String>,
    pub target: Option<String>,
    pub display: Option<String>,
}

/// Values used when an invocation omits `target` or `display`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InvocationDefaults {
    pub target: TargetSurface,
    pub display: LayoutMode,
}

/// Validate an invocation, acquire its image and run it through [`adapt`].
///
/// Input presence, target and display are all checked before any fetch or decode, so a bad
/// request never touches the network or allocates pixel buffers.
#[tracing::instrument(skip_all, fields(kind = ?kind))]
pub fn apply_invocation<S, W>(
    invocation: Invocation,
    kind: InputKind,
    defaults: InvocationDefaults,
    destination: Canvas,
    source: &S,
    writer: &mut W,
) -> WallfitResult<Applied>
where
    S: ImageSource + ?Sized,
    W: SurfaceWriter + ?Sized,
{
    let result = run_invocation(invocation, kind, defaults, destination, source, writer);

    if let Err(e) = &result {
        tracing::warn!(stage = ?e.stage(), error = %e, "wallpaper request failed");
    }
    result
}

fn run_invocation<S, W>(
    invocation: Invocation,
    kind: InputKind,
    defaults: InvocationDefaults,
    destination: Canvas,
    source: &S,
    writer: &mut W,
) -> WallfitResult<Applied>
where
    S: ImageSource + ?Sized,
    W: SurfaceWriter + ?Sized,
{
    let input = invocation
        .input
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| WallfitError::missing_input(kind.missing_message()))?;
    let target = match invocation.target.as_deref() {
        Some(t) => t.parse::<TargetSurface>()?,
        None => defaults.target,
    };
    let mode = match invocation.display.as_deref() {
        Some(d) => d.parse::<LayoutMode>()?,
        None => defaults.display,
    };

    let image = source.load(&kind.wrap(input))?;
    adapt(
        AdaptationRequest {
            source: image,
            destination,
            mode,
            target,
        },
        writer,
    )
}

/// Boundary result object, built fresh for every request.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Response {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

impl From<&WallfitResult<Applied>> for Response {
    fn from(result: &WallfitResult<Applied>) -> Self {
        match result {
            Ok(applied) => Self {
                status: ResponseStatus::Success,
                message: applied.message(),
                stage: None,
            },
            Err(e) => Self {
                status: ResponseStatus::Error,
                message: e.to_string(),
                stage: Some(e.stage()),
            },
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline/pipeline.rs"]
mod tests;
