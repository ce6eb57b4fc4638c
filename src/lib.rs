//! wallfit adapts an arbitrarily sized image to a fixed display and commits it as a wallpaper.
//!
//! # Pipeline overview
//!
//! 1. **Acquire**: `ImageInput -> PixelBuffer` through an [`ImageSource`] (URL, base64, file)
//! 2. **Resolve**: `(source size, display size, LayoutMode) -> Transform` via [`resolve`]
//! 3. **Compose**: `(PixelBuffer, Transform) -> PixelBuffer` at exactly the display size
//! 4. **Dispatch**: commit the buffer to home, lock or both through a [`SurfaceWriter`]
//!
//! Every stage returns a typed [`WallfitError`]; nothing is retried or silently defaulted.
//! Pixel buffers are straight-alpha RGBA8 and are moved, never shared, between stages.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod foundation;
mod layout;
mod pipeline;
mod render;
mod surface;

pub use assets::decode::{decode_base64_payload, decode_image};
pub use assets::source::{DefaultImageSource, ImageInput, ImageSource, InputKind};
pub use config::{FetchConfig, WallfitConfig};
pub use foundation::core::{Affine, Canvas, LayoutMode, PixelBuffer, TargetSurface};
pub use foundation::error::{Stage, WallfitError, WallfitResult};
pub use layout::resolver::{CropRect, Transform, resolve};
pub use pipeline::{
    AdaptationRequest, Applied, Invocation, InvocationDefaults, Response, ResponseStatus, adapt,
    apply_invocation,
};
pub use render::compose::compose;
pub use surface::dispatch::{SurfaceFlags, SurfaceWriter, dispatch};
pub use surface::writer::{DirectorySurfaceWriter, MemorySurfaceWriter};
