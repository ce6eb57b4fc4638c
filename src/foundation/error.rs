/// Convenience result type used across wallfit.
pub type WallfitResult<T> = Result<T, WallfitError>;

/// Top-level error taxonomy. Every variant is terminal for the request that raised it.
#[derive(thiserror::Error, Debug)]
pub enum WallfitError {
    /// Non-positive source or destination dimensions.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Layout mode outside fill/fit/stretch/center.
    #[error("unknown layout mode: {0}")]
    UnknownLayoutMode(String),

    /// Target surface outside home/lock/both.
    #[error("unknown target: {0}")]
    UnknownTarget(String),

    /// Payload could not be decoded into pixels.
    #[error("decode failure: {0}")]
    DecodeFailure(String),

    /// Image bytes could not be fetched.
    #[error("fetch failure: {0}")]
    FetchFailure(String),

    /// Empty source buffer or failed allocation while compositing.
    #[error("composition failure: {0}")]
    CompositionFailure(String),

    /// The platform surface writer rejected the buffer.
    #[error("surface write failure: {0}")]
    SurfaceWriteFailure(String),

    /// The request carried no input.
    #[error("missing input: {0}")]
    MissingInput(String),

    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Pipeline stage an error originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Request validation, before any IO.
    Input,
    /// Fetching or decoding the source image.
    Acquire,
    /// Computing the layout transform.
    Resolve,
    /// Producing the destination buffer.
    Compose,
    /// Committing the buffer to surfaces.
    Dispatch,
}

impl WallfitError {
    /// Build a [`WallfitError::InvalidGeometry`] value.
    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    /// Build a [`WallfitError::UnknownLayoutMode`] value.
    pub fn unknown_layout_mode(msg: impl Into<String>) -> Self {
        Self::UnknownLayoutMode(msg.into())
    }

    /// Build a [`WallfitError::UnknownTarget`] value.
    pub fn unknown_target(msg: impl Into<String>) -> Self {
        Self::UnknownTarget(msg.into())
    }

    /// Build a [`WallfitError::DecodeFailure`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeFailure(msg.into())
    }

    /// Build a [`WallfitError::FetchFailure`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::FetchFailure(msg.into())
    }

    /// Build a [`WallfitError::CompositionFailure`] value.
    pub fn composition(msg: impl Into<String>) -> Self {
        Self::CompositionFailure(msg.into())
    }

    /// Build a [`WallfitError::SurfaceWriteFailure`] value.
    pub fn surface_write(msg: impl Into<String>) -> Self {
        Self::SurfaceWriteFailure(msg.into())
    }

    /// Build a [`WallfitError::MissingInput`] value.
    pub fn missing_input(msg: impl Into<String>) -> Self {
        Self::MissingInput(msg.into())
    }

    /// Build a [`WallfitError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Stage of the pipeline this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            Self::MissingInput(_)
            | Self::UnknownLayoutMode(_)
            | Self::UnknownTarget(_)
            | Self::Config(_) => Stage::Input,
            Self::DecodeFailure(_) | Self::FetchFailure(_) => Stage::Acquire,
            Self::InvalidGeometry(_) => Stage::Resolve,
            Self::CompositionFailure(_) => Stage::Compose,
            Self::SurfaceWriteFailure(_) => Stage::Dispatch,
        }
    }

    /// True for failures caused by the request itself rather than a downstream platform.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingInput(_)
                | Self::UnknownLayoutMode(_)
                | Self::UnknownTarget(_)
                | Self::InvalidGeometry(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
