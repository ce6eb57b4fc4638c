use std::io::Read as _;
use std::path::PathBuf;
use std::time::Duration;

use crate::assets::decode::{decode_base64_payload, decode_image};
use crate::config::FetchConfig;
use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{WallfitError, WallfitResult};

/// Where the source image comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageInput {
    /// `http` or `https` URL.
    Url(String),
    /// Base64 payload, optionally a `data:` URL.
    Base64(String),
    /// Local file path.
    File(PathBuf),
}

impl ImageInput {
    /// Short human name of the input kind.
    pub fn kind(&self) -> InputKind {
        match self {
            Self::Url(_) => InputKind::Url,
            Self::Base64(_) => InputKind::Base64,
            Self::File(_) => InputKind::File,
        }
    }
}

/// Kind of input an invocation carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Url,
    Base64,
    File,
}

impl InputKind {
    /// Wrap a raw invocation value as an [`ImageInput`] of this kind.
    pub fn wrap(self, value: String) -> ImageInput {
        match self {
            Self::Url => ImageInput::Url(value),
            Self::Base64 => ImageInput::Base64(value),
            Self::File => ImageInput::File(PathBuf::from(value)),
        }
    }

    /// Message used when the invocation carries no input of this kind.
    pub fn missing_message(self) -> &'static str {
        match self {
            Self::Url => "URL is required",
            Self::Base64 => "base64 string is required",
            Self::File => "file path is required",
        }
    }
}

/// Collaborator that turns an [`ImageInput`] into decoded pixels.
pub trait ImageSource {
    fn load(&self, input: &ImageInput) -> WallfitResult<PixelBuffer>;
}

/// Image source backed by a blocking HTTP client, the base64 decoder and the filesystem.
#[derive(Debug)]
pub struct DefaultImageSource {
    client: reqwest::blocking::Client,
    max_bytes: u64,
}

impl DefaultImageSource {
    pub fn new(cfg: &FetchConfig) -> WallfitResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| WallfitError::fetch(format!("build http client: {e}")))?;
        Ok(Self {
            client,
            max_bytes: cfg.max_bytes,
        })
    }

    fn fetch_url(&self, url: &str) -> WallfitResult<Vec<u8>> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| WallfitError::fetch(format!("invalid URL '{url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(WallfitError::fetch(format!(
                "unsupported URL scheme '{}'",
                parsed.scheme()
            )));
        }

        // The response owns the connection; it is dropped on every return below.
        let resp = self
            .client
            .get(parsed)
            .send()
            .map_err(|e| WallfitError::fetch(format!("load image from '{url}': {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(WallfitError::fetch(format!(
                "load image from '{url}': HTTP {status}"
            )));
        }
        if resp.content_length().is_some_and(|n| n > self.max_bytes) {
            return Err(WallfitError::fetch(format!(
                "image at '{url}' exceeds {} bytes",
                self.max_bytes
            )));
        }

        let mut body = Vec::new();
        resp.take(self.max_bytes + 1)
            .read_to_end(&mut body)
            .map_err(|e| WallfitError::fetch(format!("read body from '{url}': {e}")))?;
        if body.len() as u64 > self.max_bytes {
            return Err(WallfitError::fetch(format!(
                "image at '{url}' exceeds {} bytes",
                self.max_bytes
            )));
        }
        Ok(body)
    }

    fn read_file(&self, path: &std::path::Path) -> WallfitResult<Vec<u8>> {
        let meta = std::fs::metadata(path)
            .map_err(|e| WallfitError::fetch(format!("open '{}': {e}", path.display())))?;
        if meta.len() > self.max_bytes {
            return Err(WallfitError::fetch(format!(
                "'{}' exceeds {} bytes",
                path.display(),
                self.max_bytes
            )));
        }
        std::fs::read(path)
            .map_err(|e| WallfitError::fetch(format!("read '{}': {e}", path.display())))
    }
}

impl ImageSource for DefaultImageSource {
    #[tracing::instrument(level = "debug", skip(self, input), fields(kind = ?input.kind()))]
    fn load(&self, input: &ImageInput) -> WallfitResult<PixelBuffer> {
        let bytes = match input {
            ImageInput::Url(url) => self.fetch_url(url)?,
            ImageInput::Base64(payload) => decode_base64_payload(payload)?,
            ImageInput::File(path) => self.read_file(path)?,
        };
        tracing::debug!(bytes = bytes.len(), "acquired encoded image");
        decode_image(&bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
