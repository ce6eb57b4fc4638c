/// Byte and base64 decoding into pixel buffers.
pub mod decode;
/// Image acquisition from URLs, base64 payloads and files.
pub mod source;
