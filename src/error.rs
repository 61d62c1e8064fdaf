use embedded_io::{ErrorKind, ReadExactError};
use enough::StopReason;

/// Errors from streaming BMP rendering.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    #[error("image not found")]
    NotFound,

    #[error("not a BMP file (bad signature)")]
    InvalidFormat,

    #[error("unsupported color plane count: {0}")]
    UnsupportedPlanes(u16),

    #[error("unsupported encoding: {depth} bpp with compression {compression}")]
    UnsupportedEncoding { depth: u16, compression: u32 },

    #[error("source ended early at offset {offset}")]
    TruncatedRead { offset: u64 },

    #[error("storage error: {0:?}")]
    Io(ErrorKind),

    #[error("image dimensions {width}x{height} exceed configured limits")]
    LimitExceeded { width: u32, height: u32 },

    #[error("render cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for RenderError {
    fn from(r: StopReason) -> Self {
        RenderError::Cancelled(r)
    }
}

impl RenderError {
    pub(crate) fn io<E: embedded_io::Error>(err: E) -> Self {
        RenderError::Io(err.kind())
    }

    /// Map a short `read_exact` to truncation at the offset it was issued for.
    pub(crate) fn read_exact<E: embedded_io::Error>(err: ReadExactError<E>, offset: u64) -> Self {
        match err {
            ReadExactError::UnexpectedEof => RenderError::TruncatedRead { offset },
            ReadExactError::Other(e) => RenderError::io(e),
        }
    }
}
