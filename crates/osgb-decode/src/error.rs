//! Decode errors.

use thiserror::Error;

/// Result alias used throughout the decoder.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// A decode failure, tagged with the byte offset at which it was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("reader error at offset {offset}: {kind}")]
pub struct DecodeError {
    /// Offset into the input buffer.
    pub offset: usize,
    /// What went wrong.
    pub kind: ErrorKind,
}

impl DecodeError {
    pub(crate) fn new(offset: usize, kind: ErrorKind) -> Self {
        Self { offset, kind }
    }
}

/// The kinds of failure the decoder reports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("invalid data magic {0:#018x}")]
    BadMagic(u64),

    #[error("invalid data type: {0}")]
    UnknownStreamKind(u32),

    #[error("unsupported attribute flags: {0:#x}")]
    UnsupportedCapability(u32),

    #[error("unsupported compressor: {0}")]
    UnsupportedCompressor(String),

    #[error("read beyond data length ({needed} bytes needed, {available} available)")]
    TruncatedInput { needed: usize, available: usize },

    #[error("invalid bool value {0}")]
    InvalidBoolean(u8),

    #[error("invalid string length {0}")]
    InvalidLength(i32),

    #[error("unsupported object class: {0}")]
    UnsupportedType(String),

    #[error("invalid image decision: {0}")]
    UnsupportedImageMode(u32),

    #[error("unsupported array type: {0}")]
    UnsupportedArrayType(i32),

    #[error("unsupported feature: {0}")]
    UnsupportedFeature(&'static str),

    #[error("expected {expected}, found {found}")]
    UnexpectedType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("objects nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("stream contains no root object")]
    EmptyRoot,

    #[error("{remaining} trailing bytes after root object")]
    TrailingBytes { remaining: usize },
}
