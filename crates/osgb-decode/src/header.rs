//! Stream header validation.

use crate::error::{DecodeError, DecodeResult, ErrorKind};
use crate::reader::Reader;
use crate::version;

/// Magic constant opening every binary stream.
pub const MAGIC: u64 = 0x1AFB_4545_6C91_0EA1;

/// Capability flag: custom serializer domains (not supported).
pub const FLAG_CUSTOM_DOMAINS: u32 = 0x01;
/// Capability flag: schema data embedded in the stream (not supported).
pub const FLAG_SCHEMA_DATA: u32 = 0x02;
/// Capability flag: objects are prefixed with bracket length markers.
pub const FLAG_BINARY_BRACKETS: u32 = 0x04;

/// Compressor name meaning "not compressed".
pub const NO_COMPRESSION: &[u8] = b"0";

/// What the stream was written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Scene,
    Image,
    Object,
    Other(u32),
}

impl StreamKind {
    fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => None,
            1 => Some(Self::Scene),
            2 => Some(Self::Image),
            3 => Some(Self::Object),
            other => Some(Self::Other(other)),
        }
    }
}

/// Validated stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub kind: StreamKind,
    /// Format version; drives every layout decision in [`crate::version`].
    pub version: u32,
    /// Whether objects carry bracket length markers.
    pub binary_brackets: bool,
}

impl Header {
    /// Read and validate the header at the reader's cursor.
    pub fn read(reader: &mut Reader<'_>) -> DecodeResult<Self> {
        let offset = reader.position();
        let magic = reader.u64()?;
        if magic != MAGIC {
            return Err(DecodeError::new(offset, ErrorKind::BadMagic(magic)));
        }

        let offset = reader.position();
        let raw_kind = reader.u32()?;
        let kind = StreamKind::from_raw(raw_kind)
            .ok_or_else(|| DecodeError::new(offset, ErrorKind::UnknownStreamKind(raw_kind)))?;

        let version = reader.u32()?;

        let offset = reader.position();
        let flags = reader.u32()?;
        let unsupported = flags & (FLAG_CUSTOM_DOMAINS | FLAG_SCHEMA_DATA);
        if unsupported != 0 {
            return Err(DecodeError::new(
                offset,
                ErrorKind::UnsupportedCapability(unsupported),
            ));
        }

        let offset = reader.position();
        let compressor = reader.string_bytes()?;
        if compressor != NO_COMPRESSION {
            return Err(DecodeError::new(
                offset,
                ErrorKind::UnsupportedCompressor(String::from_utf8_lossy(compressor).into_owned()),
            ));
        }

        Ok(Self {
            kind,
            version,
            binary_brackets: flags & FLAG_BINARY_BRACKETS != 0,
        })
    }

    /// Bytes occupied by each opening bracket marker, zero when brackets are
    /// disabled.
    #[must_use]
    pub fn bracket_width(&self) -> usize {
        if self.binary_brackets {
            version::bracket_width(self.version)
        } else {
            0
        }
    }
}
