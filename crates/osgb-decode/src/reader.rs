//! Forward-only cursor over the input buffer.
//!
//! All multi-byte values are little-endian. Slices handed out by the reader
//! borrow the input buffer directly; nothing is copied.

use glam::{DVec3, Vec4};

use crate::error::{DecodeError, DecodeResult, ErrorKind};

/// Sequential reader over an immutable byte buffer.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current cursor offset.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the cursor and the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether the cursor sits exactly at the end of the buffer.
    #[must_use]
    pub fn ended(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Take `len` raw bytes, failing without moving the cursor if the
    /// buffer is too short.
    pub fn bytes(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(DecodeError::new(
                self.pos,
                ErrorKind::TruncatedInput {
                    needed: len,
                    available,
                },
            ));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Take `count` contiguous elements of `width` bytes as one bounds check.
    pub fn elements(&mut self, count: usize, width: usize) -> DecodeResult<&'a [u8]> {
        match count.checked_mul(width) {
            Some(len) => self.bytes(len),
            None => Err(DecodeError::new(
                self.pos,
                ErrorKind::TruncatedInput {
                    needed: usize::MAX,
                    available: self.remaining(),
                },
            )),
        }
    }

    /// Advance past `len` bytes without inspecting them.
    pub fn skip(&mut self, len: usize) -> DecodeResult<()> {
        self.bytes(len).map(|_| ())
    }

    fn array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.bytes(N)?);
        Ok(out)
    }

    pub fn u8(&mut self) -> DecodeResult<u8> {
        self.array::<1>().map(|[b]| b)
    }

    pub fn u32(&mut self) -> DecodeResult<u32> {
        self.array().map(u32::from_le_bytes)
    }

    pub fn i32(&mut self) -> DecodeResult<i32> {
        self.array().map(i32::from_le_bytes)
    }

    pub fn u64(&mut self) -> DecodeResult<u64> {
        self.array().map(u64::from_le_bytes)
    }

    pub fn f32(&mut self) -> DecodeResult<f32> {
        self.array().map(f32::from_le_bytes)
    }

    pub fn f64(&mut self) -> DecodeResult<f64> {
        self.array().map(f64::from_le_bytes)
    }

    /// Read a one-byte boolean. Anything other than 0 or 1 is rejected, which
    /// catches most misaligned reads early.
    pub fn bool(&mut self) -> DecodeResult<bool> {
        let offset = self.pos;
        match self.u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecodeError::new(offset, ErrorKind::InvalidBoolean(other))),
        }
    }

    /// Read a length-prefixed string as raw bytes.
    pub fn string_bytes(&mut self) -> DecodeResult<&'a [u8]> {
        let offset = self.pos;
        let len = self.i32()?;
        let len = usize::try_from(len)
            .map_err(|_| DecodeError::new(offset, ErrorKind::InvalidLength(len)))?;
        self.bytes(len)
    }

    /// Read a length-prefixed string. The bytes are not required to be UTF-8;
    /// invalid sequences are replaced rather than rejected.
    pub fn string(&mut self) -> DecodeResult<String> {
        self.string_bytes()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn dvec3(&mut self) -> DecodeResult<DVec3> {
        Ok(DVec3::new(self.f64()?, self.f64()?, self.f64()?))
    }

    pub fn vec4(&mut self) -> DecodeResult<Vec4> {
        Ok(Vec4::new(self.f32()?, self.f32()?, self.f32()?, self.f32()?))
    }
}
