//! Byte-level stream builder for tests.
//!
//! Writes streams field by field in the same order the decoder reads them.
//! The layer helpers write the smallest valid encoding of each layer: every
//! optional field absent, every flag at its serializer default.

use crate::header::{FLAG_BINARY_BRACKETS, MAGIC};
use crate::version;

const OBJECT_STREAM: u32 = 3;

#[derive(Debug, Clone)]
pub struct StreamBuilder {
    version: u32,
    brackets: bool,
    bytes: Vec<u8>,
}

impl StreamBuilder {
    #[must_use]
    pub fn new(version: u32) -> Self {
        Self {
            version,
            brackets: false,
            bytes: Vec::new(),
        }
    }

    /// Write bracket markers. Call before [`Self::header`].
    #[must_use]
    pub fn with_brackets(mut self) -> Self {
        self.brackets = true;
        self
    }

    /// An uncompressed object stream header.
    #[must_use]
    pub fn header(self) -> Self {
        let flags = if self.brackets { FLAG_BINARY_BRACKETS } else { 0 };
        self.header_with(OBJECT_STREAM, flags, "0")
    }

    #[must_use]
    pub fn header_with(self, kind: u32, flags: u32, compressor: &str) -> Self {
        let version = self.version;
        self.u64(MAGIC)
            .u32(kind)
            .u32(version)
            .u32(flags)
            .string(compressor)
    }

    #[must_use]
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    #[must_use]
    pub fn u8(self, value: u8) -> Self {
        self.raw(&[value])
    }

    #[must_use]
    pub fn u16(self, value: u16) -> Self {
        self.raw(&value.to_le_bytes())
    }

    #[must_use]
    pub fn u32(self, value: u32) -> Self {
        self.raw(&value.to_le_bytes())
    }

    #[must_use]
    pub fn i32(self, value: i32) -> Self {
        self.raw(&value.to_le_bytes())
    }

    #[must_use]
    pub fn u64(self, value: u64) -> Self {
        self.raw(&value.to_le_bytes())
    }

    #[must_use]
    pub fn f32(self, value: f32) -> Self {
        self.raw(&value.to_le_bytes())
    }

    #[must_use]
    pub fn f64(self, value: f64) -> Self {
        self.raw(&value.to_le_bytes())
    }

    #[must_use]
    pub fn floats(self, values: &[f32]) -> Self {
        values.iter().fold(self, |builder, &value| builder.f32(value))
    }

    #[must_use]
    pub fn bool(self, value: bool) -> Self {
        self.u8(u8::from(value))
    }

    /// Length-prefixed string.
    ///
    /// # Panics
    ///
    /// If `value` is longer than `i32::MAX` bytes.
    #[must_use]
    pub fn string(self, value: &str) -> Self {
        let len = i32::try_from(value.len()).expect("string too long");
        self.i32(len).raw(value.as_bytes())
    }

    /// Opening bracket marker, if brackets are enabled.
    #[must_use]
    pub fn bracket(self) -> Self {
        let width = if !self.brackets {
            0
        } else if self.version > version::WIDE_BRACKETS_AFTER {
            8
        } else {
            4
        };
        self.raw(&[0; 8][..width])
    }

    /// Class name, bracket and identifier of a nested object. The fields
    /// follow separately.
    #[must_use]
    pub fn object(self, class_name: &str, unique_id: u32) -> Self {
        self.string(class_name).bracket().u32(unique_id)
    }

    /// An empty object slot.
    #[must_use]
    pub fn null_object(self) -> Self {
        self.string("")
    }

    /// Empty name, static variance, no user data.
    #[must_use]
    pub fn object_fields(self) -> Self {
        let builder = self.string("").u32(0);
        if version::has_user_data_container(builder.version) {
            builder.bool(false)
        } else {
            builder.null_object()
        }
    }

    /// No bound, no callbacks, culling on, all mask bits set, no state set.
    #[must_use]
    pub fn node_fields(self) -> Self {
        let builder = self
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(true)
            .u32(u32::MAX);
        let builder = if version::has_node_descriptions(builder.version) {
            builder.bool(false)
        } else {
            builder
        };
        builder.bool(false)
    }

    /// No state set, bound, callbacks or shape; display lists and VBOs off.
    #[must_use]
    pub fn drawable_fields(self) -> Self {
        (0..11).fold(self, |builder, _| builder.bool(false))
    }

    /// An empty state set layer.
    #[must_use]
    pub fn state_set_fields(self) -> Self {
        self.bool(false)
            .bool(false)
            .bool(false)
            .bool(false)
            .state_set_tail()
    }

    /// Everything in the state set layer after the texture attribute lists.
    #[must_use]
    pub fn state_set_tail(self) -> Self {
        let builder = self
            .bool(false)
            .i32(0)
            .u32(0)
            .i32(0)
            .string("")
            .bool(false)
            .bool(false)
            .bool(false);
        if version::has_state_set_defines(builder.version) {
            builder.bool(false)
        } else {
            builder
        }
    }

    /// No callbacks.
    #[must_use]
    pub fn state_attribute_fields(self) -> Self {
        self.bool(false).bool(false)
    }

    /// A texture layer with every optional field absent.
    #[must_use]
    pub fn texture_fields(self) -> Self {
        let mut builder = (0..5).fold(self, |builder, _| builder.bool(false));
        builder = builder
            .f32(1.0)
            .bool(false)
            .bool(true)
            .bool(false)
            .bool(false);
        builder = (0..4).fold(builder, |builder, _| builder.f64(0.0));
        builder = builder.i32(0).i32(0);
        builder = (0..3).fold(builder, |builder, _| builder.bool(false));
        builder = builder.bool(false).u32(0x0203).u32(0x1909).f32(0.0);

        let version = builder.version;
        if version::has_texture_image_attachment(version) {
            builder = builder.bool(false);
        }
        if version::has_texture_swizzle(version) {
            builder = builder.bool(false);
        }
        if version::has_texture_lod(version) {
            builder = builder.f32(-1000.0).f32(1000.0).f32(0.0);
        }
        builder
    }

    /// Bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}
