use crate::decoder::Decoder;
use crate::error::{DecodeError, DecodeResult, ErrorKind};
use crate::geometry::{Array, ArrayType, Binding};
use crate::registry::Namespace;
use crate::scene::{ObjectId, ObjectKind};

impl Decoder<'_> {
    /// An array in the inline encoding used by geometry before version 112.
    ///
    /// Arrays have their own identifier namespace. A repeated identifier
    /// returns the array already decoded and reads nothing further.
    pub(crate) fn read_inline_array(&mut self) -> DecodeResult<Option<ObjectId>> {
        if !self.reader.bool()? {
            return Ok(None);
        }
        let unique_id = self.reader.u32()?;
        if let Some(existing) = self.registry.lookup(Namespace::Array, unique_id) {
            tracing::trace!(unique_id, "shared array reference");
            return Ok(Some(existing));
        }

        let tag_offset = self.reader.position();
        let tag = self.reader.i32()?;
        let array_type = ArrayType::from_inline_tag(tag)
            .ok_or_else(|| DecodeError::new(tag_offset, ErrorKind::UnsupportedArrayType(tag)))?;

        let handle = self.allocate(Some(unique_id), ObjectKind::Array(Array::new(array_type)));
        self.registry.register(Namespace::Array, unique_id, handle);

        let count = self.read_count()?;
        let element_data = self.reader.elements(count, array_type.element_size())?;

        let indices_offset = self.reader.position();
        if self.reader.bool()? {
            return Err(DecodeError::new(
                indices_offset,
                ErrorKind::UnsupportedFeature("array with indices"),
            ));
        }
        let binding = Binding::from_raw(self.reader.i32()?);
        let normalize = self.reader.u32()? != 0;

        self.fill(
            handle,
            ObjectKind::Array(Array {
                array_type,
                binding,
                normalize,
                preserve_data_type: false,
                element_data,
            }),
        );
        Ok(Some(handle))
    }
}
