//! Images referenced by textures.

use crate::decoder::Decoder;
use crate::error::{DecodeError, DecodeResult, ErrorKind};
use crate::registry::Namespace;
use crate::scene::{ObjectId, ObjectKind};
use crate::state::Image;
use crate::version;

/// Placement mode for images whose file bytes are embedded in the stream.
/// Raw pixel data (0) and external references (2) are not read.
const IMAGE_INLINE_FILE: u32 = 1;

impl Decoder<'_> {
    pub(crate) fn read_image(&mut self) -> DecodeResult<Option<ObjectId>> {
        if !self.reader.bool()? {
            return Ok(None);
        }
        let class_name = if version::has_image_class_name(self.version()) {
            Some(self.reader.string()?)
        } else {
            None
        };

        let unique_id = self.reader.u32()?;
        if let Some(existing) = self.registry.lookup(Namespace::Image, unique_id) {
            tracing::trace!(unique_id, "shared image reference");
            return Ok(Some(existing));
        }
        let handle = self.allocate(Some(unique_id), ObjectKind::Image(Image::default()));
        self.registry.register(Namespace::Image, unique_id, handle);

        let file_name = self.reader.string()?;
        let write_hint = self.reader.u32()?;
        let mode_offset = self.reader.position();
        let mode = self.reader.u32()?;
        if mode != IMAGE_INLINE_FILE {
            return Err(DecodeError::new(
                mode_offset,
                ErrorKind::UnsupportedImageMode(mode),
            ));
        }
        let size = self.read_count()?;
        let data = self.reader.bytes(size)?;

        self.fill(
            handle,
            ObjectKind::Image(Image {
                class_name,
                file_name,
                write_hint,
                data,
            }),
        );
        self.read_object_layer(handle)?;
        Ok(Some(handle))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::StreamBuilder;
    use crate::{ErrorKind, ObjectKind, decode};

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn texture(builder: StreamBuilder, id: u32) -> StreamBuilder {
        builder
            .object("osg::Texture2D", id)
            .object_fields()
            .state_attribute_fields()
            .texture_fields()
    }

    fn inline_image(builder: StreamBuilder, id: u32, mode: u32) -> StreamBuilder {
        builder
            .bool(true)
            .string("osg::Image")
            .u32(id)
            .string("tile.png")
            .u32(0)
            .u32(mode)
            .u32(PNG_MAGIC.len() as u32)
            .raw(PNG_MAGIC)
            .object_fields()
    }

    #[test]
    fn inline_file_bytes_alias_input() {
        let builder = texture(StreamBuilder::new(163).header(), 1);
        let bytes = inline_image(builder, 5, 1).u32(256).u32(128).finish();

        let scene = decode(&bytes).unwrap();
        let ObjectKind::Texture2D(texture) = &scene.root_object().kind else {
            panic!("expected texture");
        };
        assert_eq!((texture.width, texture.height), (256, 128));

        let image = &scene[texture.image.unwrap()];
        assert_eq!(image.unique_id, Some(5));
        let image = image.kind.as_image().unwrap();
        assert_eq!(image.class_name.as_deref(), Some("osg::Image"));
        assert_eq!(image.file_name, "tile.png");
        assert_eq!(image.data(), PNG_MAGIC);

        let start = bytes
            .windows(PNG_MAGIC.len())
            .position(|w| w == PNG_MAGIC)
            .unwrap();
        assert!(std::ptr::eq(image.data().as_ptr(), bytes[start..].as_ptr()));
    }

    #[test]
    fn external_images_are_unsupported() {
        let builder = texture(StreamBuilder::new(163).header(), 1);
        let bytes = inline_image(builder, 5, 2).u32(1).u32(1).finish();

        let err = decode(&bytes).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedImageMode(2));
    }

    #[test]
    fn repeated_image_identifier_is_shared() {
        let builder = StreamBuilder::new(163)
            .header()
            .object("osg::StateSet", 1)
            .object_fields()
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(true)
            .u32(2);
        let builder = texture(builder.u32(1), 2);
        let builder = inline_image(builder, 9, 1).u32(1).u32(1).u32(1);
        let builder = texture(builder.u32(1), 3)
            .bool(true)
            .string("osg::Image")
            .u32(9)
            .u32(1)
            .u32(1)
            .u32(1);
        let bytes = builder.state_set_tail().finish();

        let scene = decode(&bytes).unwrap();
        let state_set = scene.root_object().kind.as_state_set().unwrap();
        let images: Vec<_> = state_set
            .texture_attributes
            .iter()
            .map(|unit| {
                let ObjectKind::Texture2D(texture) = &scene[unit[0].attribute].kind else {
                    panic!("expected texture");
                };
                texture.image.unwrap()
            })
            .collect();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0], images[1]);
    }
}
