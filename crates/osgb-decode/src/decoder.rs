//! Decode state and the top-level entry point.

use crate::error::{DecodeError, DecodeResult, ErrorKind};
use crate::header::Header;
use crate::reader::Reader;
use crate::registry::Registry;
use crate::scene::{Object, ObjectId, ObjectKind, Scene};

/// Deepest chain of nested objects a stream may contain. Each level recurses
/// through the layout routines, so the limit bounds stack use.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Decode a complete stream.
///
/// On success the returned scene holds the root object and the input has
/// been consumed exactly. On failure nothing of the partial graph survives.
///
/// # Example
///
/// ```no_run
/// let bytes = std::fs::read("tile.osgb").unwrap();
/// match osgb_decode::decode(&bytes) {
///     Ok(scene) => println!("{} objects", scene.len()),
///     Err(err) => eprintln!("{err}"),
/// }
/// ```
pub fn decode(data: &[u8]) -> DecodeResult<Scene<'_>> {
    let mut decoder = Decoder::new(data)?;

    let offset = decoder.reader.position();
    let root = decoder
        .read_object()?
        .ok_or_else(|| DecodeError::new(offset, ErrorKind::EmptyRoot))?;

    if !decoder.reader.ended() {
        return Err(DecodeError::new(
            decoder.reader.position(),
            ErrorKind::TrailingBytes {
                remaining: decoder.reader.remaining(),
            },
        ));
    }

    tracing::debug!(
        version = decoder.header.version,
        objects = decoder.objects.len(),
        "decoded stream"
    );
    Ok(Scene::new(decoder.header, decoder.objects, root))
}

/// Everything one decode pass mutates: the cursor, the identifier tables and
/// the arena being filled.
pub(crate) struct Decoder<'a> {
    pub(crate) reader: Reader<'a>,
    pub(crate) header: Header,
    pub(crate) registry: Registry,
    /// Objects currently being decoded, outermost first.
    pub(crate) depth: usize,
    objects: Vec<Object<'a>>,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(data: &'a [u8]) -> DecodeResult<Self> {
        let mut reader = Reader::new(data);
        let header = Header::read(&mut reader)?;
        tracing::debug!(
            kind = ?header.kind,
            version = header.version,
            brackets = header.binary_brackets,
            "accepted stream header"
        );
        Ok(Self {
            reader,
            header,
            registry: Registry::default(),
            depth: 0,
            objects: Vec::new(),
        })
    }

    pub(crate) fn version(&self) -> u32 {
        self.header.version
    }

    /// Skip an opening bracket marker if the stream uses them. Closing
    /// markers occupy no bytes.
    pub(crate) fn begin_bracket(&mut self) -> DecodeResult<()> {
        self.reader.skip(self.header.bracket_width())
    }

    pub(crate) fn allocate(&mut self, unique_id: Option<u32>, kind: ObjectKind<'a>) -> ObjectId {
        let handle = ObjectId::from_index(self.objects.len());
        tracing::trace!(?unique_id, class = kind.class_name(), "allocate");
        self.objects.push(Object::new(unique_id, kind));
        handle
    }

    pub(crate) fn object_mut(&mut self, handle: ObjectId) -> &mut Object<'a> {
        &mut self.objects[handle.index()]
    }

    pub(crate) fn kind(&self, handle: ObjectId) -> &ObjectKind<'a> {
        &self.objects[handle.index()].kind
    }

    /// Replace the placeholder allocated for `handle` with its decoded fields.
    pub(crate) fn fill(&mut self, handle: ObjectId, kind: ObjectKind<'a>) {
        debug_assert_eq!(
            self.kind(handle).class_name(),
            kind.class_name(),
            "object changed variant while decoding"
        );
        self.object_mut(handle).kind = kind;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::StreamKind;
    use crate::test_support::StreamBuilder;

    fn empty_group(version: u32) -> StreamBuilder {
        StreamBuilder::new(version)
            .header()
            .object("osg::Group", 1)
            .object_fields()
            .node_fields()
            .bool(false)
    }

    #[test]
    fn decodes_minimal_group() {
        let bytes = empty_group(163).finish();
        let scene = decode(&bytes).unwrap();

        assert_eq!(scene.header().kind, StreamKind::Object);
        assert_eq!(scene.len(), 1);
        let root = scene.root_object();
        assert_eq!(root.unique_id, Some(1));
        assert_eq!(root.class_name(), "Group");
        assert!(root.kind.children().is_empty());
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let bytes = empty_group(163).u8(0).finish();
        let err = decode(&bytes).unwrap_err();
        assert_eq!(err.offset, bytes.len() - 1);
        assert_eq!(err.kind, ErrorKind::TrailingBytes { remaining: 1 });
    }

    #[test]
    fn empty_root_is_rejected() {
        let bytes = StreamBuilder::new(163).header().null_object().finish();
        let err = decode(&bytes).unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyRoot);
    }

    /// `wrappers` nodes, each holding the next as user data, around one
    /// plain node.
    fn user_data_chain(wrappers: u32) -> Vec<u8> {
        let mut builder = StreamBuilder::new(163).header();
        for id in 1..=wrappers {
            builder = builder
                .object("osg::Node", id)
                .string("")
                .u32(0)
                .bool(true);
        }
        builder = builder
            .object("osg::Node", wrappers + 1)
            .object_fields()
            .node_fields();
        for _ in 0..wrappers {
            builder = builder.node_fields();
        }
        builder.finish()
    }

    #[test]
    fn nesting_up_to_the_limit_decodes() {
        let wrappers = u32::try_from(MAX_NESTING_DEPTH - 1).unwrap();
        let bytes = user_data_chain(wrappers);
        let scene = decode(&bytes).unwrap();
        assert_eq!(scene.len(), MAX_NESTING_DEPTH);
    }

    #[test]
    fn deep_nesting_is_an_error() {
        let bytes = user_data_chain(10_000);
        let err = decode(&bytes).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::NestingTooDeep {
                limit: MAX_NESTING_DEPTH
            }
        );

        // Each wrapper is a 13-byte class name, a 4-byte id, an empty name,
        // the variance and the user-data flag.
        let header = StreamBuilder::new(163).header().len();
        assert_eq!(err.offset, header + MAX_NESTING_DEPTH * 26);
    }

    #[test]
    fn brackets_are_skipped() {
        let bytes = StreamBuilder::new(163)
            .with_brackets()
            .header()
            .object("osg::Group", 1)
            .object_fields()
            .node_fields()
            .bool(true)
            .u32(0)
            .bracket()
            .finish();
        let scene = decode(&bytes).unwrap();
        assert!(scene.root_object().kind.children().is_empty());
    }
}
