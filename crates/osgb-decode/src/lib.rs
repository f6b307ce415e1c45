//! Decode OpenSceneGraph native binary (`.osgb`) object streams.
//!
//! This crate reads a complete stream held in memory and returns the object
//! graph it describes. Decoding is synchronous and allocation-light: bulk
//! payloads (vertex arrays, index buffers, embedded image files) are returned
//! as views into the caller's buffer.
//!
//! # Design principles
//!
//! - **Zero-copy**: a [`Scene`] borrows the input and cannot outlive it
//! - **Shared objects stay shared**: an identifier seen twice yields one
//!   arena entry referenced by both parents
//! - **All or nothing**: any error discards the partial graph
//!
//! # Key functions
//!
//! - [`decode`]: Validate the header and decode the root object
//! - [`Scene::objects`]: Walk every decoded object with its [`ObjectId`]
//! - [`Array::read_floats`]: Read one vertex attribute element
//! - [`PrimitiveSet::indices`]: Iterate an index buffer at any width

mod decoder;
mod dispatch;
mod error;
mod layout;
mod registry;
mod scene;

pub mod geometry;
pub mod header;
pub mod node;
pub mod reader;
pub mod state;
pub mod version;

#[cfg(any(test, feature = "test-tools"))]
pub mod test_support;

pub use decoder::{MAX_NESTING_DEPTH, decode};
pub use dispatch::ObjectType;
pub use error::{DecodeError, DecodeResult, ErrorKind};
pub use geometry::{Array, ArrayType, Binding, Geometry, IndexWidth, PrimitiveSet};
pub use header::{Header, MAGIC, StreamKind};
pub use node::{Geode, Group, Lod, NodeData, PagedLod, UserDataContainer};
pub use scene::{Object, ObjectId, ObjectKind, Scene};
pub use state::{Image, Material, StateSet, Texture, Texture2D};

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::test_support::StreamBuilder;

    /// A small stream that touches most layers: a group holding a geode with
    /// one geometry, plus a shared state set.
    fn sample_stream() -> Vec<u8> {
        StreamBuilder::new(163)
            .header()
            .object("osg::Group", 1)
            .object_fields()
            .node_fields()
            .bool(true)
            .u32(1)
            .object("osg::Geode", 2)
            .object_fields()
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(true)
            .u32(u32::MAX)
            .bool(true)
            .object("osg::StateSet", 3)
            .object_fields()
            .state_set_fields()
            .bool(true)
            .u32(1)
            .object("osg::Geometry", 4)
            .object_fields()
            .node_fields()
            .bool(true)
            .object("osg::StateSet", 3)
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(false)
            .u32(1)
            .object("osg::DrawElementsUByte", 5)
            .object_fields()
            .i32(0)
            .u32(4)
            .u32(3)
            .u8(0)
            .u8(1)
            .u8(2)
            .bool(true)
            .object("osg::Vec3Array", 6)
            .object_fields()
            .i32(4)
            .bool(false)
            .bool(false)
            .u32(3)
            .floats(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(false)
            .u32(0)
            .u32(0)
            .finish()
    }

    /// A group of `children` plain nodes under any version and bracket mode.
    fn group_stream(version: u32, children: u32, brackets: bool) -> Vec<u8> {
        let builder = StreamBuilder::new(version);
        let builder = if brackets { builder.with_brackets() } else { builder };
        let mut builder = builder
            .header()
            .object("osg::Group", 1)
            .object_fields()
            .node_fields()
            .bool(true)
            .u32(children)
            .bracket();
        for id in 0..children {
            builder = builder
                .object("osg::Node", id + 2)
                .object_fields()
                .node_fields();
        }
        builder.finish()
    }

    #[test]
    fn sample_stream_decodes() {
        let bytes = sample_stream();
        let scene = decode(&bytes).unwrap();
        assert_eq!(scene.len(), 6);

        let geode = scene.root_object().kind.children()[0];
        let ObjectKind::Geode(geode) = &scene[geode].kind else {
            panic!("expected geode");
        };
        let geometry = scene[geode.drawables[0]].kind.as_geometry().unwrap();
        assert_eq!(geode.node.state_set, geometry.node.state_set);
        assert!(geometry.node.state_set.is_some());
    }

    proptest! {
        #[test]
        fn decoding_is_deterministic(
            version in 1u32..=163,
            children in 0u32..16,
            brackets in any::<bool>(),
        ) {
            let bytes = group_stream(version, children, brackets);
            let first = decode(&bytes).unwrap();
            let second = decode(&bytes).unwrap();
            prop_assert_eq!(first.root_object().kind.children().len(), children as usize);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn every_truncation_fails_cleanly(cut in 0usize..1024) {
            let bytes = sample_stream();
            let cut = cut % bytes.len();
            let err = decode(&bytes[..cut]).unwrap_err();
            prop_assert!(
                matches!(err.kind, ErrorKind::TruncatedInput { .. }),
                "cut at {} gave {:?}", cut, err
            );
            prop_assert!(err.offset <= cut);
        }

        #[test]
        fn corrupt_magic_is_rejected(index in 0usize..8, flip in 1u8..=255) {
            let mut bytes = sample_stream();
            bytes[index] ^= flip;
            let err = decode(&bytes).unwrap_err();
            prop_assert_eq!(err.offset, 0);
            prop_assert!(matches!(err.kind, ErrorKind::BadMagic(_)));
        }

        #[test]
        fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let _ = decode(&bytes);
        }
    }
}
