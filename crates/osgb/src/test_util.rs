use std::path::PathBuf;

use osgb_decode::test_support::StreamBuilder;

/// An empty group, id 1.
pub fn minimal_group() -> Vec<u8> {
    StreamBuilder::new(163)
        .header()
        .object("osg::Group", 1)
        .object_fields()
        .node_fields()
        .bool(false)
        .finish()
}

fn geode_with_state(builder: StreamBuilder, id: u32, first: bool) -> StreamBuilder {
    let builder = builder
        .object("osg::Geode", id)
        .object_fields()
        .bool(false)
        .bool(false)
        .bool(false)
        .bool(false)
        .bool(false)
        .bool(true)
        .u32(u32::MAX)
        .bool(true)
        .object("osg::StateSet", 7);
    let builder = if first {
        builder.object_fields().state_set_fields()
    } else {
        builder
    };
    builder.bool(false)
}

/// A group whose two geodes share state set 7.
pub fn shared_state_scene() -> Vec<u8> {
    let builder = StreamBuilder::new(163)
        .header()
        .object("osg::Group", 1)
        .object_fields()
        .node_fields()
        .bool(true)
        .u32(2);
    let builder = geode_with_state(builder, 2, true);
    geode_with_state(builder, 3, false).finish()
}

/// A geode holding one triangle: three vertices, one index set.
pub fn triangle_scene() -> Vec<u8> {
    StreamBuilder::new(163)
        .header()
        .object("osg::Geode", 1)
        .object_fields()
        .node_fields()
        .bool(true)
        .u32(1)
        .object("osg::Geometry", 2)
        .object_fields()
        .node_fields()
        .drawable_fields()
        .u32(1)
        .object("osg::DrawElementsUShort", 3)
        .object_fields()
        .i32(0)
        .u32(4)
        .u32(3)
        .u16(0)
        .u16(1)
        .u16(2)
        .bool(true)
        .object("osg::Vec3Array", 4)
        .object_fields()
        .i32(4)
        .bool(false)
        .bool(false)
        .u32(3)
        .floats(&[-1.0, 0.0, 2.0, 1.0, 0.0, 2.0, 0.0, 3.0, -2.0])
        .bool(false)
        .bool(false)
        .bool(false)
        .bool(false)
        .u32(0)
        .u32(0)
        .finish()
}

/// A state set binding material 2 with override value 2, and Texture2D 3
/// on unit 0 with value 1.
pub fn material_texture_state() -> Vec<u8> {
    StreamBuilder::new(163)
        .header()
        .object("osg::StateSet", 1)
        .object_fields()
        .bool(false)
        .bool(true)
        .u32(1)
        .object("osg::Material", 2)
        .object_fields()
        .state_attribute_fields()
        .u32(0)
        .bool(true)
        .bool(false)
        .floats(&[0.1, 0.2, 0.3, 1.0])
        .floats(&[0.0, 0.0, 0.0, 1.0])
        .bool(false)
        .bool(true)
        .bool(true)
        .floats(&[1.0, 1.0, 1.0, 1.0])
        .floats(&[1.0, 1.0, 1.0, 1.0])
        .bool(false)
        .bool(true)
        .bool(true)
        .f32(32.0)
        .f32(32.0)
        .u32(2)
        .bool(false)
        .bool(true)
        .u32(1)
        .u32(1)
        .object("osg::Texture2D", 3)
        .object_fields()
        .state_attribute_fields()
        .bool(true)
        .u32(0x812F)
        .bool(true)
        .u32(0x2901)
        .bool(false)
        .bool(false)
        .bool(false)
        .f32(1.0)
        .bool(false)
        .bool(true)
        .bool(false)
        .bool(false)
        .f64(0.0)
        .f64(0.0)
        .f64(0.0)
        .f64(0.0)
        .i32(0)
        .i32(0)
        .bool(false)
        .bool(false)
        .bool(false)
        .bool(false)
        .u32(0x0203)
        .u32(0x1909)
        .f32(0.0)
        .bool(false)
        .f32(-1000.0)
        .f32(1000.0)
        .f32(0.0)
        .bool(false)
        .u32(256)
        .u32(256)
        .u32(1)
        .state_set_tail()
        .finish()
}

/// A PagedLOD with one external child file, priority offset 0.5 and
/// scale 2.
pub fn paged_lod_scene() -> Vec<u8> {
    StreamBuilder::new(163)
        .header()
        .object("osg::PagedLOD", 1)
        .object_fields()
        .node_fields()
        .i32(0)
        .bool(false)
        .u32(0)
        .bool(false)
        .bool(true)
        .bool(true)
        .string("tiles/")
        .u32(1)
        .bool(false)
        .bool(true)
        .u32(1)
        .string("child_L1.osgb")
        .u32(1)
        .f32(0.5)
        .f32(2.0)
        .bool(true)
        .u32(1)
        .object("osg::Geode", 2)
        .object_fields()
        .node_fields()
        .bool(false)
        .finish()
}

/// A fresh directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("osgb-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
