//! Node, group, LOD and user-data layers.

use crate::decoder::Decoder;
use crate::dispatch::Family;
use crate::error::DecodeResult;
use crate::node::{
    BoundingSphere, CenterMode, Lod, NodeData, PagedLod, Range, RangeData, UserDataContainer,
};
use crate::scene::ObjectId;
use crate::version;

impl Decoder<'_> {
    /// Read a `u32` element count.
    pub(crate) fn read_count(&mut self) -> DecodeResult<usize> {
        self.reader.u32().map(|count| count as usize)
    }

    /// Capacity hint for a list of `count` items of at least `min_size` bytes
    /// each, clamped so a corrupt count cannot force a huge allocation.
    pub(crate) fn capacity_for(&self, count: usize, min_size: usize) -> usize {
        count.min(self.reader.remaining() / min_size.max(1))
    }

    /// Count, bracket, then that many nested objects. Empty slots are dropped.
    pub(crate) fn read_object_list(&mut self, family: Family) -> DecodeResult<Vec<ObjectId>> {
        let count = self.read_count()?;
        self.begin_bracket()?;
        let mut objects = Vec::with_capacity(self.capacity_for(count, 4));
        for _ in 0..count {
            if let Some(handle) = self.read_object_of(family)? {
                objects.push(handle);
            }
        }
        Ok(objects)
    }

    /// Presence flag, then an object list.
    pub(crate) fn read_optional_object_list(
        &mut self,
        family: Family,
    ) -> DecodeResult<Vec<ObjectId>> {
        if self.reader.bool()? {
            self.read_object_list(family)
        } else {
            Ok(Vec::new())
        }
    }

    /// Presence flag, count, bracket, then that many strings.
    pub(crate) fn read_optional_string_list(&mut self) -> DecodeResult<Vec<String>> {
        if !self.reader.bool()? {
            return Ok(Vec::new());
        }
        let count = self.read_count()?;
        self.begin_bracket()?;
        let mut strings = Vec::with_capacity(self.capacity_for(count, 4));
        for _ in 0..count {
            strings.push(self.reader.string()?);
        }
        Ok(strings)
    }

    pub(crate) fn read_node_layer(&mut self) -> DecodeResult<NodeData> {
        let initial_bound = if self.reader.bool()? {
            self.begin_bracket()?;
            Some(BoundingSphere {
                center: self.reader.dvec3()?,
                radius: self.reader.f32()?,
            })
        } else {
            None
        };

        let compute_bound_callback = self.read_object_if_present(Family::Any)?;
        let update_callback = self.read_object_if_present(Family::Any)?;
        let event_callback = self.read_object_if_present(Family::Any)?;
        let cull_callback = self.read_object_if_present(Family::Any)?;
        let culling_active = self.reader.bool()?;
        let node_mask = self.reader.u32()?;

        let descriptions = if version::has_node_descriptions(self.version()) {
            self.read_optional_string_list()?
        } else {
            Vec::new()
        };

        let state_set = self.read_object_if_present(Family::StateSet)?;

        Ok(NodeData {
            initial_bound,
            compute_bound_callback,
            update_callback,
            event_callback,
            cull_callback,
            culling_active,
            node_mask,
            descriptions,
            state_set,
        })
    }

    pub(crate) fn read_group_layer(&mut self) -> DecodeResult<Vec<ObjectId>> {
        self.read_optional_object_list(Family::Node)
    }

    pub(crate) fn read_geode_layer(&mut self) -> DecodeResult<Vec<ObjectId>> {
        self.read_optional_object_list(Family::Drawable)
    }

    pub(crate) fn read_lod_layer(
        &mut self,
        node: NodeData,
        children: Vec<ObjectId>,
    ) -> DecodeResult<Lod> {
        let center_mode = CenterMode::from_raw(self.reader.i32()?);

        let (user_defined_center, user_defined_radius) = if self.reader.bool()? {
            (self.reader.dvec3()?, self.reader.f64()?)
        } else {
            Default::default()
        };

        let range_mode = self.reader.u32()?;

        let mut ranges = Vec::new();
        if self.reader.bool()? {
            let count = self.read_count()?;
            self.begin_bracket()?;
            ranges.reserve(self.capacity_for(count, 8));
            for _ in 0..count {
                ranges.push(Range {
                    min: self.reader.f32()?,
                    max: self.reader.f32()?,
                });
            }
        }

        Ok(Lod {
            node,
            children,
            center_mode,
            user_defined_center,
            user_defined_radius,
            range_mode,
            ranges,
        })
    }

    /// The `PagedLOD` layer. Its children come last, after the range data.
    pub(crate) fn read_paged_lod_layer(&mut self, mut lod: Lod) -> DecodeResult<PagedLod> {
        let database_path = if self.reader.bool()? && self.reader.bool()? {
            Some(self.reader.string()?)
        } else {
            None
        };

        let frame_number_of_last_traversal =
            if version::has_paged_lod_frame_number(self.version()) {
                Some(self.reader.u32()?)
            } else {
                None
            };

        let num_children_that_cannot_be_expired = self.reader.u32()?;
        let disable_external_children_paging = self.reader.bool()?;

        let mut range_data = Vec::new();
        if self.reader.bool()? {
            let file_count = self.read_count()?;
            self.begin_bracket()?;
            range_data.reserve(self.capacity_for(file_count, 4));
            for _ in 0..file_count {
                range_data.push(RangeData {
                    file_name: self.reader.string()?,
                    ..RangeData::default()
                });
            }

            let priority_count = self.read_count()?;
            self.begin_bracket()?;
            let priorities = self.reader.elements(priority_count, 8)?;
            if priority_count > file_count {
                tracing::warn!(
                    file_count,
                    priority_count,
                    "PagedLOD has more priorities than file names"
                );
                range_data.resize_with(priority_count, RangeData::default);
            }
            for (entry, pair) in range_data.iter_mut().zip(priorities.chunks_exact(8)) {
                entry.priority_offset = f32::from_le_bytes([pair[0], pair[1], pair[2], pair[3]]);
                entry.priority_scale = f32::from_le_bytes([pair[4], pair[5], pair[6], pair[7]]);
            }
        }

        lod.children = self.read_optional_object_list(Family::Node)?;

        Ok(PagedLod {
            lod,
            database_path,
            frame_number_of_last_traversal,
            num_children_that_cannot_be_expired,
            disable_external_children_paging,
            range_data,
        })
    }

    pub(crate) fn read_user_data_container_layer(&mut self) -> DecodeResult<UserDataContainer> {
        let user_data = if self.reader.bool()? {
            self.begin_bracket()?;
            self.read_object_of(Family::Any)?
        } else {
            None
        };
        let descriptions = self.read_optional_string_list()?;
        let user_objects = self.read_optional_object_list(Family::Any)?;

        Ok(UserDataContainer {
            user_data,
            descriptions,
            user_objects,
        })
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use crate::node::CenterMode;
    use crate::test_support::StreamBuilder;
    use crate::{ObjectKind, decode};

    #[test]
    fn group_children_are_ordered() {
        let bytes = StreamBuilder::new(163)
            .header()
            .object("osg::Group", 1)
            .object_fields()
            .node_fields()
            .bool(true)
            .u32(2)
            .object("osg::Node", 2)
            .object_fields()
            .node_fields()
            .object("osg::Node", 3)
            .object_fields()
            .node_fields()
            .finish();

        let scene = decode(&bytes).unwrap();
        let children = scene.root_object().kind.children();
        let ids: Vec<_> = children.iter().map(|&c| scene[c].unique_id).collect();
        assert_eq!(ids, [Some(2), Some(3)]);
    }

    #[test]
    fn node_reads_bound_and_mask() {
        let bytes = StreamBuilder::new(163)
            .header()
            .object("osg::Node", 1)
            .object_fields()
            .bool(true)
            .f64(1.0)
            .f64(2.0)
            .f64(3.0)
            .f32(4.0)
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(false)
            .u32(0x0f)
            .bool(false)
            .finish();

        let scene = decode(&bytes).unwrap();
        let node = scene.root_object().kind.node().unwrap();
        let bound = node.initial_bound.unwrap();
        assert_eq!(bound.center, DVec3::new(1.0, 2.0, 3.0));
        assert!((bound.radius - 4.0).abs() < f32::EPSILON);
        assert!(!node.culling_active);
        assert_eq!(node.node_mask, 0x0f);
    }

    #[test]
    fn old_nodes_carry_descriptions() {
        let bytes = StreamBuilder::new(76)
            .header()
            .object("osg::Node", 1)
            .object_fields()
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(false)
            .bool(true)
            .u32(u32::MAX)
            .bool(true)
            .u32(2)
            .string("a")
            .string("b")
            .bool(false)
            .finish();

        let scene = decode(&bytes).unwrap();
        let node = scene.root_object().kind.node().unwrap();
        assert_eq!(node.descriptions, ["a", "b"]);
    }

    #[test]
    fn lod_reads_ranges_after_children() {
        let bytes = StreamBuilder::new(163)
            .header()
            .object("osg::LOD", 1)
            .object_fields()
            .node_fields()
            .bool(false)
            .i32(1)
            .bool(true)
            .f64(1.0)
            .f64(0.0)
            .f64(-1.0)
            .f64(50.0)
            .u32(0)
            .bool(true)
            .u32(2)
            .f32(0.0)
            .f32(100.0)
            .f32(100.0)
            .f32(1000.0)
            .finish();

        let scene = decode(&bytes).unwrap();
        let ObjectKind::Lod(lod) = &scene.root_object().kind else {
            panic!("expected LOD");
        };
        assert_eq!(lod.center_mode, CenterMode::UserDefinedCenter);
        assert_eq!(lod.user_defined_center, DVec3::new(1.0, 0.0, -1.0));
        assert!((lod.user_defined_radius - 50.0).abs() < f64::EPSILON);
        assert_eq!(lod.ranges.len(), 2);
        assert!((lod.ranges[1].max - 1000.0).abs() < f32::EPSILON);
    }

    fn paged_lod(version: u32, priorities: u32) -> Vec<u8> {
        let mut builder = StreamBuilder::new(version)
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
            .string("tiles/");
        if version < 70 {
            builder = builder.u32(9);
        }
        builder = builder
            .u32(1)
            .bool(false)
            .bool(true)
            .u32(1)
            .string("child_L1.osgb")
            .u32(priorities);
        for _ in 0..priorities {
            builder = builder.f32(0.5).f32(2.0);
        }
        builder
            .bool(true)
            .u32(1)
            .object("osg::Geode", 2)
            .object_fields()
            .node_fields()
            .bool(false)
            .finish()
    }

    #[test]
    fn paged_lod_reads_range_data_and_children() {
        let bytes = paged_lod(163, 1);
        let scene = decode(&bytes).unwrap();
        let ObjectKind::PagedLod(paged) = &scene.root_object().kind else {
            panic!("expected PagedLOD");
        };
        assert_eq!(paged.database_path.as_deref(), Some("tiles/"));
        assert_eq!(paged.frame_number_of_last_traversal, None);
        assert_eq!(paged.num_children_that_cannot_be_expired, 1);
        assert_eq!(paged.range_data.len(), 1);
        assert_eq!(paged.range_data[0].file_name, "child_L1.osgb");
        assert!((paged.range_data[0].priority_scale - 2.0).abs() < f32::EPSILON);
        assert_eq!(paged.lod.children.len(), 1);
        assert_eq!(scene[paged.lod.children[0]].class_name(), "Geode");
    }

    #[test]
    fn paged_lod_grows_for_extra_priorities() {
        let bytes = paged_lod(163, 3);
        let scene = decode(&bytes).unwrap();
        let ObjectKind::PagedLod(paged) = &scene.root_object().kind else {
            panic!("expected PagedLOD");
        };
        assert_eq!(paged.range_data.len(), 3);
        assert!(paged.range_data[2].file_name.is_empty());
    }

    #[test]
    fn old_paged_lod_has_frame_number() {
        let bytes = paged_lod(69, 1);
        let scene = decode(&bytes).unwrap();
        let ObjectKind::PagedLod(paged) = &scene.root_object().kind else {
            panic!("expected PagedLOD");
        };
        assert_eq!(paged.frame_number_of_last_traversal, Some(9));
    }
}
