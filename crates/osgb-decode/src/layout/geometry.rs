//! Drawable and geometry layers, including the pre-112 inline encoding.

use crate::decoder::Decoder;
use crate::dispatch::Family;
use crate::error::DecodeResult;
use crate::geometry::{
    Array, ArrayType, Binding, BoundingBox, DrawableData, Geometry, IndexWidth, PrimitiveSet,
};
use crate::node::NodeData;
use crate::scene::{ObjectId, ObjectKind};
use crate::version;

impl<'a> Decoder<'a> {
    /// Drawable layer followed by the geometry layer. `node` is the Node
    /// layer already read (or defaulted for streams that omit it).
    pub(crate) fn read_geometry(&mut self, mut node: NodeData) -> DecodeResult<Geometry> {
        let drawable = self.read_drawable_layer(&mut node)?;
        let mut geometry = Geometry {
            node,
            drawable,
            ..Geometry::default()
        };

        if version::has_geometry_object_arrays(self.version()) {
            self.read_geometry_objects(&mut geometry)?;
        } else {
            self.read_geometry_inline(&mut geometry)?;
        }
        Ok(geometry)
    }

    /// The drawable layer. Its state set replaces whatever the Node layer
    /// assigned.
    fn read_drawable_layer(&mut self, node: &mut NodeData) -> DecodeResult<DrawableData> {
        node.state_set = self.read_object_if_present(Family::StateSet)?;

        let initial_bound = if self.reader.bool()? {
            Some(BoundingBox {
                min: self.reader.dvec3()?,
                max: self.reader.dvec3()?,
            })
        } else {
            None
        };

        Ok(DrawableData {
            initial_bound,
            compute_bounding_box_callback: self.read_object_if_present(Family::Any)?,
            shape: self.read_object_if_present(Family::Any)?,
            supports_display_list: self.reader.bool()?,
            use_display_list: self.reader.bool()?,
            use_vertex_buffer_objects: self.reader.bool()?,
            update_callback: self.read_object_if_present(Family::Any)?,
            event_callback: self.read_object_if_present(Family::Any)?,
            cull_callback: self.read_object_if_present(Family::Any)?,
            draw_callback: self.read_object_if_present(Family::Any)?,
        })
    }

    /// Version 112 and later: primitives and arrays are dispatched objects.
    fn read_geometry_objects(&mut self, geometry: &mut Geometry) -> DecodeResult<()> {
        let count = self.read_count()?;
        geometry.primitives.reserve(self.capacity_for(count, 4));
        for _ in 0..count {
            if let Some(primitive) = self.read_object_of(Family::PrimitiveSet)? {
                geometry.primitives.push(primitive);
            }
        }

        geometry.vertices = self.read_object_if_present(Family::Array)?;
        geometry.normals = self.read_object_if_present(Family::Array)?;
        geometry.colors = self.read_object_if_present(Family::Array)?;
        geometry.secondary_colors = self.read_object_if_present(Family::Array)?;
        geometry.fog_coords = self.read_object_if_present(Family::Array)?;
        geometry.tex_coords = self.read_array_units()?;
        geometry.vertex_attribs = self.read_array_units()?;
        Ok(())
    }

    /// Count followed by one array object slot per unit.
    fn read_array_units(&mut self) -> DecodeResult<Vec<Option<ObjectId>>> {
        let count = self.read_count()?;
        let mut units = Vec::with_capacity(self.capacity_for(count, 4));
        for _ in 0..count {
            units.push(self.read_object_of(Family::Array)?);
        }
        Ok(units)
    }

    /// Before version 112: primitive sets are inline triplets and arrays use
    /// the inline array encoding, each wrapped in brackets.
    fn read_geometry_inline(&mut self, geometry: &mut Geometry) -> DecodeResult<()> {
        let count = self.read_count()?;
        self.begin_bracket()?;
        geometry.primitives.reserve(self.capacity_for(count, 12));
        for _ in 0..count {
            let primitive = self.read_inline_primitive_set()?;
            geometry.primitives.push(primitive);
        }

        geometry.vertices = self.read_bracketed_inline_array()?;
        geometry.normals = self.read_bracketed_inline_array()?;
        geometry.colors = self.read_bracketed_inline_array()?;
        geometry.secondary_colors = self.read_bracketed_inline_array()?;
        geometry.fog_coords = self.read_bracketed_inline_array()?;
        geometry.tex_coords = self.read_inline_array_units()?;
        geometry.vertex_attribs = self.read_inline_array_units()?;
        geometry.fast_path_hint = Some(self.reader.bool()?);
        Ok(())
    }

    /// Instances, mode, count and `u32` indices. Inline sets carry no
    /// identifier and are never shared.
    fn read_inline_primitive_set(&mut self) -> DecodeResult<ObjectId> {
        let num_instances = self.reader.i32()?;
        let mode = self.reader.u32()?;
        let count = self.read_count()?;
        let index_data = self.reader.elements(count, IndexWidth::U32.bytes())?;

        let primitive = PrimitiveSet {
            num_instances,
            mode,
            index_width: IndexWidth::U32,
            index_data,
        };
        Ok(self.allocate(None, ObjectKind::PrimitiveSet(primitive)))
    }

    fn read_bracketed_inline_array(&mut self) -> DecodeResult<Option<ObjectId>> {
        if self.reader.bool()? {
            self.begin_bracket()?;
            self.read_inline_array()
        } else {
            Ok(None)
        }
    }

    fn read_inline_array_units(&mut self) -> DecodeResult<Vec<Option<ObjectId>>> {
        if !self.reader.bool()? {
            return Ok(Vec::new());
        }
        let count = self.read_count()?;
        self.begin_bracket()?;
        let mut units = Vec::with_capacity(self.capacity_for(count, 1));
        for _ in 0..count {
            self.begin_bracket()?;
            units.push(self.read_inline_array()?);
        }
        Ok(units)
    }

    /// `DrawElements*` layer: the primitive set fields plus its index data.
    pub(crate) fn read_draw_elements(&mut self, width: IndexWidth) -> DecodeResult<PrimitiveSet<'a>> {
        let num_instances = self.reader.i32()?;
        let mode = self.reader.u32()?;
        let count = self.read_count()?;
        let index_data = self.reader.elements(count, width.bytes())?;
        Ok(PrimitiveSet {
            num_instances,
            mode,
            index_width: width,
            index_data,
        })
    }

    /// Array layer of a dispatched `Vec*Array`.
    pub(crate) fn read_array_object(&mut self, array_type: ArrayType) -> DecodeResult<Array<'a>> {
        let binding = Binding::from_raw(self.reader.i32()?);
        let normalize = self.reader.bool()?;
        let preserve_data_type = self.reader.bool()?;
        let count = self.read_count()?;
        let element_data = self.reader.elements(count, array_type.element_size())?;
        Ok(Array {
            array_type,
            binding,
            normalize,
            preserve_data_type,
            element_data,
        })
    }
}
