//! Drawables, primitive sets and vertex attribute arrays.
//!
//! Index and element data are views into the input buffer. A [`crate::Scene`]
//! borrows that buffer, so the views stay valid for as long as the scene does.

use glam::DVec3;

use crate::node::NodeData;
use crate::scene::ObjectId;

/// Axis-aligned box stored as a drawable's initial bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: DVec3,
    pub max: DVec3,
}

/// Fields of the drawable layer other than its state set, which is merged
/// into [`NodeData::state_set`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawableData {
    pub initial_bound: Option<BoundingBox>,
    pub compute_bounding_box_callback: Option<ObjectId>,
    pub shape: Option<ObjectId>,
    pub supports_display_list: bool,
    pub use_display_list: bool,
    pub use_vertex_buffer_objects: bool,
    pub update_callback: Option<ObjectId>,
    pub event_callback: Option<ObjectId>,
    pub cull_callback: Option<ObjectId>,
    pub draw_callback: Option<ObjectId>,
}

/// Drawable made of vertex arrays and primitive sets.
///
/// Per-unit lists keep their positions: a `None` entry is an empty unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub node: NodeData,
    pub drawable: DrawableData,
    pub primitives: Vec<ObjectId>,
    pub vertices: Option<ObjectId>,
    pub normals: Option<ObjectId>,
    pub colors: Option<ObjectId>,
    pub secondary_colors: Option<ObjectId>,
    pub fog_coords: Option<ObjectId>,
    pub tex_coords: Vec<Option<ObjectId>>,
    pub vertex_attribs: Vec<Option<ObjectId>>,
    /// Only written by streams older than
    /// [`crate::version::GEOMETRY_OBJECT_ARRAYS`].
    pub fast_path_hint: Option<bool>,
}

/// Width of each index in a primitive set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexWidth {
    U8,
    U16,
    U32,
}

impl IndexWidth {
    #[must_use]
    pub fn bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }
}

/// Draw mode plus an index buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveSet<'a> {
    pub num_instances: i32,
    /// GL primitive mode (`GL_TRIANGLES` and friends).
    pub mode: u32,
    pub index_width: IndexWidth,
    pub(crate) index_data: &'a [u8],
}

impl<'a> PrimitiveSet<'a> {
    pub(crate) fn new(index_width: IndexWidth) -> Self {
        Self {
            num_instances: 0,
            mode: 0,
            index_width,
            index_data: &[],
        }
    }

    #[must_use]
    pub fn index_count(&self) -> usize {
        self.index_data.len() / self.index_width.bytes()
    }

    /// Raw index bytes, aliasing the input buffer.
    #[must_use]
    pub fn index_data(&self) -> &'a [u8] {
        self.index_data
    }

    /// Index at position `i`, widened to `u32`.
    #[must_use]
    pub fn index(&self, i: usize) -> Option<u32> {
        let width = self.index_width.bytes();
        let start = i.checked_mul(width)?;
        let bytes = self.index_data.get(start..start.checked_add(width)?)?;
        Some(match self.index_width {
            IndexWidth::U8 => u32::from(bytes[0]),
            IndexWidth::U16 => u32::from(u16::from_le_bytes([bytes[0], bytes[1]])),
            IndexWidth::U32 => u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        })
    }

    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.index_count()).filter_map(|i| self.index(i))
    }
}

/// Element shape of a float vector array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayType {
    Vec2f,
    Vec3f,
    Vec4f,
}

impl ArrayType {
    /// Map the type tag used by inline arrays.
    #[must_use]
    pub fn from_inline_tag(tag: i32) -> Option<Self> {
        match tag {
            15 => Some(Self::Vec2f),
            16 => Some(Self::Vec3f),
            17 => Some(Self::Vec4f),
            _ => None,
        }
    }

    #[must_use]
    pub fn components(self) -> usize {
        match self {
            Self::Vec2f => 2,
            Self::Vec3f => 3,
            Self::Vec4f => 4,
        }
    }

    /// Bytes per element.
    #[must_use]
    pub fn element_size(self) -> usize {
        self.components() * size_of::<f32>()
    }

    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Vec2f => "Vec2Array",
            Self::Vec3f => "Vec3Array",
            Self::Vec4f => "Vec4Array",
        }
    }
}

/// How an array's elements map onto the geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Binding {
    Undefined,
    #[default]
    Off,
    Overall,
    PerPrimitiveSet,
    PerVertex,
    Other(i32),
}

impl Binding {
    #[must_use]
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            -1 => Self::Undefined,
            0 => Self::Off,
            1 => Self::Overall,
            2 => Self::PerPrimitiveSet,
            4 => Self::PerVertex,
            other => Self::Other(other),
        }
    }
}

/// Flat buffer of 2, 3 or 4 component float vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Array<'a> {
    pub array_type: ArrayType,
    pub binding: Binding,
    pub normalize: bool,
    pub preserve_data_type: bool,
    pub(crate) element_data: &'a [u8],
}

impl<'a> Array<'a> {
    pub(crate) fn new(array_type: ArrayType) -> Self {
        Self {
            array_type,
            binding: Binding::Off,
            normalize: false,
            preserve_data_type: false,
            element_data: &[],
        }
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.element_data.len() / self.array_type.element_size()
    }

    /// Raw element bytes, aliasing the input buffer.
    #[must_use]
    pub fn element_data(&self) -> &'a [u8] {
        self.element_data
    }

    /// The first `N` components of element `index`.
    ///
    /// Returns `None` without reading anything when `index` is out of range
    /// or `N` exceeds the element's component count.
    #[must_use]
    pub fn read_floats<const N: usize>(&self, index: usize) -> Option<[f32; N]> {
        if index >= self.element_count() || N > self.array_type.components() {
            return None;
        }
        let start = index * self.array_type.element_size();
        let mut out = [0.0; N];
        for (i, value) in out.iter_mut().enumerate() {
            let at = start + i * size_of::<f32>();
            let bytes = &self.element_data[at..at + size_of::<f32>()];
            *value = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        Some(out)
    }

    /// Every component of every element, in order.
    pub fn floats(&self) -> impl Iterator<Item = f32> + '_ {
        self.element_data
            .chunks_exact(size_of::<f32>())
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float_bytes(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn vec3_array_reads_within_bounds() {
        let data = float_bytes(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let array = Array {
            element_data: &data,
            ..Array::new(ArrayType::Vec3f)
        };
        assert_eq!(array.element_count(), 3);
        assert_eq!(array.read_floats::<3>(0), Some([0.0, 1.0, 2.0]));
        assert_eq!(array.read_floats::<3>(1), Some([3.0, 4.0, 5.0]));
        assert_eq!(array.read_floats::<3>(2), Some([6.0, 7.0, 8.0]));
        assert_eq!(array.read_floats::<2>(2), Some([6.0, 7.0]));
    }

    #[test]
    fn vec3_array_rejects_bad_reads() {
        let data = float_bytes(&[0.0; 9]);
        let array = Array {
            element_data: &data,
            ..Array::new(ArrayType::Vec3f)
        };
        for index in 0..3 {
            assert_eq!(array.read_floats::<4>(index), None);
        }
        assert_eq!(array.read_floats::<1>(3), None);
    }

    #[test]
    fn floats_flattens_elements() {
        let data = float_bytes(&[1.0, 2.0, 3.0, 4.0]);
        let array = Array {
            element_data: &data,
            ..Array::new(ArrayType::Vec2f)
        };
        assert_eq!(array.floats().collect::<Vec<_>>(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn indices_widen_by_width() {
        let data = [1u8, 0, 2, 0, 0xff, 0xff];
        let set = PrimitiveSet {
            index_data: &data,
            ..PrimitiveSet::new(IndexWidth::U16)
        };
        assert_eq!(set.index_count(), 3);
        assert_eq!(set.indices().collect::<Vec<_>>(), [1, 2, 0xffff]);
        assert_eq!(set.index(3), None);

        let set = PrimitiveSet {
            index_data: &data,
            ..PrimitiveSet::new(IndexWidth::U8)
        };
        assert_eq!(set.index(4), Some(0xff));
    }

    #[test]
    fn index_past_address_space_is_none() {
        let data = [1u8, 2, 3];
        for width in [IndexWidth::U8, IndexWidth::U16, IndexWidth::U32] {
            let set = PrimitiveSet {
                index_data: &data,
                ..PrimitiveSet::new(width)
            };
            assert_eq!(set.index(usize::MAX), None);
            assert_eq!(set.index(usize::MAX / width.bytes()), None);
        }
    }

    #[test]
    fn binding_keeps_unknown_values() {
        assert_eq!(Binding::from_raw(4), Binding::PerVertex);
        assert_eq!(Binding::from_raw(3), Binding::Other(3));
    }
}
