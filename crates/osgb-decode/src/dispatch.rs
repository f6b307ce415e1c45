//! Type-name dispatch for nested objects.

use crate::decoder::{Decoder, MAX_NESTING_DEPTH};
use crate::error::{DecodeError, DecodeResult, ErrorKind};
use crate::geometry::{Array, ArrayType, Geometry, IndexWidth, PrimitiveSet};
use crate::node::{Geode, Group, Lod, NodeData, PagedLod, UserDataContainer};
use crate::registry::Namespace;
use crate::scene::{ObjectId, ObjectKind};
use crate::state::{Material, StateSet, Texture2D};
use crate::version;

/// Serialized class names this decoder can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Node,
    Group,
    Geode,
    Geometry,
    Lod,
    PagedLod,
    StateSet,
    Material,
    Texture2D,
    DefaultUserDataContainer,
    DrawElementsUInt,
    DrawElementsUShort,
    DrawElementsUByte,
    Vec2Array,
    Vec3Array,
    Vec4Array,
}

impl ObjectType {
    pub const ALL: [Self; 16] = [
        Self::Node,
        Self::Group,
        Self::Geode,
        Self::Geometry,
        Self::Lod,
        Self::PagedLod,
        Self::StateSet,
        Self::Material,
        Self::Texture2D,
        Self::DefaultUserDataContainer,
        Self::DrawElementsUInt,
        Self::DrawElementsUShort,
        Self::DrawElementsUByte,
        Self::Vec2Array,
        Self::Vec3Array,
        Self::Vec4Array,
    ];

    /// Look up a serialized class name. Matching is exact.
    #[must_use]
    pub fn from_name(name: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name().as_bytes() == name)
    }

    /// The serialized class name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Node => "osg::Node",
            Self::Group => "osg::Group",
            Self::Geode => "osg::Geode",
            Self::Geometry => "osg::Geometry",
            Self::Lod => "osg::LOD",
            Self::PagedLod => "osg::PagedLOD",
            Self::StateSet => "osg::StateSet",
            Self::Material => "osg::Material",
            Self::Texture2D => "osg::Texture2D",
            Self::DefaultUserDataContainer => "osg::DefaultUserDataContainer",
            Self::DrawElementsUInt => "osg::DrawElementsUInt",
            Self::DrawElementsUShort => "osg::DrawElementsUShort",
            Self::DrawElementsUByte => "osg::DrawElementsUByte",
            Self::Vec2Array => "osg::Vec2Array",
            Self::Vec3Array => "osg::Vec3Array",
            Self::Vec4Array => "osg::Vec4Array",
        }
    }

    /// An empty value of the variant this type decodes into.
    fn placeholder<'a>(self) -> ObjectKind<'a> {
        match self {
            Self::Node => ObjectKind::Node(NodeData::default()),
            Self::Group => ObjectKind::Group(Group::default()),
            Self::Geode => ObjectKind::Geode(Geode::default()),
            Self::Geometry => ObjectKind::Geometry(Geometry::default()),
            Self::Lod => ObjectKind::Lod(Lod::default()),
            Self::PagedLod => ObjectKind::PagedLod(PagedLod::default()),
            Self::StateSet => ObjectKind::StateSet(StateSet::default()),
            Self::Material => ObjectKind::Material(Material::default()),
            Self::Texture2D => ObjectKind::Texture2D(Texture2D::default()),
            Self::DefaultUserDataContainer => {
                ObjectKind::UserDataContainer(UserDataContainer::default())
            }
            Self::DrawElementsUInt => ObjectKind::PrimitiveSet(PrimitiveSet::new(IndexWidth::U32)),
            Self::DrawElementsUShort => {
                ObjectKind::PrimitiveSet(PrimitiveSet::new(IndexWidth::U16))
            }
            Self::DrawElementsUByte => ObjectKind::PrimitiveSet(PrimitiveSet::new(IndexWidth::U8)),
            Self::Vec2Array => ObjectKind::Array(Array::new(ArrayType::Vec2f)),
            Self::Vec3Array => ObjectKind::Array(Array::new(ArrayType::Vec3f)),
            Self::Vec4Array => ObjectKind::Array(Array::new(ArrayType::Vec4f)),
        }
    }
}

/// What a nested reference is allowed to resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Family {
    Any,
    Node,
    Drawable,
    StateSet,
    StateAttribute,
    PrimitiveSet,
    Array,
}

impl Family {
    fn name(self) -> &'static str {
        match self {
            Self::Any => "object",
            Self::Node => "node",
            Self::Drawable => "drawable",
            Self::StateSet => "state set",
            Self::StateAttribute => "state attribute",
            Self::PrimitiveSet => "primitive set",
            Self::Array => "array",
        }
    }

    fn admits(self, kind: &ObjectKind<'_>) -> bool {
        match self {
            Self::Any => true,
            Self::Node => kind.is_node(),
            Self::Drawable => kind.is_drawable(),
            Self::StateSet => matches!(kind, ObjectKind::StateSet(_)),
            Self::StateAttribute => kind.is_state_attribute(),
            Self::PrimitiveSet => matches!(kind, ObjectKind::PrimitiveSet(_)),
            Self::Array => matches!(kind, ObjectKind::Array(_)),
        }
    }
}

impl Decoder<'_> {
    /// Read one nested object: a class name (empty for none), then the
    /// identifier, then the fields if this identifier has not been seen.
    pub(crate) fn read_object(&mut self) -> DecodeResult<Option<ObjectId>> {
        let name_offset = self.reader.position();
        let name = self.reader.string_bytes()?;
        if name.is_empty() {
            return Ok(None);
        }
        self.begin_bracket()?;

        let id_offset = self.reader.position();
        let unique_id = self.reader.u32()?;
        if let Some(existing) = self.registry.lookup(Namespace::Object, unique_id) {
            tracing::trace!(unique_id, "shared object reference");
            return Ok(Some(existing));
        }

        let ty = ObjectType::from_name(name).ok_or_else(|| {
            DecodeError::new(
                id_offset,
                ErrorKind::UnsupportedType(String::from_utf8_lossy(name).into_owned()),
            )
        })?;

        if self.depth >= MAX_NESTING_DEPTH {
            return Err(DecodeError::new(
                name_offset,
                ErrorKind::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
            ));
        }

        let handle = self.allocate(Some(unique_id), ty.placeholder());
        self.registry.register(Namespace::Object, unique_id, handle);
        self.depth += 1;
        let result = self.read_fields(ty, handle);
        self.depth -= 1;
        result.map(|()| Some(handle))
    }

    /// Read a nested object and check that it belongs to `family`.
    ///
    /// A reference to an object of another family is an `UnexpectedType`
    /// error, not an empty slot: decoding stops rather than dropping the
    /// object and carrying on.
    pub(crate) fn read_object_of(&mut self, family: Family) -> DecodeResult<Option<ObjectId>> {
        let offset = self.reader.position();
        let Some(handle) = self.read_object()? else {
            return Ok(None);
        };
        let kind = self.kind(handle);
        if family.admits(kind) {
            Ok(Some(handle))
        } else {
            Err(DecodeError::new(
                offset,
                ErrorKind::UnexpectedType {
                    expected: family.name(),
                    found: kind.class_name(),
                },
            ))
        }
    }

    /// Read a presence flag followed, if set, by a nested object.
    pub(crate) fn read_object_if_present(
        &mut self,
        family: Family,
    ) -> DecodeResult<Option<ObjectId>> {
        if self.reader.bool()? {
            self.read_object_of(family)
        } else {
            Ok(None)
        }
    }

    /// Run the layout routines for `ty`, base layers first.
    fn read_fields(&mut self, ty: ObjectType, handle: ObjectId) -> DecodeResult<()> {
        self.read_object_layer(handle)?;

        let kind = match ty {
            ObjectType::Node => ObjectKind::Node(self.read_node_layer()?),
            ObjectType::Group => {
                let node = self.read_node_layer()?;
                let children = self.read_group_layer()?;
                ObjectKind::Group(Group { node, children })
            }
            ObjectType::Geode => {
                let node = self.read_node_layer()?;
                let drawables = self.read_geode_layer()?;
                ObjectKind::Geode(Geode { node, drawables })
            }
            ObjectType::Lod => {
                let node = self.read_node_layer()?;
                let children = self.read_group_layer()?;
                ObjectKind::Lod(self.read_lod_layer(node, children)?)
            }
            ObjectType::PagedLod => {
                let node = self.read_node_layer()?;
                let lod = self.read_lod_layer(node, Vec::new())?;
                ObjectKind::PagedLod(self.read_paged_lod_layer(lod)?)
            }
            ObjectType::Geometry => {
                let node = if version::has_geometry_node_layer(self.version()) {
                    self.read_node_layer()?
                } else {
                    NodeData::default()
                };
                ObjectKind::Geometry(self.read_geometry(node)?)
            }
            ObjectType::StateSet => ObjectKind::StateSet(self.read_state_set_layer()?),
            ObjectType::Material => {
                let attribute = self.read_state_attribute_layer()?;
                ObjectKind::Material(self.read_material_layer(attribute)?)
            }
            ObjectType::Texture2D => {
                let attribute = self.read_state_attribute_layer()?;
                let texture = self.read_texture_layer()?;
                ObjectKind::Texture2D(self.read_texture_2d_layer(attribute, texture)?)
            }
            ObjectType::DefaultUserDataContainer => {
                ObjectKind::UserDataContainer(self.read_user_data_container_layer()?)
            }
            ObjectType::DrawElementsUInt => {
                ObjectKind::PrimitiveSet(self.read_draw_elements(IndexWidth::U32)?)
            }
            ObjectType::DrawElementsUShort => {
                ObjectKind::PrimitiveSet(self.read_draw_elements(IndexWidth::U16)?)
            }
            ObjectType::DrawElementsUByte => {
                ObjectKind::PrimitiveSet(self.read_draw_elements(IndexWidth::U8)?)
            }
            ObjectType::Vec2Array => ObjectKind::Array(self.read_array_object(ArrayType::Vec2f)?),
            ObjectType::Vec3Array => ObjectKind::Array(self.read_array_object(ArrayType::Vec3f)?),
            ObjectType::Vec4Array => ObjectKind::Array(self.read_array_object(ArrayType::Vec4f)?),
        };

        self.fill(handle, kind);
        Ok(())
    }
}
