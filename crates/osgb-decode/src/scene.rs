//! The decoded object graph.
//!
//! Objects live in a flat arena and refer to each other by [`ObjectId`]. An
//! object referenced from several parents is stored once; every parent holds
//! the same handle.

use std::ops::Index;

use crate::geometry::{Array, Geometry, PrimitiveSet};
use crate::header::Header;
use crate::node::{Geode, Group, Lod, NodeData, PagedLod, UserDataContainer};
use crate::state::{Image, Material, StateSet, Texture2D};

/// Handle to an object in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Position in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One decoded object: the fields every object shares plus its variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Object<'a> {
    /// Identifier assigned by the stream. Inline primitive sets written by
    /// old streams have none.
    pub unique_id: Option<u32>,
    pub name: String,
    pub data_variance: u32,
    pub user_data: Option<ObjectId>,
    pub kind: ObjectKind<'a>,
}

impl<'a> Object<'a> {
    pub(crate) fn new(unique_id: Option<u32>, kind: ObjectKind<'a>) -> Self {
        Self {
            unique_id,
            name: String::new(),
            data_variance: 0,
            user_data: None,
            kind,
        }
    }

    #[must_use]
    pub fn class_name(&self) -> &'static str {
        self.kind.class_name()
    }
}

/// Every object variant the decoder understands.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind<'a> {
    Node(NodeData),
    Group(Group),
    Geode(Geode),
    Lod(Lod),
    PagedLod(PagedLod),
    Geometry(Geometry),
    PrimitiveSet(PrimitiveSet<'a>),
    Array(Array<'a>),
    StateSet(StateSet),
    Material(Material),
    Texture2D(Texture2D),
    Image(Image<'a>),
    UserDataContainer(UserDataContainer),
}

impl<'a> ObjectKind<'a> {
    #[must_use]
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Node(_) => "Node",
            Self::Group(_) => "Group",
            Self::Geode(_) => "Geode",
            Self::Lod(_) => "LOD",
            Self::PagedLod(_) => "PagedLOD",
            Self::Geometry(_) => "Geometry",
            Self::PrimitiveSet(_) => "PrimitiveSet",
            Self::Array(array) => array.array_type.class_name(),
            Self::StateSet(_) => "StateSet",
            Self::Material(_) => "Material",
            Self::Texture2D(_) => "Texture2D",
            Self::Image(_) => "Image",
            Self::UserDataContainer(_) => "DefaultUserDataContainer",
        }
    }

    /// Node-layer fields, for every variant that is a node.
    #[must_use]
    pub fn node(&self) -> Option<&NodeData> {
        match self {
            Self::Node(node) => Some(node),
            Self::Group(group) => Some(&group.node),
            Self::Geode(geode) => Some(&geode.node),
            Self::Lod(lod) => Some(&lod.node),
            Self::PagedLod(paged) => Some(&paged.lod.node),
            Self::Geometry(geometry) => Some(&geometry.node),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_node(&self) -> bool {
        self.node().is_some()
    }

    #[must_use]
    pub fn is_drawable(&self) -> bool {
        matches!(self, Self::Geometry(_))
    }

    #[must_use]
    pub fn is_state_attribute(&self) -> bool {
        matches!(self, Self::Material(_) | Self::Texture2D(_))
    }

    /// Child nodes of grouping variants; empty for everything else.
    #[must_use]
    pub fn children(&self) -> &[ObjectId] {
        match self {
            Self::Group(group) => &group.children,
            Self::Lod(lod) => &lod.children,
            Self::PagedLod(paged) => &paged.lod.children,
            _ => &[],
        }
    }

    #[must_use]
    pub fn as_geometry(&self) -> Option<&Geometry> {
        match self {
            Self::Geometry(geometry) => Some(geometry),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_state_set(&self) -> Option<&StateSet> {
        match self {
            Self::StateSet(state_set) => Some(state_set),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array<'a>> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_image(&self) -> Option<&Image<'a>> {
        match self {
            Self::Image(image) => Some(image),
            _ => None,
        }
    }
}

/// A fully decoded stream.
///
/// The scene borrows the input buffer: array elements, primitive indices and
/// image bytes are views into it rather than copies.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene<'a> {
    header: Header,
    objects: Vec<Object<'a>>,
    root: ObjectId,
}

impl<'a> Scene<'a> {
    pub(crate) fn new(header: Header, objects: Vec<Object<'a>>, root: ObjectId) -> Self {
        Self {
            header,
            objects,
            root,
        }
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    #[must_use]
    pub fn root(&self) -> ObjectId {
        self.root
    }

    #[must_use]
    pub fn root_object(&self) -> &Object<'a> {
        &self[self.root]
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&Object<'a>> {
        self.objects.get(id.index())
    }

    /// Number of distinct objects in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All objects in allocation order, paired with their handles.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &Object<'a>)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(index, object)| (ObjectId::from_index(index), object))
    }
}

impl<'a> Index<ObjectId> for Scene<'a> {
    type Output = Object<'a>;

    fn index(&self, id: ObjectId) -> &Self::Output {
        &self.objects[id.index()]
    }
}
