//! Scene-graph node types.

use glam::DVec3;

use crate::scene::ObjectId;

/// Bounding sphere stored as a node's initial bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: DVec3,
    pub radius: f32,
}

/// Fields shared by every node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub initial_bound: Option<BoundingSphere>,
    pub compute_bound_callback: Option<ObjectId>,
    pub update_callback: Option<ObjectId>,
    pub event_callback: Option<ObjectId>,
    pub cull_callback: Option<ObjectId>,
    pub culling_active: bool,
    pub node_mask: u32,
    /// Only present in streams older than [`crate::version::USER_DATA_CONTAINER`].
    pub descriptions: Vec<String>,
    pub state_set: Option<ObjectId>,
}

impl Default for NodeData {
    fn default() -> Self {
        Self {
            initial_bound: None,
            compute_bound_callback: None,
            update_callback: None,
            event_callback: None,
            cull_callback: None,
            culling_active: true,
            node_mask: u32::MAX,
            descriptions: Vec::new(),
            state_set: None,
        }
    }
}

/// Node with an ordered list of child nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub node: NodeData,
    pub children: Vec<ObjectId>,
}

/// Leaf node holding drawables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geode {
    pub node: NodeData,
    pub drawables: Vec<ObjectId>,
}

/// Visible distance range of one LOD child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

/// How an LOD node picks its center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CenterMode {
    #[default]
    UseBoundingSphereCenter,
    UserDefinedCenter,
    UnionOfBoundingSphereAndUserDefined,
    Other(i32),
}

impl CenterMode {
    #[must_use]
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::UseBoundingSphereCenter,
            1 => Self::UserDefinedCenter,
            2 => Self::UnionOfBoundingSphereAndUserDefined,
            other => Self::Other(other),
        }
    }
}

/// Level-of-detail node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lod {
    pub node: NodeData,
    pub children: Vec<ObjectId>,
    pub center_mode: CenterMode,
    pub user_defined_center: DVec3,
    pub user_defined_radius: f64,
    pub range_mode: u32,
    pub ranges: Vec<Range>,
}

/// External file and paging priority of one `PagedLOD` child.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeData {
    pub file_name: String,
    pub priority_offset: f32,
    pub priority_scale: f32,
}

/// LOD node whose children may live in external files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagedLod {
    pub lod: Lod,
    pub database_path: Option<String>,
    /// Only present in streams older than
    /// [`crate::version::PAGED_LOD_DROPS_FRAME_NUMBER`].
    pub frame_number_of_last_traversal: Option<u32>,
    pub num_children_that_cannot_be_expired: u32,
    pub disable_external_children_paging: bool,
    pub range_data: Vec<RangeData>,
}

/// Container for arbitrary user data attached to an object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDataContainer {
    pub user_data: Option<ObjectId>,
    pub descriptions: Vec<String>,
    pub user_objects: Vec<ObjectId>,
}
