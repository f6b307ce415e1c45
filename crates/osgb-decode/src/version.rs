//! Format version boundaries.
//!
//! The header's version field changes the wire layout of several types. Each
//! boundary is named here and tested on both sides; layout code calls the
//! predicates rather than comparing against literals.

/// Object user data becomes a presence-guarded container; nodes lose their
/// description list.
pub const USER_DATA_CONTAINER: u32 = 77;

/// `PagedLOD` stops writing the frame number of its last traversal.
pub const PAGED_LOD_DROPS_FRAME_NUMBER: u32 = 70;

/// Images written above this version carry their class name.
pub const IMAGE_CLASS_NAME_AFTER: u32 = 94;

/// Textures gain an optional six-int image attachment block.
pub const TEXTURE_IMAGE_ATTACHMENT: u32 = 95;

/// Textures gain an optional swizzle string.
pub const TEXTURE_SWIZZLE: u32 = 98;

/// Geometry primitives and vertex arrays become ordinary dispatched objects.
pub const GEOMETRY_OBJECT_ARRAYS: u32 = 112;

/// Bracket markers widen from 4 to 8 bytes above this version.
pub const WIDE_BRACKETS_AFTER: u32 = 148;

/// State sets gain a define list.
pub const STATE_SET_DEFINES: u32 = 151;

/// Geometry is serialized with a Node layer; textures drop the image
/// attachment block.
pub const GEOMETRY_NODE_LAYER: u32 = 154;

/// Textures gain min/max LOD and LOD bias.
pub const TEXTURE_LOD: u32 = 155;

#[must_use]
pub const fn has_user_data_container(version: u32) -> bool {
    version >= USER_DATA_CONTAINER
}

#[must_use]
pub const fn has_node_descriptions(version: u32) -> bool {
    version < USER_DATA_CONTAINER
}

#[must_use]
pub const fn has_paged_lod_frame_number(version: u32) -> bool {
    version < PAGED_LOD_DROPS_FRAME_NUMBER
}

#[must_use]
pub const fn has_image_class_name(version: u32) -> bool {
    version > IMAGE_CLASS_NAME_AFTER
}

#[must_use]
pub const fn has_texture_image_attachment(version: u32) -> bool {
    version >= TEXTURE_IMAGE_ATTACHMENT && version < GEOMETRY_NODE_LAYER
}

#[must_use]
pub const fn has_texture_swizzle(version: u32) -> bool {
    version >= TEXTURE_SWIZZLE
}

#[must_use]
pub const fn has_geometry_object_arrays(version: u32) -> bool {
    version >= GEOMETRY_OBJECT_ARRAYS
}

/// Width in bytes of a bracket marker.
#[must_use]
pub const fn bracket_width(version: u32) -> usize {
    if version > WIDE_BRACKETS_AFTER { 8 } else { 4 }
}

#[must_use]
pub const fn has_state_set_defines(version: u32) -> bool {
    version >= STATE_SET_DEFINES
}

#[must_use]
pub const fn has_geometry_node_layer(version: u32) -> bool {
    version >= GEOMETRY_NODE_LAYER
}

#[must_use]
pub const fn has_texture_lod(version: u32) -> bool {
    version >= TEXTURE_LOD
}
