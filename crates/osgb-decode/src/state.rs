//! Render state: state sets, materials, textures and images.

use glam::{DVec4, Vec4};

use crate::scene::ObjectId;

/// A GL mode and its on/off/override value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeValue {
    pub mode: u32,
    pub value: u32,
}

/// A state attribute (or uniform) and its override value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeBinding {
    pub attribute: ObjectId,
    pub value: u32,
}

/// Shader define attached to a state set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Define {
    pub name: String,
    pub value: String,
    pub flags: i32,
}

/// Which render bin a state set asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderingHint {
    #[default]
    DefaultBin,
    OpaqueBin,
    TransparentBin,
    Other(i32),
}

impl RenderingHint {
    #[must_use]
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::DefaultBin,
            1 => Self::OpaqueBin,
            2 => Self::TransparentBin,
            other => Self::Other(other),
        }
    }
}

/// Render attributes and modes, global and per texture unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSet {
    pub modes: Vec<ModeValue>,
    pub attributes: Vec<AttributeBinding>,
    pub texture_modes: Vec<Vec<ModeValue>>,
    pub texture_attributes: Vec<Vec<AttributeBinding>>,
    pub uniforms: Vec<AttributeBinding>,
    pub rendering_hint: RenderingHint,
    pub render_bin_mode: u32,
    pub bin_number: i32,
    pub bin_name: String,
    pub nest_render_bins: bool,
    pub update_callback: Option<ObjectId>,
    pub event_callback: Option<ObjectId>,
    pub defines: Vec<Define>,
}

/// Fields every state attribute carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateAttributeData {
    pub update_callback: Option<ObjectId>,
    pub event_callback: Option<ObjectId>,
}

/// A material color or scalar, possibly different front and back.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MaterialProperty<T> {
    pub front_and_back: bool,
    pub front: T,
    pub back: T,
}

/// Fixed-function material.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    pub attribute: StateAttributeData,
    pub color_mode: u32,
    pub ambient: Option<MaterialProperty<Vec4>>,
    pub diffuse: Option<MaterialProperty<Vec4>>,
    pub specular: Option<MaterialProperty<Vec4>>,
    pub emission: Option<MaterialProperty<Vec4>>,
    pub shininess: Option<MaterialProperty<f32>>,
}

/// Texture coordinate wrap mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WrapMode {
    Clamp,
    #[default]
    ClampToEdge,
    ClampToBorder,
    Repeat,
    Mirror,
    Other(u32),
}

impl WrapMode {
    #[must_use]
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0x2900 => Self::Clamp,
            0x812F => Self::ClampToEdge,
            0x812D => Self::ClampToBorder,
            0x2901 => Self::Repeat,
            0x8370 => Self::Mirror,
            other => Self::Other(other),
        }
    }

    /// The GL enum value.
    #[must_use]
    pub fn to_raw(self) -> u32 {
        match self {
            Self::Clamp => 0x2900,
            Self::ClampToEdge => 0x812F,
            Self::ClampToBorder => 0x812D,
            Self::Repeat => 0x2901,
            Self::Mirror => 0x8370,
            Self::Other(raw) => raw,
        }
    }
}

/// Fields of the generic texture layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Texture {
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub wrap_r: WrapMode,
    pub min_filter: Option<u32>,
    pub mag_filter: Option<u32>,
    pub max_anisotropy: f32,
    pub use_hardware_mipmap_generation: bool,
    pub unref_image_data_after_apply: bool,
    pub client_storage_hint: bool,
    pub resize_non_power_of_two_hint: bool,
    pub border_color: DVec4,
    pub border_width: i32,
    pub internal_format_mode: i32,
    pub internal_format: Option<u32>,
    pub source_format: Option<u32>,
    pub source_type: Option<u32>,
    pub shadow_comparison: bool,
    pub shadow_compare_func: u32,
    pub shadow_texture_mode: u32,
    pub shadow_ambient: f32,
    pub image_attachment: Option<[i32; 6]>,
    pub swizzle: Option<String>,
    pub min_lod: Option<f32>,
    pub max_lod: Option<f32>,
    pub lod_bias: Option<f32>,
}

/// Two-dimensional texture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Texture2D {
    pub attribute: StateAttributeData,
    pub texture: Texture,
    pub image: Option<ObjectId>,
    pub width: u32,
    pub height: u32,
}

/// Image whose file contents are embedded in the stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image<'a> {
    /// Class name written by newer streams.
    pub class_name: Option<String>,
    pub file_name: String,
    pub write_hint: u32,
    pub(crate) data: &'a [u8],
}

impl<'a> Image<'a> {
    /// The embedded file bytes, aliasing the input buffer.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_mode_round_trips_gl_values() {
        for raw in [0x2900, 0x812F, 0x812D, 0x2901, 0x8370, 0x1234] {
            assert_eq!(WrapMode::from_raw(raw).to_raw(), raw);
        }
        assert_eq!(WrapMode::from_raw(0x2901), WrapMode::Repeat);
    }

    #[test]
    fn rendering_hint_defaults_to_default_bin() {
        assert_eq!(StateSet::default().rendering_hint, RenderingHint::DefaultBin);
        assert_eq!(RenderingHint::from_raw(2), RenderingHint::TransparentBin);
    }
}
