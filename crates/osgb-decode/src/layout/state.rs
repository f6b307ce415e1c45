//! State set and state attribute layers.

use glam::DVec4;

use crate::decoder::Decoder;
use crate::dispatch::Family;
use crate::error::DecodeResult;
use crate::state::{
    AttributeBinding, Define, Material, MaterialProperty, ModeValue, RenderingHint, StateSet,
    StateAttributeData, Texture, Texture2D, WrapMode,
};
use crate::version;

impl Decoder<'_> {
    fn read_mode_list(&mut self) -> DecodeResult<Vec<ModeValue>> {
        let count = self.read_count()?;
        self.begin_bracket()?;
        let mut modes = Vec::with_capacity(self.capacity_for(count, 8));
        for _ in 0..count {
            modes.push(ModeValue {
                mode: self.reader.u32()?,
                value: self.reader.u32()?,
            });
        }
        Ok(modes)
    }

    /// Count, bracket, then (object, value) pairs. Pairs with no object are
    /// dropped.
    fn read_binding_list(&mut self, family: Family) -> DecodeResult<Vec<AttributeBinding>> {
        let count = self.read_count()?;
        self.begin_bracket()?;
        let mut bindings = Vec::with_capacity(self.capacity_for(count, 8));
        for _ in 0..count {
            let attribute = self.read_object_of(family)?;
            let value = self.reader.u32()?;
            if let Some(attribute) = attribute {
                bindings.push(AttributeBinding { attribute, value });
            }
        }
        Ok(bindings)
    }

    /// Presence flag, unit count, bracket, then one list per texture unit.
    fn read_per_unit<T>(
        &mut self,
        mut read_unit: impl FnMut(&mut Self) -> DecodeResult<Vec<T>>,
    ) -> DecodeResult<Vec<Vec<T>>> {
        if !self.reader.bool()? {
            return Ok(Vec::new());
        }
        let count = self.read_count()?;
        self.begin_bracket()?;
        let mut units = Vec::with_capacity(self.capacity_for(count, 4));
        for _ in 0..count {
            units.push(read_unit(self)?);
        }
        Ok(units)
    }

    pub(crate) fn read_state_set_layer(&mut self) -> DecodeResult<StateSet> {
        let modes = if self.reader.bool()? {
            self.read_mode_list()?
        } else {
            Vec::new()
        };
        let attributes = if self.reader.bool()? {
            self.read_binding_list(Family::StateAttribute)?
        } else {
            Vec::new()
        };
        let texture_modes = self.read_per_unit(Self::read_mode_list)?;
        let texture_attributes =
            self.read_per_unit(|decoder| decoder.read_binding_list(Family::StateAttribute))?;
        let uniforms = if self.reader.bool()? {
            self.read_binding_list(Family::Any)?
        } else {
            Vec::new()
        };

        let rendering_hint = RenderingHint::from_raw(self.reader.i32()?);
        let render_bin_mode = self.reader.u32()?;
        let bin_number = self.reader.i32()?;
        let bin_name = self.reader.string()?;
        let nest_render_bins = self.reader.bool()?;
        let update_callback = self.read_object_if_present(Family::Any)?;
        let event_callback = self.read_object_if_present(Family::Any)?;

        let mut defines = Vec::new();
        if version::has_state_set_defines(self.version()) && self.reader.bool()? {
            let count = self.read_count()?;
            self.begin_bracket()?;
            defines.reserve(self.capacity_for(count, 12));
            for _ in 0..count {
                defines.push(Define {
                    name: self.reader.string()?,
                    value: self.reader.string()?,
                    flags: self.reader.i32()?,
                });
            }
        }

        Ok(StateSet {
            modes,
            attributes,
            texture_modes,
            texture_attributes,
            uniforms,
            rendering_hint,
            render_bin_mode,
            bin_number,
            bin_name,
            nest_render_bins,
            update_callback,
            event_callback,
            defines,
        })
    }

    pub(crate) fn read_state_attribute_layer(&mut self) -> DecodeResult<StateAttributeData> {
        Ok(StateAttributeData {
            update_callback: self.read_object_if_present(Family::Any)?,
            event_callback: self.read_object_if_present(Family::Any)?,
        })
    }

    fn read_color_property(&mut self) -> DecodeResult<Option<MaterialProperty<glam::Vec4>>> {
        if !self.reader.bool()? {
            return Ok(None);
        }
        Ok(Some(MaterialProperty {
            front_and_back: self.reader.bool()?,
            front: self.reader.vec4()?,
            back: self.reader.vec4()?,
        }))
    }

    pub(crate) fn read_material_layer(
        &mut self,
        attribute: StateAttributeData,
    ) -> DecodeResult<Material> {
        let color_mode = self.reader.u32()?;
        let ambient = self.read_color_property()?;
        let diffuse = self.read_color_property()?;
        let specular = self.read_color_property()?;
        let emission = self.read_color_property()?;
        let shininess = if self.reader.bool()? {
            Some(MaterialProperty {
                front_and_back: self.reader.bool()?,
                front: self.reader.f32()?,
                back: self.reader.f32()?,
            })
        } else {
            None
        };

        Ok(Material {
            attribute,
            color_mode,
            ambient,
            diffuse,
            specular,
            emission,
            shininess,
        })
    }

    fn read_optional_u32(&mut self) -> DecodeResult<Option<u32>> {
        if self.reader.bool()? {
            self.reader.u32().map(Some)
        } else {
            Ok(None)
        }
    }

    fn read_wrap_mode(&mut self) -> DecodeResult<WrapMode> {
        Ok(self
            .read_optional_u32()?
            .map_or_else(WrapMode::default, WrapMode::from_raw))
    }

    pub(crate) fn read_texture_layer(&mut self) -> DecodeResult<Texture> {
        let mut texture = Texture {
            wrap_s: self.read_wrap_mode()?,
            wrap_t: self.read_wrap_mode()?,
            wrap_r: self.read_wrap_mode()?,
            min_filter: self.read_optional_u32()?,
            mag_filter: self.read_optional_u32()?,
            max_anisotropy: self.reader.f32()?,
            use_hardware_mipmap_generation: self.reader.bool()?,
            unref_image_data_after_apply: self.reader.bool()?,
            client_storage_hint: self.reader.bool()?,
            resize_non_power_of_two_hint: self.reader.bool()?,
            border_color: DVec4::new(
                self.reader.f64()?,
                self.reader.f64()?,
                self.reader.f64()?,
                self.reader.f64()?,
            ),
            border_width: self.reader.i32()?,
            internal_format_mode: self.reader.i32()?,
            internal_format: self.read_optional_u32()?,
            source_format: self.read_optional_u32()?,
            source_type: self.read_optional_u32()?,
            shadow_comparison: self.reader.bool()?,
            shadow_compare_func: self.reader.u32()?,
            shadow_texture_mode: self.reader.u32()?,
            shadow_ambient: self.reader.f32()?,
            ..Texture::default()
        };

        let version = self.version();
        if version::has_texture_image_attachment(version) && self.reader.bool()? {
            let mut attachment = [0; 6];
            for value in &mut attachment {
                *value = self.reader.i32()?;
            }
            texture.image_attachment = Some(attachment);
        }
        if version::has_texture_swizzle(version) && self.reader.bool()? {
            texture.swizzle = Some(self.reader.string()?);
        }
        if version::has_texture_lod(version) {
            texture.min_lod = Some(self.reader.f32()?);
            texture.max_lod = Some(self.reader.f32()?);
            texture.lod_bias = Some(self.reader.f32()?);
        }
        Ok(texture)
    }

    pub(crate) fn read_texture_2d_layer(
        &mut self,
        attribute: StateAttributeData,
        texture: Texture,
    ) -> DecodeResult<Texture2D> {
        Ok(Texture2D {
            attribute,
            texture,
            image: self.read_image()?,
            width: self.reader.u32()?,
            height: self.reader.u32()?,
        })
    }
}
