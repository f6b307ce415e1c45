//! Human-readable scene dump.
//!
//! Each object prints as `Class(id) { ... }` with one section per layer it
//! has. An object already printed earlier in the walk prints as
//! `Class(id) {...}` so shared subgraphs appear once.

use std::collections::HashSet;
use std::fmt::Display;
use std::io::{self, Write};

use osgb_decode::state::{AttributeBinding, MaterialProperty};
use osgb_decode::{Geometry, NodeData, Object, ObjectId, ObjectKind, Scene};

/// Write the graph reachable from the scene's root.
pub fn write_scene<W: Write>(scene: &Scene<'_>, writer: &mut W) -> io::Result<()> {
    let mut dumper = Dumper {
        scene,
        visited: HashSet::new(),
        out: writer,
    };
    dumper.object(Some(scene.root()), 0)
}

struct Dumper<'s, 'a, W> {
    scene: &'s Scene<'a>,
    visited: HashSet<ObjectId>,
    out: &'s mut W,
}

fn label(object: &Object<'_>) -> String {
    match object.unique_id {
        Some(id) => format!("{}({id})", object.class_name()),
        None => format!("{}(-)", object.class_name()),
    }
}

impl<W: Write> Dumper<'_, '_, W> {
    fn object(&mut self, id: Option<ObjectId>, level: usize) -> io::Result<()> {
        let Some(id) = id else {
            return writeln!(self.out, "NULL");
        };
        let scene = self.scene;
        let object = &scene[id];
        if !self.visited.insert(id) {
            return writeln!(self.out, "{} {{...}}", label(object));
        }

        writeln!(self.out, "{} {{", label(object))?;
        let indent = "  ".repeat(level + 1);
        if !object.name.is_empty() {
            writeln!(self.out, "{indent}Name= {:?}", object.name)?;
        }
        if object.user_data.is_some() {
            write!(self.out, "{indent}UserData= ")?;
            self.object(object.user_data, level + 1)?;
        }
        if let Some(node) = object.kind.node() {
            self.node(node, &indent, level)?;
        }

        match &object.kind {
            ObjectKind::Group(group) => {
                self.list(&indent, "Children", "Child", &group.children, level)?;
            }
            ObjectKind::Geode(geode) => {
                self.list(&indent, "Drawables", "Drawable", &geode.drawables, level)?;
            }
            ObjectKind::Lod(lod) => {
                writeln!(self.out, "{indent}<LOD>")?;
                writeln!(self.out, "{indent}CenterMode= {:?}", lod.center_mode)?;
                writeln!(self.out, "{indent}UserDefinedCenter= {}", lod.user_defined_center)?;
                writeln!(self.out, "{indent}UserDefinedRadius= {}", lod.user_defined_radius)?;
                for range in &lod.ranges {
                    writeln!(self.out, "{indent}Range= [{}, {}]", range.min, range.max)?;
                }
                self.list(&indent, "Children", "Child", &lod.children, level)?;
            }
            ObjectKind::PagedLod(paged) => {
                writeln!(self.out, "{indent}<PagedLOD>")?;
                if let Some(path) = &paged.database_path {
                    writeln!(self.out, "{indent}DatabasePath= {path:?}")?;
                }
                for range in &paged.lod.ranges {
                    writeln!(self.out, "{indent}Range= [{}, {}]", range.min, range.max)?;
                }
                for (i, data) in paged.range_data.iter().enumerate() {
                    writeln!(
                        self.out,
                        "{indent}RangeData {i}: {:?} PriorityOffset= {} PriorityScale= {}",
                        data.file_name, data.priority_offset, data.priority_scale
                    )?;
                }
                self.list(&indent, "Children", "Child", &paged.lod.children, level)?;
            }
            ObjectKind::Geometry(geometry) => self.geometry(geometry, &indent, level)?,
            ObjectKind::PrimitiveSet(primitive) => {
                writeln!(self.out, "{indent}<PrimitiveSet>")?;
                writeln!(self.out, "{indent}Mode= {}", primitive.mode)?;
                writeln!(self.out, "{indent}IndexWidth= {:?}", primitive.index_width)?;
                writeln!(self.out, "{indent}IndexCount= {}", primitive.index_count())?;
            }
            ObjectKind::Array(array) => {
                writeln!(self.out, "{indent}<Array>")?;
                writeln!(self.out, "{indent}Type= {}", array.array_type.class_name())?;
                writeln!(self.out, "{indent}Binding= {:?}", array.binding)?;
                writeln!(self.out, "{indent}Normalize= {}", array.normalize)?;
                writeln!(self.out, "{indent}Count= {}", array.element_count())?;
            }
            ObjectKind::StateSet(state_set) => {
                writeln!(self.out, "{indent}<StateSet>")?;
                writeln!(self.out, "{indent}Modes= {}", state_set.modes.len())?;
                self.bindings(&indent, "Attributes", &state_set.attributes, level)?;
                for (unit, bindings) in state_set.texture_attributes.iter().enumerate() {
                    self.bindings(&indent, &format!("TextureUnit {unit}"), bindings, level)?;
                }
                writeln!(self.out, "{indent}RenderingHint= {:?}", state_set.rendering_hint)?;
            }
            ObjectKind::Material(material) => {
                writeln!(self.out, "{indent}<Material>")?;
                writeln!(self.out, "{indent}ColorMode= 0x{:x}", material.color_mode)?;
                self.material_property(&indent, "Ambient", material.ambient)?;
                self.material_property(&indent, "Diffuse", material.diffuse)?;
                self.material_property(&indent, "Specular", material.specular)?;
                self.material_property(&indent, "Emission", material.emission)?;
                self.material_property(&indent, "Shininess", material.shininess)?;
            }
            ObjectKind::Texture2D(texture) => {
                writeln!(self.out, "{indent}<Texture2D>")?;
                let wraps = [
                    ("WrapS", texture.texture.wrap_s),
                    ("WrapT", texture.texture.wrap_t),
                    ("WrapR", texture.texture.wrap_r),
                ];
                for (axis, mode) in wraps {
                    writeln!(self.out, "{indent}{axis}= {mode:?} (0x{:x})", mode.to_raw())?;
                }
                writeln!(self.out, "{indent}Size= {}x{}", texture.width, texture.height)?;
                write!(self.out, "{indent}Image= ")?;
                self.object(texture.image, level + 1)?;
            }
            ObjectKind::Image(image) => {
                writeln!(self.out, "{indent}<Image>")?;
                writeln!(self.out, "{indent}FileName= {:?}", image.file_name)?;
                writeln!(self.out, "{indent}DataLength= {}", image.data().len())?;
            }
            ObjectKind::UserDataContainer(container) => {
                writeln!(self.out, "{indent}<UserDataContainer>")?;
                for description in &container.descriptions {
                    writeln!(self.out, "{indent}Description= {description:?}")?;
                }
                self.list(&indent, "UserObjects", "Object", &container.user_objects, level)?;
            }
            ObjectKind::Node(_) => {}
        }

        writeln!(self.out, "{}}}", "  ".repeat(level))
    }

    fn node(&mut self, node: &NodeData, indent: &str, level: usize) -> io::Result<()> {
        writeln!(self.out, "{indent}<Node>")?;
        if let Some(bound) = node.initial_bound {
            writeln!(self.out, "{indent}Bound= {} r={}", bound.center, bound.radius)?;
        }
        write!(self.out, "{indent}StateSet= ")?;
        self.object(node.state_set, level + 1)
    }

    fn geometry(&mut self, geometry: &Geometry, indent: &str, level: usize) -> io::Result<()> {
        writeln!(self.out, "{indent}<Geometry>")?;
        self.list(indent, "Primitives", "Primitive", &geometry.primitives, level)?;
        write!(self.out, "{indent}VertexData= ")?;
        self.object(geometry.vertices, level + 1)?;
        write!(self.out, "{indent}NormalData= ")?;
        self.object(geometry.normals, level + 1)?;
        write!(self.out, "{indent}ColorData= ")?;
        self.object(geometry.colors, level + 1)?;

        writeln!(self.out, "{indent}TexCoordData= {} [", geometry.tex_coords.len())?;
        for (i, unit) in geometry.tex_coords.iter().enumerate() {
            write!(self.out, "{indent}  TexCoord {i}: ")?;
            self.object(*unit, level + 2)?;
        }
        writeln!(self.out, "{indent}]")
    }

    /// Attributes with the override value each was bound with.
    fn bindings(
        &mut self,
        indent: &str,
        heading: &str,
        bindings: &[AttributeBinding],
        level: usize,
    ) -> io::Result<()> {
        writeln!(self.out, "{indent}{heading}= {} [", bindings.len())?;
        for (i, binding) in bindings.iter().enumerate() {
            write!(self.out, "{indent}  Attribute {i}: value=0x{:x} ", binding.value)?;
            self.object(Some(binding.attribute), level + 2)?;
        }
        writeln!(self.out, "{indent}]")
    }

    fn material_property<T: Display>(
        &mut self,
        indent: &str,
        name: &str,
        property: Option<MaterialProperty<T>>,
    ) -> io::Result<()> {
        let Some(property) = property else {
            return Ok(());
        };
        if property.front_and_back {
            writeln!(self.out, "{indent}{name}= {}", property.front)
        } else {
            writeln!(
                self.out,
                "{indent}{name}= front {} back {}",
                property.front, property.back
            )
        }
    }

    fn list(
        &mut self,
        indent: &str,
        heading: &str,
        item: &str,
        ids: &[ObjectId],
        level: usize,
    ) -> io::Result<()> {
        writeln!(self.out, "{indent}{heading}= {} [", ids.len())?;
        for (i, &id) in ids.iter().enumerate() {
            write!(self.out, "{indent}  {item} {i}: ")?;
            self.object(Some(id), level + 2)?;
        }
        writeln!(self.out, "{indent}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{
        material_texture_state, paged_lod_scene, shared_state_scene, triangle_scene,
    };

    fn dump(bytes: &[u8]) -> String {
        let scene = osgb_decode::decode(bytes).unwrap();
        let mut out = Vec::new();
        write_scene(&scene, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn shared_objects_print_once() {
        let text = dump(&shared_state_scene());
        assert!(text.starts_with("Group(1) {\n"));
        assert_eq!(text.matches("StateSet(7) {\n").count(), 1);
        assert_eq!(text.matches("StateSet(7) {...}").count(), 1);
        assert!(text.trim_end().ends_with('}'));
    }

    #[test]
    fn missing_references_print_null() {
        let text = dump(&crate::test_util::minimal_group());
        assert!(text.contains("StateSet= NULL"));
        assert!(text.contains("Children= 0 ["));
    }

    #[test]
    fn arrays_print_type_and_normalize() {
        let text = dump(&triangle_scene());
        assert!(text.contains("Type= Vec3Array\n"));
        assert!(text.contains("Normalize= false\n"));
    }

    #[test]
    fn state_attributes_print_values_and_properties() {
        let text = dump(&material_texture_state());
        assert!(text.contains("Attribute 0: value=0x2 Material(2) {"));
        assert!(text.contains("Attribute 0: value=0x1 Texture2D(3) {"));
        assert!(text.contains("Ambient= front [0.1, 0.2, 0.3, 1] back [0, 0, 0, 1]\n"));
        assert!(text.contains("Specular= [1, 1, 1, 1]\n"));
        assert!(text.contains("Shininess= 32\n"));
        assert!(!text.contains("Diffuse="));
        assert!(text.contains("WrapS= ClampToEdge (0x812f)\n"));
        assert!(text.contains("WrapT= Repeat (0x2901)\n"));
        assert!(text.contains("WrapR= ClampToEdge (0x812f)\n"));
    }

    #[test]
    fn paged_lod_prints_priorities() {
        let text = dump(&paged_lod_scene());
        assert!(text.contains(
            "RangeData 0: \"child_L1.osgb\" PriorityOffset= 0.5 PriorityScale= 2\n"
        ));
    }
}
