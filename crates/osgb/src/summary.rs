//! Machine-readable scene summary.

use std::collections::BTreeMap;

use glam::Vec3;
use osgb_decode::{ArrayType, ObjectKind, Scene, StreamKind};
use serde_json::{Value, json};

/// Per-class counts, payload sizes and the bounds of every 3D vertex array.
#[must_use]
pub fn summarize(scene: &Scene<'_>) -> Value {
    let mut classes: BTreeMap<&str, usize> = BTreeMap::new();
    let mut array_bytes = 0;
    let mut index_bytes = 0;
    let mut image_bytes = 0;
    let mut bounds: Option<(Vec3, Vec3)> = None;

    for (_, object) in scene.objects() {
        *classes.entry(object.class_name()).or_default() += 1;
        match &object.kind {
            ObjectKind::Array(array) => {
                array_bytes += array.element_data().len();
                if array.array_type == ArrayType::Vec3f {
                    for i in 0..array.element_count() {
                        if let Some(point) = array.read_floats::<3>(i).map(Vec3::from_array) {
                            bounds = Some(match bounds {
                                Some((min, max)) => (min.min(point), max.max(point)),
                                None => (point, point),
                            });
                        }
                    }
                }
            }
            ObjectKind::PrimitiveSet(primitive) => index_bytes += primitive.index_data().len(),
            ObjectKind::Image(image) => image_bytes += image.data().len(),
            _ => {}
        }
    }

    let header = scene.header();
    let stream_kind = match header.kind {
        StreamKind::Scene => "scene".to_owned(),
        StreamKind::Image => "image".to_owned(),
        StreamKind::Object => "object".to_owned(),
        StreamKind::Other(raw) => format!("other({raw})"),
    };

    json!({
        "version": header.version,
        "stream_kind": stream_kind,
        "root": scene.root_object().class_name(),
        "objects": scene.len(),
        "classes": classes,
        "payload_bytes": {
            "arrays": array_bytes,
            "indices": index_bytes,
            "images": image_bytes,
        },
        "vertex_bounds": bounds.map(|(min, max)| json!({
            "min": min.to_array(),
            "max": max.to_array(),
        })),
    })
}
