use crate::dataset::common_structs::{AnnotationRecord, BoundingBox};
use crate::dataset::error::DatasetError;
use crate::dataset::voc_classes;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Mirror of one VOC annotation XML document, only the parts we read.
/// Unknown elements (pose, truncated, segmented, ...) are ignored by serde.
#[derive(Debug, Clone, PartialEq, Deserialize)]
struct XmlAnnotation {
    size: XmlSize,
    #[serde(rename = "object", default)]
    objects: Vec<XmlObject>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct XmlSize {
    width: u32,
    height: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct XmlObject {
    name: String,
    bndbox: XmlBndBox,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct XmlBndBox {
    xmin: i32,
    ymin: i32,
    xmax: i32,
    ymax: i32,
}

/// Parses `<root>/Annotations/<sample_id>.xml`. Box coordinates are trusted
/// as-is, matching the annotation tool's output.
pub fn parse_annotation(root: &Path, sample_id: &str) -> Result<AnnotationRecord, DatasetError> {
    parse_annotation_checked(root, sample_id, false)
}

/// Like [`parse_annotation`] but with `validate_boxes` set, additionally
/// requires xmin <= xmax and ymin <= ymax on every box.
pub fn parse_annotation_checked(
    root: &Path,
    sample_id: &str,
    validate_boxes: bool,
) -> Result<AnnotationRecord, DatasetError> {
    let xml_path = root.join("Annotations").join(format!("{}.xml", sample_id));
    if !xml_path.exists() {
        return Err(DatasetError::missing(&xml_path));
    }
    let raw = fs::read_to_string(&xml_path).map_err(|e| DatasetError::io(&xml_path, e))?;
    annotation_from_xml(&raw, validate_boxes)
        .map_err(|err| match err {
            // attach the file path to structural errors surfaced from the body
            DatasetError::Malformed { detail, .. } => DatasetError::malformed(&xml_path, detail),
            other => other,
        })
}

/// Parses one annotation document from its XML text.
///
/// Every `<object>` becomes a box in document order. Class names resolve
/// through the fixed vocabulary, x coordinates are divided by the image
/// width and y coordinates by the image height.
pub fn annotation_from_xml(
    xml: &str,
    validate_boxes: bool,
) -> Result<AnnotationRecord, DatasetError> {
    let parsed: XmlAnnotation = serde_xml_rs::from_str(xml).map_err(|e| DatasetError::Malformed {
        source: "annotation xml".to_owned(),
        detail: e.to_string(),
    })?;

    if parsed.size.width == 0 || parsed.size.height == 0 {
        return Err(DatasetError::Malformed {
            source: "annotation xml".to_owned(),
            detail: format!(
                "image size must be positive, got {}x{}",
                parsed.size.width, parsed.size.height
            ),
        });
    }
    let width = parsed.size.width as f32;
    let height = parsed.size.height as f32;

    let mut boxes = Vec::with_capacity(parsed.objects.len());
    for object in &parsed.objects {
        let class_index =
            voc_classes::class_index(&object.name).ok_or_else(|| DatasetError::UnknownClass {
                name: object.name.clone(),
            })?;
        let bndbox = &object.bndbox;
        if validate_boxes && (bndbox.xmin > bndbox.xmax || bndbox.ymin > bndbox.ymax) {
            return Err(DatasetError::Malformed {
                source: "annotation xml".to_owned(),
                detail: format!(
                    "box for `{}` has inverted corners: ({}, {}) x ({}, {})",
                    object.name, bndbox.xmin, bndbox.ymin, bndbox.xmax, bndbox.ymax
                ),
            });
        }
        boxes.push(BoundingBox {
            xmin: bndbox.xmin as f32 / width,
            ymin: bndbox.ymin as f32 / height,
            xmax: bndbox.xmax as f32 / width,
            ymax: bndbox.ymax as f32 / height,
            class: class_index as f32,
        });
    }

    Ok(AnnotationRecord {
        width: parsed.size.width,
        height: parsed.size.height,
        boxes,
    })
}
