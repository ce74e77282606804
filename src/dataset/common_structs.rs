use serde::{Deserialize, Serialize};
/// Frequently used structs in the provided data transformers/loaders

/// An axis-aligned bounding box with coordinates normalized to [0, 1] relative
/// to the width/height of the image it was annotated on. `class` is an index
/// into [`voc_classes::VOC_CLASSES`](super::voc_classes::VOC_CLASSES), stored
/// as the same numeric type as the coordinates so a box flattens to one
/// fixed-width row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub xmin: f32,
    pub ymin: f32,
    pub xmax: f32,
    pub ymax: f32,
    pub class: f32,
}

impl BoundingBox {
    pub fn as_array(&self) -> [f32; 5] {
        [self.xmin, self.ymin, self.xmax, self.ymax, self.class]
    }
}

/// One parsed annotation file: the annotated image dimensions in pixels and
/// the boxes in document order. An image with no objects has an empty `boxes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub width: u32,
    pub height: u32,
    pub boxes: Vec<BoundingBox>,
}

/// A decoded image as a row-major height x width x channels buffer of floats
/// in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    pub data: Vec<f32>,
    pub width: u32,
    pub height: u32,
    pub channels: u32,
}

/// One dataset element: the decoded image and its boxes.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub image: ImageTensor,
    pub boxes: Vec<BoundingBox>,
}

/// A group of consecutive samples. Images all share one shape and could be
/// stacked; box rows have per-image lengths and stay jagged.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBatch {
    pub images: Vec<ImageTensor>,
    pub boxes: Vec<Vec<BoundingBox>>,
}

impl SampleBatch {
    pub fn from_samples(samples: Vec<Sample>) -> SampleBatch {
        let mut images = Vec::with_capacity(samples.len());
        let mut boxes = Vec::with_capacity(samples.len());
        for sample in samples {
            images.push(sample.image);
            boxes.push(sample.boxes);
        }
        SampleBatch { images, boxes }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
