use lazy_static::lazy_static;
use std::collections::HashMap;

/// The 20 VOC2012 object classes. A class index is a position in this array.
pub const VOC_CLASSES: [&str; 20] = [
    "aeroplane",
    "bicycle",
    "bird",
    "boat",
    "bottle",
    "bus",
    "car",
    "cat",
    "chair",
    "cow",
    "diningtable",
    "dog",
    "horse",
    "motorbike",
    "person",
    "pottedplant",
    "sheep",
    "sofa",
    "train",
    "tvmonitor",
];

lazy_static! {
    static ref CLASS_INDEX: HashMap<&'static str, usize> = VOC_CLASSES
        .iter()
        .enumerate()
        .map(|(index, name)| (*name, index))
        .collect();
}

/// Exact match only, no case folding.
pub fn class_index(name: &str) -> Option<usize> {
    CLASS_INDEX.get(name).copied()
}

pub fn class_name(index: usize) -> Option<&'static str> {
    VOC_CLASSES.get(index).copied()
}
