use crate::dataset::error::DatasetError;
use rand::seq::SliceRandom;
use rand::thread_rng;
use std::fs;
use std::path::Path;

/// The ordered sample identifiers of one dataset split, read from a manifest
/// at `<root>/ImageSets/Main/<filename>`. Each identifier is the filename
/// stem shared by a `JPEGImages/<id>.jpg` and an `Annotations/<id>.xml`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleIndex {
    sample_names: Vec<String>,
}

impl SampleIndex {
    /// One identifier per manifest line, trailing whitespace stripped.
    /// Blank lines are skipped: an empty identifier can never resolve to a
    /// sample on disk.
    pub fn from_manifest(root: &Path, filename: &str) -> Result<SampleIndex, DatasetError> {
        let manifest_path = root.join("ImageSets").join("Main").join(filename);
        if !manifest_path.exists() {
            return Err(DatasetError::missing(&manifest_path));
        }
        let raw =
            fs::read_to_string(&manifest_path).map_err(|e| DatasetError::io(&manifest_path, e))?;
        let sample_names = raw
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();
        Ok(SampleIndex { sample_names })
    }

    pub fn sample_names(&self) -> &[String] {
        &self.sample_names
    }

    pub fn len(&self) -> usize {
        self.sample_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sample_names.is_empty()
    }

    /// Permutes the identifier order in place. Iteration order of a loader
    /// built on this index follows the permuted order.
    pub fn shuffle(&mut self) {
        self.sample_names.shuffle(&mut thread_rng());
    }
}
