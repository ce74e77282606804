use crate::dataset::common_structs::{Sample, SampleBatch};
use crate::dataset::data_loaders::sample_index::SampleIndex;
use crate::dataset::data_transformers::voc_annotation;
use crate::dataset::error::DatasetError;
use crate::dataset::image_ops;
use crate::dataset::iterator_adapters::batching::Batching;
use crate::dataset::DataLoader;
use std::path::{Path, PathBuf};

/// Lazy loader over one split of a VOC-layout dataset tree.
///
/// Construction reads only the manifest. Each iteration step decodes
/// `JPEGImages/<id>.jpg`, resizes it to `image_size` x `image_size`, scales
/// pixels to [0, 1] and parses `Annotations/<id>.xml`, in manifest order.
/// Nothing is cached, a second pass needs a new loader. A sample whose image
/// or annotation is missing or unreadable is yielded as `Err` at its turn;
/// earlier samples are unaffected.
#[derive(Debug)]
pub struct VocDataLoader {
    root: PathBuf,
    index: SampleIndex,
    image_size: u32,
    next_element_index: usize,
}

impl VocDataLoader {
    pub fn new(
        root: &Path,
        manifest_filename: &str,
        image_size: u32,
    ) -> Result<VocDataLoader, DatasetError> {
        let index = SampleIndex::from_manifest(root, manifest_filename)?;
        Ok(VocDataLoader {
            root: root.to_owned(),
            index,
            image_size,
            next_element_index: 0,
        })
    }

    /// Shuffles the remaining iteration order.
    pub fn shuffle_samples(&mut self) {
        self.index.shuffle();
    }

    pub fn sample_names(&self) -> &[String] {
        self.index.sample_names()
    }

    /// Groups consecutive samples into batches of `batch_size`; the final
    /// batch may be smaller. Box rows inside a batch keep their per-image
    /// lengths. The first failing sample of a group surfaces as that batch's
    /// `Err`.
    pub fn batched(
        self,
        batch_size: usize,
    ) -> impl Iterator<Item = Result<SampleBatch, DatasetError>> {
        self.batching(batch_size).map(|batch| {
            batch
                .into_iter()
                .collect::<Result<Vec<Sample>, DatasetError>>()
                .map(SampleBatch::from_samples)
        })
    }

    fn load_sample(&self, sample_name: &str) -> Result<Sample, DatasetError> {
        let image_path = self
            .root
            .join("JPEGImages")
            .join(format!("{}.jpg", sample_name));
        let resized = image_ops::load_and_resize(&image_path, self.image_size)?;
        let image = image_ops::to_unit_float(&resized);
        let annotation = voc_annotation::parse_annotation(&self.root, sample_name)?;
        Ok(Sample {
            image,
            boxes: annotation.boxes,
        })
    }
}

impl Iterator for VocDataLoader {
    type Item = Result<Sample, DatasetError>;

    fn next(&mut self) -> Option<Self::Item> {
        let sample_name = self
            .index
            .sample_names()
            .get(self.next_element_index)?
            .clone();
        self.next_element_index += 1;
        Some(self.load_sample(&sample_name))
    }
}

impl DataLoader for VocDataLoader {
    fn next_element_index(&self) -> usize {
        self.next_element_index
    }

    fn max_elem_index(&self) -> usize {
        self.index.len()
    }
}
