use crate::dataset::error::DatasetError;
use byteorder::{BigEndian, ReadBytesExt};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

pub const IMAGE_ROWS: usize = 28;
pub const IMAGE_COLS: usize = 28;

const TRAIN_IMAGES_FILE: &str = "train-images-idx3-ubyte";
const TRAIN_LABELS_FILE: &str = "train-labels-idx1-ubyte";
const TEST_IMAGES_FILE: &str = "t10k-images-idx3-ubyte";
const TEST_LABELS_FILE: &str = "t10k-labels-idx1-ubyte";

/// Index-aligned images and labels of one split. Each image is a flat
/// row-major 28*28 byte vector.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledImageSet {
    images: Vec<Vec<u8>>,
    labels: Vec<u8>,
}

impl LabeledImageSet {
    pub fn images(&self) -> &[Vec<u8>] {
        &self.images
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The 2D view of one image: 28 rows of 28 pixels.
    pub fn image_grid(&self, index: usize) -> Vec<&[u8]> {
        self.images[index].chunks(IMAGE_COLS).collect()
    }
}

/// Train and test splits of the digit corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct MnistDataset {
    pub train: LabeledImageSet,
    pub test: LabeledImageSet,
}

/// Reads one image/label file pair.
///
/// Label file: big-endian header (magic u32, count u32), then `count` label
/// bytes. Image file: big-endian header (magic u32, count u32, rows u32,
/// cols u32), then pixel bytes. The number of images read is the LABEL
/// file's count and each record is exactly 28*28 bytes; the image header's
/// own count/rows/cols and both magic values are read but not checked, so a
/// disagreeing pair silently truncates or fails mid-payload.
pub fn read_data(image_path: &Path, label_path: &Path) -> Result<LabeledImageSet, DatasetError> {
    let mut label_reader = BufReader::new(open_file(label_path)?);
    let _magic = read_header_u32(&mut label_reader, label_path)?;
    let count = read_header_u32(&mut label_reader, label_path)?;
    let mut labels = vec![0u8; count as usize];
    read_payload(&mut label_reader, &mut labels, label_path)?;

    let mut image_reader = BufReader::new(open_file(image_path)?);
    for _ in 0..4 {
        read_header_u32(&mut image_reader, image_path)?;
    }
    let mut images = Vec::with_capacity(labels.len());
    for _ in 0..labels.len() {
        let mut pixels = vec![0u8; IMAGE_ROWS * IMAGE_COLS];
        read_payload(&mut image_reader, &mut pixels, image_path)?;
        images.push(pixels);
    }

    Ok(LabeledImageSet { images, labels })
}

/// Reads both splits from a folder using the conventional file names.
pub fn load_dataset(dataset_path: &Path) -> Result<MnistDataset, DatasetError> {
    let train = read_data(
        &dataset_path.join(TRAIN_IMAGES_FILE),
        &dataset_path.join(TRAIN_LABELS_FILE),
    )?;
    let test = read_data(
        &dataset_path.join(TEST_IMAGES_FILE),
        &dataset_path.join(TEST_LABELS_FILE),
    )?;
    Ok(MnistDataset { train, test })
}

fn open_file(path: &Path) -> Result<File, DatasetError> {
    File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            DatasetError::missing(path)
        } else {
            DatasetError::io(path, e)
        }
    })
}

fn read_header_u32<R: Read>(reader: &mut R, path: &Path) -> Result<u32, DatasetError> {
    reader
        .read_u32::<BigEndian>()
        .map_err(|e| truncated_or_io(path, e))
}

fn read_payload<R: Read>(reader: &mut R, buf: &mut [u8], path: &Path) -> Result<(), DatasetError> {
    reader
        .read_exact(buf)
        .map_err(|e| truncated_or_io(path, e))
}

fn truncated_or_io(path: &Path, err: std::io::Error) -> DatasetError {
    if err.kind() == ErrorKind::UnexpectedEof {
        DatasetError::malformed(path, "file shorter than its declared length")
    } else {
        DatasetError::io(path, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::test_util::scratch_dir;
    use byteorder::{BigEndian, WriteBytesExt};
    use std::fs;
    use std::path::PathBuf;

    fn write_label_file(path: &Path, labels: &[u8]) {
        let mut bytes = vec![];
        bytes.write_u32::<BigEndian>(2049).unwrap();
        bytes.write_u32::<BigEndian>(labels.len() as u32).unwrap();
        bytes.extend_from_slice(labels);
        fs::write(path, bytes).unwrap();
    }

    fn write_image_file(path: &Path, count: u32, pixels: &[u8]) {
        let mut bytes = vec![];
        bytes.write_u32::<BigEndian>(2051).unwrap();
        bytes.write_u32::<BigEndian>(count).unwrap();
        bytes.write_u32::<BigEndian>(IMAGE_ROWS as u32).unwrap();
        bytes.write_u32::<BigEndian>(IMAGE_COLS as u32).unwrap();
        bytes.extend_from_slice(pixels);
        fs::write(path, bytes).unwrap();
    }

    fn write_pair(dir: &Path, image_file: &str, label_file: &str, labels: &[u8]) -> (PathBuf, PathBuf) {
        let image_path = dir.join(image_file);
        let label_path = dir.join(label_file);
        write_label_file(&label_path, labels);
        let pixels: Vec<u8> = (0..labels.len() * IMAGE_ROWS * IMAGE_COLS)
            .map(|i| (i % 251) as u8)
            .collect();
        write_image_file(&image_path, labels.len() as u32, &pixels);
        (image_path, label_path)
    }

    #[test]
    fn reads_parallel_images_and_labels() {
        let dir = scratch_dir("mnist_read");
        let (image_path, label_path) = write_pair(&dir, "imgs", "lbls", &[7, 2, 9]);

        let set = read_data(&image_path, &label_path).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.images().len(), set.labels().len());
        assert_eq!(set.labels(), [7, 2, 9]);
        for image in set.images() {
            assert_eq!(image.len(), 784);
        }
        assert_eq!(set.images()[0][0], 0);
        assert_eq!(set.images()[1][0], (784 % 251) as u8);
    }

    #[test]
    fn image_grid_is_28_by_28() {
        let dir = scratch_dir("mnist_grid");
        let (image_path, label_path) = write_pair(&dir, "imgs", "lbls", &[1]);

        let set = read_data(&image_path, &label_path).unwrap();
        let grid = set.image_grid(0);
        assert_eq!(grid.len(), 28);
        assert!(grid.iter().all(|row| row.len() == 28));
        assert_eq!(grid[1][0], (28 % 251) as u8);
    }

    #[test]
    fn label_count_governs_how_much_is_read() {
        // image header claims 5 records but only labels.len() = 2 are read
        let dir = scratch_dir("mnist_count");
        let label_path = dir.join("lbls");
        let image_path = dir.join("imgs");
        write_label_file(&label_path, &[3, 4]);
        let pixels = vec![0u8; 5 * IMAGE_ROWS * IMAGE_COLS];
        write_image_file(&image_path, 5, &pixels);

        let set = read_data(&image_path, &label_path).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn truncated_image_payload_fails() {
        let dir = scratch_dir("mnist_truncated");
        let label_path = dir.join("lbls");
        let image_path = dir.join("imgs");
        write_label_file(&label_path, &[1, 2, 3]);
        let pixels = vec![0u8; 2 * IMAGE_ROWS * IMAGE_COLS];
        write_image_file(&image_path, 3, &pixels);

        let err = read_data(&image_path, &label_path).unwrap_err();
        assert!(matches!(err, DatasetError::Malformed { .. }));
    }

    #[test]
    fn truncated_header_fails() {
        let dir = scratch_dir("mnist_short_header");
        let label_path = dir.join("lbls");
        let image_path = dir.join("imgs");
        write_label_file(&label_path, &[1]);
        fs::write(&image_path, [0u8; 6]).unwrap();

        let err = read_data(&image_path, &label_path).unwrap_err();
        assert!(matches!(err, DatasetError::Malformed { .. }));
    }

    #[test]
    fn missing_file_fails() {
        let dir = scratch_dir("mnist_missing");
        let label_path = dir.join("lbls");
        write_label_file(&label_path, &[1]);

        let err = read_data(&dir.join("imgs"), &label_path).unwrap_err();
        assert!(matches!(err, DatasetError::MissingFile { .. }));
    }

    #[test]
    fn load_dataset_reads_both_splits_by_convention() {
        let dir = scratch_dir("mnist_load_dataset");
        write_pair(&dir, TRAIN_IMAGES_FILE, TRAIN_LABELS_FILE, &[0, 1, 2, 3]);
        write_pair(&dir, TEST_IMAGES_FILE, TEST_LABELS_FILE, &[4, 5]);

        let dataset = load_dataset(&dir).unwrap();
        assert_eq!(dataset.train.len(), 4);
        assert_eq!(dataset.test.len(), 2);

        fs::remove_file(dir.join(TEST_LABELS_FILE)).unwrap();
        let err = load_dataset(&dir).unwrap_err();
        assert!(matches!(err, DatasetError::MissingFile { .. }));
    }
}
