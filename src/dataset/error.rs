use failure::Fail;

/// Errors surfaced by the dataset readers. All of them abort the read of the
/// record/sample they occurred in; there is no retry or substitution.
#[derive(Debug, Fail)]
pub enum DatasetError {
    #[fail(display = "file not found: {}", path)]
    MissingFile { path: String },
    #[fail(display = "malformed data in {}: {}", source, detail)]
    Malformed { source: String, detail: String },
    #[fail(display = "class name not in vocabulary: {}", name)]
    UnknownClass { name: String },
    #[fail(display = "io error on {}: {}", path, detail)]
    Io { path: String, detail: String },
}

impl DatasetError {
    pub(crate) fn malformed(source: &std::path::Path, detail: impl ToString) -> DatasetError {
        DatasetError::Malformed {
            source: source.display().to_string(),
            detail: detail.to_string(),
        }
    }

    pub(crate) fn missing(path: &std::path::Path) -> DatasetError {
        DatasetError::MissingFile {
            path: path.display().to_string(),
        }
    }

    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> DatasetError {
        DatasetError::Io {
            path: path.display().to_string(),
            detail: err.to_string(),
        }
    }
}
