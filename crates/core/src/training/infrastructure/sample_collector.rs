use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::shared::constants::{LABEL_PREFIX_LEN, SAMPLE_EXTENSION};
use crate::training::domain::label::{parse_label, Label, LabelParseError};
use crate::training::domain::sample::{Sample, TrainingSet};

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("cannot access sample root {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("sample root {0} is not a directory")]
    NotADirectory(PathBuf),
    #[error("failed to walk sample tree: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("failed to decode sample {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("cannot derive label for {path}: {source}")]
    Label {
        path: PathBuf,
        #[source]
        source: LabelParseError,
    },
}

/// Which files count as samples and how labels are read from their directories.
#[derive(Clone, Debug)]
pub struct CollectorConfig {
    /// File extension without the dot, compared case-insensitively.
    pub extension: String,
    /// Non-digit characters to skip at the start of a subject directory name.
    pub prefix_len: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            extension: SAMPLE_EXTENSION.to_string(),
            prefix_len: LABEL_PREFIX_LEN,
        }
    }
}

/// Harvests grayscale training samples from a `<root>/<prefix><digits>/*.pgm` tree.
///
/// Every matching file below `root` is decoded as a single-channel image and
/// labelled from the name of the directory that directly contains it. Any
/// failure aborts the whole collection; a partial set is never returned.
pub struct SampleCollector {
    config: CollectorConfig,
}

impl SampleCollector {
    pub fn new(config: CollectorConfig) -> Self {
        Self { config }
    }

    pub fn collect(&self, root: &Path) -> Result<TrainingSet, CollectError> {
        let metadata = fs::metadata(root).map_err(|source| CollectError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(CollectError::NotADirectory(root.to_path_buf()));
        }

        let mut set = TrainingSet::new();
        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() || !self.is_sample(entry.path()) {
                continue;
            }

            let path = entry.path();
            let label = self.label_for(path)?;
            let image = image::open(path)
                .map_err(|source| CollectError::ImageDecode {
                    path: path.to_path_buf(),
                    source,
                })?
                .into_luma8();

            log::debug!("Sample {} -> label {label}", path.display());
            set.push(Sample::new(image, label));
        }

        Ok(set)
    }

    fn is_sample(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(&self.config.extension))
            .unwrap_or(false)
    }

    fn label_for(&self, path: &Path) -> Result<Label, CollectError> {
        let dir_name = path
            .parent()
            .and_then(|parent| parent.file_name())
            .unwrap_or_default();

        let result = match dir_name.to_str() {
            Some(name) => parse_label(name, self.config.prefix_len),
            None => Err(LabelParseError::NotUnicode {
                name: dir_name.to_string_lossy().into_owned(),
            }),
        };

        result.map_err(|source| CollectError::Label {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for SampleCollector {
    fn default() -> Self {
        Self::new(CollectorConfig::default())
    }
}
