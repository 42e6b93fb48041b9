// Loading and saving the persisted model: vocabulary, label encoding, neighbor index
use crate::error::{Result, StorageError};
use crate::manifest::{
    checksum, Manifest, CONTENT_FILE, FORMAT_VERSION, INDEX_FILE, LABELS_FILE, MANIFEST_FILE,
    VOCABULARY_FILE,
};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use symptomx_core::{BruteForceIndex, LabelEncoding, Metric, NeighborIndex, SymptomVocabulary};
use symptomx_ranking::{CatalogContent, ContentEntry, RankerConfig, SymptomChecker};
use tracing::{debug, info};

/// On-disk form of the neighbor index
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexData {
    pub dim: usize,
    pub metric: Metric,
    /// Row-major training vectors
    pub vectors: Vec<f32>,
    /// Class id per training row
    pub classes: Vec<u32>,
}

/// Everything loaded from a model directory
#[derive(Debug)]
pub struct ModelArtifacts {
    pub manifest: Manifest,
    pub vocabulary: SymptomVocabulary,
    pub labels: LabelEncoding,
    pub index: BruteForceIndex,
    pub content: Option<CatalogContent>,
}

impl ModelArtifacts {
    /// Assemble the query engine from the loaded artifacts
    pub fn into_checker(self, config: RankerConfig) -> Result<SymptomChecker> {
        let checker = SymptomChecker::new(self.vocabulary, self.labels, Box::new(self.index), config)?;
        Ok(match self.content {
            Some(content) => checker.with_content(Box::new(content)),
            None => checker,
        })
    }
}

/// Model directory on disk
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load and validate every artifact.
    ///
    /// Checksums listed in the manifest are verified before parsing. The
    /// content catalog is optional and only read when the manifest lists it.
    pub fn load(&self) -> Result<ModelArtifacts> {
        info!("Loading model artifacts from {:?}", self.dir);

        let manifest: Manifest = self.read_json(MANIFEST_FILE, None)?;
        if manifest.format_version != FORMAT_VERSION {
            return Err(StorageError::UnsupportedVersion {
                found: manifest.format_version,
                expected: FORMAT_VERSION,
            });
        }

        let vocabulary: Vec<String> = self.read_json(VOCABULARY_FILE, Some(&manifest))?;
        let vocabulary = SymptomVocabulary::new(vocabulary)?;

        let labels: Vec<String> = self.read_json(LABELS_FILE, Some(&manifest))?;
        let labels = LabelEncoding::new(labels)?;

        let index = self.read_index(&manifest)?;

        let content = if manifest.lists(CONTENT_FILE) {
            let entries: BTreeMap<String, ContentEntry> =
                self.read_json(CONTENT_FILE, Some(&manifest))?;
            Some(CatalogContent::new(entries))
        } else {
            None
        };

        validate(&manifest, &vocabulary, &labels, &index)?;

        info!(
            "Model loaded: {} symptoms, {} diseases, {} training rows, metric {}",
            vocabulary.len(),
            labels.len(),
            index.len(),
            index.metric()
        );
        if let Some(content) = &content {
            info!("Content catalog loaded: {} entries", content.len());
        }

        Ok(ModelArtifacts {
            manifest,
            vocabulary,
            labels,
            index,
            content,
        })
    }

    /// Write a model directory. Each file is replaced atomically and the
    /// manifest is written last.
    pub fn save(
        &self,
        vocabulary: &SymptomVocabulary,
        labels: &LabelEncoding,
        index: &BruteForceIndex,
        content: Option<&CatalogContent>,
    ) -> Result<Manifest> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut manifest = Manifest::new(index.metric(), vocabulary.len(), index.len(), labels.len());

        let data = self.to_json(VOCABULARY_FILE, &vocabulary.labels())?;
        self.write_artifact(VOCABULARY_FILE, &data)?;
        manifest.record(VOCABULARY_FILE, &data);

        let data = self.to_json(LABELS_FILE, &labels.labels())?;
        self.write_artifact(LABELS_FILE, &data)?;
        manifest.record(LABELS_FILE, &data);

        let index_data = IndexData {
            dim: index.dim(),
            metric: index.metric(),
            vectors: index.vectors().to_vec(),
            classes: index.classes().to_vec(),
        };
        let data = bincode::serialize(&index_data).map_err(|source| StorageError::Bincode {
            path: self.dir.join(INDEX_FILE),
            source,
        })?;
        self.write_artifact(INDEX_FILE, &data)?;
        manifest.record(INDEX_FILE, &data);

        if let Some(content) = content {
            let sorted: BTreeMap<&String, &ContentEntry> = content.entries().iter().collect();
            let data = self.to_json(CONTENT_FILE, &sorted)?;
            self.write_artifact(CONTENT_FILE, &data)?;
            manifest.record(CONTENT_FILE, &data);
        }

        let data = self.to_json(MANIFEST_FILE, &manifest)?;
        self.write_artifact(MANIFEST_FILE, &data)?;

        info!("Model saved to {:?}", self.dir);
        Ok(manifest)
    }

    fn read_index(&self, manifest: &Manifest) -> Result<BruteForceIndex> {
        let data = self.read_artifact(INDEX_FILE, Some(manifest))?;
        let index: IndexData = bincode::deserialize(&data).map_err(|source| StorageError::Bincode {
            path: self.dir.join(INDEX_FILE),
            source,
        })?;
        Ok(BruteForceIndex::new(index.dim, index.metric, index.vectors, index.classes)?)
    }

    fn read_json<T: DeserializeOwned>(&self, file: &str, manifest: Option<&Manifest>) -> Result<T> {
        let data = self.read_artifact(file, manifest)?;
        serde_json::from_slice(&data).map_err(|source| StorageError::Json {
            path: self.dir.join(file),
            source,
        })
    }

    /// Read a file, verifying it against the manifest when one is given
    fn read_artifact(&self, file: &str, manifest: Option<&Manifest>) -> Result<Vec<u8>> {
        let path = self.dir.join(file);
        let data = std::fs::read(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StorageError::Missing(path.clone())
            } else {
                StorageError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        if let Some(manifest) = manifest {
            let expected = manifest
                .files
                .get(file)
                .ok_or_else(|| StorageError::Unlisted(file.to_string()))?;
            let actual = checksum(&data);
            if *expected != actual {
                return Err(StorageError::ChecksumMismatch {
                    file: file.to_string(),
                    expected: expected.clone(),
                    actual,
                });
            }
            debug!("Verified {} ({} bytes)", file, data.len());
        }

        Ok(data)
    }

    fn to_json<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(value).map_err(|source| StorageError::Json {
            path: self.dir.join(file),
            source,
        })
    }

    fn write_artifact(&self, file: &str, data: &[u8]) -> Result<()> {
        let path = self.dir.join(file);
        AtomicFile::new(&path, OverwriteBehavior::AllowOverwrite)
            .write(|f| f.write_all(data))
            .map_err(|e| StorageError::Io {
                path: path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
            })
    }
}

/// Cross-artifact consistency checks
fn validate(
    manifest: &Manifest,
    vocabulary: &SymptomVocabulary,
    labels: &LabelEncoding,
    index: &BruteForceIndex,
) -> Result<()> {
    if index.dim() != vocabulary.len() {
        return Err(StorageError::Inconsistent(format!(
            "index dimension {} does not match vocabulary size {}",
            index.dim(),
            vocabulary.len()
        )));
    }
    if index.is_empty() {
        return Err(StorageError::Inconsistent("index has no training rows".to_string()));
    }
    if let Some(max) = index.max_class() {
        if max as usize >= labels.len() {
            return Err(StorageError::Inconsistent(format!(
                "index references class {} but only {} labels exist",
                max,
                labels.len()
            )));
        }
    }
    if manifest.metric != index.metric() {
        return Err(StorageError::Inconsistent(format!(
            "manifest metric {} does not match index metric {}",
            manifest.metric,
            index.metric()
        )));
    }
    if manifest.vocabulary_size != vocabulary.len()
        || manifest.training_rows != index.len()
        || manifest.classes != labels.len()
    {
        return Err(StorageError::Inconsistent(
            "manifest counts do not match artifact contents".to_string(),
        ));
    }
    Ok(())
}
