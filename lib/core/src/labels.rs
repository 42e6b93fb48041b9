use ahash::AHashMap;
use crate::{Error, Result};

/// Bidirectional mapping between disease labels and class ids.
///
/// Class ids are dense, starting at zero, in the order the labels were given.
#[derive(Debug, Clone)]
pub struct LabelEncoding {
    labels: Vec<String>,
    ids: AHashMap<String, u32>,
}

impl LabelEncoding {
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let mut ids = AHashMap::with_capacity(labels.len());

        for (idx, label) in labels.iter().enumerate() {
            let id = u32::try_from(idx)
                .map_err(|_| Error::InvalidConfig("too many disease labels".to_string()))?;
            if ids.insert(label.clone(), id).is_some() {
                return Err(Error::DuplicateLabel(label.clone()));
            }
        }

        Ok(Self { labels, ids })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Class id for a disease label (exact match)
    #[inline]
    pub fn encode(&self, label: &str) -> Option<u32> {
        self.ids.get(label).copied()
    }

    /// Disease label for a class id
    #[inline]
    pub fn decode(&self, id: u32) -> Result<&str> {
        self.labels
            .get(id as usize)
            .map(String::as_str)
            .ok_or(Error::UnknownClass(id))
    }

    /// Labels in class-id order
    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}
