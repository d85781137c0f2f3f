//! Registry of APWP datasets keyed by reference frame.
//!
//! The catalog may hold several frames at once (they coexist for rotation),
//! but every computation names exactly one of them. Nothing here is mutable
//! once handed to a calculator, so a shared `&ApwpCatalog` can serve any
//! number of threads.

use std::collections::BTreeMap;

use crate::{ApwpDataset, ApwpError, ApwpResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApwpCatalog {
    datasets: BTreeMap<String, ApwpDataset>,
}

impl ApwpCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting duplicate frame ids.
    pub fn from_datasets<I>(datasets: I) -> ApwpResult<Self>
    where
        I: IntoIterator<Item = ApwpDataset>,
    {
        let mut catalog = Self::new();
        for dataset in datasets {
            catalog.insert(dataset)?;
        }
        Ok(catalog)
    }

    /// Registers a dataset under its frame id.
    ///
    /// A second dataset for an already-registered frame is a
    /// [`ApwpError::DataIntegrity`] error; the catalog is left unchanged.
    pub fn insert(&mut self, dataset: ApwpDataset) -> ApwpResult<()> {
        if self.datasets.contains_key(dataset.frame_id()) {
            return Err(ApwpError::data_integrity(
                dataset.frame_id(),
                0,
                "a dataset for this frame is already registered",
            ));
        }
        tracing::debug!(frame = dataset.frame_id(), "registered frame");
        self.datasets.insert(dataset.frame_id().to_string(), dataset);
        Ok(())
    }

    /// Looks up a frame; unknown ids are [`ApwpError::UnknownFrame`], never a default.
    pub fn get(&self, frame_id: &str) -> ApwpResult<&ApwpDataset> {
        self.datasets
            .get(frame_id)
            .ok_or_else(|| ApwpError::unknown_frame(frame_id))
    }

    pub fn contains(&self, frame_id: &str) -> bool {
        self.datasets.contains_key(frame_id)
    }

    /// Registered frame ids in sorted order.
    pub fn frame_ids(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ApwpDataset> {
        self.datasets.values()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, FrameErrorKind};

    fn dataset(frame: &str) -> ApwpDataset {
        ApwpDataset::from_rows(frame, [(0.0, 90.0, 0.0, 0.0), (10.0, 85.0, 0.0, 1.0)]).unwrap()
    }

    #[test]
    fn test_lookup() {
        let catalog = ApwpCatalog::from_datasets([dataset("b-frame"), dataset("a-frame")]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("a-frame"));
        assert_eq!(catalog.get("b-frame").unwrap().frame_id(), "b-frame");
        let ids: Vec<_> = catalog.frame_ids().collect();
        assert_eq!(ids, vec!["a-frame", "b-frame"]);
        assert_eq!(catalog.iter().count(), 2);
    }

    #[test]
    fn test_unknown_frame() {
        let catalog = ApwpCatalog::from_datasets([dataset("a-frame")]).unwrap();
        let err = catalog.get("made-up-frame").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownFrame);
        match err {
            ApwpError::UnknownFrame { frame, kind, .. } => {
                assert_eq!(frame, "made-up-frame");
                assert_eq!(kind, FrameErrorKind::NotInCatalog);
            }
            other => panic!("Expected UnknownFrame, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_frame() {
        let mut catalog = ApwpCatalog::new();
        assert!(catalog.is_empty());
        catalog.insert(dataset("a-frame")).unwrap();
        let err = catalog.insert(dataset("a-frame")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApwpCatalog>();
        assert_send_sync::<ApwpDataset>();
        assert_send_sync::<crate::RotationTable>();
        assert_send_sync::<crate::PlateIndex>();
    }
}
