//! Loading many documents at once.
//!
//! Documents are independent, so with the `parallel` feature they are loaded
//! on rayon's thread pool. Results always come back in input order and one
//! failing document never affects the others.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{info, warn};

use crate::{load_document, AttributeCatalog, LoadedDocument, Result};

/// Outcome of loading one document.
#[derive(Debug)]
pub struct BatchEntry {
    pub path: PathBuf,
    pub result: Result<LoadedDocument>,
}

/// Counts over a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub loaded: usize,
    pub failed: usize,
    pub objects: usize,
}

impl BatchStats {
    pub fn from_entries(entries: &[BatchEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut stats, entry| {
            match &entry.result {
                Ok(doc) => {
                    stats.loaded += 1;
                    stats.objects += doc.objects().len();
                }
                Err(_) => stats.failed += 1,
            }
            stats
        })
    }
}

/// Load every path, returning one entry per path in input order.
pub fn load_documents<P>(paths: &[P]) -> Vec<BatchEntry>
where
    P: AsRef<Path> + Sync,
{
    load_documents_with_progress(paths, |_, _| {})
}

/// Like [`load_documents`], calling `progress(completed, total)` after each document.
pub fn load_documents_with_progress<P, F>(paths: &[P], progress: F) -> Vec<BatchEntry>
where
    P: AsRef<Path> + Sync,
    F: Fn(usize, usize) + Sync,
{
    let total = paths.len();
    let completed = AtomicUsize::new(0);

    let load = |path: &P| {
        let path = path.as_ref();
        let result = load_document(path);
        if let Err(e) = &result {
            warn!(path = %path.display(), error = %e, "failed to load document");
        }
        let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
        progress(done, total);
        BatchEntry {
            path: path.to_path_buf(),
            result,
        }
    };

    #[cfg(feature = "parallel")]
    let entries: Vec<BatchEntry> = paths.par_iter().map(load).collect();
    #[cfg(not(feature = "parallel"))]
    let entries: Vec<BatchEntry> = paths.iter().map(load).collect();

    let stats = BatchStats::from_entries(&entries);
    info!(
        loaded = stats.loaded,
        failed = stats.failed,
        objects = stats.objects,
        "batch load finished"
    );
    entries
}

/// Merge the catalogs of several documents, earlier documents first.
pub fn merged_catalog<'a, I>(documents: I) -> AttributeCatalog
where
    I: IntoIterator<Item = &'a LoadedDocument>,
{
    documents
        .into_iter()
        .fold(AttributeCatalog::new(), |mut catalog, doc| {
            catalog.merge(&doc.catalog());
            catalog
        })
}
