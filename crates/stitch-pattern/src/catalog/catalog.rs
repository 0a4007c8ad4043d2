//! Immutable, ordered thread catalog.

use std::collections::{HashMap, HashSet};

use super::error::CatalogError;
use super::thread::{Thread, ThreadRecord};

/// An immutable, ordered collection of threads.
///
/// Order is significant: nearest-thread search breaks ties in favour of the
/// thread that appears first. The catalog is `Send + Sync` and is meant to be
/// shared (e.g. via `Arc`) across concurrent conversions.
///
/// # Example
///
/// ```
/// use stitch_pattern::{Rgb, Thread, ThreadCatalog};
///
/// let catalog = ThreadCatalog::new(vec![
///     Thread::new("dmc_310", "DMC", "310", "Black", Rgb::new(0, 0, 0)),
///     Thread::new("anchor_403", "Anchor", "403", "Black", Rgb::new(0, 0, 0)),
/// ])
/// .unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.find_code("Anchor", "403").unwrap().id(), "anchor_403");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ThreadCatalog {
    threads: Vec<Thread>,
    by_id: HashMap<String, usize>,
}

impl ThreadCatalog {
    /// Build a catalog from threads, keeping their order.
    ///
    /// # Errors
    ///
    /// [`CatalogError::DuplicateId`] or [`CatalogError::DuplicateCode`] if
    /// identifiers or (brand, code) pairs repeat.
    pub fn new(threads: Vec<Thread>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(threads.len());
        let mut codes = HashSet::with_capacity(threads.len());

        for (i, thread) in threads.iter().enumerate() {
            if by_id.insert(thread.id().to_string(), i).is_some() {
                return Err(CatalogError::DuplicateId(thread.id().to_string()));
            }
            if !codes.insert((thread.brand(), thread.code())) {
                return Err(CatalogError::DuplicateCode {
                    brand: thread.brand().to_string(),
                    code: thread.code().to_string(),
                });
            }
        }

        Ok(Self { threads, by_id })
    }

    /// Build a catalog from raw records, computing missing Lab values.
    pub fn from_records(records: Vec<ThreadRecord>) -> Result<Self, CatalogError> {
        Self::new(records.into_iter().map(Thread::from).collect())
    }

    /// All threads in catalog order.
    #[inline]
    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    /// Number of threads.
    #[inline]
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    /// Whether the catalog holds no threads.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// Threads of one brand, in catalog order.
    pub fn by_brand<'a>(&'a self, brand: &'a str) -> impl Iterator<Item = &'a Thread> + 'a {
        self.threads.iter().filter(move |t| t.brand() == brand)
    }

    /// Exact lookup by brand and code.
    pub fn find_code(&self, brand: &str, code: &str) -> Option<&Thread> {
        self.threads
            .iter()
            .find(|t| t.brand() == brand && t.code() == code)
    }

    /// Lookup by identifier.
    pub fn get(&self, id: &str) -> Option<&Thread> {
        self.by_id.get(id).map(|&i| &self.threads[i])
    }

    /// Distinct brand names in order of first appearance.
    pub fn brands(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.threads
            .iter()
            .map(Thread::brand)
            .filter(|b| seen.insert(*b))
            .collect()
    }
}
