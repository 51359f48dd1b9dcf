use crate::state::Resource;
use crate::url::strip_fragment;
use std::collections::btree_map;
use std::collections::BTreeMap;
use url::Url;

/// Map from fragment-free URL to the resource found there
///
/// An entry is created as an empty placeholder the moment a URL is claimed
/// for crawling and overwritten once its fetch completes. A URL whose fetch
/// is abandoned keeps its placeholder, so the map doubles as the set of
/// URLs already seen.
///
/// Only the coordinator task mutates this map.
#[derive(Debug, Clone)]
pub struct CrawlState {
    root: Url,
    entries: BTreeMap<Url, Resource>,
}

impl CrawlState {
    /// Creates crawl state seeded with a placeholder for the root URL
    pub fn new(root: &Url) -> Self {
        let root = strip_fragment(root);
        let mut entries = BTreeMap::new();
        entries.insert(root.clone(), Resource::placeholder(root.clone()));
        Self { root, entries }
    }

    /// The URL the crawl started from
    pub fn root(&self) -> &Url {
        &self.root
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.entries.contains_key(url)
    }

    pub fn get(&self, url: &Url) -> Option<&Resource> {
        self.entries.get(url)
    }

    /// Marks a URL as claimed with a placeholder
    ///
    /// Returns false, leaving the existing entry untouched, if the URL was
    /// already present.
    pub fn claim(&mut self, url: &Url) -> bool {
        match self.entries.entry(url.clone()) {
            btree_map::Entry::Occupied(_) => false,
            btree_map::Entry::Vacant(slot) => {
                slot.insert(Resource::placeholder(url.clone()));
                true
            }
        }
    }

    /// Records a fetched resource under its own URL, replacing any placeholder
    pub fn record(&mut self, resource: Resource) {
        self.entries.insert(resource.url.clone(), resource);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in URL order
    pub fn iter(&self) -> impl Iterator<Item = (&Url, &Resource)> {
        self.entries.iter()
    }

    pub fn urls(&self) -> impl Iterator<Item = &Url> {
        self.entries.keys()
    }

    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.entries.values()
    }
}
