use std::collections::BTreeSet;
use url::Url;

/// One fetched document: its outbound links and static assets
///
/// After normalization every URL in `links` and `assets` is absolute, on the
/// same host as `url`, and carries no fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Identity of this document
    pub url: Url,

    /// Navigable pages this document points to
    pub links: BTreeSet<Url>,

    /// Static dependencies (images, scripts, stylesheets, CSS references)
    pub assets: BTreeSet<Url>,
}

impl Resource {
    /// Creates an empty resource, used to mark a URL as claimed before it is fetched
    pub fn placeholder(url: Url) -> Self {
        Self {
            url,
            links: BTreeSet::new(),
            assets: BTreeSet::new(),
        }
    }

    /// Returns true if the resource references nothing
    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.assets.is_empty()
    }

    /// Links in URL order
    pub fn sorted_links(&self) -> impl Iterator<Item = &Url> {
        self.links.iter()
    }

    /// Assets in URL order
    pub fn sorted_assets(&self) -> impl Iterator<Item = &Url> {
        self.assets.iter()
    }
}
