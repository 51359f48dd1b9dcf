use crate::parse::ParsedPage;
use crate::state::Resource;
use crate::url::same_host;
use std::collections::BTreeSet;
use url::Url;

/// Returns a copy of the URL without its fragment
///
/// An empty fragment (`http://example.com/#`) is removed as well.
pub fn strip_fragment(url: &Url) -> Url {
    let mut stripped = url.clone();
    stripped.set_fragment(None);
    stripped
}

/// Resolves one reference against a document URL
///
/// # Normalization Steps
///
/// 1. Resolve the reference relative to `base` (standard URL joining)
/// 2. Drop it if it fails to resolve or lands on another host
/// 3. Remove the fragment
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_cartographer::url::resolve_reference;
///
/// let base = Url::parse("http://google.com/testcase/").unwrap();
/// let resolved = resolve_reference(&base, "#header").unwrap();
/// assert_eq!(resolved.as_str(), "http://google.com/testcase/");
/// assert!(resolve_reference(&base, "http://amazon.com/kindle.jpg").is_none());
/// ```
pub fn resolve_reference(base: &Url, reference: &str) -> Option<Url> {
    let mut absolute = match base.join(reference) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Dropping unresolvable reference {:?} on {}: {}", reference, base, e);
            return None;
        }
    };

    if !same_host(&absolute, base) {
        return None;
    }

    absolute.set_fragment(None);
    Some(absolute)
}

fn resolve_all<'a, I>(base: &Url, references: I) -> BTreeSet<Url>
where
    I: IntoIterator<Item = &'a str>,
{
    references
        .into_iter()
        .filter_map(|reference| resolve_reference(base, reference))
        .collect()
}

/// Builds a normalized resource from extracted references
///
/// Every link and asset becomes an absolute, same-host, fragment-free URL;
/// the resource's own URL loses its fragment too.
pub fn normalize_page(url: &Url, page: &ParsedPage) -> Resource {
    Resource {
        url: strip_fragment(url),
        links: resolve_all(url, page.links.iter().map(String::as_str)),
        assets: resolve_all(url, page.assets.iter().map(String::as_str)),
    }
}

/// Re-applies normalization to a resource, returning a new one
///
/// Normalizing an already normalized resource yields an identical resource.
pub fn normalize_resource(resource: &Resource) -> Resource {
    Resource {
        url: strip_fragment(&resource.url),
        links: resolve_all(&resource.url, resource.links.iter().map(Url::as_str)),
        assets: resolve_all(&resource.url, resource.assets.iter().map(Url::as_str)),
    }
}
