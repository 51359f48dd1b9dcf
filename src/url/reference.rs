use url::{ParseError, Url};

/// Base used only to check that a relative reference is resolvable
const PROBE_BASE: &str = "http://reference.invalid/";

/// Validates a raw `href`/`src`/`url()` value and returns it trimmed
///
/// Relative references are kept as written; they are resolved later against
/// the document's own URL. Returns `Ok(None)` for empty values, which carry
/// no reference at all.
///
/// # Examples
///
/// ```
/// use site_cartographer::url::parse_reference;
///
/// assert_eq!(parse_reference(" foo.html ").unwrap(), Some("foo.html".to_string()));
/// assert_eq!(parse_reference("").unwrap(), None);
/// assert!(parse_reference("http://[::1").is_err());
/// ```
pub fn parse_reference(raw: &str) -> Result<Option<String>, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let probe = Url::parse(PROBE_BASE)?;
    probe.join(trimmed)?;

    Ok(Some(trimmed.to_string()))
}

/// Returns true if the URL path ends in `.css`
///
/// This is a suffix match only; the response content type is never checked.
pub fn is_css(url: &Url) -> bool {
    url.path().ends_with(".css")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_reference_kept_verbatim() {
        assert_eq!(
            parse_reference("www.google.com/bar.html").unwrap(),
            Some("www.google.com/bar.html".to_string())
        );
        assert_eq!(
            parse_reference("../img/cat.gif").unwrap(),
            Some("../img/cat.gif".to_string())
        );
    }

    #[test]
    fn test_absolute_reference() {
        assert_eq!(
            parse_reference("https://example.com/a?b=c#d").unwrap(),
            Some("https://example.com/a?b=c#d".to_string())
        );
    }

    #[test]
    fn test_fragment_only_reference() {
        assert_eq!(
            parse_reference("#header").unwrap(),
            Some("#header".to_string())
        );
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert_eq!(parse_reference("   \n").unwrap(), None);
    }

    #[test]
    fn test_unresolvable_references() {
        assert!(parse_reference("http://[::1").is_err());
        assert!(parse_reference("http://example.com:99999/").is_err());
        assert!(parse_reference("http://").is_err());
    }

    #[test]
    fn test_is_css() {
        assert!(is_css(&Url::parse("http://example.com/style.css").unwrap()));
        assert!(is_css(
            &Url::parse("http://example.com/a/b/main.css?v=3").unwrap()
        ));
        assert!(!is_css(&Url::parse("http://example.com/style.css.map").unwrap()));
        assert!(!is_css(&Url::parse("http://example.com/css").unwrap()));
        assert!(!is_css(&Url::parse("http://example.com/index.html").unwrap()));
    }
}
