//! CSS reference scanner
//!
//! Only two syntactic forms carry URLs we care about, `@import` and
//! `url(...)`, so a linear scan is enough; there is no CSS tokenizer here.

use crate::url::parse_reference;
use thiserror::Error;

const IMPORT: &str = "@import";
const URL_OPEN: &str = "url(";

/// Reasons a CSS scan stops early
#[derive(Debug, Error)]
pub enum CssError {
    #[error("{0} without terminating '{1}'")]
    Unterminated(&'static str, char),

    #[error("no matching brackets in {0:?}")]
    Unbalanced(String),

    #[error("invalid reference {reference:?}: {source}")]
    Url {
        reference: String,
        source: url::ParseError,
    },
}

/// Extracts `@import` and `url(...)` references from CSS text
///
/// References are returned in encounter order without duplicates, still
/// relative as written. Scanning advances one character at a time, so the
/// `url(...)` inside an `@import url(...)` is seen twice and deduplicated.
/// Malformed input stops the scan; whatever was collected up to that point
/// is returned.
///
/// # Example
///
/// ```
/// use site_cartographer::parse::parse_css;
///
/// let refs = parse_css(r#"@import url("style.css"); body { background: url(bg.png) }"#);
/// assert_eq!(refs, vec!["style.css", "bg.png"]);
/// ```
pub fn parse_css(css: &str) -> Vec<String> {
    let mut references = Vec::new();

    if let Err(e) = scan(css, &mut references) {
        tracing::warn!("Stopped scanning invalid CSS: {}", e);
    }

    references
}

fn scan(css: &str, references: &mut Vec<String>) -> Result<(), CssError> {
    for (i, _) in css.char_indices() {
        let rest = &css[i..];

        let raw = if rest.starts_with(IMPORT) {
            let semicolon = rest
                .find(';')
                .ok_or(CssError::Unterminated(IMPORT, ';'))?;
            rest.get(IMPORT.len()..semicolon)
                .ok_or(CssError::Unterminated(IMPORT, ';'))?
        } else if rest.starts_with(URL_OPEN) {
            let close = rest
                .find(')')
                .ok_or(CssError::Unterminated(URL_OPEN, ')'))?;
            &rest[..=close]
        } else {
            continue;
        };

        if let Some(reference) = extract_url(raw)? {
            if !references.contains(&reference) {
                references.push(reference);
            }
        }
    }

    Ok(())
}

/// Unwraps `url(X)`, `"X"`, `'X'` or bare `X` into a trimmed reference
fn extract_url(raw: &str) -> Result<Option<String>, CssError> {
    let mut value = raw.trim();

    if let Some(inner) = value.strip_prefix(URL_OPEN) {
        let close = inner
            .find(')')
            .ok_or_else(|| CssError::Unbalanced(raw.to_string()))?;
        value = &inner[..close];
    }

    value = value.trim();
    if let Some(quote) = value.chars().next().filter(|c| *c == '"' || *c == '\'') {
        let inner = &value[1..];
        value = inner.find(quote).map_or(inner, |end| &inner[..end]);
    }

    let value = value.trim_matches(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | '(' | ')'));

    parse_reference(value).map_err(|source| CssError::Url {
        reference: value.to_string(),
        source,
    })
}
