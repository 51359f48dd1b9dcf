use url::Url;

/// Returns true if both URLs name the same host and port
///
/// The scheme is not compared: `http://example.com/` and
/// `https://example.com/` are on the same host. Default ports are elided by
/// the parser, so `http://example.com:80/` also matches.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_cartographer::url::same_host;
///
/// let a = Url::parse("http://example.com/a").unwrap();
/// let b = Url::parse("https://example.com/b").unwrap();
/// let c = Url::parse("http://example.com:8080/").unwrap();
/// assert!(same_host(&a, &b));
/// assert!(!same_host(&a, &c));
/// ```
pub fn same_host(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port() == b.port()
}

/// Host and optional port, as used for output file names
pub fn host_label(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}_{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => "sitemap".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_same_host_ignores_path_and_query() {
        assert!(same_host(
            &url("http://google.com/cat.php"),
            &url("http://google.com/dog.php?x=1#top")
        ));
    }

    #[test]
    fn test_different_host() {
        assert!(!same_host(
            &url("http://google.com/"),
            &url("http://amazon.com/")
        ));
    }

    #[test]
    fn test_subdomain_is_different_host() {
        assert!(!same_host(
            &url("http://google.com/"),
            &url("http://www.google.com/")
        ));
    }

    #[test]
    fn test_host_comparison_is_case_insensitive() {
        assert!(same_host(&url("http://GOOGLE.com/"), &url("http://google.com/")));
    }

    #[test]
    fn test_scheme_not_compared() {
        assert!(same_host(
            &url("http://google.com/cat.php"),
            &url("https://google.com/cat.php")
        ));
    }

    #[test]
    fn test_explicit_port_differs() {
        assert!(!same_host(
            &url("http://127.0.0.1:8080/"),
            &url("http://127.0.0.1:9090/")
        ));
        assert!(same_host(&url("http://google.com:80/"), &url("http://google.com/")));
    }

    #[test]
    fn test_host_label() {
        assert_eq!(host_label(&url("http://google.com/x")), "google.com");
        assert_eq!(host_label(&url("http://127.0.0.1:4000/")), "127.0.0.1_4000");
    }
}
