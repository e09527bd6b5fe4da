//! Utility functions and helpers.

pub mod dom;
pub mod http;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://uoj.ac/contest/12").unwrap();
        assert_eq!(
            resolve_url(&base, "/contest/12/problem/3"),
            "https://uoj.ac/contest/12/problem/3"
        );
        assert_eq!(
            resolve_url(&base, "12/problem/4"),
            "https://uoj.ac/contest/12/problem/4"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }
}
