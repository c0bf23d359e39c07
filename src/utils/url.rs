//! URL helpers.

use crate::{Error, Result};
use reqwest::Url;

/// Resolve a request URL against an optional base URL.
///
/// A URL is absolute when it starts with `scheme://` or is protocol-relative
/// (`//host/path`). Absolute URLs are used as they are; protocol-relative ones
/// borrow the base URL's scheme. Anything else is relative, including paths
/// holding a colon such as `items:batchGet`, and is appended to the base with
/// exactly one `/` between the two, so a base path is preserved:
/// `http://host/api` + `/users` gives `http://host/api/users`.
///
/// ```rust
/// use courier::utils::resolve_url;
/// use reqwest::Url;
///
/// let base = Url::parse("http://localhost:3000/api/").unwrap();
/// let url = resolve_url(Some(&base), "/test").unwrap();
/// assert_eq!(url.as_str(), "http://localhost:3000/api/test");
/// ```
pub fn resolve_url(base: Option<&Url>, url: &str) -> Result<Url> {
    if is_absolute(url) && !url.starts_with("//") {
        return Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)));
    }

    let base = base.ok_or_else(|| {
        Error::InvalidUrl(format!("{} is relative and no base URL is configured", url))
    })?;

    if url.starts_with("//") {
        return base
            .join(url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)));
    }

    let combined = if url.is_empty() {
        base.as_str().to_owned()
    } else {
        format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            url.trim_start_matches('/')
        )
    };

    Url::parse(&combined).map_err(|e| Error::InvalidUrl(format!("{}: {}", combined, e)))
}

/// Whether `url` starts with `scheme://` or `//`.
fn is_absolute(url: &str) -> bool {
    let rest = match url.find(':') {
        Some(colon) => {
            let scheme = &url[..colon];
            let mut chars = scheme.chars();
            let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
            if !valid {
                return url.starts_with("//");
            }
            &url[colon + 1..]
        }
        None => url,
    };
    rest.starts_with("//")
}

/// Append query parameters to a URL, keeping any query it already carries.
pub fn append_params(url: &mut Url, params: &[(String, String)]) {
    if params.is_empty() {
        return;
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    let encoded = serializer.finish();

    let query = match url.query() {
        Some(existing) if !existing.is_empty() => format!("{}&{}", existing, encoded),
        _ => encoded,
    };
    url.set_query(Some(&query));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://localhost:3000").unwrap()
    }

    #[test]
    fn test_resolve_relative() {
        let url = resolve_url(Some(&base()), "/test").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/test");

        let url = resolve_url(Some(&base()), "test/name").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/test/name");
    }

    #[test]
    fn test_resolve_keeps_base_path() {
        let base = Url::parse("http://localhost:3000/api/v1/").unwrap();
        let url = resolve_url(Some(&base), "/users").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/v1/users");
    }

    #[test]
    fn test_resolve_colon_path_is_relative() {
        let base = Url::parse("http://localhost:3000/v1").unwrap();
        let url = resolve_url(Some(&base), "items:batchGet").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/v1/items:batchGet");
    }

    #[test]
    fn test_resolve_protocol_relative_uses_base_scheme() {
        let base = Url::parse("https://localhost:3000/api/").unwrap();
        let url = resolve_url(Some(&base), "//cdn.host/x.png").unwrap();
        assert_eq!(url.as_str(), "https://cdn.host/x.png");

        let err = resolve_url(None, "//cdn.host/x.png").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_is_absolute() {
        assert!(is_absolute("http://host/x"));
        assert!(is_absolute("svn+ssh://host"));
        assert!(is_absolute("//host/x"));
        assert!(!is_absolute("/test"));
        assert!(!is_absolute("items:batchGet"));
        assert!(!is_absolute("1http://host"));
        assert!(!is_absolute("mailto:someone@host"));
    }

    #[test]
    fn test_resolve_absolute_ignores_base() {
        let url = resolve_url(Some(&base()), "https://example.com/img.png").unwrap();
        assert_eq!(url.as_str(), "https://example.com/img.png");
    }

    #[test]
    fn test_resolve_empty_path_is_base() {
        let url = resolve_url(Some(&base()), "").unwrap();
        assert_eq!(url, base());
    }

    #[test]
    fn test_resolve_relative_without_base() {
        let err = resolve_url(None, "/test").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_append_params() {
        let mut url = Url::parse("http://localhost/test").unwrap();
        append_params(
            &mut url,
            &[
                ("name".to_string(), "cho gath".to_string()),
                ("tag".to_string(), "a&b".to_string()),
            ],
        );
        assert_eq!(url.as_str(), "http://localhost/test?name=cho+gath&tag=a%26b");
    }

    #[test]
    fn test_append_params_to_existing_query() {
        let mut url = Url::parse("http://localhost/test?page=1").unwrap();
        append_params(&mut url, &[("name".to_string(), "chogath".to_string())]);
        assert_eq!(url.query(), Some("page=1&name=chogath"));

        let mut untouched = Url::parse("http://localhost/test?page=1").unwrap();
        append_params(&mut untouched, &[]);
        assert_eq!(untouched.query(), Some("page=1"));
    }
}
