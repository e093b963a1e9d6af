//! Target resolution against the current location.

use url::Url;

/// Resolve a link target (absolute or relative) against the current location.
#[inline]
pub fn resolve(base: &Url, target: &str) -> Result<Url, url::ParseError> {
    base.join(target.trim())
}

/// Scheme, host and port identical.
#[inline]
pub fn is_same_origin(a: &Url, b: &Url) -> bool {
    a.origin() == b.origin()
}

/// URL without its fragment, used as the identity of a fetched document.
pub fn document_key(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.into()
}

/// Location reported by a history pop event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PopLocation {
    /// Path including the leading `/`.
    pub path: String,
    /// Query string including `?`, or empty.
    pub search: String,
    /// Fragment including `#`, or empty.
    pub hash: String,
}

impl PopLocation {
    pub fn new(path: impl Into<String>, search: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            search: search.into(),
            hash: hash.into(),
        }
    }

    /// Split a URL into the parts a pop event carries.
    pub fn from_url(url: &Url) -> Self {
        Self {
            path: url.path().to_string(),
            search: url.query().map(|q| format!("?{q}")).unwrap_or_default(),
            hash: url.fragment().map(|f| format!("#{f}")).unwrap_or_default(),
        }
    }

    /// Site-root-relative target: `path + search + hash`.
    pub fn to_target(&self) -> String {
        format!("{}{}{}", self.path, self.search, self.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/blog/post/").unwrap()
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        assert_eq!(
            resolve(&base(), "../other/").unwrap().as_str(),
            "https://example.com/blog/other/"
        );
        assert_eq!(
            resolve(&base(), "/about").unwrap().as_str(),
            "https://example.com/about"
        );
        assert_eq!(
            resolve(&base(), "https://other.org/").unwrap().as_str(),
            "https://other.org/"
        );
    }

    #[test]
    fn test_resolve_malformed() {
        assert!(resolve(&base(), "http://[::1").is_err());
    }

    #[test]
    fn test_same_origin() {
        let same = resolve(&base(), "/x").unwrap();
        let other_port = Url::parse("https://example.com:8443/").unwrap();
        let other_scheme = Url::parse("http://example.com/").unwrap();
        let protocol_relative = resolve(&base(), "//cdn.example.com/x").unwrap();

        assert!(is_same_origin(&base(), &same));
        assert!(!is_same_origin(&base(), &other_port));
        assert!(!is_same_origin(&base(), &other_scheme));
        assert!(!is_same_origin(&base(), &protocol_relative));
    }

    #[test]
    fn test_document_key_strips_fragment() {
        let url = Url::parse("https://example.com/a?b=1#c").unwrap();
        assert_eq!(document_key(&url), "https://example.com/a?b=1");
    }

    #[test]
    fn test_pop_location_roundtrip() {
        let url = Url::parse("https://example.com/posts/?page=2#top").unwrap();
        let location = PopLocation::from_url(&url);
        assert_eq!(location, PopLocation::new("/posts/", "?page=2", "#top"));
        assert_eq!(location.to_target(), "/posts/?page=2#top");
        assert_eq!(resolve(&base(), &location.to_target()).unwrap(), url);
    }
}
