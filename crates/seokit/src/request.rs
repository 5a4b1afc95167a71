//! The slice of the current HTTP request that SEO defaults depend on.

use crate::error::{Result, SeoError};
use url::Url;

/// Current page URL as seen by the web framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    url: Url,
}

impl PageRequest {
    /// Parse an absolute request URL.
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw).map_err(|source| SeoError::InvalidUrl {
            url: raw.to_string(),
            source,
        })?;
        Ok(Self { url })
    }

    pub fn from_url(url: Url) -> Self {
        Self { url }
    }

    /// Request path, always starting with `/`.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// URL without query string, fragment or trailing slash.
    ///
    /// The site root is `https://example.com`, never `https://example.com/`.
    pub fn current_url(&self) -> String {
        let mut url = self.url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.as_str().trim_end_matches('/').to_string()
    }

    /// [`current_url`](Self::current_url) plus the query string, if any.
    /// Fragments never reach the server.
    pub fn full_url(&self) -> String {
        match self.url.query() {
            Some(query) if !query.is_empty() => format!("{}?{query}", self.current_url()),
            _ => self.current_url(),
        }
    }
}
