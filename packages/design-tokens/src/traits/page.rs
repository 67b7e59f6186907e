//! Render-engine and page traits.
//!
//! These are the seams to the browser-automation collaborator. The core
//! only requires that, for each supplied page, it can load it and run a
//! read-only query against its computed styles; HTTP semantics, redirect
//! handling, and link discovery are the crawler's business.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::error::{EngineResult, PageResult};
use crate::types::sample::{ElementStyles, StyleQuery};

/// A rendered page capable of answering computed-style queries.
#[async_trait]
pub trait PageHandle: Send + Sync {
    /// Canonical URL of the page.
    fn url(&self) -> &str;

    /// Read computed styles off every element matching the query selector.
    ///
    /// Returns one record per matched element. A page with no matching
    /// elements returns an empty list, not an error.
    async fn computed_styles(&self, query: &StyleQuery) -> PageResult<Vec<ElementStyles>>;
}

/// One acquired browser session, able to render pages until closed.
#[async_trait]
pub trait RenderSession: Send + Sync {
    /// Navigate to and render a page.
    async fn render(&self, url: &str) -> PageResult<Box<dyn PageHandle>>;

    /// Release the session. Called on every exit path of an extractor run.
    async fn close(&self) -> EngineResult<()>;
}

/// The rendering engine. Acquired once per extractor invocation.
#[async_trait]
pub trait RenderEngine: Send + Sync {
    /// Start a session. Failure here is fatal for the run.
    async fn acquire(&self) -> EngineResult<Box<dyn RenderSession>>;
}

/// One entry in the crawler's ordered page list.
///
/// Carries a navigable URL and, optionally, an already-rendered handle;
/// pages without a handle are rendered through the run's session.
#[derive(Clone)]
pub struct PageDescriptor {
    pub url: String,
    pub handle: Option<Arc<dyn PageHandle>>,
}

impl PageDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            handle: None,
        }
    }

    /// Attach a pre-rendered handle.
    pub fn with_handle(mut self, handle: Arc<dyn PageHandle>) -> Self {
        self.handle = Some(handle);
        self
    }

    /// `scheme://host` of the page URL, for grouping by site.
    pub fn site(&self) -> Option<String> {
        url::Url::parse(&self.url)
            .ok()
            .map(|u| format!("{}://{}", u.scheme(), u.host_str().unwrap_or("")))
    }
}

impl fmt::Debug for PageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageDescriptor")
            .field("url", &self.url)
            .field("pre_rendered", &self.handle.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_site() {
        let descriptor = PageDescriptor::new("https://example.com/pricing?tab=1");
        assert_eq!(descriptor.site().as_deref(), Some("https://example.com"));

        let bad = PageDescriptor::new("not a url");
        assert_eq!(bad.site(), None);
    }
}
