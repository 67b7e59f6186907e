//! Mock render engine and pages for testing.
//!
//! These are useful for testing applications that use the extraction
//! library without driving a real browser.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{EngineError, EngineResult, PageError, PageResult};
use crate::traits::page::{PageDescriptor, PageHandle, RenderEngine, RenderSession};
use crate::types::sample::{ElementStyles, StyleQuery};

/// A canned page: a URL plus the elements a style query will see.
#[derive(Debug, Clone, Default)]
pub struct MockPage {
    url: String,
    elements: Vec<ElementStyles>,
    fail_evaluation: bool,
}

impl MockPage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            elements: Vec::new(),
            fail_evaluation: false,
        }
    }

    /// Add an element with its computed styles.
    pub fn with_element(mut self, tag: &str, styles: &[(&str, &str)]) -> Self {
        let mut element = ElementStyles::new(tag);
        for (property, value) in styles {
            element = element.with_style(*property, *value);
        }
        self.elements.push(element);
        self
    }

    /// Make every style evaluation on this page fail.
    pub fn failing_evaluation(mut self) -> Self {
        self.fail_evaluation = true;
        self
    }

    /// Wrap into a page descriptor carrying this page pre-rendered.
    pub fn into_descriptor(self) -> PageDescriptor {
        let url = self.url.clone();
        PageDescriptor::new(url).with_handle(Arc::new(self))
    }
}

#[async_trait]
impl PageHandle for MockPage {
    fn url(&self) -> &str {
        &self.url
    }

    async fn computed_styles(&self, query: &StyleQuery) -> PageResult<Vec<ElementStyles>> {
        if self.fail_evaluation {
            return Err(PageError::Evaluation {
                url: self.url.clone(),
                message: "mock evaluation failure".into(),
            });
        }

        Ok(self
            .elements
            .iter()
            .filter(|element| selector_matches(&query.selector, &element.tag))
            .map(|element| project(element, &query.properties))
            .collect())
    }
}

/// Tag-list selector matching, enough for the selectors extractors use.
fn selector_matches(selector: &str, tag: &str) -> bool {
    selector == "*"
        || selector
            .split(',')
            .any(|candidate| candidate.trim().eq_ignore_ascii_case(tag))
}

/// Keep only the requested properties, as a real driver would.
fn project(element: &ElementStyles, properties: &[String]) -> ElementStyles {
    let mut projected = ElementStyles::new(element.tag.clone());
    for property in properties {
        if let Some(value) = element.styles.get(property) {
            projected = projected.with_style(property.clone(), value.clone());
        }
    }
    projected
}

/// A mock engine serving canned pages, with session accounting for
/// asserting that sessions are released on every exit path.
#[derive(Debug, Clone, Default)]
pub struct MockRenderEngine {
    pages: HashMap<String, MockPage>,
    fail_acquire: bool,
    acquired: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl MockRenderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page under its URL.
    pub fn with_page(mut self, page: MockPage) -> Self {
        self.pages.insert(page.url.clone(), page);
        self
    }

    /// Make `acquire` fail, simulating an engine that cannot start.
    pub fn failing_acquire(mut self) -> Self {
        self.fail_acquire = true;
        self
    }

    /// Sessions handed out so far.
    pub fn acquired_sessions(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    /// Sessions closed so far.
    pub fn closed_sessions(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// Sessions currently open.
    pub fn open_sessions(&self) -> usize {
        self.acquired_sessions() - self.closed_sessions()
    }
}

#[async_trait]
impl RenderEngine for MockRenderEngine {
    async fn acquire(&self) -> EngineResult<Box<dyn RenderSession>> {
        if self.fail_acquire {
            return Err(EngineError::Launch {
                message: "mock engine configured to fail".into(),
            });
        }
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockRenderSession {
            pages: self.pages.clone(),
            closed: self.closed.clone(),
        }))
    }
}

struct MockRenderSession {
    pages: HashMap<String, MockPage>,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl RenderSession for MockRenderSession {
    async fn render(&self, url: &str) -> PageResult<Box<dyn PageHandle>> {
        self.pages
            .get(url)
            .cloned()
            .map(|page| Box::new(page) as Box<dyn PageHandle>)
            .ok_or_else(|| PageError::Navigation {
                url: url.to_string(),
                message: "page not registered with mock engine".into(),
            })
    }

    async fn close(&self) -> EngineResult<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
