//! Marks the navigation link that points at the current page.

use crate::{
    Config,
    class_list::ClassList,
    error::{Error, Result},
};
use kuchikiki::{ElementData, NodeDataRef, NodeRef};
use tracing::{debug, instrument, trace};
use url::Url;

pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const ACTIVE_CLASS: &str = "active";

/// Elements whose `href` attribute is a hyperlink target.
const LINK_ELEMENTS: &[&str] = &["a", "area", "link"];

#[derive(Debug, Clone)]
pub struct NavHighlighter {
    selector: String,
    active_class: String,
}

impl Default for NavHighlighter {
    fn default() -> Self {
        Self::new(NAV_LINK_SELECTOR, ACTIVE_CLASS)
    }
}

impl NavHighlighter {
    pub fn new(selector: impl Into<String>, active_class: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            active_class: active_class.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.nav_selector, &config.active_class)
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Add the active class to every navigation link of `document` whose
    /// resolved target is exactly `url`.
    ///
    /// The comparison is plain string equality of serialized URLs, so a
    /// differing trailing slash, query or fragment is a mismatch. Several
    /// links to the current page all get marked.
    ///
    /// Returns the number of links that matched.
    #[instrument(skip_all, fields(url = %url, selector = %self.selector))]
    pub fn highlight(&self, document: &NodeRef, url: &Url) -> Result<usize> {
        let items = document
            .select(&self.selector)
            .map_err(|()| Error::InvalidSelector {
                selector: self.selector.clone(),
            })?;

        let base = document_base_url(document, url);
        Ok(self.highlight_items(items, &base, url.as_str()))
    }

    /// Like [`NavHighlighter::highlight`], for an item set the caller
    /// already selected.
    pub fn highlight_items<I>(&self, items: I, base: &Url, current: &str) -> usize
    where
        I: IntoIterator<Item = NodeDataRef<ElementData>>,
    {
        let mut scanned = 0;
        let mut matched = 0;

        for item in items {
            scanned += 1;
            let Some(target) = link_target(&item, base) else {
                continue;
            };

            if target == current {
                ClassList::new(&item).add(&self.active_class);
                matched += 1;
            }
        }

        if matched == 0 {
            trace!(scanned, current, "no navigation link points at the current page");
        } else {
            debug!(scanned, matched, current, "marked current navigation link");
        }
        matched
    }
}

/// Highlight with the default `.nav-link` selector and `active` class.
pub fn highlight_current(document: &NodeRef, url: &Url) -> Result<usize> {
    NavHighlighter::default().highlight(document, url)
}

/// The absolute URL an element links to, the way a browser's `href`
/// property reports it.
///
/// `None` for elements that are not links. A link without an `href`
/// attribute resolves to an empty string, and a value that cannot be
/// resolved is returned as written.
pub fn link_target(element: &ElementData, base: &Url) -> Option<String> {
    if !LINK_ELEMENTS.contains(&&*element.name.local) {
        return None;
    }

    let attributes = element.attributes.borrow();
    let Some(href) = attributes.get("href") else {
        return Some(String::new());
    };

    Some(
        base.join(href)
            .map(String::from)
            .unwrap_or_else(|_| href.to_owned()),
    )
}

/// The URL relative links in `document` are resolved against: the first
/// `<base href>` (itself resolved against the page URL), or the page URL.
pub fn document_base_url(document: &NodeRef, url: &Url) -> Url {
    let Ok(base) = document.select_first("base[href]") else {
        return url.clone();
    };

    let attributes = base.attributes.borrow();
    attributes
        .get("href")
        .and_then(|href| url.join(href).ok())
        .unwrap_or_else(|| url.clone())
}
