//! Dismissible alert banners.
//!
//! A banner is inserted as the first child of the page's content container
//! and removed again after [`DISMISS_AFTER`], unless the user dismissed it
//! first.

use crate::{
    Config,
    class_list::ClassList,
    error::{Error, Result},
};
use kuchikiki::{ElementData, NodeRef, traits::TendrilSink as _};
use roehn_timers::{TimerHandle, TimerQueue};
use std::{convert::Infallible, fmt, str::FromStr, time::Duration};
use tracing::{debug, instrument, trace};

pub const CONTAINER_SELECTOR: &str = ".container";
pub const DISMISS_AFTER: Duration = Duration::from_millis(5000);

/// Bootstrap's dismissible alert markup, including its accessibility
/// attributes. The class list is set per banner.
const BANNER_TEMPLATE: &str = r#"<div role="alert"><button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button></div>"#;

/// Selects the banner's `alert-*` style class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    #[default]
    Success,
    Danger,
    Warning,
    Info,
    /// Any other style suffix, used verbatim.
    Other(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Other(suffix) => suffix,
        }
    }

    pub fn class(&self) -> String {
        format!("alert-{}", self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "success" => Self::Success,
            "danger" => Self::Danger,
            "warning" => Self::Warning,
            "info" => Self::Info,
            other => Self::Other(other.to_owned()),
        })
    }
}

impl From<&str> for Severity {
    fn from(value: &str) -> Self {
        value.parse().unwrap_or_else(|never: Infallible| match never {})
    }
}

/// What goes before the close button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertContent {
    /// Inserted as a text node, so markup characters are escaped when the
    /// page is serialized.
    Text(String),
    /// Parsed as HTML in the context of the banner `div`, the way
    /// `innerHTML` is. Only for trusted input.
    Markup(String),
}

impl AlertContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn markup(markup: impl Into<String>) -> Self {
        Self::Markup(markup.into())
    }

    fn to_nodes(&self, context: &ElementData) -> Vec<NodeRef> {
        match self {
            Self::Text(text) => vec![NodeRef::new_text(text.as_str())],
            Self::Markup(markup) => {
                // fragment parsing puts everything below a synthetic `html`
                // root, head-only elements included.
                let fragment = kuchikiki::parse_fragment(context.name.clone(), Vec::new())
                    .one(markup.as_str());
                match fragment.select_first("html") {
                    Ok(root) => root.as_node().children().collect(),
                    Err(()) => Vec::new(),
                }
            }
        }
    }
}

impl From<&str> for AlertContent {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for AlertContent {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A banner that was put on the page, and its pending removal.
#[derive(Debug, Clone)]
pub struct AlertHandle {
    banner: NodeRef,
    removal: TimerHandle,
}

impl AlertHandle {
    pub fn banner(&self) -> &NodeRef {
        &self.banner
    }

    pub fn removal_timer(&self) -> TimerHandle {
        self.removal
    }

    pub fn is_attached(&self) -> bool {
        self.banner.parent().is_some()
    }

    /// Remove the banner now, as the close button would.
    ///
    /// Returns `false` if it was already gone. The scheduled removal stays
    /// pending and does nothing when it fires.
    pub fn dismiss(&self) -> bool {
        if !self.is_attached() {
            return false;
        }
        self.banner.detach();
        true
    }

    /// Keep the banner on the page.
    ///
    /// Returns `false` if the removal already ran or was cancelled before.
    pub fn cancel_removal(&self, timers: &mut TimerQueue) -> bool {
        timers.clear_timeout(self.removal)
    }
}

#[derive(Debug, Clone)]
pub struct AlertPresenter {
    container_selector: String,
    dismiss_after: Duration,
}

impl Default for AlertPresenter {
    fn default() -> Self {
        Self::new(CONTAINER_SELECTOR, DISMISS_AFTER)
    }
}

impl AlertPresenter {
    pub fn new(container_selector: impl Into<String>, dismiss_after: Duration) -> Self {
        Self {
            container_selector: container_selector.into(),
            dismiss_after,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.alert_container, config.alert_dismiss_after)
    }

    /// Show a banner in the first element of `document` matching the
    /// container selector.
    ///
    /// Fails with [`Error::ContainerNotFound`] when there is no such element,
    /// in which case the document and the timer queue are left untouched.
    #[instrument(skip_all, fields(container = %self.container_selector, %severity))]
    pub fn show(
        &self,
        document: &NodeRef,
        timers: &mut TimerQueue,
        message: impl Into<AlertContent>,
        severity: Severity,
    ) -> Result<AlertHandle> {
        let container = document
            .select(&self.container_selector)
            .map_err(|()| Error::InvalidSelector {
                selector: self.container_selector.clone(),
            })?
            .next()
            .ok_or_else(|| Error::ContainerNotFound {
                selector: self.container_selector.clone(),
            })?;

        Ok(self.show_in(container.as_node(), timers, message, severity))
    }

    /// Show a banner as the first child of `container`.
    pub fn show_in(
        &self,
        container: &NodeRef,
        timers: &mut TimerQueue,
        message: impl Into<AlertContent>,
        severity: Severity,
    ) -> AlertHandle {
        let banner = build_banner(&message.into(), &severity);
        container.prepend(banner.clone());

        let removal = {
            let banner = banner.clone();
            timers.set_timeout(self.dismiss_after, move || {
                if banner.parent().is_some() {
                    banner.detach();
                    debug!("removed alert banner");
                } else {
                    trace!("alert banner was already dismissed");
                }
            })
        };
        debug!(%removal, delay = ?self.dismiss_after, "showing alert banner");

        AlertHandle { banner, removal }
    }
}

/// Show a banner in the `.container` element, removed after five seconds.
pub fn show_alert(
    document: &NodeRef,
    timers: &mut TimerQueue,
    message: impl Into<AlertContent>,
    severity: Severity,
) -> Result<AlertHandle> {
    AlertPresenter::default().show(document, timers, message, severity)
}

/// Handle a click on a `data-bs-dismiss="alert"` control: remove the closest
/// enclosing alert.
///
/// Returns `false` when `control` is not a dismiss control or sits outside of
/// any alert.
pub fn dismiss(control: &NodeRef) -> bool {
    let is_dismiss_control = control
        .as_element()
        .is_some_and(|element| element.attributes.borrow().get("data-bs-dismiss") == Some("alert"));
    if !is_dismiss_control {
        return false;
    }

    let alert = control.inclusive_ancestors().find(|node| {
        node.as_element()
            .is_some_and(|element| ClassList::new(element).contains("alert"))
    });
    match alert {
        Some(alert) if alert.parent().is_some() => {
            alert.detach();
            true
        }
        _ => false,
    }
}

fn build_banner(content: &AlertContent, severity: &Severity) -> NodeRef {
    let template = kuchikiki::parse_html().one(BANNER_TEMPLATE);
    let banner = template
        .select_first("div[role=alert]")
        .expect("the banner template always contains the alert element");

    banner.attributes.borrow_mut().insert(
        "class",
        format!("alert {} alert-dismissible fade show", severity.class()),
    );

    let nodes = content.to_nodes(&banner);
    let banner = banner.as_node().clone();
    banner.detach();

    if let Some(close) = banner.first_child() {
        for node in nodes {
            close.insert_before(node);
        }
    }
    banner
}
