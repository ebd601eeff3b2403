use crate::{
    Config,
    alert::{AlertContent, AlertHandle, AlertPresenter, Severity},
    error::Result,
    nav::NavHighlighter,
};
use kuchikiki::{NodeRef, traits::TendrilSink as _};
use roehn_timers::TimerQueue;
use std::{sync::Arc, time::Duration};
use tracing::{debug, instrument};
use url::Url;

/// A parsed page together with the host facilities the page behaviour needs:
/// its URL and a timer queue.
#[derive(Debug)]
pub struct Page {
    document: NodeRef,
    url: Url,
    config: Arc<Config>,
    timers: TimerQueue,
    nav: NavHighlighter,
    alerts: AlertPresenter,
    content_loaded: bool,
}

impl Page {
    pub fn parse(html: &str, url: Url, config: Arc<Config>) -> Self {
        Self {
            document: kuchikiki::parse_html().one(html),
            nav: NavHighlighter::from_config(&config),
            alerts: AlertPresenter::from_config(&config),
            url,
            config,
            timers: TimerQueue::new(),
            content_loaded: false,
        }
    }

    pub fn document(&self) -> &NodeRef {
        &self.document
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut TimerQueue {
        &mut self.timers
    }

    /// The document finished parsing: mark the current navigation link.
    ///
    /// Only the first successful call does anything, later calls return
    /// `Ok(0)`. A failed call leaves the page not loaded.
    #[instrument(skip_all, fields(url = %self.url))]
    pub fn content_loaded(&mut self) -> Result<usize> {
        if self.content_loaded {
            debug!("content already loaded");
            return Ok(0);
        }
        let matched = self.nav.highlight(&self.document, &self.url)?;
        self.content_loaded = true;
        Ok(matched)
    }

    pub fn is_content_loaded(&self) -> bool {
        self.content_loaded
    }

    pub fn show_alert(
        &mut self,
        message: impl Into<AlertContent>,
        severity: Severity,
    ) -> Result<AlertHandle> {
        self.alerts
            .show(&self.document, &mut self.timers, message, severity)
    }

    /// Let `elapsed` pass on the page's clock, running the timers that
    /// become due.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.timers.advance(elapsed)
    }

    pub fn to_html(&self) -> String {
        self.document.to_string()
    }
}
