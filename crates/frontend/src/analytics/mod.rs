//! Fire-and-forget analytics.
//!
//! Two tags are supported: Google Analytics (`gtag`) and the Facebook Pixel
//! (`fbq`). Each one has a bridge that loads the tag once per page and a
//! [`Tracker`] that forwards events to it if it is there. Nothing here ever
//! fails: a tag that is not configured, not loaded yet or blocked simply
//! drops the event.

pub mod gtag;
pub mod host;
pub mod pixel;

pub use gtag::{GoogleAnalytics, GtagBridge, GtagTracker};
pub use host::{TagArg, TagHost, WindowTagHost};
pub use pixel::{FacebookPixel, PixelBridge, PixelTracker};

use contracts::shared::tracking::{EventParameters, TrackingEvent};
use std::sync::Arc;

pub trait Tracker {
    fn track(&self, name: &str, parameters: Option<&EventParameters>);

    fn track_event(&self, event: &TrackingEvent) {
        let parameters = event.parameters();
        self.track(event.name(), parameters.as_ref());
    }
}

/// Used when a tag is not configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracker;

impl Tracker for NoopTracker {
    fn track(&self, _name: &str, _parameters: Option<&EventParameters>) {}
}

pub type SharedTracker = Arc<dyn Tracker + Send + Sync>;

/// Trackers available to the page, provided through context.
#[derive(Clone)]
pub struct Analytics {
    pub pixel: SharedTracker,
    pub ga: SharedTracker,
}

impl Analytics {
    pub fn new(pixel: SharedTracker, ga: SharedTracker) -> Self {
        Self { pixel, ga }
    }

    pub fn noop() -> Self {
        Self::new(Arc::new(NoopTracker), Arc::new(NoopTracker))
    }

    /// Browser trackers for both tags.
    ///
    /// A tag that was never loaded (no id from the config or from the
    /// component prop) has no global function, so its tracker drops events.
    pub fn browser() -> Self {
        Self::new(
            Arc::new(PixelTracker::new(WindowTagHost)),
            Arc::new(GtagTracker::new(WindowTagHost)),
        )
    }
}

/// Lifecycle shared by the tag bridges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BridgeState {
    /// Not applied yet
    Pending,
    /// No identifier on first application; stays off for the page lifetime
    Inert,
    Active { identifier: String },
}
