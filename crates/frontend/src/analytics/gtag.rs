//! Google Analytics (GA4) through `gtag.js`.

use super::host::{TagArg, TagHost, WindowTagHost};
use super::{BridgeState, Tracker};
use crate::shared::config::{normalize_identifier, use_site_config};
use contracts::shared::tracking::EventParameters;
use leptos::prelude::*;
use serde_json::{Map, Value};

pub const GTAG_FUNCTION: &str = "gtag";
pub const GTAG_STUB_ID: &str = "google-analytics";

const GTAG_STUB: &str = "window.dataLayer = window.dataLayer || [];\nfunction gtag(){dataLayer.push(arguments);}";

pub fn gtag_script_url(measurement_id: &str) -> String {
    format!(
        "https://www.googletagmanager.com/gtag/js?id={}",
        urlencoding::encode(measurement_id)
    )
}

/// Loads `gtag.js` for a measurement id and keeps its page-view config current.
pub struct GtagBridge<H: TagHost> {
    host: H,
    state: BridgeState,
}

impl<H: TagHost> GtagBridge<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            state: BridgeState::Pending,
        }
    }

    /// Applies the current measurement id.
    ///
    /// The first call decides whether the bridge is used at all: without an id
    /// it stays off for good. Afterwards only a change of id has an effect.
    pub fn apply(&mut self, measurement_id: Option<&str>) {
        match (self.state.clone(), measurement_id) {
            (BridgeState::Pending, None) => {
                log::warn!(
                    "Google Analytics measurement id is missing; set GA_MEASUREMENT_ID to enable tracking"
                );
                self.state = BridgeState::Inert;
            }
            (BridgeState::Pending, Some(id)) => {
                self.host.inject_inline(GTAG_STUB_ID, GTAG_STUB);
                self.host.inject_script(&gtag_script_url(id));
                self.host
                    .call(GTAG_FUNCTION, &[TagArg::text("js"), TagArg::Now]);
                self.configure(id);
                self.state = BridgeState::Active {
                    identifier: id.to_string(),
                };
            }
            (BridgeState::Active { identifier }, Some(id)) if identifier != id => {
                self.configure(id);
                self.state = BridgeState::Active {
                    identifier: id.to_string(),
                };
            }
            _ => {}
        }
    }

    #[cfg(test)]
    pub fn is_inert(&self) -> bool {
        self.state == BridgeState::Inert
    }

    fn configure(&self, measurement_id: &str) {
        let mut params = Map::new();
        params.insert(
            "page_path".to_string(),
            Value::String(self.host.page_path()),
        );
        log::debug!("gtag config {}", measurement_id);
        self.host.call(
            GTAG_FUNCTION,
            &[
                TagArg::text("config"),
                TagArg::text(measurement_id),
                TagArg::Params(params),
            ],
        );
    }
}

/// Sends `gtag("event", name, params)` if `gtag` exists at call time.
#[derive(Debug, Clone, Default)]
pub struct GtagTracker<H: TagHost = WindowTagHost> {
    host: H,
}

impl<H: TagHost> GtagTracker<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }
}

impl<H: TagHost> Tracker for GtagTracker<H> {
    fn track(&self, name: &str, parameters: Option<&EventParameters>) {
        if !self.host.has_function(GTAG_FUNCTION) {
            log::debug!("gtag not available, dropping '{}'", name);
            return;
        }

        let mut args = vec![TagArg::text("event"), TagArg::text(name)];
        if let Some(params) = parameters {
            args.push(TagArg::Params(params.clone()));
        }
        self.host.call(GTAG_FUNCTION, &args);
    }
}

/// Loads Google Analytics. Renders nothing.
///
/// The measurement id comes from the `measurement_id` prop, falling back to
/// `GA_MEASUREMENT_ID` from the site config.
#[component]
pub fn GoogleAnalytics(
    #[prop(optional, into)]
    measurement_id: MaybeProp<String>,
) -> impl IntoView {
    let fallback = use_site_config().ga_measurement_id;
    let bridge = StoredValue::new_local(GtagBridge::new(WindowTagHost));

    Effect::new(move |_| {
        let id = normalize_identifier(measurement_id.get().as_deref()).or_else(|| fallback.clone());
        bridge.update_value(|b| b.apply(id.as_deref()));
    });
}

#[cfg(test)]
mod tests {
    use super::super::host::testing::{HostAction, RecordingHost};
    use super::*;

    fn config_calls(host: &RecordingHost) -> Vec<String> {
        host.calls()
            .into_iter()
            .filter(|(_, args)| args.first() == Some(&TagArg::text("config")))
            .filter_map(|(_, args)| match args.get(1) {
                Some(TagArg::Text(id)) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_missing_id_makes_bridge_inert() {
        let host = RecordingHost::default();
        let mut bridge = GtagBridge::new(host.clone());

        bridge.apply(None);
        assert!(bridge.is_inert());

        // no re-check once inert
        bridge.apply(Some("G-LATE"));
        assert!(host.is_untouched());
    }

    #[test]
    fn test_first_apply_loads_tag_and_configures_once() {
        let host = RecordingHost::default();
        *host.path.borrow_mut() = "/books".to_string();
        let mut bridge = GtagBridge::new(host.clone());

        bridge.apply(Some("G-ABC123"));

        assert_eq!(
            host.actions.borrow()[0],
            HostAction::Inline(GTAG_STUB_ID.to_string())
        );
        assert_eq!(
            host.scripts(),
            vec!["https://www.googletagmanager.com/gtag/js?id=G-ABC123".to_string()]
        );

        let calls = host.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].1, vec![TagArg::text("js"), TagArg::Now]);

        let mut params = Map::new();
        params.insert("page_path".to_string(), Value::String("/books".to_string()));
        assert_eq!(
            calls[1].1,
            vec![
                TagArg::text("config"),
                TagArg::text("G-ABC123"),
                TagArg::Params(params)
            ]
        );
    }

    #[test]
    fn test_changed_id_reconfigures_once() {
        let host = RecordingHost::default();
        let mut bridge = GtagBridge::new(host.clone());

        bridge.apply(Some("G-FIRST"));
        bridge.apply(Some("G-FIRST"));
        bridge.apply(Some("G-SECOND"));
        bridge.apply(None);

        assert_eq!(config_calls(&host), vec!["G-FIRST", "G-SECOND"]);
        assert_eq!(host.scripts().len(), 1);
    }

    #[test]
    fn test_tracker_follows_tag_loaded_by_bridge() {
        let host = RecordingHost::default();
        let tracker = GtagTracker::new(host.clone());

        tracker.track("before_load", None);
        assert!(host.calls().is_empty());

        GtagBridge::new(host.clone()).apply(Some("G-FROM-PROP"));
        tracker.track("after_load", None);

        let events: Vec<Vec<TagArg>> = host
            .calls()
            .into_iter()
            .map(|(_, args)| args)
            .filter(|args| args[0] == TagArg::text("event"))
            .collect();
        assert_eq!(events, vec![vec![TagArg::text("event"), TagArg::text("after_load")]]);
    }

    #[test]
    fn test_tracker_without_gtag_is_noop() {
        let host = RecordingHost::default();
        let tracker = GtagTracker::new(host.clone());

        tracker.track("whatsapp_order_click", None);
        assert!(host.is_untouched());
    }

    #[test]
    fn test_tracker_forwards_event() {
        let host = RecordingHost::default().with_function(GTAG_FUNCTION);
        let tracker = GtagTracker::new(host.clone());

        let mut params = Map::new();
        params.insert("book_title".to_string(), Value::String("كتاب".to_string()));
        tracker.track("book_view", Some(&params));
        tracker.track("contact_button_click", None);

        let calls = host.calls();
        assert_eq!(
            calls[0],
            (
                "gtag".to_string(),
                vec![
                    TagArg::text("event"),
                    TagArg::text("book_view"),
                    TagArg::Params(params)
                ]
            )
        );
        assert_eq!(
            calls[1].1,
            vec![TagArg::text("event"), TagArg::text("contact_button_click")]
        );
    }
}
