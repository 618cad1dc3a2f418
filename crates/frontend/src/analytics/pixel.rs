//! Facebook Pixel through `fbevents.js`.

use super::host::{TagArg, TagHost, WindowTagHost};
use super::{BridgeState, Tracker};
use crate::shared::config::{normalize_identifier, use_site_config};
use contracts::shared::tracking::{is_standard_pixel_event_name, EventParameters, TrackingEvent};
use leptos::prelude::*;

pub const FBQ_FUNCTION: &str = "fbq";
pub const PIXEL_STUB_ID: &str = "facebook-pixel";
pub const PIXEL_SCRIPT_URL: &str = "https://connect.facebook.net/en_US/fbevents.js";

// Queues calls until fbevents.js takes over.
const PIXEL_STUB: &str = "!function(f){if(f.fbq)return;var n=f.fbq=function(){n.callMethod?n.callMethod.apply(n,arguments):n.queue.push(arguments)};if(!f._fbq)f._fbq=n;n.push=n;n.loaded=!0;n.version='2.0';n.queue=[]}(window);";

pub struct PixelBridge<H: TagHost> {
    host: H,
    state: BridgeState,
}

impl<H: TagHost> PixelBridge<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            state: BridgeState::Pending,
        }
    }

    /// Same rules as the gtag bridge: no id on first call turns the bridge off
    /// for good, a changed id re-initialises and records one more page view.
    pub fn apply(&mut self, pixel_id: Option<&str>) {
        match (self.state.clone(), pixel_id) {
            (BridgeState::Pending, None) => {
                log::warn!("Facebook Pixel id is missing; set FB_PIXEL_ID to enable tracking");
                self.state = BridgeState::Inert;
            }
            (BridgeState::Pending, Some(id)) => {
                self.host.inject_inline(PIXEL_STUB_ID, PIXEL_STUB);
                self.host.inject_script(PIXEL_SCRIPT_URL);
                self.init(id);
                self.state = BridgeState::Active {
                    identifier: id.to_string(),
                };
            }
            (BridgeState::Active { identifier }, Some(id)) if identifier != id => {
                self.init(id);
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

    fn init(&self, pixel_id: &str) {
        log::debug!("fbq init {}", pixel_id);
        self.host
            .call(FBQ_FUNCTION, &[TagArg::text("init"), TagArg::text(pixel_id)]);
        self.host
            .call(FBQ_FUNCTION, &[TagArg::text("track"), TagArg::text("PageView")]);
    }
}

/// Sends `fbq("track" | "trackCustom", name, params)` if `fbq` exists.
#[derive(Debug, Clone, Default)]
pub struct PixelTracker<H: TagHost = WindowTagHost> {
    host: H,
}

impl<H: TagHost> PixelTracker<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    fn send(&self, standard: bool, name: &str, parameters: Option<&EventParameters>) {
        if !self.host.has_function(FBQ_FUNCTION) {
            log::debug!("fbq not available, dropping '{}'", name);
            return;
        }

        let method = if standard { "track" } else { "trackCustom" };
        let mut args = vec![TagArg::text(method), TagArg::text(name)];
        if let Some(params) = parameters {
            args.push(TagArg::Params(params.clone()));
        }
        self.host.call(FBQ_FUNCTION, &args);
    }
}

impl<H: TagHost> Tracker for PixelTracker<H> {
    fn track(&self, name: &str, parameters: Option<&EventParameters>) {
        self.send(is_standard_pixel_event_name(name), name, parameters);
    }

    fn track_event(&self, event: &TrackingEvent) {
        let parameters = event.parameters();
        self.send(event.is_standard_pixel_event(), event.name(), parameters.as_ref());
    }
}

/// Loads the Facebook Pixel. Renders nothing.
#[component]
pub fn FacebookPixel(
    #[prop(optional, into)]
    pixel_id: MaybeProp<String>,
) -> impl IntoView {
    let fallback = use_site_config().pixel_id;
    let bridge = StoredValue::new_local(PixelBridge::new(WindowTagHost));

    Effect::new(move |_| {
        let id = normalize_identifier(pixel_id.get().as_deref()).or_else(|| fallback.clone());
        bridge.update_value(|b| b.apply(id.as_deref()));
    });
}
