//! Tracking events reported by the catalog page.
//!
//! Every event the page sends has a fixed set of typed fields; only
//! `TrackingEvent::Custom` carries a free-form parameter map.

use crate::domain::a001_book::Book;
use serde::Serialize;
use serde_json::{Map, Value};

pub const CURRENCY_TND: &str = "TND";
pub const BOOK_CATEGORY: &str = "Book";
pub const ENGAGEMENT_CATEGORY: &str = "engagement";
pub const MODAL_ORDER_LABEL: &str = "Book Order - Modal";

pub type EventParameters = Map<String, Value>;

/// Events the pixel knows natively; anything else goes through `trackCustom`.
pub const STANDARD_PIXEL_EVENTS: &[&str] = &[
    "AddPaymentInfo",
    "AddToCart",
    "AddToWishlist",
    "CompleteRegistration",
    "Contact",
    "CustomizeProduct",
    "Donate",
    "FindLocation",
    "InitiateCheckout",
    "Lead",
    "PageView",
    "Purchase",
    "Schedule",
    "Search",
    "StartTrial",
    "SubmitApplication",
    "Subscribe",
    "ViewContent",
];

pub fn is_standard_pixel_event_name(name: &str) -> bool {
    STANDARD_PIXEL_EVENTS.contains(&name)
}

// ============================================================================
// Payloads
// ============================================================================

/// Pixel standard event `InitiateCheckout`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitiateCheckoutEvent {
    pub content_name: String,
    pub content_category: String,
    pub content_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub currency: String,
}

impl InitiateCheckoutEvent {
    pub fn for_book(book: &Book) -> Self {
        Self {
            content_name: book.title.clone(),
            content_category: BOOK_CATEGORY.to_string(),
            content_ids: vec![book.title.clone()],
            value: book.price_in_dinars(),
            currency: CURRENCY_TND.to_string(),
        }
    }
}

/// Pixel standard event `Contact`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactEvent {
    pub content_name: String,
}

impl ContactEvent {
    pub fn for_book(book: &Book) -> Self {
        Self {
            content_name: book.title.clone(),
        }
    }
}

/// Analytics event `whatsapp_order_click`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhatsAppOrderEvent {
    pub book_title: String,
    pub book_author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_price: Option<f64>,
    pub currency: String,
    pub event_category: String,
    pub event_label: String,
}

impl WhatsAppOrderEvent {
    pub fn from_modal(book: &Book) -> Self {
        Self {
            book_title: book.title.clone(),
            book_author: book.author.clone(),
            book_price: book.price_in_dinars(),
            currency: CURRENCY_TND.to_string(),
            event_category: ENGAGEMENT_CATEGORY.to_string(),
            event_label: MODAL_ORDER_LABEL.to_string(),
        }
    }
}

// ============================================================================
// Event
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum TrackingEvent {
    InitiateCheckout(InitiateCheckoutEvent),
    Contact(ContactEvent),
    WhatsAppOrderClick(WhatsAppOrderEvent),
    /// Ad-hoc engagement event (`book_view`, `contact_button_click`, ...)
    Custom {
        name: String,
        parameters: Option<EventParameters>,
    },
}

impl TrackingEvent {
    pub fn custom(name: impl Into<String>) -> Self {
        TrackingEvent::Custom {
            name: name.into(),
            parameters: None,
        }
    }

    pub fn custom_with(name: impl Into<String>, parameters: EventParameters) -> Self {
        TrackingEvent::Custom {
            name: name.into(),
            parameters: Some(parameters),
        }
    }

    /// Event name as the tags expect it.
    pub fn name(&self) -> &str {
        match self {
            TrackingEvent::InitiateCheckout(_) => "InitiateCheckout",
            TrackingEvent::Contact(_) => "Contact",
            TrackingEvent::WhatsAppOrderClick(_) => "whatsapp_order_click",
            TrackingEvent::Custom { name, .. } => name,
        }
    }

    /// Parameters as a JSON object. Absent optional fields are left out.
    pub fn parameters(&self) -> Option<EventParameters> {
        match self {
            TrackingEvent::InitiateCheckout(e) => to_parameters(e),
            TrackingEvent::Contact(e) => to_parameters(e),
            TrackingEvent::WhatsAppOrderClick(e) => to_parameters(e),
            TrackingEvent::Custom { parameters, .. } => parameters.clone(),
        }
    }

    /// Whether the pixel knows this event natively (`track`) or needs `trackCustom`.
    pub fn is_standard_pixel_event(&self) -> bool {
        is_standard_pixel_event_name(self.name())
    }
}

fn to_parameters<T: Serialize>(payload: &T) -> Option<EventParameters> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
