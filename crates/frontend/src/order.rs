//! Ordering a book over WhatsApp.

use crate::analytics::Analytics;
use contracts::domain::a001_book::Book;
use contracts::shared::tracking::{
    ContactEvent, InitiateCheckoutEvent, TrackingEvent, WhatsAppOrderEvent,
};

pub const WHATSAPP_BASE_URL: &str = "https://wa.me/";

const GREETING: &str = "السلام عليكم ورحمة الله وبركاته";
const ORDER_INTRO: &str = "أريد طلب الكتاب التالي:";
const THANKS: &str = "شكراً لكم";

/// Opens a URL in a new browsing context.
pub trait LinkOpener {
    fn open(&self, url: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WindowOpener;

impl LinkOpener for WindowOpener {
    fn open(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.open_with_url_and_target(url, "_blank") {
            log::warn!("failed to open {}: {:?}", url, e);
        }
    }
}

/// Message pre-filled in the WhatsApp chat.
///
/// The price line is only present when the book has a listed price and the
/// formatter has something to show for it.
pub fn order_message(book: &Book, format_price: impl Fn(u32) -> Option<String>) -> String {
    let mut message = format!("{GREETING}\n\n{ORDER_INTRO}\n");
    message.push_str(&format!("📖 {}\n", book.title));
    message.push_str(&format!("✍️ {}\n", book.author));
    if let Some(price) = book.listed_price().and_then(format_price) {
        message.push_str(&format!("💰 {}\n", price));
    }
    message.push('\n');
    message.push_str(THANKS);
    message
}

pub fn whatsapp_order_url(phone: &str, message: &str) -> String {
    format!(
        "{}{}?text={}",
        WHATSAPP_BASE_URL,
        phone,
        urlencoding::encode(message)
    )
}

/// Records the order intent, then opens the WhatsApp chat.
///
/// Tracking is best-effort and never holds up the link.
pub fn place_order(
    book: &Book,
    analytics: &Analytics,
    phone: &str,
    format_price: impl Fn(u32) -> Option<String>,
    opener: &dyn LinkOpener,
) {
    analytics
        .pixel
        .track_event(&TrackingEvent::InitiateCheckout(InitiateCheckoutEvent::for_book(book)));
    analytics
        .pixel
        .track_event(&TrackingEvent::Contact(ContactEvent::for_book(book)));
    analytics
        .ga
        .track_event(&TrackingEvent::WhatsAppOrderClick(WhatsAppOrderEvent::from_modal(book)));

    let url = whatsapp_order_url(phone, &order_message(book, format_price));
    log::info!("order via WhatsApp: {}", book.title);
    opener.open(&url);
}
