mod bindings;

pub use bindings::ModalBindings;

use crate::analytics::Analytics;
use crate::order::{place_order, LinkOpener, WindowOpener};
use crate::shared::config::use_site_config;
use crate::shared::icons::icon;
use crate::shared::key_listener::{is_dismiss_key, KeydownListener};
use crate::shared::modal_frame::{close_deferred, ModalFrame};
use crate::shared::scroll_lock::BodyScrollLock;
use contracts::domain::a001_book::Book;
use leptos::prelude::*;
use std::sync::Arc;

const DESCRIPTION_PLACEHOLDER: &str = "سيتم إضافة وصف الكتاب قريباً...";

/// The modal shows only when it is open and a book is selected.
pub fn is_visible(is_open: bool, book: Option<&Book>) -> bool {
    is_open && book.is_some()
}

/// Book details with a WhatsApp order button.
///
/// Renders nothing unless `is_open` is set and a book is selected. While it is
/// visible, Escape closes it and the page behind it does not scroll.
#[component]
pub fn BookDetailsModal(
    #[prop(into)]
    book: Signal<Option<Book>>,
    #[prop(into)]
    is_open: Signal<bool>,
    /// Called on Escape, overlay click and the close button
    on_close: Callback<()>,
    /// Price in millimes to display text; `None` hides the price
    format_price: Callback<u32, Option<String>>,
    format_book_title: Callback<String, AnyView>,
    /// Trackers; taken from context when not given
    #[prop(optional)]
    analytics: Option<Analytics>,
    /// Opens the WhatsApp link; `window.open` when not given
    #[prop(optional)]
    opener: Option<Arc<dyn LinkOpener + Send + Sync>>,
) -> impl IntoView {
    let analytics = analytics
        .or_else(use_context::<Analytics>)
        .unwrap_or_else(Analytics::noop);
    let opener: Arc<dyn LinkOpener + Send + Sync> =
        opener.unwrap_or_else(|| Arc::new(WindowOpener));
    let order_phone = use_site_config().order_phone;

    let visible = Memo::new(move |_| {
        let open = is_open.get();
        book.with(|b| is_visible(open, b.as_ref()))
    });

    let bindings = StoredValue::new_local(ModalBindings::new(
        KeydownListener::new(move |key| {
            if is_dismiss_key(&key, visible.get_untracked()) {
                close_deferred(on_close);
            }
        }),
        BodyScrollLock::for_document(),
    ));

    Effect::new(move |_| {
        let visible = visible.get();
        bindings.update_value(|b| b.rebind(visible));
    });

    on_cleanup(move || {
        bindings.try_update_value(|b| b.release());
    });

    let on_order = move |_: leptos::ev::MouseEvent| {
        if let Some(book) = book.get_untracked() {
            place_order(
                &book,
                &analytics,
                &order_phone,
                |price| format_price.run(price),
                opener.as_ref(),
            );
        }
    };

    move || {
        let current = match book.get() {
            Some(selected) if visible.get() => selected,
            _ => return view! { <></> }.into_any(),
        };

        let price = current.listed_price().and_then(|p| format_price.run(p));
        let description = current.description_text().map(str::to_string);
        let alt = format!("غلاف كتاب {} للمؤلف {}", current.title, current.author);
        let order_label = format!("طلب {} عبر واتساب", current.title);
        let Book {
            title,
            author,
            image,
            ..
        } = current;
        let on_order = on_order.clone();

        view! {
            <ModalFrame on_close=on_close panel_class="book-modal">
                <button
                    class="book-modal__close"
                    aria-label="إغلاق"
                    on:click=move |_| close_deferred(on_close)
                >
                    {icon("x")}
                </button>

                <div class="book-modal__layout">
                    <div class="book-modal__cover">
                        <img src=image alt=alt loading="lazy" />
                    </div>

                    <div class="book-modal__info">
                        <h2 class="book-modal__title">{format_book_title.run(title)}</h2>
                        <p class="book-modal__author">"✍️ " {author}</p>
                        {price.map(|p| view! { <p class="book-modal__price">{p}</p> })}

                        <div class="book-modal__description">
                            <h3>"عن الكتاب"</h3>
                            {match description {
                                Some(text) => view! {
                                    <p class="book-modal__text">{text}</p>
                                }.into_any(),
                                None => view! {
                                    <p class="book-modal__text book-modal__text--empty">
                                        {DESCRIPTION_PLACEHOLDER}
                                    </p>
                                }.into_any(),
                            }}
                        </div>

                        <button class="book-modal__order" aria-label=order_label on:click=on_order>
                            {icon("whatsapp")}
                            <span>"اطلب عبر واتساب"</span>
                        </button>
                    </div>
                </div>
            </ModalFrame>
        }
        .into_any()
    }
}
