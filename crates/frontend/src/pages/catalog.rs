use crate::analytics::Analytics;
use crate::components::BookDetailsModal;
use crate::shared::format::{format_book_title, format_price};
use contracts::domain::a001_book::{parse_catalog, Book};
use contracts::shared::tracking::TrackingEvent;
use leptos::prelude::*;
use serde_json::{Map, Value};
use thaw::Card;

const CATALOG_JSON: &str = include_str!("../../assets/books.json");

fn load_catalog() -> Vec<Book> {
    match parse_catalog(CATALOG_JSON) {
        Ok(books) => books,
        Err(e) => {
            log::error!("failed to load catalog: {:#}", e);
            Vec::new()
        }
    }
}

fn book_view_event(book: &Book) -> TrackingEvent {
    let mut params = Map::new();
    params.insert("book_title".to_string(), Value::String(book.title.clone()));
    params.insert("book_author".to_string(), Value::String(book.author.clone()));
    TrackingEvent::custom_with("book_view", params)
}

/// Grid of books; selecting one opens its details.
#[component]
pub fn CatalogPage() -> impl IntoView {
    let analytics = use_context::<Analytics>().unwrap_or_else(Analytics::noop);
    let books = load_catalog();

    let selected = RwSignal::new(None::<Book>);
    let is_open = RwSignal::new(false);

    let open_book = move |book: Book| {
        analytics.ga.track_event(&book_view_event(&book));
        selected.set(Some(book));
        is_open.set(true);
    };

    let on_close = Callback::new(move |_| {
        is_open.set(false);
        selected.set(None);
    });

    view! {
        <main class="catalog" dir="rtl">
            <div class="catalog__grid">
                {books
                    .into_iter()
                    .enumerate()
                    .map(|(idx, book)| {
                        let open_book = open_book.clone();
                        let price = book.listed_price().and_then(format_price);
                        let style = format!("animation: card-appear 0.28s ease-out {}ms both;", idx * 80);
                        let tile_book = book.clone();
                        view! {
                            <div class="book-tile" on:click=move |_| open_book(tile_book.clone())>
                                <Card attr:style=style>
                                    <img class="book-tile__cover" src=book.image.clone() alt=book.title.clone() loading="lazy" />
                                    <h3 class="book-tile__title">{format_book_title(book.title.clone())}</h3>
                                    <p class="book-tile__author">{book.author.clone()}</p>
                                    {price.map(|p| view! { <p class="book-tile__price">{p}</p> })}
                                </Card>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            <BookDetailsModal
                book=selected
                is_open=is_open
                on_close=on_close
                format_price=Callback::new(format_price)
                format_book_title=Callback::new(format_book_title)
            />
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_parses() {
        let books = parse_catalog(CATALOG_JSON).unwrap();
        assert!(!books.is_empty());
        assert!(books.iter().any(|b| b.listed_price().is_none()));
    }

    #[test]
    fn test_book_view_event() {
        let book = Book::new("كتاب", "مؤلف", "/books/1.jpg");
        let event = book_view_event(&book);
        assert_eq!(event.name(), "book_view");
        let params = event.parameters().unwrap();
        assert_eq!(params.get("book_author").and_then(|v| v.as_str()), Some("مؤلف"));
    }
}
