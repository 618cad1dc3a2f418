//! Default formatters the catalog page hands to the book modal.

use contracts::domain::a001_book::MILLIMES_PER_DINAR;
use leptos::prelude::*;

pub const DINAR_SUFFIX: &str = "د.ت";

/// Inserts a space every 3 digits from the right.
///
/// ```
/// # use frontend::shared::format::group_thousands;
/// assert_eq!(group_thousands(1234567), "1 234 567");
/// ```
pub fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut result = String::new();

    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(' ');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}

/// Formats a price in millimes as dinars, e.g. `45 د.ت` or `45.900 د.ت`.
///
/// Returns `None` for a zero price, which the page never shows.
pub fn format_price(millimes: u32) -> Option<String> {
    if millimes == 0 {
        return None;
    }

    let dinars = millimes / MILLIMES_PER_DINAR;
    let rest = millimes % MILLIMES_PER_DINAR;

    let amount = if rest == 0 {
        group_thousands(dinars)
    } else {
        format!("{}.{:03}", group_thousands(dinars), rest)
    };

    Some(format!("{} {}", amount, DINAR_SUFFIX))
}

/// Splits `"Title: subtitle"` into its two parts.
pub fn split_title(title: &str) -> (&str, Option<&str>) {
    match title.split_once(':') {
        Some((main, subtitle)) if !subtitle.trim().is_empty() => {
            (main.trim(), Some(subtitle.trim()))
        }
        _ => (title.trim(), None),
    }
}

/// Renders a title with its subtitle on a smaller second line.
pub fn format_book_title(title: String) -> AnyView {
    let (main, subtitle) = split_title(&title);
    let main = main.to_string();
    let subtitle = subtitle.map(str::to_string);

    view! {
        <span class="book-title__main">{main}</span>
        {subtitle.map(|s| view! { <span class="book-title__subtitle">{s}</span> })}
    }
    .into_any()
}
