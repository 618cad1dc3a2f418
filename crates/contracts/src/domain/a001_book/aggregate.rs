use serde::{Deserialize, Serialize};

/// Prices are stored in millimes; one Tunisian dinar is 1000 millimes.
pub const MILLIMES_PER_DINAR: u32 = 1000;

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,

    /// Price in millimes
    #[serde(default)]
    pub price: Option<u32>,

    /// Cover image URL or path under the static root
    pub image: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            price: None,
            image: image.into(),
            description: None,
        }
    }

    pub fn with_price(mut self, millimes: u32) -> Self {
        self.price = Some(millimes);
        self
    }

    #[cfg(test)]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Price that is actually shown to the visitor.
    ///
    /// A zero price is treated the same as a missing one: the book is listed
    /// without a price and no price is reported to the trackers.
    pub fn listed_price(&self) -> Option<u32> {
        self.price.filter(|p| *p > 0)
    }

    /// Listed price converted to dinars, as reported to the trackers.
    pub fn price_in_dinars(&self) -> Option<f64> {
        self.listed_price()
            .map(|p| f64::from(p) / f64::from(MILLIMES_PER_DINAR))
    }

    /// Description trimmed of surrounding whitespace, `None` if nothing is left.
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listed_price_ignores_zero() {
        let book = Book::new("كتاب", "مؤلف", "/img/a.jpg").with_price(0);
        assert_eq!(book.listed_price(), None);
        assert_eq!(book.price_in_dinars(), None);
    }

    #[test]
    fn test_price_in_dinars() {
        let book = Book::new("كتاب", "مؤلف", "/img/a.jpg").with_price(45_000);
        assert_eq!(book.listed_price(), Some(45_000));
        assert_eq!(book.price_in_dinars(), Some(45.0));

        let book = book.with_price(45_900);
        assert_eq!(book.price_in_dinars(), Some(45.9));
    }

    #[test]
    fn test_description_text() {
        let book = Book::new("كتاب", "مؤلف", "/img/a.jpg");
        assert_eq!(book.description_text(), None);

        let book = book.with_description("   \n ");
        assert_eq!(book.description_text(), None);

        let book = book.with_description(" نص \n");
        assert_eq!(book.description_text(), Some("نص"));
    }
}
