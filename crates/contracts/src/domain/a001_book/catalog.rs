use super::aggregate::Book;
use anyhow::Context;

/// Parse a catalog document (a JSON array of books).
pub fn parse_catalog(json: &str) -> anyhow::Result<Vec<Book>> {
    let books: Vec<Book> =
        serde_json::from_str(json).context("catalog is not a valid list of books")?;
    Ok(books)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog() {
        let json = r#"[
            {"title": "كتاب", "author": "مؤلف", "price": 45000, "image": "/books/1.jpg"},
            {"title": "Second", "author": "Someone", "image": "/books/2.jpg", "description": "text"}
        ]"#;

        let books = parse_catalog(json).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].price, Some(45_000));
        assert_eq!(books[0].description, None);
        assert_eq!(books[1].price, None);
        assert_eq!(books[1].description.as_deref(), Some("text"));
    }

    #[test]
    fn test_parse_catalog_rejects_garbage() {
        let err = parse_catalog(r#"{"title": "x"}"#).unwrap_err();
        assert!(err.to_string().contains("catalog"));
    }
}
