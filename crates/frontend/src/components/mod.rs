pub mod book_details_modal;

pub use book_details_modal::BookDetailsModal;
