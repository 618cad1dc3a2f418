pub mod aggregate;
pub mod catalog;

pub use aggregate::{Book, MILLIMES_PER_DINAR};
pub use catalog::parse_catalog;
