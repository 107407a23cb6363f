//! Local library of bibliographic records.
//!
//! The library is a JSON object mapping bibcode to [`Article`]. It is only
//! read here; a missing or unreadable cache is an empty library.

mod article;
mod cache;
mod years;

use std::collections::BTreeMap;

pub use article::Article;
pub use cache::load_library;
pub use years::year_histogram;

/// Articles keyed by bibcode, iterated in bibcode order.
pub type Library = BTreeMap<String, Article>;
