// Utility modules for the phishguard engine

pub mod url_normalizer;

pub use url_normalizer::{domain_of, extract_urls, normalize_candidate};
