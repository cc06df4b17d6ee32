pub mod links;

pub use links::{build_reader_url, check_url, unescape_shared_url};
