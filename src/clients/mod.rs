//! Client modules for external HTTP interactions

pub mod reader_client;

pub use reader_client::{JinaReaderClient, PageReader};
