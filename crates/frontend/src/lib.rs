pub mod feed_loader;
pub mod http_client;

pub use feed_loader::*;
pub use http_client::{HttpFeedClient, DEFAULT_API_URL};
