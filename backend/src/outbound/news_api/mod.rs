//! News API outbound adapter implementing the `NewsSource` port.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_NEWS_API_URL, NewsApiSource};
