//! Transport layer (HTTP).
//!
//! Push and scrape handlers plus the response sink a scrape drains into.

pub mod http;
pub mod sink;
