//! Ranking API outbound adapter.
//!
//! A thin HTTP implementation of the `RankingApi` port.

mod dto;
mod http_client;

pub use http_client::RankingApiHttpClient;
