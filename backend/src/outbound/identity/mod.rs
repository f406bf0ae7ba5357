//! Identity service outbound adapter.

mod dto;
mod http_provider;

pub use http_provider::HttpIdentityProvider;
