//! Driving port for the public `/u/{handle}` page.

use async_trait::async_trait;

use crate::domain::{Error, Favorite, Handle, Profile};

/// Outbound share targets for a public profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinks {
    /// Canonical profile URL.
    pub profile_url: String,
    /// X/Twitter intent URL.
    pub twitter: String,
    /// LINE share URL.
    pub line: String,
}

/// What a visitor may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicProfileView {
    /// The profile exists but is private; nothing beyond the handle leaks.
    Locked {
        /// Requested handle.
        handle: Handle,
    },
    /// The profile is public.
    Visible {
        /// Profile data.
        profile: Profile,
        /// Filled slots in rank order.
        favorites: Vec<Favorite>,
        /// Share targets.
        share: ShareLinks,
    },
}

/// Resolve a handle into a visitor-facing view.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicProfileQuery: Send + Sync {
    /// Look up `handle`. Unknown or malformed handles are `NotFound`.
    async fn by_handle(&self, handle: &str) -> Result<PublicProfileView, Error>;
}
