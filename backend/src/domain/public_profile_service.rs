//! Visitor-facing profile lookup.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use url::{Url, form_urlencoded};

use crate::domain::dashboard_service::{map_favorite_error, map_profile_error};
use crate::domain::ports::{
    FavoriteRepository, ProfileRepository, PublicProfileQuery, PublicProfileView, ShareLinks,
};
use crate::domain::{Error, Handle, Profile, SlotBoard};

const TWITTER_INTENT: &str = "https://twitter.com/intent/tweet";
const LINE_SHARE: &str = "https://social-plugins.line.me/lineit/share";

/// Build share targets for `profile` under `base`.
///
/// # Examples
/// ```
/// use url::Url;
/// use my5::domain::{Handle, share_links};
///
/// let base = Url::parse("https://my5.example/").expect("base url");
/// let handle = Handle::new("cinephile").expect("handle");
/// let links = share_links(&base, &handle, "Cinephile");
/// assert_eq!(links.profile_url, "https://my5.example/u/cinephile");
/// assert!(links.line.ends_with("url=https%3A%2F%2Fmy5.example%2Fu%2Fcinephile"));
/// ```
#[must_use]
pub fn share_links(base: &Url, handle: &Handle, shown_name: &str) -> ShareLinks {
    let profile_url = format!("{}/u/{handle}", base.as_str().trim_end_matches('/'));
    let text = format!("{shown_name}のMy 5をチェック");
    let twitter_query = form_urlencoded::Serializer::new(String::new())
        .append_pair("text", &text)
        .append_pair("url", &profile_url)
        .finish();
    let line_query = form_urlencoded::Serializer::new(String::new())
        .append_pair("url", &profile_url)
        .finish();
    ShareLinks {
        twitter: format!("{TWITTER_INTENT}?{twitter_query}"),
        line: format!("{LINE_SHARE}?{line_query}"),
        profile_url,
    }
}

/// Resolves `/u/{handle}` lookups against the store.
#[derive(Clone)]
pub struct PublicProfileService<P, F> {
    profiles: Arc<P>,
    favorites: Arc<F>,
    public_base_url: Url,
}

impl<P, F> PublicProfileService<P, F> {
    /// Create a service; share links are rooted at `public_base_url`.
    pub fn new(profiles: Arc<P>, favorites: Arc<F>, public_base_url: Url) -> Self {
        Self {
            profiles,
            favorites,
            public_base_url,
        }
    }
}

impl<P, F> PublicProfileService<P, F>
where
    P: ProfileRepository,
    F: FavoriteRepository,
{
    async fn visible(&self, profile: Profile) -> Result<PublicProfileView, Error> {
        let rows = self
            .favorites
            .list_by_slot(&profile.user_id)
            .await
            .map_err(map_favorite_error)?;
        let favorites = SlotBoard::from_rows(rows).filled().cloned().collect();
        let share = share_links(&self.public_base_url, &profile.handle, profile.shown_name());
        Ok(PublicProfileView::Visible {
            profile,
            favorites,
            share,
        })
    }
}

#[async_trait]
impl<P, F> PublicProfileQuery for PublicProfileService<P, F>
where
    P: ProfileRepository,
    F: FavoriteRepository,
{
    async fn by_handle(&self, handle: &str) -> Result<PublicProfileView, Error> {
        let Ok(handle) = Handle::new(handle) else {
            debug!(handle, "malformed handle requested");
            return Err(Error::not_found("profile not found"));
        };
        let profile = self
            .profiles
            .find_by_handle(&handle)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| Error::not_found("profile not found"))?;
        if !profile.is_public {
            return Ok(PublicProfileView::Locked { handle });
        }
        self.visible(profile).await
    }
}
