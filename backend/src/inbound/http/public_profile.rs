//! Visitor-facing profile: JSON under `/api/v1/profiles/{handle}` and a
//! server-rendered page at `/u/{handle}`.
//!
//! Neither route needs a session. A private profile yields only its handle.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, web};
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::{PublicProfileView, ShareLinks};
use crate::domain::{Error, ErrorCode, Favorite, Handle, Profile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::LOGIN_PATH;
use crate::inbound::http::state::HttpState;

const LOCKED_TEXT: &str = "このプロフィールは非公開です";
const EMPTY_BOARD_TEXT: &str = "まだお気に入りが登録されていません";
const CREATE_OWN_TEXT: &str = "あなたもMY5を作る";
const NOT_FOUND_TITLE: &str = "Not Found — MY5";

/// Share targets.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareLinksBody {
    pub profile_url: String,
    pub twitter: String,
    pub line: String,
}

impl From<ShareLinks> for ShareLinksBody {
    fn from(links: ShareLinks) -> Self {
        Self {
            profile_url: links.profile_url,
            twitter: links.twitter,
            line: links.line,
        }
    }
}

/// Public profile payload. When `locked` is set only `handle` is present.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfileBody {
    pub handle: Handle,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub favorites: Vec<Favorite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share: Option<ShareLinksBody>,
}

impl From<PublicProfileView> for PublicProfileBody {
    fn from(view: PublicProfileView) -> Self {
        match view {
            PublicProfileView::Locked { handle } => Self {
                handle,
                locked: true,
                display_name: None,
                bio: None,
                favorites: Vec::new(),
                share: None,
            },
            PublicProfileView::Visible {
                profile,
                favorites,
                share,
            } => Self {
                display_name: Some(profile.shown_name().to_owned()),
                bio: Some(profile.bio),
                handle: profile.handle,
                locked: false,
                favorites,
                share: Some(share.into()),
            },
        }
    }
}

/// Public profile as JSON.
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{handle}",
    params(("handle" = String, Path, description = "Profile handle")),
    responses(
        (status = 200, description = "Profile or locked placeholder", body = PublicProfileBody),
        (status = 404, description = "Unknown handle", body = Error)
    ),
    tags = ["profiles"],
    operation_id = "getPublicProfile",
    security([])
)]
#[get("/profiles/{handle}")]
pub async fn public_profile_json(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PublicProfileBody>> {
    let view = state.public_profiles.by_handle(&path.into_inner()).await?;
    Ok(web::Json(view.into()))
}

/// Public profile as an HTML page.
#[get("/u/{handle}")]
pub async fn public_profile_page(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    match state.public_profiles.by_handle(&path.into_inner()).await {
        Ok(view) => Ok(html(HttpResponse::Ok(), render_view(&view))),
        Err(err) if err.code() == ErrorCode::NotFound => {
            Ok(html(HttpResponse::NotFound(), render_not_found()))
        }
        Err(err) => Err(err),
    }
}

fn html(mut builder: actix_web::HttpResponseBuilder, body: String) -> HttpResponse {
    builder.content_type(ContentType::html()).body(body)
}

fn render_view(view: &PublicProfileView) -> String {
    match view {
        PublicProfileView::Locked { handle } => {
            let title = format!("@{handle} — MY5");
            let main = format!(
                "<p class=\"handle\">@{}</p>\n<p class=\"locked\">{LOCKED_TEXT}</p>",
                encode_text(handle.as_str())
            );
            page(&title, None, &main)
        }
        PublicProfileView::Visible {
            profile,
            favorites,
            share,
        } => {
            let name = profile.shown_name();
            let title = format!("{name} — MY5");
            let description = format!("{name}のMy 5をチェック");
            page(&title, Some(&description), &render_profile(profile, favorites, share))
        }
    }
}

fn render_profile(profile: &Profile, favorites: &[Favorite], share: &ShareLinks) -> String {
    let mut out = format!(
        "<h1>{}</h1>\n<p class=\"handle\">@{}</p>\n",
        encode_text(profile.shown_name()),
        encode_text(profile.handle.as_str()),
    );
    if !profile.bio.trim().is_empty() {
        out.push_str(&format!("<p class=\"bio\">{}</p>\n", encode_text(&profile.bio)));
    }
    if favorites.is_empty() {
        out.push_str(&format!("<p class=\"empty\">{EMPTY_BOARD_TEXT}</p>\n"));
    } else {
        out.push_str("<ol class=\"favorites\">\n");
        for favorite in favorites {
            out.push_str(&render_favorite(favorite));
        }
        out.push_str("</ol>\n");
    }
    out.push_str(&format!(
        "<nav class=\"share\">\n\
         <a href=\"{}\">X</a>\n\
         <a href=\"{}\">LINE</a>\n\
         <a href=\"{}\">URL</a>\n\
         </nav>\n\
         <a class=\"cta\" href=\"{LOGIN_PATH}\">{CREATE_OWN_TEXT}</a>",
        encode_double_quoted_attribute(&share.twitter),
        encode_double_quoted_attribute(&share.line),
        encode_double_quoted_attribute(&share.profile_url),
    ));
    out
}

fn render_favorite(favorite: &Favorite) -> String {
    let mut item = format!(
        "<li value=\"{slot}\"><span class=\"rank\">{slot}</span>",
        slot = favorite.slot
    );
    if !favorite.category.is_empty() {
        item.push_str(&format!(
            "<span class=\"category\">{}</span>",
            encode_text(&favorite.category)
        ));
    }
    item.push_str(&format!(
        "<span class=\"title\">{}</span>",
        encode_text(&favorite.title)
    ));
    if !favorite.note.is_empty() {
        item.push_str(&format!(
            "<span class=\"note\">{}</span>",
            encode_text(&favorite.note)
        ));
    }
    item.push_str("</li>\n");
    item
}

fn render_not_found() -> String {
    page(
        NOT_FOUND_TITLE,
        None,
        &format!("<h1>Not Found</h1>\n<a class=\"cta\" href=\"{LOGIN_PATH}\">{CREATE_OWN_TEXT}</a>"),
    )
}

fn page(title: &str, description: Option<&str>, main: &str) -> String {
    let meta = description
        .map(|text| {
            format!(
                "<meta name=\"description\" content=\"{}\">\n",
                encode_double_quoted_attribute(text)
            )
        })
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html>\n<html lang=\"ja\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n{meta}</head>\n<body>\n<main>\n{main}\n</main>\n</body>\n</html>\n",
        encode_text(title)
    )
}
