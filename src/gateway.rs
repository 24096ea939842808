//! Request routing and resolution
//!
//! Maps a validated request URL onto a [`Route`], resolves it through the
//! resource cache, listing assembler or search, and renders the result.
//! Resolution errors become a `40` response carrying only the error's
//! user-facing message; the full error chain goes to the log.

use std::sync::Arc;
use tracing::{Level, debug, error, warn};
use url::Url;

use crate::cache::ResourceCache;
use crate::constants::message;
use crate::error::GatewayError;
use crate::listing::{ListingAssembler, ListingScope};
use crate::model::Collection;
use crate::protocol::{Response, Status};
use crate::search::search;
use crate::types::ContentId;
use crate::views::Page;

/// A recognised request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Latest,
    Browse { page: u32 },
    Story(ContentId),
    Gemlog(ContentId),
    Read(ContentId),
    User(ContentId),
    UserWorks { user: ContentId, page: u32 },
    UserGemlog { user: ContentId, page: u32 },
    /// Search; `None` until the client has supplied a query
    Search(Option<String>),
}

/// Why a path could not be routed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    NotFound,
    BadPage,
    BadId,
    BadQuery,
}

impl RouteError {
    #[must_use]
    pub fn response(&self) -> Response {
        match self {
            Self::NotFound => Response::not_found(message::NOT_FOUND),
            Self::BadPage => Response::bad_request(message::BAD_PAGE),
            Self::BadId => Response::bad_request(message::BAD_ID),
            Self::BadQuery => Response::error(Status::BadRequest, "Query is not valid UTF-8"),
        }
    }
}

fn id(segment: &str) -> Result<ContentId, RouteError> {
    let decoded = urlencoding::decode(segment).map_err(|_| RouteError::BadId)?;
    ContentId::new(decoded.into_owned()).map_err(|_| RouteError::BadId)
}

fn page(segment: &str) -> Result<u32, RouteError> {
    segment.parse().map_err(|_| RouteError::BadPage)
}

impl Route {
    /// Route a request URL by its path (and query, for search)
    pub fn parse(url: &Url) -> Result<Self, RouteError> {
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|segment| !segment.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [] => Ok(Self::Home),
            ["latest"] => Ok(Self::Latest),
            ["browse", p] => Ok(Self::Browse { page: page(p)? }),
            ["story", i] => Ok(Self::Story(id(i)?)),
            ["gemlog", i] => Ok(Self::Gemlog(id(i)?)),
            ["read", i] => Ok(Self::Read(id(i)?)),
            ["user", i] => Ok(Self::User(id(i)?)),
            ["user", i, "works", p] => Ok(Self::UserWorks {
                user: id(i)?,
                page: page(p)?,
            }),
            ["user", i, "gemlog", p] => Ok(Self::UserGemlog {
                user: id(i)?,
                page: page(p)?,
            }),
            ["search"] => {
                let query = match url.query() {
                    Some(raw) => urlencoding::decode(raw)
                        .map_err(|_| RouteError::BadQuery)?
                        .into_owned(),
                    None => String::new(),
                };
                Ok(Self::Search((!query.is_empty()).then_some(query)))
            }
            _ => Err(RouteError::NotFound),
        }
    }
}

fn render(page: Page<'_>) -> Response {
    let body = page.to_string();
    debug!(template = page.name(), bytes = body.len(), "Rendered page");
    Response::success(body)
}

/// Entry point of the resolution pipeline for the server
#[derive(Debug, Clone)]
pub struct Gateway {
    cache: Arc<ResourceCache>,
    listings: ListingAssembler,
}

impl Gateway {
    #[must_use]
    pub fn new(cache: Arc<ResourceCache>) -> Self {
        Self {
            listings: ListingAssembler::new(Arc::clone(&cache)),
            cache,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<ResourceCache> {
        &self.cache
    }

    /// Produce the response for one request URL
    pub async fn respond(&self, url: &Url) -> Response {
        let route = match Route::parse(url) {
            Ok(route) => route,
            Err(e) => return e.response(),
        };

        match self.resolve(&route).await {
            Ok(response) => response,
            Err(e) => {
                if e.log_level() == Level::WARN {
                    warn!(path = url.path(), error = %e, "Resolution failed");
                } else {
                    error!(path = url.path(), error = ?e, "Resolution failed");
                }
                Response::temporary_failure(e.user_message())
            }
        }
    }

    async fn resolve(&self, route: &Route) -> Result<Response, GatewayError> {
        let response = match route {
            Route::Home => render(Page::Home),
            Route::Latest => {
                let items = self.listings.latest().await?;
                render(Page::Latest(&items))
            }
            Route::Browse { page } => {
                let listing = self.listings.assemble(ListingScope::Browse, *page).await?;
                render(Page::Browse(&listing))
            }
            Route::Story(id) => {
                let doc = self.cache.document(Collection::Works, id).await?;
                render(Page::Story(&doc))
            }
            Route::Gemlog(id) => {
                let doc = self.cache.document(Collection::Gemlog, id).await?;
                render(Page::Post(&doc))
            }
            Route::Read(id) => {
                let section = self.cache.section(id).await?;
                render(Page::Section(&section))
            }
            Route::User(id) => {
                let author = self.cache.author(id).await?;
                render(Page::User(&author))
            }
            Route::UserWorks { user, page } => {
                let scope = ListingScope::Works { user_id: user };
                let listing = self.listings.assemble(scope, *page).await?;
                render(Page::Stories(&listing))
            }
            Route::UserGemlog { user, page } => {
                let scope = ListingScope::Gemlog { user_id: user };
                let listing = self.listings.assemble(scope, *page).await?;
                render(Page::Stories(&listing))
            }
            Route::Search(None) => Response::input(message::SEARCH_PROMPT),
            Route::Search(Some(query)) => {
                let results = search(self.cache.upstream().as_ref(), query).await?;
                render(Page::Search(&results))
            }
        };
        Ok(response)
    }
}
