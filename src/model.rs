//! Internal entity shapes
//!
//! `Raw*` types mirror the upstream JSON and still carry HTML bodies. They
//! are consumed by conversion and never stored. The converted types
//! ([`Document`], [`Section`]) only hold gemtext and are what the caches own.

use serde::{Deserialize, Deserializer};
use std::sync::Arc;

use crate::markup::{ConversionError, GemtextConverter};

/// Deserialize a string field that upstream may send as JSON `null`
pub(crate) fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    nullable(deserializer)
}

/// Deserialize any field that upstream may send as JSON `null`
///
/// `#[serde(default)]` only covers a missing key; an explicit `null` on a
/// nested object or list decodes to the type's default here instead.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Upstream content kind filter values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Prose,
    Poetry,
    Blog,
}

impl ContentKind {
    /// Value of the upstream `kind` query parameter
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Prose => "ProseContent",
            Self::Poetry => "PoetryContent",
            Self::Blog => "BlogContent",
        }
    }
}

/// The two document stores
///
/// Long-form works (prose and poetry) and gemlog posts (blogs) are cached
/// independently, mirroring the two upstream collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Works,
    Gemlog,
}

impl Collection {
    /// Kind used when fetching a single document of this collection
    #[must_use]
    pub const fn fetch_kind(&self) -> ContentKind {
        match self {
            Self::Works => ContentKind::Prose,
            Self::Gemlog => ContentKind::Blog,
        }
    }

    /// Kinds included when listing this collection
    #[must_use]
    pub const fn listing_kinds(&self) -> &'static [ContentKind] {
        match self {
            Self::Works => &[ContentKind::Prose, ContentKind::Poetry],
            Self::Gemlog => &[ContentKind::Blog],
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Works => "works",
            Self::Gemlog => "gemlog",
        }
    }
}

/// Word count statistics of a section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SectionStats {
    #[serde(default, deserialize_with = "nullable")]
    pub words: u64,
}

/// Section as returned by upstream, body still HTML
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawSection {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub stats: SectionStats,
    #[serde(rename = "body", default, deserialize_with = "nullable_string")]
    pub html_body: String,
}

impl RawSection {
    /// Convert the HTML body to gemtext
    pub fn convert(&self, converter: &GemtextConverter) -> Result<Section, ConversionError> {
        Ok(Section {
            body: converter.convert(&self.html_body)?,
            ..self.without_body()
        })
    }

    fn without_body(&self) -> Section {
        Section {
            id: self.id.clone(),
            title: self.title.clone(),
            stats: self.stats,
            body: String::new(),
        }
    }
}

/// A converted section (chapter) of a work
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub stats: SectionStats,
    /// Gemtext body
    pub body: String,
}

/// Author profile fields
///
/// Only populated on full authors fetched from the profile endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthorProfile {
    #[serde(default, deserialize_with = "nullable_string")]
    pub bio: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub tagline: String,
    #[serde(rename = "avatar", default, deserialize_with = "nullable_string")]
    pub avatar: String,
}

/// A user of the content service
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Author {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "screenName", default, deserialize_with = "nullable_string")]
    pub username: String,
    #[serde(default, alias = "Profile", deserialize_with = "nullable")]
    pub profile: AuthorProfile,
}

/// Document as returned by upstream, body still HTML
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub author: Author,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub sections: Vec<RawSection>,
    #[serde(rename = "desc", default, deserialize_with = "nullable_string")]
    pub short_desc: String,
    #[serde(rename = "body", default, deserialize_with = "nullable_string")]
    pub html_body: String,
}

impl RawDocument {
    /// Convert the document body and every section body to gemtext
    ///
    /// Fails on the first body that cannot be converted; no partially
    /// converted document is ever produced.
    pub fn convert(&self, converter: &GemtextConverter) -> Result<Document, ConversionError> {
        let sections = self
            .sections
            .iter()
            .map(|section| section.convert(converter))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Document {
            sections,
            body: converter.convert(&self.html_body)?,
            ..self.degraded()
        })
    }

    /// Same document with every body left empty
    #[must_use]
    pub fn degraded(&self) -> Document {
        Document {
            id: self.id.clone(),
            author: self.author.clone(),
            title: self.title.clone(),
            sections: self.sections.iter().map(RawSection::without_body).collect(),
            short_desc: self.short_desc.clone(),
            body: String::new(),
        }
    }
}

/// A converted document (work or gemlog post)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    /// Partial author: id and username only
    pub author: Author,
    pub title: String,
    pub sections: Vec<Section>,
    /// Upstream description, or a teaser derived by listing assembly
    pub short_desc: String,
    /// Gemtext body
    pub body: String,
}

impl Document {
    /// Total words across all sections
    #[must_use]
    pub fn word_count(&self) -> u64 {
        self.sections.iter().map(|s| s.stats.words).sum()
    }
}

/// Outcome of processing one listing item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    /// Fully converted and cached
    Converted,
    /// Conversion failed; the document is shown with an empty body
    Degraded {
        reason: String,
        /// Original HTML body, kept for the operator's benefit
        html_body: String,
    },
}

impl ItemStatus {
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// One document in a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingItem {
    pub document: Arc<Document>,
    pub status: ItemStatus,
}

/// Presentation labels computed at assembly time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLabels {
    /// Kind name used in navigation links (`works`, `gemlog`, `browse`)
    pub name: &'static str,
    /// Route prefix of single items (`story`, `gemlog`)
    pub url_name: &'static str,
    pub emoji: &'static str,
}

/// A paginated listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub items: Vec<ListingItem>,
    pub page: u32,
    pub total_pages: u32,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub labels: ListingLabels,
    /// Display name of the owning author, when the page has any documents
    pub author_username: Option<String>,
    pub next_page_url: String,
    pub prev_page_url: String,
}

impl Listing {
    /// Items whose conversion failed
    pub fn degraded(&self) -> impl Iterator<Item = &ListingItem> {
        self.items.iter().filter(|item| item.status.is_degraded())
    }
}

/// Search hit for a document; search results carry no bodies
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DocumentSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub author: Author,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(rename = "desc", default, deserialize_with = "nullable_string")]
    pub short_desc: String,
}

/// Results of a search query
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchResults {
    #[serde(default, deserialize_with = "nullable")]
    pub users: Vec<Author>,
    /// Short-form matches
    #[serde(default, deserialize_with = "nullable")]
    pub blogs: Vec<DocumentSummary>,
    /// Long-form matches
    #[serde(default, deserialize_with = "nullable")]
    pub works: Vec<DocumentSummary>,
    /// Query as typed by the user
    #[serde(skip)]
    pub query: String,
}

impl SearchResults {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.blogs.is_empty() && self.works.is_empty()
    }
}
