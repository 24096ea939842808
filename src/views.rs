//! Gemtext page rendering
//!
//! Each [`Page`] variant corresponds to one named template and renders
//! through `Display`. Views only ever see fully resolved entities; all
//! fetching and conversion happens before a page is built.

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

use crate::model::{Author, Document, Listing, ListingItem, SearchResults, Section};

/// A renderable gemtext page
#[derive(Debug, Clone, Copy)]
pub enum Page<'a> {
    Home,
    /// A work with its table of contents
    Story(&'a Document),
    /// A gemlog post, read in full
    Post(&'a Document),
    /// One section of a work
    Section(&'a Section),
    User(&'a Author),
    /// A user's works or gemlog
    Stories(&'a Listing),
    Browse(&'a Listing),
    Latest(&'a [ListingItem]),
    Search(&'a SearchResults),
}

impl Page<'_> {
    /// Template name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Home => "home.gmi",
            Self::Story(_) => "story.gmi",
            Self::Post(_) | Self::Section(_) => "read.gmi",
            Self::User(_) => "user.gmi",
            Self::Stories(_) => "stories.gmi",
            Self::Browse(_) => "browse.gmi",
            Self::Latest(_) => "latest.gmi",
            Self::Search(_) => "search.gmi",
        }
    }
}

/// Collapse line breaks so a value fits on one gemtext line
fn one_line(text: &str) -> Cow<'_, str> {
    if text.contains(['\r', '\n']) {
        Cow::Owned(
            text.split(['\r', '\n'])
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        )
    } else {
        Cow::Borrowed(text)
    }
}

fn author_link(f: &mut Formatter<'_>, author: &Author) -> fmt::Result {
    if author.id.is_empty() {
        return Ok(());
    }
    writeln!(f, "=> /user/{} ✍️ {}", author.id, one_line(&author.username))
}

fn body(f: &mut Formatter<'_>, text: &str) -> fmt::Result {
    if !text.is_empty() {
        writeln!(f)?;
        writeln!(f, "{}", text)?;
    }
    Ok(())
}

fn listing_items(f: &mut Formatter<'_>, url_name: &str, items: &[ListingItem], with_author: bool) -> fmt::Result {
    for item in items {
        let doc = &item.document;
        writeln!(f)?;
        writeln!(f, "=> /{}/{} {}", url_name, doc.id, one_line(&doc.title))?;
        if with_author && !doc.author.username.is_empty() {
            writeln!(f, "by {}", one_line(&doc.author.username))?;
        }
        if !doc.short_desc.is_empty() {
            writeln!(f, "{}", one_line(&doc.short_desc))?;
        }
    }
    Ok(())
}

fn navigation(f: &mut Formatter<'_>, listing: &Listing) -> fmt::Result {
    if !(listing.has_prev_page || listing.has_next_page) {
        return Ok(());
    }
    writeln!(f)?;
    if listing.has_prev_page {
        writeln!(f, "=> {} ⬅️ Previous page", listing.prev_page_url)?;
    }
    if listing.has_next_page {
        writeln!(f, "=> {} ➡️ Next page", listing.next_page_url)?;
    }
    Ok(())
}

impl Display for Page<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => {
                writeln!(f, "# Offprint")?;
                writeln!(f)?;
                writeln!(f, "Stories, poems and gemlogs from Offprint, served over Gemini.")?;
                writeln!(f)?;
                writeln!(f, "=> /latest 🆕 Latest works")?;
                writeln!(f, "=> /browse/1 📚 Browse all works")?;
                writeln!(f, "=> /search 🔍 Search")
            }
            Self::Story(doc) => {
                writeln!(f, "# {}", one_line(&doc.title))?;
                author_link(f, &doc.author)?;
                if !doc.short_desc.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "> {}", one_line(&doc.short_desc))?;
                }
                body(f, &doc.body)?;
                if !doc.sections.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "## Contents")?;
                    writeln!(f)?;
                    for section in &doc.sections {
                        writeln!(
                            f,
                            "=> /read/{} {} ({} words)",
                            section.id,
                            one_line(&section.title),
                            section.stats.words
                        )?;
                    }
                    writeln!(f)?;
                    writeln!(f, "{} words in total", doc.word_count())?;
                }
                Ok(())
            }
            Self::Post(doc) => {
                writeln!(f, "# {}", one_line(&doc.title))?;
                author_link(f, &doc.author)?;
                body(f, &doc.body)
            }
            Self::Section(section) => {
                writeln!(f, "# {}", one_line(&section.title))?;
                body(f, &section.body)
            }
            Self::User(author) => {
                writeln!(f, "# {}", one_line(&author.username))?;
                let profile = &author.profile;
                if !profile.tagline.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "> {}", one_line(&profile.tagline))?;
                }
                body(f, &profile.bio)?;
                writeln!(f)?;
                if !profile.avatar.is_empty() {
                    writeln!(f, "=> {} 🖼️ Avatar", profile.avatar)?;
                }
                writeln!(f, "=> /user/{}/works/1 📕 Works", author.id)?;
                writeln!(f, "=> /user/{}/gemlog/1 📰 Gemlog", author.id)
            }
            Self::Stories(listing) => {
                let labels = &listing.labels;
                match &listing.author_username {
                    Some(name) => writeln!(f, "# {} {}'s {}", labels.emoji, one_line(name), labels.name)?,
                    None => writeln!(f, "# {} {}", labels.emoji, labels.name)?,
                }
                writeln!(f)?;
                if listing.items.is_empty() {
                    writeln!(f, "Nothing here yet.")?;
                } else {
                    writeln!(f, "Page {} of {}", listing.page, listing.total_pages)?;
                }
                listing_items(f, labels.url_name, &listing.items, false)?;
                navigation(f, listing)
            }
            Self::Browse(listing) => {
                writeln!(f, "# {} Browse", listing.labels.emoji)?;
                writeln!(f)?;
                writeln!(f, "Page {} of {}", listing.page, listing.total_pages)?;
                listing_items(f, listing.labels.url_name, &listing.items, true)?;
                navigation(f, listing)
            }
            Self::Latest(items) => {
                writeln!(f, "# 🆕 Latest")?;
                listing_items(f, "story", items, true)?;
                writeln!(f)?;
                writeln!(f, "=> /browse/1 📚 Browse all works")
            }
            Self::Search(results) => {
                writeln!(f, "# 🔍 Results for \"{}\"", one_line(&results.query))?;
                if results.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "No results.")?;
                }
                if !results.users.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "## Users")?;
                    writeln!(f)?;
                    for user in &results.users {
                        writeln!(f, "=> /user/{} {}", user.id, one_line(&user.username))?;
                    }
                }
                for (heading, route, docs) in [
                    ("Works", "story", &results.works),
                    ("Gemlog", "gemlog", &results.blogs),
                ] {
                    if docs.is_empty() {
                        continue;
                    }
                    writeln!(f)?;
                    writeln!(f, "## {}", heading)?;
                    writeln!(f)?;
                    for doc in docs {
                        writeln!(
                            f,
                            "=> /{}/{} {} by {}",
                            route,
                            doc.id,
                            one_line(&doc.title),
                            one_line(&doc.author.username)
                        )?;
                    }
                }
                writeln!(f)?;
                writeln!(f, "=> /search 🔍 Search again")
            }
        }
    }
}
