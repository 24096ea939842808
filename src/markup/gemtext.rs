//! HTML → gemtext conversion backed by `scraper` (html5ever)
//!
//! Gemtext is line oriented: every line is either text, a heading (`#`), a
//! list item (`* `), a quote (`> `), a link line (`=> url label`) or part of a
//! preformatted block fenced by ```. Inline links cannot be expressed, so each
//! anchor leaves a numbered citation in the text (`word[1]`) and its link line
//! is emitted after the enclosing block.

use scraper::{ElementRef, Html, Node};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Conversion failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConversionError {
    #[error("markup nested deeper than {limit} elements")]
    NestingTooDeep { limit: usize },
}

/// Converter settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterOptions {
    /// Maximum element nesting depth before conversion is refused
    pub max_depth: usize,
    /// Leave `[n]` markers in the text for each emitted link line
    pub citations: bool,
}

impl ConverterOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 256;
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            citations: true,
        }
    }
}

/// Stateless HTML → gemtext converter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GemtextConverter {
    options: ConverterOptions,
}

impl GemtextConverter {
    #[must_use]
    pub const fn new(options: ConverterOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// Convert an HTML fragment to gemtext
    pub fn convert(&self, html: &str) -> Result<String, ConversionError> {
        if html.trim().is_empty() {
            return Ok(String::new());
        }

        let fragment = Html::parse_fragment(html);
        let mut writer = Writer::new(&self.options);
        writer.walk(fragment.root_element(), 0)?;
        Ok(writer.finish())
    }
}

/// Link line waiting for the end of its block
struct PendingLink {
    href: String,
    label: String,
    citation: Option<usize>,
}

struct Writer<'o> {
    options: &'o ConverterOptions,
    lines: Vec<String>,
    line: String,
    pending_space: bool,
    quote_depth: usize,
    heading: Option<usize>,
    list_item: bool,
    links: Vec<PendingLink>,
    citations: usize,
}

impl<'o> Writer<'o> {
    fn new(options: &'o ConverterOptions) -> Self {
        Self {
            options,
            lines: Vec::new(),
            line: String::new(),
            pending_space: false,
            quote_depth: 0,
            heading: None,
            list_item: false,
            links: Vec::new(),
            citations: 0,
        }
    }

    fn walk(&mut self, element: ElementRef<'_>, depth: usize) -> Result<(), ConversionError> {
        if depth > self.options.max_depth {
            return Err(ConversionError::NestingTooDeep {
                limit: self.options.max_depth,
            });
        }

        for child in element.children() {
            if let Some(child_element) = ElementRef::wrap(child) {
                self.element(child_element, depth + 1)?;
            } else if let Node::Text(text) = child.value() {
                self.push_text(text);
            }
        }
        Ok(())
    }

    fn element(&mut self, element: ElementRef<'_>, depth: usize) -> Result<(), ConversionError> {
        match element.value().name() {
            "script" | "style" | "head" | "template" | "noscript" => {}
            "br" => self.break_line(),
            "hr" => self.end_block(),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = match element.value().name() {
                    "h1" => 1,
                    "h2" => 2,
                    _ => 3,
                };
                self.end_block();
                self.heading = Some(level);
                self.walk(element, depth)?;
                self.end_block();
                self.heading = None;
            }
            "li" => {
                self.break_line();
                self.list_item = true;
                self.walk(element, depth)?;
                self.break_line();
                self.list_item = false;
            }
            "blockquote" => {
                self.end_block();
                self.quote_depth += 1;
                self.walk(element, depth)?;
                self.end_block();
                self.quote_depth -= 1;
            }
            "pre" => {
                self.end_block();
                self.preformatted(element);
            }
            "a" => {
                self.walk(element, depth)?;
                self.anchor(element);
            }
            "img" => self.image(element),
            "tr" | "dt" | "dd" | "figcaption" => {
                self.break_line();
                self.walk(element, depth)?;
                self.break_line();
            }
            "p" | "div" | "section" | "article" | "header" | "footer" | "main" | "aside"
            | "nav" | "figure" | "ul" | "ol" | "dl" | "table" | "address" | "details"
            | "summary" => {
                self.end_block();
                self.walk(element, depth)?;
                self.end_block();
            }
            _ => self.walk(element, depth)?,
        }
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        let mut words = text.split_whitespace().peekable();
        if words.peek().is_none() {
            if !text.is_empty() {
                self.pending_space = true;
            }
            return;
        }

        if text.starts_with(char::is_whitespace) {
            self.pending_space = true;
        }
        for word in words {
            if self.pending_space && !self.line.is_empty() {
                self.line.push(' ');
            }
            self.line.push_str(word);
            self.pending_space = true;
        }
        self.pending_space = text.ends_with(char::is_whitespace);
    }

    fn anchor(&mut self, element: ElementRef<'_>) {
        let Some(href) = element.value().attr("href").map(str::trim) else {
            return;
        };
        if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
            return;
        }

        let label = collapse(&element.text().collect::<String>());
        let citation = if self.options.citations {
            self.citations += 1;
            self.line.push_str(&format!("[{}]", self.citations));
            Some(self.citations)
        } else {
            None
        };

        self.links.push(PendingLink {
            href: href.to_string(),
            label,
            citation,
        });
    }

    fn image(&mut self, element: ElementRef<'_>) {
        let Some(src) = element.value().attr("src").map(str::trim) else {
            return;
        };
        if src.is_empty() {
            return;
        }

        let alt = collapse(element.value().attr("alt").unwrap_or_default());
        self.links.push(PendingLink {
            href: src.to_string(),
            label: if alt.is_empty() { "Image".to_string() } else { alt },
            citation: None,
        });
    }

    fn preformatted(&mut self, element: ElementRef<'_>) {
        let raw = element.text().collect::<String>();
        let body = raw.strip_prefix('\n').unwrap_or(&raw).trim_end();

        self.lines.push("```".to_string());
        self.lines.extend(body.lines().map(|l| {
            // A fence line inside the block would terminate it early
            if l.starts_with("```") {
                format!(" {l}")
            } else {
                l.to_string()
            }
        }));
        self.lines.push("```".to_string());
        self.separate();
    }

    /// End the current text line, staying in the current block
    fn break_line(&mut self) {
        self.pending_space = false;
        if self.line.is_empty() {
            return;
        }

        let text = std::mem::take(&mut self.line);
        let mut out = String::with_capacity(text.len() + 8);
        if self.quote_depth > 0 {
            out.push_str("> ");
        }
        if let Some(level) = self.heading {
            out.push_str(&"#".repeat(level));
            out.push(' ');
        } else if self.list_item {
            out.push_str("* ");
            self.list_item = false;
        } else if self.quote_depth == 0 && starts_with_line_type(&text) {
            // Plain text must not be read as a fence, link, heading, item or quote
            out.push(' ');
        }
        out.push_str(&text);
        self.lines.push(out);
    }

    /// End the current block: flush text and pending link lines
    fn end_block(&mut self) {
        self.break_line();
        if self.links.is_empty() {
            self.separate();
            return;
        }

        self.separate();
        for link in std::mem::take(&mut self.links) {
            let line = match (link.citation, link.label.as_str()) {
                (Some(n), "") => format!("=> {} [{}]", link.href, n),
                (Some(n), label) if label == link.href => format!("=> {} [{}]", link.href, n),
                (Some(n), label) => format!("=> {} [{}] {}", link.href, n, label),
                (None, "") => format!("=> {}", link.href),
                (None, label) => format!("=> {} {}", link.href, label),
            };
            self.lines.push(line);
        }
        self.separate();
    }

    /// Push a blank separator line unless one is already there
    fn separate(&mut self) {
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn finish(mut self) -> String {
        self.end_block();
        while self.lines.last().is_some_and(String::is_empty) {
            self.lines.pop();
        }
        self.lines.join("\n")
    }
}

/// Prefixes that give a gemtext line a meaning other than plain text
const LINE_TYPE_PREFIXES: [&str; 5] = ["```", "=>", "#", "* ", ">"];

fn starts_with_line_type(text: &str) -> bool {
    LINE_TYPE_PREFIXES.iter().any(|prefix| text.starts_with(prefix))
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
