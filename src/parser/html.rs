use dom_query::{Document, NodeRef, Selection};
use html_escape::{encode_double_quoted_attribute, encode_text};
use regex::Regex;
use tracing::debug;

use crate::error::ConversionError;

use super::ParserProcedure;

const EMOJI_PATTERN: &str = r"\p{Emoji_Presentation}|\p{Emoji}\x{FE0F}";
const EXTERNAL_MARKER: &str = " ↗";

/// Structural decoration of an already rendered fragment.
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    header_anchors: bool,
    external_links: bool,
    emoji: bool,
}

impl HtmlParser {
    /// Gives every header below the title an id and a trailing `#` link to itself.
    pub fn header_anchors(self) -> Self {
        Self {
            header_anchors: true,
            ..self
        }
    }

    /// Opens `http(s)` links in a new tab and marks them with an arrow.
    pub fn external_links(self) -> Self {
        Self {
            external_links: true,
            ..self
        }
    }

    /// Wraps every emoji in `<span class="emoji">`.
    pub fn emoji(self) -> Self {
        Self {
            emoji: true,
            ..self
        }
    }

    fn decorate_header(header: &Selection) -> Result<(), ConversionError> {
        let id = header_id(&header.text())?;
        let anchor = format!(
            "<a href=\"#{}\" class=\"header-anchor\" aria-hidden=\"true\">#</a>",
            encode_double_quoted_attribute(&id),
        );

        header.set_attr("id", &id);
        header.append_html(anchor);

        Ok(())
    }

    fn decorate_link(link: &Selection) {
        link.set_attr("target", "_blank");
        link.set_attr("rel", "noopener noreferrer");

        let inner = link.inner_html().to_string();

        if !inner.contains('📧') && !inner.contains("mailto:") {
            link.set_html(format!("{}{}", inner, EXTERNAL_MARKER));
        }
    }

    fn wrap_emoji(document: &Document) -> Result<(), ConversionError> {
        let pattern = Regex::new(EMOJI_PATTERN)?;
        let text_nodes = document
            .select("body, body *")
            .nodes()
            .iter()
            .flat_map(|node| node.children())
            .filter(|node| node.is_text())
            .collect::<Vec<NodeRef>>();

        for node in text_nodes {
            let text = node.text().to_string();

            if pattern.is_match(&text) {
                node.replace_with_html(wrap_emoji_text(&pattern, &text));
            }
        }

        Ok(())
    }
}

impl ParserProcedure for HtmlParser {
    fn process(&self, input: &str) -> Result<String, ConversionError> {
        let document = Document::from(input.to_owned());

        if self.header_anchors {
            for header in document.select("h2, h3, h4, h5, h6").iter() {
                Self::decorate_header(&header)?;
            }
        }

        if self.external_links {
            for link in document.select("a[href]").iter() {
                let external = link.attr("href").is_some_and(|href| is_external(&href));

                if external {
                    Self::decorate_link(&link);
                }
            }
        }

        if self.emoji {
            Self::wrap_emoji(&document)?;
        }

        debug!("Decorated html fragment");

        Ok(document.select("body").inner_html().to_string())
    }
}

/// Derives a same-page anchor id from header text: lower-cased, stripped of
/// anything but word characters, whitespace and hyphens, with whitespace runs
/// turned into single hyphens.
pub fn header_id(text: &str) -> Result<String, regex::Error> {
    let stripped = Regex::new(r"[^A-Za-z0-9_\s-]")?
        .replace_all(&text.to_lowercase(), "")
        .into_owned();

    Ok(Regex::new(r"\s+")?.replace_all(&stripped, "-").into_owned())
}

pub fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

fn wrap_emoji_text(pattern: &Regex, text: &str) -> String {
    let mut html = String::new();
    let mut last = 0;

    for m in pattern.find_iter(text) {
        html.push_str(&encode_text(&text[last..m.start()]));
        html.push_str(&format!("<span class=\"emoji\">{}</span>", m.as_str()));
        last = m.end();
    }

    html.push_str(&encode_text(&text[last..]));
    html
}
