use tracing::debug;

use crate::error::ConversionError;
use crate::parser::{html::HtmlParser, markdown::MarkdownParser, ParserProcedure};

/// The complete conversion pipeline: markdown stages followed by html decoration.
/// Either the whole document converts or an error is returned.
#[derive(Debug, Clone)]
pub struct Converter {
    markdown: MarkdownParser,
    html: HtmlParser,
}

impl Converter {
    pub fn new() -> Self {
        Self {
            markdown: MarkdownParser::new(),
            html: HtmlParser::default()
                .header_anchors()
                .external_links()
                .emoji(),
        }
    }

    pub fn with_parsers(markdown: MarkdownParser, html: HtmlParser) -> Self {
        Self { markdown, html }
    }

    pub fn convert(&self, markdown: &str) -> Result<String, ConversionError> {
        let fragment = self.markdown.process(markdown)?;

        debug!(stages = ?self.markdown.stage_names(), "Converted markdown");

        self.html.process(&fragment)
    }

    pub fn convert_bytes(&self, bytes: &[u8]) -> Result<String, ConversionError> {
        self.convert(&String::from_utf8(bytes.to_vec())?)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}
