use tracing::trace;

use crate::error::ConversionError;

use super::ParserProcedure;

pub mod block;
pub mod stage;

use stage::Stage;

/// Turns markdown text into an html fragment through an ordered list of stages.
/// Later stages see the output of earlier ones, so order matters.
#[derive(Debug, Clone)]
pub struct MarkdownParser {
    stages: Vec<Stage>,
}

impl MarkdownParser {
    pub fn new() -> Self {
        Self {
            stages: stage::default(),
        }
    }

    pub fn empty() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn extend(&self, stage: Stage) -> Self {
        let mut stages = self.stages.clone();

        stages.push(stage);

        Self { stages }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name).collect()
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserProcedure for MarkdownParser {
    fn process(&self, input: &str) -> Result<String, ConversionError> {
        self.stages.iter().try_fold(input.to_owned(), |text, stage| {
            trace!(stage = stage.name, "Applying markdown stage");

            (stage.apply)(&text).map_err(|source| ConversionError::Stage {
                stage: stage.name,
                source,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use crate::{error::ConversionError, parser::ParserProcedure};

    use super::{stage::Stage, MarkdownParser};

    #[test]
    fn heading_and_paragraph() {
        let res = MarkdownParser::new().process("# Privacy Policy\n**Updated:** today\n\n## Overview\nText").unwrap();
        let expected = format!("<h1>Privacy Policy</h1>\n<p><strong>Updated:</strong> today</p>\n<h2>Overview</h2>\n<p>Text</p>");

        assert_eq!(expected, res);
    }

    #[test]
    fn list_with_emphasis_and_links() {
        let res = MarkdownParser::new().process("- **Email:** [write](mailto:a@b.c)\n- *two*\n- three").unwrap();
        let expected = format!("<ul><li><strong>Email:</strong> <a href=\"mailto:a@b.c\">write</a></li><li><em>two</em></li><li>three</li></ul>");

        assert_eq!(expected, res);
    }

    #[test]
    fn crlf_input() {
        let res = MarkdownParser::new().process("# Title\r\n\r\nBody\r\n").unwrap();
        let expected = format!("<h1>Title</h1>\n<p>Body</p>");

        assert_eq!(expected, res);
    }

    #[test]
    fn extend_appends_a_stage() {
        let p = MarkdownParser::empty().extend(Stage::new("shout", |s| Ok(s.to_uppercase())));

        assert_eq!(vec!["shout"], p.stage_names());
        assert_eq!("MEOW", p.process("meow").unwrap());
    }

    #[test]
    fn failing_stage_is_named() {
        let p = MarkdownParser::new().extend(Stage::new("broken", |s| {
            Regex::new("(unclosed")?;
            Ok(s.to_owned())
        }));

        match p.process("text") {
            Err(ConversionError::Stage { stage, .. }) => assert_eq!("broken", stage),
            other => panic!("expected a stage failure, got {:?}", other),
        }
    }
}
