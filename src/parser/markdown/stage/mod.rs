mod default;

pub use default::{all as default, blocks, emphasis, headers, line_endings, links};

/// A named text substitution applied to the whole document.
#[derive(Debug, Clone)]
pub struct Stage {
    pub name: &'static str,
    pub apply: fn(&str) -> Result<String, regex::Error>,
}

impl Stage {
    pub fn new(name: &'static str, apply: fn(&str) -> Result<String, regex::Error>) -> Self {
        Self { name, apply }
    }
}
