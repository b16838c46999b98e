use html_escape::encode_double_quoted_attribute;
use regex::{Captures, Regex};

use crate::parser::markdown::block;

use super::Stage;

pub fn all() -> Vec<Stage> {
    vec![
        line_endings(),
        headers(),
        emphasis(),
        links(),
        blocks(),
    ]
}

pub fn line_endings() -> Stage {
    Stage::new("line-endings", |text| {
        Ok(text.replace("\r\n", "\n").replace('\r', "\n"))
    })
}

/// `### `, `## ` and `# ` line prefixes, longest first.
pub fn headers() -> Stage {
    Stage::new("headers", |text| {
        let mut text = text.to_owned();

        for level in (1..=3).rev() {
            let pattern = Regex::new(&format!(r"(?m)^{} (.*)$", "#".repeat(level)))?;
            let wrapper = format!("<h{level}>${{1}}</h{level}>");

            text = pattern.replace_all(&text, wrapper.as_str()).into_owned();
        }

        Ok(text)
    })
}

pub fn emphasis() -> Stage {
    Stage::new("emphasis", |text| {
        let strong = Regex::new(r"\*\*(.*?)\*\*")?;
        let text = strong.replace_all(text, "<strong>${1}</strong>");
        let em = Regex::new(r"\*(.*?)\*")?;

        Ok(em.replace_all(&text, "<em>${1}</em>").into_owned())
    })
}

pub fn links() -> Stage {
    Stage::new("links", |text| {
        let pattern = Regex::new(r"\[([^\]]+)\]\(([^)]+)\)")?;

        Ok(pattern
            .replace_all(text, |caps: &Captures| {
                format!(
                    "<a href=\"{}\">{}</a>",
                    encode_double_quoted_attribute(&caps[2]),
                    &caps[1],
                )
            })
            .into_owned())
    })
}

/// Paragraphs, line breaks and lists.
pub fn blocks() -> Stage {
    Stage::new("blocks", |text| {
        Ok(block::render(&block::parse(text)?))
    })
}
