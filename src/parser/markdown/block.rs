use regex::Regex;

/// Intermediate form between the inline stages and the final fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A line already rendered as `<hN>` by the header stage.
    Header(String),
    Paragraph(Vec<String>),
    List(Vec<String>),
    Rule,
}

impl Block {
    fn is_blank(&self) -> bool {
        match self {
            Block::Paragraph(lines) => lines.iter().all(|l| l.trim().is_empty()),
            Block::List(items) => items.is_empty(),
            Block::Header(_) | Block::Rule => false,
        }
    }

    pub fn render(&self) -> String {
        match self {
            Block::Header(line) => line.clone(),
            Block::Paragraph(lines) => format!("<p>{}</p>", lines.join("<br>")),
            Block::List(items) => format!(
                "<ul>{}</ul>",
                items
                    .iter()
                    .map(|item| format!("<li>{}</li>", item))
                    .collect::<String>()
            ),
            Block::Rule => format!("<hr>"),
        }
    }
}

/// Splits text into blocks. Runs of blank lines separate paragraphs, a header
/// line always stands alone and consecutive `- ` lines form one list.
pub fn parse(text: &str) -> Result<Vec<Block>, regex::Error> {
    let separator = Regex::new(r"\n(?:[ \t]*\n)+")?;
    let header = Regex::new(r"^<h[1-6][ >]")?;
    let mut blocks = Vec::new();

    for chunk in separator.split(text) {
        let mut paragraph = Vec::new();
        let mut list = Vec::new();

        for line in chunk.trim_matches('\n').split('\n') {
            if let Some(item) = line.strip_prefix("- ") {
                flush(&mut blocks, Block::Paragraph(std::mem::take(&mut paragraph)));
                list.push(item.to_owned());
            } else if header.is_match(line) {
                flush(&mut blocks, Block::Paragraph(std::mem::take(&mut paragraph)));
                flush(&mut blocks, Block::List(std::mem::take(&mut list)));
                blocks.push(Block::Header(line.trim_end().to_owned()));
            } else if line.trim() == "---" {
                flush(&mut blocks, Block::Paragraph(std::mem::take(&mut paragraph)));
                flush(&mut blocks, Block::List(std::mem::take(&mut list)));
                blocks.push(Block::Rule);
            } else {
                flush(&mut blocks, Block::List(std::mem::take(&mut list)));
                paragraph.push(line.to_owned());
            }
        }

        flush(&mut blocks, Block::Paragraph(paragraph));
        flush(&mut blocks, Block::List(list));
    }

    Ok(blocks)
}

pub fn render(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::render)
        .collect::<Vec<_>>()
        .join("\n")
}

fn flush(blocks: &mut Vec<Block>, block: Block) {
    if !block.is_blank() {
        blocks.push(block);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse, render, Block};

    fn convert(text: &str) -> String {
        render(&parse(text).unwrap())
    }

    #[test]
    fn paragraphs_and_breaks() {
        let res = convert("one\ntwo\n\n\n\nthree");
        let expected = format!("<p>one<br>two</p>\n<p>three</p>");

        assert_eq!(expected, res);
    }

    #[test]
    fn whitespace_only_lines_separate_paragraphs() {
        let res = convert("one\n  \ntwo");
        let expected = format!("<p>one</p>\n<p>two</p>");

        assert_eq!(expected, res);
    }

    #[test]
    fn header_leaves_no_break() {
        let res = convert("<h2>Overview</h2>\nSome text\nmore");
        let expected = format!("<h2>Overview</h2>\n<p>Some text<br>more</p>");

        assert_eq!(expected, res);
    }

    #[test]
    fn empty_paragraphs_are_dropped() {
        let res = parse("\n\n\n\ntext\n\n \n\n").unwrap();

        assert_eq!(vec![Block::Paragraph(vec![format!("text")])], res);
    }

    #[test]
    fn list_run_is_wrapped_once() {
        let res = convert("- a\n- b\n- c");
        let expected = format!("<ul><li>a</li><li>b</li><li>c</li></ul>");

        assert_eq!(expected, res);
    }

    #[test]
    fn list_after_paragraph_line() {
        let res = convert("Intro:\n- a\n- b\nafter");
        let expected = format!("<p>Intro:</p>\n<ul><li>a</li><li>b</li></ul>\n<p>after</p>");

        assert_eq!(expected, res);
    }

    #[test]
    fn interrupted_lists_stay_separate() {
        let res = convert("- a\n\n- b");
        let expected = format!("<ul><li>a</li></ul>\n<ul><li>b</li></ul>");

        assert_eq!(expected, res);
    }

    #[test]
    fn indented_items_are_not_nested() {
        let res = convert("- a\n  - b");
        let expected = format!("<ul><li>a</li></ul>\n<p>  - b</p>");

        assert_eq!(expected, res);
    }

    #[test]
    fn rule() {
        let res = convert("text\n---\n<em>end</em>");
        let expected = format!("<p>text</p>\n<hr>\n<p><em>end</em></p>");

        assert_eq!(expected, res);
    }
}
