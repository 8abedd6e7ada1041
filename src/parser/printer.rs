use crate::api::{Argument, Opt};
use crate::model::Key;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// One line of the help, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HelpLine {
    Text(String),
    Opt(Key),
    Argument(String),
}

/// How option keys are spelled in the help.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HelpStyle {
    /// `-n, --number=INT`
    Dashed,
    /// `n, number=INT` (for sub-parser clauses).
    Bare,
}

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;
// We'll target 95% of the total width, to ensure the renderer doesn't literally use the full space.
const TARGET_TOTAL_FACTOR: f64 = 0.95;
const MINIMUM_LEFT_WIDTH: usize = 22;
const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 2;
const BARE_INDENT: usize = 4;

enum Row {
    Text(String),
    Entry(String, String),
}

pub(crate) fn render(
    lines: &[HelpLine],
    options: &[Opt<'_>],
    arguments: &[Argument<'_>],
    style: HelpStyle,
    total_width: Option<usize>,
) -> String {
    let rows: Vec<Row> = lines
        .iter()
        .filter_map(|line| match line {
            HelpLine::Text(text) => Some(Row::Text(text.clone())),
            HelpLine::Opt(key) => options
                .iter()
                .find(|o| o.key() == key)
                .map(|o| Row::Entry(o.usage(style), o.description())),
            HelpLine::Argument(name) => arguments
                .iter()
                .find(|a| a.name() == name)
                .map(|a| Row::Entry(a.usage(), a.description())),
        })
        .collect();

    let left_width = rows
        .iter()
        .filter_map(|row| match row {
            Row::Entry(left, _) => Some(left.chars().count()),
            Row::Text(_) => None,
        })
        .fold(MINIMUM_LEFT_WIDTH, std::cmp::max);
    let indent = match style {
        HelpStyle::Dashed => MAIN_INDENT,
        HelpStyle::Bare => BARE_INDENT,
    };
    let renderer = ColumnRenderer::guided(indent, left_width, total_width);
    let mut out = String::default();

    for row in rows {
        match row {
            Row::Text(text) => out.push_str(&text),
            Row::Entry(left, middle) => out.push_str(&renderer.render(&left, &middle).join("\n")),
        }

        out.push('\n');
    }

    out
}

#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    indent: usize,
    left: usize,
    // No middle width means the middle column is never wrapped.
    middle: Option<usize>,
}

impl ColumnRenderer {
    /// Produce a renderer based off the provided widths.
    /// This renderer will use a heuristic to chose the middle width.
    pub(crate) fn guided(indent: usize, left: usize, total_width: Option<usize>) -> Self {
        let total_width = match total_width {
            Some(total_width) => total_width,
            None => return Self::new(indent, left, None),
        };
        // We always have an indent and a left (and a padding between it and the middle).
        let non_middle = indent + left + PADDING_WIDTH;
        let target_total_width = (total_width as f64 * TARGET_TOTAL_FACTOR) as usize;

        if non_middle + MINIMUM_MIDDLE_WIDTH <= target_total_width {
            let middle = target_total_width - non_middle;
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} fit within the target total {target_total_width}.  Selecting middle: {middle}.");
            }

            Self::new(indent, left, Some(middle))
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} do not fit within the target total {target_total_width}.  Selecting middle: {MINIMUM_MIDDLE_WIDTH}.");
            }

            Self::new(indent, left, Some(MINIMUM_MIDDLE_WIDTH))
        }
    }

    pub(crate) fn new(indent: usize, left: usize, middle: Option<usize>) -> Self {
        Self {
            indent,
            left,
            middle,
        }
    }

    pub(crate) fn render(&self, left: &str, middle: &str) -> Vec<String> {
        let indent = self.indent;
        let left_column_width = self.left;
        let padding = format!("{:PADDING_WIDTH$}", "");
        let middle_parts = match self.middle {
            Some(width) => chunk(middle, width),
            None => {
                let trimmed = middle.trim();
                if trimmed.is_empty() {
                    Vec::default()
                } else {
                    vec![trimmed.to_string()]
                }
            }
        };

        if middle_parts.is_empty() {
            return vec![format!("{:indent$}{left}", "")];
        }

        middle_parts
            .iter()
            .enumerate()
            .map(|(i, part)| {
                let left = if i == 0 { left } else { "" };
                format!("{:indent$}{:left_column_width$}{padding}{part}", "", left)
            })
            .collect()
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if !word.is_empty() {
            if current.is_empty() {
                hyphenate(width, &mut lines, &mut current, word);
            } else if current.chars().count() + word.chars().count() + 1 <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = String::default();
                hyphenate(width, &mut lines, &mut current, word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let increment = width - 1;
    let characters: Vec<char> = word.chars().collect();
    let mut left = 0;

    while left + increment + 1 < characters.len() {
        let piece: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{piece}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}
