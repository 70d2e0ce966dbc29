//! Managed block location and rendering
//!
//! Everything here is pure string work on the startup file's content. Marker lines are
//! matched whole (after trimming), so a marker quoted inside a command or comment does
//! not count. Only the first block in a file is managed.

use std::ops::Range;

use crate::model::Alias;
use crate::scanner::Dialect;

pub const MARKER_START: &str = "# >>> alix managed aliases v1 >>>";
pub const MARKER_END: &str = "# <<< alix managed aliases v1 <<<";
pub const MARKER_NOTICE: &str = "# DO NOT EDIT - managed by 'alix apply'";

/// Where the managed block sits in a file
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Located<'a> {
    Absent,
    /// `span` covers the marker lines inclusive, `body` is the text between them
    Found { span: Range<usize>, body: &'a str },
    /// Start marker without a matching end marker
    Malformed,
}

pub(crate) fn locate(content: &str) -> Located<'_> {
    let mut offset = 0;
    let mut start: Option<(usize, usize)> = None;

    for line in content.split_inclusive('\n') {
        let line_end = offset + line.len();
        let trimmed = line.trim();

        match start {
            None if trimmed == MARKER_START => start = Some((offset, line_end)),
            Some((block_start, body_start)) if trimmed == MARKER_END => {
                return Located::Found {
                    span: block_start..line_end,
                    body: &content[body_start..offset],
                };
            }
            _ => {}
        }

        offset = line_end;
    }

    match start {
        Some(_) => Located::Malformed,
        None => Located::Absent,
    }
}

/// Aliases defined inside a block body, in order; other lines are dropped
pub(crate) fn parse_body(body: &str, dialect: Dialect) -> Vec<Alias> {
    let mut aliases: Vec<Alias> = Vec::new();
    for line in body.lines() {
        let Some(alias) = dialect.parse_line(line) else {
            continue;
        };
        match aliases.iter().position(|a| a.name() == alias.name()) {
            Some(pos) => aliases[pos] = alias,
            None => aliases.push(alias),
        }
    }
    aliases
}

/// The block text, without a trailing newline
pub(crate) fn render(aliases: &[Alias], dialect: Dialect) -> String {
    let mut lines = Vec::with_capacity(aliases.len() + 3);
    lines.push(MARKER_START.to_string());
    lines.push(MARKER_NOTICE.to_string());
    lines.extend(aliases.iter().map(|alias| dialect.render(alias)));
    lines.push(MARKER_END.to_string());
    lines.join("\n")
}

/// Put `block` where the old one was, keeping the old block's line ending
pub(crate) fn splice(content: &str, span: Range<usize>, block: &str) -> String {
    let ending = if content[..span.end].ends_with("\r\n") {
        "\r\n"
    } else if content[..span.end].ends_with('\n') {
        "\n"
    } else {
        ""
    };
    format!(
        "{}{}{}{}",
        &content[..span.start],
        block,
        ending,
        &content[span.end..]
    )
}

/// Add `block` at the end of `content`, separated by a blank line
pub(crate) fn append(content: &str, block: &str) -> String {
    if content.is_empty() {
        format!("{block}\n")
    } else if content.ends_with('\n') {
        format!("{content}\n{block}\n")
    } else {
        format!("{content}\n\n{block}\n")
    }
}

/// Cut the block out, undoing the blank separator line [`append`] adds
pub(crate) fn cut(content: &str, span: Range<usize>) -> String {
    let mut before = &content[..span.start];
    let after = &content[span.end..];
    if after.is_empty() && before.ends_with("\n\n") {
        before = &before[..before.len() - 1];
    }
    format!("{before}{after}")
}
