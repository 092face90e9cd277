//! In-memory view of one document version.

use crate::diagnostics::Position;

/// The text of a document split into lines, plus an identifying handle (path or URI).
///
/// ## Notes
/// - Lines are split on `\n`; a trailing `\r` is not part of the line.
/// - A text ending with a newline has a final empty line, so an empty text has exactly one line.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    id: String,
    text: String,
    /// Byte range of each line within `text`, excluding the line terminator.
    lines: Vec<(usize, usize)>,
}

impl SourceDocument {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let mut lines = Vec::new();
        let mut start = 0;
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                lines.push((start, trim_cr(&text, start, i)));
                start = i + 1;
            }
        }
        lines.push((start, trim_cr(&text, start, text.len())));
        Self {
            id: id.into(),
            text,
            lines,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of line `index`, or `""` past the end.
    pub fn line(&self, index: usize) -> &str {
        self.lines
            .get(index)
            .map(|&(start, end)| &self.text[start..end])
            .unwrap_or("")
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(|&(start, end)| &self.text[start..end])
    }

    /// Byte offset of the start of line `index` within the whole text.
    pub fn line_start(&self, index: usize) -> Option<usize> {
        self.lines.get(index).map(|&(start, _)| start)
    }

    /// Map a zero-based (line, character) position back to a byte offset in the whole text.
    ///
    /// Characters past the end of the line clamp to the line end.
    pub fn offset_of(&self, position: Position) -> Option<usize> {
        let &(start, end) = self.lines.get(position.line as usize)?;
        let line = &self.text[start..end];
        let within = line
            .char_indices()
            .nth(position.character as usize)
            .map(|(i, _)| i)
            .unwrap_or(line.len());
        Some(start + within)
    }
}

fn trim_cr(text: &str, start: usize, end: usize) -> usize {
    if end > start && text.as_bytes()[end - 1] == b'\r' {
        end - 1
    } else {
        end
    }
}

/// Number of characters (Unicode scalar values) in `line` before byte offset `byte`.
pub fn char_column(line: &str, byte: usize) -> u32 {
    let byte = byte.min(line.len());
    line.get(..byte).map(|s| s.chars().count()).unwrap_or(byte) as u32
}
