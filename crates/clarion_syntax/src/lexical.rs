//! Tokenization-lite: split one line into code, string and comment segments.
//!
//! The scan is a forward pass over the characters of a single line with three mutually exclusive modes:
//!
//! ```text
//! [Code] --'"'--> [Str] --'"' (not after '\')--> [Code]
//!   |
//!   +--";;"--> [Comment] (to end of line)
//! ```
//!
//! ## Notes
//! - State never crosses a line boundary: Clarity strings are single-line, so a string still open at the end of
//!   the line is reported as unterminated instead of being carried over.
//! - A `u` directly before the opening quote starts a unicode string, unless that `u` ends a longer identifier.
//! - Escapes are not modelled beyond "a backslash before a quote does not close the string".

/// Kind of a line segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Code,
    Str { unicode: bool, terminated: bool },
    Comment,
}

/// A maximal run of one kind, as byte offsets within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub start: usize,
    pub end: usize,
}

/// Result of scanning one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineScan {
    pub segments: Vec<Segment>,
    /// `(` found in code.
    pub open_parens: usize,
    /// `)` found in code.
    pub close_parens: usize,
}

impl LineScan {
    /// Whether byte offset `byte` lies in a code segment.
    pub fn is_code(&self, byte: usize) -> bool {
        matches!(
            self.segment_at(byte).map(|s| s.kind),
            Some(SegmentKind::Code)
        )
    }

    pub fn segment_at(&self, byte: usize) -> Option<&Segment> {
        self.segments.iter().find(|s| s.start <= byte && byte < s.end)
    }

    /// Byte offset where a `;;` comment starts, if the line has one.
    pub fn comment_start(&self) -> Option<usize> {
        self.segments
            .iter()
            .find(|s| s.kind == SegmentKind::Comment)
            .map(|s| s.start)
    }

    /// The string left open at the end of the line, if any.
    pub fn unterminated_string(&self) -> Option<&Segment> {
        self.segments
            .iter()
            .find(|s| matches!(s.kind, SegmentKind::Str { terminated: false, .. }))
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    Str { unicode: bool },
}

/// Characters that may appear inside a Clarity identifier.
pub fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '!' | '?')
}

pub fn scan_line(line: &str) -> LineScan {
    let mut scan = LineScan::default();
    let mut mode = Mode::Code;
    let mut seg_start = 0;
    // Last two characters seen, most recent first.
    let mut prev: Option<(usize, char)> = None;
    let mut prev2: Option<char> = None;
    let mut chars = line.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match mode {
            Mode::Code => match c {
                '(' => scan.open_parens += 1,
                ')' => scan.close_parens += 1,
                ';' if matches!(chars.peek(), Some((_, ';'))) => {
                    // Comment mode lasts to the end of the line.
                    push(&mut scan, SegmentKind::Code, seg_start, i);
                    push(&mut scan, SegmentKind::Comment, i, line.len());
                    return scan;
                }
                '"' => {
                    let unicode = matches!(prev, Some((_, 'u'))) && !prev2.is_some_and(is_ident_char);
                    let start = match (unicode, prev) {
                        (true, Some((u_at, _))) => u_at,
                        _ => i,
                    };
                    push(&mut scan, SegmentKind::Code, seg_start, start);
                    seg_start = start;
                    mode = Mode::Str { unicode };
                }
                _ => {}
            },
            Mode::Str { unicode } => {
                if c == '"' && !matches!(prev, Some((_, '\\'))) {
                    let end = i + c.len_utf8();
                    push(
                        &mut scan,
                        SegmentKind::Str {
                            unicode,
                            terminated: true,
                        },
                        seg_start,
                        end,
                    );
                    seg_start = end;
                    mode = Mode::Code;
                }
            }
        }
        prev2 = prev.map(|(_, p)| p);
        prev = Some((i, c));
    }

    let tail = match mode {
        Mode::Str { unicode } => SegmentKind::Str {
            unicode,
            terminated: false,
        },
        Mode::Code => SegmentKind::Code,
    };
    push(&mut scan, tail, seg_start, line.len());
    scan
}

fn push(scan: &mut LineScan, kind: SegmentKind, start: usize, end: usize) {
    if start < end {
        scan.segments.push(Segment { kind, start, end });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &str) -> Vec<(SegmentKind, &str)> {
        scan_line(line)
            .segments
            .iter()
            .map(|s| (s.kind, &line[s.start..s.end]))
            .collect()
    }

    #[test]
    fn test_code_only() {
        let scan = scan_line("(ok (+ u1 u2))");
        assert_eq!(scan.segments.len(), 1);
        assert_eq!((scan.open_parens, scan.close_parens), (2, 2));
    }

    #[test]
    fn test_string_hides_parens() {
        let scan = scan_line("(print \"(((\")");
        assert_eq!((scan.open_parens, scan.close_parens), (1, 1));
        assert_eq!(
            kinds("(print \"(((\")"),
            vec![
                (SegmentKind::Code, "(print "),
                (
                    SegmentKind::Str {
                        unicode: false,
                        terminated: true
                    },
                    "\"(((\""
                ),
                (SegmentKind::Code, ")"),
            ]
        );
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        let line = "(ok u1) ;; trailing (";
        let scan = scan_line(line);
        assert_eq!(scan.comment_start(), Some(8));
        assert_eq!(scan.open_parens, 1);
        assert!(!scan.is_code(12));
    }

    #[test]
    fn test_semicolons_inside_string_are_not_comments() {
        let scan = scan_line("(print \";; not a comment\")");
        assert_eq!(scan.comment_start(), None);
        assert_eq!(scan.close_parens, 1);
    }

    #[test]
    fn test_unicode_string() {
        assert_eq!(
            kinds("(print u\"hi\")")[1],
            (
                SegmentKind::Str {
                    unicode: true,
                    terminated: true
                },
                "u\"hi\""
            )
        );
        // `menu"` is an identifier followed by a plain string.
        assert_eq!(
            kinds("menu\"x\"")[1].0,
            SegmentKind::Str {
                unicode: false,
                terminated: true
            }
        );
    }

    #[test]
    fn test_escaped_quote_does_not_close() {
        let scan = scan_line(r#"(print "say \"hi")"#);
        let open = scan.unterminated_string();
        assert!(open.is_none(), "segments: {:?}", scan.segments);

        let scan = scan_line(r#"(print "abc\")"#);
        let open = scan.unterminated_string().unwrap();
        assert_eq!(open.start, 7);
    }

    #[test]
    fn test_unterminated_string_reaches_end_of_line() {
        let line = "(print \"unterminated";
        let scan = scan_line(line);
        let open = scan.unterminated_string().unwrap();
        assert_eq!((open.start, open.end), (7, line.len()));
    }
}
