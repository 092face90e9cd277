//! Convert scanner diagnostics to LSP diagnostics

use tower_lsp::lsp_types::{self as lsp, DiagnosticSeverity, PositionEncodingKind, Url};

use clarion_syntax::{Diagnostic, Position, Range, Severity, SourceDocument};

pub const CLARITY_LANGUAGE_ID: &str = "clarity";

/// How LSP columns are counted. Scanner columns are Unicode scalars, which is `Utf32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionEncoding {
    #[default]
    Utf16,
    Utf32,
}

impl PositionEncoding {
    /// Pick `utf-32` when the client offers it, otherwise the protocol default `utf-16`.
    pub fn negotiate(offered: Option<&[PositionEncodingKind]>) -> Self {
        match offered {
            Some(kinds) if kinds.contains(&PositionEncodingKind::UTF32) => Self::Utf32,
            _ => Self::Utf16,
        }
    }

    pub fn kind(self) -> PositionEncodingKind {
        match self {
            Self::Utf16 => PositionEncodingKind::UTF16,
            Self::Utf32 => PositionEncodingKind::UTF32,
        }
    }
}

fn to_lsp_position(doc: Option<&SourceDocument>, encoding: PositionEncoding, pos: Position) -> lsp::Position {
    let character = match (encoding, doc) {
        (PositionEncoding::Utf16, Some(doc)) => doc
            .line(pos.line as usize)
            .chars()
            .take(pos.character as usize)
            .map(|c| c.len_utf16() as u32)
            .sum(),
        _ => pos.character,
    };
    lsp::Position::new(pos.line, character)
}

/// Convert a scanner range. Without the document text the columns are passed through unchanged.
pub fn to_lsp_range(doc: Option<&SourceDocument>, encoding: PositionEncoding, range: Range) -> lsp::Range {
    lsp::Range::new(
        to_lsp_position(doc, encoding, range.start),
        to_lsp_position(doc, encoding, range.end),
    )
}

fn to_lsp_severity(severity: Severity) -> DiagnosticSeverity {
    match severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
    }
}

pub fn to_lsp_diagnostic(
    doc: Option<&SourceDocument>,
    encoding: PositionEncoding,
    diagnostic: &Diagnostic,
) -> lsp::Diagnostic {
    lsp::Diagnostic {
        range: to_lsp_range(doc, encoding, diagnostic.range),
        severity: Some(to_lsp_severity(diagnostic.severity)),
        source: Some(diagnostic.source.to_string()),
        message: diagnostic.message.clone(),
        ..Default::default()
    }
}

pub fn to_lsp_diagnostics(
    doc: Option<&SourceDocument>,
    encoding: PositionEncoding,
    diagnostics: &[Diagnostic],
) -> Vec<lsp::Diagnostic> {
    diagnostics
        .iter()
        .map(|d| to_lsp_diagnostic(doc, encoding, d))
        .collect()
}

/// Whether a document should be scanned: language id `clarity`, or a `.clar` path.
pub fn is_clarity_document(language_id: Option<&str>, uri: &Url) -> bool {
    language_id == Some(CLARITY_LANGUAGE_ID) || uri.path().ends_with(".clar")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clarion_syntax::SOURCE;

    #[test]
    fn test_conversion_keeps_range_and_severity() {
        let d = Diagnostic::warning(Range::on_line(3, 2, 9), "Invalid type: 'my-type'");
        let lsp = to_lsp_diagnostic(None, PositionEncoding::Utf16, &d);
        assert_eq!(lsp.range, lsp::Range::new(lsp::Position::new(3, 2), lsp::Position::new(3, 9)));
        assert_eq!(lsp.severity, Some(DiagnosticSeverity::WARNING));
        assert_eq!(lsp.source.as_deref(), Some(SOURCE));
        assert_eq!(lsp.message, "Invalid type: 'my-type'");
    }

    #[test]
    fn test_utf16_columns_count_surrogate_pairs() {
        let doc = SourceDocument::new("t.clar", "(print \"\u{1F600}\") (define-pubic)");
        // `(define-pubic)` starts at scalar 12; the emoji takes two UTF-16 units.
        let range = Range::on_line(0, 12, 26);
        assert_eq!(
            to_lsp_range(Some(&doc), PositionEncoding::Utf16, range),
            lsp::Range::new(lsp::Position::new(0, 13), lsp::Position::new(0, 27))
        );
        assert_eq!(
            to_lsp_range(Some(&doc), PositionEncoding::Utf32, range),
            lsp::Range::new(lsp::Position::new(0, 12), lsp::Position::new(0, 26))
        );
    }

    #[test]
    fn test_encoding_negotiation() {
        assert_eq!(PositionEncoding::negotiate(None), PositionEncoding::Utf16);
        assert_eq!(
            PositionEncoding::negotiate(Some(&[PositionEncodingKind::UTF8, PositionEncodingKind::UTF16])),
            PositionEncoding::Utf16
        );
        assert_eq!(
            PositionEncoding::negotiate(Some(&[PositionEncodingKind::UTF32])),
            PositionEncoding::Utf32
        );
    }

    #[test]
    fn test_clarity_document_detection() {
        let clar = Url::parse("file:///w/contracts/token.clar").unwrap();
        let other = Url::parse("file:///w/notes.txt").unwrap();
        assert!(is_clarity_document(None, &clar));
        assert!(is_clarity_document(Some("clarity"), &other));
        assert!(!is_clarity_document(Some("plaintext"), &other));
    }
}
