#![no_main]

use clarion_syntax::{ScanConfig, Scanner, SourceDocument};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only valid UTF-8 reaches the scanner; editors normalise text before handing it over.
    if let Ok(s) = std::str::from_utf8(data) {
        let doc = SourceDocument::new("fuzz.clar", s);
        let diagnostics = Scanner::new(&ScanConfig::default().all_checks()).scan(&doc);
        for d in &diagnostics {
            assert!((d.range.end.line as usize) < doc.line_count());
            assert!(doc.offset_of(d.range.end).is_some());
        }
    }
});
