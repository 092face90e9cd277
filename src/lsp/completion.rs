//! Completion items built from the vocabulary snippet table.

use clarion_core::lang::completions::{COMPLETIONS, CompletionInfo, CompletionKind};
use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, Documentation, InsertTextFormat, MarkupContent, MarkupKind,
};

fn item_kind(kind: CompletionKind) -> CompletionItemKind {
    match kind {
        CompletionKind::Keyword => CompletionItemKind::KEYWORD,
        CompletionKind::Function => CompletionItemKind::FUNCTION,
        CompletionKind::Operator => CompletionItemKind::OPERATOR,
        CompletionKind::Value => CompletionItemKind::VALUE,
        CompletionKind::Snippet => CompletionItemKind::SNIPPET,
    }
}

fn to_item(info: &CompletionInfo) -> CompletionItem {
    CompletionItem {
        label: info.label.to_string(),
        kind: Some(item_kind(info.kind)),
        insert_text: Some(info.insert_text.to_string()),
        insert_text_format: Some(if info.is_snippet {
            InsertTextFormat::SNIPPET
        } else {
            InsertTextFormat::PLAIN_TEXT
        }),
        documentation: Some(Documentation::MarkupContent(MarkupContent {
            kind: MarkupKind::Markdown,
            value: info.documentation.to_string(),
        })),
        ..Default::default()
    }
}

pub fn completion_items() -> Vec<CompletionItem> {
    COMPLETIONS.iter().map(to_item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_mirror_the_table() {
        let items = completion_items();
        assert_eq!(items.len(), COMPLETIONS.len());

        let public = items.iter().find(|i| i.label == "define-public").unwrap();
        assert_eq!(public.kind, Some(CompletionItemKind::KEYWORD));
        assert_eq!(public.insert_text_format, Some(InsertTextFormat::SNIPPET));
        assert!(public.insert_text.as_deref().unwrap().contains("${1:function-name}"));
    }
}
