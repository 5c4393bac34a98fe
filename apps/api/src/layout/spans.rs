//! Inline span splitting and word-level tokenization.
//!
//! A raw line (marker already stripped) is first split into ordered spans of
//! `(text, bold)` by pairing non-overlapping `**...**` delimiters, then each
//! span is tokenized into alternating word / whitespace-run tokens. Widths
//! accumulate per token so line-breaking operates at word granularity without
//! losing the original spacing.

const BOLD_DELIM: &str = "**";

/// A contiguous run of text sharing one emphasis state.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

/// A word or whitespace-run token carrying its span's emphasis state.
/// Token text is either entirely whitespace or entirely non-whitespace.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub bold: bool,
}

/// Splits a line into spans on paired `**` delimiters.
///
/// Delimiters are removed from the emitted text. Spans never nest; an
/// unmatched `**` is treated as literal text.
pub fn split_spans(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find(BOLD_DELIM) {
        let after_open = &rest[open + BOLD_DELIM.len()..];
        let Some(close) = after_open.find(BOLD_DELIM) else {
            // Unmatched opener — the remainder is literal text.
            break;
        };

        if open > 0 {
            spans.push(Span {
                text: rest[..open].to_string(),
                bold: false,
            });
        }
        let inner = &after_open[..close];
        if !inner.is_empty() {
            spans.push(Span {
                text: inner.to_string(),
                bold: true,
            });
        }
        rest = &after_open[close + BOLD_DELIM.len()..];
    }

    if !rest.is_empty() {
        spans.push(Span {
            text: rest.to_string(),
            bold: false,
        });
    }
    spans
}

/// Tokenizes spans into word and whitespace-run tokens, preserving the
/// whitespace as its own token.
pub fn tokenize(spans: &[Span]) -> Vec<Token> {
    let mut tokens = Vec::new();
    for span in spans {
        let mut current = String::new();
        let mut current_ws: Option<bool> = None;
        for c in span.text.chars() {
            let ws = c.is_whitespace();
            if current_ws == Some(ws) {
                current.push(c);
            } else {
                if !current.is_empty() {
                    tokens.push(Token {
                        text: std::mem::take(&mut current),
                        bold: span.bold,
                    });
                }
                current.push(c);
                current_ws = Some(ws);
            }
        }
        if !current.is_empty() {
            tokens.push(Token {
                text: current,
                bold: span.bold,
            });
        }
    }
    tokens
}
