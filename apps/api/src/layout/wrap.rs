//! Greedy first-fit word wrap over styled tokens.
#![allow(dead_code)]
//!
//! Token widths are measured before any wrap decision. Only non-whitespace
//! tokens trigger the overflow check: a whitespace run is always appended to
//! the current line, so a break never drops a pending break opportunity. The
//! placement tests depend on this exact tie-break.
//!
//! No backtracking, no hyphenation, no justification. A single token wider
//! than the max width is placed alone, unsplit.

/// A token with its face resolved and width measured, ready for wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledToken {
    pub text: String,
    pub bold: bool,
    /// Measured width in points at the line's font size.
    pub width: f32,
}

impl StyledToken {
    pub fn is_whitespace(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

/// One wrapped line: its tokens in order and their accumulated width.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub tokens: Vec<StyledToken>,
    pub width: f32,
}

impl WrappedLine {
    /// Line width with trailing whitespace tokens excluded.
    pub fn trimmed_width(&self) -> f32 {
        let trailing_ws: f32 = self
            .tokens
            .iter()
            .rev()
            .take_while(|t| t.is_whitespace())
            .map(|t| t.width)
            .sum();
        self.width - trailing_ws
    }
}

/// Packs tokens into lines greedily. When adding the next non-whitespace
/// token would exceed `max_width`, the current line is closed and the token
/// carries over to the next line.
pub fn wrap_tokens(tokens: Vec<StyledToken>, max_width: f32) -> Vec<WrappedLine> {
    let mut lines = Vec::new();
    let mut current: Vec<StyledToken> = Vec::new();
    let mut current_width = 0.0_f32;

    for token in tokens {
        if !token.is_whitespace()
            && !current.is_empty()
            && current_width + token.width > max_width
        {
            lines.push(WrappedLine {
                tokens: std::mem::take(&mut current),
                width: current_width,
            });
            current_width = 0.0;
        }
        current_width += token.width;
        current.push(token);
    }

    if !current.is_empty() {
        lines.push(WrappedLine {
            tokens: current,
            width: current_width,
        });
    }
    lines
}
