//! Pagination and placement — the single forward pass over classified lines.
//!
//! # Architecture
//! - `layout_document` is the only entry point: classify → split spans →
//!   tokenize → wrap → place, one source line at a time.
//! - Layout state (finished pages, current page, vertical cursor) is an
//!   explicit mutable value threaded through every placement call, never
//!   ambient state, so each step is testable in isolation.
//! - The cursor is a PDF-space baseline: it starts at `height − margin` and
//!   only decreases within a page.
//!
//! # Pagination
//! The room check runs per wrapped line, not per logical block, so a
//! multi-line bullet or paragraph may split across a page boundary, and a
//! header can be orphaned at a page bottom. There is deliberately no
//! keep-with-next handling; see DESIGN.md before changing this.

use thiserror::Error;

use crate::layout::classifier::{classify_lines, BlockKind};
use crate::layout::font_metrics::{metrics_for, FontFace};
use crate::layout::spans::{split_spans, tokenize};
use crate::layout::wrap::{wrap_tokens, StyledToken, WrappedLine};

const BULLET_GLYPH: &str = "\u{2022}";

// ────────────────────────────────────────────────────────────────────────────
// Style
// ────────────────────────────────────────────────────────────────────────────

/// An RGB color with components in 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Page geometry and typography for one export. All lengths are in points.
#[derive(Debug, Clone)]
pub struct DocStyle {
    pub page_width: f32,
    pub page_height: f32,
    /// Uniform margin on all four sides.
    pub margin: f32,

    pub title_size: f32,
    pub contact_size: f32,
    pub section_size: f32,
    pub subsection_size: f32,
    pub body_size: f32,

    /// Baseline advance per line as a multiple of the font size.
    pub line_multiple: f32,
    /// Bullets breathe slightly more than body lines.
    pub bullet_line_multiple: f32,

    pub title_gap_after: f32,
    pub section_gap_before: f32,
    /// Distance from a section-header baseline down to its rule.
    pub rule_offset: f32,
    pub rule_gap_after: f32,
    pub subsection_gap_after: f32,
    /// Vertical gap emitted for a blank source line.
    pub blank_gap: f32,

    pub bullet_indent: f32,
    pub rule_width: f32,

    pub text_color: Color,
    pub muted_color: Color,
    pub accent_color: Color,
    pub rule_color: Color,
}

impl DocStyle {
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }
}

/// Returns the default style: A4 paper, 50pt margins, Helvetica family.
pub fn default_doc_style() -> DocStyle {
    DocStyle {
        page_width: 595.276,
        page_height: 841.89,
        margin: 50.0,

        title_size: 22.0,
        contact_size: 10.5,
        section_size: 14.0,
        subsection_size: 12.0,
        body_size: 11.0,

        line_multiple: 1.35,
        bullet_line_multiple: 1.45,

        title_gap_after: 6.0,
        section_gap_before: 10.0,
        rule_offset: 4.0,
        rule_gap_after: 6.0,
        subsection_gap_after: 2.0,
        blank_gap: 8.0,

        bullet_indent: 14.0,
        rule_width: 0.75,

        text_color: Color::rgb(0.13, 0.13, 0.13),
        muted_color: Color::rgb(0.42, 0.45, 0.50),
        accent_color: Color::rgb(0.15, 0.33, 0.53),
        rule_color: Color::rgb(0.78, 0.78, 0.78),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output model
// ────────────────────────────────────────────────────────────────────────────

/// A run of text placed at an absolute baseline position on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRun {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub bold: bool,
    pub size: f32,
    pub color: Color,
}

/// A horizontal rule stroked across the content width.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleLine {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
    pub width: f32,
    pub color: Color,
}

/// One finished page: append-only placed runs and rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub runs: Vec<PlacedRun>,
    pub rules: Vec<RuleLine>,
}

/// The fully laid-out document, ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub pages: Vec<Page>,
}

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("document is empty")]
    EmptyDocument,
}

// ────────────────────────────────────────────────────────────────────────────
// Layout state
// ────────────────────────────────────────────────────────────────────────────

/// Mutable layout cursor: finished pages, the page being filled, and the
/// vertical baseline position on it.
struct LayoutState {
    done: Vec<Page>,
    current: Page,
    y: f32,
}

impl LayoutState {
    fn new(style: &DocStyle) -> Self {
        Self {
            done: Vec::new(),
            current: Page::default(),
            y: style.page_height - style.margin,
        }
    }

    /// Starts a new page if placing a line of `line_height` would cross the
    /// bottom margin. A fresh page's cursor sits at the top margin exactly.
    fn ensure_room(&mut self, line_height: f32, style: &DocStyle) {
        if self.y - line_height < style.margin {
            self.done.push(std::mem::take(&mut self.current));
            self.y = style.page_height - style.margin;
        }
    }

    fn finish(mut self) -> LaidOutDocument {
        self.done.push(self.current);
        LaidOutDocument { pages: self.done }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Lays out a markdown-style document body into positioned pages.
///
/// Empty (or whitespace-only) input fails before any page is allocated.
/// Re-running on identical input produces an identical placement sequence.
pub fn layout_document(text: &str, style: &DocStyle) -> Result<LaidOutDocument, LayoutError> {
    if text.trim().is_empty() {
        return Err(LayoutError::EmptyDocument);
    }

    let lines = classify_lines(text);
    let mut state = LayoutState::new(style);

    for line in &lines {
        match line.kind {
            BlockKind::Blank => state.y -= style.blank_gap,

            BlockKind::Title => {
                let spec = BlockSpec {
                    size: style.title_size,
                    force_bold: true,
                    color: style.text_color,
                    centered: true,
                    indent: 0.0,
                    line_multiple: style.line_multiple,
                    bullet_glyph: false,
                };
                place_text_block(&mut state, style, &line.text, &spec);
                state.y -= style.title_gap_after;
            }

            BlockKind::Contact => {
                let spec = BlockSpec {
                    size: style.contact_size,
                    force_bold: false,
                    color: style.muted_color,
                    centered: true,
                    indent: 0.0,
                    line_multiple: style.line_multiple,
                    bullet_glyph: false,
                };
                place_text_block(&mut state, style, &line.text, &spec);
            }

            BlockKind::SectionHeader => {
                state.y -= style.section_gap_before;
                let spec = BlockSpec {
                    size: style.section_size,
                    force_bold: true,
                    color: style.accent_color,
                    centered: false,
                    indent: 0.0,
                    line_multiple: style.line_multiple,
                    bullet_glyph: false,
                };
                let last_baseline = place_text_block(&mut state, style, &line.text, &spec);
                if let Some(baseline) = last_baseline {
                    state.current.rules.push(RuleLine {
                        x1: style.margin,
                        x2: style.page_width - style.margin,
                        y: baseline - style.rule_offset,
                        width: style.rule_width,
                        color: style.rule_color,
                    });
                    state.y -= style.rule_gap_after;
                }
            }

            BlockKind::SubsectionHeader => {
                let spec = BlockSpec {
                    size: style.subsection_size,
                    force_bold: true,
                    color: style.text_color,
                    centered: false,
                    indent: 0.0,
                    line_multiple: style.line_multiple,
                    bullet_glyph: false,
                };
                place_text_block(&mut state, style, &line.text, &spec);
                state.y -= style.subsection_gap_after;
            }

            BlockKind::Bullet => {
                let spec = BlockSpec {
                    size: style.body_size,
                    force_bold: false,
                    color: style.text_color,
                    centered: false,
                    indent: style.bullet_indent,
                    line_multiple: style.bullet_line_multiple,
                    bullet_glyph: true,
                };
                place_text_block(&mut state, style, &line.text, &spec);
            }

            BlockKind::Body => {
                let spec = BlockSpec {
                    size: style.body_size,
                    force_bold: false,
                    color: style.text_color,
                    centered: false,
                    indent: 0.0,
                    line_multiple: style.line_multiple,
                    bullet_glyph: false,
                };
                place_text_block(&mut state, style, &line.text, &spec);
            }
        }
    }

    Ok(state.finish())
}

// ────────────────────────────────────────────────────────────────────────────
// Block placement
// ────────────────────────────────────────────────────────────────────────────

/// How one classified line is typeset.
struct BlockSpec {
    size: f32,
    force_bold: bool,
    color: Color,
    centered: bool,
    indent: f32,
    line_multiple: f32,
    bullet_glyph: bool,
}

/// Resolves faces, measures every token, wraps, and places the wrapped lines.
/// Returns the baseline of the last placed line, or `None` for empty text.
fn place_text_block(
    state: &mut LayoutState,
    style: &DocStyle,
    text: &str,
    spec: &BlockSpec,
) -> Option<f32> {
    let max_width = style.content_width() - spec.indent;
    let tokens = styled_tokens(text, spec.size, spec.force_bold);
    let wrapped = wrap_tokens(tokens, max_width);

    let advance = spec.size * spec.line_multiple;
    let mut last_baseline = None;

    for (i, line) in wrapped.iter().enumerate() {
        state.ensure_room(advance, style);
        let baseline = state.y;

        if spec.bullet_glyph && i == 0 {
            state.current.runs.push(PlacedRun {
                x: style.margin,
                y: baseline,
                text: BULLET_GLYPH.to_string(),
                bold: false,
                size: spec.size,
                color: spec.color,
            });
        }

        let x_start = if spec.centered {
            (style.page_width - line.width) / 2.0
        } else {
            style.margin + spec.indent
        };
        place_line(&mut state.current, line, x_start, baseline, spec.size, spec.color);

        state.y = baseline - advance;
        last_baseline = Some(baseline);
    }
    last_baseline
}

/// Measures each token with the face its span tag selects.
fn styled_tokens(text: &str, size: f32, force_bold: bool) -> Vec<StyledToken> {
    tokenize(&split_spans(text))
        .into_iter()
        .map(|token| {
            let bold = force_bold || token.bold;
            let face = if bold { FontFace::Bold } else { FontFace::Regular };
            let width = metrics_for(face).measure_str(&token.text, size);
            StyledToken {
                text: token.text,
                bold,
                width,
            }
        })
        .collect()
}

/// Emits one wrapped line as placed runs, coalescing adjacent tokens that
/// share a face so each run carries one font selection.
fn place_line(
    page: &mut Page,
    line: &WrappedLine,
    x_start: f32,
    y: f32,
    size: f32,
    color: Color,
) {
    let mut x = x_start;
    let mut pending: Option<PlacedRun> = None;

    for token in &line.tokens {
        match pending.as_mut() {
            Some(run) if run.bold == token.bold => run.text.push_str(&token.text),
            _ => {
                if let Some(run) = pending.take() {
                    page.runs.push(run);
                }
                pending = Some(PlacedRun {
                    x,
                    y,
                    text: token.text.clone(),
                    bold: token.bold,
                    size,
                    color,
                });
            }
        }
        x += token.width;
    }
    if let Some(run) = pending {
        page.runs.push(run);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{metrics_for, FontFace};

    fn style() -> DocStyle {
        default_doc_style()
    }

    fn top_baseline(s: &DocStyle) -> f32 {
        s.page_height - s.margin
    }

    fn find_run<'a>(doc: &'a LaidOutDocument, text: &str) -> &'a PlacedRun {
        doc.pages
            .iter()
            .flat_map(|p| p.runs.iter())
            .find(|r| r.text == text)
            .unwrap_or_else(|| panic!("run '{text}' not placed"))
    }

    #[test]
    fn test_empty_input_fails_before_page_allocation() {
        assert_eq!(
            layout_document("", &style()),
            Err(LayoutError::EmptyDocument)
        );
        assert_eq!(
            layout_document("  \n \t \n", &style()),
            Err(LayoutError::EmptyDocument)
        );
    }

    #[test]
    fn test_resume_scenario_places_all_blocks() {
        let s = style();
        let doc = layout_document(
            "# Jane Doe\njane@x.com | 555-1234\n## Experience\n- Built **critical** systems",
            &s,
        )
        .unwrap();
        assert_eq!(doc.pages.len(), 1);

        // Title: centered, bold, largest size, at the top baseline.
        let title = &doc.pages[0].runs[0];
        assert_eq!(title.text, "Jane Doe");
        assert!(title.bold);
        assert_eq!(title.size, 22.0);
        assert!((title.y - top_baseline(&s)).abs() < 1e-3);
        let title_w = metrics_for(FontFace::Bold).measure_str("Jane Doe", 22.0);
        assert!(
            (title.x - (s.page_width - title_w) / 2.0).abs() < 1e-3,
            "title must be centered"
        );

        // Contact: centered, muted, directly after the title.
        let contact = find_run(&doc, "jane@x.com | 555-1234");
        assert_eq!(contact.color, s.muted_color);
        assert!(!contact.bold);

        // Section header: bold, accent color, rule directly beneath.
        let header = find_run(&doc, "Experience");
        assert!(header.bold);
        assert_eq!(header.color, s.accent_color);
        assert_eq!(doc.pages[0].rules.len(), 1);
        let rule = &doc.pages[0].rules[0];
        assert!((rule.y - (header.y - s.rule_offset)).abs() < 1e-3);
        assert!((rule.x1 - s.margin).abs() < 1e-3);
        assert!((rule.x2 - (s.page_width - s.margin)).abs() < 1e-3);

        // Bullet: glyph at the margin, then regular/bold/regular runs.
        let glyph = find_run(&doc, "\u{2022}");
        assert!((glyph.x - s.margin).abs() < 1e-3);
        let built = find_run(&doc, "Built ");
        let critical = find_run(&doc, "critical");
        let systems = find_run(&doc, " systems");
        assert!(!built.bold);
        assert!(critical.bold);
        assert!(!systems.bold);
        assert!((built.x - (s.margin + s.bullet_indent)).abs() < 1e-3);
        assert!(built.x < critical.x && critical.x < systems.x);
        assert_eq!(built.y, critical.y);
        assert_eq!(critical.y, systems.y);
    }

    #[test]
    fn test_long_paragraph_breaks_page_and_resets_cursor() {
        let s = style();
        let body = "word ".repeat(1000);
        let doc = layout_document(body.trim_end(), &s).unwrap();
        assert!(doc.pages.len() >= 2, "1000 words must overflow one A4 page");

        // The second page's first placed line sits at height - margin exactly.
        let first = &doc.pages[1].runs[0];
        assert!(
            (first.y - top_baseline(&s)).abs() < 1e-3,
            "fresh page cursor must equal the top margin, got {}",
            first.y
        );

        // No baseline anywhere crosses the bottom margin.
        for page in &doc.pages {
            for run in &page.runs {
                assert!(
                    run.y >= s.margin - 1e-3,
                    "baseline {} placed below the bottom margin",
                    run.y
                );
            }
        }
    }

    #[test]
    fn test_bullet_continuation_aligns_to_indent_not_margin() {
        let s = style();
        let doc = layout_document(&format!("- {}", "word ".repeat(60).trim_end()), &s).unwrap();
        let page = &doc.pages[0];

        let glyphs: Vec<&PlacedRun> = page.runs.iter().filter(|r| r.text == "\u{2022}").collect();
        assert_eq!(glyphs.len(), 1, "glyph only on the first wrapped line");

        let mut baselines: Vec<f32> = page.runs.iter().map(|r| r.y).collect();
        baselines.dedup();
        assert!(baselines.len() >= 2, "60 words must wrap the bullet");

        // Every continuation line starts at the bullet indent.
        for run in page.runs.iter().filter(|r| r.y < glyphs[0].y) {
            assert!(
                (run.x - (s.margin + s.bullet_indent)).abs() < 1e-3,
                "continuation line must align to the indent, got x={}",
                run.x
            );
        }
    }

    #[test]
    fn test_blank_line_adds_fixed_gap_without_content() {
        let s = style();
        let doc = layout_document("First line\n\nSecond line", &s).unwrap();
        let first = find_run(&doc, "First line");
        let second = find_run(&doc, "Second line");
        let expected = first.y - s.body_size * s.line_multiple - s.blank_gap;
        assert!(
            (second.y - expected).abs() < 1e-3,
            "blank line must add exactly blank_gap"
        );
        assert_eq!(doc.pages[0].runs.len(), 2);
    }

    #[test]
    fn test_single_oversized_token_is_placed_unsplit() {
        let s = style();
        let long_word = "a".repeat(200);
        let doc = layout_document(&long_word, &s).unwrap();
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].runs.len(), 1);
        assert_eq!(doc.pages[0].runs[0].text, long_word);
        assert!((doc.pages[0].runs[0].x - s.margin).abs() < 1e-3);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let s = style();
        let input = "# Title\ncontact\n## Section\n- one **two** three\n\nbody paragraph";
        let a = layout_document(input, &s).unwrap();
        let b = layout_document(input, &s).unwrap();
        assert_eq!(a, b, "identical input must produce identical placements");
    }

    #[test]
    fn test_subsection_header_has_no_rule() {
        let doc = layout_document("### Acme Corp", &style()).unwrap();
        let run = find_run(&doc, "Acme Corp");
        assert!(run.bold);
        assert_eq!(run.size, 12.0);
        assert!(doc.pages[0].rules.is_empty());
    }

    #[test]
    fn test_header_can_be_orphaned_at_page_bottom() {
        // Fill the page so the next section header lands on the last slot;
        // the header stays put even though its content moves to page 2.
        let s = style();
        let filler: String = (0..48).map(|i| format!("line {i}\n")).collect();
        let input = format!("{filler}## Orphan\n- content");
        let doc = layout_document(&input, &s).unwrap();
        let header = find_run(&doc, "Orphan");
        let content_page = doc
            .pages
            .iter()
            .position(|p| p.runs.iter().any(|r| r.text == "content"))
            .unwrap();
        let header_page = doc
            .pages
            .iter()
            .position(|p| p.runs.iter().any(|r| std::ptr::eq(r, header)))
            .unwrap();
        assert!(
            header_page <= content_page,
            "no keep-with-next: header never moves forward with its content"
        );
    }
}
