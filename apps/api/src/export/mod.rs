//! PDF serialization of a laid-out document.
//!
//! Emits a minimal vector PDF with `pdf-writer`: catalog, page tree, one
//! content stream per page, and the base-14 Helvetica pair as Type1 fonts
//! with WinAnsi encoding. Every placed run becomes one text-showing block at
//! its absolute baseline; rules become stroked line paths. No metadata,
//! bookmarks, or accessibility tagging is produced.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use crate::layout::engine::{DocStyle, LaidOutDocument};

pub mod handlers;

/// Font resource names inside each page's resource dictionary.
const FONT_REGULAR: &[u8] = b"F1";
const FONT_BOLD: &[u8] = b"F2";

/// Serializes the laid-out document to PDF bytes.
pub fn render_pdf(doc: &LaidOutDocument, style: &DocStyle) -> Vec<u8> {
    let mut pdf = Pdf::new();

    let mut next_id = 1;
    let mut alloc = || {
        let id = Ref::new(next_id);
        next_id += 1;
        id
    };
    let catalog_id = alloc();
    let pages_id = alloc();
    let regular_id = alloc();
    let bold_id = alloc();
    let page_ids: Vec<Ref> = doc.pages.iter().map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = doc.pages.iter().map(|_| alloc()).collect();

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(doc.pages.len() as i32);

    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    for (i, page) in doc.pages.iter().enumerate() {
        let mut content = Content::new();

        for rule in &page.rules {
            content.save_state();
            content.set_stroke_rgb(rule.color.r, rule.color.g, rule.color.b);
            content.set_line_width(rule.width);
            content.move_to(rule.x1, rule.y);
            content.line_to(rule.x2, rule.y);
            content.stroke();
            content.restore_state();
        }

        for run in &page.runs {
            let font = if run.bold { FONT_BOLD } else { FONT_REGULAR };
            let encoded = to_winansi_bytes(&run.text);
            content.set_fill_rgb(run.color.r, run.color.g, run.color.b);
            content
                .begin_text()
                .set_font(Name(font), run.size)
                .next_line(run.x, run.y)
                .show(Str(&encoded))
                .end_text();
        }

        pdf.stream(content_ids[i], &content.finish());

        let mut page_writer = pdf.page(page_ids[i]);
        page_writer
            .media_box(Rect::new(0.0, 0.0, style.page_width, style.page_height))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page_writer.resources();
        let mut fonts = resources.fonts();
        fonts.pair(Name(FONT_REGULAR), regular_id);
        fonts.pair(Name(FONT_BOLD), bold_id);
    }

    pdf.finish()
}

/// Encodes text as WinAnsi bytes for the Type1 base fonts.
/// Characters without a WinAnsi slot are substituted with '?'.
fn to_winansi_bytes(text: &str) -> Vec<u8> {
    text.chars().map(winansi_byte).collect()
}

fn winansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{00a0}'..='\u{00ff}' => c as u8,
        '\u{20ac}' => 0x80,
        '\u{2026}' => 0x85,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{2122}' => 0x99,
        _ => b'?',
    }
}
