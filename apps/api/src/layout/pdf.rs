//! Serializes a `LaidOutDocument` to PDF bytes with `pdf-writer`.
//!
//! Object layout: catalog, page tree, the two base-14 fonts, the info
//! dictionary, then a (page, content stream) pair per page. No creation date is
//! written, so identical layouts produce identical bytes.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::layout::engine::{LaidOutDocument, Page, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::layout::font_metrics::{FontFace, MM_PER_PT};

const REGULAR_RESOURCE: Name<'static> = Name(b"F1");
const BOLD_RESOURCE: Name<'static> = Name(b"F2");

fn mm_to_pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

fn resource_name(face: FontFace) -> Name<'static> {
    match face {
        FontFace::Regular => REGULAR_RESOURCE,
        FontFace::Bold => BOLD_RESOURCE,
    }
}

/// Writes the document and returns the complete file.
pub fn write_pdf(doc: &LaidOutDocument) -> Vec<u8> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let regular_id = alloc.bump();
    let bold_id = alloc.bump();
    let info_id = alloc.bump();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);

    for (id, face) in [(regular_id, FontFace::Regular), (bold_id, FontFace::Bold)] {
        pdf.type1_font(id)
            .base_font(Name(face.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let media_box = Rect::new(0.0, 0.0, mm_to_pt(PAGE_WIDTH_MM), mm_to_pt(PAGE_HEIGHT_MM));
    let mut page_ids = Vec::with_capacity(doc.pages.len());

    for page in &doc.pages {
        let page_id = alloc.bump();
        let content_id = alloc.bump();
        page_ids.push(page_id);

        let mut writer = pdf.page(page_id);
        writer.media_box(media_box);
        writer.parent(page_tree_id);
        writer.contents(content_id);
        writer
            .resources()
            .fonts()
            .pair(REGULAR_RESOURCE, regular_id)
            .pair(BOLD_RESOURCE, bold_id);
        writer.finish();

        pdf.stream(content_id, &page_content(page));
    }

    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    pdf.document_info(info_id)
        .title(TextStr(&doc.title))
        .subject(TextStr(&doc.subject))
        .author(TextStr(&doc.author))
        .producer(TextStr(concat!("cvgen ", env!("CARGO_PKG_VERSION"))));

    pdf.finish()
}

fn page_content(page: &Page) -> Vec<u8> {
    let mut content = Content::new();
    let page_height_pt = mm_to_pt(PAGE_HEIGHT_MM);

    for run in page.runs.iter().filter(|r| !r.text.is_empty()) {
        let bytes = encode_win_ansi(&run.text);
        content.begin_text();
        content.set_font(resource_name(run.face), run.size_pt);
        content.next_line(mm_to_pt(run.x_mm), page_height_pt - mm_to_pt(run.y_mm));
        content.show(Str(&bytes));
        content.end_text();
    }
    content.finish()
}

/// Maps text onto WinAnsiEncoding. Characters the encoding lacks become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
