//! Vertical-flow layout with page overflow.
//!
//! A single cursor walks down the page in millimetres from the top edge. Every
//! emitted line becomes a positioned `TextRun` on the current page. Before each
//! list entry the cursor is compared against `OVERFLOW_THRESHOLD_MM`; past it, a
//! fresh page is started and the cursor returns to the top margin. Entries are
//! never split, so an entry's heading always shares a page with its body.
//!
//! Layout is a pure function of the record: no clock, no randomness.

use crate::layout::font_metrics::{get_metrics, FontFace};
use crate::layout::sections;
use crate::models::cv::CvRecord;

// ────────────────────────────────────────────────────────────────────────────
// Fixed page geometry (A4, millimetres)
// ────────────────────────────────────────────────────────────────────────────

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_LEFT_MM: f32 = 20.0;
pub const MARGIN_TOP_MM: f32 = 20.0;
pub const CONTENT_WIDTH_MM: f32 = 170.0;
/// Cursor position past which the next entry starts a new page.
pub const OVERFLOW_THRESHOLD_MM: f32 = 250.0;

pub const NAME_SIZE_PT: f32 = 24.0;
pub const CONTACT_SIZE_PT: f32 = 10.0;
pub const HEADING_SIZE_PT: f32 = 12.0;
pub const BODY_SIZE_PT: f32 = 10.0;

pub const HEADING_ADVANCE_MM: f32 = 8.0;
pub const ENTRY_LINE_MM: f32 = 6.0;
pub const BODY_LINE_MM: f32 = 5.0;
pub const BEFORE_BODY_MM: f32 = 2.0;
pub const ENTRY_GAP_MM: f32 = 10.0;
pub const SECTION_GAP_MM: f32 = 4.0;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// One line of text at a fixed position. `y_mm` is the baseline, from the top.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x_mm: f32,
    pub y_mm: f32,
    pub face: FontFace,
    pub size_pt: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub runs: Vec<TextRun>,
}

/// The finished layout, ready to be serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub title: String,
    pub subject: String,
    pub author: String,
    pub pages: Vec<Page>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All runs in reading order with their zero-based page index.
    #[cfg(test)]
    pub fn runs(&self) -> impl Iterator<Item = (usize, &TextRun)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(i, p)| p.runs.iter().map(move |r| (i, r)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cursor
// ────────────────────────────────────────────────────────────────────────────

/// Mutable layout state: the pages produced so far and the vertical cursor.
pub struct Flow {
    pages: Vec<Page>,
    y: f32,
}

impl Flow {
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: MARGIN_TOP_MM,
        }
    }

    #[cfg(test)]
    pub fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Places `text` at the cursor without moving it.
    pub fn place(&mut self, face: FontFace, size_pt: f32, text: impl Into<String>) {
        let run = TextRun {
            x_mm: MARGIN_LEFT_MM,
            y_mm: self.y,
            face,
            size_pt,
            text: text.into(),
        };
        if let Some(page) = self.pages.last_mut() {
            page.runs.push(run);
        }
    }

    /// Places a line and advances by `advance_mm`.
    pub fn line(&mut self, face: FontFace, size_pt: f32, text: impl Into<String>, advance_mm: f32) {
        self.place(face, size_pt, text);
        self.advance(advance_mm);
    }

    /// Wraps `text` to the content width and places each line, advancing by
    /// `line_mm` per line. Returns the number of lines placed.
    pub fn paragraph(&mut self, face: FontFace, size_pt: f32, text: &str, line_mm: f32) -> usize {
        let lines = get_metrics(face).wrap(text, size_pt, CONTENT_WIDTH_MM);
        let count = lines.len();
        for line in lines {
            self.line(face, size_pt, line, line_mm);
        }
        count
    }

    /// Starts a new page if the cursor is past `threshold_mm`.
    pub fn break_if_past(&mut self, threshold_mm: f32) -> bool {
        if self.y > threshold_mm {
            self.pages.push(Page::default());
            self.y = MARGIN_TOP_MM;
            true
        } else {
            false
        }
    }

    /// The entry-granularity overflow check.
    pub fn break_before_entry(&mut self) -> bool {
        self.break_if_past(OVERFLOW_THRESHOLD_MM)
    }

    /// Emits a bold section heading. The check leaves room for the heading's
    /// own advance so the first entry cannot be pushed away from it.
    pub fn heading(&mut self, title: &str) {
        self.break_if_past(OVERFLOW_THRESHOLD_MM - HEADING_ADVANCE_MM);
        self.line(FontFace::Bold, HEADING_SIZE_PT, title, HEADING_ADVANCE_MM);
    }

    pub fn finish(self) -> Vec<Page> {
        self.pages
    }
}

impl Default for Flow {
    fn default() -> Self {
        Self::new()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Lays out the whole record in the fixed section order.
///
/// Never fails: blank fields render as nothing and empty sections are omitted.
pub fn layout_document(cv: &CvRecord) -> LaidOutDocument {
    let mut flow = Flow::new();

    sections::emit_header(&mut flow, &cv.personal_info);
    sections::emit_summary(&mut flow, &cv.summary);
    sections::emit_experience(&mut flow, &cv.experience);
    sections::emit_education(&mut flow, &cv.education);
    sections::emit_skills(&mut flow, &cv.skills);
    sections::emit_projects(&mut flow, &cv.projects);
    sections::emit_languages(&mut flow, &cv.languages);
    sections::emit_certifications(&mut flow, &cv.certifications);

    let name = cv.personal_info.full_name.trim().to_string();
    LaidOutDocument {
        title: format!("CV - {name}"),
        subject: "Professional CV".to_string(),
        author: name,
        pages: flow.finish(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::{Entry, ExperienceEntry, PersonalInfo};

    fn record(name: &str, email: &str, experience: Vec<ExperienceEntry>) -> CvRecord {
        CvRecord {
            personal_info: PersonalInfo {
                full_name: name.into(),
                email: email.into(),
                ..PersonalInfo::default()
            },
            summary: String::new(),
            experience,
            education: vec![],
            skills: vec![],
            projects: vec![],
            languages: vec![],
            certifications: vec![],
        }
    }

    fn job(i: usize) -> ExperienceEntry {
        ExperienceEntry {
            id: i.to_string(),
            job_title: format!("Engineer {i}"),
            company: format!("Company {i}"),
            location: "Remote".into(),
            start_date: "2019-01".into(),
            end_date: "2020-01".into(),
            current: false,
            description: "Shipped features, reviewed code and mentored colleagues across \
                          several teams while keeping the platform healthy. "
                .repeat(3),
        }
    }

    fn texts(doc: &LaidOutDocument) -> Vec<&str> {
        doc.runs().map(|(_, r)| r.text.as_str()).collect()
    }

    #[test]
    fn test_empty_record_lays_out_one_page() {
        let doc = layout_document(&CvRecord::default());
        assert_eq!(doc.page_count(), 1);
        // Only the (empty) name line is placed.
        assert_eq!(texts(&doc), vec![""]);
    }

    #[test]
    fn test_minimal_record_scenario() {
        let doc = layout_document(&record("John Doe", "john@example.com", vec![]));
        let t = texts(&doc);
        assert_eq!(t[0], "John Doe");
        assert_eq!(t[1], "john@example.com");
        assert!(!t.contains(&"Work Experience"));
    }

    #[test]
    fn test_entry_without_title_or_company_is_skipped() {
        let mut blank = ExperienceEntry::blank("1".into());
        blank.description = "x".into();
        let doc = layout_document(&record("A", "a@b.c", vec![blank]));
        let t = texts(&doc);
        assert!(!t.contains(&"x"));
        assert!(!t.contains(&"Work Experience"));
    }

    #[test]
    fn test_entries_keep_input_order() {
        let jobs = vec![job(3), job(1), job(2)];
        let doc = layout_document(&record("A", "", jobs));
        let titles: Vec<_> = texts(&doc)
            .into_iter()
            .filter(|t| t.starts_with("Engineer "))
            .collect();
        assert_eq!(titles, vec!["Engineer 3", "Engineer 1", "Engineer 2"]);
    }

    #[test]
    fn test_many_entries_paginate_without_splitting() {
        let jobs: Vec<_> = (0..20).map(job).collect();
        let doc = layout_document(&record("A", "a@b.c", jobs.clone()));
        assert!(doc.page_count() > 1, "expected overflow onto more pages");

        let runs: Vec<_> = doc.runs().collect();
        for j in &jobs {
            let title_at = runs
                .iter()
                .position(|(_, r)| r.text == j.job_title)
                .expect("title emitted");
            let title_page = runs[title_at].0;
            // The next run starting the description block follows the title
            // on the same page.
            let body_page = runs[title_at + 3].0;
            assert_eq!(title_page, body_page, "entry {} split", j.job_title);
        }
    }

    #[test]
    fn test_new_page_resets_cursor_to_top_margin() {
        let jobs: Vec<_> = (0..20).map(job).collect();
        let doc = layout_document(&record("A", "", jobs));
        for page in doc.pages.iter().skip(1) {
            assert_eq!(page.runs[0].y_mm, MARGIN_TOP_MM);
        }
    }

    #[test]
    fn test_entries_start_above_threshold() {
        let jobs: Vec<_> = (0..20).map(job).collect();
        let doc = layout_document(&record("A", "", jobs));
        for (_, run) in doc.runs().filter(|(_, r)| r.text.starts_with("Engineer ")) {
            assert!(run.y_mm <= OVERFLOW_THRESHOLD_MM);
        }
    }

    #[test]
    fn test_heading_not_stranded_at_page_bottom() {
        let mut flow = Flow::new();
        flow.advance(OVERFLOW_THRESHOLD_MM - 2.0);
        flow.heading("Education");
        assert_eq!(flow.page_index(), 1);
        assert!(!flow.break_before_entry());
    }

    #[test]
    fn test_layout_is_deterministic() {
        let cv = CvRecord::sample();
        assert_eq!(layout_document(&cv), layout_document(&cv));
    }

    #[test]
    fn test_metadata_from_name() {
        let doc = layout_document(&CvRecord::sample());
        assert_eq!(doc.title, "CV - Alex Johnson");
        assert_eq!(doc.author, "Alex Johnson");
        assert_eq!(doc.subject, "Professional CV");
    }
}
