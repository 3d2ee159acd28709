//! Section emitters, one per part of the CV, in the order the engine calls them.
//!
//! Every repeating list goes through `emit_list`, which applies the single skip
//! rule (`Entry::has_heading`) and the per-entry page-break check.

use chrono::NaiveDate;

use crate::layout::engine::{
    Flow, BEFORE_BODY_MM, BODY_LINE_MM, BODY_SIZE_PT, CONTACT_SIZE_PT, ENTRY_GAP_MM, ENTRY_LINE_MM,
    NAME_SIZE_PT, SECTION_GAP_MM,
};
use crate::layout::font_metrics::FontFace;
use crate::models::cv::{
    CertificationEntry, EducationEntry, Entry, ExperienceEntry, LanguageEntry, PersonalInfo,
    ProjectEntry, SkillEntry,
};

pub const SEPARATOR: &str = " | ";

const NAME_ADVANCE_MM: f32 = 10.0;
const HEADER_GAP_MM: f32 = 9.0;
const SUMMARY_GAP_MM: f32 = 10.0;

// ────────────────────────────────────────────────────────────────────────────
// Line builders
// ────────────────────────────────────────────────────────────────────────────

/// Joins the non-blank parts with `SEPARATOR`, preserving order.
pub fn join_present<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// `email | phone | address`, blank values dropped.
pub fn contact_line(info: &PersonalInfo) -> String {
    join_present([
        info.email.as_str(),
        info.phone.as_str(),
        info.address.as_str(),
    ])
}

/// `linkedin | github | website`, blank or absent values dropped.
pub fn links_line(info: &PersonalInfo) -> String {
    join_present(
        [&info.linkedin, &info.github, &info.website]
            .into_iter()
            .filter_map(|o| o.as_deref()),
    )
}

/// Renders a `YYYY-MM` month as `Mon YYYY`. Anything else passes through.
pub fn format_month(value: &str) -> String {
    let value = value.trim();
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|_| value.to_string())
}

/// `start - end`, with `Present` standing in for the end of an ongoing period.
/// Returns an empty string when there is nothing to show.
pub fn format_period(start: &str, end: &str, ongoing: bool) -> String {
    let start = format_month(start);
    let end = if ongoing {
        "Present".to_string()
    } else {
        format_month(end)
    };
    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (true, false) => end,
        (false, true) => start,
        (false, false) => format!("{start} - {end}"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Header and summary
// ────────────────────────────────────────────────────────────────────────────

pub fn emit_header(flow: &mut Flow, info: &PersonalInfo) {
    flow.line(
        FontFace::Bold,
        NAME_SIZE_PT,
        info.full_name.trim(),
        NAME_ADVANCE_MM,
    );

    for line in [contact_line(info), links_line(info)] {
        if !line.is_empty() {
            flow.line(FontFace::Regular, CONTACT_SIZE_PT, line, ENTRY_LINE_MM);
        }
    }
    flow.advance(HEADER_GAP_MM);
}

pub fn emit_summary(flow: &mut Flow, summary: &str) {
    if summary.trim().is_empty() {
        return;
    }
    flow.heading("Professional Summary");
    flow.paragraph(FontFace::Regular, BODY_SIZE_PT, summary, BODY_LINE_MM);
    flow.advance(SUMMARY_GAP_MM);
}

// ────────────────────────────────────────────────────────────────────────────
// Repeating lists
// ────────────────────────────────────────────────────────────────────────────

fn emit_list<T: Entry>(flow: &mut Flow, title: &str, entries: &[T], emit: impl Fn(&mut Flow, &T)) {
    let visible: Vec<&T> = entries.iter().filter(|e| e.has_heading()).collect();
    if visible.is_empty() {
        return;
    }
    flow.heading(title);
    for entry in visible {
        flow.break_before_entry();
        emit(&mut *flow, entry);
        flow.advance(ENTRY_GAP_MM);
    }
    flow.advance(SECTION_GAP_MM);
}

/// Places the non-blank detail lines of an entry, then its wrapped body.
fn entry_block(flow: &mut Flow, title: &str, details: &[String], body: &str) {
    flow.line(FontFace::Bold, BODY_SIZE_PT, title.trim(), ENTRY_LINE_MM);
    for detail in details.iter().filter(|d| !d.is_empty()) {
        flow.line(FontFace::Regular, BODY_SIZE_PT, detail.as_str(), ENTRY_LINE_MM);
    }
    if !body.trim().is_empty() {
        flow.advance(BEFORE_BODY_MM);
        flow.paragraph(FontFace::Regular, BODY_SIZE_PT, body, BODY_LINE_MM);
    }
}

pub fn emit_experience(flow: &mut Flow, entries: &[ExperienceEntry]) {
    emit_list(flow, "Work Experience", entries, |flow, e| {
        entry_block(
            flow,
            &e.job_title,
            &[
                join_present([e.company.as_str(), e.location.as_str()]),
                format_period(&e.start_date, &e.end_date, e.current),
            ],
            &e.description,
        );
    });
}

pub fn emit_education(flow: &mut Flow, entries: &[EducationEntry]) {
    emit_list(flow, "Education", entries, |flow, e| {
        let gpa = e
            .gpa
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(|g| format!("GPA: {g}"))
            .unwrap_or_default();
        let period = format_period(&e.start_date, &e.end_date, false);
        entry_block(
            flow,
            &e.degree,
            &[
                join_present([e.institution.as_str(), e.location.as_str()]),
                join_present([period.as_str(), gpa.as_str()]),
            ],
            &e.description,
        );
    });
}

pub fn emit_projects(flow: &mut Flow, entries: &[ProjectEntry]) {
    emit_list(flow, "Projects", entries, |flow, e| {
        let technologies = e
            .technologies
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        let technologies = if technologies.is_empty() {
            technologies
        } else {
            format!("Technologies: {technologies}")
        };
        entry_block(
            flow,
            &e.name,
            &[
                technologies,
                e.link.as_deref().unwrap_or_default().trim().to_string(),
            ],
            &e.description,
        );
    });
}

pub fn emit_certifications(flow: &mut Flow, entries: &[CertificationEntry]) {
    emit_list(flow, "Certifications", entries, |flow, e| {
        let date = format_month(&e.date);
        let credential = e
            .credential_id
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| format!("Credential ID: {c}"))
            .unwrap_or_default();
        // Issuer-only certifications promote the issuer to the heading line.
        let (title, issuer) = if e.name.trim().is_empty() {
            (e.issuer.as_str(), "")
        } else {
            (e.name.as_str(), e.issuer.as_str())
        };
        entry_block(
            flow,
            title,
            &[join_present([issuer, date.as_str()]), credential],
            "",
        );
    });
}

/// Lists whose entries are single labels are set as one wrapped paragraph.
fn emit_inline_list<T: Entry>(flow: &mut Flow, title: &str, entries: &[T], label: impl Fn(&T) -> String) {
    let labels: Vec<String> = entries
        .iter()
        .filter(|e| e.has_heading())
        .map(label)
        .collect();
    if labels.is_empty() {
        return;
    }
    flow.heading(title);
    flow.break_before_entry();
    flow.paragraph(
        FontFace::Regular,
        BODY_SIZE_PT,
        &labels.join(", "),
        BODY_LINE_MM,
    );
    flow.advance(ENTRY_GAP_MM);
}

pub fn emit_skills(flow: &mut Flow, entries: &[SkillEntry]) {
    emit_inline_list(flow, "Skills", entries, |s| match s.level {
        Some(level) => format!("{} ({})", s.name.trim(), level.label()),
        None => s.name.trim().to_string(),
    });
}

pub fn emit_languages(flow: &mut Flow, entries: &[LanguageEntry]) {
    emit_inline_list(flow, "Languages", entries, |l| {
        format!("{} ({})", l.name.trim(), l.proficiency.label())
    });
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
