// Document layout: turns a CV record into positioned text on A4 pages and
// serializes it to PDF. Pure and synchronous; callers on the async runtime run
// it inside tokio::task::spawn_blocking.

pub mod engine;
pub mod font_metrics;
pub mod pdf;
pub mod sections;

pub use engine::layout_document;
pub use pdf::write_pdf;

use tracing::debug;

use crate::models::cv::CvRecord;

/// Lays out and serializes `cv` in one step.
pub fn render_pdf(cv: &CvRecord) -> Vec<u8> {
    let doc = layout_document(cv);
    debug!("Laid out {} page(s)", doc.page_count());
    write_pdf(&doc)
}
