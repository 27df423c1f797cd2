//! Page indicators and fallback markup

use html_escape::{encode_double_quoted_attribute, encode_text};
use web_sys::Element;

use crate::error::ViewerError;
use crate::viewer::ViewerChrome;

/// Writes page numbers into the page's indicator elements
pub struct DomChrome {
    page_number: Option<Element>,
    page_count: Option<Element>,
}

impl DomChrome {
    pub fn new(page_number: Option<Element>, page_count: Option<Element>) -> Self {
        Self {
            page_number,
            page_count,
        }
    }
}

impl ViewerChrome for DomChrome {
    fn show_page_number(&self, page: u32) {
        if let Some(element) = &self.page_number {
            element.set_text_content(Some(&page.to_string()));
        }
    }

    fn show_page_count(&self, count: u32) {
        if let Some(element) = &self.page_count {
            element.set_text_content(Some(&count.to_string()));
        }
    }

    fn report_error(&self, error: &ViewerError) {
        if error.is_render_failure() {
            tracing::error!("Error rendering CV page: {}", error);
        } else {
            tracing::error!("CV viewer error: {}", error);
        }
    }
}

/// Why the viewer was replaced by a download link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackKind {
    /// PDF.js never loaded; shown in red
    LibraryMissing,
    /// The document could not be fetched or opened
    LoadFailed,
}

impl FallbackKind {
    fn paragraph_open(self) -> &'static str {
        match self {
            FallbackKind::LibraryMissing => "<p style=\"color: red;\">",
            FallbackKind::LoadFailed => "<p>",
        }
    }
}

/// `<p>{message} <a href="{url}">{link_text}</a> instead.</p>`, with the
/// opening tag chosen by `kind`
pub fn fallback_markup(kind: FallbackKind, message: &str, url: &str, link_text: &str) -> String {
    format!(
        "{}{} <a href=\"{}\">{}</a> instead.</p>",
        kind.paragraph_open(),
        encode_text(message),
        encode_double_quoted_attribute(url),
        encode_text(link_text)
    )
}

/// Replace the viewer region with a direct download link.
pub fn show_fallback(
    container: &Element,
    kind: FallbackKind,
    message: &str,
    url: &str,
    link_text: &str,
) {
    container.set_inner_html(&fallback_markup(kind, message, url, link_text));
}
