//! HTML fragment adapter.
//!
//! Produces the markup of the upload page's result card. All text coming
//! from the backend is escaped, so a hostile `detected_piece` renders as text.

use ammonia::clean_text;

use super::{Notice, ViewPorts};
use crate::render::{ImageView, Line, RenderedView, Segment, Tone};

fn segment_html(segment: &Segment) -> String {
    match segment {
        Segment::Text { text } => clean_text(text),
        Segment::Strong { text } => format!("<strong>{}</strong>", clean_text(text)),
        Segment::Badge { text, tone } => {
            let class = match tone {
                Tone::Success => "bg-success",
                Tone::Danger => "bg-danger",
            };
            format!(
                "<span class=\"badge {class} ms-2\">{}</span>",
                clean_text(text)
            )
        }
    }
}

fn line_html(line: &Line) -> String {
    line.segments.iter().map(segment_html).collect()
}

/// Inner HTML of the description block.
///
/// The first line is inline; follow-up lines are `mt-2` blocks.
pub fn description_html(view: &RenderedView) -> String {
    let mut html = String::new();
    for (i, line) in view.description.iter().enumerate() {
        if i == 0 {
            html.push_str(&line_html(line));
        } else {
            html.push_str(&format!("<div class=\"mt-2\">{}</div>", line_html(line)));
        }
    }
    html
}

/// In-memory result card, rendered on demand with [`HtmlView::to_html`].
#[derive(Debug, Default)]
pub struct HtmlView {
    loading: bool,
    visible: bool,
    description: String,
    image_src: Option<String>,
    alerts: Vec<String>,
}

impl HtmlView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Inner HTML of the description block.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image_src(&self) -> Option<&str> {
        self.image_src.as_deref()
    }

    /// Alert markup queued by [`ViewPorts::notify`].
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// The result card and any alerts as one fragment.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for alert in &self.alerts {
            html.push_str(alert);
            html.push('\n');
        }
        let display = if self.visible { "block" } else { "none" };
        html.push_str(&format!(
            "<div class=\"result-container\" style=\"display: {display}\">\n"
        ));
        html.push_str(&format!(
            "  <div id=\"piece-description\">{}</div>\n",
            self.description
        ));
        match &self.image_src {
            Some(src) => html.push_str(&format!(
                "  <img id=\"result-img\" src=\"{}\" style=\"display: block\">\n",
                clean_text(src)
            )),
            None => html.push_str("  <img id=\"result-img\" src=\"\" style=\"display: none\">\n"),
        }
        html.push_str("</div>\n");
        html
    }
}

impl ViewPorts for HtmlView {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn show(&mut self, view: &RenderedView) {
        self.description = description_html(view);
        self.image_src = match &view.image {
            ImageView::Shown { src } => Some(src.clone()),
            ImageView::Hidden => None,
        };
        self.visible = true;
    }

    fn notify(&mut self, notice: &Notice) {
        self.alerts.push(format!(
            "<div class=\"alert alert-danger alert-dismissible fade show\" role=\"alert\" data-ttl-ms=\"{}\">{}<button type=\"button\" class=\"btn-close\" data-bs-dismiss=\"alert\" aria-label=\"Close\"></button></div>",
            notice.ttl.as_millis(),
            clean_text(&notice.message)
        ));
    }

    fn reset(&mut self) {
        self.visible = false;
        self.description.clear();
        self.image_src = None;
    }
}
