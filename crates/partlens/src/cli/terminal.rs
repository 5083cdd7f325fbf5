//! Terminal adapter: spinner while scanning, styled result on stdout,
//! notices on stderr.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use partlens_core::{ImageView, Notice, RenderedView, Segment, Tone, ViewPorts};
use std::io::Write;
use std::time::Duration;

use super::types::OutputFormat;

/// Format a rendered view as terminal text.
///
/// Labels are bold and stock badges colored when the terminal supports it.
pub fn format_text(view: &RenderedView) -> String {
    let mut out = String::new();
    for line in &view.description {
        for segment in &line.segments {
            let piece = match segment {
                Segment::Text { text } => text.clone(),
                Segment::Strong { text } => style(text).bold().to_string(),
                Segment::Badge { text, tone } => {
                    let badge = style(format!("[{text}]"));
                    match tone {
                        Tone::Success => badge.green().to_string(),
                        Tone::Danger => badge.red().to_string(),
                    }
                }
            };
            out.push_str(&piece);
        }
        out.push('\n');
    }
    if let ImageView::Shown { src } = &view.image {
        out.push_str(&format!("{} {}\n", style("Image:").dim(), src));
    }
    out
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} [{elapsed}]")
            .unwrap(),
    );
    pb.set_message("Detecting piece...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Prints results as text or JSON to `out`.
pub struct TerminalView<W: Write> {
    out: W,
    format: OutputFormat,
    spinner: Option<ProgressBar>,
    show_spinner: bool,
    last: Option<RenderedView>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            spinner: None,
            show_spinner: console::user_attended_stderr(),
            last: None,
        }
    }

    /// The view currently on screen, if any.
    pub fn last(&self) -> Option<&RenderedView> {
        self.last.as_ref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_view(&mut self, view: &RenderedView) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.out, view).map_err(std::io::Error::other)?;
                writeln!(self.out)?;
            }
            // HTML goes through `HtmlView`; fall back to text here
            OutputFormat::Text | OutputFormat::Html => {
                write!(self.out, "{}", format_text(view))?;
            }
        }
        self.out.flush()
    }
}

impl<W: Write> ViewPorts for TerminalView<W> {
    fn set_loading(&mut self, loading: bool) {
        if loading {
            if self.show_spinner && self.spinner.is_none() {
                self.spinner = Some(spinner());
            }
        } else if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    fn show(&mut self, view: &RenderedView) {
        if let Err(e) = self.write_view(view) {
            tracing::warn!("Failed to write result: {e}");
        }
        self.last = Some(view.clone());
    }

    fn notify(&mut self, notice: &Notice) {
        eprintln!("{} {}", style("✗").for_stderr().red(), notice.message);
    }

    fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partlens_core::{DetectionResult, Renderer};

    fn rendered(json: &str) -> RenderedView {
        let result: DetectionResult = serde_json::from_str(json).unwrap();
        Renderer::default().render_at(&result, 42)
    }

    #[test]
    fn test_format_text_plain() {
        console::set_colors_enabled(false);
        let view = rendered(
            r#"{"detected_piece":"roda_bipartida","confidence":0.873,"part":{"quantity":5,"in_stock":true},"result_image":"/static/r.jpg"}"#,
        );
        let text = format_text(&view);
        assert_eq!(
            text,
            "Code: 02RV-0042 Description: CONJ MONT RODA GUIA BI PARTIDA\n\
             Detection confidence: 87.3%\n\
             Quantity in inventory: 5 [In stock]\n\
             Image: /static/r.jpg?cb=42\n"
        );
    }

    #[test]
    fn test_show_writes_json() {
        let mut view = TerminalView::new(Vec::new(), OutputFormat::Json);
        view.show(&rendered(r#"{"detected_piece":"Unknown Thing"}"#));
        let out = String::from_utf8(view.into_inner()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["description"][0]["kind"], "unknown_piece");
        assert_eq!(json["image"]["state"], "hidden");
    }

    #[test]
    fn test_reset_forgets_last_view() {
        let mut view = TerminalView::new(Vec::new(), OutputFormat::Text);
        view.set_loading(true);
        view.show(&rendered("{}"));
        view.set_loading(false);
        assert!(view.last().is_some());
        view.reset();
        assert!(view.last().is_none());
    }
}
