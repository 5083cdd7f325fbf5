//! Result rendering: detection responses to view models.
//!
//! [`Renderer::render_at`] is a pure function of its input and the supplied
//! timestamp. Adapters in [`crate::view`] turn the resulting
//! [`RenderedView`] into terminal text or HTML.
//!
//! Rules, applied in order:
//! 1. No `detected_piece` → a single "no piece detected" line.
//! 2. Known piece → catalog code and name; unknown → "Detected piece: {raw}".
//! 3. `confidence` → percentage line with one decimal.
//! 4. `part` → inventory line with quantity and stock badge.
//! 5. `result_image` → resolved `src`, otherwise the image is hidden.

pub mod image_source;
pub mod labels;

pub use image_source::{ImageResolver, ImageSource, JPEG_DATA_URI_PREFIX};
pub use labels::Labels;

use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::catalog::PieceCatalog;
use crate::config::{Config, RenderConfig};
use crate::types::{DetectionResult, PartInfo};

/// A run of description text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// Literal text
    Text { text: String },
    /// Emphasized label
    Strong { text: String },
    /// Status badge
    Badge { text: String, tone: Tone },
}

impl Segment {
    fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    fn strong(text: impl Into<String>) -> Self {
        Self::Strong { text: text.into() }
    }

    /// The segment's text, without markup.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text { text } | Self::Strong { text } | Self::Badge { text, .. } => text,
        }
    }
}

/// Badge color intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Danger,
}

/// What a description line says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    NoDetection,
    Piece,
    UnknownPiece,
    Confidence,
    Inventory,
}

/// One line of the description block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub kind: LineKind,
    pub segments: Vec<Segment>,
}

impl Line {
    /// Plain text of the line.
    pub fn text(&self) -> String {
        self.segments.iter().map(Segment::as_str).collect()
    }
}

/// Annotated image state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ImageView {
    Hidden,
    Shown { src: String },
}

/// View model for one detection result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedView {
    pub description: Vec<Line>,
    pub image: ImageView,
}

impl RenderedView {
    /// The empty view shown after a "new photo" reset.
    pub fn cleared() -> Self {
        Self {
            description: Vec::new(),
            image: ImageView::Hidden,
        }
    }

    /// Description as plain text, one line per entry.
    pub fn description_text(&self) -> String {
        self.description
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn line(&self, kind: LineKind) -> Option<&Line> {
        self.description.iter().find(|l| l.kind == kind)
    }

    pub fn image_src(&self) -> Option<&str> {
        match &self.image {
            ImageView::Shown { src } => Some(src),
            ImageView::Hidden => None,
        }
    }
}

/// Maps detection results to [`RenderedView`]s.
#[derive(Debug, Clone)]
pub struct Renderer {
    catalog: PieceCatalog,
    labels: &'static Labels,
    images: ImageResolver,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(PieceCatalog::builtin(), &RenderConfig::default())
    }
}

impl Renderer {
    pub fn new(catalog: PieceCatalog, config: &RenderConfig) -> Self {
        Self {
            catalog,
            labels: Labels::for_locale(config.locale),
            images: ImageResolver::new(config),
        }
    }

    /// Renderer with the built-in catalog extended by `config.catalog`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            PieceCatalog::with_entries(&config.catalog.entries),
            &config.render,
        )
    }

    pub fn labels(&self) -> &'static Labels {
        self.labels
    }

    /// Render using the current wall-clock time for the cache-buster.
    pub fn render(&self, result: &DetectionResult) -> RenderedView {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        self.render_at(result, now_ms)
    }

    /// Render with an explicit cache-buster timestamp.
    pub fn render_at(&self, result: &DetectionResult, now_ms: u64) -> RenderedView {
        let description = match result.piece() {
            None => vec![Line {
                kind: LineKind::NoDetection,
                segments: vec![Segment::text(self.labels.no_piece)],
            }],
            Some(piece) => {
                let mut lines = vec![self.piece_line(piece)];
                if let Some(confidence) = result.confidence.filter(|c| c.is_finite()) {
                    lines.push(self.confidence_line(confidence));
                }
                if let Some(part) = &result.part {
                    lines.push(self.inventory_line(part));
                }
                lines
            }
        };

        let image = match result.image() {
            Some(raw) => ImageView::Shown {
                src: self.images.resolve(raw, now_ms),
            },
            None => ImageView::Hidden,
        };

        RenderedView { description, image }
    }

    fn piece_line(&self, piece: &str) -> Line {
        match self.catalog.lookup(piece) {
            Some(entry) => Line {
                kind: LineKind::Piece,
                segments: vec![
                    Segment::strong(self.labels.code),
                    Segment::text(format!(" {} ", entry.code)),
                    Segment::strong(self.labels.description),
                    Segment::text(format!(" {}", entry.name)),
                ],
            },
            None => {
                tracing::warn!("Piece not in catalog: {}", piece);
                Line {
                    kind: LineKind::UnknownPiece,
                    segments: vec![Segment::text(format!(
                        "{}: {}",
                        self.labels.detected_piece, piece
                    ))],
                }
            }
        }
    }

    fn confidence_line(&self, confidence: f64) -> Line {
        Line {
            kind: LineKind::Confidence,
            segments: vec![
                Segment::strong(self.labels.confidence),
                Segment::text(format!(" {}", format_confidence(confidence))),
            ],
        }
    }

    fn inventory_line(&self, part: &PartInfo) -> Line {
        let badge = if part.in_stock {
            Segment::Badge {
                text: self.labels.in_stock.to_string(),
                tone: Tone::Success,
            }
        } else {
            Segment::Badge {
                text: self.labels.out_of_stock.to_string(),
                tone: Tone::Danger,
            }
        };
        Line {
            kind: LineKind::Inventory,
            segments: vec![
                Segment::strong(self.labels.inventory),
                Segment::text(format!(" {} ", part.quantity)),
                badge,
            ],
        }
    }
}

/// `0.873` → `"87.3%"`.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}
