//! Display adapters.
//!
//! A [`ViewPorts`] implementation owns the concrete display surface (terminal,
//! HTML fragment, GUI widgets) and applies [`RenderedView`]s to it. The
//! scanner only ever talks to this trait.

pub mod html;

pub use html::HtmlView;

use std::time::Duration;

use crate::render::RenderedView;

/// Transient, dismissible message shown after a failed scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    /// How long the notice stays up before it dismisses itself
    pub ttl: Duration,
}

/// Display surface for scan results.
pub trait ViewPorts {
    /// Show or hide the loading indicator.
    fn set_loading(&mut self, loading: bool);

    /// Replace the result area with `view`.
    fn show(&mut self, view: &RenderedView);

    /// Surface an error notice.
    fn notify(&mut self, notice: &Notice);

    /// "New photo": clear the result area and hide the image.
    fn reset(&mut self);
}
