//! CLI enum types and shared argument groups.

use clap::{Args, ValueEnum};
use partlens_core::{Config, Locale};

/// How a rendered result is printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Styled text for the terminal
    #[default]
    Text,
    /// HTML result card
    Html,
    /// View model as JSON
    Json,
}

/// Label language.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LocaleArg {
    /// English
    En,
    /// Brazilian Portuguese
    PtBr,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::En => Locale::En,
            LocaleArg::PtBr => Locale::PtBr,
        }
    }
}

/// Downscale overrides shared by `scan` and `resize`.
#[derive(Args, Debug, Default, Clone)]
pub struct ResizeOverrides {
    /// Maximum output width in pixels
    #[arg(long)]
    pub max_width: Option<u32>,

    /// Maximum output height in pixels
    #[arg(long)]
    pub max_height: Option<u32>,

    /// JPEG quality in (0, 1]
    #[arg(long)]
    pub quality: Option<f32>,
}

impl ResizeOverrides {
    /// Apply the overrides onto `config`, rejecting zero dimensions.
    pub fn apply(&self, config: &mut Config) -> anyhow::Result<()> {
        if let Some(w) = self.max_width {
            anyhow::ensure!(w > 0, "--max-width must be > 0");
            config.resize.max_width = w;
        }
        if let Some(h) = self.max_height {
            anyhow::ensure!(h > 0, "--max-height must be > 0");
            config.resize.max_height = h;
        }
        if let Some(q) = self.quality {
            config.resize.quality = q;
            let clamped = config.resize.clamped_quality();
            if clamped != q {
                tracing::warn!("JPEG quality {q} is outside (0, 1]; using {clamped}");
                config.resize.quality = clamped;
            }
        }
        Ok(())
    }
}
