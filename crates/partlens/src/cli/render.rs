//! The `partlens render` command: show a saved detection response.

use anyhow::Context;
use clap::Args;
use partlens_core::{Config, DetectionResult, HtmlView, RenderedView, Renderer, ViewPorts};
use std::io::Read;
use std::path::PathBuf;

use super::terminal::TerminalView;
use super::types::{LocaleArg, OutputFormat};

/// Arguments for the `render` command.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// JSON response body to render (reads stdin when omitted or `-`)
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Fixed cache-buster timestamp in milliseconds
    #[arg(long)]
    pub now_ms: Option<u64>,

    /// Label language (overrides render.locale)
    #[arg(long, value_enum)]
    pub locale: Option<LocaleArg>,
}

fn read_input(input: Option<&PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}

/// Parse a response body and render it.
pub(crate) fn render_body(
    body: &str,
    config: &Config,
    now_ms: Option<u64>,
) -> anyhow::Result<RenderedView> {
    let result: DetectionResult =
        serde_json::from_str(body).context("Response is not a detection result")?;
    let renderer = Renderer::from_config(config);
    Ok(match now_ms {
        Some(now_ms) => renderer.render_at(&result, now_ms),
        None => renderer.render(&result),
    })
}

/// Execute the render command.
pub async fn execute(args: RenderArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(locale) = args.locale {
        config.render.locale = locale.into();
    }
    let body = read_input(args.input.as_ref())?;
    let view = render_body(&body, &config, args.now_ms)?;

    match args.format {
        OutputFormat::Html => {
            let mut html = HtmlView::new();
            html.show(&view);
            print!("{}", html.to_html());
        }
        OutputFormat::Text | OutputFormat::Json => {
            TerminalView::new(std::io::stdout(), args.format).show(&view);
        }
    }
    Ok(())
}
