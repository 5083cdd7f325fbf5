//! The `partlens scan` command: preprocess, upload, render.

use clap::Args;
use partlens_core::{Config, HtmlView, ImageFile, ScanOutcome, Scanner};
use std::path::PathBuf;

use super::terminal::TerminalView;
use super::types::{LocaleArg, OutputFormat, ResizeOverrides};

/// Arguments for the `scan` command.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Photo of the part
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Detection service base URL (overrides upload.base_url)
    #[arg(long, env = "PARTLENS_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Label language (overrides render.locale)
    #[arg(long, value_enum)]
    pub locale: Option<LocaleArg>,

    #[command(flatten)]
    pub resize: ResizeOverrides,
}

/// Apply command-line overrides onto the loaded config.
pub(crate) fn apply_overrides(args: &ScanArgs, config: &mut Config) -> anyhow::Result<()> {
    if let Some(endpoint) = &args.endpoint {
        anyhow::ensure!(
            endpoint.starts_with("http://") || endpoint.starts_with("https://"),
            "--endpoint must start with http:// or https://"
        );
        config.upload.base_url = endpoint.clone();
    }
    if let Some(locale) = args.locale {
        config.render.locale = locale.into();
    }
    args.resize.apply(config)
}

/// Execute the scan command.
pub async fn execute(args: ScanArgs, mut config: Config) -> anyhow::Result<()> {
    if !args.input.is_file() {
        anyhow::bail!(
            "Input file does not exist: {:?}\n\n  Hint: Check the file path and try again.",
            args.input
        );
    }
    apply_overrides(&args, &mut config)?;

    let file = ImageFile::from_path(&args.input)?;
    let scanner = Scanner::from_config(&config);
    tracing::debug!("Scanning {:?} via {}", args.input, config.upload.endpoint());

    let outcome = match args.format {
        OutputFormat::Html => {
            let mut view = HtmlView::new();
            let outcome = scanner.scan_into(file, &mut view).await;
            print!("{}", view.to_html());
            outcome
        }
        OutputFormat::Text | OutputFormat::Json => {
            let mut view = TerminalView::new(std::io::stdout(), args.format);
            scanner.scan_into(file, &mut view).await
        }
    };

    match outcome {
        ScanOutcome::Failed(e) => Err(anyhow::Error::new(e).context("scan failed")),
        ScanOutcome::Rendered(_) | ScanOutcome::Superseded => Ok(()),
    }
}
