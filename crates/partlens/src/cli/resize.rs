//! The `partlens resize` command: downscale to an upload-ready JPEG.

use clap::Args;
use console::style;
use partlens_core::{Config, ImageFile, Preprocessor};
use std::path::{Path, PathBuf};

use super::types::ResizeOverrides;

/// Arguments for the `resize` command.
#[derive(Args, Debug)]
pub struct ResizeArgs {
    /// Photo to downscale
    #[arg(required = true)]
    pub input: PathBuf,

    /// Where to write the JPEG (defaults to `<input>-upload.jpg`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub resize: ResizeOverrides,
}

/// `photos/part.png` -> `photos/part-upload.jpg`
pub(crate) fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());
    input.with_file_name(format!("{stem}-upload.jpg"))
}

/// Execute the resize command.
pub async fn execute(args: ResizeArgs, mut config: Config) -> anyhow::Result<()> {
    if !args.input.is_file() {
        anyhow::bail!(
            "Input file does not exist: {:?}\n\n  Hint: Check the file path and try again.",
            args.input
        );
    }
    args.resize.apply(&mut config)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.input));

    let file = ImageFile::from_path(&args.input)?;
    let input_size = file.bytes.len();
    let blob = Preprocessor::new(config.limits.clone())
        .resize(file, &config.resize)
        .await?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&output, &blob.bytes)?;

    tracing::info!(
        "Resized {:?}: {}x{} -> {}x{}",
        args.input,
        blob.source_width,
        blob.source_height,
        blob.width,
        blob.height
    );
    println!(
        "{} {} ({}x{}, {} KB from {} KB)",
        style("✓").green(),
        output.display(),
        blob.width,
        blob.height,
        blob.bytes.len() / 1024,
        input_size / 1024
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_name() {
        assert_eq!(
            default_output(Path::new("photos/part.png")),
            PathBuf::from("photos/part-upload.jpg")
        );
        assert_eq!(
            default_output(Path::new("part")),
            PathBuf::from("part-upload.jpg")
        );
    }

    #[tokio::test]
    async fn test_resize_writes_bounded_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("wide.png");
        image::RgbImage::new(1600, 400).save(&input).unwrap();
        let output = dir.path().join("out").join("small.jpg");

        execute(
            ResizeArgs {
                input,
                output: Some(output.clone()),
                resize: ResizeOverrides::default(),
            },
            Config::default(),
        )
        .await
        .unwrap();

        let written = image::open(&output).unwrap();
        assert_eq!((written.width(), written.height()), (800, 200));
    }

    #[tokio::test]
    async fn test_resize_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        std::fs::write(&input, "not a picture").unwrap();

        let err = execute(
            ResizeArgs {
                input,
                output: None,
                resize: ResizeOverrides::default(),
            },
            Config::default(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("not an image"));
    }
}
