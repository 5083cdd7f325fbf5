//! Scan orchestration: preprocess, upload, render, present.
//!
//! Each scan takes a sequence ticket when it starts. A scan that finishes
//! after a newer one has started reports [`ScanOutcome::Superseded`] and is
//! not shown, so a slow response can never overwrite a fresher one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::config::{Config, ResizeConfig};
use crate::error::{PartlensError, Result};
use crate::preprocess::{ImageFile, Preprocessor};
use crate::render::{RenderedView, Renderer};
use crate::upload::{DetectionBackend, HttpBackend};
use crate::view::{Notice, ViewPorts};

/// How a scan ended.
#[derive(Debug)]
pub enum ScanOutcome {
    /// Result ready for display
    Rendered(RenderedView),
    /// Preprocessing or upload failed
    Failed(PartlensError),
    /// A newer scan started before this one finished
    Superseded,
}

/// Clears the loading indicator however the scan future ends.
struct LoadingGuard<'a, V: ViewPorts + ?Sized>(&'a mut V);

impl<'a, V: ViewPorts + ?Sized> LoadingGuard<'a, V> {
    fn start(view: &'a mut V) -> Self {
        view.set_loading(true);
        Self(view)
    }
}

impl<V: ViewPorts + ?Sized> Drop for LoadingGuard<'_, V> {
    fn drop(&mut self) {
        self.0.set_loading(false);
    }
}

/// Runs photos through preprocessing, the detection backend and rendering.
pub struct Scanner {
    preprocessor: Preprocessor,
    resize: ResizeConfig,
    backend: Box<dyn DetectionBackend>,
    renderer: Renderer,
    notice_ttl: Duration,
    latest: AtomicU64,
}

impl Scanner {
    pub fn new(config: &Config, backend: Box<dyn DetectionBackend>) -> Self {
        Self {
            preprocessor: Preprocessor::new(config.limits.clone()),
            resize: config.resize,
            backend,
            renderer: Renderer::from_config(config),
            notice_ttl: Duration::from_millis(config.render.notice_ttl_ms),
            latest: AtomicU64::new(0),
        }
    }

    /// Scanner that posts to the HTTP backend named in `config.upload`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config, Box::new(HttpBackend::new(&config.upload)))
    }

    /// Preprocess, upload and render one file, without sequencing.
    pub async fn run(&self, file: ImageFile) -> Result<RenderedView> {
        let start = Instant::now();

        let blob = self.preprocessor.resize(file, &self.resize).await?;
        tracing::debug!(
            "Preprocessed {}x{} -> {}x{} ({} bytes)",
            blob.source_width,
            blob.source_height,
            blob.width,
            blob.height,
            blob.bytes.len()
        );

        let result = self.backend.detect(&blob).await?;
        match result.piece() {
            Some(piece) => tracing::info!(
                "Detected {} ({}) via {} in {:?}",
                piece,
                result
                    .confidence
                    .map(crate::render::format_confidence)
                    .unwrap_or_else(|| "no confidence".to_string()),
                self.backend.name(),
                start.elapsed()
            ),
            None => tracing::info!("No piece detected ({:?})", start.elapsed()),
        }

        Ok(self.renderer.render(&result))
    }

    /// Run a scan under a fresh sequence ticket.
    pub async fn scan(&self, file: ImageFile) -> ScanOutcome {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.run(file).await;

        let current = self.latest.load(Ordering::SeqCst);
        if current != ticket {
            tracing::debug!("Dropping result of scan #{} (latest is #{})", ticket, current);
            return ScanOutcome::Superseded;
        }

        match result {
            Ok(view) => ScanOutcome::Rendered(view),
            Err(e) => {
                tracing::warn!("Scan #{} failed: {}", ticket, e);
                ScanOutcome::Failed(e)
            }
        }
    }

    /// Scan `file` and apply the outcome to `view`.
    ///
    /// The loading indicator is set for the duration and cleared on every
    /// exit path, including cancellation of the returned future.
    pub async fn scan_into<V: ViewPorts + ?Sized>(
        &self,
        file: ImageFile,
        view: &mut V,
    ) -> ScanOutcome {
        let outcome = {
            let _loading = LoadingGuard::start(&mut *view);
            self.scan(file).await
        };

        match &outcome {
            ScanOutcome::Rendered(rendered) => view.show(rendered),
            ScanOutcome::Failed(e) => view.notify(&self.notice_for(e)),
            ScanOutcome::Superseded => {}
        }
        outcome
    }

    /// User-facing notice for a failed scan.
    pub fn notice_for(&self, error: &PartlensError) -> Notice {
        let labels = self.renderer.labels();
        let message = match error {
            PartlensError::Preprocess(_) => labels.preprocess_failed.to_string(),
            other => format!("{}: {}", labels.upload_failed, other),
        };
        Notice {
            message,
            ttl: self.notice_ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UploadError;
    use crate::preprocess::EncodedBlob;
    use crate::types::DetectionResult;
    use crate::view::HtmlView;
    use async_trait::async_trait;
    use image::{DynamicImage, ImageFormat};
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::Arc;
    use tokio::sync::Notify;

    type Scripted = (Option<Arc<Notify>>, std::result::Result<DetectionResult, u16>);

    /// Backend that answers by source image width, optionally holding the
    /// response until its gate is notified.
    struct ScriptedBackend {
        script: HashMap<u32, Scripted>,
    }

    #[async_trait]
    impl DetectionBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn detect(
            &self,
            blob: &EncodedBlob,
        ) -> std::result::Result<DetectionResult, UploadError> {
            let (gate, response) = self
                .script
                .get(&blob.source_width)
                .cloned()
                .expect("no scripted response for this photo");
            if let Some(gate) = gate {
                gate.notified().await;
            }
            response.map_err(|status| UploadError::Server {
                status,
                message: None,
            })
        }
    }

    fn photo(width: u32) -> ImageFile {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::new_rgb8(width, 48)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        ImageFile::new(buffer.into_inner(), "image/png")
    }

    fn piece(name: &str) -> DetectionResult {
        DetectionResult {
            detected_piece: Some(name.to_string()),
            result_image: Some("static/results/out.jpg".to_string()),
            ..Default::default()
        }
    }

    fn scanner(script: Vec<(u32, Scripted)>) -> Scanner {
        let backend = ScriptedBackend {
            script: script.into_iter().collect(),
        };
        Scanner::new(&Config::default(), Box::new(backend))
    }

    #[tokio::test]
    async fn test_scan_renders_detection() {
        let scanner = scanner(vec![(64, (None, Ok(piece("junta_cria"))))]);
        match scanner.scan(photo(64)).await {
            ScanOutcome::Rendered(view) => {
                assert!(view.description_text().contains("02RV-0512"));
                assert!(view
                    .image_src()
                    .unwrap()
                    .starts_with("/static/results/out.jpg?cb="));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_scan_into_shows_result_and_clears_loading() {
        let scanner = scanner(vec![(64, (None, Ok(piece("Unknown Thing"))))]);
        let mut view = HtmlView::new();
        let outcome = scanner.scan_into(photo(64), &mut view).await;

        assert!(matches!(outcome, ScanOutcome::Rendered(_)));
        assert!(!view.is_loading());
        assert_eq!(
            view.description(),
            ammonia::clean_text("Detected piece: Unknown Thing")
        );
    }

    #[tokio::test]
    async fn test_server_failure_becomes_notice() {
        let scanner = scanner(vec![(64, (None, Err(500)))]);
        let mut view = HtmlView::new();
        let outcome = scanner.scan_into(photo(64), &mut view).await;

        assert!(matches!(
            outcome,
            ScanOutcome::Failed(PartlensError::Upload(UploadError::Server {
                status: 500,
                ..
            }))
        ));
        assert!(!view.is_loading());
        assert_eq!(view.alerts().len(), 1);
        assert!(view.alerts()[0].contains("Error processing image: Upload error: Server error: 500"));
        assert!(view.description().is_empty());
    }

    #[tokio::test]
    async fn test_non_image_never_reaches_backend() {
        // Empty script: any backend call would panic
        let scanner = scanner(vec![]);
        let mut view = HtmlView::new();
        let outcome = scanner
            .scan_into(ImageFile::new(b"hello".to_vec(), "text/plain"), &mut view)
            .await;

        assert!(matches!(
            outcome,
            ScanOutcome::Failed(PartlensError::Preprocess(_))
        ));
        assert!(view.alerts()[0].contains("Error processing the image before upload."));
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn test_slow_earlier_scan_is_superseded() {
        let gate = Arc::new(Notify::new());
        let scanner = scanner(vec![
            (64, (Some(gate.clone()), Ok(piece("junta_cria")))),
            (96, (None, Ok(piece("roda_bipartida")))),
        ]);

        // join! polls the first scan first, so it holds the older ticket
        let first = scanner.scan(photo(64));
        let second = async {
            let outcome = scanner.scan(photo(96)).await;
            gate.notify_one();
            outcome
        };
        let (first, second) = tokio::join!(first, second);

        assert!(matches!(first, ScanOutcome::Superseded));
        match second {
            ScanOutcome::Rendered(view) => assert!(view.description_text().contains("02RV-0042")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancelled_scan_clears_loading() {
        // Gate is never opened
        let gate = Arc::new(Notify::new());
        let scanner = scanner(vec![(64, (Some(gate), Ok(piece("junta_cria"))))]);
        let mut view = HtmlView::new();
        let result = tokio::time::timeout(
            Duration::from_millis(200),
            scanner.scan_into(photo(64), &mut view),
        )
        .await;

        assert!(result.is_err());
        assert!(!view.is_loading());
    }
}
