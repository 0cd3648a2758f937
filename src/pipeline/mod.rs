use std::sync::Arc;
use std::time::Instant;

use futures_util::StreamExt;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::common::upload::{file_extension, translated_name};
use crate::infrastructure::provider::{ProviderError, TranslationProvider, chunk::chunk_text};
use crate::infrastructure::storage::{StorageError, StorageGateway};

pub mod codec;
pub mod ooxml;

use codec::{CodecError, DocumentCodec, DocumentUnit, SegmentCodec};
use ooxml::{OoxmlCodec, OoxmlKind};

/// Per-file result of a completed pipeline run.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub translated_name: String,
    pub storage_ref: String,
    pub elements_translated: usize,
    pub processing_time_seconds: f64,
    pub warnings: Vec<String>,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("translation of unit {anchor} failed: {source}")]
    UnitFailed {
        anchor: usize,
        source: ProviderError,
    },
}

/// Runs one file through extract -> translate -> reconstruct -> store.
/// Units are translated concurrently; write-back goes by anchor, so unit
/// completion order never affects the reconstructed document. Any unit
/// failure aborts the file: a partially translated document is never
/// emitted.
pub struct DocumentPipeline {
    provider: Arc<dyn TranslationProvider>,
    storage: Arc<dyn StorageGateway>,
    max_chunk_chars: usize,
    unit_concurrency: usize,
    plain_text_segments: bool,
}

impl DocumentPipeline {
    pub fn new(provider: Arc<dyn TranslationProvider>, storage: Arc<dyn StorageGateway>) -> Self {
        Self {
            provider,
            storage,
            max_chunk_chars: 3000,
            unit_concurrency: 4,
            plain_text_segments: false,
        }
    }

    pub fn with_plain_text_segments(mut self, enabled: bool) -> Self {
        self.plain_text_segments = enabled;
        self
    }

    pub fn with_unit_concurrency(mut self, concurrency: usize) -> Self {
        self.unit_concurrency = concurrency.max(1);
        self
    }

    pub async fn translate_file(
        &self,
        job_id: Uuid,
        file_index: usize,
        original_name: &str,
        storage_ref: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<FileOutcome, PipelineError> {
        let started = Instant::now();

        let bytes = self.storage.get(storage_ref).await?;
        let codec = self.codec_for(original_name)?;
        let extracted = codec.extract(&bytes)?;

        debug!(
            job_id = %job_id,
            file = original_name,
            units = extracted.units.len(),
            "document extracted"
        );

        let translated = self
            .translate_units(&extracted.units, source_lang, target_lang)
            .await?;

        let output = codec.reconstruct(&extracted, &translated)?;

        let out_name = translated_name(original_name);
        let key = format!("jobs/{job_id}/out/{file_index}_{out_name}");
        let content_type = mime_guess::from_path(&out_name)
            .first_or_octet_stream()
            .to_string();
        let out_ref = self
            .storage
            .put(&key, output.into(), &content_type)
            .await?;

        info!(
            job_id = %job_id,
            file = original_name,
            elements = extracted.units.len(),
            "file translated"
        );

        Ok(FileOutcome {
            translated_name: out_name,
            storage_ref: out_ref,
            elements_translated: extracted.units.len(),
            processing_time_seconds: started.elapsed().as_secs_f64(),
            warnings: extracted.warnings,
        })
    }

    /// Concurrent unit translation with anchor-ordered write-back. Results
    /// land in their anchor slot regardless of completion order.
    async fn translate_units(
        &self,
        units: &[DocumentUnit],
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Vec<String>, PipelineError> {
        let unit_futures: Vec<_> = units
            .iter()
            .map(|unit| async move {
                (
                    unit.anchor,
                    self.translate_unit(unit, source_lang, target_lang).await,
                )
            })
            .collect();
        let results: Vec<(usize, Result<String, ProviderError>)> =
            futures_util::stream::iter(unit_futures)
                .buffer_unordered(self.unit_concurrency)
                .collect()
                .await;

        let mut slots: Vec<Option<String>> = vec![None; units.len()];
        for (anchor, result) in results {
            match result {
                Ok(text) => slots[anchor] = Some(text),
                Err(source) => return Err(PipelineError::UnitFailed { anchor, source }),
            }
        }

        Ok(slots
            .into_iter()
            .enumerate()
            .map(|(anchor, slot)| {
                slot.ok_or_else(|| PipelineError::UnitFailed {
                    anchor,
                    source: ProviderError::transport("unit produced no translation"),
                })
            })
            .collect::<Result<_, _>>()?)
    }

    async fn translate_unit(
        &self,
        unit: &DocumentUnit,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        let chunks = chunk_text(&unit.text, self.max_chunk_chars);
        let mut parts = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            parts.push(
                self.provider
                    .translate(chunk, source_lang, target_lang)
                    .await?,
            );
        }
        Ok(parts.join("\n\n"))
    }

    fn codec_for(&self, file_name: &str) -> Result<Box<dyn DocumentCodec>, CodecError> {
        let ext = file_extension(file_name).unwrap_or_default();
        if let Some(kind) = OoxmlKind::from_extension(ext) {
            return Ok(Box::new(OoxmlCodec::new(kind)));
        }
        if ext.eq_ignore_ascii_case("txt") && self.plain_text_segments {
            return Ok(Box::new(SegmentCodec));
        }
        Err(CodecError::UnsupportedFormat(format!(
            "no codec for .{ext} files"
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use bytes::Bytes;

    use super::*;
    use crate::infrastructure::storage::MemoryStorage;

    /// Uppercases input after a latency keyed off the text, so longer units
    /// finish later and completion order differs from anchor order.
    struct JitterProvider;

    #[async_trait]
    impl TranslationProvider for JitterProvider {
        async fn translate(
            &self,
            text: &str,
            _source_lang: &str,
            _target_lang: &str,
        ) -> Result<String, ProviderError> {
            let delay = (text.len() % 7) as u64 * 5;
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(text.to_uppercase())
        }
    }

    /// Fails on the unit containing the given marker.
    struct FailingProvider {
        marker: &'static str,
    }

    #[async_trait]
    impl TranslationProvider for FailingProvider {
        async fn translate(
            &self,
            text: &str,
            _source_lang: &str,
            _target_lang: &str,
        ) -> Result<String, ProviderError> {
            if text.contains(self.marker) {
                return Err(ProviderError {
                    status_code: 500,
                    message: "upstream exploded".to_string(),
                });
            }
            Ok(text.to_string())
        }
    }

    async fn seed(storage: &MemoryStorage, key: &str, body: &[u8]) {
        storage
            .put(key, Bytes::copy_from_slice(body), "text/plain")
            .await
            .unwrap();
    }

    fn pipeline(provider: impl TranslationProvider + 'static, storage: &MemoryStorage) -> DocumentPipeline {
        DocumentPipeline::new(Arc::new(provider), Arc::new(storage.clone()))
            .with_plain_text_segments(true)
            .with_unit_concurrency(8)
    }

    #[tokio::test]
    async fn anchor_order_survives_concurrent_completion() {
        let storage = MemoryStorage::new();
        seed(&storage, "in", b"aaaaaaaaaa\nbb\ncccccc\nd\neeeeeeee\n").await;

        let p = pipeline(JitterProvider, &storage);
        let job_id = Uuid::new_v4();
        let outcome = p
            .translate_file(job_id, 0, "doc.txt", "in", "en", "es")
            .await
            .unwrap();

        assert_eq!(outcome.elements_translated, 5);
        let out = storage.get(&outcome.storage_ref).await.unwrap();
        assert_eq!(&out[..], b"AAAAAAAAAA\nBB\nCCCCCC\nD\nEEEEEEEE\n");
    }

    #[tokio::test]
    async fn one_failed_unit_aborts_the_file() {
        let storage = MemoryStorage::new();
        seed(&storage, "in", b"fine\npoison here\nfine too\n").await;
        let blobs_before = storage.blob_count().await;

        let p = pipeline(FailingProvider { marker: "poison" }, &storage);
        let err = p
            .translate_file(Uuid::new_v4(), 0, "doc.txt", "in", "en", "es")
            .await
            .unwrap_err();

        match err {
            PipelineError::UnitFailed { anchor, source } => {
                assert_eq!(anchor, 1);
                assert_eq!(source.status_code, 500);
            }
            other => panic!("unexpected error: {other}"),
        }
        // No partially translated output was stored.
        assert_eq!(storage.blob_count().await, blobs_before);
    }

    #[tokio::test]
    async fn round_trip_preserves_element_count() {
        let storage = MemoryStorage::new();
        seed(&storage, "in", b"uno\ndos\n\ntres\n").await;

        let p = pipeline(JitterProvider, &storage);
        let job_id = Uuid::new_v4();
        let forward = p
            .translate_file(job_id, 0, "doc.txt", "in", "es", "en")
            .await
            .unwrap();

        let back = p
            .translate_file(job_id, 1, "doc_translated.txt", &forward.storage_ref, "en", "es")
            .await
            .unwrap();

        assert_eq!(forward.elements_translated, back.elements_translated);
    }

    #[tokio::test]
    async fn ooxml_passthrough_keeps_bytes_and_warns() {
        let storage = MemoryStorage::new();
        let package =
            ooxml::testutil::fake_package(&["[Content_Types].xml", "word/document.xml"]);
        seed(&storage, "in", &package).await;

        let p = pipeline(JitterProvider, &storage);
        let outcome = p
            .translate_file(Uuid::new_v4(), 0, "report.docx", "in", "pt-br", "en")
            .await
            .unwrap();

        assert_eq!(outcome.elements_translated, 0);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.translated_name, "report_translated.docx");
        let out = storage.get(&outcome.storage_ref).await.unwrap();
        assert_eq!(&out[..], &package[..]);
    }

    #[tokio::test]
    async fn unknown_extension_is_unsupported() {
        let storage = MemoryStorage::new();
        seed(&storage, "in", b"whatever").await;

        let p = pipeline(JitterProvider, &storage);
        let err = p
            .translate_file(Uuid::new_v4(), 0, "scan.pdf", "in", "en", "es")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Codec(CodecError::UnsupportedFormat(_))
        ));
    }
}
