use thiserror::Error;

/// One translatable span plus its positional identity. Translation writes
/// back to the same anchor; units are never reordered because
/// reconstruction depends on positional fidelity.
#[derive(Debug, Clone)]
pub struct DocumentUnit {
    pub anchor: usize,
    pub text: String,
    pub style_ref: Option<String>,
}

/// Non-text layout data interleaved with unit slots. Reconstruction
/// re-serializes literals byte-for-byte and substitutes translated text at
/// each slot.
#[derive(Debug, Clone)]
pub enum SkeletonPart {
    Literal(Vec<u8>),
    Slot(usize),
}

#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub units: Vec<DocumentUnit>,
    pub skeleton: Vec<SkeletonPart>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("corrupt document: {0}")]
    CorruptDocument(String),
}

/// Extraction/reconstruction seam of the document pipeline. Implementations
/// own the container format; the pipeline owns translation, ordering and
/// the abort policy.
pub trait DocumentCodec: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument, CodecError>;

    fn reconstruct(
        &self,
        extracted: &ExtractedDocument,
        translated: &[String],
    ) -> Result<Vec<u8>, CodecError>;
}

/// Shared skeleton re-serialization: literals verbatim, translated text at
/// each slot.
pub fn reassemble(
    skeleton: &[SkeletonPart],
    translated: &[String],
) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    for part in skeleton {
        match part {
            SkeletonPart::Literal(bytes) => out.extend_from_slice(bytes),
            SkeletonPart::Slot(anchor) => {
                let text = translated.get(*anchor).ok_or_else(|| {
                    CodecError::CorruptDocument(format!("no translation for anchor {anchor}"))
                })?;
                out.extend_from_slice(text.as_bytes());
            }
        }
    }
    Ok(out)
}

/// Line-oriented codec for plain UTF-8 text: each non-blank line is one
/// unit, blank lines and line terminators are skeleton literals. Exercises
/// the full pipeline without a binary container.
pub struct SegmentCodec;

impl DocumentCodec for SegmentCodec {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument, CodecError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| CodecError::UnsupportedFormat("not valid UTF-8 text".to_string()))?;

        let mut units = Vec::new();
        let mut skeleton = Vec::new();

        for segment in text.split_inclusive('\n') {
            let (line, terminator) = match segment.strip_suffix("\r\n") {
                Some(line) => (line, "\r\n"),
                None => match segment.strip_suffix('\n') {
                    Some(line) => (line, "\n"),
                    None => (segment, ""),
                },
            };

            if line.trim().is_empty() {
                skeleton.push(SkeletonPart::Literal(segment.as_bytes().to_vec()));
                continue;
            }

            let anchor = units.len();
            units.push(DocumentUnit {
                anchor,
                text: line.to_string(),
                style_ref: None,
            });
            skeleton.push(SkeletonPart::Slot(anchor));
            if !terminator.is_empty() {
                skeleton.push(SkeletonPart::Literal(terminator.as_bytes().to_vec()));
            }
        }

        Ok(ExtractedDocument {
            units,
            skeleton,
            warnings: Vec::new(),
        })
    }

    fn reconstruct(
        &self,
        extracted: &ExtractedDocument,
        translated: &[String],
    ) -> Result<Vec<u8>, CodecError> {
        if translated.len() != extracted.units.len() {
            return Err(CodecError::CorruptDocument(format!(
                "translated {} units, document has {}",
                translated.len(),
                extracted.units.len()
            )));
        }
        reassemble(&extracted.skeleton, translated)
    }
}
