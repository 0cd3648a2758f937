use axum::extract::multipart::Field;
use bytes::Bytes;
use thiserror::Error;

/// One fully buffered multipart file part. Buffering before any storage
/// write lets validation reject a part without leaving orphaned blobs.
pub struct BufferedUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("file exceeds the {max_mb} MB upload limit")]
    TooLarge { max_mb: u64 },
    #[error("upload stream interrupted: {0}")]
    Stream(String),
}

/// Reads a multipart field into memory, aborting as soon as the size cap
/// is crossed. The remainder of an oversized field is dropped unread; the
/// multipart reader skips it when advancing to the next field.
pub async fn read_field_capped(
    mut field: Field<'_>,
    max_bytes: u64,
) -> Result<BufferedUpload, UploadError> {
    let file_name = field.file_name().unwrap_or("unnamed").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let mut buffer: Vec<u8> = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| UploadError::Stream(e.to_string()))?
    {
        if (buffer.len() + chunk.len()) as u64 > max_bytes {
            return Err(UploadError::TooLarge {
                max_mb: max_bytes / (1024 * 1024),
            });
        }
        buffer.extend_from_slice(&chunk);
    }

    Ok(BufferedUpload {
        file_name,
        content_type,
        bytes: Bytes::from(buffer),
    })
}

/// File extensions accepted by the queue flow.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["docx", "pptx", "xlsx"];

pub fn file_extension(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, ext)| ext)
}

pub fn extension_accepted(name: &str, allow_plain_text: bool) -> bool {
    match file_extension(name).map(|e| e.to_ascii_lowercase()) {
        Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => true,
        Some(ext) if ext == "txt" => allow_plain_text,
        _ => false,
    }
}

/// Restricts a client-supplied file name to a storage-key-safe character
/// set.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Output name for a translated document, e.g. `report.docx` ->
/// `report_translated.docx`.
pub fn translated_name(original: &str) -> String {
    match original.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}_translated.{ext}"),
        None => format!("{original}_translated"),
    }
}
