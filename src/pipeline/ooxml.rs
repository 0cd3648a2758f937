use super::codec::{CodecError, DocumentCodec, ExtractedDocument, SkeletonPart, reassemble};

const LOCAL_FILE_SIG: [u8; 4] = [0x50, 0x4b, 0x03, 0x04];
const CENTRAL_DIR_SIG: [u8; 4] = [0x50, 0x4b, 0x01, 0x02];
const EOCD_SIG: [u8; 4] = [0x50, 0x4b, 0x05, 0x06];

// EOCD is 22 bytes plus an up-to-64KB trailing comment.
const EOCD_SEARCH_WINDOW: usize = 22 + 65_535;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OoxmlKind {
    Docx,
    Pptx,
    Xlsx,
}

impl OoxmlKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "docx" => Some(OoxmlKind::Docx),
            "pptx" => Some(OoxmlKind::Pptx),
            "xlsx" => Some(OoxmlKind::Xlsx),
            _ => None,
        }
    }

    /// The internal part whose absence marks a structurally broken package
    /// of this kind.
    fn required_part(&self) -> &'static str {
        match self {
            OoxmlKind::Docx => "word/document.xml",
            OoxmlKind::Pptx => "ppt/presentation.xml",
            OoxmlKind::Xlsx => "xl/workbook.xml",
        }
    }
}

/// Container-level codec for zip-based OOXML packages. Validates the zip
/// structure and the required internal parts, then passes the document
/// through unchanged: text extraction for OOXML is delegated to an external
/// collaborator and is not wired up here.
pub struct OoxmlCodec {
    kind: OoxmlKind,
}

impl OoxmlCodec {
    pub fn new(kind: OoxmlKind) -> Self {
        Self { kind }
    }
}

impl DocumentCodec for OoxmlCodec {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument, CodecError> {
        let entries = entry_names(bytes)?;

        for required in ["[Content_Types].xml", self.kind.required_part()] {
            if !entries.iter().any(|name| name == required) {
                return Err(CodecError::CorruptDocument(format!(
                    "package is missing required part {required}"
                )));
            }
        }

        Ok(ExtractedDocument {
            units: Vec::new(),
            skeleton: vec![SkeletonPart::Literal(bytes.to_vec())],
            warnings: vec![
                "OOXML text extraction is not available; output is a copy of the original"
                    .to_string(),
            ],
        })
    }

    fn reconstruct(
        &self,
        extracted: &ExtractedDocument,
        translated: &[String],
    ) -> Result<Vec<u8>, CodecError> {
        reassemble(&extracted.skeleton, translated)
    }
}

/// Reads the entry names out of the zip central directory without
/// decompressing anything. Name records are stored uncompressed, which is
/// all the container check needs.
fn entry_names(bytes: &[u8]) -> Result<Vec<String>, CodecError> {
    if bytes.len() < 4 || bytes[..4] != LOCAL_FILE_SIG {
        return Err(CodecError::UnsupportedFormat(
            "not a zip-based OOXML package".to_string(),
        ));
    }

    let window_start = bytes.len().saturating_sub(EOCD_SEARCH_WINDOW);
    let eocd = (window_start..bytes.len().saturating_sub(3))
        .rev()
        .find(|&i| bytes[i..i + 4] == EOCD_SIG)
        .ok_or_else(|| {
            CodecError::CorruptDocument("missing end-of-central-directory record".to_string())
        })?;

    let entry_count = read_u16(bytes, eocd + 10)? as usize;
    let cd_offset = read_u32(bytes, eocd + 16)? as usize;

    let mut names = Vec::with_capacity(entry_count);
    let mut pos = cd_offset;

    for _ in 0..entry_count {
        if pos + 46 > bytes.len() || bytes[pos..pos + 4] != CENTRAL_DIR_SIG {
            return Err(CodecError::CorruptDocument(
                "truncated central directory".to_string(),
            ));
        }
        let name_len = read_u16(bytes, pos + 28)? as usize;
        let extra_len = read_u16(bytes, pos + 30)? as usize;
        let comment_len = read_u16(bytes, pos + 32)? as usize;

        let name_start = pos + 46;
        let name_end = name_start + name_len;
        if name_end > bytes.len() {
            return Err(CodecError::CorruptDocument(
                "truncated central directory entry name".to_string(),
            ));
        }
        names.push(String::from_utf8_lossy(&bytes[name_start..name_end]).into_owned());

        pos = name_end + extra_len + comment_len;
    }

    Ok(names)
}

fn read_u16(bytes: &[u8], at: usize) -> Result<u16, CodecError> {
    bytes
        .get(at..at + 2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .ok_or_else(|| CodecError::CorruptDocument("truncated zip record".to_string()))
}

fn read_u32(bytes: &[u8], at: usize) -> Result<u32, CodecError> {
    bytes
        .get(at..at + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or_else(|| CodecError::CorruptDocument("truncated zip record".to_string()))
}

#[cfg(test)]
pub mod testutil {
    /// Builds a minimal but structurally valid zip archive holding the
    /// given entries with empty, stored (uncompressed) contents.
    pub fn fake_package(entry_names: &[&str]) -> Vec<u8> {
        let mut out = Vec::new();
        let mut central = Vec::new();

        for name in entry_names {
            let local_offset = out.len() as u32;
            // Local file header, empty stored entry.
            out.extend_from_slice(&[0x50, 0x4b, 0x03, 0x04]);
            out.extend_from_slice(&20u16.to_le_bytes()); // version needed
            out.extend_from_slice(&0u16.to_le_bytes()); // flags
            out.extend_from_slice(&0u16.to_le_bytes()); // method: stored
            out.extend_from_slice(&[0u8; 8]); // mod time/date, crc32
            out.extend_from_slice(&0u32.to_le_bytes()); // compressed size
            out.extend_from_slice(&0u32.to_le_bytes()); // uncompressed size
            out.extend_from_slice(&(name.len() as u16).to_le_bytes());
            out.extend_from_slice(&0u16.to_le_bytes()); // extra len
            out.extend_from_slice(name.as_bytes());

            // Matching central directory record.
            central.extend_from_slice(&[0x50, 0x4b, 0x01, 0x02]);
            central.extend_from_slice(&20u16.to_le_bytes()); // version made by
            central.extend_from_slice(&20u16.to_le_bytes()); // version needed
            central.extend_from_slice(&0u16.to_le_bytes()); // flags
            central.extend_from_slice(&0u16.to_le_bytes()); // method
            central.extend_from_slice(&[0u8; 8]); // mod time/date, crc32
            central.extend_from_slice(&0u32.to_le_bytes()); // compressed size
            central.extend_from_slice(&0u32.to_le_bytes()); // uncompressed size
            central.extend_from_slice(&(name.len() as u16).to_le_bytes());
            central.extend_from_slice(&0u16.to_le_bytes()); // extra len
            central.extend_from_slice(&0u16.to_le_bytes()); // comment len
            central.extend_from_slice(&0u16.to_le_bytes()); // disk number
            central.extend_from_slice(&0u16.to_le_bytes()); // internal attrs
            central.extend_from_slice(&0u32.to_le_bytes()); // external attrs
            central.extend_from_slice(&local_offset.to_le_bytes());
            central.extend_from_slice(name.as_bytes());
        }

        let cd_offset = out.len() as u32;
        let cd_size = central.len() as u32;
        out.extend_from_slice(&central);

        // End of central directory.
        out.extend_from_slice(&[0x50, 0x4b, 0x05, 0x06]);
        out.extend_from_slice(&0u16.to_le_bytes()); // disk number
        out.extend_from_slice(&0u16.to_le_bytes()); // cd start disk
        out.extend_from_slice(&(entry_names.len() as u16).to_le_bytes());
        out.extend_from_slice(&(entry_names.len() as u16).to_le_bytes());
        out.extend_from_slice(&cd_size.to_le_bytes());
        out.extend_from_slice(&cd_offset.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes()); // comment len

        out
    }
}
