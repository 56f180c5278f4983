//! Reading resume files into something an extractor can consume.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use resumex_core::models::config::PdfConfig;
use resumex_core::pdf::{PdfExtractor, PdfProcessor, PdfType};
use resumex_core::{CollaboratorError, ExtractionError, LlmInput};

/// File extensions read as plain text.
const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md"];

/// Image extensions and their MIME types.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("webp", "image/webp"),
];

/// Kind of file a resume came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Text,
    TextPdf,
    ScannedPdf,
    Image,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Text => "text",
            SourceKind::TextPdf => "text_pdf",
            SourceKind::ScannedPdf => "scanned_pdf",
            SourceKind::Image => "image",
        }
    }
}

/// Loaded resume content.
pub enum Source {
    /// Text the heuristic parser can read.
    Text { kind: SourceKind, text: String },
    /// Only readable by the vision model.
    Image { kind: SourceKind, input: LlmInput },
}

impl Source {
    pub fn kind(&self) -> SourceKind {
        match self {
            Source::Text { kind, .. } | Source::Image { kind, .. } => *kind,
        }
    }
}

/// Check if a path has an extension we can read.
pub fn is_supported(path: &Path) -> bool {
    let ext = extension(path);
    ext == "pdf"
        || TEXT_EXTENSIONS.contains(&ext.as_str())
        || IMAGE_TYPES.iter().any(|(e, _)| *e == ext)
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Read a resume file.
pub fn load(path: &Path, config: &PdfConfig) -> anyhow::Result<Source> {
    let ext = extension(path);
    info!("Reading {}", path.display());

    if TEXT_EXTENSIONS.contains(&ext.as_str()) {
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| ExtractionError::InvalidInput(format!("not valid UTF-8: {e}")))?;
        return Ok(Source::Text {
            kind: SourceKind::Text,
            text,
        });
    }

    if let Some((_, mime)) = IMAGE_TYPES.iter().find(|(e, _)| *e == ext) {
        let bytes = fs::read(path)?;
        debug!("Loaded {} byte {} image", bytes.len(), mime);
        return Ok(Source::Image {
            kind: SourceKind::Image,
            input: LlmInput::image(*mime, &bytes),
        });
    }

    if ext == "pdf" {
        return load_pdf(path, config);
    }

    anyhow::bail!("Unsupported file format: {}", ext)
}

fn load_pdf(path: &Path, config: &PdfConfig) -> anyhow::Result<Source> {
    let data = fs::read(path)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;

    let content = extractor.extract_all(config.min_text_length)?;
    debug!("PDF has {} pages", content.page_count);

    match content.pdf_type {
        PdfType::Text => Ok(Source::Text {
            kind: SourceKind::TextPdf,
            text: content.text,
        }),
        PdfType::Scanned => {
            let page = first_jpeg(extractor.jpeg_images())?;
            Ok(Source::Image {
                kind: SourceKind::ScannedPdf,
                input: LlmInput::image("image/jpeg", &page),
            })
        }
        PdfType::Empty => anyhow::bail!("PDF appears to be empty"),
    }
}

/// First page image of a scanned PDF, which is what the vision model reads.
fn first_jpeg(images: Vec<Vec<u8>>) -> Result<Vec<u8>, CollaboratorError> {
    images.into_iter().next().ok_or_else(|| {
        CollaboratorError::Unsupported(
            "scanned PDF has no JPEG page image to send to the vision model".to_string(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported(Path::new("cv.PDF")));
        assert!(is_supported(Path::new("cv.txt")));
        assert!(is_supported(Path::new("scan.jpeg")));
        assert!(!is_supported(Path::new("cv.docx")));
        assert!(!is_supported(Path::new("README")));
    }

    #[test]
    fn test_load_text_and_image() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("cv.txt");
        fs::write(&text, "Jane Doe").unwrap();
        let image = dir.path().join("scan.png");
        fs::write(&image, b"png").unwrap();

        let source = load(&text, &PdfConfig::default()).unwrap();
        assert_eq!(source.kind(), SourceKind::Text);

        match load(&image, &PdfConfig::default()).unwrap() {
            Source::Image { input, .. } => assert!(input.is_image()),
            Source::Text { .. } => panic!("expected image source"),
        }
    }

    #[test]
    fn test_load_rejects_binary_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.txt");
        fs::write(&path, [0xc3, 0x28]).unwrap();

        assert!(load(&path, &PdfConfig::default()).is_err());
    }

    #[test]
    fn test_scan_without_jpeg_is_unsupported() {
        assert!(matches!(first_jpeg(Vec::new()), Err(CollaboratorError::Unsupported(_))));
        assert_eq!(first_jpeg(vec![vec![1], vec![2]]).unwrap(), vec![1]);
    }
}
