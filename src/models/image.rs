use std::path::Path;

use reqwest::Url;

/// Fallback MIME type when the content is not a recognised image.
const UNKNOWN_MIME: &str = "application/octet-stream";

/// An image picked by the user, held in memory until submission.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// File with a MIME type declared by the host (e.g. a browser file input).
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// File whose MIME type is sniffed from its content with the `image` crate.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mime_type = image::guess_format(&bytes)
            .map(|format| format.to_mime_type())
            .unwrap_or(UNKNOWN_MIME);
        Self::new(file_name, mime_type, bytes)
    }

    /// Read a file from disk and sniff its type.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        Ok(Self::from_bytes(file_name, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// What the edit screen shows next to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePreview {
    /// The stored image on the backend
    Remote(Url),
    /// A newly selected, not yet uploaded file
    Local { file_name: String },
}
