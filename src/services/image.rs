use crate::models::image::ImageFile;

/// MIME types accepted for product images.
pub const ALLOWED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/jpg"];

/// Largest accepted image: 2 MiB.
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Check a selected image against the upload constraints.
///
/// Type is checked before size, so an oversized file of the wrong type
/// reports the type error.
pub fn check_image(file: &ImageFile) -> Result<(), ImageError> {
    let mime = file.mime_type.to_ascii_lowercase();
    if !ALLOWED_MIME_TYPES.contains(&mime.as_str()) {
        return Err(ImageError::UnsupportedType { mime });
    }

    if file.size() > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge { size: file.size() });
    }

    Ok(())
}

/// Image-constraint violations. Display strings are the field messages
/// shown under the image input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[error("Only JPG, JPEG, and PNG files are allowed.")]
    UnsupportedType { mime: String },

    #[error("File size exceeds 2 MB.")]
    TooLarge { size: usize },

    #[error("Image is required")]
    Missing,
}

impl ImageError {
    /// Short label used in metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            ImageError::UnsupportedType { .. } => "unsupported_type",
            ImageError::TooLarge { .. } => "too_large",
            ImageError::Missing => "missing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(mime: &str, size: usize) -> ImageFile {
        ImageFile::new("upload", mime, vec![0u8; size])
    }

    #[test]
    fn test_accepts_allowed_types() {
        for mime in ALLOWED_MIME_TYPES {
            assert!(check_image(&file(mime, 1024)).is_ok(), "{} should pass", mime);
        }
        assert!(check_image(&file("IMAGE/PNG", 10)).is_ok());
    }

    #[test]
    fn test_rejects_other_types() {
        for mime in ["image/gif", "image/webp", "application/pdf", ""] {
            let err = check_image(&file(mime, 10)).unwrap_err();
            assert!(matches!(err, ImageError::UnsupportedType { .. }));
            assert_eq!(err.to_string(), "Only JPG, JPEG, and PNG files are allowed.");
        }
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(check_image(&file("image/jpeg", MAX_IMAGE_BYTES)).is_ok());
        let err = check_image(&file("image/jpeg", MAX_IMAGE_BYTES + 1)).unwrap_err();
        assert_eq!(err, ImageError::TooLarge { size: MAX_IMAGE_BYTES + 1 });
        assert_eq!(err.to_string(), "File size exceeds 2 MB.");
    }

    #[test]
    fn test_type_checked_before_size() {
        let err = check_image(&file("image/gif", MAX_IMAGE_BYTES * 2)).unwrap_err();
        assert_eq!(err.reason(), "unsupported_type");
    }
}
