use std::sync::Arc;

use thiserror::Error;

/// The only media type the upload area accepts.
pub const ACCEPTED_MEDIA_TYPE: &str = "application/pdf";

/// Largest accepted file, inclusive (10 MiB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// A file offered by the page, before validation.
///
/// `size` is the size the page reports; it is validated independently of
/// `content` so a page can reject a large file without reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub size: u64,
    pub media_type: String,
    pub content: Arc<[u8]>,
}

impl FileCandidate {
    pub fn from_bytes(
        name: impl Into<String>,
        media_type: impl Into<String>,
        content: impl Into<Arc<[u8]>>,
    ) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            size: content.len() as u64,
            media_type: media_type.into(),
            content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileRejection {
    #[error("Please upload a PDF file.")]
    TypeRejected { media_type: String },
    #[error("File size must be less than 10MB.")]
    SizeExceeded { size: u64, max: u64 },
}

/// A validated file; only obtainable through [`validate_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    size: u64,
    media_type: String,
    content: Arc<[u8]>,
}

impl SelectedFile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn content(&self) -> &Arc<[u8]> {
        &self.content
    }
}

/// Checks type first, then size.
pub fn validate_file(candidate: FileCandidate) -> Result<SelectedFile, FileRejection> {
    if candidate.media_type != ACCEPTED_MEDIA_TYPE {
        return Err(FileRejection::TypeRejected {
            media_type: candidate.media_type,
        });
    }
    if candidate.size > MAX_FILE_SIZE {
        return Err(FileRejection::SizeExceeded {
            size: candidate.size,
            max: MAX_FILE_SIZE,
        });
    }
    Ok(SelectedFile {
        name: candidate.name,
        size: candidate.size,
        media_type: candidate.media_type,
        content: candidate.content,
    })
}

/// Human-readable size in base-1024 units with at most two decimals,
/// e.g. `1 KB`, `1.43 MB`, `0 Bytes`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut divisor = 1u64;
    while unit < UNITS.len() - 1 && bytes / divisor >= 1024 {
        divisor *= 1024;
        unit += 1;
    }

    // Half-up at the second decimal, then drop trailing zeros.
    let hundredths = (bytes as f64 / divisor as f64 * 100.0).round() as u64;
    let whole = hundredths / 100;
    let frac = hundredths % 100;
    let number = if frac == 0 {
        whole.to_string()
    } else if frac % 10 == 0 {
        format!("{whole}.{}", frac / 10)
    } else {
        format!("{whole}.{frac:02}")
    };
    format!("{number} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_at_unit_boundaries() {
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1152), "1.13 KB");
    }

    #[test]
    fn sizes_beyond_gigabytes_stay_in_gigabytes() {
        assert_eq!(format_file_size(2048 * 1024 * 1024 * 1024), "2048 GB");
    }
}
