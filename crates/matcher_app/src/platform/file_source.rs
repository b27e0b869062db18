//! Reads a local file the way the browser would hand it to the page.

use std::fs;
use std::io;
use std::path::Path;

use matcher_core::FileCandidate;

/// Media type guessed from the extension, like a browser file picker does.
pub fn media_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

pub fn load_candidate(path: &Path) -> io::Result<FileCandidate> {
    let content = fs::read(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(FileCandidate::from_bytes(name, media_type_for(path), content))
}
