//! Media type classification.
//!
//! Classification is extension-based only; file contents are never
//! inspected. A misnamed file is therefore misclassified, and an empty
//! file carrying a video extension still classifies as video.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

/// Extension to media type table, built once per process.
static MEDIA_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("3gp", "video/3gpp"),
        ("avi", "video/x-msvideo"),
        ("flv", "video/x-flv"),
        ("m2ts", "video/mp2t"),
        ("m4v", "video/x-m4v"),
        ("mkv", "video/x-matroska"),
        ("mov", "video/quicktime"),
        ("mp4", "video/mp4"),
        ("mpeg", "video/mpeg"),
        ("mpg", "video/mpeg"),
        ("ts", "video/mp2t"),
        ("webm", "video/webm"),
        ("wmv", "video/x-ms-wmv"),
        // Non-video neighbours commonly found next to video files. Keeping
        // them in the table means a known-but-not-video extension and an
        // unknown extension both classify the same way.
        ("aac", "audio/aac"),
        ("flac", "audio/flac"),
        ("gif", "image/gif"),
        ("jpeg", "image/jpeg"),
        ("jpg", "image/jpeg"),
        ("json", "application/json"),
        ("mp3", "audio/mpeg"),
        ("nfo", "text/plain"),
        ("ogg", "audio/ogg"),
        ("png", "image/png"),
        ("srt", "application/x-subrip"),
        ("txt", "text/plain"),
        ("wav", "audio/wav"),
    ])
});

/// Returns the media type inferred from the path's extension, if known.
///
/// The lookup is case-insensitive on the extension.
pub fn media_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    MEDIA_TYPES.get(ext.as_str()).copied()
}

/// Whether the path refers to an existing regular file whose extension maps
/// to a media type in the `video` category.
///
/// Non-existent paths, directories, and symlinks to directories all return
/// false. Symlinks to regular files are followed.
pub fn is_video(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    media_type(path).is_some_and(|t| t.starts_with("video/"))
}
