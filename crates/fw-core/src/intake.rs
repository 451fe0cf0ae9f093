//! # Upload intake
//!
//! Extension allow-listing and filename sanitizing. Nothing here looks at the
//! file contents; a decodable image is only required later, by the classifier.

use crate::error::{AppError, Result};
use crate::models::UploadedImage;

/// Lowercase extensions accepted for upload.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// True iff `filename` has a `.` and the text after the last one, lowercased,
/// is an allowed extension.
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

/// Reduces a client-supplied filename to something safe to join onto a directory.
///
/// Non-ASCII characters are dropped, path separators and whitespace collapse
/// into single underscores, anything outside `[A-Za-z0-9_.-]` is removed and
/// leading/trailing dots and underscores are trimmed. May return an empty string.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Validates and sanitizes an upload before anything is written to disk.
pub fn accept_upload(filename: &str, data: Vec<u8>) -> Result<UploadedImage> {
    if filename.is_empty() {
        return Err(AppError::InvalidFile("empty filename".into()));
    }
    if !allowed_file(filename) {
        return Err(AppError::InvalidFile(format!("extension not allowed: {filename}")));
    }

    let safe = secure_filename(filename);
    // Sanitizing can eat the stem or the dot ("../.png" becomes "png").
    if !allowed_file(&safe) {
        return Err(AppError::InvalidFile(format!("unusable filename: {filename}")));
    }

    Ok(UploadedImage { filename: safe, data })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_extensions_in_any_case() {
        for name in ["scan.png", "scan.jpg", "scan.jpeg", "SCAN.PNG", "a.b.JpEg"] {
            assert!(allowed_file(name), "{name} should be accepted");
        }
    }

    #[test]
    fn rejects_everything_else() {
        for name in ["", "png", "scan", "scan.", "scan.txt", "scan.png.exe", "scan.gif", "scan. png"] {
            assert!(!allowed_file(name), "{name} should be rejected");
        }
    }

    #[test]
    fn only_the_last_extension_counts() {
        assert!(allowed_file("notes.txt.png"));
        assert!(!allowed_file("scan.png.txt"));
    }

    #[test]
    fn secure_filename_strips_paths_and_unsafe_characters() {
        assert_eq!(secure_filename("My cool movie.mov"), "My_cool_movie.mov");
        assert_eq!(secure_filename("../../../etc/passwd"), "etc_passwd");
        assert_eq!(secure_filename("i contain cool \u{fc}ml\u{e4}uts.txt"), "i_contain_cool_mluts.txt");
        assert_eq!(secure_filename("..\\scan (1).png"), "scan_1.png");
    }

    #[test]
    fn accept_upload_sanitizes_the_name() {
        let upload = accept_upload("../uploads/My Scan.PNG", vec![1, 2, 3]).unwrap();
        assert_eq!(upload.filename, "uploads_My_Scan.PNG");
        assert_eq!(upload.data, vec![1, 2, 3]);
    }

    #[test]
    fn accept_upload_rejects_names_that_sanitize_away() {
        assert!(matches!(accept_upload("../.png", vec![]), Err(AppError::InvalidFile(_))));
        assert!(matches!(accept_upload("", vec![]), Err(AppError::InvalidFile(_))));
        assert!(matches!(accept_upload("notes.txt", vec![]), Err(AppError::InvalidFile(_))));
    }
}
