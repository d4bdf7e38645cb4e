//! Upload filename policy.
//!
//! Client-supplied filenames are only used to pick an extension, which must
//! be on the allow-list for the field being uploaded. The stored name is
//! generated, so a client cannot choose where a file lands or overwrite an
//! existing one.

use crate::error::CoreError;

/// Maximum files accepted with one badge application.
pub const MAX_BADGE_APPLICATION_FILES: usize = 5;

/// Maximum images attached to one advocacy post.
pub const MAX_ADVOCACY_IMAGES: usize = 5;

/// What an uploaded file is expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Pdf,
    Document,
}

impl UploadKind {
    /// Lowercase extensions accepted for this kind.
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            UploadKind::Image => &["png", "jpg", "jpeg", "webp", "gif"],
            UploadKind::Pdf => &["pdf"],
            UploadKind::Document => &["pdf", "png", "jpg", "jpeg", "doc", "docx"],
        }
    }
}

/// Lowercase extension of the final path component, if any.
pub fn extension_of(filename: &str) -> Option<String> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Check `filename` against the allow-list for `kind`, returning the
/// normalized extension.
pub fn validate_upload_extension(kind: UploadKind, filename: &str) -> Result<String, CoreError> {
    let allowed = kind.allowed_extensions();
    match extension_of(filename) {
        Some(ext) if allowed.contains(&ext.as_str()) => Ok(ext),
        Some(ext) => Err(CoreError::Validation(format!(
            "Unsupported file type '.{ext}' for '{filename}'. Allowed: {}",
            allowed.join(", ")
        ))),
        None => Err(CoreError::Validation(format!(
            "File '{filename}' has no extension. Allowed: {}",
            allowed.join(", ")
        ))),
    }
}

/// Generated on-disk name: `<unix-millis>-<token>.<ext>`.
pub fn stored_file_name(unix_millis: i64, token: &str, ext: &str) -> String {
    format!("{unix_millis}-{token}.{ext}")
}

/// True when `name` is a bare filename that cannot escape its directory.
pub fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && !name.contains("..")
        && !name.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension_of("Cover.PNG").as_deref(), Some("png"));
    }

    #[test]
    fn extension_ignores_directories() {
        assert_eq!(extension_of("../../etc.d/passwd"), None);
        assert_eq!(extension_of("dir.v2/report.pdf").as_deref(), Some("pdf"));
    }

    #[test]
    fn dotfiles_have_no_extension() {
        assert_eq!(extension_of(".bashrc"), None);
        assert_eq!(extension_of("noext"), None);
    }

    #[test]
    fn pdf_kind_rejects_images() {
        assert_matches!(
            validate_upload_extension(UploadKind::Pdf, "cover.png"),
            Err(CoreError::Validation(msg)) if msg.contains(".png")
        );
        assert_eq!(validate_upload_extension(UploadKind::Pdf, "book.PDF").unwrap(), "pdf");
    }

    #[test]
    fn documents_accept_office_files() {
        assert!(validate_upload_extension(UploadKind::Document, "plan.docx").is_ok());
        assert!(validate_upload_extension(UploadKind::Document, "run.exe").is_err());
    }

    #[test]
    fn stored_name_is_generated() {
        assert_eq!(stored_file_name(1700, "abc", "pdf"), "1700-abc.pdf");
    }

    #[test]
    fn traversal_names_are_unsafe() {
        assert!(is_safe_file_name("1700-abc.pdf"));
        assert!(!is_safe_file_name("../secret.pdf"));
        assert!(!is_safe_file_name("a/b.pdf"));
        assert!(!is_safe_file_name("a\\b.pdf"));
        assert!(!is_safe_file_name(""));
    }
}
