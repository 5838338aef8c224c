//! CV document file names.

/// File extension for a known document MIME type.
fn known_extension(mime_type: &str) -> Option<&'static str> {
    let ext = match mime_type {
        "application/pdf" | "application/x-pdf" => "pdf",
        "application/msword" => "doc",
        "application/vnd.openxmlformats-officedocument"
        | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.template" => "dotx",
        "application/vnd.ms-word.document.macroEnabled.12" => "docm",
        "application/vnd.ms-word.template.macroEnabled.12" => "dotm",
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        _ => return None,
    };
    Some(ext)
}

/// Pick the file name a CV document is uploaded under.
///
/// Without a MIME type the given name (or `cv.pdf`) is used as is. Otherwise
/// the extension comes from the MIME type: known document types map to their
/// usual extension, other images use their subtype and anything else falls
/// back to `pdf`. The extension is only added when `filename` has none.
///
/// ```
/// use scraper_bridge_core::format_cv_filename;
///
/// assert_eq!(format_cv_filename(None, Some("image/png")), "cv.png");
/// assert_eq!(format_cv_filename(Some("resume"), Some("application/msword")), "resume.doc");
/// assert_eq!(format_cv_filename(Some("resume.txt"), Some("image/png")), "resume.txt");
/// ```
#[must_use]
pub fn format_cv_filename(filename: Option<&str>, mime_type: Option<&str>) -> String {
    let filename = filename.filter(|name| !name.is_empty());

    let Some(mime_type) = mime_type.filter(|mime| !mime.is_empty()) else {
        return filename.unwrap_or("cv.pdf").to_string();
    };

    let ext = known_extension(mime_type).map_or_else(
        || match mime_type.strip_prefix("image/") {
            Some(subtype) => subtype.split(' ').next().unwrap_or_default().to_string(),
            None => "pdf".to_string(),
        },
        str::to_string,
    );

    match filename {
        None => format!("cv.{ext}"),
        Some(name) if !name.contains('.') => format!("{name}.{ext}"),
        Some(name) => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_pdf_without_mime_type() {
        assert_eq!(format_cv_filename(None, None), "cv.pdf");
        assert_eq!(format_cv_filename(Some(""), Some("")), "cv.pdf");
        assert_eq!(format_cv_filename(Some("scan"), None), "scan");
    }

    #[test]
    fn known_types_map_to_their_extension() {
        assert_eq!(format_cv_filename(None, Some("application/x-pdf")), "cv.pdf");
        assert_eq!(
            format_cv_filename(
                None,
                Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
            ),
            "cv.docx"
        );
        assert_eq!(format_cv_filename(None, Some("image/jpeg")), "cv.jpg");
    }

    #[test]
    fn unknown_images_use_their_subtype() {
        assert_eq!(format_cv_filename(None, Some("image/webp")), "cv.webp");
        assert_eq!(format_cv_filename(None, Some("image/tiff extra")), "cv.tiff");
    }

    #[test]
    fn unknown_types_fall_back_to_pdf() {
        assert_eq!(format_cv_filename(Some("resume"), Some("text/plain")), "resume.pdf");
    }

    #[test]
    fn existing_extension_is_kept() {
        assert_eq!(
            format_cv_filename(Some("resume.final.pdf"), Some("image/png")),
            "resume.final.pdf"
        );
    }
}
