//! Image screening for financial statement extraction

use crate::domain::document::DocumentFile;
use crate::error::ValidationError;

/// Name given to the spreadsheet when the backend does not suggest one
pub const DEFAULT_SPREADSHEET_NAME: &str = "processed-images.xlsx";

/// Whether the file's guessed MIME type is `image/*`
pub fn is_image(file: &DocumentFile) -> bool {
    mime_guess::from_path(&file.name)
        .first()
        .is_some_and(|mime| mime.type_() == mime_guess::mime::IMAGE)
}

/// Images accepted for extraction plus the names of skipped files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSelection {
    pub images: Vec<DocumentFile>,
    pub rejected: Vec<String>,
}

/// Keeps only image files; fails when none remain
pub fn screen_images(candidates: Vec<DocumentFile>) -> Result<ImageSelection, ValidationError> {
    let (images, rejected): (Vec<_>, Vec<_>) = candidates.into_iter().partition(is_image);
    let rejected: Vec<String> = rejected.into_iter().map(|f| f.name).collect();

    if images.is_empty() {
        return Err(ValidationError::NoImageFiles { rejected });
    }

    Ok(ImageSelection { images, rejected })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_images() {
        let candidates = vec![
            DocumentFile::from_path("scan.PNG"),
            DocumentFile::from_path("statement.pdf"),
            DocumentFile::from_path("page2.jpeg"),
        ];
        let selection = screen_images(candidates).unwrap();

        let names: Vec<_> = selection.images.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["scan.PNG", "page2.jpeg"]);
        assert_eq!(selection.rejected, vec!["statement.pdf"]);
    }

    #[test]
    fn test_screen_images_none_left() {
        let err = screen_images(vec![DocumentFile::from_path("notes.txt")]).unwrap_err();
        assert_eq!(err.to_string(), "Please select valid image files.");
        assert_eq!(err.rejected_files(), &["notes.txt".to_string()]);
    }
}
