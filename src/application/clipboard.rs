use iced::Task;

use crate::domain::AppError;

const DENIED: &str = "clipboard read refused or holds no text";
const EMPTY: &str = "clipboard text is empty";

/// Reads clipboard text once. No retry on denial.
pub fn read_clipboard_text() -> Task<Result<String, AppError>> {
    iced::clipboard::read().map(interpret_clipboard)
}

/// The platform reports a refused or non-text clipboard as `None`. Blank text is
/// reported through the same outcome with its own detail.
pub fn interpret_clipboard(contents: Option<String>) -> Result<String, AppError> {
    match contents {
        Some(text) if text.trim().is_empty() => Err(AppError::PermissionDenied(EMPTY.to_string())),
        Some(text) => Ok(text),
        None => Err(AppError::PermissionDenied(DENIED.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_passes_through() {
        assert_eq!(
            interpret_clipboard(Some("https://youtu.be/x".to_string())).unwrap(),
            "https://youtu.be/x"
        );
    }

    #[test]
    fn test_missing_text_is_permission_denied() {
        assert!(matches!(
            interpret_clipboard(None),
            Err(AppError::PermissionDenied(detail)) if detail == DENIED
        ));
    }

    #[test]
    fn test_blank_text_has_its_own_detail() {
        for blank in ["", "  \n"] {
            assert!(matches!(
                interpret_clipboard(Some(blank.to_string())),
                Err(AppError::PermissionDenied(detail)) if detail == EMPTY
            ));
        }
        assert_ne!(DENIED, EMPTY);
    }
}
