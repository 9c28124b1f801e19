use error_stack::Report;

use crate::KernelError;

/// Trims `value` and checks that the remaining text is between `min` and `max`
/// characters long.
pub(crate) fn bounded_text(
    field: &str,
    value: impl Into<String>,
    min: usize,
    max: usize,
) -> error_stack::Result<String, KernelError> {
    let value = value.into();
    let trimmed = value.trim();
    let length = trimmed.chars().count();
    if length == 0 && min > 0 {
        return Err(
            Report::new(KernelError::Validation).attach_printable(format!("{field} is required"))
        );
    }
    if length < min || length > max {
        return Err(Report::new(KernelError::Validation).attach_printable(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod test {
    use super::bounded_text;
    use crate::KernelError;

    #[test]
    fn trims_before_measuring() {
        let text = bounded_text("comment", "  hello  ", 5, 10).unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert!(bounded_text("title", "ééééé", 1, 5).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        let short = bounded_text("comment", "hey", 5, 10).unwrap_err();
        assert_eq!(short.current_context(), &KernelError::Validation);
        let blank = bounded_text("title", "   ", 1, 10).unwrap_err();
        assert_eq!(blank.current_context(), &KernelError::Validation);
        let long = bounded_text("genre", "x".repeat(51), 0, 50).unwrap_err();
        assert_eq!(long.current_context(), &KernelError::Validation);
    }
}
