//! Input validation rules shared by the task services.

/// Minimum accepted title length, in characters.
pub const TITLE_MIN_LEN: usize = 3;
/// Maximum accepted title length, in characters.
pub const TITLE_MAX_LEN: usize = 100;

/// Checks a task title against the accepted length range.
///
/// Length is counted in Unicode scalar values, not bytes, so accented
/// titles like "Leer documentación" count one per letter.
pub fn title_length_ok(titulo: &str) -> bool {
    let len = titulo.chars().count();
    (TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds() {
        assert!(!title_length_ok("ab"));
        assert!(title_length_ok("abc"));
        assert!(title_length_ok(&"x".repeat(100)));
        assert!(!title_length_ok(&"x".repeat(101)));
    }

    #[test]
    fn test_title_counts_chars_not_bytes() {
        // 3 characters, 5 bytes
        assert!(title_length_ok("ñañ"));
    }
}
