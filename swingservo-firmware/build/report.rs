//! Boxed error text for build failures

/// Inner width of the error box
const BOX_WIDTH: usize = 64;

/// Format error message lines with box drawing
///
/// Lines wider than the box are cut on a character boundary and end in
/// `...`.
pub fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| format!("║  {:<width$} ║", fit_line(line), width = BOX_WIDTH))
        .collect::<Vec<_>>()
        .join("\n")
}

fn fit_line(line: &str) -> String {
    if line.chars().count() <= BOX_WIDTH {
        return line.to_string();
    }
    match line.char_indices().nth(BOX_WIDTH - 3) {
        Some((cut, _)) => format!("{}...", &line[..cut]),
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_line_is_padded() {
        let out = format_error_lines("bad key");
        assert!(out.starts_with("║  bad key "));
        assert!(out.ends_with(" ║"));
        assert_eq!(out.chars().count(), BOX_WIDTH + 5);
    }

    #[test]
    fn test_long_ascii_line_is_cut() {
        let out = format_error_lines(&"x".repeat(100));
        assert!(out.contains(&format!("{}...", "x".repeat(61))));
        assert_eq!(out.chars().count(), BOX_WIDTH + 5);
    }

    #[test]
    fn test_non_ascii_line_is_cut_on_char_boundary() {
        // Byte 61 falls inside a two-byte character
        let line = format!("{}{}", "a".repeat(60), "°".repeat(20));
        let out = format_error_lines(&line);
        assert!(out.contains(&format!("{}°...", "a".repeat(60))));
        assert_eq!(out.chars().count(), BOX_WIDTH + 5);
    }

    #[test]
    fn test_each_line_is_boxed() {
        let out = format_error_lines("first\nsecond");
        assert_eq!(out.lines().count(), 2);
        assert!(out.lines().all(|l| l.starts_with("║  ")));
    }
}
