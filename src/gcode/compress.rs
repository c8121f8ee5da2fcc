// src/gcode/compress.rs - Strip comments and blank lines from program text

/// Trim every line and drop empty lines and `;` comments.
pub fn compress<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| line.as_ref().trim().to_string())
        .filter(|line| !line.is_empty() && !line.starts_with(';'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_drops_comments_and_blanks() {
        let lines = vec!["", "; home", "$H", "   G90  ", "\t", "  ; indented comment", "X1.0"];
        assert_eq!(compress(lines), vec!["$H", "G90", "X1.0"]);
    }

    #[test]
    fn test_compress_keeps_inline_comment_lines() {
        // only whole-line comments are removed
        assert_eq!(compress(["G92 X0 ; reset"]), vec!["G92 X0 ; reset"]);
    }
}
