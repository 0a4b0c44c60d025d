//! Text normalization applied to every ingested document before
//! fingerprinting and NLP processing.

/// Clean and normalize raw extracted text.
///
/// Steps applied in order:
/// 1. Remove null bytes and non-printable control characters (keep `\n`
///    and `\t`)
/// 2. Normalize line endings to `\n`
/// 3. Strip leading/trailing whitespace from each line
/// 4. Collapse intra-line whitespace runs to a single space
/// 5. Collapse runs of blank lines to a single blank line
/// 6. Strip overall leading/trailing whitespace
pub fn normalize(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let cleaned: String = text
        .chars()
        .filter(|&c| c == '\n' || c == '\t' || !c.is_control())
        .collect();

    let lines: Vec<String> = cleaned
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();

    // Collapse 2+ consecutive blank lines into one blank line.
    let mut collapsed: Vec<&str> = Vec::with_capacity(lines.len());
    let mut blank_run = 0usize;
    for line in &lines {
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        collapsed.push(line);
    }

    collapsed.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_control_characters() {
        assert_eq!(normalize("a\u{0}b\u{7f}c"), "abc");
    }

    #[test]
    fn normalizes_line_endings_and_whitespace() {
        assert_eq!(
            normalize("  line one\t\t here \r\nline   two  \r"),
            "line one here\nline two"
        );
    }

    #[test]
    fn collapses_blank_runs() {
        assert_eq!(normalize("a\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize("   \n \t \n"), "");
    }

    #[test]
    fn idempotent() {
        let raw = "  Supply chain\tdisruptions \n\n\n led to a decline. ";
        let once = normalize(raw);
        assert_eq!(normalize(&once), once);
    }
}
