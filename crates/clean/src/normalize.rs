use bitext_core::CellValue;

/// Zero-width space, zero-width non-joiner, zero-width joiner, byte-order mark.
const ZERO_WIDTH: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

/// Whitespace as collapsed here: Unicode `White_Space` plus the ASCII
/// file/group/record/unit separators (U+001C..=U+001F).
fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&c)
}

/// Normalize one text value: drop zero-width marks and the BOM, turn
/// non-breaking spaces into regular ones, collapse whitespace runs
/// (newlines and tabs included) into a single space, and trim.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if ZERO_WIDTH.contains(&c) {
            continue;
        }
        if is_space(c) {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }

    out
}

/// Cells that are not text normalize to the empty string.
pub fn normalize_cell(cell: &CellValue) -> String {
    cell.as_str().map(normalize_text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize_text("hello \t\n  world"), "hello world");
    }

    #[test]
    fn information_separators_count_as_whitespace() {
        assert_eq!(normalize_text("a\u{1C}\u{1D}b\u{1E}c\u{1F}"), "a b c");
        assert_eq!(normalize_text("\u{1F}"), "");
    }

    #[test]
    fn trims_edges() {
        assert_eq!(normalize_text("  \n नमस्ते  "), "नमस्ते");
    }

    #[test]
    fn removes_zero_width_and_bom() {
        let input = "\u{FEFF}न\u{200D}म\u{200C}स्\u{200B}ते";
        let out = normalize_text(input);
        assert_eq!(out, "नमस्ते");
        assert!(!out.chars().any(|c| ZERO_WIDTH.contains(&c)));
    }

    #[test]
    fn replaces_non_breaking_space() {
        assert_eq!(normalize_text("a\u{00A0}\u{00A0}b"), "a b");
    }

    #[test]
    fn zero_width_between_spaces_does_not_leave_double_space() {
        assert_eq!(normalize_text("a \u{200B} b"), "a b");
    }

    #[test]
    fn whitespace_only_becomes_empty() {
        assert_eq!(normalize_text(" \t\u{00A0}\n"), "");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "  a\u{00A0} b\t\tc ",
            "\u{FEFF}१. नमस्ते\u{200B}  संसार",
            "plain",
            "",
            "\n\n",
        ];
        for s in samples {
            let once = normalize_text(s);
            assert_eq!(normalize_text(&once), once, "not idempotent for {s:?}");
            assert!(!once.contains("  "));
            assert_eq!(once.trim(), once);
        }
    }

    #[test]
    fn non_text_cells_become_empty() {
        assert_eq!(normalize_cell(&CellValue::Integer(5)), "");
        assert_eq!(normalize_cell(&CellValue::Float(1.5)), "");
        assert_eq!(normalize_cell(&CellValue::Null), "");
        assert_eq!(normalize_cell(&CellValue::from(" hi  there ")), "hi there");
    }
}
