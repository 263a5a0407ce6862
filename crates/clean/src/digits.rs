use bitext_core::CellValue;

/// DEVANAGARI DIGIT ZERO; the other nine follow contiguously.
const DEVANAGARI_ZERO: u32 = 0x0966;

/// Replace every ASCII digit with the matching Devanagari digit. All other
/// characters, including digits of other scripts, are left as they are.
pub fn to_devanagari_digits(text: &str) -> String {
    text.chars().map(devanagari_digit).collect()
}

fn devanagari_digit(c: char) -> char {
    match c.to_digit(10) {
        Some(d) if c.is_ascii_digit() => char::from_u32(DEVANAGARI_ZERO + d).unwrap_or(c),
        _ => c,
    }
}

/// Any cell is coerced to text first; null becomes the empty string.
pub fn to_devanagari_digits_cell(cell: &CellValue) -> CellValue {
    CellValue::Text(to_devanagari_digits(&cell.to_text_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_ascii_digits() {
        assert_eq!(to_devanagari_digits("Room 101"), "Room १०१");
        assert_eq!(to_devanagari_digits("0123456789"), "०१२३४५६७८९");
    }

    #[test]
    fn leaves_other_characters() {
        assert_eq!(to_devanagari_digits("नमस्ते, ४ जना!"), "नमस्ते, ४ जना!");
        assert_eq!(to_devanagari_digits(""), "");
    }

    #[test]
    fn preserves_length_in_chars() {
        let input = "a1b22c333";
        assert_eq!(
            to_devanagari_digits(input).chars().count(),
            input.chars().count()
        );
    }

    #[test]
    fn coerces_cells() {
        assert_eq!(to_devanagari_digits_cell(&CellValue::Integer(42)), CellValue::from("४२"));
        assert_eq!(to_devanagari_digits_cell(&CellValue::Null), CellValue::from(""));
        assert_eq!(to_devanagari_digits_cell(&CellValue::from("p. 7")), CellValue::from("p. ७"));
    }
}
