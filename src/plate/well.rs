//! Well coordinate naming: `A1`, `H12`, `AF48`.
//!
//! Rows are letters (A..Z, then AA, AB, ...), columns are 1-based numbers.
//! Internally both are zero-based.

/// Name of the well at zero-based `(row, column)`
///
/// ```
/// use wellmatch::plate::well_name;
///
/// assert_eq!(well_name(0, 0), "A1");
/// assert_eq!(well_name(7, 11), "H12");
/// assert_eq!(well_name(26, 0), "AA1");
/// ```
pub fn well_name(row: usize, column: usize) -> String {
    let mut letters = Vec::new();
    let mut n = row + 1;
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    let row: String = letters.iter().rev().collect();
    format!("{row}{}", column + 1)
}

/// Parse a well name into zero-based `(row, column)`
///
/// Row letters are case-insensitive. Returns `None` for anything else.
///
/// ```
/// use wellmatch::plate::parse_well;
///
/// assert_eq!(parse_well("A1"), Some((0, 0)));
/// assert_eq!(parse_well("h12"), Some((7, 11)));
/// assert_eq!(parse_well("A0"), None);
/// ```
pub fn parse_well(name: &str) -> Option<(usize, usize)> {
    let name = name.trim();
    let split = name.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = name.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut row: usize = 0;
    for c in letters.chars() {
        let value = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        row = row.checked_mul(26)?.checked_add(value)?;
    }

    let column: usize = digits.parse().ok()?;
    if column == 0 {
        return None;
    }
    Some((row - 1, column - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_name() {
        assert_eq!(well_name(1, 0), "B1");
        assert_eq!(well_name(15, 23), "P24");
        assert_eq!(well_name(25, 0), "Z1");
        assert_eq!(well_name(27, 2), "AB3");
    }

    #[test]
    fn test_parse_well() {
        assert_eq!(parse_well("P24"), Some((15, 23)));
        assert_eq!(parse_well(" b3 "), Some((1, 2)));
        assert_eq!(parse_well("AA1"), Some((26, 0)));
    }

    #[test]
    fn test_parse_well_rejects_garbage() {
        assert_eq!(parse_well(""), None);
        assert_eq!(parse_well("12"), None);
        assert_eq!(parse_well("A"), None);
        assert_eq!(parse_well("A1B"), None);
        assert_eq!(parse_well("Ä1"), None);
    }
}
