use std::fmt;

/// Amounts are whole toman as signed integers. The toman has no sub-unit in
/// daily use, so there is no fixed-point scaling and no floating point
/// anywhere in the ledger.
pub type Toman = i64;

/// Format an amount with thousands separators.
/// Example: 1500000 -> "1,500,000", -2500 -> "-2,500"
pub fn format_toman(amount: Toman) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let digits = amount.abs().to_string();

    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}", sign, grouped)
}

/// Parse a whole-toman amount. Thousands separators ("1,500,000") and
/// underscores are accepted; decimals are not, since the toman is the
/// smallest unit the ledger tracks.
pub fn parse_toman(input: &str) -> Result<Toman, ParseTomanError> {
    let input = input.trim();
    let negative = input.starts_with('-');
    let input = input.trim_start_matches('-');

    if input.is_empty() || input.contains('.') {
        return Err(ParseTomanError::InvalidFormat);
    }

    let digits: String = input.chars().filter(|c| *c != ',' && *c != '_').collect();
    let amount: i64 = digits.parse().map_err(|_| ParseTomanError::InvalidFormat)?;

    Ok(if negative { -amount } else { amount })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTomanError {
    InvalidFormat,
}

impl fmt::Display for ParseTomanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseTomanError::InvalidFormat => write!(f, "invalid amount format"),
        }
    }
}

impl std::error::Error for ParseTomanError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_toman() {
        assert_eq!(format_toman(0), "0");
        assert_eq!(format_toman(100), "100");
        assert_eq!(format_toman(5000), "5,000");
        assert_eq!(format_toman(1500000), "1,500,000");
        assert_eq!(format_toman(-2500), "-2,500");
    }

    #[test]
    fn test_parse_toman() {
        assert_eq!(parse_toman("5000"), Ok(5000));
        assert_eq!(parse_toman("1,500,000"), Ok(1500000));
        assert_eq!(parse_toman("1_000"), Ok(1000));
        assert_eq!(parse_toman(" 250 "), Ok(250));
        assert_eq!(parse_toman("-100"), Ok(-100));
    }

    #[test]
    fn test_parse_toman_invalid() {
        assert!(parse_toman("abc").is_err());
        assert!(parse_toman("12.5").is_err());
        assert!(parse_toman("").is_err());
    }
}
