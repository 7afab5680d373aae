use serde::{Deserialize, Serialize};

/// One of the 12 Jalali calendar months. All aggregation in the ledger is
/// keyed by this fixed, ordered set; free-form month strings are rejected at
/// the parsing boundary so the balance engine never sees an unknown label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    #[serde(rename = "فروردین")]
    Farvardin,
    #[serde(rename = "اردیبهشت")]
    Ordibehesht,
    #[serde(rename = "خرداد")]
    Khordad,
    #[serde(rename = "تیر")]
    Tir,
    #[serde(rename = "مرداد")]
    Mordad,
    #[serde(rename = "شهریور")]
    Shahrivar,
    #[serde(rename = "مهر")]
    Mehr,
    #[serde(rename = "آبان")]
    Aban,
    #[serde(rename = "آذر")]
    Azar,
    #[serde(rename = "دی")]
    Dey,
    #[serde(rename = "بهمن")]
    Bahman,
    #[serde(rename = "اسفند")]
    Esfand,
}

impl Month {
    /// Canonical month order used for cumulative balances.
    pub const ALL: [Month; 12] = [
        Month::Farvardin,
        Month::Ordibehesht,
        Month::Khordad,
        Month::Tir,
        Month::Mordad,
        Month::Shahrivar,
        Month::Mehr,
        Month::Aban,
        Month::Azar,
        Month::Dey,
        Month::Bahman,
        Month::Esfand,
    ];

    /// Persian label, as stored in the database and shown in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Month::Farvardin => "فروردین",
            Month::Ordibehesht => "اردیبهشت",
            Month::Khordad => "خرداد",
            Month::Tir => "تیر",
            Month::Mordad => "مرداد",
            Month::Shahrivar => "شهریور",
            Month::Mehr => "مهر",
            Month::Aban => "آبان",
            Month::Azar => "آذر",
            Month::Dey => "دی",
            Month::Bahman => "بهمن",
            Month::Esfand => "اسفند",
        }
    }

    /// Latin transliteration, accepted as CLI input.
    pub fn latin(&self) -> &'static str {
        match self {
            Month::Farvardin => "farvardin",
            Month::Ordibehesht => "ordibehesht",
            Month::Khordad => "khordad",
            Month::Tir => "tir",
            Month::Mordad => "mordad",
            Month::Shahrivar => "shahrivar",
            Month::Mehr => "mehr",
            Month::Aban => "aban",
            Month::Azar => "azar",
            Month::Dey => "dey",
            Month::Bahman => "bahman",
            Month::Esfand => "esfand",
        }
    }

    /// Zero-based position in the canonical order.
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    /// Parse a Persian label, a Latin transliteration, or a 1-based index.
    /// Returns None for anything outside the fixed 12-month set.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            return if (1..=12).contains(&n) {
                Some(Self::ALL[n - 1])
            } else {
                None
            };
        }
        let lower = s.to_lowercase();
        Self::ALL
            .iter()
            .find(|m| m.as_str() == s || m.latin() == lower)
            .copied()
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A building unit, numbered 1..=N. Displayed with its Persian label
/// ("واحد 3"). The valid range depends on the building's unit count, which
/// is checked at the service boundary, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitNo(pub u32);

impl UnitNo {
    /// Parse a bare number ("3") or a Persian label ("واحد 3").
    /// Zero is never a valid unit number.
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        let digits = s.strip_prefix("واحد").map(str::trim).unwrap_or(s);
        match digits.parse::<u32>() {
            Ok(n) if n >= 1 => Some(UnitNo(n)),
            _ => None,
        }
    }
}

impl std::fmt::Display for UnitNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "واحد {}", self.0)
    }
}
