use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Digit grouping used for amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grouping {
    /// 1,234,567
    #[default]
    Western,
    /// 12,34,567
    Indian,
}

impl Grouping {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "western" | "en-us" => Some(Grouping::Western),
            "indian" | "en-in" => Some(Grouping::Indian),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFormat {
    pub currency: String,
    pub grouping: Grouping,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        DisplayFormat {
            currency: "₹".to_string(),
            grouping: Grouping::Western,
        }
    }
}

const LOCAL_DATETIME: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

impl DisplayFormat {
    pub fn amount(&self, amount: f64) -> String {
        format!("{}{}", self.currency, group_number(amount, self.grouping))
    }

    /// Render an ISO 8601 timestamp in local time. Values without an offset
    /// are taken as local wall-clock time. Unparseable input is echoed back.
    pub fn timestamp(&self, raw: &str) -> String {
        match parse_local(raw) {
            Some(dt) => dt.format(LOCAL_DATETIME).to_string(),
            None => raw.to_string(),
        }
    }
}

fn parse_local(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    Local.from_local_datetime(&naive).earliest()
}

/// Group the integer part and keep up to three fraction digits.
pub fn group_number(value: f64, grouping: Grouping) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // Decimal expansion of the double, so huge values keep every digit
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, grouping));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_digits(digits: &str, grouping: Grouping) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let len = chars.len();
    let mut result = String::with_capacity(len + len / 2);
    for (i, c) in chars.iter().enumerate() {
        let remaining = len - i;
        let boundary = match grouping {
            Grouping::Western => i > 0 && remaining % 3 == 0,
            // last group of three, then pairs
            Grouping::Indian => i > 0 && remaining >= 3 && (remaining == 3 || (remaining - 3) % 2 == 0),
        };
        if boundary {
            result.push(',');
        }
        result.push(*c);
    }
    result
}
