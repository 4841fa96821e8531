//! Common types used across the dashboard: filters, lenient number parsing
//! and display formatting

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Placeholder rendered wherever a value is missing or unparseable
pub const PLACEHOLDER: &str = "-";

/// Group label for inventory entries that carry no date
pub const NO_DATE_LABEL: &str = "No date";

/// Currency prefix used in rendered prices
pub const CURRENCY: &str = "₱";

/// Query string pairs sent to the backend, in insertion order
pub type QueryParams = Vec<(&'static str, String)>;

// ============================================================================
// Filters
// ============================================================================

/// Chart aggregation granularity accepted by `/api/analytics`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Week,
    Month,
    Year,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl FromStr for Period {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            _ => Err("Period must be one of: week, month, year"),
        }
    }
}

/// Dashboard filter bar state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardFilters {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub period: Option<Period>,
    /// Ask the backend not to fall back to wider aggregates
    pub strict: bool,
}

impl DashboardFilters {
    /// Strict scoping is forced whenever a month is selected
    pub fn is_strict(&self) -> bool {
        self.strict || self.month.is_some()
    }

    /// Query for `GET /api/sales`
    pub fn sales_query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(year) = self.year {
            params.push(("year", year.to_string()));
        }
        if let Some(month) = self.month {
            params.push(("month", month.to_string()));
        }
        if self.is_strict() {
            params.push(("strict", "1".to_string()));
        }
        params
    }

    /// Query for `GET /api/analytics`
    pub fn analytics_query(&self) -> QueryParams {
        let mut params = self.sales_query();
        if let Some(period) = self.period {
            params.push(("period", period.as_str().to_string()));
        }
        params
    }
}

/// Analytics page filters (`/api/analytics`, `/api/trends`, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsFilters {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub week: Option<u32>,
}

impl AnalyticsFilters {
    pub fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(year) = self.year {
            params.push(("year", year.to_string()));
        }
        if let Some(month) = self.month {
            params.push(("month", month.to_string()));
        }
        if let Some(week) = self.week {
            params.push(("week", week.to_string()));
        }
        params
    }
}

/// Consumer inventory browse filters for `GET /api/inventory`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryFilters {
    /// Only the most recent listing per retailer/variety
    pub latest: Option<bool>,
    pub date: Option<String>,
    pub variety: Option<String>,
    pub area: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub retailer_id: Option<String>,
}

impl Default for InventoryFilters {
    fn default() -> Self {
        Self {
            latest: Some(true),
            date: None,
            variety: None,
            area: None,
            min_price: None,
            max_price: None,
            retailer_id: None,
        }
    }
}

impl InventoryFilters {
    /// Latest listings of a single retailer, as shown on its company page
    pub fn for_retailer(retailer_id: impl Into<String>) -> Self {
        Self {
            retailer_id: Some(retailer_id.into()),
            ..Self::default()
        }
    }

    pub fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(retailer_id) = non_blank(self.retailer_id.as_deref()) {
            params.push(("retailer_id", retailer_id.to_string()));
        }
        if let Some(latest) = self.latest {
            params.push(("latest", if latest { "1" } else { "0" }.to_string()));
        }
        if let Some(date) = non_blank(self.date.as_deref()) {
            params.push(("date", date.to_string()));
        }
        if let Some(variety) = non_blank(self.variety.as_deref()) {
            params.push(("variety", variety.to_string()));
        }
        if let Some(area) = non_blank(self.area.as_deref()) {
            params.push(("area", area.to_string()));
        }
        if let Some(min_price) = self.min_price {
            params.push(("min_price", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            params.push(("max_price", max_price.to_string()));
        }
        params
    }
}

/// `Some(trimmed)` when the input has visible content
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ============================================================================
// Lenient number parsing
// ============================================================================

/// Longest prefix of `input` that reads as a decimal number, mirroring how
/// browsers parse form values (`"12.5kg"` reads as `12.5`).
pub fn numeric_prefix(input: &str) -> Option<String> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut frac_digits = 0;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut probe = end + 1;
        while probe < bytes.len() && bytes[probe].is_ascii_digit() {
            probe += 1;
        }
        frac_digits = probe - end - 1;
        if int_digits > 0 || frac_digits > 0 {
            end = probe;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    let mantissa_end = end;
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut probe = end + 1;
        if probe < bytes.len() && (bytes[probe] == b'+' || bytes[probe] == b'-') {
            probe += 1;
        }
        let exp_start = probe;
        while probe < bytes.len() && bytes[probe].is_ascii_digit() {
            probe += 1;
        }
        if probe > exp_start {
            end = probe;
        }
    }

    let (sign, unsigned) = match s[..mantissa_end].strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s[..mantissa_end].trim_start_matches('+')),
    };
    let mut mantissa = unsigned.trim_end_matches('.').to_string();
    if mantissa.starts_with('.') {
        mantissa.insert(0, '0');
    }

    Some(format!("{}{}{}", sign, mantissa, &s[mantissa_end..end]))
}

/// Parse a form or wire value as `f64`; `None` when nothing numeric leads
pub fn parse_float(input: &str) -> Option<f64> {
    numeric_prefix(input)
        .and_then(|n| n.parse::<f64>().ok())
        .filter(|f| f.is_finite())
}

/// Parse a form or wire value as `Decimal`; `None` when nothing numeric leads
pub fn parse_decimal(input: &str) -> Option<Decimal> {
    let prefix = numeric_prefix(input)?;
    Decimal::from_str(&prefix)
        .or_else(|_| Decimal::from_scientific(&prefix))
        .ok()
}

/// Parse a form field, treating blank or unparseable input as zero
pub fn decimal_or_zero(input: &str) -> Decimal {
    parse_decimal(input).unwrap_or(Decimal::ZERO)
}

/// Serde helpers that accept numbers, numeric strings or junk and never fail
pub mod lenient {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
        match value {
            Value::Number(n) => super::parse_decimal(&n.to_string()),
            Value::String(s) => super::parse_decimal(s),
            _ => None,
        }
    }

    pub fn float_from_value(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => super::parse_float(s),
            _ => None,
        }
    }

    pub fn text_from_value(value: &Value) -> Option<String> {
        match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(decimal_from_value))
    }

    pub fn float_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(float_from_value).unwrap_or(0.0))
    }

    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(text_from_value))
    }

    /// Identifiers arrive as integers or strings depending on the table
    pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(text_from_value).unwrap_or_default())
    }
}

// ============================================================================
// Display formatting
// ============================================================================

/// Fixed-point rendering with half-away-from-zero rounding
pub fn fixed(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", decimals as usize, rounded)
}

/// Fixed-point rendering, or the placeholder when the value is absent
pub fn fixed_or_placeholder(value: Option<Decimal>, decimals: u32) -> String {
    value
        .map(|v| fixed(v, decimals))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Fixed-point rendering for chart-side floats
pub fn fixed_f64(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Render a number the way it came from the backend, without trailing zeros
pub fn plain(value: Option<Decimal>) -> String {
    value
        .map(|v| v.normalize().to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// `YYYY-MM-DD` prefix of a date or timestamp string
pub fn date_prefix(raw: Option<&str>) -> Option<String> {
    non_blank(raw).map(|s| s.chars().take(10).collect())
}

/// Date prefix or the placeholder
pub fn date_label(raw: Option<&str>) -> String {
    date_prefix(raw).unwrap_or_else(|| PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_numeric_prefix() {
        assert_eq!(numeric_prefix("12.5").as_deref(), Some("12.5"));
        assert_eq!(numeric_prefix("  12.5kg").as_deref(), Some("12.5"));
        assert_eq!(numeric_prefix("-3").as_deref(), Some("-3"));
        assert_eq!(numeric_prefix("+.5").as_deref(), Some("0.5"));
        assert_eq!(numeric_prefix("7.").as_deref(), Some("7"));
        assert_eq!(numeric_prefix("1e3x").as_deref(), Some("1e3"));
        assert_eq!(numeric_prefix("2e").as_deref(), Some("2"));
        assert_eq!(numeric_prefix("abc"), None);
        assert_eq!(numeric_prefix(""), None);
        assert_eq!(numeric_prefix("."), None);
        assert_eq!(numeric_prefix("-"), None);
    }

    #[test]
    fn test_parse_decimal_and_float() {
        assert_eq!(parse_decimal("80"), Some(dec("80")));
        assert_eq!(parse_decimal("1.5e2"), Some(dec("150")));
        assert_eq!(parse_decimal("n/a"), None);
        assert_eq!(parse_float("42.25 kg"), Some(42.25));
        assert_eq!(parse_float("NaN"), None);
        assert_eq!(decimal_or_zero(""), Decimal::ZERO);
    }

    #[test]
    fn test_fixed_rounds_half_away_from_zero() {
        assert_eq!(fixed(dec("4000"), 2), "4000.00");
        assert_eq!(fixed(dec("2.345"), 2), "2.35");
        assert_eq!(fixed(dec("20"), 1), "20.0");
        assert_eq!(fixed(dec("33.333333"), 1), "33.3");
    }

    #[test]
    fn test_placeholder_formatting() {
        assert_eq!(fixed_or_placeholder(None, 2), "-");
        assert_eq!(plain(None), "-");
        assert_eq!(plain(Some(dec("1200.0"))), "1200");
        assert_eq!(plain(Some(dec("150.50"))), "150.5");
    }

    #[test]
    fn test_date_prefix() {
        assert_eq!(
            date_prefix(Some("2024-03-04T10:22:00+00:00")).as_deref(),
            Some("2024-03-04")
        );
        assert_eq!(date_prefix(Some("")), None);
        assert_eq!(date_label(None), "-");
    }

    #[test]
    fn test_month_forces_strict() {
        let filters = DashboardFilters {
            year: Some(2024),
            month: Some(3),
            period: Some(Period::Month),
            strict: false,
        };
        assert_eq!(
            filters.sales_query(),
            vec![
                ("year", "2024".to_string()),
                ("month", "3".to_string()),
                ("strict", "1".to_string()),
            ]
        );
        assert_eq!(
            filters.analytics_query().last(),
            Some(&("period", "month".to_string()))
        );
    }

    #[test]
    fn test_year_only_is_not_strict() {
        let filters = DashboardFilters {
            year: Some(2024),
            ..Default::default()
        };
        assert_eq!(filters.sales_query(), vec![("year", "2024".to_string())]);
    }

    #[test]
    fn test_inventory_filters_query() {
        let filters = InventoryFilters {
            variety: Some("  Jasmine ".to_string()),
            area: Some("".to_string()),
            max_price: Some(dec("55.5")),
            ..Default::default()
        };
        assert_eq!(
            filters.query(),
            vec![
                ("latest", "1".to_string()),
                ("variety", "Jasmine".to_string()),
                ("max_price", "55.5".to_string()),
            ]
        );

        let company = InventoryFilters::for_retailer("r-1");
        assert_eq!(company.query()[0], ("retailer_id", "r-1".to_string()));
    }

    #[test]
    fn test_period_parse() {
        assert_eq!("Month".parse::<Period>(), Ok(Period::Month));
        assert!("quarter".parse::<Period>().is_err());
    }
}
