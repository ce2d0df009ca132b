use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Period selector of the filter form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateRangeMode {
    #[default]
    #[serde(rename = "Last Week")]
    LastWeek,
    #[serde(rename = "Last Month")]
    LastMonth,
    #[serde(rename = "Last 3 Months")]
    Last3Months,
    #[serde(rename = "Last Year")]
    LastYear,
    #[serde(rename = "Select Date Range")]
    Custom,
}

impl DateRangeMode {
    pub const ALL: [DateRangeMode; 5] = [
        DateRangeMode::LastWeek,
        DateRangeMode::LastMonth,
        DateRangeMode::Last3Months,
        DateRangeMode::LastYear,
        DateRangeMode::Custom,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DateRangeMode::LastWeek => "Last Week",
            DateRangeMode::LastMonth => "Last Month",
            DateRangeMode::Last3Months => "Last 3 Months",
            DateRangeMode::LastYear => "Last Year",
            DateRangeMode::Custom => "Select Date Range",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == label)
    }

    /// Days looked back from today; `None` for the custom range
    pub fn lookback_days(self) -> Option<i64> {
        match self {
            DateRangeMode::LastWeek => Some(7),
            DateRangeMode::LastMonth => Some(30),
            DateRangeMode::Last3Months => Some(90),
            DateRangeMode::LastYear => Some(365),
            DateRangeMode::Custom => None,
        }
    }
}

/// Current filter selections of one insights page.
///
/// Sent as `{"filters": ...}` with every insights and details request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightsFilter {
    /// Selected partner codes in selection order; empty means all partners
    #[serde(default)]
    pub partners: Vec<String>,
    /// Partner group; empty means unset
    #[serde(default)]
    pub partner_group: String,
    #[serde(default)]
    pub date_range: DateRangeMode,
    /// Used only when `date_range` is [`DateRangeMode::Custom`]
    pub selected_date_range: (NaiveDate, NaiveDate),
}

impl InsightsFilter {
    /// Page-load defaults: last week, custom range = month start .. today
    pub fn new(today: NaiveDate) -> Self {
        let month_start = today.with_day(1).unwrap_or(today);
        Self {
            partners: Vec::new(),
            partner_group: String::new(),
            date_range: DateRangeMode::LastWeek,
            selected_date_range: (month_start, today),
        }
    }

    /// Inclusive period the filter selects, relative to `today`
    pub fn resolve_period(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self.date_range.lookback_days() {
            Some(days) => (today - Duration::days(days), today),
            None => self.selected_date_range,
        }
    }

    /// The custom range picker is visible only in custom mode
    pub fn shows_custom_range(&self) -> bool {
        self.date_range == DateRangeMode::Custom
    }

    pub fn partner_group(&self) -> Option<&str> {
        let group = self.partner_group.trim();
        (!group.is_empty()).then_some(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults() {
        let filter = InsightsFilter::new(date(2026, 10, 15));
        assert_eq!(filter.date_range, DateRangeMode::LastWeek);
        assert_eq!(
            filter.selected_date_range,
            (date(2026, 10, 1), date(2026, 10, 15))
        );
        assert!(filter.partners.is_empty());
        assert_eq!(filter.partner_group(), None);
    }

    #[test]
    fn test_resolve_preset_periods() {
        let today = date(2026, 3, 10);
        let mut filter = InsightsFilter::new(today);

        assert_eq!(filter.resolve_period(today), (date(2026, 3, 3), today));
        filter.date_range = DateRangeMode::LastMonth;
        assert_eq!(filter.resolve_period(today), (date(2026, 2, 8), today));
        filter.date_range = DateRangeMode::Last3Months;
        assert_eq!(filter.resolve_period(today), (date(2025, 12, 10), today));
        filter.date_range = DateRangeMode::LastYear;
        assert_eq!(filter.resolve_period(today), (date(2025, 3, 10), today));
    }

    #[test]
    fn test_resolve_custom_period() {
        let today = date(2026, 3, 10);
        let mut filter = InsightsFilter::new(today);
        filter.selected_date_range = (date(2025, 1, 1), date(2025, 6, 30));

        // custom range ignored until the mode says so
        assert_ne!(filter.resolve_period(today).0, date(2025, 1, 1));
        filter.date_range = DateRangeMode::Custom;
        assert_eq!(
            filter.resolve_period(today),
            (date(2025, 1, 1), date(2025, 6, 30))
        );
    }

    #[test]
    fn test_wire_format() {
        let mut filter = InsightsFilter::new(date(2026, 10, 15));
        filter.partners = vec!["C-0002".into(), "C-0001".into()];
        filter.date_range = DateRangeMode::Custom;

        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json["date_range"], "Select Date Range");
        assert_eq!(json["partners"][0], "C-0002");
        assert_eq!(json["selected_date_range"][0], "2026-10-01");
        assert_eq!(json["selected_date_range"][1], "2026-10-15");

        let back: InsightsFilter = serde_json::from_value(json).unwrap();
        assert_eq!(back, filter);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let filter: InsightsFilter = serde_json::from_str(
            r#"{"selected_date_range": ["2026-01-01", "2026-01-31"]}"#,
        )
        .unwrap();
        assert_eq!(filter.date_range, DateRangeMode::LastWeek);
        assert!(filter.partners.is_empty());
        assert_eq!(filter.partner_group, "");
    }

    #[test]
    fn test_custom_range_visibility() {
        let mut filter = InsightsFilter::new(date(2026, 10, 15));
        for mode in DateRangeMode::ALL {
            filter.date_range = mode;
            assert_eq!(filter.shows_custom_range(), mode == DateRangeMode::Custom);
        }
    }

    #[test]
    fn test_mode_labels() {
        for mode in DateRangeMode::ALL {
            assert_eq!(DateRangeMode::from_label(mode.label()), Some(mode));
        }
        assert_eq!(DateRangeMode::from_label("Yesterday"), None);
    }
}
