use chrono::{Datelike, Duration, Local, NaiveDate};
use leptos::prelude::*;
use thaw::*;

fn month_start(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
}

/// First and last day of the month before the one containing `date`
fn previous_month(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let end = month_start(date)? - Duration::days(1);
    Some((month_start(end)?, end))
}

/// DateRangePicker: two native date inputs plus quick month buttons.
///
/// Only complete ranges are reported; a cleared input is ignored.
#[component]
pub fn DateRangePicker(
    #[prop(into)] date_from: Signal<NaiveDate>,
    #[prop(into)] date_to: Signal<NaiveDate>,
    /// Called with (from, to) on every edit
    on_change: Callback<(NaiveDate, NaiveDate)>,
    #[prop(optional)] label: Option<String>,
) -> impl IntoView {
    let parse = |raw: String| NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok();

    let on_from_change = move |raw: String| {
        if let Some(from) = parse(raw) {
            on_change.run((from, date_to.get_untracked()));
        }
    };

    let on_to_change = move |raw: String| {
        if let Some(to) = parse(raw) {
            on_change.run((date_from.get_untracked(), to));
        }
    };

    // Month to date
    let on_current_month = move |_| {
        let today = Local::now().date_naive();
        if let Some(start) = month_start(today) {
            on_change.run((start, today));
        }
    };

    // Steps back one month from the current "from" date
    let on_previous_month = move |_| {
        if let Some(range) = previous_month(date_from.get_untracked()) {
            on_change.run(range);
        }
    };

    view! {
        <style>
            ".date-range-picker {
                box-sizing: border-box;
                border: 1px solid var(--colorNeutralStroke1, #d1d1d1);
                border-radius: var(--borderRadiusMedium, 4px);
                background: var(--colorNeutralBackground1, #fff);
                height: 32px;
            }
            .date-range-picker input[type=\"date\"] {
                border: none;
                background: transparent;
                padding: 0 8px;
                font-size: 0.875rem;
                width: 130px;
                cursor: pointer;
            }
            .date-range-picker input[type=\"date\"]:focus {
                outline: none;
            }"
        </style>

        <Flex vertical=true gap=FlexGap::Small>
            {label.map(|l| view! { <Label>{l}</Label> })}

            <Flex class="date-range-picker" align=FlexAlign::Center gap=FlexGap::Small>
                <input
                    type="date"
                    prop:value=move || date_from.get().format("%Y-%m-%d").to_string()
                    on:change=move |ev| on_from_change(event_target_value(&ev))
                />
                <div>"—"</div>
                <input
                    type="date"
                    prop:value=move || date_to.get().format("%Y-%m-%d").to_string()
                    on:change=move |ev| on_to_change(event_target_value(&ev))
                />
                <ButtonGroup>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=on_previous_month
                    >
                        "-1M"
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=on_current_month
                    >
                        "0M"
                    </Button>
                </ButtonGroup>
            </Flex>
        </Flex>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_month_wraps_year() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        let (from, to) = previous_month(date).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }
}
