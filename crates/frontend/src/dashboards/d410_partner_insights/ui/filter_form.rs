use contracts::dashboards::d410_partner_insights::{
    DateRangeMode, InsightsFilter, LinkOption, PartnerRole,
};
use leptos::prelude::*;
use thaw::*;

use super::link_search::LinkSearch;
use crate::dashboards::d410_partner_insights::model::FilterChange;
use crate::shared::components::date_range_picker::DateRangePicker;

/// Partner picker, group lookup, period selector and the custom range.
///
/// There is no Apply button: every edit is reported at once as a single
/// [`FilterChange`].
#[component]
pub fn FilterForm(
    role: PartnerRole,
    #[prop(into)] filters: Signal<InsightsFilter>,
    on_change: Callback<FilterChange>,
) -> impl IntoView {
    let partners = Signal::derive(move || filters.with(|f| f.partners.clone()));
    let group = Signal::derive(move || filters.with(|f| f.partner_group.clone()));

    let add_partner = move |code: String| {
        let mut selected = partners.get_untracked();
        if !selected.contains(&code) {
            selected.push(code);
            on_change.run(FilterChange::Partners(selected));
        }
    };

    let remove_partner = move |code: String| {
        let mut selected = partners.get_untracked();
        selected.retain(|c| *c != code);
        on_change.run(FilterChange::Partners(selected));
    };

    let date_range = RwSignal::new(filters.get_untracked().date_range.label().to_string());
    Effect::watch(
        move || date_range.get(),
        move |label, _, _| match DateRangeMode::from_label(label) {
            Some(mode) => on_change.run(FilterChange::DateRange(mode)),
            None => log::warn!("D410: unknown date range '{}'", label),
        },
        false,
    );

    view! {
        <div class="filter-panel-content">
            <Flex gap=FlexGap::Large align=FlexAlign::Start>
                <div style="width: 320px;">
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>{role.picker_label()}</Label>
                        <div class="partner-tags">
                            <For
                                each=move || partners.get()
                                key=|code| code.clone()
                                children=move |code| {
                                    let remove = code.clone();
                                    view! {
                                        <span class="partner-tag">
                                            {code}
                                            <button
                                                class="partner-tag__remove"
                                                on:click=move |_| remove_partner(remove.clone())
                                            >
                                                "×"
                                            </button>
                                        </span>
                                    }
                                }
                            />
                        </div>
                        <LinkSearch
                            doctype=role.partner_doctype()
                            placeholder=format!("Search {}...", role.picker_label().to_lowercase())
                            on_pick=Callback::new(move |option: LinkOption| {
                                add_partner(option.value)
                            })
                        />
                    </Flex>
                </div>

                <div style="width: 240px;">
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>{role.group_doctype()}</Label>
                        {move || {
                            let current = group.get();
                            if current.is_empty() {
                                view! {
                                    <LinkSearch
                                        doctype=role.group_doctype()
                                        placeholder=format!("Search {}...", role.group_doctype().to_lowercase())
                                        on_pick=Callback::new(move |option: LinkOption| {
                                            on_change.run(FilterChange::PartnerGroup(option.value))
                                        })
                                    />
                                }
                                .into_any()
                            } else {
                                view! {
                                    <span class="partner-tag">
                                        {current}
                                        <button
                                            class="partner-tag__remove"
                                            on:click=move |_| {
                                                on_change.run(FilterChange::PartnerGroup(String::new()))
                                            }
                                        >
                                            "×"
                                        </button>
                                    </span>
                                }
                                .into_any()
                            }
                        }}
                    </Flex>
                </div>

                <div style="width: 200px;">
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Date Range"</Label>
                        <Select value=date_range>
                            {DateRangeMode::ALL
                                .into_iter()
                                .map(|mode| view! { <option value=mode.label()>{mode.label()}</option> })
                                .collect_view()}
                        </Select>
                    </Flex>
                </div>

                <Show when=move || filters.with(|f| f.shows_custom_range())>
                    <div style="min-width: 420px;">
                        <DateRangePicker
                            date_from=Signal::derive(move || filters.with(|f| f.selected_date_range.0))
                            date_to=Signal::derive(move || filters.with(|f| f.selected_date_range.1))
                            on_change=Callback::new(move |(from, to)| {
                                on_change.run(FilterChange::SelectedDateRange(from, to))
                            })
                            label="Select Date Range".to_string()
                        />
                    </div>
                </Show>
            </Flex>
        </div>
    }
}
