use chrono::Local;
use contracts::dashboards::d410_partner_insights::{
    InsightsFilter, InsightsSettings, PartnerRole,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::detail_dialog::DetailDialogView;
use super::filter_form::FilterForm;
use super::insights_table::InsightsTable;
use crate::dashboards::d410_partner_insights::api;
use crate::dashboards::d410_partner_insights::model::{
    detail_request, DetailDialog, DetailSequence, FetchTicket, FilterChange, InsightsController,
};
use crate::dashboards::d410_partner_insights::table::{build_rows, DetailsAction};
use crate::shared::page_frame::PageFrame;

fn page_id(role: PartnerRole) -> &'static str {
    match role {
        PartnerRole::Customer => "d410_customer_insights--dashboard",
        PartnerRole::Supplier => "d410_supplier_insights--dashboard",
    }
}

/// Customer or Supplier Insights, depending on `role`
#[component]
pub fn PartnerInsightsPage(role: PartnerRole) -> impl IntoView {
    let today = Local::now().date_naive();
    let controller = RwSignal::new(InsightsController::new(InsightsFilter::new(today)));
    let currency = RwSignal::new(InsightsSettings::default().currency_symbol);

    let dialog = RwSignal::new(None::<DetailDialog>);
    let dialog_open = RwSignal::new(false);
    let detail_seq = StoredValue::new(DetailSequence::default());
    let (detail_error, set_detail_error) = signal(None::<String>);

    let run = move |ticket: FetchTicket| {
        spawn_local(async move {
            let result = api::get_insights(role, &ticket.filters).await;
            if let Err(e) = &result {
                log::error!("D410: {} insights request #{} failed: {}", role.code(), ticket.seq, e);
            }
            let applied = controller.try_update(|c| c.complete(ticket.seq, result));
            if applied != Some(true) {
                log::debug!("D410: dropped stale insights response #{}", ticket.seq);
            }
        });
    };

    // Settings and the first fetch on mount
    Effect::new(move |_| {
        spawn_local(async move {
            match api::get_settings().await {
                Ok(settings) => currency.set(settings.currency_symbol),
                Err(e) => log::warn!("D410: failed to load settings, keeping defaults: {}", e),
            }
        });
        if let Some(ticket) = controller.try_update(|c| c.issue()) {
            run(ticket);
        }
    });

    let on_filter_change = Callback::new(move |change: FilterChange| {
        if let Some(ticket) = controller.try_update(|c| c.apply(change)) {
            run(ticket);
        }
    });

    let on_details = Callback::new(move |action: DetailsAction| {
        let request = controller.with_untracked(|c| detail_request(&action, c.filters()));
        set_detail_error.set(None);
        let seq = detail_seq.try_update_value(|s| s.next()).unwrap_or_default();
        spawn_local(async move {
            let result = api::get_details(role, &request).await;
            if !detail_seq.with_value(|s| s.is_latest(seq)) {
                log::debug!("D410: dropped stale details response #{}", seq);
                return;
            }
            match result {
                Ok(markup) => {
                    dialog.set(Some(DetailDialog::new(&request.doctype, markup)));
                    dialog_open.set(true);
                }
                Err(e) => {
                    log::error!(
                        "D410: {} details for {} failed: {}",
                        request.doctype,
                        request.partner_code,
                        e
                    );
                    set_detail_error.set(Some(e));
                }
            }
        });
    });

    let filters = Signal::derive(move || controller.with(|c| c.filters().clone()));
    let rows = Signal::derive(move || {
        let symbol = currency.get();
        controller.with(|c| build_rows(c.rows(), role, &symbol))
    });
    let busy = Signal::derive(move || controller.with(|c| c.is_busy()));
    let error = Signal::derive(move || {
        controller
            .with(|c| c.error().map(str::to_string))
            .or_else(|| detail_error.get())
    });

    view! {
        <PageFrame page_id=page_id(role)>
            <div class="page__header">
                <h2 class="page__title">{role.page_title()}</h2>
            </div>

            <div class="page__content">
                <FilterForm role=role filters=filters on_change=on_filter_change />

                {move || {
                    error.get().map(|e| view! {
                        <div class="alert alert--error">{format!("Error: {}", e)}</div>
                    })
                }}

                <InsightsTable role=role rows=rows on_details=on_details />
            </div>

            <Show when=move || busy.get()>
                <div class="busy-overlay">
                    <Flex vertical=true align=FlexAlign::Center gap=FlexGap::Small>
                        <Spinner />
                        <span>{role.busy_message()}</span>
                    </Flex>
                </div>
            </Show>

            <DetailDialogView open=dialog_open dialog=dialog />
        </PageFrame>
    }
}
