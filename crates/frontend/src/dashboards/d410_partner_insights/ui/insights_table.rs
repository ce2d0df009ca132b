use contracts::dashboards::d410_partner_insights::PartnerRole;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

use crate::dashboards::d410_partner_insights::table::{
    column_titles, placeholder_message, CellView, DetailsAction, RowView, DETAILS_BUTTON_CLASS,
};

/// Finds the Details button under the click and reads its data attributes
fn action_from_click(ev: &web_sys::MouseEvent) -> Option<DetailsAction> {
    let element = ev.target()?.dyn_into::<web_sys::Element>().ok()?;
    let button = element
        .closest(&format!(".{}", DETAILS_BUTTON_CLASS))
        .ok()
        .flatten()?;
    let attr = |name: &str| button.get_attribute(name).unwrap_or_default();
    DetailsAction::from_attributes(
        &attr("data-partner"),
        &attr("data-doctype"),
        &attr("data-details"),
    )
}

fn lines_view(lines: Vec<String>) -> impl IntoView {
    lines
        .into_iter()
        .map(|line| view! { <div>{line}</div> })
        .collect_view()
}

fn document_cell(cell: Option<CellView>) -> impl IntoView {
    match cell {
        Some(cell) => {
            let details = cell.action.details_json();
            view! {
                <TableCell>
                    <div class="insights-cell">
                        {lines_view(cell.lines)}
                        <button
                            class=format!("thaw-button thaw-button--secondary {}", DETAILS_BUTTON_CLASS)
                            data-partner=cell.action.partner_code
                            data-doctype=cell.action.doctype
                            data-details=details
                        >
                            "Details"
                        </button>
                    </div>
                </TableCell>
            }
            .into_any()
        }
        None => view! { <TableCell>""</TableCell> }.into_any(),
    }
}

/// The insights grid. Rows are replaced wholesale on every change.
///
/// A single click listener on the container serves every Details button,
/// so re-rendering rows never adds handlers.
#[component]
pub fn InsightsTable(
    role: PartnerRole,
    #[prop(into)] rows: Signal<Vec<RowView>>,
    on_details: Callback<DetailsAction>,
) -> impl IntoView {
    let titles = column_titles(role);
    let column_count = StoredValue::new(titles.len().to_string());

    view! {
        <div
            class="table-wrapper partner-insights-table"
            on:click=move |ev| {
                if let Some(action) = action_from_click(&ev) {
                    on_details.run(action);
                }
            }
        >
            <Table attr:style="width: 100%; min-width: 1200px;">
                <TableHeader>
                    <TableRow>
                        {titles
                            .into_iter()
                            .map(|title| view! {
                                <TableHeaderCell resizable=true min_width=200.0>{title}</TableHeaderCell>
                            })
                            .collect_view()}
                    </TableRow>
                </TableHeader>

                <TableBody>
                    {move || {
                        let data = rows.get();
                        if let Some(message) = placeholder_message(&data) {
                            return view! {
                                <TableRow>
                                    <TableCell attr:colspan=column_count.get_value()>
                                        <TableCellLayout>{message}</TableCellLayout>
                                    </TableCell>
                                </TableRow>
                            }
                            .into_any();
                        }

                        data.into_iter()
                            .map(|row| {
                                let [name, phone, email] = row.identity;
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <div class="insights-cell">
                                                <div>{name}</div>
                                                <div>{phone}</div>
                                                <div>{email}</div>
                                            </div>
                                        </TableCell>
                                        {row.cells.into_iter().map(document_cell).collect_view()}
                                    </TableRow>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </TableBody>
            </Table>
        </div>
    }
}
