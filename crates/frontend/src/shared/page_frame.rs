//! PageFrame: standard root wrapper for every dashboard page.
//!
//! Sets two metadata attributes on the root DOM element:
//!   - `id`: `"{entity}--{category}"`, e.g. `"d410_customer_insights--dashboard"`
//!   - `data-page-category`: currently always `dashboard`

use leptos::prelude::*;

pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`
    page_id: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            id=page_id
            class="page page--dashboard"
            data-page-category=PAGE_CAT_DASHBOARD
        >
            {children()}
        </div>
    }
}
