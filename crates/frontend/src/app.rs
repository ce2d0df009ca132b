use contracts::dashboards::d410_partner_insights::PartnerRole;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;
use thaw::ConfigProvider;

use crate::dashboards::PartnerInsightsPage;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ConfigProvider>
            <Router>
                <nav class="app-nav">
                    <A href="/customer-insights">{PartnerRole::Customer.page_title()}</A>
                    <A href="/supplier-insights">{PartnerRole::Supplier.page_title()}</A>
                </nav>
                <main class="app-main">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route
                            path=path!("/")
                            view=|| view! { <PartnerInsightsPage role=PartnerRole::Customer /> }
                        />
                        <Route
                            path=path!("/customer-insights")
                            view=|| view! { <PartnerInsightsPage role=PartnerRole::Customer /> }
                        />
                        <Route
                            path=path!("/supplier-insights")
                            view=|| view! { <PartnerInsightsPage role=PartnerRole::Supplier /> }
                        />
                    </Routes>
                </main>
            </Router>
        </ConfigProvider>
    }
}
