use contracts::dashboards::d410_partner_insights::{
    DetailRequest, DetailResponse, InsightsFilter, InsightsRequest, InsightsRow,
    InsightsSettings, LinkOption, PartnerRole,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

const API_BASE: &str = "/api/d410";

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Per-partner aggregates for the current filters
pub async fn get_insights(
    role: PartnerRole,
    filters: &InsightsFilter,
) -> Result<Vec<InsightsRow>, String> {
    let url = format!("{}/{}/insights", API_BASE, role.code());
    let body = InsightsRequest {
        filters: filters.clone(),
    };

    let response = Request::post(&url)
        .json(&body)
        .map_err(|e| format!("Failed to build request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    read_json(response).await
}

/// HTML fragment with the breakdown behind one cell
pub async fn get_details(role: PartnerRole, request: &DetailRequest) -> Result<String, String> {
    let url = format!("{}/{}/details", API_BASE, role.code());

    let response = Request::post(&url)
        .json(request)
        .map_err(|e| format!("Failed to build request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    let data: DetailResponse = read_json(response).await?;
    Ok(data.markup)
}

/// Live-search options of a partner or group doctype
pub async fn get_link_options(doctype: &str, txt: &str) -> Result<Vec<LinkOption>, String> {
    let url = format!(
        "{}/link_options?doctype={}&txt={}",
        API_BASE,
        urlencoding::encode(doctype),
        urlencoding::encode(txt)
    );

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    read_json(response).await
}

pub async fn get_settings() -> Result<InsightsSettings, String> {
    let url = format!("{}/settings", API_BASE);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    read_json(response).await
}
