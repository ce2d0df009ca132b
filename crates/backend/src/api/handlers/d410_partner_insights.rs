use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use chrono::{Local, NaiveDate};
use contracts::dashboards::d410_partner_insights::{
    DetailRequest, DetailResponse, InsightsRequest, InsightsRow, InsightsSettings, LinkOption,
    LinkOptionsQuery, PartnerRole,
};

use crate::dashboards::d410_partner_insights::{service, testdata, InsightsError};
use crate::shared::config::insights_config;
use crate::shared::data::db::get_connection;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn status_for(error: &InsightsError) -> StatusCode {
    if error.is_bad_request() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// POST /api/d410/:role/insights
pub async fn get_insights(
    Path(role): Path<PartnerRole>,
    Json(request): Json<InsightsRequest>,
) -> Result<Json<Vec<InsightsRow>>, StatusCode> {
    tracing::info!(
        "D410 Dashboard: {} insights, range {}, {} partners, group '{}'",
        role.label(),
        request.filters.date_range.label(),
        request.filters.partners.len(),
        request.filters.partner_group
    );

    match service::get_insights(get_connection(), role, &request.filters, today()).await {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            tracing::error!("D410 Dashboard: Failed to get {} insights: {}", role.code(), e);
            Err(status_for(&e))
        }
    }
}

/// POST /api/d410/:role/details
pub async fn get_details(
    Path(role): Path<PartnerRole>,
    Json(request): Json<DetailRequest>,
) -> Result<Json<DetailResponse>, StatusCode> {
    tracing::info!(
        "D410 Dashboard: {} details for {} ({} records)",
        request.doctype,
        request.partner_code,
        request.details.total_records
    );

    let currency = insights_config().currency_symbol;
    match service::get_details(get_connection(), role, &request, today(), &currency).await {
        Ok(markup) => Ok(Json(DetailResponse { markup })),
        Err(e) => {
            tracing::error!(
                "D410 Dashboard: Failed to get {} details for {}: {}",
                request.doctype,
                request.partner_code,
                e
            );
            Err(status_for(&e))
        }
    }
}

/// GET /api/d410/link_options?doctype=Customer&txt=acme
pub async fn get_link_options(
    Query(query): Query<LinkOptionsQuery>,
) -> Result<Json<Vec<LinkOption>>, StatusCode> {
    match service::get_link_options(get_connection(), &query).await {
        Ok(options) => Ok(Json(options)),
        Err(e) => {
            tracing::error!(
                "D410 Dashboard: Failed to look up {} '{}': {}",
                query.doctype,
                query.txt,
                e
            );
            Err(status_for(&e))
        }
    }
}

/// GET /api/d410/settings
pub async fn get_settings() -> Json<InsightsSettings> {
    Json(InsightsSettings {
        currency_symbol: insights_config().currency_symbol,
    })
}

/// POST /api/d410/testdata
pub async fn seed_testdata() -> Result<Json<serde_json::Value>, StatusCode> {
    match testdata::seed_demo_data(get_connection(), today()).await {
        Ok(inserted) => {
            tracing::info!("D410 Dashboard: Seeded {} demo rows", inserted);
            Ok(Json(serde_json::json!({ "inserted": inserted })))
        }
        Err(e) => {
            tracing::error!("D410 Dashboard: Failed to seed demo data: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
