use chrono::NaiveDate;
use contracts::dashboards::d410_partner_insights::{
    Aggregate, DetailRequest, DocumentSlot, InsightsFilter, InsightsRow, LinkOption,
    LinkOptionsQuery, PartnerRole,
};
use sea_orm::DatabaseConnection;
use std::collections::{BTreeMap, HashMap};

use super::error::InsightsError;
use super::markup::{self, DetailHeader};
use super::repository::{self, AggregateRecord, LinkTarget};

/// Upper bound of options returned by one lookup
pub const LINK_OPTIONS_LIMIT: u64 = 20;

/// Per-partner totals of the five document kinds in the filtered period.
///
/// Partners without a single submitted document in the period are left out.
pub async fn get_insights(
    db: &DatabaseConnection,
    role: PartnerRole,
    filter: &InsightsFilter,
    today: NaiveDate,
) -> Result<Vec<InsightsRow>, InsightsError> {
    let (date_from, date_to) = filter.resolve_period(today);
    let partners = repository::find_partners(db, role, filter).await?;
    if partners.is_empty() {
        return Ok(Vec::new());
    }

    // One grouped query per document kind
    let mut by_slot: Vec<(DocumentSlot, HashMap<String, AggregateRecord>)> = Vec::new();
    for slot in DocumentSlot::ALL {
        let records = repository::aggregate_by_party(db, role, slot, date_from, date_to).await?;
        let indexed = records.into_iter().map(|r| (r.party.clone(), r)).collect();
        by_slot.push((slot, indexed));
    }

    let rows: Vec<InsightsRow> = partners
        .into_iter()
        .filter_map(|partner| {
            let aggregates: BTreeMap<DocumentSlot, Aggregate> = by_slot
                .iter()
                .filter_map(|(slot, records)| {
                    records
                        .get(&partner.code)
                        .and_then(|record| to_aggregate(*slot, record))
                        .map(|aggregate| (*slot, aggregate))
                })
                .collect();

            if aggregates.is_empty() {
                return None;
            }
            Some(InsightsRow {
                partner_code: partner.code,
                partner_name: partner.partner_name,
                mobile_no: partner.mobile_no,
                email_id: partner.email_id,
                aggregates,
            })
        })
        .collect();

    tracing::info!(
        "D410 {} insights {}..{}: {} rows",
        role.label(),
        date_from,
        date_to,
        rows.len()
    );
    Ok(rows)
}

/// Shapes a raw record into the wire aggregate of its slot
fn to_aggregate(slot: DocumentSlot, record: &AggregateRecord) -> Option<Aggregate> {
    if record.total_records <= 0 {
        return None;
    }

    let invoice = slot == DocumentSlot::Invoice;
    Some(Aggregate {
        total_records: record.total_records,
        total_qty: (!slot.is_payment()).then(|| record.total_qty.unwrap_or(0.0) as i64),
        total_taxable_amount: (!slot.is_payment())
            .then(|| record.total_taxable_amount.unwrap_or(0.0)),
        total_amount: Some(record.total_amount.unwrap_or(0.0)),
        paid_amount: invoice.then(|| record.paid_amount.unwrap_or(0.0)),
        pending_amount: invoice.then(|| record.pending_amount.unwrap_or(0.0)),
    })
}

/// Renders the details fragment of one partner and document kind
pub async fn get_details(
    db: &DatabaseConnection,
    role: PartnerRole,
    request: &DetailRequest,
    today: NaiveDate,
    currency_symbol: &str,
) -> Result<String, InsightsError> {
    let slot = role
        .slot_for_label(&request.doctype)
        .ok_or_else(|| InsightsError::UnknownDocumentType(request.doctype.clone()))?;
    let (date_from, date_to) = request.filters.resolve_period(today);
    let partner = request.partner_code.as_str();

    let header = DetailHeader {
        role,
        partner_code: partner,
        document_label: role.document_label(slot),
        total_records: request.details.total_records,
    };

    let markup = match slot {
        DocumentSlot::Order | DocumentSlot::Receipt | DocumentSlot::Invoice => {
            let lines =
                repository::item_lines(db, role, slot, partner, date_from, date_to).await?;
            markup::item_details(
                &header,
                &lines,
                &request.details,
                slot == DocumentSlot::Order,
                currency_symbol,
            )
        }
        DocumentSlot::PaymentRequest => {
            let lines =
                repository::payment_request_lines(db, role, partner, date_from, date_to).await?;
            markup::payment_request_details(&header, &lines, currency_symbol)
        }
        DocumentSlot::PaymentEntry => {
            let lines =
                repository::payment_entry_lines(db, role, partner, date_from, date_to).await?;
            markup::payment_entry_details(&header, &lines, currency_symbol)
        }
    };

    Ok(markup)
}

pub async fn get_link_options(
    db: &DatabaseConnection,
    query: &LinkOptionsQuery,
) -> Result<Vec<LinkOption>, InsightsError> {
    let target = LinkTarget::from_doctype(&query.doctype)
        .ok_or_else(|| InsightsError::UnknownLinkDoctype(query.doctype.clone()))?;
    let options = repository::link_options(db, target, &query.txt, LINK_OPTIONS_LIMIT).await?;
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d410_partner_insights::testdata;
    use crate::shared::data::db::test_connection;
    use contracts::dashboards::d410_partner_insights::{DateRangeMode, DetailsEcho};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    async fn seeded() -> DatabaseConnection {
        let db = test_connection().await;
        testdata::seed_demo_data(&db, today()).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_customer_insights_last_week() {
        let db = seeded().await;
        let filter = InsightsFilter::new(today());

        let rows = get_insights(&db, PartnerRole::Customer, &filter, today())
            .await
            .unwrap();
        let codes: Vec<&str> = rows.iter().map(|r| r.partner_code.as_str()).collect();
        assert_eq!(codes, vec!["C-0001", "C-0002"]);

        let acme = &rows[0];
        assert_eq!(acme.partner_name.as_deref(), Some("Acme Retail"));
        assert_eq!(acme.aggregates.len(), 5);

        let order = acme.aggregate(DocumentSlot::Order).unwrap();
        assert_eq!(order.total_records, 2);
        assert_eq!(order.total_qty, Some(30));
        assert_eq!(order.total_taxable_amount, Some(3000.0));
        assert!(order.paid_amount.is_none());

        let invoice = acme.aggregate(DocumentSlot::Invoice).unwrap();
        assert_eq!(invoice.paid_amount, Some(1000.0));
        assert_eq!(invoice.pending_amount, Some(180.0));

        let entry = acme.aggregate(DocumentSlot::PaymentEntry).unwrap();
        assert_eq!(entry.total_amount, Some(1000.0));
        assert!(entry.total_qty.is_none());
        assert!(entry.total_taxable_amount.is_none());

        let globex = &rows[1];
        assert_eq!(globex.aggregates.len(), 1);
        assert!(globex.aggregate(DocumentSlot::Order).is_some());
    }

    #[tokio::test]
    async fn test_longer_period_picks_up_old_orders() {
        let db = seeded().await;
        let mut filter = InsightsFilter::new(today());
        filter.date_range = DateRangeMode::LastYear;
        filter.partners = vec!["C-0001".into()];

        let rows = get_insights(&db, PartnerRole::Customer, &filter, today())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].aggregate(DocumentSlot::Order).unwrap().total_records, 3);
    }

    #[tokio::test]
    async fn test_group_without_documents_is_empty() {
        let db = seeded().await;
        let mut filter = InsightsFilter::new(today());
        filter.partner_group = "Hardware".into();

        let rows = get_insights(&db, PartnerRole::Supplier, &filter, today())
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_supplier_insights() {
        let db = seeded().await;
        let filter = InsightsFilter::new(today());

        let rows = get_insights(&db, PartnerRole::Supplier, &filter, today())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        let northwind = &rows[0];
        assert_eq!(northwind.partner_code, "S-0001");
        assert_eq!(northwind.aggregate(DocumentSlot::Receipt).unwrap().total_qty, Some(3));
        assert_eq!(
            northwind.aggregate(DocumentSlot::PaymentEntry).unwrap().total_amount,
            Some(800.0)
        );
        assert!(northwind.aggregate(DocumentSlot::PaymentRequest).is_none());
    }

    #[tokio::test]
    async fn test_details_for_sales_order() {
        let db = seeded().await;
        let request = DetailRequest {
            partner_code: "C-0001".into(),
            doctype: "Sales Order".into(),
            details: DetailsEcho {
                total_records: 2,
                total_qty: Some(30),
            },
            filters: InsightsFilter::new(today()),
        };

        let markup = get_details(&db, PartnerRole::Customer, &request, today(), "₹")
            .await
            .unwrap();
        assert!(markup.contains("<h5>Total Sales Order: 2</h5>"));
        assert!(markup.contains("ITEM-GADGET"));
        assert!(markup.contains("Pending Qty"));
        assert!(markup.contains("₹ 3,000.00"));
    }

    #[tokio::test]
    async fn test_details_reject_other_role_doctype() {
        let db = seeded().await;
        let request = DetailRequest {
            partner_code: "S-0001".into(),
            doctype: "Sales Order".into(),
            details: DetailsEcho::default(),
            filters: InsightsFilter::new(today()),
        };

        let err = get_details(&db, PartnerRole::Supplier, &request, today(), "₹")
            .await
            .unwrap_err();
        assert!(matches!(err, InsightsError::UnknownDocumentType(_)));
        assert!(err.is_bad_request());
    }

    #[tokio::test]
    async fn test_link_options_reject_unknown_doctype() {
        let db = seeded().await;
        let query = LinkOptionsQuery {
            doctype: "Item".into(),
            txt: String::new(),
        };
        let err = get_link_options(&db, &query).await.unwrap_err();
        assert!(matches!(err, InsightsError::UnknownLinkDoctype(_)));

        let query = LinkOptionsQuery {
            doctype: "Customer Group".into(),
            txt: "ret".into(),
        };
        let options = get_link_options(&db, &query).await.unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].value, "Retail");
    }

    #[test]
    fn test_empty_record_has_no_aggregate() {
        let record = AggregateRecord {
            party: "C-0001".into(),
            ..Default::default()
        };
        assert!(to_aggregate(DocumentSlot::Order, &record).is_none());
    }
}
