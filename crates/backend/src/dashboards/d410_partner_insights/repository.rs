use anyhow::Result;
use chrono::NaiveDate;
use contracts::dashboards::d410_partner_insights::{
    DocumentSlot, InsightsFilter, LinkOption, PartnerRole,
};
use sea_orm::{DatabaseBackend, DatabaseConnection, FromQueryResult, Statement, Value};

use super::tables::{document_table, party_table};

/// Partner master data
#[derive(Debug, Clone, FromQueryResult)]
pub struct PartnerRecord {
    pub code: String,
    pub partner_name: Option<String>,
    pub mobile_no: Option<String>,
    pub email_id: Option<String>,
}

/// Raw per-partner totals of one document table
#[derive(Debug, Clone, Default, FromQueryResult)]
pub struct AggregateRecord {
    pub party: String,
    pub total_records: i64,
    pub total_qty: Option<f64>,
    pub total_taxable_amount: Option<f64>,
    pub total_amount: Option<f64>,
    pub paid_amount: Option<f64>,
    pub pending_amount: Option<f64>,
}

/// Item-wise totals of orders, receipts and invoices
#[derive(Debug, Clone, FromQueryResult)]
pub struct ItemLine {
    pub item_code: String,
    pub item_name: Option<String>,
    pub total_qty: f64,
    /// Only orders track fulfilment
    pub pending_qty: Option<f64>,
    pub avg_rate: f64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct PaymentRequestLine {
    pub payment_request_type: Option<String>,
    pub transaction_date: String,
    pub reference_doctype: Option<String>,
    pub reference_name: Option<String>,
    pub grand_total: f64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct PaymentEntryLine {
    pub payment_type: Option<String>,
    pub posting_date: String,
    pub mode_of_payment: Option<String>,
    pub unallocated_amount: f64,
    pub paid_amount: f64,
}

fn date_value(date: NaiveDate) -> Value {
    date.format("%Y-%m-%d").to_string().into()
}

/// Partners of the role narrowed by the group and partner filters
pub async fn find_partners(
    db: &DatabaseConnection,
    role: PartnerRole,
    filter: &InsightsFilter,
) -> Result<Vec<PartnerRecord>> {
    let party = party_table(role);

    let mut sql = format!(
        "SELECT name AS code, {} AS partner_name, mobile_no, email_id FROM {} WHERE 1 = 1",
        party.name_column, party.table
    );
    let mut values: Vec<Value> = Vec::new();

    if let Some(group) = filter.partner_group() {
        sql.push_str(&format!(" AND {} = ?", party.group_column));
        values.push(group.into());
    }

    if !filter.partners.is_empty() {
        let placeholders = vec!["?"; filter.partners.len()].join(", ");
        sql.push_str(&format!(" AND name IN ({})", placeholders));
        values.extend(filter.partners.iter().map(|p| Value::from(p.as_str())));
    }

    sql.push_str(" ORDER BY name");

    let stmt = Statement::from_sql_and_values(DatabaseBackend::Sqlite, &sql, values);
    let partners = PartnerRecord::find_by_statement(stmt).all(db).await?;
    Ok(partners)
}

/// Totals of submitted documents in the period, grouped by partner
pub async fn aggregate_by_party(
    db: &DatabaseConnection,
    role: PartnerRole,
    slot: DocumentSlot,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> Result<Vec<AggregateRecord>> {
    let doc = document_table(role, slot);

    let measures = if slot.is_payment() {
        let amount_column = match slot {
            DocumentSlot::PaymentEntry => "paid_amount",
            _ => "grand_total",
        };
        format!(
            "NULL AS total_qty, NULL AS total_taxable_amount, SUM({}) AS total_amount, \
             NULL AS paid_amount, NULL AS pending_amount",
            amount_column
        )
    } else if doc.has_outstanding {
        "SUM(total_qty) AS total_qty, SUM(total) AS total_taxable_amount, \
         SUM(grand_total) AS total_amount, \
         SUM(grand_total - outstanding_amount) AS paid_amount, \
         SUM(outstanding_amount) AS pending_amount"
            .to_string()
    } else {
        "SUM(total_qty) AS total_qty, SUM(total) AS total_taxable_amount, \
         SUM(grand_total) AS total_amount, NULL AS paid_amount, NULL AS pending_amount"
            .to_string()
    };

    let mut sql = format!(
        "SELECT {party} AS party, COUNT(*) AS total_records, {measures} \
         FROM {table} \
         WHERE docstatus = 1 AND {date} >= ? AND {date} <= ?",
        party = doc.party_column,
        measures = measures,
        table = doc.table,
        date = doc.date_column,
    );
    let mut values = vec![date_value(date_from), date_value(date_to)];

    if let Some(party_type) = doc.party_type {
        sql.push_str(" AND party_type = ?");
        values.push(party_type.into());
    }
    sql.push_str(&format!(" GROUP BY {}", doc.party_column));

    let stmt = Statement::from_sql_and_values(DatabaseBackend::Sqlite, &sql, values);
    let records = AggregateRecord::find_by_statement(stmt).all(db).await?;
    Ok(records)
}

/// Item-wise breakdown of one partner's orders, receipts or invoices
pub async fn item_lines(
    db: &DatabaseConnection,
    role: PartnerRole,
    slot: DocumentSlot,
    partner_code: &str,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> Result<Vec<ItemLine>> {
    let doc = document_table(role, slot);
    let Some(item_table) = doc.item_table else {
        return Ok(Vec::new());
    };

    let pending = match doc.fulfilled_qty_column {
        Some(column) => format!("SUM(i.qty - i.{}) AS pending_qty", column),
        None => "NULL AS pending_qty".to_string(),
    };

    let sql = format!(
        "SELECT \
            i.item_code AS item_code, \
            MAX(i.item_name) AS item_name, \
            SUM(i.qty) AS total_qty, \
            {pending}, \
            AVG(i.rate) AS avg_rate, \
            SUM(i.amount) AS total_amount \
         FROM {item_table} i \
         JOIN {table} d ON i.parent = d.name \
         WHERE d.{party} = ? \
           AND d.docstatus = 1 \
           AND d.{date} >= ? \
           AND d.{date} <= ? \
         GROUP BY i.item_code \
         ORDER BY i.item_code",
        pending = pending,
        item_table = item_table,
        table = doc.table,
        party = doc.party_column,
        date = doc.date_column,
    );

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        &sql,
        [partner_code.into(), date_value(date_from), date_value(date_to)],
    );
    let lines = ItemLine::find_by_statement(stmt).all(db).await?;
    Ok(lines)
}

pub async fn payment_request_lines(
    db: &DatabaseConnection,
    role: PartnerRole,
    partner_code: &str,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> Result<Vec<PaymentRequestLine>> {
    let sql = r#"
        SELECT
            payment_request_type,
            transaction_date,
            reference_doctype,
            reference_name,
            grand_total
        FROM payment_request
        WHERE party_type = ?
            AND party = ?
            AND docstatus = 1
            AND transaction_date >= ?
            AND transaction_date <= ?
        ORDER BY transaction_date, name
    "#;

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        sql,
        [
            role.label().into(),
            partner_code.into(),
            date_value(date_from),
            date_value(date_to),
        ],
    );
    let lines = PaymentRequestLine::find_by_statement(stmt).all(db).await?;
    Ok(lines)
}

pub async fn payment_entry_lines(
    db: &DatabaseConnection,
    role: PartnerRole,
    partner_code: &str,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> Result<Vec<PaymentEntryLine>> {
    let sql = r#"
        SELECT
            payment_type,
            posting_date,
            mode_of_payment,
            unallocated_amount,
            paid_amount
        FROM payment_entry
        WHERE party_type = ?
            AND party = ?
            AND docstatus = 1
            AND posting_date >= ?
            AND posting_date <= ?
        ORDER BY posting_date, name
    "#;

    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        sql,
        [
            role.label().into(),
            partner_code.into(),
            date_value(date_from),
            date_value(date_to),
        ],
    );
    let lines = PaymentEntryLine::find_by_statement(stmt).all(db).await?;
    Ok(lines)
}

/// What a link lookup searches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    Partner(PartnerRole),
    Group(PartnerRole),
}

impl LinkTarget {
    pub fn from_doctype(doctype: &str) -> Option<Self> {
        PartnerRole::ALL.into_iter().find_map(|role| {
            if doctype == role.partner_doctype() {
                Some(LinkTarget::Partner(role))
            } else if doctype == role.group_doctype() {
                Some(LinkTarget::Group(role))
            } else {
                None
            }
        })
    }
}

/// Live-search options for the partner and group pickers
pub async fn link_options(
    db: &DatabaseConnection,
    target: LinkTarget,
    txt: &str,
    limit: u64,
) -> Result<Vec<LinkOption>> {
    #[derive(Debug, FromQueryResult)]
    struct OptionRow {
        value: String,
        label: Option<String>,
    }

    let pattern = format!("%{}%", txt.trim());
    let (sql, values): (String, Vec<Value>) = match target {
        LinkTarget::Partner(role) => {
            let party = party_table(role);
            (
                format!(
                    "SELECT name AS value, {name} AS label FROM {table} \
                     WHERE name LIKE ? OR {name} LIKE ? \
                     ORDER BY name LIMIT ?",
                    name = party.name_column,
                    table = party.table,
                ),
                vec![
                    pattern.clone().into(),
                    pattern.into(),
                    (limit as i64).into(),
                ],
            )
        }
        LinkTarget::Group(role) => {
            let party = party_table(role);
            (
                format!(
                    "SELECT name AS value, NULL AS label FROM {} \
                     WHERE name LIKE ? ORDER BY name LIMIT ?",
                    party.group_table
                ),
                vec![pattern.into(), (limit as i64).into()],
            )
        }
    };

    let stmt = Statement::from_sql_and_values(DatabaseBackend::Sqlite, &sql, values);
    let rows = OptionRow::find_by_statement(stmt).all(db).await?;

    Ok(rows
        .into_iter()
        .map(|r| LinkOption {
            label: r
                .label
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| r.value.clone()),
            value: r.value,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d410_partner_insights::testdata;
    use crate::shared::data::db::test_connection;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    #[tokio::test]
    async fn test_find_partners_by_group_and_code() {
        let db = test_connection().await;
        testdata::seed_demo_data(&db, today()).await.unwrap();

        let mut filter = InsightsFilter::new(today());
        let all = find_partners(&db, PartnerRole::Customer, &filter).await.unwrap();
        assert_eq!(all.len(), 3);

        filter.partner_group = "Retail".into();
        let retail = find_partners(&db, PartnerRole::Customer, &filter).await.unwrap();
        assert!(retail.iter().all(|p| p.code != "C-0002"));

        filter.partner_group.clear();
        filter.partners = vec!["C-0002".into()];
        let one = find_partners(&db, PartnerRole::Customer, &filter).await.unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].partner_name.as_deref(), Some("Globex Wholesale"));
    }

    #[tokio::test]
    async fn test_aggregate_skips_drafts_and_out_of_period() {
        let db = test_connection().await;
        testdata::seed_demo_data(&db, today()).await.unwrap();

        let from = today() - chrono::Duration::days(7);
        let records = aggregate_by_party(&db, PartnerRole::Customer, DocumentSlot::Order, from, today())
            .await
            .unwrap();
        let acme = records.iter().find(|r| r.party == "C-0001").unwrap();
        // SO-0001 and SO-0002 are submitted and recent; SO-0003 is a draft, SO-0004 is old
        assert_eq!(acme.total_records, 2);
        assert_eq!(acme.total_qty, Some(30.0));
        assert_eq!(acme.total_amount, Some(3540.0));
        assert!(acme.paid_amount.is_none());
    }

    #[tokio::test]
    async fn test_payment_aggregate_respects_party_type() {
        let db = test_connection().await;
        testdata::seed_demo_data(&db, today()).await.unwrap();

        let from = today() - chrono::Duration::days(30);
        let customers = aggregate_by_party(
            &db,
            PartnerRole::Customer,
            DocumentSlot::PaymentEntry,
            from,
            today(),
        )
        .await
        .unwrap();
        assert!(customers.iter().all(|r| r.party.starts_with("C-")));
        assert!(customers.iter().all(|r| r.total_qty.is_none()));

        let suppliers = aggregate_by_party(
            &db,
            PartnerRole::Supplier,
            DocumentSlot::PaymentEntry,
            from,
            today(),
        )
        .await
        .unwrap();
        assert!(suppliers.iter().all(|r| r.party.starts_with("S-")));
    }

    #[tokio::test]
    async fn test_item_lines_group_by_item() {
        let db = test_connection().await;
        testdata::seed_demo_data(&db, today()).await.unwrap();

        let from = today() - chrono::Duration::days(7);
        let lines = item_lines(&db, PartnerRole::Customer, DocumentSlot::Order, "C-0001", from, today())
            .await
            .unwrap();
        assert_eq!(lines.len(), 2);
        let widget = lines.iter().find(|l| l.item_code == "ITEM-WIDGET").unwrap();
        assert_eq!(widget.total_qty, 20.0);
        assert_eq!(widget.pending_qty, Some(5.0));

        let receipts = item_lines(&db, PartnerRole::Customer, DocumentSlot::Receipt, "C-0001", from, today())
            .await
            .unwrap();
        assert!(receipts.iter().all(|l| l.pending_qty.is_none()));
    }

    #[tokio::test]
    async fn test_link_options_search() {
        let db = test_connection().await;
        testdata::seed_demo_data(&db, today()).await.unwrap();

        let options = link_options(&db, LinkTarget::Partner(PartnerRole::Customer), "acme", 20)
            .await
            .unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].value, "C-0001");
        assert_eq!(options[0].label, "Acme Retail");

        let groups = link_options(&db, LinkTarget::Group(PartnerRole::Supplier), "", 20)
            .await
            .unwrap();
        assert!(!groups.is_empty());
        assert!(groups.iter().all(|g| g.label == g.value));
    }

    #[test]
    fn test_link_target_from_doctype() {
        assert_eq!(
            LinkTarget::from_doctype("Supplier Group"),
            Some(LinkTarget::Group(PartnerRole::Supplier))
        );
        assert_eq!(
            LinkTarget::from_doctype("Customer"),
            Some(LinkTarget::Partner(PartnerRole::Customer))
        );
        assert_eq!(LinkTarget::from_doctype("Item"), None);
    }
}
