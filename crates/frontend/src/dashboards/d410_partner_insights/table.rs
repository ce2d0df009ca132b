//! Display model of the insights table.
//!
//! Rows are turned into plain strings here so rendering stays a dumb loop and
//! the cell content can be checked without a browser.

use contracts::dashboards::d410_partner_insights::{
    Aggregate, DetailsEcho, DocumentSlot, InsightsRow, PartnerRole,
};

use crate::shared::components::table::{format_currency, format_int};

/// Class marking the Details buttons; the table's click handler filters on it
pub const DETAILS_BUTTON_CLASS: &str = "details-btn";
pub const NO_RECORDS_MESSAGE: &str = "No records found";

/// Data carried by one Details button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsAction {
    pub partner_code: String,
    pub doctype: String,
    pub details: DetailsEcho,
}

impl DetailsAction {
    /// Value of the `data-details` attribute
    pub fn details_json(&self) -> String {
        serde_json::to_string(&self.details).unwrap_or_default()
    }

    /// Reads the action back from the `data-partner`, `data-doctype` and
    /// `data-details` attributes of a clicked button
    pub fn from_attributes(partner: &str, doctype: &str, details: &str) -> Option<Self> {
        if partner.is_empty() || doctype.is_empty() {
            return None;
        }
        let details: DetailsEcho = serde_json::from_str(details).ok()?;
        Some(Self {
            partner_code: partner.to_string(),
            doctype: doctype.to_string(),
            details,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub lines: Vec<String>,
    pub action: DetailsAction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub partner_code: String,
    /// Name, phone and email lines
    pub identity: [String; 3],
    /// One entry per [`DocumentSlot::ALL`]; `None` renders an empty cell
    pub cells: Vec<Option<CellView>>,
}

/// Header titles: the role, then the document label of every slot
pub fn column_titles(role: PartnerRole) -> Vec<&'static str> {
    std::iter::once(role.label())
        .chain(DocumentSlot::ALL.into_iter().map(|slot| role.document_label(slot)))
        .collect()
}

fn qty_line(label: &str, qty: Option<i64>) -> String {
    format!("{}: {} Qty", label, format_int(qty))
}

fn money_line(label: &str, value: Option<f64>, currency: &str) -> String {
    format!("{}: {}", label, format_currency(value, currency))
}

/// Metric lines of one cell, in display order
pub fn metric_lines(
    role: PartnerRole,
    slot: DocumentSlot,
    aggregate: &Aggregate,
    currency: &str,
) -> Vec<String> {
    let mut lines = vec![format!("Total Records: {}", aggregate.total_records)];

    match slot {
        DocumentSlot::Order | DocumentSlot::Receipt | DocumentSlot::Invoice => {
            let qty_label = match slot {
                DocumentSlot::Order => "Total Order Qty",
                DocumentSlot::Receipt => role.receipt_qty_label(),
                _ => "Total Qty",
            };
            lines.push(qty_line(qty_label, aggregate.total_qty));
            lines.push(money_line(
                "Total Taxable Amount",
                aggregate.total_taxable_amount,
                currency,
            ));
            lines.push(money_line("Total Amount", aggregate.total_amount, currency));
            if slot == DocumentSlot::Invoice {
                lines.push(money_line("Total Paid Amount", aggregate.paid_amount, currency));
                lines.push(money_line(
                    "Total Pending Amount",
                    aggregate.pending_amount,
                    currency,
                ));
            }
        }
        DocumentSlot::PaymentRequest | DocumentSlot::PaymentEntry => {
            lines.push(money_line("Total Amount", aggregate.total_amount, currency));
        }
    }

    lines
}

pub fn build_row(row: &InsightsRow, role: PartnerRole, currency: &str) -> RowView {
    let identity = [
        format!("Name: {}", row.partner_name.as_deref().unwrap_or_default()),
        format!("Phone: {}", row.mobile_no.as_deref().unwrap_or_default()),
        format!("Email ID: {}", row.email_id.as_deref().unwrap_or_default()),
    ];

    let cells = DocumentSlot::ALL
        .into_iter()
        .map(|slot| {
            row.aggregate(slot).map(|aggregate| CellView {
                lines: metric_lines(role, slot, aggregate, currency),
                action: DetailsAction {
                    partner_code: row.partner_code.clone(),
                    doctype: role.document_label(slot).to_string(),
                    details: aggregate.echo(),
                },
            })
        })
        .collect();

    RowView {
        partner_code: row.partner_code.clone(),
        identity,
        cells,
    }
}

pub fn build_rows(rows: &[InsightsRow], role: PartnerRole, currency: &str) -> Vec<RowView> {
    rows.iter().map(|row| build_row(row, role, currency)).collect()
}

/// Text of the single full-width row shown instead of data
pub fn placeholder_message(rows: &[RowView]) -> Option<&'static str> {
    rows.is_empty().then_some(NO_RECORDS_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> InsightsRow {
        let mut row = InsightsRow {
            partner_code: "C-0001".into(),
            partner_name: Some("Acme Retail".into()),
            mobile_no: None,
            email_id: Some("orders@acme.example".into()),
            ..Default::default()
        };
        row.aggregates.insert(
            DocumentSlot::Order,
            Aggregate {
                total_records: 5,
                total_qty: Some(20),
                total_taxable_amount: Some(1000.0),
                total_amount: Some(1180.0),
                ..Default::default()
            },
        );
        row.aggregates.insert(
            DocumentSlot::PaymentEntry,
            Aggregate {
                total_records: 2,
                total_amount: Some(300.0),
                ..Default::default()
            },
        );
        row
    }

    #[test]
    fn test_identity_lines_default_to_empty() {
        let view = build_row(&acme(), PartnerRole::Customer, "₹");
        assert_eq!(view.identity[0], "Name: Acme Retail");
        assert_eq!(view.identity[1], "Phone: ");
        assert_eq!(view.identity[2], "Email ID: orders@acme.example");
    }

    #[test]
    fn test_absent_aggregate_has_no_action() {
        let view = build_row(&acme(), PartnerRole::Customer, "₹");
        assert_eq!(view.cells.len(), DocumentSlot::ALL.len());
        assert!(view.cells[1].is_none());
        assert!(view.cells[2].is_none());
        assert!(view.cells[3].is_none());
    }

    #[test]
    fn test_action_carries_records_and_qty_only() {
        let view = build_row(&acme(), PartnerRole::Customer, "₹");
        let order = view.cells[0].as_ref().unwrap();
        assert_eq!(order.action.doctype, "Sales Order");
        assert_eq!(
            order.action.details_json(),
            r#"{"total_records":5,"total_qty":20}"#
        );

        let entry = view.cells[4].as_ref().unwrap();
        assert_eq!(entry.action.details_json(), r#"{"total_records":2}"#);
    }

    #[test]
    fn test_order_metric_lines() {
        let view = build_row(&acme(), PartnerRole::Customer, "₹");
        let order = view.cells[0].as_ref().unwrap();
        assert_eq!(
            order.lines,
            vec![
                "Total Records: 5",
                "Total Order Qty: 20 Qty",
                "Total Taxable Amount: ₹1,000.00",
                "Total Amount: ₹1,180.00",
            ]
        );
    }

    #[test]
    fn test_invoice_lines_default_missing_amounts() {
        let aggregate = Aggregate {
            total_records: 1,
            total_qty: Some(8),
            total_amount: Some(944.0),
            ..Default::default()
        };
        let lines = metric_lines(PartnerRole::Supplier, DocumentSlot::Invoice, &aggregate, "$");
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[2], "Total Taxable Amount: $0.00");
        assert_eq!(lines[4], "Total Paid Amount: $0.00");

        let receipt = metric_lines(PartnerRole::Supplier, DocumentSlot::Receipt, &aggregate, "$");
        assert_eq!(receipt[1], "Total Received Qty: 8 Qty");
    }

    #[test]
    fn test_empty_response_shows_placeholder() {
        let empty = build_rows(&[], PartnerRole::Customer, "₹");
        assert_eq!(placeholder_message(&empty), Some("No records found"));

        let filled = build_rows(&[acme()], PartnerRole::Customer, "₹");
        assert_eq!(placeholder_message(&filled), None);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let rows = vec![acme()];
        assert_eq!(
            build_rows(&rows, PartnerRole::Customer, "₹"),
            build_rows(&rows, PartnerRole::Customer, "₹")
        );
    }

    #[test]
    fn test_action_from_attributes() {
        let action =
            DetailsAction::from_attributes("C-0001", "Sales Order", r#"{"total_records":5,"total_qty":20}"#)
                .unwrap();
        assert_eq!(action.details.total_qty, Some(20));
        assert!(DetailsAction::from_attributes("C-0001", "Sales Order", "not json").is_none());
        assert!(DetailsAction::from_attributes("", "Sales Order", "{}").is_none());
    }

    #[test]
    fn test_column_titles_follow_role() {
        assert_eq!(
            column_titles(PartnerRole::Supplier),
            vec![
                "Supplier",
                "Purchase Order",
                "Purchase Receipt",
                "Purchase Invoice",
                "Payment Request",
                "Payment Entry",
            ]
        );
    }
}
