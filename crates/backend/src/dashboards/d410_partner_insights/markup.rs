//! HTML fragments shown in the details dialog.
//!
//! Every string coming from the database goes through [`escape`] before it is
//! embedded; labels and numbers are produced here.

use contracts::dashboards::d410_partner_insights::{DetailsEcho, PartnerRole};
use std::fmt::Write;

use super::repository::{ItemLine, PaymentEntryLine, PaymentRequestLine};
use crate::shared::format::{escape, format_date, format_float, format_money};

/// Heading block common to every details fragment
#[derive(Debug, Clone, Copy)]
pub struct DetailHeader<'a> {
    pub role: PartnerRole,
    pub partner_code: &'a str,
    pub document_label: &'a str,
    pub total_records: i64,
}

fn open(header: &DetailHeader<'_>, columns: &[(&str, Option<&str>)]) -> String {
    let mut html = String::from("<div class=\"partner-insights-details\">");
    let _ = write!(
        html,
        "<h5>{} Name - {}</h5><h5>Total {}: {}</h5><h4>Item Details</h4>",
        header.role.label(),
        escape(header.partner_code),
        header.document_label,
        header.total_records
    );
    html.push_str("<table class=\"table table-bordered\"><thead><tr>");
    for (title, width) in columns {
        match width {
            Some(w) => {
                let _ = write!(html, "<th width=\"{}\">{}</th>", w, title);
            }
            None => {
                let _ = write!(html, "<th>{}</th>", title);
            }
        }
    }
    html.push_str("</tr></thead><tbody>");
    html
}

fn row(html: &mut String, cells: &[String]) {
    html.push_str("<tr>");
    for cell in cells {
        let _ = write!(html, "<td>{}</td>", cell);
    }
    html.push_str("</tr>");
}

fn close(mut html: String, totals: &[String]) -> String {
    html.push_str("<tr style=\"font-weight: bold;\">");
    for cell in totals {
        let _ = write!(html, "<td>{}</td>", cell);
    }
    html.push_str("</tr></tbody></table></div>");
    html
}

fn text(value: Option<&str>) -> String {
    value.map(escape).unwrap_or_default()
}

/// Item-wise table for orders, receipts and invoices.
///
/// The quantity total repeats the figure the dashboard showed (`echo`); the
/// pending column only exists for orders.
pub fn item_details(
    header: &DetailHeader<'_>,
    lines: &[ItemLine],
    echo: &DetailsEcho,
    with_pending: bool,
    currency_symbol: &str,
) -> String {
    let mut columns = vec![("Item Code", None), ("Item Name", None), ("Qty", Some("10%"))];
    if with_pending {
        columns.push(("Pending Qty", Some("10%")));
    }
    columns.push(("Rate", Some("15%")));
    columns.push(("Total Taxable Amount", Some("15%")));

    let mut html = open(header, &columns);
    let mut summed_qty = 0.0;
    let mut pending_qty = 0.0;
    let mut total_amount = 0.0;

    for line in lines {
        let mut cells = vec![
            escape(&line.item_code),
            text(line.item_name.as_deref()),
            format_float(line.total_qty),
        ];
        if with_pending {
            cells.push(format_float(line.pending_qty.unwrap_or(0.0)));
        }
        cells.push(format_money(line.avg_rate, currency_symbol));
        cells.push(format_money(line.total_amount, currency_symbol));
        row(&mut html, &cells);

        summed_qty += line.total_qty;
        pending_qty += line.pending_qty.unwrap_or(0.0);
        total_amount += line.total_amount;
    }

    let total_qty = echo.total_qty.map(|q| q as f64).unwrap_or(summed_qty);
    let mut totals = vec!["Total".to_string(), String::new(), format_float(total_qty)];
    if with_pending {
        totals.push(format_float(pending_qty));
    }
    totals.push(String::new());
    totals.push(format_money(total_amount, currency_symbol));
    close(html, &totals)
}

pub fn payment_request_details(
    header: &DetailHeader<'_>,
    lines: &[PaymentRequestLine],
    currency_symbol: &str,
) -> String {
    let mut html = open(
        header,
        &[
            ("Payment Request Type", None),
            ("Transaction Date", None),
            ("Reference Doctype", Some("25%")),
            ("Reference Name", Some("25%")),
            ("Total Amount", Some("15%")),
        ],
    );

    let mut total_amount = 0.0;
    for line in lines {
        row(
            &mut html,
            &[
                text(line.payment_request_type.as_deref()),
                escape(&format_date(&line.transaction_date)),
                text(line.reference_doctype.as_deref()),
                text(line.reference_name.as_deref()),
                format_money(line.grand_total, currency_symbol),
            ],
        );
        total_amount += line.grand_total;
    }

    close(
        html,
        &[
            "Total".to_string(),
            String::new(),
            String::new(),
            String::new(),
            format_money(total_amount, currency_symbol),
        ],
    )
}

pub fn payment_entry_details(
    header: &DetailHeader<'_>,
    lines: &[PaymentEntryLine],
    currency_symbol: &str,
) -> String {
    let mut html = open(
        header,
        &[
            ("Payment Type", None),
            ("Transaction Date", None),
            ("Mode of Payment", Some("20%")),
            ("Unallocated Amount", Some("20%")),
            ("Paid Amount", Some("20%")),
        ],
    );

    let mut unallocated = 0.0;
    let mut paid = 0.0;
    for line in lines {
        row(
            &mut html,
            &[
                text(line.payment_type.as_deref()),
                escape(&format_date(&line.posting_date)),
                text(line.mode_of_payment.as_deref()),
                format_money(line.unallocated_amount, currency_symbol),
                format_money(line.paid_amount, currency_symbol),
            ],
        );
        unallocated += line.unallocated_amount;
        paid += line.paid_amount;
    }

    close(
        html,
        &[
            "Total".to_string(),
            String::new(),
            String::new(),
            format_money(unallocated, currency_symbol),
            format_money(paid, currency_symbol),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(label: &'static str) -> DetailHeader<'static> {
        DetailHeader {
            role: PartnerRole::Customer,
            partner_code: "C-0001",
            document_label: label,
            total_records: 2,
        }
    }

    fn widget() -> ItemLine {
        ItemLine {
            item_code: "ITEM-WIDGET".into(),
            item_name: Some("Widget<XL>".into()),
            total_qty: 20.0,
            pending_qty: Some(5.0),
            avg_rate: 100.0,
            total_amount: 2000.0,
        }
    }

    #[test]
    fn test_order_details_have_pending_column_and_totals() {
        let echo = DetailsEcho {
            total_records: 2,
            total_qty: Some(30),
        };
        let html = item_details(&header("Sales Order"), &[widget()], &echo, true, "₹");

        assert!(html.starts_with("<div"));
        assert!(html.ends_with("</div>"));
        assert!(html.contains("<h5>Customer Name - C-0001</h5>"));
        assert!(html.contains("<h5>Total Sales Order: 2</h5>"));
        assert!(html.contains("<th width=\"10%\">Pending Qty</th>"));
        assert!(html.contains("<td>5.00</td>"));
        // echoed quantity wins over the summed lines
        assert!(html.contains("<td>30.00</td>"));
        assert!(html.contains("<td>₹ 2,000.00</td>"));
        assert!(html.contains("font-weight: bold;"));
    }

    #[test]
    fn test_item_names_are_escaped() {
        let echo = DetailsEcho::default();
        let html = item_details(&header("Delivery Note"), &[widget()], &echo, false, "₹");
        assert!(html.contains("Widget&lt;XL&gt;"));
        assert!(!html.contains("<XL>"));
        assert!(!html.contains("Pending Qty"));
    }

    #[test]
    fn test_payment_entry_totals() {
        let lines = vec![
            PaymentEntryLine {
                payment_type: Some("Receive".into()),
                posting_date: "2026-10-14".into(),
                mode_of_payment: Some("Cash".into()),
                unallocated_amount: 50.0,
                paid_amount: 1000.0,
            },
            PaymentEntryLine {
                payment_type: Some("Receive".into()),
                posting_date: "2026-10-12".into(),
                mode_of_payment: None,
                unallocated_amount: 0.0,
                paid_amount: 500.0,
            },
        ];
        let html = payment_entry_details(&header("Payment Entry"), &lines, "$");
        assert!(html.contains("<td>14-10-2026</td>"));
        assert!(html.contains("<td>$ 1,500.00</td>"));
        assert!(html.contains("<td>$ 50.00</td>"));
    }

    #[test]
    fn test_payment_request_columns() {
        let lines = vec![PaymentRequestLine {
            payment_request_type: Some("Inward".into()),
            transaction_date: "2026-10-14".into(),
            reference_doctype: Some("Sales Invoice".into()),
            reference_name: Some("SINV-0001".into()),
            grand_total: 1180.0,
        }];
        let html = payment_request_details(&header("Payment Request"), &lines, "₹");
        assert!(html.contains("<th>Payment Request Type</th>"));
        assert!(html.contains("<td>SINV-0001</td>"));
        assert!(html.contains("<td>₹ 1,180.00</td>"));
    }
}
