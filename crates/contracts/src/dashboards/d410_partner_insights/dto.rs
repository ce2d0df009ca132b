use super::filter::InsightsFilter;
use super::role::DocumentSlot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `POST /api/d410/{role}/insights`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsRequest {
    pub filters: InsightsFilter,
}

/// Summary totals of one document type for one partner.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Aggregate {
    pub total_records: i64,
    /// Absent for payment documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_qty: Option<i64>,
    /// Absent for payment documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_taxable_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    /// Invoice only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<f64>,
    /// Invoice only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_amount: Option<f64>,
}

impl Aggregate {
    /// The subset echoed back by the Details action
    pub fn echo(&self) -> DetailsEcho {
        DetailsEcho {
            total_records: self.total_records,
            total_qty: self.total_qty,
        }
    }
}

/// One partner with activity inside the filtered period.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InsightsRow {
    pub partner_code: String,
    pub partner_name: Option<String>,
    pub mobile_no: Option<String>,
    pub email_id: Option<String>,
    /// A missing slot means the partner has no such documents
    #[serde(default)]
    pub aggregates: BTreeMap<DocumentSlot, Aggregate>,
}

impl InsightsRow {
    pub fn aggregate(&self, slot: DocumentSlot) -> Option<&Aggregate> {
        self.aggregates.get(&slot)
    }
}

/// `{total_records, total_qty}` carried by the Details action and sent back
/// with the detail request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetailsEcho {
    pub total_records: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_qty: Option<i64>,
}

/// Body of `POST /api/d410/{role}/details`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRequest {
    pub partner_code: String,
    /// Document label as shown in the column header, e.g. "Sales Order"
    pub doctype: String,
    pub details: DetailsEcho,
    pub filters: InsightsFilter,
}

/// Pre-rendered detail markup, shown verbatim in the dialog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailResponse {
    pub markup: String,
}

/// Query of `GET /api/d410/link_options`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkOptionsQuery {
    pub doctype: String,
    #[serde(default)]
    pub txt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkOption {
    pub value: String,
    pub label: String,
}

/// Display settings served by `GET /api/d410/settings`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightsSettings {
    pub currency_symbol: String,
}

impl Default for InsightsSettings {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_echo_keeps_only_records_and_qty() {
        let aggregate = Aggregate {
            total_records: 5,
            total_qty: Some(20),
            total_taxable_amount: Some(1000.0),
            total_amount: Some(1180.0),
            paid_amount: Some(500.0),
            pending_amount: Some(680.0),
        };
        let json = serde_json::to_value(aggregate.echo()).unwrap();
        assert_eq!(json, serde_json::json!({"total_records": 5, "total_qty": 20}));
    }

    #[test]
    fn test_payment_echo_omits_qty() {
        let aggregate = Aggregate {
            total_records: 2,
            total_amount: Some(300.0),
            ..Default::default()
        };
        let json = serde_json::to_string(&aggregate.echo()).unwrap();
        assert_eq!(json, r#"{"total_records":2}"#);
    }

    #[test]
    fn test_row_aggregates_keyed_by_slot() {
        let mut row = InsightsRow {
            partner_code: "C-0001".into(),
            ..Default::default()
        };
        row.aggregates.insert(
            DocumentSlot::PaymentEntry,
            Aggregate {
                total_records: 1,
                total_amount: Some(10.0),
                ..Default::default()
            },
        );
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["aggregates"]["payment_entry"]["total_records"], 1);
        assert!(json["aggregates"].get("order").is_none());

        let back: InsightsRow = serde_json::from_value(json).unwrap();
        assert!(back.aggregate(DocumentSlot::Order).is_none());
        assert_eq!(back.aggregate(DocumentSlot::PaymentEntry).unwrap().total_records, 1);
    }

    #[test]
    fn test_detail_request_shape() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let request = DetailRequest {
            partner_code: "C-0001".into(),
            doctype: "Sales Order".into(),
            details: DetailsEcho {
                total_records: 5,
                total_qty: Some(20),
            },
            filters: InsightsFilter::new(today),
        };
        let json = serde_json::to_value(&request).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys.len(), 4);
        assert_eq!(json["details"], serde_json::json!({"total_records": 5, "total_qty": 20}));
    }
}
