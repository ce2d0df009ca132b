//! Table and column names behind each role and document slot.
//!
//! Every identifier here is static; request data only ever reaches SQL as a
//! bound value.

use contracts::dashboards::d410_partner_insights::{DocumentSlot, PartnerRole};

/// Master table of the partners of one role
#[derive(Debug, Clone, Copy)]
pub struct PartyTable {
    pub table: &'static str,
    pub name_column: &'static str,
    pub group_column: &'static str,
    pub group_table: &'static str,
}

/// Document table feeding one column of the dashboard
#[derive(Debug, Clone, Copy)]
pub struct DocumentTable {
    pub table: &'static str,
    pub party_column: &'static str,
    pub date_column: &'static str,
    /// Set on payment tables shared by both roles
    pub party_type: Option<&'static str>,
    pub item_table: Option<&'static str>,
    /// Item column subtracted from `qty` to get the pending quantity
    pub fulfilled_qty_column: Option<&'static str>,
    pub has_outstanding: bool,
}

pub fn party_table(role: PartnerRole) -> PartyTable {
    match role {
        PartnerRole::Customer => PartyTable {
            table: "customer",
            name_column: "customer_name",
            group_column: "customer_group",
            group_table: "customer_group",
        },
        PartnerRole::Supplier => PartyTable {
            table: "supplier",
            name_column: "supplier_name",
            group_column: "supplier_group",
            group_table: "supplier_group",
        },
    }
}

pub fn document_table(role: PartnerRole, slot: DocumentSlot) -> DocumentTable {
    let party_column = party_table(role).table;
    match (role, slot) {
        (_, DocumentSlot::PaymentRequest) => DocumentTable {
            table: "payment_request",
            party_column: "party",
            date_column: "transaction_date",
            party_type: Some(role.label()),
            item_table: None,
            fulfilled_qty_column: None,
            has_outstanding: false,
        },
        (_, DocumentSlot::PaymentEntry) => DocumentTable {
            table: "payment_entry",
            party_column: "party",
            date_column: "posting_date",
            party_type: Some(role.label()),
            item_table: None,
            fulfilled_qty_column: None,
            has_outstanding: false,
        },
        (PartnerRole::Customer, DocumentSlot::Order) => DocumentTable {
            table: "sales_order",
            party_column,
            date_column: "transaction_date",
            party_type: None,
            item_table: Some("sales_order_item"),
            fulfilled_qty_column: Some("delivered_qty"),
            has_outstanding: false,
        },
        (PartnerRole::Customer, DocumentSlot::Receipt) => DocumentTable {
            table: "delivery_note",
            party_column,
            date_column: "posting_date",
            party_type: None,
            item_table: Some("delivery_note_item"),
            fulfilled_qty_column: None,
            has_outstanding: false,
        },
        (PartnerRole::Customer, DocumentSlot::Invoice) => DocumentTable {
            table: "sales_invoice",
            party_column,
            date_column: "posting_date",
            party_type: None,
            item_table: Some("sales_invoice_item"),
            fulfilled_qty_column: None,
            has_outstanding: true,
        },
        (PartnerRole::Supplier, DocumentSlot::Order) => DocumentTable {
            table: "purchase_order",
            party_column,
            date_column: "transaction_date",
            party_type: None,
            item_table: Some("purchase_order_item"),
            fulfilled_qty_column: Some("received_qty"),
            has_outstanding: false,
        },
        (PartnerRole::Supplier, DocumentSlot::Receipt) => DocumentTable {
            table: "purchase_receipt",
            party_column,
            date_column: "posting_date",
            party_type: None,
            item_table: Some("purchase_receipt_item"),
            fulfilled_qty_column: None,
            has_outstanding: false,
        },
        (PartnerRole::Supplier, DocumentSlot::Invoice) => DocumentTable {
            table: "purchase_invoice",
            party_column,
            date_column: "posting_date",
            party_type: None,
            item_table: Some("purchase_invoice_item"),
            fulfilled_qty_column: None,
            has_outstanding: true,
        },
    }
}
