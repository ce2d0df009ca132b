use serde::{Deserialize, Serialize};

/// Which side of the business the dashboard looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerRole {
    Customer,
    Supplier,
}

/// Document kinds tracked per partner, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSlot {
    Order,
    Receipt,
    Invoice,
    PaymentRequest,
    PaymentEntry,
}

impl DocumentSlot {
    pub const ALL: [DocumentSlot; 5] = [
        DocumentSlot::Order,
        DocumentSlot::Receipt,
        DocumentSlot::Invoice,
        DocumentSlot::PaymentRequest,
        DocumentSlot::PaymentEntry,
    ];

    /// Payment slots carry no quantity and no taxable amount.
    pub fn is_payment(self) -> bool {
        matches!(self, DocumentSlot::PaymentRequest | DocumentSlot::PaymentEntry)
    }
}

impl PartnerRole {
    pub const ALL: [PartnerRole; 2] = [PartnerRole::Customer, PartnerRole::Supplier];

    /// Path segment used in API routes and page URLs
    pub fn code(self) -> &'static str {
        match self {
            PartnerRole::Customer => "customer",
            PartnerRole::Supplier => "supplier",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.code() == code)
    }

    /// Singular label, also the identity column title and the party type
    pub fn label(self) -> &'static str {
        match self {
            PartnerRole::Customer => "Customer",
            PartnerRole::Supplier => "Supplier",
        }
    }

    pub fn page_title(self) -> &'static str {
        match self {
            PartnerRole::Customer => "Customer Insights",
            PartnerRole::Supplier => "Supplier Insights",
        }
    }

    /// Label above the partner multi-select
    pub fn picker_label(self) -> &'static str {
        match self {
            PartnerRole::Customer => "Customers",
            PartnerRole::Supplier => "Supplier",
        }
    }

    /// Link doctype of the partner lookup
    pub fn partner_doctype(self) -> &'static str {
        self.label()
    }

    /// Link doctype of the group lookup
    pub fn group_doctype(self) -> &'static str {
        match self {
            PartnerRole::Customer => "Customer Group",
            PartnerRole::Supplier => "Supplier Group",
        }
    }

    pub fn busy_message(self) -> &'static str {
        match self {
            PartnerRole::Customer => "Fetching customer insights...",
            PartnerRole::Supplier => "Fetching supplier insights...",
        }
    }

    pub fn document_label(self, slot: DocumentSlot) -> &'static str {
        match (self, slot) {
            (PartnerRole::Customer, DocumentSlot::Order) => "Sales Order",
            (PartnerRole::Customer, DocumentSlot::Receipt) => "Delivery Note",
            (PartnerRole::Customer, DocumentSlot::Invoice) => "Sales Invoice",
            (PartnerRole::Supplier, DocumentSlot::Order) => "Purchase Order",
            (PartnerRole::Supplier, DocumentSlot::Receipt) => "Purchase Receipt",
            (PartnerRole::Supplier, DocumentSlot::Invoice) => "Purchase Invoice",
            (_, DocumentSlot::PaymentRequest) => "Payment Request",
            (_, DocumentSlot::PaymentEntry) => "Payment Entry",
        }
    }

    /// Reverse of [`PartnerRole::document_label`]
    pub fn slot_for_label(self, label: &str) -> Option<DocumentSlot> {
        DocumentSlot::ALL
            .into_iter()
            .find(|slot| self.document_label(*slot) == label)
    }

    pub fn receipt_qty_label(self) -> &'static str {
        match self {
            PartnerRole::Customer => "Total Delivered Qty",
            PartnerRole::Supplier => "Total Received Qty",
        }
    }
}
