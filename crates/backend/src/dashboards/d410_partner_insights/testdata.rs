//! Demo partners and documents, dated relative to `today` so the default
//! "Last Week" filter always has something to show.

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, FromQueryResult, Statement, Value,
};

struct Party {
    code: &'static str,
    name: &'static str,
    group: &'static str,
    mobile: &'static str,
    email: &'static str,
}

/// (name, party, days ago, docstatus, total, grand_total, total_qty, outstanding)
type Document = (&'static str, &'static str, i64, i32, f64, f64, f64, f64);

/// (parent, item_code, item_name, qty, fulfilled_qty, rate)
type Item = (&'static str, &'static str, &'static str, f64, f64, f64);

const CUSTOMER_GROUPS: &[&str] = &["Retail", "Wholesale"];
const SUPPLIER_GROUPS: &[&str] = &["Raw Material", "Hardware"];

const CUSTOMERS: &[Party] = &[
    Party {
        code: "C-0001",
        name: "Acme Retail",
        group: "Retail",
        mobile: "+91 98200 00001",
        email: "orders@acme.example",
    },
    Party {
        code: "C-0002",
        name: "Globex Wholesale",
        group: "Wholesale",
        mobile: "+91 98200 00002",
        email: "buying@globex.example",
    },
    Party {
        code: "C-0003",
        name: "Initech Stores",
        group: "Retail",
        mobile: "",
        email: "",
    },
];

const SUPPLIERS: &[Party] = &[
    Party {
        code: "S-0001",
        name: "Northwind Traders",
        group: "Raw Material",
        mobile: "+91 98200 10001",
        email: "sales@northwind.example",
    },
    Party {
        code: "S-0002",
        name: "Contoso Components",
        group: "Hardware",
        mobile: "",
        email: "hello@contoso.example",
    },
];

const SALES_ORDERS: &[Document] = &[
    ("SO-0001", "C-0001", 2, 1, 1000.0, 1180.0, 10.0, 0.0),
    ("SO-0002", "C-0001", 5, 1, 2000.0, 2360.0, 20.0, 0.0),
    ("SO-0003", "C-0001", 1, 0, 500.0, 590.0, 5.0, 0.0),
    ("SO-0004", "C-0001", 60, 1, 700.0, 826.0, 7.0, 0.0),
    ("SO-0005", "C-0002", 3, 1, 500.0, 590.0, 5.0, 0.0),
];

const SALES_ORDER_ITEMS: &[Item] = &[
    ("SO-0001", "ITEM-WIDGET", "Widget", 10.0, 5.0, 100.0),
    ("SO-0002", "ITEM-WIDGET", "Widget", 10.0, 10.0, 100.0),
    ("SO-0002", "ITEM-GADGET", "Gadget", 10.0, 0.0, 100.0),
    ("SO-0003", "ITEM-GADGET", "Gadget", 5.0, 0.0, 100.0),
    ("SO-0004", "ITEM-WIDGET", "Widget", 7.0, 7.0, 100.0),
    ("SO-0005", "ITEM-GADGET", "Gadget", 5.0, 5.0, 100.0),
];

const DELIVERY_NOTES: &[Document] = &[("DN-0001", "C-0001", 1, 1, 500.0, 590.0, 5.0, 0.0)];
const DELIVERY_NOTE_ITEMS: &[Item] = &[("DN-0001", "ITEM-WIDGET", "Widget", 5.0, 0.0, 100.0)];

const SALES_INVOICES: &[Document] = &[("SINV-0001", "C-0001", 1, 1, 1000.0, 1180.0, 10.0, 180.0)];
const SALES_INVOICE_ITEMS: &[Item] = &[("SINV-0001", "ITEM-WIDGET", "Widget", 10.0, 0.0, 100.0)];

const PURCHASE_ORDERS: &[Document] = &[("PO-0001", "S-0001", 3, 1, 800.0, 944.0, 8.0, 0.0)];
const PURCHASE_ORDER_ITEMS: &[Item] = &[("PO-0001", "ITEM-STEEL", "Steel Rod", 8.0, 3.0, 100.0)];

const PURCHASE_RECEIPTS: &[Document] = &[("PREC-0001", "S-0001", 2, 1, 300.0, 354.0, 3.0, 0.0)];
const PURCHASE_RECEIPT_ITEMS: &[Item] = &[("PREC-0001", "ITEM-STEEL", "Steel Rod", 3.0, 0.0, 100.0)];

const PURCHASE_INVOICES: &[Document] = &[("PINV-0001", "S-0001", 2, 1, 800.0, 944.0, 8.0, 144.0)];
const PURCHASE_INVOICE_ITEMS: &[Item] = &[("PINV-0001", "ITEM-STEEL", "Steel Rod", 8.0, 0.0, 100.0)];

async fn exec(db: &DatabaseConnection, sql: &str, values: Vec<Value>) -> Result<u64> {
    let result = db
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            sql,
            values,
        ))
        .await?;
    Ok(result.rows_affected())
}

fn days_ago(today: NaiveDate, days: i64) -> Value {
    (today - Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
        .into()
}

async fn insert_parties(
    db: &DatabaseConnection,
    table: &str,
    name_column: &str,
    group_column: &str,
    parties: &[Party],
) -> Result<u64> {
    let sql = format!(
        "INSERT OR IGNORE INTO {} (name, {}, {}, mobile_no, email_id) VALUES (?, ?, ?, ?, ?)",
        table, name_column, group_column
    );
    let optional = |s: &str| -> Value {
        if s.is_empty() {
            Value::String(None)
        } else {
            s.into()
        }
    };

    let mut inserted = 0;
    for p in parties {
        inserted += exec(
            db,
            &sql,
            vec![
                p.code.into(),
                p.name.into(),
                p.group.into(),
                optional(p.mobile),
                optional(p.email),
            ],
        )
        .await?;
    }
    Ok(inserted)
}

async fn insert_groups(db: &DatabaseConnection, table: &str, groups: &[&str]) -> Result<u64> {
    let sql = format!("INSERT OR IGNORE INTO {} (name) VALUES (?)", table);
    let mut inserted = 0;
    for g in groups {
        inserted += exec(db, &sql, vec![(*g).into()]).await?;
    }
    Ok(inserted)
}

async fn insert_documents(
    db: &DatabaseConnection,
    today: NaiveDate,
    table: &str,
    party_column: &str,
    date_column: &str,
    with_outstanding: bool,
    documents: &[Document],
) -> Result<u64> {
    let sql = if with_outstanding {
        format!(
            "INSERT OR IGNORE INTO {} (name, {}, {}, docstatus, total, grand_total, total_qty, outstanding_amount) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            table, party_column, date_column
        )
    } else {
        format!(
            "INSERT OR IGNORE INTO {} (name, {}, {}, docstatus, total, grand_total, total_qty) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            table, party_column, date_column
        )
    };

    let mut inserted = 0;
    for (name, party, ago, docstatus, total, grand_total, qty, outstanding) in documents {
        let mut values: Vec<Value> = vec![
            (*name).into(),
            (*party).into(),
            days_ago(today, *ago),
            (*docstatus).into(),
            (*total).into(),
            (*grand_total).into(),
            (*qty).into(),
        ];
        if with_outstanding {
            values.push((*outstanding).into());
        }
        inserted += exec(db, &sql, values).await?;
    }
    Ok(inserted)
}

async fn insert_items(
    db: &DatabaseConnection,
    table: &str,
    fulfilled_column: Option<&str>,
    items: &[Item],
) -> Result<u64> {
    let sql = match fulfilled_column {
        Some(column) => format!(
            "INSERT INTO {} (parent, item_code, item_name, qty, {}, rate, amount) VALUES (?, ?, ?, ?, ?, ?, ?)",
            table, column
        ),
        None => format!(
            "INSERT INTO {} (parent, item_code, item_name, qty, rate, amount) VALUES (?, ?, ?, ?, ?, ?)",
            table
        ),
    };

    let mut inserted = 0;
    for (parent, code, name, qty, fulfilled, rate) in items {
        let mut values: Vec<Value> = vec![(*parent).into(), (*code).into(), (*name).into(), (*qty).into()];
        if fulfilled_column.is_some() {
            values.push((*fulfilled).into());
        }
        values.push((*rate).into());
        values.push((qty * rate).into());
        inserted += exec(db, &sql, values).await?;
    }
    Ok(inserted)
}

/// Seeds the demo data set. Returns the number of inserted rows; a second
/// call inserts nothing.
pub async fn seed_demo_data(db: &DatabaseConnection, today: NaiveDate) -> Result<u64> {
    #[derive(Debug, FromQueryResult)]
    struct Count {
        n: i64,
    }

    // Child rows have no natural key, so an existing seed short-circuits everything
    let existing = Count::find_by_statement(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "SELECT COUNT(*) AS n FROM customer WHERE name = ?",
        [CUSTOMERS[0].code.into()],
    ))
    .one(db)
    .await?
    .map(|c| c.n)
    .unwrap_or(0);
    if existing > 0 {
        tracing::info!("D410 demo data already present, skipping");
        return Ok(0);
    }

    let mut inserted = 0;
    inserted += insert_groups(db, "customer_group", CUSTOMER_GROUPS).await?;
    inserted += insert_groups(db, "supplier_group", SUPPLIER_GROUPS).await?;
    inserted += insert_parties(db, "customer", "customer_name", "customer_group", CUSTOMERS).await?;
    inserted += insert_parties(db, "supplier", "supplier_name", "supplier_group", SUPPLIERS).await?;

    inserted += insert_documents(db, today, "sales_order", "customer", "transaction_date", false, SALES_ORDERS).await?;
    inserted += insert_items(db, "sales_order_item", Some("delivered_qty"), SALES_ORDER_ITEMS).await?;
    inserted += insert_documents(db, today, "delivery_note", "customer", "posting_date", false, DELIVERY_NOTES).await?;
    inserted += insert_items(db, "delivery_note_item", None, DELIVERY_NOTE_ITEMS).await?;
    inserted += insert_documents(db, today, "sales_invoice", "customer", "posting_date", true, SALES_INVOICES).await?;
    inserted += insert_items(db, "sales_invoice_item", None, SALES_INVOICE_ITEMS).await?;

    inserted += insert_documents(db, today, "purchase_order", "supplier", "transaction_date", false, PURCHASE_ORDERS).await?;
    inserted += insert_items(db, "purchase_order_item", Some("received_qty"), PURCHASE_ORDER_ITEMS).await?;
    inserted += insert_documents(db, today, "purchase_receipt", "supplier", "posting_date", false, PURCHASE_RECEIPTS).await?;
    inserted += insert_items(db, "purchase_receipt_item", None, PURCHASE_RECEIPT_ITEMS).await?;
    inserted += insert_documents(db, today, "purchase_invoice", "supplier", "posting_date", true, PURCHASE_INVOICES).await?;
    inserted += insert_items(db, "purchase_invoice_item", None, PURCHASE_INVOICE_ITEMS).await?;

    inserted += exec(
        db,
        "INSERT OR IGNORE INTO payment_request \
         (name, party_type, party, transaction_date, docstatus, payment_request_type, reference_doctype, reference_name, grand_total) \
         VALUES (?, 'Customer', 'C-0001', ?, 1, 'Inward', 'Sales Invoice', 'SINV-0001', 1180.0)",
        vec!["PR-0001".into(), days_ago(today, 1)],
    )
    .await?;

    for (name, party_type, party, ago, payment_type, mode, unallocated, paid) in [
        ("PE-0001", "Customer", "C-0001", 1, "Receive", "Cash", 0.0, 1000.0),
        ("PE-0002", "Supplier", "S-0001", 4, "Pay", "Bank Transfer", 50.0, 800.0),
    ] {
        inserted += exec(
            db,
            "INSERT OR IGNORE INTO payment_entry \
             (name, party_type, party, posting_date, docstatus, payment_type, mode_of_payment, unallocated_amount, paid_amount) \
             VALUES (?, ?, ?, ?, 1, ?, ?, ?, ?)",
            vec![
                name.into(),
                party_type.into(),
                party.into(),
                days_ago(today, ago),
                payment_type.into(),
                mode.into(),
                unallocated.into(),
                paid.into(),
            ],
        )
        .await?;
    }

    tracing::info!("D410 demo data seeded: {} rows", inserted);
    Ok(inserted)
}
