use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// ERP tables read by the insights dashboards. Dates are stored as
/// `YYYY-MM-DD` text, `docstatus = 1` marks a submitted document.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS customer_group (
        name TEXT PRIMARY KEY NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS supplier_group (
        name TEXT PRIMARY KEY NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS customer (
        name TEXT PRIMARY KEY NOT NULL,
        customer_name TEXT,
        customer_group TEXT,
        mobile_no TEXT,
        email_id TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS supplier (
        name TEXT PRIMARY KEY NOT NULL,
        supplier_name TEXT,
        supplier_group TEXT,
        mobile_no TEXT,
        email_id TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sales_order (
        name TEXT PRIMARY KEY NOT NULL,
        customer TEXT NOT NULL,
        transaction_date TEXT NOT NULL,
        docstatus INTEGER NOT NULL DEFAULT 0,
        total REAL NOT NULL DEFAULT 0,
        grand_total REAL NOT NULL DEFAULT 0,
        total_qty REAL NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sales_order_item (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        parent TEXT NOT NULL,
        item_code TEXT NOT NULL,
        item_name TEXT,
        qty REAL NOT NULL DEFAULT 0,
        delivered_qty REAL NOT NULL DEFAULT 0,
        rate REAL NOT NULL DEFAULT 0,
        amount REAL NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS delivery_note (
        name TEXT PRIMARY KEY NOT NULL,
        customer TEXT NOT NULL,
        posting_date TEXT NOT NULL,
        docstatus INTEGER NOT NULL DEFAULT 0,
        total REAL NOT NULL DEFAULT 0,
        grand_total REAL NOT NULL DEFAULT 0,
        total_qty REAL NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS delivery_note_item (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        parent TEXT NOT NULL,
        item_code TEXT NOT NULL,
        item_name TEXT,
        qty REAL NOT NULL DEFAULT 0,
        rate REAL NOT NULL DEFAULT 0,
        amount REAL NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sales_invoice (
        name TEXT PRIMARY KEY NOT NULL,
        customer TEXT NOT NULL,
        posting_date TEXT NOT NULL,
        docstatus INTEGER NOT NULL DEFAULT 0,
        total REAL NOT NULL DEFAULT 0,
        grand_total REAL NOT NULL DEFAULT 0,
        total_qty REAL NOT NULL DEFAULT 0,
        outstanding_amount REAL NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sales_invoice_item (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        parent TEXT NOT NULL,
        item_code TEXT NOT NULL,
        item_name TEXT,
        qty REAL NOT NULL DEFAULT 0,
        rate REAL NOT NULL DEFAULT 0,
        amount REAL NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS purchase_order (
        name TEXT PRIMARY KEY NOT NULL,
        supplier TEXT NOT NULL,
        transaction_date TEXT NOT NULL,
        docstatus INTEGER NOT NULL DEFAULT 0,
        total REAL NOT NULL DEFAULT 0,
        grand_total REAL NOT NULL DEFAULT 0,
        total_qty REAL NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS purchase_order_item (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        parent TEXT NOT NULL,
        item_code TEXT NOT NULL,
        item_name TEXT,
        qty REAL NOT NULL DEFAULT 0,
        received_qty REAL NOT NULL DEFAULT 0,
        rate REAL NOT NULL DEFAULT 0,
        amount REAL NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS purchase_receipt (
        name TEXT PRIMARY KEY NOT NULL,
        supplier TEXT NOT NULL,
        posting_date TEXT NOT NULL,
        docstatus INTEGER NOT NULL DEFAULT 0,
        total REAL NOT NULL DEFAULT 0,
        grand_total REAL NOT NULL DEFAULT 0,
        total_qty REAL NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS purchase_receipt_item (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        parent TEXT NOT NULL,
        item_code TEXT NOT NULL,
        item_name TEXT,
        qty REAL NOT NULL DEFAULT 0,
        rate REAL NOT NULL DEFAULT 0,
        amount REAL NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS purchase_invoice (
        name TEXT PRIMARY KEY NOT NULL,
        supplier TEXT NOT NULL,
        posting_date TEXT NOT NULL,
        docstatus INTEGER NOT NULL DEFAULT 0,
        total REAL NOT NULL DEFAULT 0,
        grand_total REAL NOT NULL DEFAULT 0,
        total_qty REAL NOT NULL DEFAULT 0,
        outstanding_amount REAL NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS purchase_invoice_item (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        parent TEXT NOT NULL,
        item_code TEXT NOT NULL,
        item_name TEXT,
        qty REAL NOT NULL DEFAULT 0,
        rate REAL NOT NULL DEFAULT 0,
        amount REAL NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS payment_request (
        name TEXT PRIMARY KEY NOT NULL,
        party_type TEXT NOT NULL,
        party TEXT NOT NULL,
        transaction_date TEXT NOT NULL,
        docstatus INTEGER NOT NULL DEFAULT 0,
        payment_request_type TEXT,
        reference_doctype TEXT,
        reference_name TEXT,
        grand_total REAL NOT NULL DEFAULT 0
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS payment_entry (
        name TEXT PRIMARY KEY NOT NULL,
        party_type TEXT NOT NULL,
        party TEXT NOT NULL,
        posting_date TEXT NOT NULL,
        docstatus INTEGER NOT NULL DEFAULT 0,
        payment_type TEXT,
        mode_of_payment TEXT,
        unallocated_amount REAL NOT NULL DEFAULT 0,
        paid_amount REAL NOT NULL DEFAULT 0
    );
    "#,
];

/// Open the SQLite file (created if missing) and make sure the schema exists.
pub async fn connect(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    let conn = Database::connect(&db_url).await?;
    apply_schema(&conn).await?;
    Ok(conn)
}

pub async fn apply_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for sql in SCHEMA {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            sql.to_string(),
        ))
        .await?;
    }
    tracing::info!("Insights schema ready ({} tables)", SCHEMA.len());
    Ok(())
}

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    tracing::info!("Opening database at {}", db_file.display());
    let conn = connect(db_file).await?;
    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// Throw-away database file for tests
#[cfg(test)]
pub async fn test_connection() -> DatabaseConnection {
    let path = std::env::temp_dir().join(format!("insights-test-{}.db", uuid::Uuid::new_v4()));
    connect(&path).await.expect("test database")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::FromQueryResult;

    #[derive(Debug, FromQueryResult)]
    struct TableName {
        name: String,
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let conn = test_connection().await;
        apply_schema(&conn).await.unwrap();

        let tables = TableName::find_by_statement(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'"
                .to_string(),
        ))
        .all(&conn)
        .await
        .unwrap();

        let names: Vec<String> = tables.into_iter().map(|t| t.name).collect();
        assert_eq!(names.len(), SCHEMA.len());
        assert!(names.contains(&"purchase_invoice_item".to_string()));
        assert!(names.contains(&"payment_entry".to_string()));
    }
}
