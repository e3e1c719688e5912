//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the database.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// A free-text label such as "Groceries" or "Salary".
    pub category: String,
    /// An optional text description of what the transaction was for.
    pub description: Option<String>,
    /// Either "income" or "expense" by convention, although any string is stored as-is.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// When the transaction was recorded, assigned by the database.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount: f64, category: &str, transaction_type: &str) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            category: category.to_owned(),
            description: None,
            transaction_type: transaction_type.to_owned(),
        }
    }
}

/// The fields a client supplies to create a [Transaction].
///
/// This is also the JSON body accepted when creating a transaction over HTTP,
/// e.g. `{"amount": 12.5, "category": "Food", "type": "expense"}`.
///
/// The `id` and `created_at` fields are assigned by the database on insert.
/// Fields missing from the JSON take their default values, i.e. zero or an
/// empty string.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionBuilder {
    /// The monetary amount of the transaction.
    ///
    /// No sign convention is enforced. Whether money came in or went out is
    /// recorded by `transaction_type`, not by the sign of the amount.
    pub amount: f64,

    /// A free-text label, no set of categories is enforced.
    pub category: String,

    /// Optional free-text description.
    pub description: Option<String>,

    /// Expected to be "income" or "expense".
    ///
    /// This is not validated. Values other than "income" or "expense" are
    /// stored but do not count towards either total in the summary.
    #[serde(rename = "type")]
    pub transaction_type: String,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: Option<&str>) -> Self {
        self.description = description.map(ToOwned::to_owned);
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// The database assigns the ID and creation time, which are returned in the
/// new [Transaction].
///
/// # Errors
/// This function will return a [Error::SqlError] if the insert fails.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO transactions (amount, category, description, type)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, amount, category, description, type, created_at",
        )?
        .query_row(
            (
                builder.amount,
                builder.category,
                builder.description,
                builder.transaction_type,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve every transaction, most recently created first.
///
/// Transactions created within the same millisecond are ordered by ID so the
/// listing always follows creation order. An empty table gives an empty vector.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, amount, category, description, type, created_at
             FROM transactions
             ORDER BY created_at DESC, id DESC",
        )?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// The number of rows removed by a delete query.
pub type RowsAffected = usize;

/// Delete the transaction with `id`.
///
/// Deleting an ID that does not exist is not an error, the returned row count
/// will simply be zero.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn delete_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM transactions WHERE id = :id", &[(":id", &id)])
        .map_err(|error| error.into())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM transactions;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                description TEXT,
                type TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
                )",
        (),
    )?;

    // Serves the most-recent-first listing.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_created_at ON transactions(created_at);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// Expects the columns in the order: id, amount, category, description, type, created_at.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let category = row.get(2)?;
    let description = row.get(3)?;
    let transaction_type = row.get(4)?;
    let created_at: PrimitiveDateTime = row.get(5)?;

    Ok(Transaction {
        id,
        amount,
        category,
        description,
        transaction_type,
        created_at: created_at.assume_utc(),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::OffsetDateTime;

    use crate::{
        db::initialize,
        transaction::{
            Transaction, count_transactions, create_transaction, delete_transaction,
            get_all_transactions,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let amount = 12.3;

        let result = create_transaction(
            Transaction::build(amount, "Food", "expense").description(Some("Lunch")),
            &conn,
        );

        match result {
            Ok(transaction) => {
                assert_eq!(transaction.amount, amount);
                assert_eq!(transaction.category, "Food");
                assert_eq!(transaction.description.as_deref(), Some("Lunch"));
                assert_eq!(transaction.transaction_type, "expense");
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn create_assigns_increasing_ids_and_creation_time() {
        let conn = get_test_connection();
        let start = OffsetDateTime::now_utc().replace_nanosecond(0).unwrap();

        let first = create_transaction(Transaction::build(1.0, "Salary", "income"), &conn)
            .expect("Could not create transaction");
        let second = create_transaction(Transaction::build(2.0, "Rent", "expense"), &conn)
            .expect("Could not create transaction");

        assert!(second.id > first.id);
        assert!(first.created_at >= start, "{} < {start}", first.created_at);
        assert!(second.created_at >= first.created_at);
    }

    #[test]
    fn create_stores_unknown_type_as_is() {
        let conn = get_test_connection();

        let transaction = create_transaction(Transaction::build(5.0, "Misc", "refund"), &conn)
            .expect("Could not create transaction");

        assert_eq!(transaction.transaction_type, "refund");
    }

    #[test]
    fn get_all_on_empty_table_is_empty() {
        let conn = get_test_connection();

        let transactions = get_all_transactions(&conn).expect("Could not get transactions");

        assert!(transactions.is_empty());
    }

    #[test]
    fn get_all_lists_most_recent_first() {
        let conn = get_test_connection();
        let a = create_transaction(Transaction::build(1.0, "A", "income"), &conn).unwrap();
        let b = create_transaction(Transaction::build(2.0, "B", "expense"), &conn).unwrap();
        let c = create_transaction(Transaction::build(3.0, "C", "income"), &conn).unwrap();

        let transactions = get_all_transactions(&conn).expect("Could not get transactions");

        assert_eq!(transactions, vec![c, b, a]);
    }

    #[test]
    fn delete_removes_transaction() {
        let conn = get_test_connection();
        let transaction = create_transaction(Transaction::build(1.23, "Test", "expense"), &conn)
            .expect("Could not create transaction");

        let rows_affected = delete_transaction(transaction.id, &conn).unwrap();

        assert_eq!(rows_affected, 1);
        assert_eq!(count_transactions(&conn), Ok(0));
    }

    #[test]
    fn delete_missing_transaction_succeeds() {
        let conn = get_test_connection();

        let rows_affected = delete_transaction(1337, &conn);

        assert_eq!(rows_affected, Ok(0));
    }

    #[test]
    fn get_count() {
        let conn = get_test_connection();
        let want_count = 20;
        for i in 1..=want_count {
            create_transaction(Transaction::build(i as f64, "Test", "income"), &conn)
                .expect("Could not create transaction");
        }

        let got_count = count_transactions(&conn).expect("Could not get count");

        assert_eq!(want_count, got_count);
    }
}
