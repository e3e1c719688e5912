//! Aggregate income and expense totals across all transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{AppState, Error};

/// The totals of all income and expense transactions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The sum of the amounts of transactions with the type "income".
    pub total_income: f64,
    /// The sum of the amounts of transactions with the type "expense".
    pub total_expenses: f64,
    /// `total_income - total_expenses`.
    pub net_balance: f64,
}

impl Summary {
    fn new(total_income: f64, total_expenses: f64) -> Self {
        Self {
            total_income,
            total_expenses,
            net_balance: total_income - total_expenses,
        }
    }
}

/// Compute the [Summary] in a single pass over the transactions table.
///
/// Types other than "income" and "expense" are excluded from both totals.
/// Totals are zero when there are no matching rows.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_summary(connection: &Connection) -> Result<Summary, Error> {
    connection
        .query_row(
            "SELECT
                COALESCE(SUM(CASE WHEN type = 'income' THEN amount END), 0.0),
                COALESCE(SUM(CASE WHEN type = 'expense' THEN amount END), 0.0)
             FROM transactions",
            [],
            |row| Ok(Summary::new(row.get(0)?, row.get(1)?)),
        )
        .map_err(|error| error.into())
}

/// The state needed to compute the summary.
#[derive(Debug, Clone)]
pub struct SummaryState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that responds with the [Summary] as JSON.
///
/// This handler does not check the request method.
pub async fn get_summary_endpoint(
    State(state): State<SummaryState>,
) -> Result<Json<Summary>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    get_summary(&connection).map(Json)
}

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        transaction::{Transaction, create_transaction},
    };

    use super::{Summary, get_summary};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn empty_table_gives_zero_summary() {
        let conn = get_test_connection();

        let summary = get_summary(&conn).expect("Could not get summary");

        assert_eq!(
            summary,
            Summary {
                total_income: 0.0,
                total_expenses: 0.0,
                net_balance: 0.0
            }
        );
    }

    #[test]
    fn excludes_unknown_types() {
        let conn = get_test_connection();
        for (amount, transaction_type) in [(100.0, "income"), (40.0, "expense"), (10.0, "other")] {
            create_transaction(Transaction::build(amount, "Test", transaction_type), &conn)
                .expect("Could not create transaction");
        }

        let summary = get_summary(&conn).expect("Could not get summary");

        assert_eq!(
            summary,
            Summary {
                total_income: 100.0,
                total_expenses: 40.0,
                net_balance: 60.0
            }
        );
    }

    #[test]
    fn only_expenses_gives_negative_balance() {
        let conn = get_test_connection();
        create_transaction(Transaction::build(25.5, "Food", "expense"), &conn).unwrap();
        create_transaction(Transaction::build(4.5, "Transport", "expense"), &conn).unwrap();

        let summary = get_summary(&conn).expect("Could not get summary");

        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expenses, 30.0);
        assert_eq!(summary.net_balance, -30.0);
    }

    #[test]
    fn net_balance_is_income_minus_expenses() {
        let conn = get_test_connection();
        for (amount, transaction_type) in [
            (1200.0, "income"),
            (-50.0, "expense"),
            (300.25, "income"),
            (99.75, "expense"),
        ] {
            create_transaction(Transaction::build(amount, "Test", transaction_type), &conn)
                .unwrap();
        }

        let summary = get_summary(&conn).expect("Could not get summary");

        assert_eq!(
            summary.net_balance,
            summary.total_income - summary.total_expenses
        );
        assert_eq!(summary.total_income, 1500.25);
        assert_eq!(summary.total_expenses, 49.75);
    }
}
