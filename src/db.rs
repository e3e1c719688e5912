//! Opening, verifying and initializing the application's SQLite database.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, transaction::create_transaction_table};

/// Open the database named by `descriptor` and check that it responds.
///
/// `descriptor` may be a file path, `:memory:`, or an SQLite `file:` URI.
/// The connection is verified with a `SELECT 1` liveness query before it is
/// returned.
///
/// # Errors
/// Returns [Error::ConnectionError] if the database cannot be opened or does
/// not answer the liveness query.
pub fn connect(descriptor: &str) -> Result<Connection, Error> {
    let connection = Connection::open(descriptor).map_err(|error| {
        Error::ConnectionError(format!("could not open \"{descriptor}\": {error}"))
    })?;

    ping(&connection)
        .map_err(|error| Error::ConnectionError(format!("database unreachable: {error}")))?;

    tracing::debug!("Connected to database \"{descriptor}\"");

    Ok(connection)
}

fn ping(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;

    Ok(())
}

/// Create the application's tables if they do not already exist.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is some other SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
