use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    transaction::core::delete_transaction,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query string for deleting a transaction, e.g. `?id=3`.
#[derive(Debug, Deserialize)]
pub struct DeleteTransactionQuery {
    id: Option<String>,
}

impl DeleteTransactionQuery {
    fn transaction_id(&self) -> Result<TransactionId, Error> {
        let id = match self.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => return Err(Error::MissingId),
        };

        id.parse().map_err(|_| Error::InvalidId(id.to_owned()))
    }
}

/// A route handler for deleting a transaction, responds with 204 No Content.
///
/// Deleting a transaction that does not exist also responds with 204.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Query(query): Query<DeleteTransactionQuery>,
) -> Result<StatusCode, Error> {
    let transaction_id = query.transaction_id()?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    match delete_transaction(transaction_id, &connection) {
        Ok(0) => {
            tracing::debug!("Tried to delete transaction {transaction_id}, but it does not exist");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(_) => Ok(StatusCode::NO_CONTENT),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            Err(error)
        }
    }
}
