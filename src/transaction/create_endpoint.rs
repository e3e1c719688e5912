//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;
use serde_json::Deserializer;

use crate::{
    AppState, Error,
    transaction::{TransactionBuilder, core::create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new transaction from a JSON body, responds
/// with 201 Created and an empty body on success.
///
/// The body is decoded regardless of the request's content type. Only the
/// first JSON value is read, anything after it is ignored.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    body: Bytes,
) -> Result<StatusCode, Error> {
    let builder = match Deserializer::from_slice(&body)
        .into_iter::<TransactionBuilder>()
        .next()
    {
        Some(Ok(builder)) => builder,
        Some(Err(error)) => {
            tracing::debug!("Could not decode new transaction: {error}");
            return Err(Error::InvalidInput);
        }
        None => {
            tracing::debug!("Could not decode new transaction: empty body");
            return Err(Error::InvalidInput);
        }
    };

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = create_transaction(builder, &connection)?;
    tracing::debug!(
        "Created transaction {} at {}",
        transaction.id,
        transaction.created_at
    );

    Ok(StatusCode::CREATED)
}
