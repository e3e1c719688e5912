//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Database functions for storing, listing and deleting transactions
//! - Route handlers for the transactions endpoint

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;

pub use self::core::{
    Transaction, TransactionBuilder, count_transactions, create_transaction,
    create_transaction_table, delete_transaction, get_all_transactions,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
