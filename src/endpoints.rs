//! The API endpoints URIs.

/// The route to list, create and delete transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for the income and expense totals.
pub const SUMMARY: &str = "/summary";
