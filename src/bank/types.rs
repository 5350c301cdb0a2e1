//! Types used throughout the ledger.

/// User ID type, representing a unique identifier for a user.
pub type UserId = u32;

/// Account ID type, the bank-internal identifier an account number is built from.
pub type AccountId = u32;

/// Transfer ID type, representing a unique identifier for a committed transfer.
pub type TransferId = u64;
