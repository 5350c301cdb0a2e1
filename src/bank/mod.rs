//! Ledger collaborators: account and user records, transfer bookkeeping, and
//! the state loop that applies transfers. Record-keeping only; the monetary
//! invariants all live in [`crate::money`].
mod account;
mod ledger;
mod transaction;
mod types;
mod user;

pub use account::*;
pub use ledger::*;
pub use transaction::*;
pub use types::*;
pub use user::*;
