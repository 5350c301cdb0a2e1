//! Currency-tagged monetary values with exact arithmetic, plus the ledger
//! record-keeping built on top of them.
pub mod bank;
pub mod money;
