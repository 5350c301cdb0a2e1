//! Transfer records, the wire form they arrive in, and transfer ID
//! assignment.
use rust_decimal::Decimal;
use serde::{Deserialize, de};

use crate::bank::types::{AccountId, TransferId};
use crate::money::{Currency, Money};

/// Custom deserializer for currency codes, so an unrecognized code fails the
/// row with the money layer's own lookup error.
fn deserialize_currency<'de, D>(deserializer: D) -> Result<Currency, D::Error>
where
    D: de::Deserializer<'de>,
{
    let code = String::deserialize(deserializer)?;
    Currency::from_code(&code).map_err(de::Error::custom)
}

/// A transfer instruction as it arrives on the wire: source and target
/// accounts plus an amount in exact decimal text. The transfer ID is
/// assigned by the ledger when the instruction commits, never by the wire.
#[derive(Deserialize, Debug, Clone)]
pub struct TransferRequest {
    /// The account to debit.
    from: AccountId,

    /// The account to credit.
    to: AccountId,

    /// The amount to move, parsed exactly.
    amount: Decimal,

    /// The currency the amount is denominated in.
    #[serde(deserialize_with = "deserialize_currency")]
    currency: Currency,
}

impl TransferRequest {
    pub fn new(from: AccountId, to: AccountId, amount: Money) -> Self {
        TransferRequest {
            from,
            to,
            amount: amount.amount(),
            currency: amount.currency(),
        }
    }

    pub fn from_account(&self) -> AccountId {
        self.from
    }

    pub fn to_account(&self) -> AccountId {
        self.to
    }

    /// The requested amount as a monetary value.
    pub fn money(&self) -> Money {
        Money::new(self.amount, self.currency)
    }
}

/// A committed transfer: the request plus the ID the ledger assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    id: TransferId,
    from: AccountId,
    to: AccountId,
    amount: Money,
}

impl Transfer {
    pub fn new(id: TransferId, request: &TransferRequest) -> Self {
        Transfer {
            id,
            from: request.from,
            to: request.to,
            amount: request.money(),
        }
    }

    pub fn id(&self) -> TransferId {
        self.id
    }

    pub fn from_account(&self) -> AccountId {
        self.from
    }

    pub fn to_account(&self) -> AccountId {
        self.to
    }

    pub fn amount(&self) -> &Money {
        &self.amount
    }
}

/// Source of transfer IDs. Injectable so tests get reproducible IDs.
pub trait TransferIds {
    fn next_id(&mut self) -> TransferId;
}

/// Counter-backed ID source starting at 1.
#[derive(Debug, Default)]
pub struct SequentialIds {
    last: TransferId,
}

impl TransferIds for SequentialIds {
    fn next_id(&mut self) -> TransferId {
        self.last += 1;
        self.last
    }
}
