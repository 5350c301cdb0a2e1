//! Account records and the account numbering scheme.
use serde::{Serialize, Serializer};

use crate::bank::types::{AccountId, UserId};
use crate::money::{Money, MoneyError};

/// Branch code embedded in every account number.
const BRANCH_CODE: &str = "1954";

fn serialize_money<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(money)
}

/// A bank account: an identifier pair and a balance. The balance carries the
/// account's currency, so crediting or debiting in the wrong currency fails
/// the same way mismatched money arithmetic does.
///
/// Records are immutable; `credit` and `debit` return updated copies.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// The bank-internal account identifier.
    #[serde(rename = "account")]
    account_id: AccountId,

    /// The owning user.
    #[serde(rename = "user")]
    user_id: UserId,

    /// The current balance, rendered as `"<amount> <symbol>"` in reports.
    #[serde(serialize_with = "serialize_money")]
    balance: Money,
}

impl Account {
    /// Opens an account with the given starting balance. The balance's
    /// currency becomes the account's currency.
    pub fn new(account_id: AccountId, user_id: UserId, balance: Money) -> Self {
        Account {
            account_id,
            user_id,
            balance,
        }
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn balance(&self) -> &Money {
        &self.balance
    }

    /// The full account number:
    /// `<account id><currency numeric code><control digit><branch code><user id as 7 digits>`.
    /// The user id is left-padded with zeros to 7 digits, or truncated to its
    /// first 7 digits when longer.
    pub fn account_number(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.account_id,
            self.balance.currency().numeric(),
            self.control_digit(),
            BRANCH_CODE,
            user_digits(self.user_id),
        )
    }

    /// Checksum digit over the identifier pair. Deterministic, so the same
    /// account always yields the same number.
    fn control_digit(&self) -> u32 {
        let mut sum = 0u32;
        let mut rest = u64::from(self.account_id) + u64::from(self.user_id);
        while rest > 0 {
            sum += (rest % 10) as u32;
            rest /= 10;
        }
        sum % 10
    }

    /// Adds the amount to the balance, returning the updated record.
    /// Fails if the amount's currency doesn't match the account's.
    pub fn credit(&self, amount: &Money) -> Result<Account, MoneyError> {
        Ok(Account {
            balance: self.balance.add(amount)?,
            ..self.clone()
        })
    }

    /// Subtracts the amount from the balance, returning the updated record.
    /// Overdrafts are allowed; the balance may go negative.
    pub fn debit(&self, amount: &Money) -> Result<Account, MoneyError> {
        Ok(Account {
            balance: self.balance.subtract(amount)?,
            ..self.clone()
        })
    }
}

fn user_digits(user_id: UserId) -> String {
    let digits = user_id.to_string();
    if digits.len() > 7 {
        digits[..7].to_string()
    } else {
        format!("{digits:0>7}")
    }
}
