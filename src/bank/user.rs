//! User records and their account registry.
use std::collections::HashMap;

use crate::bank::Account;
use crate::bank::types::UserId;

/// A bank user and the accounts held in their name, keyed by account number.
///
/// Like the other records, `User` is immutable: contact-detail changes and
/// account registry changes return updated copies.
#[derive(Debug, Clone)]
pub struct User {
    name: String,
    surname: String,
    address: String,
    phone: String,
    email: String,
    id: UserId,
    age: u8,
    accounts: HashMap<String, Account>,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        id: UserId,
        age: u8,
    ) -> Self {
        User {
            name: name.into(),
            surname: surname.into(),
            address: address.into(),
            phone: phone.into(),
            email: email.into(),
            id,
            age,
            accounts: HashMap::new(),
        }
    }

    /// Builder step: a copy of the user with the account registered.
    pub fn with_account(mut self, account: Account) -> Self {
        self.accounts.insert(account.account_number(), account);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn with_address(&self, address: impl Into<String>) -> User {
        User {
            address: address.into(),
            ..self.clone()
        }
    }

    pub fn with_phone(&self, phone: impl Into<String>) -> User {
        User {
            phone: phone.into(),
            ..self.clone()
        }
    }

    pub fn with_email(&self, email: impl Into<String>) -> User {
        User {
            email: email.into(),
            ..self.clone()
        }
    }

    /// Registers an account, returning the updated user.
    pub fn add_account(&self, account: Account) -> User {
        self.clone().with_account(account)
    }

    /// Removes an account by number, returning the updated user. Removing an
    /// unknown number is a no-op.
    pub fn close_account(&self, account_number: &str) -> User {
        let mut user = self.clone();
        user.accounts.remove(account_number);
        user
    }

    pub fn account(&self, account_number: &str) -> Option<&Account> {
        self.accounts.get(account_number)
    }

    pub fn accounts(&self) -> &HashMap<String, Account> {
        &self.accounts
    }
}

/// Identity fields only; the account registry does not participate.
impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.surname == other.surname
            && self.address == other.address
            && self.phone == other.phone
            && self.email == other.email
            && self.id == other.id
            && self.age == other.age
    }
}

impl Eq for User {}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::bank::{Account, User};
    use crate::money::{Currency, Money};

    fn user() -> User {
        User::new(
            "Ada",
            "Lovelace",
            "12 St James Square",
            "+44 20 0000 0000",
            "ada@example.com",
            558,
            36,
        )
    }

    #[test]
    fn test_update_operations_return_new_records() {
        let before = user();
        let after = before.with_email("ada@bank.example");
        assert_eq!(before.email(), "ada@example.com");
        assert_eq!(after.email(), "ada@bank.example");
        assert_eq!(after.with_phone("+44 20 1111 1111").phone(), "+44 20 1111 1111");
    }

    #[test]
    fn test_account_registry() {
        let account = Account::new(40817, 558, Money::new(dec!(10.00), Currency::Usd));
        let number = account.account_number();
        let owner = user().with_account(account.clone());
        assert_eq!(owner.account(&number), Some(&account));

        let owner = owner.close_account(&number);
        assert!(owner.account(&number).is_none());
        assert!(owner.accounts().is_empty());
    }

    #[test]
    fn test_equality_ignores_accounts() {
        let account = Account::new(1, 558, Money::new(dec!(0), Currency::Usd));
        let plain = user();
        let with_account = user().with_account(account);
        assert_eq!(plain, with_account);
        assert_ne!(plain, plain.with_email("other@example.com"));
    }
}
