//! The `Ledger` holds the account registry and processes transfer requests.
use std::collections::HashMap;

use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::bank::types::AccountId;
use crate::bank::{Account, SequentialIds, Transfer, TransferIds, TransferRequest};
use crate::money::{Money, MoneyError};

/// Owner placeholder for accounts opened on demand by a transfer.
const UNASSIGNED_USER: u32 = 0;

/// The ledger state: all accounts plus the log of committed transfers.
///
/// Requests arrive over a channel and are applied one at a time; a failed
/// request leaves the ledger untouched. There is no durability and no
/// atomicity guarantee beyond that single-threaded apply.
pub struct Ledger {
    /// Accounts by account ID.
    accounts: HashMap<AccountId, Account>,
    /// A channel receiver for incoming transfer requests.
    receiver: mpsc::Receiver<TransferRequest>,
    /// Assigns IDs to committed transfers.
    ids: SequentialIds,
    /// Committed transfers, in commit order.
    log: Vec<Transfer>,
}

impl Ledger {
    /// Creates an empty ledger fed by the given receiver.
    pub fn new(receiver: mpsc::Receiver<TransferRequest>) -> Self {
        Ledger {
            accounts: HashMap::new(),
            receiver,
            ids: SequentialIds::default(),
            log: Vec::new(),
        }
    }

    /// Registers an account, replacing any existing record with the same ID.
    pub fn open_account(&mut self, account: Account) {
        self.accounts.insert(account.account_id(), account);
    }

    /// Retrieves an account, or opens a zero-balance one in the given
    /// currency if it doesn't exist yet.
    pub fn get_or_open(&mut self, account_id: AccountId, amount: &Money) -> &Account {
        self.accounts.entry(account_id).or_insert_with(|| {
            Account::new(
                account_id,
                UNASSIGNED_USER,
                Money::new(Decimal::ZERO, amount.currency()),
            )
        })
    }

    pub fn account(&self, account_id: AccountId) -> Option<&Account> {
        self.accounts.get(&account_id)
    }

    /// Retrieves all accounts in the ledger.
    pub fn accounts(&self) -> &HashMap<AccountId, Account> {
        &self.accounts
    }

    /// The committed transfers, in commit order.
    pub fn transfers(&self) -> &[Transfer] {
        &self.log
    }

    /// Moves the requested amount between two existing accounts: debits the
    /// source, credits the target, stores both updated records, and logs the
    /// committed transfer under a fresh ID. Both updates are computed before
    /// either is stored, so a failure changes nothing.
    ///
    /// Overdrafts are allowed; a currency mismatch with either account fails
    /// the request.
    pub fn apply(&mut self, request: TransferRequest) -> Result<Transfer, TransferError> {
        if request.from_account() == request.to_account() {
            return Err(TransferError::SameAccount(request.from_account()));
        }
        let amount = request.money();
        let source = self
            .accounts
            .get(&request.from_account())
            .ok_or(TransferError::UnknownAccount(request.from_account()))?;
        let target = self
            .accounts
            .get(&request.to_account())
            .ok_or(TransferError::UnknownAccount(request.to_account()))?;

        let debited = source.debit(&amount)?;
        let credited = target.credit(&amount)?;
        self.accounts.insert(request.from_account(), debited);
        self.accounts.insert(request.to_account(), credited);

        let transfer = Transfer::new(self.ids.next_id(), &request);
        self.log.push(transfer.clone());
        Ok(transfer)
    }

    /// Applies a request, opening missing accounts on demand with a zero
    /// balance in the request's currency.
    fn process_request(&mut self, request: TransferRequest) -> Result<Transfer, TransferError> {
        let amount = request.money();
        self.get_or_open(request.from_account(), &amount);
        self.get_or_open(request.to_account(), &amount);
        self.apply(request)
    }

    /// Runs the processing loop, draining requests from the receiver.
    pub async fn run(&mut self) {
        while let Some(request) = self.receiver.recv().await {
            if let Err(e) = self.process_request(request) {
                eprintln!("Error processing transfer: {e}");
            }
        }
    }
}

/// Errors that can occur while applying a transfer request.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("account {0} does not exist")]
    UnknownAccount(AccountId),
    #[error("transfer from account {0} to itself")]
    SameAccount(AccountId),
    #[error(transparent)]
    Money(#[from] MoneyError),
}
