use csv::{ReaderBuilder, Trim};
use tokio::sync::mpsc;

use ledger::bank::Ledger;

/// The size of the channel for processing transfer requests.
const CHANNEL_SIZE: usize = 100;

#[tokio::main]
async fn main() {
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() != 2 {
        eprintln!("Usage: {} <transfers_csv_file>", args[0]);
        std::process::exit(1);
    }
    let input_file = &args[1];

    let (sender, receiver) = mpsc::channel(CHANNEL_SIZE);
    let mut ledger = Ledger::new(receiver);

    let handle = tokio::spawn(async move {
        ledger.run().await;
        ledger
    });

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(input_file)
        .expect("Failed to read CSV file");

    for request in reader.deserialize().flatten() {
        if let Err(err) = sender.send(request).await {
            eprintln!("Error sending transfer request: {err}");
        }
    }

    drop(sender); // Close the sender to signal no more requests will be sent
    let ledger = handle
        .await
        .expect("Failed to join the ledger handling task");

    let mut accounts = ledger.accounts().values().collect::<Vec<_>>();
    accounts.sort_by_key(|account| account.account_id());

    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for account in accounts {
        if let Err(err) = writer.serialize(account) {
            eprintln!("Error writing account: {err}");
        }
    }
}
