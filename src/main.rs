//! ATM Bank CLI
//!
//! Interactive menu over a file-backed account store.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --data-file bank.json
//! cargo run -- --format csv --data-file bank.csv
//! cargo run -- --manager-pin 4242
//! RUST_LOG=debug cargo run
//! ```
//!
//! The menu reads from stdin and writes to stdout. Log output goes to stderr.
//!
//! # Exit Codes
//!
//! - 0: Session ended normally
//! - 1: Error (corrupt or unreadable data file, I/O failure)

use atm_bank::cli;
use atm_bank::core::AccountStore;
use atm_bank::io::create_backend;
use atm_bank::menu::Menu;
use log::{error, info};
use std::io;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = cli::parse_args();
    let path = args.data_path();
    info!("Using {:?} data file '{}'", args.format, path.display());

    // A corrupt data file aborts before the menu starts, leaving the file as is
    let backend = create_backend(args.format, &path);
    let mut store = match AccountStore::open(backend, args.manager_pin) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open account store: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut menu = Menu::new(stdin.lock(), io::stdout());
    if let Err(e) = menu.run(&mut store) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
