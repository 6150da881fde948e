//! RBX command-line client
//!
//! Usage:
//!   rbx keygen                               # New key, public key and address
//!   rbx --testnet from-mnemonic "..." -a 2   # Testnet account 2 of a phrase
//!   rbx balance RNZZecHLuoqUzNc9oE8ErkPFV1zJdvDBAH
//!   rbx send --from R... --to R... --amount 1.5 --dry-run

use std::process;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rbx_sdk::config::Command;
use rbx_sdk::crypto::{
    account_path, generate_mnemonic, private_key_from_mnemonic, Address, Network, PrivateKey,
    Signature, WordCount,
};
use rbx_sdk::explorer::{Block, ExplorerClient};
use rbx_sdk::{Config, TransactionService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }

    init_logging(&config.log_level)?;

    run(config).await
}

/// RUST_LOG takes precedence over --log-level.
fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).context("invalid --log-level")?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn run(config: Config) -> anyhow::Result<()> {
    let network = config.network();

    match &config.command {
        Command::Keygen => {
            let key = PrivateKey::generate()?;
            print_key(&key, network);
        }
        Command::Mnemonic { words } => {
            let phrase = generate_mnemonic(WordCount::try_from(*words)?)?;
            println!("{}", phrase);
        }
        Command::FromMnemonic { phrase, account } => {
            let key = private_key_from_mnemonic(phrase, *account)?;
            println!("Path:        {}", account_path(*account)?);
            print_key(&key, network);
        }
        Command::Address { key } => {
            let key = PrivateKey::from_hex(key)?;
            println!("{}", key.address(network));
        }
        Command::Public { key } => {
            let key = PrivateKey::from_hex(key)?;
            println!("{}", key.public_key().to_hex());
        }
        Command::Sign { hash, key } => {
            let key = PrivateKey::from_hex(key)?;
            println!("{}", Signature::sign(hash, &key));
        }
        Command::Verify { hash, signature } => {
            let signature: Signature = signature.parse()?;
            let signer = Address::from_public_key(signature.public_key(), network);
            println!("Signer:  {}", signer);
            if !signature.verify(hash) {
                bail!("signature does not match hash {}", hash);
            }
            println!("Valid:   true");
        }
        Command::Blocks { limit, page } => {
            let explorer = ExplorerClient::new(config.explorer_config());
            let blocks = explorer.blocks(*limit, *page).await?;
            println!(
                "Page {} of {} ({} blocks total)",
                blocks.page, blocks.num_pages, blocks.count
            );
            for block in &blocks.results {
                println!(
                    "{:>10}  {}  {:>4} tx  {}",
                    block.height, block.hash, block.number_of_transactions, block.date_crafted
                );
            }
        }
        Command::LatestBlock => {
            let explorer = ExplorerClient::new(config.explorer_config());
            print_block(&explorer.latest_block().await?);
        }
        Command::Balance { address } => {
            let explorer = ExplorerClient::new(config.explorer_config());
            println!("{}", explorer.balance(address).await);
        }
        Command::Send { key, dry_run, .. } => {
            let options = config.tx_options().context("missing transaction options")?;
            let key = PrivateKey::from_hex(key)?;

            let from: Address = options.from_address.parse()?;
            if key.address(from.network()).to_string() != options.from_address {
                bail!("private key does not belong to {}", options.from_address);
            }

            info!(
                from = %options.from_address,
                to = %options.to_address,
                amount = options.amount,
                tx_type = %options.tx_type,
                dry_run = *dry_run,
                "sending transaction"
            );
            let service = TransactionService::new(config.wallet_config());
            match service
                .build_and_send_transaction(&options, &key, *dry_run)
                .await
            {
                Some(hash) => println!("{}", hash),
                None => bail!("transaction was not sent"),
            }
        }
    }

    Ok(())
}

fn print_key(key: &PrivateKey, network: Network) {
    println!("Private Key: {}", key.to_hex());
    println!("Public Key:  {}", key.public_key().to_hex());
    println!("Address:     {}", key.address(network));
}

fn print_block(block: &Block) {
    println!("Height:       {}", block.height);
    println!("Hash:         {}", block.hash);
    println!("Previous:     {}", block.previous_hash);
    println!("Validator:    {}", block.validator_address);
    println!("Crafted:      {} ({} ms)", block.date_crafted, block.craft_time);
    println!("Transactions: {}", block.number_of_transactions);
    println!("Reward:       {}", block.total_reward);
    println!("Amount:       {}", block.total_amount);
}
