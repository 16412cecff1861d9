//! Wrapped-key signer CLI.
//!
//! # Commands
//!
//! ```text
//! mint-pkp   → mint an identity for the configured account
//! generate   → create a wrapped key under a PKP
//! quote      → fetch a swap quote
//! sign       → sign a base64 transaction with a wrapped key
//! swap       → quote + build + sign a SOL → USDC swap
//! ```
//!
//! Requires `ETHEREUM_PRIVATE_KEY` in the environment.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use wrapped_key_signer::config::{self, AppConfig};
use wrapped_key_signer::jupiter::{JupiterClient, QuoteRequest, SOL_MINT, USDC_MINT};
use wrapped_key_signer::observability::logging;
use wrapped_key_signer::{
    Chain, HttpSigningNetwork, SignRequest, SigningMode, SolanaCluster, UnsignedTransaction,
    WrappedKeyGenerator, WrappedKeySigner,
};

#[derive(Parser)]
#[command(name = "wrapped-key-signer")]
#[command(about = "Sign Solana transactions with network-held wrapped keys", long_about = None)]
struct Cli {
    /// Settings file (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint a PKP owned by the configured account
    MintPkp,
    /// Generate a wrapped key under a PKP
    Generate {
        #[arg(long)]
        pkp_public_key: String,
        #[arg(long, default_value = "solana")]
        chain: Chain,
        #[arg(long, default_value = "wrapped-key-signer")]
        memo: String,
    },
    /// Fetch a swap quote
    Quote {
        #[arg(long, default_value = SOL_MINT)]
        input_mint: String,
        #[arg(long, default_value = USDC_MINT)]
        output_mint: String,
        /// Amount in base units of the input mint
        #[arg(long, default_value_t = 1_000_000_000)]
        amount: u64,
        #[arg(long)]
        slippage_bps: Option<u16>,
    },
    /// Sign a base64 transaction
    Sign {
        #[arg(long)]
        pkp_public_key: String,
        #[arg(long)]
        key_id: String,
        /// Base64 wire-format transaction
        #[arg(long)]
        transaction: String,
        #[arg(long, default_value = "mainnet-beta")]
        cluster: SolanaCluster,
        #[arg(long)]
        mode: Option<SigningMode>,
        #[arg(long)]
        broadcast: bool,
    },
    /// Quote, build and sign a SOL → USDC swap
    Swap {
        #[arg(long)]
        pkp_public_key: String,
        #[arg(long)]
        key_id: String,
        /// Solana public key of the wrapped key
        #[arg(long)]
        public_key: String,
        #[arg(long, default_value_t = 1_000_000_000)]
        lamports: u64,
        #[arg(long)]
        mode: Option<SigningMode>,
        #[arg(long)]
        broadcast: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Fail on a missing key before anything touches the network.
    let config = config::load_config(cli.config.as_deref())?;
    logging::init(&config.settings.observability.log_level);

    tracing::info!(
        gateway_url = %config.settings.network.gateway_url,
        network = %config.settings.network.network_name,
        mode = %config.settings.signing.mode,
        "Configuration loaded"
    );

    match cli.command {
        Commands::MintPkp => {
            let network = HttpSigningNetwork::new(&config.settings.network)?;
            let pkp = WrappedKeyGenerator::new(&config, &network)?.mint_pkp().await?;
            print_json(&pkp)?;
        }
        Commands::Generate {
            pkp_public_key,
            chain,
            memo,
        } => {
            let network = HttpSigningNetwork::new(&config.settings.network)?;
            let key = WrappedKeyGenerator::new(&config, &network)?
                .generate(&pkp_public_key, chain, &memo)
                .await?;
            print_json(&key)?;
        }
        Commands::Quote {
            input_mint,
            output_mint,
            amount,
            slippage_bps,
        } => {
            let request = QuoteRequest {
                input_mint,
                output_mint,
                amount,
                slippage_bps: slippage_bps.unwrap_or(config.settings.jupiter.slippage_bps),
            };
            let quote = JupiterClient::new(&config.settings.jupiter).quote(&request).await?;
            print_json(quote.raw())?;
        }
        Commands::Sign {
            pkp_public_key,
            key_id,
            transaction,
            cluster,
            mode,
            broadcast,
        } => {
            let request = SignRequest {
                pkp_public_key,
                chain: Chain::Solana,
                key_id,
                transaction: UnsignedTransaction::new(transaction, cluster),
                broadcast,
            };
            sign(&config, mode, &request).await?;
        }
        Commands::Swap {
            pkp_public_key,
            key_id,
            public_key,
            lamports,
            mode,
            broadcast,
        } => {
            let jupiter = JupiterClient::new(&config.settings.jupiter);
            let quote = QuoteRequest::sol_to_usdc(lamports, config.settings.jupiter.slippage_bps);
            let transaction = jupiter.fetch_swap(&quote, &public_key).await?;

            let request = SignRequest {
                pkp_public_key,
                chain: Chain::Solana,
                key_id,
                transaction,
                broadcast,
            };
            sign(&config, mode, &request).await?;
        }
    }

    Ok(())
}

async fn sign(
    config: &AppConfig,
    mode: Option<SigningMode>,
    request: &SignRequest,
) -> Result<(), Box<dyn std::error::Error>> {
    let network = HttpSigningNetwork::new(&config.settings.network)?;
    let mut signer = WrappedKeySigner::new(config, network)?;
    if let Some(mode) = mode {
        signer = signer.with_mode(mode);
    }

    let signed = signer.sign(request).await?;
    println!("{}", signed);
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
