use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Provider};
use ethers::signers::{LocalWallet, Signer};

use hyperswap::shared::config::{ConfigLoader, PipelineConfig};
use hyperswap::{
    EthersSigner, HypersonicClient, QuoteService, SwapPipeline, SwapRequest, SwapStatus,
    TransactionBuilder,
};

#[derive(Parser, Debug)]
#[command(version, about = "Aggregator swap CLI: quote, build, and execute token swaps")]
struct Args {
    /// Chain id (146 = Sonic)
    #[arg(long, default_value = "146")]
    chain_id: u64,

    /// Input token address
    #[arg(long)]
    in_token: String,

    /// Output token address
    #[arg(long)]
    out_token: String,

    /// Input amount in the token's smallest unit
    #[arg(long)]
    amount: String,

    /// Slippage tolerance in percent
    #[arg(long, default_value = "1.0")]
    slippage: f64,

    /// Optional referral code
    #[arg(long)]
    ref_code: Option<u64>,

    /// RPC endpoint URL (required unless --quote-only or --prepare-only)
    #[arg(long)]
    rpc_url: Option<String>,

    /// Aggregator base URL (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Path to config file (optional)
    #[arg(long)]
    config: Option<String>,

    /// Fetch and validate a quote, then stop
    #[arg(long)]
    quote_only: bool,

    /// Quote and build the transaction without broadcasting it
    #[arg(long)]
    prepare_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let mut config = if let Some(config_path) = &args.config {
        ConfigLoader::load_config(config_path)?
    } else {
        PipelineConfig::default()
    };
    if let Some(base_url) = args.base_url {
        config.aggregator.base_url = base_url;
    }

    let request = SwapRequest {
        chain_id: args.chain_id,
        in_token: args.in_token,
        out_token: args.out_token,
        in_amount: args.amount,
        slippage: args.slippage,
        ref_code: args.ref_code,
    };

    let api = Arc::new(HypersonicClient::new(&config.aggregator)?);

    if args.quote_only || args.prepare_only {
        let quotes = QuoteService::new(api.clone())
            .with_max_slippage(config.aggregator.max_slippage_percent);
        let quote = quotes.get_quote(&request).await?;
        println!("{}", serde_json::to_string_pretty(&quote)?);
        if args.prepare_only {
            let transaction = TransactionBuilder::new(api).build(&quote).await?;
            println!("{}", serde_json::to_string_pretty(&transaction)?);
        }
        return Ok(());
    }

    let rpc_url = args
        .rpc_url
        .context("--rpc-url is required to execute a swap")?;
    let private_key = std::env::var("PRIVATE_KEY")
        .context("PRIVATE_KEY environment variable is required to execute a swap")?;
    let provider = Provider::<Http>::try_from(rpc_url.as_str())?;
    let wallet = private_key
        .parse::<LocalWallet>()?
        .with_chain_id(args.chain_id);
    let client = SignerMiddleware::new(provider, wallet);
    let signer = Arc::new(EthersSigner::new(
        client,
        Duration::from_millis(config.execution.poll_interval_ms),
    ));

    let pipeline = SwapPipeline::new(api, signer, &config);
    let receipt = pipeline.run(&request).await?;
    match receipt.status {
        SwapStatus::Confirmed { block_number } => {
            println!("Swap confirmed in block {}: {}", block_number, receipt.transaction_hash);
        }
        SwapStatus::Reverted { block_number } => {
            println!("Swap reverted in block {}: {}", block_number, receipt.transaction_hash);
        }
        SwapStatus::TimedOut => {
            println!(
                "No confirmation observed for {}; check the transaction hash on chain before retrying",
                receipt.transaction_hash
            );
        }
    }

    Ok(())
}
