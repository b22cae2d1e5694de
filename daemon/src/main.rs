//! Incinerator console: watch the contract, burn, and browse the burn log.

mod shutdown;

use std::cell::RefCell;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use incinerator_contract::{JsonRpcClient, RpcIncinerator, RpcIncineratorConfig};
use incinerator_panel::panel::{
    incinerate, refresh_contract, refresh_price, refresh_wallet, switch_network,
};
use incinerator_panel::{
    BurnLog, BurnLogFeed, BurnLogView, Dashboard, NotificationLevel, Panel, PanelConfig,
};
use incinerator_price::DexScreenerClient;
use incinerator_types::{Address, ChainId, SystemClock};
use incinerator_utils::{init_logging, LogFormat};
use tokio::task::LocalSet;

/// Upper bound on the one-shot price lookup in `status`.
const STATUS_PRICE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "incinerator", about = "Incinerator contract console")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "INCINERATOR_CONFIG")]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint.
    #[arg(long, env = "INCINERATOR_RPC_URL")]
    rpc_url: Option<String>,

    /// Deployed Incinerator contract address.
    #[arg(long, env = "INCINERATOR_CONTRACT")]
    contract: Option<Address>,

    /// Chain the wallet must be on (defaults to Base, 8453).
    #[arg(long, env = "INCINERATOR_CHAIN_ID")]
    chain_id: Option<u64>,

    /// Account to burn from (defaults to the endpoint's first account).
    #[arg(long, env = "INCINERATOR_ACCOUNT")]
    account: Option<Address>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "INCINERATOR_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "INCINERATOR_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Live panel: countdown, stats and recent burns, refreshed until Ctrl-C.
    Watch,
    /// Read the contract once and print the panel.
    Status,
    /// Call incinerate() if the contract is ready.
    Burn,
    /// Print recent burns.
    Log {
        /// Number of burns to show (at most 20).
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Ask the wallet to switch to the configured chain.
    SwitchNetwork,
}

/// File settings overlaid with CLI flags and env vars.
fn load_config(cli: &Cli) -> anyhow::Result<PanelConfig> {
    let mut config = match &cli.config {
        Some(path) => PanelConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => PanelConfig::default(),
    };

    if let Some(rpc_url) = &cli.rpc_url {
        config.rpc_url = rpc_url.clone();
    }
    if let Some(contract) = cli.contract {
        config.contract_address = Some(contract);
    }
    if let Some(chain_id) = cli.chain_id {
        config.chain_id = ChainId(chain_id);
    }
    if let Some(account) = cli.account {
        config.account = Some(account);
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    config.validate()?;
    Ok(config)
}

fn connect(config: &PanelConfig) -> anyhow::Result<RpcIncinerator> {
    let contract = config.require_contract()?;
    let rpc = JsonRpcClient::new(config.rpc_url.clone())?;
    let rpc_config = RpcIncineratorConfig {
        from: config.account,
        receipt_timeout: config.receipt_timeout(),
        ..RpcIncineratorConfig::new(contract)
    };
    Ok(RpcIncinerator::new(rpc, rpc_config))
}

fn render_watch(panel: &Panel, log: &BurnLog) {
    let mut out = std::io::stdout().lock();
    // Clear screen, cursor home.
    let _ = write!(out, "\x1b[2J\x1b[H");
    let _ = writeln!(out, "{}\n", panel.view());
    let _ = writeln!(out, "{}", BurnLogView::new(log, panel.symbol()));
    let _ = out.flush();
}

async fn run(cli: Cli, config: PanelConfig) -> anyhow::Result<()> {
    let chain = Rc::new(connect(&config)?);
    let clock = SystemClock;

    match cli.command {
        Command::Watch => {
            let price = Rc::new(DexScreenerClient::with_url(
                &config.price_api_url,
                config.token_address,
            )?);
            tracing::info!(
                contract = %chain.contract(),
                rpc = %config.rpc_url,
                "watching incinerator"
            );
            let dashboard =
                Dashboard::activate(&config, chain, price, Rc::new(clock), render_watch);
            shutdown::wait_for_signal().await;
            drop(dashboard);
        }
        Command::Status => {
            let panel = RefCell::new(Panel::new(
                config.token_symbol.clone(),
                config.target_network(),
            ));
            let price = DexScreenerClient::with_url(&config.price_api_url, config.token_address)?;
            refresh_wallet(&panel, &*chain).await;
            refresh_contract(&panel, &*chain, &clock).await;
            if tokio::time::timeout(STATUS_PRICE_TIMEOUT, refresh_price(&panel, &price))
                .await
                .is_err()
            {
                tracing::debug!("price lookup timed out");
            }
            println!("{}", panel.borrow().view());
        }
        Command::Burn => {
            let panel = RefCell::new(Panel::new(
                config.token_symbol.clone(),
                config.target_network(),
            ));
            refresh_wallet(&panel, &*chain).await;
            refresh_contract(&panel, &*chain, &clock).await;
            let notification = incinerate(&panel, &*chain).await?;
            println!("{}", notification.message);
            if notification.level == NotificationLevel::Error {
                anyhow::bail!("burn failed");
            }
        }
        Command::Log { limit } => {
            let mut feed = BurnLogFeed::new(config.event_start_block, config.max_block_range);
            let mut log = BurnLog::new();
            log.ingest(feed.poll(&*chain).await?);
            println!(
                "{}",
                BurnLogView::new(&log, &config.token_symbol).limited(limit)
            );
        }
        Command::SwitchNetwork => {
            let panel = RefCell::new(Panel::new(
                config.token_symbol.clone(),
                config.target_network(),
            ));
            switch_network(&panel, &*chain).await?;
            let wallet = panel.borrow().wallet().clone();
            match wallet.chain_id {
                Some(chain_id) => println!("wallet on chain {chain_id}"),
                None => println!("switch requested; wallet did not report its chain"),
            }
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(config.log_format, &config.log_level);

    if let Some(path) = &cli.config {
        tracing::info!("loaded config from {}", path.display());
    }

    LocalSet::new().run_until(run(cli, config)).await
}
