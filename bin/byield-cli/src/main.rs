//! BYield bridge client
//!
//! Builds nBTC mint deposits and Sui transactions for redeeming, bidding, lockdrop deposits and
//! nBTC swaps, and follows mints through the indexer. Signing and broadcasting are left to
//! external wallets.

mod args;
mod cmd;
mod config;

use std::process;

use anyhow::Context as _;
use args::{Args, EnvArgs};
use byield_common::logging::{self, LoggingInitConfig};
use cmd::Context;
use config::Config;
use tracing::{info, Level};

fn main() {
    let args: Args = argh::from_env();
    if let Err(e) = main_inner(args) {
        eprintln!("FATAL ERROR: {e:#}");
        process::exit(1);
    }
}

fn main_inner(args: Args) -> anyhow::Result<()> {
    let env_args = EnvArgs::from_env();
    let config_path = args.config.or_else(|| env_args.config.clone());
    let config = Config::load(config_path.as_deref())?;

    // Init the logging before we do anything else.
    init_logging(&config, &env_args)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("byield-rt")
        .build()
        .context("init: build runtime")?;

    let ctx = Context::new(config, args.network);
    info!(network = %ctx.network, "starting");
    runtime.block_on(cmd::run(args.command, &ctx))
}

/// Sets up logging from the config file, with environment overrides.
fn init_logging(config: &Config, env_args: &EnvArgs) -> anyhow::Result<()> {
    let logging_config = &config.logging;
    let service_label = env_args
        .service_label
        .as_deref()
        .or(logging_config.service_label.as_deref());
    let log_dir = env_args.log_dir.as_ref().or(logging_config.log_dir.as_ref());

    let init_config = LoggingInitConfig {
        service_base_name: "byield",
        service_label,
        service_version: Some(env!("CARGO_PKG_VERSION")),
        log_dir,
        log_file_prefix: logging_config.log_file_prefix.as_deref(),
        json_format: env_args.log_json.or(logging_config.json_format),
        default_log_prefix: "byield",
    };

    // command output owns stdout, so logs go to stderr and only warnings show unless RUST_LOG
    // says otherwise
    let lconfig = logging::logger_config(&init_config)
        .with_default_level(Level::WARN)
        .with_stderr(true);
    logging::init(lconfig).context("init: logging")?;
    Ok(())
}
