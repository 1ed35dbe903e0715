use std::{env, path::PathBuf};

use argh::FromArgs;
use byield_primitives::BitcoinNetwork;

use crate::cmd::Command;

/// Settings overridable by environment.
#[derive(Debug, Clone, Default)]
pub(crate) struct EnvArgs {
    /// Config file used when `--config` is absent
    pub config: Option<PathBuf>,
    /// Directory for file logging
    pub log_dir: Option<PathBuf>,
    /// Emit JSON logs
    pub log_json: Option<bool>,
    /// Service label to include in service name
    pub service_label: Option<String>,
}

impl EnvArgs {
    pub(crate) fn from_env() -> Self {
        Self {
            config: env::var_os("BYIELD_CONFIG").map(PathBuf::from),
            log_dir: env::var_os("BYIELD_LOG_DIR").map(PathBuf::from),
            log_json: env::var("BYIELD_LOG_JSON").ok().and_then(|v| parse_flag(&v)),
            service_label: env::var("BYIELD_SVC_LABEL").ok(),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, FromArgs)]
#[argh(description = "BYield nBTC bridge client")]
pub(crate) struct Args {
    #[argh(option, short = 'c', description = "path to the TOML config file")]
    pub config: Option<PathBuf>,

    #[argh(
        option,
        short = 'n',
        default = "BitcoinNetwork::Mainnet",
        description = "bitcoin network: mainnet, testnet, regtest or devnet"
    )]
    pub network: BitcoinNetwork,

    #[argh(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_values() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn network_defaults_to_mainnet() {
        let args = Args::from_args(&["byield"], &["convert", "1.5"]).unwrap();
        assert_eq!(args.network, BitcoinNetwork::Mainnet);
        assert_eq!(args.config, None);
    }

    #[test]
    fn network_option() {
        let args =
            Args::from_args(&["byield"], &["-n", "testnet", "fees"]).unwrap();
        assert_eq!(args.network, BitcoinNetwork::Testnet);
        assert!(Args::from_args(&["byield"], &["-n", "signet", "fees"]).is_err());
    }
}
