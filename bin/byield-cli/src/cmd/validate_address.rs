use argh::FromArgs;
use byield_btc_tx::parse_address;
use byield_btcio::BitcoinApi;
use tracing::debug;

use super::Context;

/// Check a bitcoin address against the selected network.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "validate-address")]
pub(crate) struct ValidateAddressArgs {
    #[argh(positional)]
    /// address to check
    pub address: String,
}

pub(crate) async fn validate(args: ValidateAddressArgs, ctx: &Context) -> anyhow::Result<()> {
    match parse_address(&args.address, ctx.network) {
        Ok(address) => println!("{address}: valid {} address", ctx.network),
        Err(err) => {
            println!("invalid: {err}");
            return Ok(());
        }
    }

    // the server check is best effort; networks without a mempool api only get the local one
    let mempool = match ctx.mempool() {
        Ok(mempool) => mempool,
        Err(err) => {
            debug!(%err, "skipping server validation");
            return Ok(());
        }
    };
    let verdict = mempool.validate_address(&args.address).await?;
    match (verdict.is_valid, verdict.error) {
        (true, _) => println!(
            "server: valid{}",
            verdict
                .script_pubkey
                .map(|s| format!(", script {s}"))
                .unwrap_or_default()
        ),
        (false, err) => println!("server: invalid: {}", err.unwrap_or_default()),
    }
    Ok(())
}
