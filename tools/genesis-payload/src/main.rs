extern crate pretty_env_logger;

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use consensus_types::{
    beacon::ExecutionPayloadHeader, payload::ExecutableData, tree_hash::TreeHash,
};
use pretty_env_logger::env_logger::fmt::TimestampPrecision;
use serde_json::Value;
use std::{fs, path::PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: CliCommands,
}

#[derive(Subcommand)]
enum CliCommands {
    /// Add the execution payload header of the genesis block to the genesis file
    #[clap(visible_alias("ep"))]
    ExecutionPayload(ExecutionPayloadArgs),
}

#[derive(Args)]
struct ExecutionPayloadArgs {
    /// Path to the execution genesis block in the engine API JSON form
    executable_data: PathBuf,

    /// Path to the consensus genesis file to update
    #[arg(long = "genesis", env = "GENESIS_FILE", default_value = "./config/genesis.json")]
    genesis: PathBuf,

    /// Fail instead of truncating oversized extra data
    #[arg(long = "strict", default_value_t = false)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp(Some(TimestampPrecision::Seconds))
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    match cli.command {
        CliCommands::ExecutionPayload(args) => add_execution_payload(args),
    }
}

fn add_execution_payload(args: ExecutionPayloadArgs) -> anyhow::Result<()> {
    let data = fs::read(&args.executable_data).with_context(|| {
        format!(
            "Failed to read executable data from {}",
            args.executable_data.display()
        )
    })?;
    let data: ExecutableData =
        serde_json::from_slice(&data).context("Failed to parse executable data")?;

    let header = build_header(&data, args.strict)?;

    let genesis = fs::read(&args.genesis)
        .with_context(|| format!("Failed to read genesis file {}", args.genesis.display()))?;
    let mut genesis: Value =
        serde_json::from_slice(&genesis).context("Failed to parse genesis file")?;

    inject_header(&mut genesis, &header)?;

    let genesis = serde_json::to_vec_pretty(&genesis)?;
    fs::write(&args.genesis, genesis)
        .with_context(|| format!("Failed to write genesis file {}", args.genesis.display()))?;

    log::info!(
        "Execution payload header of block #{} written to {}",
        header.block_number,
        args.genesis.display()
    );
    println!("Execution payload header root: {:?}", header.tree_hash_root());

    Ok(())
}

fn build_header(data: &ExecutableData, strict: bool) -> anyhow::Result<ExecutionPayloadHeader> {
    let header = match strict {
        true => ExecutionPayloadHeader::try_from_executable_data_strict(data),
        false => ExecutionPayloadHeader::from_executable_data(data),
    };

    header.context("Failed to convert executable data to execution payload header")
}

/// Sets `app_state.beacon.execution_payload_header`, creating the `beacon` entry if needed.
fn inject_header(genesis: &mut Value, header: &ExecutionPayloadHeader) -> anyhow::Result<()> {
    let app_state = genesis
        .get_mut("app_state")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| anyhow!("Genesis file has no app_state object"))?;

    let beacon = app_state
        .entry("beacon")
        .or_insert_with(|| Value::Object(Default::default()))
        .as_object_mut()
        .ok_or_else(|| anyhow!("app_state.beacon is not an object"))?;

    beacon.insert(
        "execution_payload_header".into(),
        serde_json::to_value(header).context("Failed to serialize execution payload header")?,
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn executable_data(extra_data: Vec<u8>) -> ExecutableData {
        ExecutableData {
            number: 0,
            gas_limit: 30_000_000,
            extra_data,
            ..Default::default()
        }
    }

    #[test]
    fn header_is_injected() {
        let mut genesis = json!({
            "chain_id": "beacond-2061",
            "app_state": {
                "beacon": { "deposits": [] },
                "bank": {}
            }
        });
        let header = build_header(&executable_data(vec![]), false).unwrap();

        inject_header(&mut genesis, &header).unwrap();

        assert_eq!(genesis["chain_id"], "beacond-2061");
        assert_eq!(genesis["app_state"]["beacon"]["deposits"], json!([]));
        assert_eq!(
            genesis["app_state"]["beacon"]["execution_payload_header"]["gas_limit"],
            "30000000"
        );

        let stored: ExecutionPayloadHeader = serde_json::from_value(
            genesis["app_state"]["beacon"]["execution_payload_header"].clone(),
        )
        .unwrap();
        assert_eq!(stored, header);
    }

    #[test]
    fn beacon_entry_is_created() {
        let mut genesis = json!({ "app_state": {} });
        let header = build_header(&executable_data(vec![]), false).unwrap();

        inject_header(&mut genesis, &header).unwrap();

        assert!(genesis["app_state"]["beacon"]["execution_payload_header"].is_object());
    }

    #[test]
    fn malformed_genesis() {
        let header = ExecutionPayloadHeader::default();

        assert!(inject_header(&mut json!({}), &header).is_err());
        assert!(inject_header(&mut json!({ "app_state": { "beacon": 1 } }), &header).is_err());
    }

    #[test]
    fn strict_mode_rejects_long_extra_data() {
        let data = executable_data(vec![1; 33]);

        assert_eq!(build_header(&data, false).unwrap().extra_data.0.len(), 32);
        assert!(build_header(&data, true).is_err());
    }
}
