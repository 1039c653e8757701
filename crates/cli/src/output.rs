use crate::{commands::OutputArgs, error::CliError};
use serde::Serialize;

fn to_json<T: Serialize>(value: &T, compact: bool) -> Result<String, CliError> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}

/// Writes `value` as JSON to the requested file, or to stdout.
pub async fn emit<T: Serialize>(value: &T, args: &OutputArgs) -> Result<(), CliError> {
    let json = to_json(value, args.compact)?;

    match &args.output {
        Some(path) => tokio::fs::write(path, json).await?,
        None => println!("{json}"),
    }
    Ok(())
}
