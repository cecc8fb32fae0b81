use std::fs;
use std::path::PathBuf;

use streamgraph::api::config_schema;

const DEFAULT_OUTPUT_PATH: &str = "dist/index.json";

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let output = parse_args()?;
    let serialized = config_schema()
        .to_json_pretty()
        .map_err(|err| format!("failed to serialize schema: {err}"))?;

    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|err| format!("failed to create `{}`: {err}", parent.display()))?;
    }
    fs::write(&output, format!("{serialized}\n"))
        .map_err(|err| format!("failed to write `{}`: {err}", output.display()))?;

    println!("wrote config schema to {}", output.display());
    Ok(())
}

fn parse_args() -> Result<PathBuf, String> {
    let mut output = PathBuf::from(DEFAULT_OUTPUT_PATH);

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = PathBuf::from(value);
            }
            "-h" | "--help" => {
                println!("Usage: cargo run --bin emit_config_schema -- [--output <index.json>]");
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`"));
            }
        }
    }

    Ok(output)
}
