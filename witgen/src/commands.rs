use std::fs;
use std::io;
use std::path::Path;

use circuit_abi::{CircuitManifest, Decoder, Encoder, InputMap, Scalar};

use crate::args::{Command, ParsedArgs};
use crate::config::Config;

/// Execute a resolved command, writing its output to the requested target.
pub fn run(args: ParsedArgs, config: &Config) -> io::Result<()> {
    match args.command {
        Command::Encode {
            manifest,
            inputs,
            base,
            output,
            pretty,
        } => {
            let pretty = pretty || config.output.pretty;
            let rendered =
                encode(config.codec(), &manifest, &inputs, base, pretty)?;

            match output {
                Some(path) => fs::write(path, rendered)?,
                None => println!("{}", rendered),
            }
        }

        Command::Layout { manifest } => print!("{}", layout(&manifest)?),

        Command::Decode {
            manifest,
            witness,
            name,
            base,
        } => println!(
            "{}",
            decode(&manifest, &witness, name.as_deref(), base)?
        ),
    }

    Ok(())
}

/// Encode named inputs against a manifest into a witness map JSON document.
pub fn encode(
    codec: circuit_abi::Config,
    manifest: &Path,
    inputs: &Path,
    base: usize,
    pretty: bool,
) -> io::Result<String> {
    let manifest = load_manifest(manifest)?;

    let inputs = fs::read_to_string(inputs)?;
    let inputs: InputMap = serde_json::from_str(&inputs)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let witness = Encoder::with_base(codec, manifest.parameters(), base)
        .encode(&inputs)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    if pretty {
        serde_json::to_string_pretty(&witness)
    } else {
        serde_json::to_string(&witness)
    }
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

/// Render the per-parameter witness layout of a manifest.
pub fn layout(manifest: &Path) -> io::Result<String> {
    let manifest = load_manifest(manifest)?;

    let mut output = format!(
        "{:<24} {:<12} {:<8} {:>8} {:>16}\n",
        "name", "visibility", "kind", "leaves", "indices"
    );

    let mut offset = 0;

    for parameter in manifest.parameters() {
        let leaves = parameter.leaves();

        let indices = if leaves == 0 {
            "-".to_string()
        } else {
            format!("{}..{}", offset, offset + leaves)
        };

        let visibility = parameter
            .visibility
            .map(|v| v.as_str())
            .unwrap_or("-");

        output.push_str(&format!(
            "{:<24} {:<12} {:<8} {:>8} {:>16}\n",
            parameter.name,
            visibility,
            parameter.ty.kind(),
            leaves,
            indices
        ));

        offset += leaves;
    }

    Ok(output)
}

/// Read named values back from a solved witness column.
pub fn decode(
    manifest: &Path,
    witness: &Path,
    name: Option<&str>,
    base: usize,
) -> io::Result<String> {
    let manifest = load_manifest(manifest)?;

    if let Some(name) = name {
        if !manifest.parameters().iter().any(|p| p.name == name) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unknown parameter {}", name),
            ));
        }
    }

    let column = fs::read_to_string(witness)?;
    let column: Vec<Scalar> = serde_json::from_str(&column)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let decoder = Decoder::with_base(manifest.parameters(), &column, base);

    let mut entries = serde_json::Map::new();

    for parameter in manifest.parameters() {
        if name.map_or(false, |n| n != parameter.name) {
            continue;
        }

        let leaves = decoder.leaves(&parameter.name).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "witness column is too short for parameter {}",
                    parameter.name
                ),
            )
        })?;

        let value = match decoder.scalar(&parameter.name) {
            Some(scalar) => serde_json::Value::String(scalar.to_string()),
            None => serde_json::Value::Array(
                leaves
                    .iter()
                    .map(|s| serde_json::Value::String(s.to_string()))
                    .collect(),
            ),
        };

        entries.insert(parameter.name.clone(), value);
    }

    serde_json::to_string_pretty(&serde_json::Value::Object(entries))
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

fn load_manifest(path: &Path) -> io::Result<CircuitManifest> {
    let json = fs::read_to_string(path)?;

    CircuitManifest::from_json(&json)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
