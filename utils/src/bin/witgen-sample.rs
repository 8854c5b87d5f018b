use std::env;
use std::fs;
use std::path::PathBuf;

use circuit_abi_utils::AbiGenerator;

/// Emit a generated circuit manifest and a matching input map as JSON files.
///
/// Output paths are taken from `WITGEN_MANIFEST` and `WITGEN_INPUTS`;
/// `WITGEN_SEED` and `WITGEN_PARAMETERS` tune the generation.
fn main() {
    let manifest_path: PathBuf = env::var("WITGEN_MANIFEST")
        .expect("WITGEN_MANIFEST isn't set")
        .into();

    let inputs_path: PathBuf = env::var("WITGEN_INPUTS")
        .expect("WITGEN_INPUTS isn't set")
        .into();

    let seed = env::var("WITGEN_SEED")
        .ok()
        .map(|seed| seed.parse().expect("failed to parse the seed"))
        .unwrap_or(0x348);

    let parameters = env::var("WITGEN_PARAMETERS")
        .ok()
        .map(|n| n.parse().expect("failed to parse the parameter count"))
        .unwrap_or(3);

    let mut generator = AbiGenerator::new(seed);

    let (manifest, inputs) = generator.gen_circuit(parameters);

    let manifest = serde_json::to_string_pretty(&manifest)
        .expect("failed to serialize the manifest");

    let inputs = serde_json::to_string_pretty(&inputs)
        .expect("failed to serialize the inputs");

    fs::write(&manifest_path, manifest).expect("failed to write the manifest");
    fs::write(&inputs_path, inputs).expect("failed to write the inputs");

    println!(
        "generated {} and {}",
        manifest_path.display(),
        inputs_path.display()
    );
}
