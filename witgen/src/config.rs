use serde::{Deserialize, Serialize};
use toml_base_config::BaseConfig;

/// Codec compatibility parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Codec {
    pub pad_string_elements: bool,
    pub require_hex_digits: bool,
}

impl Default for Codec {
    fn default() -> Self {
        let circuit_abi::Config {
            pad_string_elements,
            require_hex_digits,
        } = circuit_abi::Config::DEFAULT;

        Self {
            pad_string_elements,
            require_hex_digits,
        }
    }
}

impl From<Codec> for circuit_abi::Config {
    fn from(config: Codec) -> Self {
        let Codec {
            pad_string_elements,
            require_hex_digits,
        } = config;

        Self {
            pad_string_elements,
            require_hex_digits,
        }
    }
}

/// Output rendering parameters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub pretty: bool,
}

/// App configuration
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub codec: Codec,
    pub output: Output,
}

impl Config {
    /// Create an instance of the codec configuration
    pub fn codec(&self) -> circuit_abi::Config {
        self.codec.into()
    }
}

impl BaseConfig for Config {
    const PACKAGE: &'static str = env!("CARGO_PKG_NAME");
}

#[test]
fn default_config_matches_the_codec_defaults() {
    assert_eq!(Config::default().codec(), circuit_abi::Config::DEFAULT);
}
