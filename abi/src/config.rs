use serde::{Deserialize, Serialize};

/// Configuration parameters for the witness encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Pad short string elements nested in arrays with zero bytes, and
    /// truncate overlong ones, up to their declared length. When unset,
    /// nested strings must match their declared length exactly.
    ///
    /// Top-level strings are always strict, regardless of this flag.
    pub pad_string_elements: bool,
    /// Require one or more hexadecimal digits after the `0x` prefix of
    /// scalar strings. The default accepts any prefixed string verbatim.
    pub require_hex_digits: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Config {
    /// Default configuration instance.
    pub const DEFAULT: Self = Self {
        pad_string_elements: true,
        require_hex_digits: false,
    };

    /// Set the padding behavior for string elements nested in arrays.
    pub fn with_pad_string_elements(
        &mut self,
        pad_string_elements: bool,
    ) -> &mut Self {
        self.pad_string_elements = pad_string_elements;
        self
    }

    /// Set the strict hex digits requirement for scalar strings.
    pub fn with_require_hex_digits(
        &mut self,
        require_hex_digits: bool,
    ) -> &mut Self {
        self.require_hex_digits = require_hex_digits;
        self
    }
}

#[test]
fn default_config_is_backend_compatible() {
    assert_eq!(Config::default(), Config::DEFAULT);
    assert!(Config::DEFAULT.pad_string_elements);
    assert!(!Config::DEFAULT.require_hex_digits);
}

#[test]
fn builder_functions_works() {
    assert!(
        !Config::default()
            .with_pad_string_elements(false)
            .pad_string_elements
    );

    assert!(
        Config::default()
            .with_require_hex_digits(true)
            .require_hex_digits
    );
}
