pub mod structured_console_encoder;

use std::path::Path;
use std::sync::OnceLock;

use log::{debug, info};
use log4rs::{
    Config,
    config::{Deserializers, RawConfig},
};

use crate::http::Amount;
use crate::log::structured_console_encoder::StructuredConsoleEncoderDeserializer;

/// Initializes logging
pub fn init_logging() {
    let mut deserializers = Deserializers::default();
    deserializers.insert("structured_console", StructuredConsoleEncoderDeserializer);

    let config_path = "log4rs.yml";
    let path = Path::new(config_path);

    if path.exists() {
        match log4rs::init_file(path, deserializers) {
            Ok(_) => {
                info!(
                    path = config_path;
                    "Logging initialized from external configuration"
                );
                return;
            },
            Err(e) => {
                panic!("Failed to load external log4rs.yml: {}", e);
            },
        }
    }

    let yaml_content = include_str!("../../resources/default_log4rs.yml");
    let raw_config: RawConfig =
        serde_yaml::from_str(yaml_content).expect("Embedded logging configuration is invalid YAML");

    let (appenders, errors) = raw_config.appenders_lossy(&deserializers);
    if !errors.is_empty() {
        panic!("Errors parsing embedded appenders: {:?}", errors);
    }

    let config = Config::builder()
        .appenders(appenders)
        .loggers(raw_config.loggers())
        .build(raw_config.root())
        .expect("Failed to build logging config");

    log4rs::init_config(config).expect("Failed to initialize logging from embedded config");

    debug!("Logging initialized from embedded defaults (no external log4rs.yml found)");
}

fn reveal_pii() -> bool {
    static REVEAL_PII_CACHE: OnceLock<bool> = OnceLock::new();

    *REVEAL_PII_CACHE.get_or_init(|| {
        std::env::var("PIFY_REVEAL_PII")
            .map(|v| {
                let val = v.to_lowercase();
                val == "true" || val == "1"
            })
            .unwrap_or(false)
    })
}

/// Masks a wallet identifier or address, keeping only the first and last
/// six characters. If PIFY_REVEAL_PII is true, returns the original string.
pub fn mask_string(s: &str) -> String {
    if reveal_pii() {
        return s.to_string();
    }

    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 12 {
        return "***".to_string();
    }

    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 6..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Returns a redacted placeholder for amounts.
/// If PIFY_REVEAL_PII is true, returns the actual amount.
pub fn mask_amount(amount: Amount) -> String {
    if reveal_pii() {
        return amount.to_string();
    }

    "<REDACTED>".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // These assume PIFY_REVEAL_PII is not set in the test environment.

    #[test]
    fn short_identifiers_are_fully_masked() {
        assert_eq!(mask_string("w2"), "***");
        assert_eq!(mask_string("123456789012"), "***");
    }

    #[test]
    fn long_addresses_keep_head_and_tail() {
        assert_eq!(
            mask_string("TQn9Y2khEsLJW1ChVWFMSMeRDow5KcbLSE"),
            "TQn9Y2...KcbLSE"
        );
        assert_eq!(mask_string("кошелёк-получателя-001"), "кошелё...ля-001");
    }

    #[test]
    fn amounts_are_redacted() {
        assert_eq!(mask_amount(Amount::from(10.5)), "<REDACTED>");
    }
}
