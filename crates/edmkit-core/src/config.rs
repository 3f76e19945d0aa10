//! Client configuration.

use crate::{error::ErrorClass, request::UpdateKind};
use serde::Deserialize;
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(String),

    #[error("unknown update kind '{0}'")]
    UnknownUpdateKind(String),
}

impl ConfigError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::Configuration
    }
}

///
/// ClientConfig
///
/// Read-only settings handed to the request factory.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(try_from = "RawClientConfig")]
pub struct ClientConfig {
    /// Send every non-POST verb as POST plus an override header.
    pub use_verb_tunneling: bool,

    /// Kind applied when the caller does not pick one.
    pub default_update_kind: UpdateKind,
}

impl ClientConfig {
    #[must_use]
    pub const fn with_verb_tunneling(mut self, enabled: bool) -> Self {
        self.use_verb_tunneling = enabled;
        self
    }

    #[must_use]
    pub const fn with_default_update_kind(mut self, kind: UpdateKind) -> Self {
        self.default_update_kind = kind;
        self
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let raw: RawClientConfig =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;

        Self::try_from(raw)
    }
}

// On-disk shape; update kinds stay text until validated.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawClientConfig {
    use_verb_tunneling: bool,
    default_update_kind: Option<String>,
}

impl TryFrom<RawClientConfig> for ClientConfig {
    type Error = ConfigError;

    fn try_from(raw: RawClientConfig) -> Result<Self, Self::Error> {
        let default_update_kind = match raw.default_update_kind {
            Some(kind) => kind.parse()?,
            None => UpdateKind::default(),
        };

        Ok(Self {
            use_verb_tunneling: raw.use_verb_tunneling,
            default_update_kind,
        })
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = ClientConfig::from_toml_str("").expect("empty config is valid");

        assert_eq!(config, ClientConfig::default());
        assert!(!config.use_verb_tunneling);
        assert_eq!(config.default_update_kind, UpdateKind::Patch);
    }

    #[test]
    fn reads_both_settings() {
        let config = ClientConfig::from_toml_str(
            "use_verb_tunneling = true\ndefault_update_kind = \"Replace\"\n",
        )
        .expect("valid config");

        assert!(config.use_verb_tunneling);
        assert_eq!(config.default_update_kind, UpdateKind::Replace);
    }

    #[test]
    fn unknown_update_kind_is_reported_by_name() {
        let err = ClientConfig::from_toml_str("default_update_kind = \"upsert\"")
            .expect_err("unknown kind");

        assert!(matches!(err, ConfigError::UnknownUpdateKind(ref kind) if kind == "upsert"));
        assert_eq!(err.class(), ErrorClass::Configuration);
    }

    #[test]
    fn syntax_errors_and_unknown_keys_are_parse_errors() {
        assert!(matches!(
            ClientConfig::from_toml_str("use_verb_tunneling = "),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ClientConfig::from_toml_str("retries = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn deserializes_through_serde() {
        let json = r#"{ "use_verb_tunneling": true, "default_update_kind": "merge" }"#;
        let config: ClientConfig = serde_json::from_str(json).expect("json config");

        assert_eq!(
            config,
            ClientConfig::default()
                .with_verb_tunneling(true)
                .with_default_update_kind(UpdateKind::Merge)
        );
    }
}
