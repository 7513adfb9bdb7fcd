//! Binary settings loaded via OrthoConfig.

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_LEDGER_PATH: &str = "cdms-ledger.json";

/// Settings shared by every `cdms` subcommand.
///
/// Command-line flags override these values.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CDMS")]
pub struct CdmsSettings {
    /// Snapshot file holding the ledger.
    pub ledger_path: Option<String>,
    /// Organization the static identity resolver reports for the caller.
    pub caller_org: Option<String>,
    /// Emit JSON log lines instead of human-readable ones.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl CdmsSettings {
    /// Return the configured snapshot path, falling back to the default.
    pub fn ledger_path(&self) -> Utf8PathBuf {
        self.ledger_path
            .as_deref()
            .map_or_else(|| Utf8PathBuf::from(DEFAULT_LEDGER_PATH), Utf8PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> CdmsSettings {
        CdmsSettings::load_from_iter([OsString::from("cdms")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("CDMS_LEDGER_PATH", None::<String>),
            ("CDMS_CALLER_ORG", None::<String>),
            ("CDMS_JSON_LOGS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.ledger_path(), Utf8PathBuf::from(DEFAULT_LEDGER_PATH));
        assert!(settings.caller_org.is_none());
        assert!(!settings.json_logs);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CDMS_LEDGER_PATH", Some("/tmp/cdms/ledger.json".to_owned())),
            ("CDMS_CALLER_ORG", Some("OrgB".to_owned())),
            ("CDMS_JSON_LOGS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.ledger_path(), Utf8PathBuf::from("/tmp/cdms/ledger.json"));
        assert_eq!(settings.caller_org.as_deref(), Some("OrgB"));
        assert!(settings.json_logs);
    }
}
