use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::error::{Result, VerifyError};

/// TOML settings file, overlaid on top of the CLI arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    pub auth: Option<AuthConfig>,
    pub app_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub verify_endpoint: Option<String>,
    pub log_endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub attempts: Option<u32>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(VerifyError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| VerifyError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

/// Replace `${VAR}` references with environment values; unknown
/// variables are left as-is.
fn substitute_env_vars(content: &str) -> String {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();
    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parses_full_settings() {
        let config = FileConfig::from_toml_str(
            r#"
app_id = "pharmacy-west"

[service]
verify_endpoint = "https://api.example.com/verify"
log_endpoint = "https://api.example.com/log"

[auth]
endpoint = "https://auth.example.com"
attempts = 5
"#,
        )
        .unwrap();

        assert_eq!(config.app_id.as_deref(), Some("pharmacy-west"));
        assert_eq!(
            config.service.verify_endpoint.as_deref(),
            Some("https://api.example.com/verify")
        );
        let auth = config.auth.unwrap();
        assert_eq!(auth.attempts, Some(5));
        assert_eq!(auth.token, None);
    }

    #[test]
    fn test_missing_sections_default() {
        let config = FileConfig::from_toml_str("").unwrap();
        assert_eq!(config.service.verify_endpoint, None);
        assert!(config.auth.is_none());
        assert!(config.app_id.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PHARMACHECK_TEST_TOKEN", "secret-token");

        let config = FileConfig::from_toml_str(
            r#"
[auth]
endpoint = "https://auth.example.com"
token = "${PHARMACHECK_TEST_TOKEN}"
"#,
        )
        .unwrap();

        assert_eq!(
            config.auth.unwrap().token.as_deref(),
            Some("secret-token")
        );
    }

    #[test]
    fn test_unknown_env_var_left_in_place() {
        let config = FileConfig::from_toml_str(
            r#"
[auth]
token = "${PHARMACHECK_UNSET_VARIABLE}"
"#,
        )
        .unwrap();

        assert_eq!(
            config.auth.unwrap().token.as_deref(),
            Some("${PHARMACHECK_UNSET_VARIABLE}")
        );
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = FileConfig::from_toml_str("app_id = [broken").unwrap_err();
        assert!(matches!(err, VerifyError::ConfigError { .. }));
    }

    #[test]
    fn test_from_file_reads_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "app_id = \"pharmacy-east\"").unwrap();

        let config = FileConfig::from_file(file.path()).unwrap();
        assert_eq!(config.app_id.as_deref(), Some("pharmacy-east"));
    }
}
