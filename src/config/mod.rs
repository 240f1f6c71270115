pub mod file;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "pharmacheck")]
#[command(about = "Client-side pharmaceutical serial verification")]
pub struct CliConfig {
    /// Serial or batch numbers to verify
    #[arg(required = true)]
    pub serials: Vec<String>,

    #[arg(long, default_value = "http://127.0.0.1:5000/api/verify")]
    pub verify_endpoint: String,

    #[arg(long, default_value = "http://127.0.0.1:5000/api/log")]
    pub log_endpoint: String,

    /// Identity provider endpoint; no sign-in is performed when omitted
    #[arg(long)]
    pub auth_endpoint: Option<String>,

    /// Custom sign-in token; sign-in is anonymous when omitted
    #[arg(long)]
    pub auth_token: Option<String>,

    #[arg(long, default_value = "3")]
    pub auth_attempts: u32,

    #[arg(long, default_value = "default-app-id")]
    pub app_id: String,

    /// Verify against the built-in stock table instead of the remote service
    #[arg(long)]
    pub offline: bool,

    /// Load additional settings from a TOML file
    #[arg(long)]
    pub config_file: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Overlay values from a settings file. File values win over CLI
    /// defaults for the fields they set.
    pub fn apply_file(&mut self, file: file::FileConfig) {
        if let Some(endpoint) = file.service.verify_endpoint {
            self.verify_endpoint = endpoint;
        }
        if let Some(endpoint) = file.service.log_endpoint {
            self.log_endpoint = endpoint;
        }
        if let Some(auth) = file.auth {
            if auth.endpoint.is_some() {
                self.auth_endpoint = auth.endpoint;
            }
            if auth.token.is_some() {
                self.auth_token = auth.token;
            }
            if let Some(attempts) = auth.attempts {
                self.auth_attempts = attempts;
            }
        }
        if let Some(app_id) = file.app_id {
            self.app_id = app_id;
        }
    }
}

impl ConfigProvider for CliConfig {
    fn verify_endpoint(&self) -> &str {
        &self.verify_endpoint
    }

    fn log_endpoint(&self) -> &str {
        &self.log_endpoint
    }

    fn auth_endpoint(&self) -> Option<&str> {
        self.auth_endpoint.as_deref()
    }

    fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    fn auth_attempts(&self) -> u32 {
        self.auth_attempts
    }

    fn app_id(&self) -> &str {
        &self.app_id
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("verify_endpoint", &self.verify_endpoint)?;
        validate_url("log_endpoint", &self.log_endpoint)?;
        if let Some(endpoint) = &self.auth_endpoint {
            validate_url("auth_endpoint", endpoint)?;
        }
        validate_positive_number("auth_attempts", self.auth_attempts as usize, 1)?;
        validate_non_empty_string("app_id", &self.app_id)?;
        Ok(())
    }
}
