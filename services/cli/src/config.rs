use crate::cli::Args;
use secrecy::SecretString;
use sfdc2openapi_core::client::Credentials;
use sfdc2openapi_core::pipeline::Target;
use std::path::PathBuf;
use tracing::Level;

pub const CLIENT_ID_VAR: &str = "SFDC_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "SFDC_CLIENT_SECRET";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing credential: pass --{flag} or set {var}")]
    MissingCredential {
        flag: &'static str,
        var: &'static str,
    },
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Everything a run needs, resolved from arguments and the environment.
#[derive(Debug)]
pub struct Config {
    pub target: Target,
    pub output: PathBuf,
    pub credentials: Credentials,
    pub template_path: Option<PathBuf>,
    pub debug: bool,
    pub log_level: Level,
}

impl Config {
    /// Merges parsed arguments with environment variables.
    ///
    /// Credentials given on the command line win over `SFDC_CLIENT_ID` and
    /// `SFDC_CLIENT_SECRET`. Nothing here touches the network.
    pub fn resolve(args: Args) -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let client_id = non_empty(args.client_id)
            .or_else(|| env_var(CLIENT_ID_VAR))
            .ok_or(ConfigError::MissingCredential {
                flag: "client-id",
                var: CLIENT_ID_VAR,
            })?;
        let client_secret = non_empty(args.client_secret)
            .or_else(|| env_var(CLIENT_SECRET_VAR))
            .ok_or(ConfigError::MissingCredential {
                flag: "client-secret",
                var: CLIENT_SECRET_VAR,
            })?;

        let log_level = if args.debug {
            Level::DEBUG
        } else {
            let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
            log_level_str.parse::<Level>().map_err(|_| {
                ConfigError::InvalidValue(
                    "RUST_LOG".to_string(),
                    format!("'{}' is not a valid log level", log_level_str),
                )
            })?
        };

        Ok(Self {
            target: Target {
                domain: args.domain,
                version: args.version,
                object: args.object,
            },
            output: args.output,
            credentials: Credentials {
                client_id,
                client_secret: SecretString::from(client_secret),
            },
            template_path: args.template,
            debug: args.debug,
            log_level,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn env_var(name: &str) -> Option<String> {
    non_empty(std::env::var(name).ok())
}
