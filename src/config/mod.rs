pub mod toml_config;

pub use toml_config::TomlConfig;

/// Request timeout applied when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";
pub const MAX_TIMEOUT_SECS: u64 = 300;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli {
    use super::{DEFAULT_BACKEND_URL, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS};
    use crate::core::ConfigProvider;
    use crate::domain::model::ContactPayload;
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_non_empty_string, validate_range, validate_url, Validate,
    };
    use clap::{Parser, Subcommand};
    use std::time::Duration;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "portfolio-client")]
    #[command(about = "Loads portfolio content and submits the contact form")]
    pub struct CliConfig {
        #[arg(long, env = "PORTFOLIO_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
        pub backend_url: String,

        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        pub timeout_secs: u64,

        #[arg(long, help = "TOML configuration file; its [backend] section replaces the flags above")]
        pub config: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Fetch every section and print each one as soon as it settles
        Load,
        /// Fetch a single project by id
        Project { id: String },
        /// Submit the contact form
        Contact {
            #[arg(long)]
            name: String,
            #[arg(long)]
            email: String,
            #[arg(long)]
            subject: String,
            #[arg(long)]
            message: String,
        },
        /// List stored contact submissions
        Contacts,
    }

    impl Command {
        pub fn contact_payload(&self) -> Option<ContactPayload> {
            match self {
                Command::Contact {
                    name,
                    email,
                    subject,
                    message,
                } => Some(ContactPayload {
                    name: name.clone(),
                    email: email.clone(),
                    subject: subject.clone(),
                    message: message.clone(),
                }),
                _ => None,
            }
        }
    }

    impl ConfigProvider for CliConfig {
        fn backend_url(&self) -> &str {
            &self.backend_url
        }

        fn request_timeout(&self) -> Duration {
            Duration::from_secs(self.timeout_secs)
        }
    }

    impl CliConfig {
        /// Checks the subcommand's own arguments; the form needs all four fields filled in.
        pub fn validate_command(&self) -> Result<()> {
            if let Some(payload) = self.command.contact_payload() {
                validate_non_empty_string("name", &payload.name)?;
                validate_non_empty_string("email", &payload.email)?;
                validate_non_empty_string("subject", &payload.subject)?;
                validate_non_empty_string("message", &payload.message)?;
            }
            Ok(())
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_url("backend_url", &self.backend_url)?;
            validate_range("timeout_secs", self.timeout_secs, 1, MAX_TIMEOUT_SECS)?;
            self.validate_command()
        }
    }

}
