pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::HttpPortfolioApi;
pub use config::TomlConfig;
pub use crate::core::{
    aggregate::AggregateState,
    coordinator::{Activation, ResourceFetchCoordinator},
    submission::SubmissionController,
};
pub use domain::model::{
    ContactForm, ContactPayload, PortfolioDataset, ResourceData, ResourceKind, ResourceSlot,
    SlotError, SlotUpdate, SubmissionOutcome, SubmissionState,
};
pub use domain::ports::{ConfigProvider, PortfolioApi};
pub use utils::error::{PortfolioError, Result};
