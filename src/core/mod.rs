pub mod aggregate;
pub mod coordinator;
pub mod submission;

pub use crate::domain::model::{
    PortfolioDataset, ResourceData, ResourceKind, ResourceSlot, SlotError, SlotUpdate,
    SubmissionOutcome, SubmissionState,
};
pub use crate::domain::ports::{ConfigProvider, PortfolioApi};
pub use crate::utils::error::Result;
