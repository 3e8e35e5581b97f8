use crate::domain::model::{PortfolioDataset, ResourceKind};

/// Summary signals derived from a dataset. Holds no state of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateState {
    pub all_settled: bool,
    pub has_errors: bool,
    pub loaded: Vec<ResourceKind>,
    pub failed: Vec<ResourceKind>,
}

impl AggregateState {
    pub fn project(dataset: &PortfolioDataset) -> Self {
        let mut loaded = Vec::new();
        let mut failed = Vec::new();
        for (kind, slot) in dataset.iter() {
            if slot.data().is_some() {
                loaded.push(kind);
            }
            if slot.error().is_some() {
                failed.push(kind);
            }
        }

        Self {
            all_settled: all_settled(dataset),
            has_errors: has_errors(dataset),
            loaded,
            failed,
        }
    }

    pub fn pending(&self) -> usize {
        ResourceKind::ALL.len() - self.loaded.len() - self.failed.len()
    }
}

pub fn all_settled(dataset: &PortfolioDataset) -> bool {
    dataset.iter().all(|(_, slot)| !slot.is_loading())
}

pub fn has_errors(dataset: &PortfolioDataset) -> bool {
    dataset.iter().any(|(_, slot)| slot.error().is_some())
}
