use crate::domain::model::{
    Certification, Confirmation, ContactPayload, ContactRecord, EducationEntry, Job, Project,
    ResourceData, ResourceKind, SkillGroup,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    /// Backend origin; the API root is this URL with `/api` appended.
    fn backend_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;

    /// Headers sent with every request in addition to `Content-Type`.
    fn extra_headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// Read and write operations of the portfolio backend.
///
/// List operations resolve an absent `data` field to an empty sequence.
#[async_trait]
pub trait PortfolioApi: Send + Sync {
    async fn get_skills(&self) -> Result<Vec<SkillGroup>>;
    async fn get_projects(&self) -> Result<Vec<Project>>;
    async fn get_project(&self, project_id: &str) -> Result<Project>;
    async fn get_experience(&self) -> Result<Vec<Job>>;
    async fn get_education(&self) -> Result<Vec<EducationEntry>>;
    async fn get_certifications(&self) -> Result<Vec<Certification>>;
    async fn submit_contact(&self, payload: &ContactPayload) -> Result<Confirmation>;
    async fn get_contacts(&self) -> Result<Vec<ContactRecord>>;

    /// Dispatches to the list operation backing `kind`.
    async fn fetch_resource(&self, kind: ResourceKind) -> Result<ResourceData> {
        let data = match kind {
            ResourceKind::Skills => ResourceData::Skills(self.get_skills().await?),
            ResourceKind::Projects => ResourceData::Projects(self.get_projects().await?),
            ResourceKind::Experience => ResourceData::Experience(self.get_experience().await?),
            ResourceKind::Education => ResourceData::Education(self.get_education().await?),
            ResourceKind::Certifications => {
                ResourceData::Certifications(self.get_certifications().await?)
            }
        };
        Ok(data)
    }
}
