use crate::domain::model::{
    Certification, Confirmation, ContactPayload, ContactRecord, EducationEntry, Job, Project,
    SkillGroup,
};
use crate::domain::ports::{ConfigProvider, PortfolioApi};
use crate::utils::error::{PortfolioError, Result};
use crate::utils::validation::validate_url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Envelope every backend response is wrapped in.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    data: Option<T>,
}

/// `PortfolioApi` over the backend's JSON HTTP interface.
#[derive(Debug, Clone)]
pub struct HttpPortfolioApi {
    client: Client,
    api_root: String,
    timeout: Duration,
}

impl HttpPortfolioApi {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        validate_url("backend_url", config.backend_url())?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (key, value) in config.extra_headers() {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                PortfolioError::InvalidConfigValueError {
                    field: "headers".to_string(),
                    value: key.clone(),
                    reason: e.to_string(),
                }
            })?;
            let value = HeaderValue::from_str(&value).map_err(|e| {
                PortfolioError::InvalidConfigValueError {
                    field: format!("headers.{}", key),
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
            headers.insert(name, value);
        }

        let timeout = config.request_timeout();
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_root: api_root(config.backend_url()),
            timeout,
        })
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path)
    }

    async fn send(&self, method: Method, path: &str, request: RequestBuilder) -> Result<String> {
        tracing::debug!("📡 Making {} request to {}", method, path);

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            tracing::error!("❌ API Error: {} {} -> {}: {}", method, path, status, body);
            return Err(PortfolioError::StatusError {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!("📡 {} {} -> {}", method, path, status);
        Ok(body)
    }

    fn transport_error(&self, error: reqwest::Error) -> PortfolioError {
        tracing::error!("❌ API Error: {}", error);
        if error.is_timeout() {
            PortfolioError::TimeoutError {
                timeout_ms: self.timeout.as_millis(),
            }
        } else {
            PortfolioError::HttpError(error)
        }
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let request = self.client.get(self.endpoint(path));
        let body = self.send(Method::GET, path, request).await?;
        unwrap_envelope(&body)
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let items: Option<Vec<T>> = self.get_data(path).await?;
        Ok(items.unwrap_or_default())
    }
}

fn api_root(backend_url: &str) -> String {
    format!("{}/api", backend_url.trim_end_matches('/'))
}

fn unwrap_envelope<T: DeserializeOwned>(body: &str) -> Result<Option<T>> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let envelope: ApiEnvelope<T> = serde_json::from_str(body)?;
    Ok(envelope.data)
}

#[async_trait::async_trait]
impl PortfolioApi for HttpPortfolioApi {
    async fn get_skills(&self) -> Result<Vec<SkillGroup>> {
        self.get_list("/skills").await
    }

    async fn get_projects(&self) -> Result<Vec<Project>> {
        self.get_list("/projects").await
    }

    async fn get_project(&self, project_id: &str) -> Result<Project> {
        let path = format!("/projects/{}", project_id);
        self.get_data(&path)
            .await?
            .ok_or(PortfolioError::MissingDataError { path })
    }

    async fn get_experience(&self) -> Result<Vec<Job>> {
        self.get_list("/experience").await
    }

    async fn get_education(&self) -> Result<Vec<EducationEntry>> {
        self.get_list("/education").await
    }

    async fn get_certifications(&self) -> Result<Vec<Certification>> {
        self.get_list("/certifications").await
    }

    async fn submit_contact(&self, payload: &ContactPayload) -> Result<Confirmation> {
        let request = self.client.post(self.endpoint("/contact")).json(payload);
        let body = self.send(Method::POST, "/contact", request).await?;
        let confirmation: Option<Confirmation> = unwrap_envelope(&body)?;
        Ok(confirmation.unwrap_or_default())
    }

    async fn get_contacts(&self) -> Result<Vec<ContactRecord>> {
        self.get_list("/contacts").await
    }
}
