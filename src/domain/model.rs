use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The fixed set of content collections served by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Skills,
    Projects,
    Experience,
    Education,
    Certifications,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Skills,
        ResourceKind::Projects,
        ResourceKind::Experience,
        ResourceKind::Education,
        ResourceKind::Certifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Skills => "skills",
            ResourceKind::Projects => "projects",
            ResourceKind::Experience => "experience",
            ResourceKind::Education => "education",
            ResourceKind::Certifications => "certifications",
        }
    }

    /// Path of the list endpoint, relative to the API root.
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Skills => "/skills",
            ResourceKind::Projects => "/projects",
            ResourceKind::Experience => "/experience",
            ResourceKind::Education => "/education",
            ResourceKind::Certifications => "/certifications",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            ResourceKind::Skills => 0,
            ResourceKind::Projects => 1,
            ResourceKind::Experience => 2,
            ResourceKind::Education => 3,
            ResourceKind::Certifications => 4,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillGroup {
    pub id: String,
    pub category: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub features: Vec<String>,
    pub status: String,
    pub impact: String,
    pub display_order: i64,
}

/// One position in the experience section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    pub id: String,
    pub company: String,
    pub position: String,
    pub duration: String,
    pub location: String,
    pub achievements: Vec<String>,
    pub display_order: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub duration: String,
    pub location: String,
    pub status: String,
    pub display_order: i64,
}

/// Certifications come back either as plain names or as stored documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Certification {
    Name(String),
    Detailed(CertificationRecord),
}

impl Certification {
    pub fn name(&self) -> &str {
        match self {
            Certification::Name(name) => name,
            Certification::Detailed(record) => &record.name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificationRecord {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub date_obtained: Option<NaiveDateTime>,
    #[serde(default)]
    pub display_order: i64,
}

/// Payload of a settled slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceData {
    Skills(Vec<SkillGroup>),
    Projects(Vec<Project>),
    Experience(Vec<Job>),
    Education(Vec<EducationEntry>),
    Certifications(Vec<Certification>),
}

impl ResourceData {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceData::Skills(_) => ResourceKind::Skills,
            ResourceData::Projects(_) => ResourceKind::Projects,
            ResourceData::Experience(_) => ResourceKind::Experience,
            ResourceData::Education(_) => ResourceKind::Education,
            ResourceData::Certifications(_) => ResourceKind::Certifications,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ResourceData::Skills(items) => items.len(),
            ResourceData::Projects(items) => items.len(),
            ResourceData::Experience(items) => items.len(),
            ResourceData::Education(items) => items.len(),
            ResourceData::Certifications(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Consumer-facing error of a failed slot. The underlying cause is only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotError {
    pub kind: ResourceKind,
}

impl SlotError {
    pub fn new(kind: ResourceKind) -> Self {
        Self { kind }
    }
}

impl fmt::Display for SlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to load {}", self.kind)
    }
}

impl std::error::Error for SlotError {}

/// Per-kind loading state. Exactly one of loading, data or error holds.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResourceSlot {
    #[default]
    Loading,
    Loaded(ResourceData),
    Failed(SlotError),
}

impl ResourceSlot {
    pub fn is_loading(&self) -> bool {
        matches!(self, ResourceSlot::Loading)
    }

    pub fn data(&self) -> Option<&ResourceData> {
        match self {
            ResourceSlot::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SlotError> {
        match self {
            ResourceSlot::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// A single slot transition, delivered to consumers one at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotUpdate {
    pub kind: ResourceKind,
    pub slot: ResourceSlot,
}

/// All five slots of the portfolio, in `ResourceKind::ALL` order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortfolioDataset {
    slots: [ResourceSlot; 5],
}

impl PortfolioDataset {
    /// Every slot starts out loading.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, kind: ResourceKind) -> &ResourceSlot {
        &self.slots[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &ResourceSlot)> {
        ResourceKind::ALL.iter().map(move |kind| (*kind, self.slot(*kind)))
    }

    pub fn skills(&self) -> Option<&[SkillGroup]> {
        match self.slot(ResourceKind::Skills).data() {
            Some(ResourceData::Skills(items)) => Some(items),
            _ => None,
        }
    }

    pub fn projects(&self) -> Option<&[Project]> {
        match self.slot(ResourceKind::Projects).data() {
            Some(ResourceData::Projects(items)) => Some(items),
            _ => None,
        }
    }

    pub fn experience(&self) -> Option<&[Job]> {
        match self.slot(ResourceKind::Experience).data() {
            Some(ResourceData::Experience(items)) => Some(items),
            _ => None,
        }
    }

    pub fn education(&self) -> Option<&[EducationEntry]> {
        match self.slot(ResourceKind::Education).data() {
            Some(ResourceData::Education(items)) => Some(items),
            _ => None,
        }
    }

    pub fn certifications(&self) -> Option<&[Certification]> {
        match self.slot(ResourceKind::Certifications).data() {
            Some(ResourceData::Certifications(items)) => Some(items),
            _ => None,
        }
    }

    /// Applies a settlement to a still-loading slot.
    ///
    /// Returns `false` and leaves the dataset untouched when the slot has already
    /// settled or the update tries to put it back into loading.
    pub(crate) fn apply(&mut self, update: &SlotUpdate) -> bool {
        let slot = &mut self.slots[update.kind.index()];
        if !slot.is_loading() || update.slot.is_loading() {
            return false;
        }
        *slot = update.slot.clone();
        true
    }

    #[cfg(test)]
    pub(crate) fn with_slot(mut self, kind: ResourceKind, slot: ResourceSlot) -> Self {
        self.slots[kind.index()] = slot;
        self
    }
}

/// Body of `POST /contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Editable contact form backing a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn to_payload(&self) -> ContactPayload {
        ContactPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<ContactPayload> for ContactForm {
    fn from(payload: ContactPayload) -> Self {
        Self {
            name: payload.name,
            email: payload.email,
            subject: payload.subject,
            message: payload.message,
        }
    }
}

/// Backend acknowledgement of a contact submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Confirmation {
    pub message: String,
    pub id: String,
}

/// A stored contact submission, as listed by the admin endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

/// Reads backend timestamps in any of the shapes it has been seen to emit:
/// naive ISO 8601, RFC 3339 with an offset (normalized to UTC) or a bare date.
/// Anything else becomes `None` so one odd record does not fail the whole list.
fn lenient_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_utc());
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive);
    }
    if let Some(midnight) = raw
        .parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Some(midnight);
    }
    tracing::warn!("⚠️ Ignoring unparseable timestamp: {}", raw);
    None
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success(Confirmation),
    Failure { error: String },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Failure { error } => Some(error),
            SubmissionOutcome::Success(_) => None,
        }
    }
}
