use crate::core::aggregate::AggregateState;
use crate::domain::model::{ContactRecord, Project, ResourceData, ResourceKind, ResourceSlot};

pub fn section_title(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Skills => "Technical Skills",
        ResourceKind::Projects => "Projects",
        ResourceKind::Experience => "Professional Experience",
        ResourceKind::Education => "Education",
        ResourceKind::Certifications => "Professional Certifications",
    }
}

/// Text block for one section; a failed slot renders its error line instead of content.
pub fn render_section(kind: ResourceKind, slot: &ResourceSlot) -> String {
    let mut lines = vec![format!("== {} ==", section_title(kind))];

    match slot {
        ResourceSlot::Loading => lines.push("  (loading...)".to_string()),
        ResourceSlot::Failed(error) => lines.push(format!("  ! {}", error)),
        ResourceSlot::Loaded(data) if data.is_empty() => lines.push("  (nothing yet)".to_string()),
        ResourceSlot::Loaded(data) => lines.extend(render_data(data)),
    }

    lines.join("\n")
}

fn render_data(data: &ResourceData) -> Vec<String> {
    match data {
        ResourceData::Skills(groups) => groups
            .iter()
            .map(|group| format!("  {}: {}", group.category, group.skills.join(", ")))
            .collect(),
        ResourceData::Projects(projects) => projects.iter().map(project_line).collect(),
        ResourceData::Experience(jobs) => jobs
            .iter()
            .flat_map(|job| {
                let mut lines = vec![format!(
                    "  {} @ {} ({}, {})",
                    job.position, job.company, job.duration, job.location
                )];
                lines.extend(job.achievements.iter().map(|a| format!("    - {}", a)));
                lines
            })
            .collect(),
        ResourceData::Education(entries) => entries
            .iter()
            .map(|entry| {
                format!(
                    "  {}, {} ({}) [{}]",
                    entry.degree, entry.institution, entry.duration, entry.status
                )
            })
            .collect(),
        ResourceData::Certifications(certifications) => certifications
            .iter()
            .map(|certification| format!("  * {}", certification.name()))
            .collect(),
    }
}

fn project_line(project: &Project) -> String {
    let mut line = format!("  {} [{}] - {}", project.title, project.status, project.category);
    if !project.technologies.is_empty() {
        line.push_str(&format!(" ({})", project.technologies.join(", ")));
    }
    line
}

pub fn render_project(project: &Project) -> String {
    let mut lines = vec![project_line(project).trim_start().to_string()];
    if !project.description.is_empty() {
        lines.push(format!("  {}", project.description));
    }
    lines.extend(project.features.iter().map(|f| format!("  - {}", f)));
    if !project.impact.is_empty() {
        lines.push(format!("  Impact: {}", project.impact));
    }
    lines.join("\n")
}

pub fn render_contact(record: &ContactRecord) -> String {
    let status = if record.is_read { "read" } else { "new" };
    let received = record
        .created_at
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "[{}] {} {} <{}>: {}",
        status, received, record.name, record.email, record.subject
    )
}

pub fn render_summary(state: &AggregateState) -> String {
    if !state.all_settled {
        return format!("{} section(s) still loading", state.pending());
    }
    if state.has_errors {
        let failed: Vec<&str> = state.failed.iter().map(|kind| kind.as_str()).collect();
        format!(
            "Loaded {} of {} sections; failed: {}",
            state.loaded.len(),
            ResourceKind::ALL.len(),
            failed.join(", ")
        )
    } else {
        format!("Loaded all {} sections", ResourceKind::ALL.len())
    }
}
