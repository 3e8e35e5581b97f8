use crate::app::render::{render_contact, render_project, render_section, render_summary};
use crate::core::aggregate::AggregateState;
use crate::core::coordinator::ResourceFetchCoordinator;
use crate::core::submission::SubmissionController;
use crate::domain::model::{ContactForm, ContactPayload, SubmissionOutcome};
use crate::domain::ports::PortfolioApi;
use crate::utils::error::Result;
use std::io::Write;
use std::sync::Arc;

/// Loads every section, writing each one out as soon as its slot settles.
pub async fn load_portfolio<A, W>(api: Arc<A>, out: &mut W) -> Result<AggregateState>
where
    A: PortfolioApi + ?Sized + 'static,
    W: Write,
{
    let mut activation = ResourceFetchCoordinator::new(api).activate();

    while !activation.all_settled() {
        let Some(update) = activation.next_update().await else {
            break;
        };
        writeln!(out, "{}\n", render_section(update.kind, &update.slot))?;
    }

    let state = activation.aggregate();
    writeln!(out, "{}", render_summary(&state))?;
    tracing::info!(
        "📊 Portfolio loaded: {} ok, {} failed",
        state.loaded.len(),
        state.failed.len()
    );
    Ok(state)
}

pub async fn show_project<A, W>(api: Arc<A>, project_id: &str, out: &mut W) -> Result<()>
where
    A: PortfolioApi + ?Sized,
    W: Write,
{
    let project = api.get_project(project_id).await?;
    writeln!(out, "{}", render_project(&project))?;
    Ok(())
}

/// Submits the contact form; the form keeps its fields when the backend refuses them.
pub async fn send_contact<A, W>(
    api: Arc<A>,
    payload: ContactPayload,
    out: &mut W,
) -> Result<SubmissionOutcome>
where
    A: PortfolioApi + ?Sized,
    W: Write,
{
    let controller = SubmissionController::new(api);
    let mut form = ContactForm::from(payload);

    let outcome = controller.submit_form(&mut form).await;
    match &outcome {
        SubmissionOutcome::Success(confirmation) if !confirmation.message.is_empty() => {
            writeln!(out, "✅ {}", confirmation.message)?;
        }
        SubmissionOutcome::Success(_) => {
            writeln!(out, "✅ Thank you for your message! I will get back to you soon.")?;
        }
        SubmissionOutcome::Failure { error } => {
            writeln!(out, "❌ {}", error)?;
        }
    }
    Ok(outcome)
}

pub async fn list_contacts<A, W>(api: Arc<A>, out: &mut W) -> Result<usize>
where
    A: PortfolioApi + ?Sized,
    W: Write,
{
    let contacts = api.get_contacts().await?;
    if contacts.is_empty() {
        writeln!(out, "No contact submissions")?;
    }
    for contact in &contacts {
        writeln!(out, "{}", render_contact(contact))?;
    }
    Ok(contacts.len())
}
