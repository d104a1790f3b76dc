use super::{json_rejection, single_line, StatusMessage};
use crate::core::server::AppState;
use crate::domain::model::{ContactForm, OutgoingEmail};
use crate::utils::error::Result;
use crate::utils::validation::{require_field, validate_email, validate_max_length};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

const MAX_NAME_CHARS: usize = 200;
const MAX_SUBJECT_CHARS: usize = 200;
const MAX_MESSAGE_CHARS: usize = 5000;

/// `POST /api/contact`
pub async fn contact(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<StatusMessage>> {
    let Json(form) = payload.map_err(json_rejection)?;
    let email = build_contact_email(&form, &state.config.mail.contact_recipient)?;

    state.mailer.send(email).await?;

    tracing::info!("📨 Contact form relayed");
    Ok(Json(StatusMessage::new("Email sent successfully")))
}

fn build_contact_email(form: &ContactForm, recipient: &str) -> Result<OutgoingEmail> {
    let name = require_field("name", &form.name)?;
    let email = require_field("email", &form.email)?;
    let subject = require_field("subject", &form.subject)?;
    let message = require_field("message", &form.message)?;

    validate_email("email", email)?;
    validate_max_length("name", name, MAX_NAME_CHARS)?;
    validate_max_length("subject", subject, MAX_SUBJECT_CHARS)?;
    validate_max_length("message", message, MAX_MESSAGE_CHARS)?;

    Ok(OutgoingEmail {
        to: vec![recipient.to_string()],
        reply_to: Some(email.to_string()),
        subject: format!("[Website contact] {}", single_line(subject)),
        text: format!(
            "New contact form submission\n\nName: {}\nEmail: {}\nSubject: {}\n\n{}\n",
            single_line(name),
            email,
            single_line(subject),
            message
        ),
        attachments: Vec::new(),
    })
}
