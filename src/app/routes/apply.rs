use super::{single_line, StatusMessage};
use crate::core::server::AppState;
use crate::domain::model::{Attachment, JobApplication, OutgoingEmail};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{
    require_field, validate_email, validate_file_extension, validate_max_length,
};
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;

pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

#[derive(Debug, Default)]
struct ApplicationFields {
    name: Option<String>,
    email: Option<String>,
    position: Option<String>,
    message: Option<String>,
    resume: Option<ResumeUpload>,
}

#[derive(Debug)]
struct ResumeUpload {
    filename: Option<String>,
    content_type: Option<String>,
    content: Vec<u8>,
}

/// `POST /api/apply` (multipart/form-data)
pub async fn apply(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<StatusMessage>> {
    let mut multipart = multipart.map_err(|e| SiteError::MalformedBodyError {
        message: e.body_text(),
    })?;
    let limit = state.config.server.max_upload_bytes;

    let mut fields = ApplicationFields::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let content = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
                fields.resume = Some(ResumeUpload {
                    filename,
                    content_type,
                    content: content.to_vec(),
                });
            }
            "name" | "email" | "position" | "message" => {
                let text = field.text().await.map_err(|e| multipart_error(e, limit))?;
                match name.as_str() {
                    "name" => fields.name = Some(text),
                    "email" => fields.email = Some(text),
                    "position" => fields.position = Some(text),
                    _ => fields.message = Some(text),
                }
            }
            other => tracing::debug!("Ignoring multipart field '{}'", other),
        }
    }

    let application = fields.into_application(limit)?;
    let email = application_email(&application, &state.config.mail.careers_recipient);
    state.mailer.send(email).await?;

    tracing::info!(
        "📨 Application for '{}' relayed with {} byte resume",
        application.position,
        application.resume.content.len()
    );
    Ok(Json(StatusMessage::new("Application submitted successfully")))
}

fn multipart_error(err: MultipartError, limit: usize) -> SiteError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        SiteError::PayloadTooLargeError { limit }
    } else {
        SiteError::MalformedBodyError {
            message: err.body_text(),
        }
    }
}

fn content_type_for(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        _ => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    }
}

impl ApplicationFields {
    fn into_application(self, max_upload_bytes: usize) -> Result<JobApplication> {
        let name = require_field("name", &self.name)?.to_string();
        let email = require_field("email", &self.email)?.to_string();
        let position = require_field("position", &self.position)?.to_string();
        validate_email("email", &email)?;
        validate_max_length("name", &name, 200)?;
        validate_max_length("position", &position, 200)?;

        let message = self
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        if let Some(m) = &message {
            validate_max_length("message", m, 5000)?;
        }

        let resume = self.resume.ok_or_else(|| SiteError::missing("resume"))?;
        let filename = resume
            .filename
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(|| SiteError::missing("resume"))?;
        if resume.content.is_empty() {
            return Err(SiteError::invalid("resume", "file is empty"));
        }
        if resume.content.len() > max_upload_bytes {
            return Err(SiteError::PayloadTooLargeError {
                limit: max_upload_bytes,
            });
        }
        let extension = validate_file_extension("resume", &filename, RESUME_EXTENSIONS)?;

        // Browsers commonly send octet-stream for .doc/.docx
        let content_type = resume
            .content_type
            .filter(|ct| ct != "application/octet-stream")
            .unwrap_or_else(|| content_type_for(&extension).to_string());

        Ok(JobApplication {
            name,
            email,
            position,
            message,
            resume: Attachment {
                filename: single_line(&filename),
                content_type,
                content: resume.content,
            },
        })
    }
}

fn application_email(application: &JobApplication, recipient: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: vec![recipient.to_string()],
        reply_to: Some(application.email.clone()),
        subject: format!(
            "[Application] {} - {}",
            single_line(&application.position),
            single_line(&application.name)
        ),
        text: format!(
            "New job application\n\nName: {}\nEmail: {}\nPosition: {}\n\n{}\n\nResume attached: {}\n",
            single_line(&application.name),
            application.email,
            single_line(&application.position),
            application.message.as_deref().unwrap_or("(no cover note)"),
            application.resume.filename
        ),
        attachments: vec![application.resume.clone()],
    }
}
