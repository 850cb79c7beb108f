// Create-project form submission

use crate::client_config::ClientConfig;
use crate::client_errors::{ClientError, ClientResult};
use crate::presenter::{Presenter, Toast};
use crate::project_form::{FieldId, ProjectForm, ValidationReport};
use crate::submission::{InFlight, SubmissionTask};
use crate::transport::{HttpReply, Transport, JSON_CONTENT_TYPE};
use crate::validation::ValidationPolicy;
use log::{info, warn};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub const INVALID_DATA_MESSAGE: &str = "Provide correct data";
pub const PROJECT_CREATED_MESSAGE: &str = "Project created";

pub struct ProjectSubmitter {
    transport: Arc<dyn Transport>,
    in_flight: InFlight,
    policy: ValidationPolicy,
    create_project_path: String,
    current_project_path: String,
    request_timeout: Duration,
    navigation_delay: Duration,
}

impl ProjectSubmitter {
    pub fn new(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            in_flight: InFlight::new(),
            policy: config.validation,
            create_project_path: config.server.create_project_path.clone(),
            current_project_path: config.server.current_project_path.clone(),
            request_timeout: config.request_timeout(),
            navigation_delay: config.navigation_delay(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Validate every field and mirror each verdict onto its marker
    pub fn validate(&self, form: &ProjectForm, presenter: &mut dyn Presenter) -> ValidationReport {
        let report = form.validate(&self.policy);
        for &(field, passed) in report.results() {
            presenter.set_field_invalid(field, !passed);
        }
        report
    }

    /// Validate, then post the payload. Nothing is sent when validation
    /// fails. On success returns the page navigated to.
    pub fn submit_form(
        &self,
        form: &ProjectForm,
        presenter: &mut dyn Presenter,
    ) -> ClientResult<String> {
        let task = match self.begin_submit(form, presenter) {
            Ok(task) => task,
            Err(err) => {
                if !matches!(err, ClientError::Validation(_)) {
                    presenter.show_toast(Toast::error(err.to_string()));
                }
                return Err(err);
            }
        };
        self.finish_submit(task, presenter)
    }

    pub fn begin_submit(
        &self,
        form: &ProjectForm,
        presenter: &mut dyn Presenter,
    ) -> ClientResult<SubmissionTask<HttpReply>> {
        let report = self.validate(form, presenter);
        if !report.is_valid() {
            let invalid = report.invalid_fields();
            warn!("⚠️ Project form rejected locally: {:?}", invalid);
            presenter.show_toast(Toast::error(INVALID_DATA_MESSAGE));
            return Err(ClientError::Validation(invalid));
        }

        let guard = self.in_flight.try_acquire()?;
        let body = serde_json::to_string(&form.to_payload())?;
        let path = self.create_project_path.clone();
        let transport = Arc::clone(&self.transport);

        info!("📤 Creating project '{}'", form.name.trim());
        Ok(SubmissionTask::spawn(guard, self.request_timeout, move || {
            transport.post(&path, JSON_CONTENT_TYPE, &body)
        }))
    }

    pub fn finish_submit(
        &self,
        task: SubmissionTask<HttpReply>,
        presenter: &mut dyn Presenter,
    ) -> ClientResult<String> {
        let outcome = task.wait().and_then(|reply| check_created_reply(&reply));

        match outcome {
            Ok(()) => {
                info!("✅ Project created");
                presenter.show_toast(Toast::success(PROJECT_CREATED_MESSAGE));
                thread::sleep(self.navigation_delay);
                presenter.navigate(&self.current_project_path);
                Ok(self.current_project_path.clone())
            }
            Err(ClientError::Rejected {
                status,
                message,
                field,
            }) => {
                // Without a field from the server, the name is the usual culprit.
                let marked = field.unwrap_or(FieldId::Name);
                warn!("⚠️ Server rejected project ({}): {}", status, message);
                presenter.set_field_invalid(marked, true);
                presenter.show_toast(Toast::error(message.clone()));
                Err(ClientError::Rejected {
                    status,
                    message,
                    field: Some(marked),
                })
            }
            Err(err) => {
                warn!("⚠️ Project not created: {}", err);
                presenter.show_toast(Toast::error(err.to_string()));
                Err(err)
            }
        }
    }
}

/// 2xx with a JSON body is success; a rejection keeps the server's message
/// and the field it names, when it names one we know
fn check_created_reply(reply: &HttpReply) -> ClientResult<()> {
    if !reply.is_success() {
        let field = reply
            .error_body()
            .field
            .as_deref()
            .and_then(FieldId::from_name);
        return Err(ClientError::Rejected {
            status: reply.status,
            message: reply.error_message(),
            field,
        });
    }

    serde_json::from_str::<serde_json::Value>(&reply.body)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_reply_needs_json_body() {
        assert_eq!(check_created_reply(&HttpReply::new(201, "{}")), Ok(()));
        assert!(matches!(
            check_created_reply(&HttpReply::new(200, "created")),
            Err(ClientError::Decode(_))
        ));
    }

    #[test]
    fn rejection_keeps_known_field() {
        let reply = HttpReply::new(400, r#"{"error": "bad start", "field": "start_date"}"#);
        assert_eq!(
            check_created_reply(&reply),
            Err(ClientError::Rejected {
                status: 400,
                message: "bad start".into(),
                field: Some(FieldId::StartDate)
            })
        );

        let unknown = HttpReply::new(400, r#"{"error": "nope", "field": "elevation"}"#);
        assert!(matches!(
            check_created_reply(&unknown),
            Err(ClientError::Rejected { field: None, .. })
        ));
    }
}
