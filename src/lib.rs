//! Client side of the water-modelling wizard: the define-shapes grid editor
//! and the create-project form.
//!
//! Both components keep their state in plain owned values, validate with
//! pure functions, and reach the outside world through two seams: a
//! [`Presenter`] for everything the user sees and a [`Transport`] for the
//! HTTP calls. Submissions run as [`SubmissionTask`]s with a timeout, can be
//! cancelled, and refuse to overlap.

pub mod client_config;
pub mod client_errors;
pub mod config;
pub mod display;
pub mod grid;
pub mod presenter;
pub mod project_form;
pub mod project_submitter;
pub mod routes;
pub mod shape_editor;
pub mod submission;
pub mod transport;
pub mod validation;

pub use client_config::ClientConfig;
pub use client_errors::{
    retry_with_backoff, retry_with_backoff_if, ClientError, ClientResult, RetryConfig,
};
pub use config::GridConfig;
pub use grid::{GridError, GridResult, GridTrait, ShapeGrid};
pub use presenter::{
    ConsolePresenter, Presenter, PresenterEvent, RecordingPresenter, Toast, ToastKind,
};
pub use project_form::{FieldId, ProjectForm, ProjectPayload, ValidationReport};
pub use project_submitter::ProjectSubmitter;
pub use shape_editor::ShapeEditor;
pub use submission::{CancelHandle, InFlight, InFlightGuard, SubmissionTask};
pub use transport::{HttpReply, Transport, UreqTransport};
pub use validation::ValidationPolicy;
