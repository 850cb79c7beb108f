// Shape editor - one step of the define-shapes wizard
// Owns the grid for a single model, mirrors toggles onto the page and
// submits the finished mask to `/define-shapes/{model_index}`.

use crate::client_config::ClientConfig;
use crate::client_errors::{ClientError, ClientResult};
use crate::display::render_grid;
use crate::grid::ShapeGrid;
use crate::presenter::{Presenter, Toast};
use crate::routes::{cell_element_id, define_shapes_path, next_model_path, previous_model_path};
use crate::submission::{InFlight, SubmissionTask};
use crate::transport::{HttpReply, Transport, JSON_CONTENT_TYPE};
use log::{debug, info, log_enabled, warn, Level};
use serde::Deserialize;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub const OK_STATUS: &str = "OK";
pub const SHAPE_SAVED_MESSAGE: &str = "Shape saved";

#[derive(Debug, Deserialize)]
struct StatusBody {
    status: Option<String>,
}

pub struct ShapeEditor {
    model_index: usize,
    grid: ShapeGrid,
    transport: Arc<dyn Transport>,
    in_flight: InFlight,
    request_timeout: Duration,
    navigation_delay: Duration,
    log_snapshots: bool,
}

impl ShapeEditor {
    pub fn new(
        config: &ClientConfig,
        model_index: usize,
        grid: ShapeGrid,
        transport: Arc<dyn Transport>,
    ) -> Self {
        info!(
            "🧩 Shape editor for model {} ({}x{})",
            model_index,
            grid.rows(),
            grid.cols()
        );
        Self {
            model_index,
            grid,
            transport,
            in_flight: InFlight::new(),
            request_timeout: config.request_timeout(),
            navigation_delay: config.navigation_delay(),
            log_snapshots: config.display.log_snapshots,
        }
    }

    pub fn model_index(&self) -> usize {
        self.model_index
    }

    pub fn grid(&self) -> &ShapeGrid {
        &self.grid
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Flip one cell and mirror it on the page; returns whether it is now selected
    pub fn toggle_cell(
        &mut self,
        row: usize,
        col: usize,
        presenter: &mut dyn Presenter,
    ) -> ClientResult<bool> {
        let selected = self.grid.toggle(row, col)? == crate::grid::shape::SELECTED;
        presenter.set_cell_highlight(row, col, selected);

        if self.log_snapshots && log_enabled!(Level::Debug) {
            debug!(
                "🧩 Model {} after toggling {}:\n{}",
                self.model_index,
                cell_element_id(row, col),
                render_grid(&self.grid)
            );
        }
        Ok(selected)
    }

    /// Start posting the current grid; the grid is captured as it is now.
    pub fn begin_submit(&self) -> ClientResult<SubmissionTask<HttpReply>> {
        // Nothing is sent for an index that cannot advance
        self.next_path()?;
        let guard = self.in_flight.try_acquire()?;
        let body = self.grid.to_json()?;
        let path = define_shapes_path(self.model_index);
        let transport = Arc::clone(&self.transport);

        info!(
            "📤 Submitting shape for model {} ({} cells selected)",
            self.model_index,
            self.grid.selected_count()
        );
        Ok(SubmissionTask::spawn(guard, self.request_timeout, move || {
            transport.post(&path, JSON_CONTENT_TYPE, &body)
        }))
    }

    /// Wait for a submission and report the outcome; on success returns the
    /// path of the next model's page after navigating to it.
    pub fn finish_submit(
        &self,
        task: SubmissionTask<HttpReply>,
        presenter: &mut dyn Presenter,
    ) -> ClientResult<String> {
        let outcome = task
            .wait()
            .and_then(|reply| check_status_reply(&reply))
            .and_then(|()| self.next_path());

        match outcome {
            Ok(next) => {
                info!("✅ Shape for model {} accepted", self.model_index);
                presenter.show_toast(Toast::success(SHAPE_SAVED_MESSAGE));
                thread::sleep(self.navigation_delay);

                info!("➡️ Redirecting to next model: {}", next);
                presenter.navigate(&next);
                Ok(next)
            }
            Err(err) => {
                warn!("⚠️ Shape for model {} not saved: {}", self.model_index, err);
                presenter.show_toast(Toast::error(format!("Shape not saved: {}", err)));
                Err(err)
            }
        }
    }

    pub fn submit(&self, presenter: &mut dyn Presenter) -> ClientResult<String> {
        let task = match self.begin_submit() {
            Ok(task) => task,
            Err(err) => {
                presenter.show_toast(Toast::error(format!("Shape not saved: {}", err)));
                return Err(err);
            }
        };
        self.finish_submit(task, presenter)
    }

    fn next_path(&self) -> ClientResult<String> {
        next_model_path(self.model_index).ok_or(ClientError::NoNextModel {
            model_index: self.model_index,
        })
    }

    /// Previous model's page, or the upload page from the first model
    pub fn go_back(&self, presenter: &mut dyn Presenter) -> String {
        let previous = previous_model_path(self.model_index);
        info!("⬅️ Redirecting back to {}", previous);
        presenter.navigate(&previous);
        previous
    }
}

/// Only a 2xx reply whose body says `{"status": "OK"}` counts as saved
fn check_status_reply(reply: &HttpReply) -> ClientResult<()> {
    if !reply.is_success() {
        return Err(ClientError::Rejected {
            status: reply.status,
            message: reply.error_message(),
            field: None,
        });
    }

    let body: StatusBody = serde_json::from_str(&reply.body)?;
    match body.status.as_deref() {
        Some(OK_STATUS) => Ok(()),
        Some(other) => Err(ClientError::Rejected {
            status: reply.status,
            message: format!("server reported status '{}'", other),
            field: None,
        }),
        None => Err(ClientError::Decode("response has no status field".into())),
    }
}
