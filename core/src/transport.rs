//! Transport controller: runs one upload and keeps the page in step.
//!
//! # Design
//! The host supplies a `Transport` that executes plain-data requests and a
//! `Page` that applies effects. The controller itself never touches the
//! network. Per request the order is: mark busy, execute, classify, apply the
//! outcome to the page, mark ready. The ready step is owned by a drop guard,
//! so it also happens when the host's future fails or is dropped.
//!
//! Everything runs on one thread. Overlapping requests are allowed; they
//! share the busy indicator through an in-flight count.

use std::future::Future;

use crate::busy::{BusyTracker, TransportState};
use crate::config::IntakeConfig;
use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};
use crate::input::{self, InputEvent, Reaction};
use crate::interpret;
use crate::page::Page;
use crate::request::IntakeClient;
use crate::types::{RawInput, ResponseOutcome};

/// Executes one HTTP request on behalf of the controller.
///
/// Implementations should follow redirects and report it through
/// `HttpResponse::redirected`, and must return non-2xx responses as `Ok`.
/// `Err` is reserved for requests that never completed.
pub trait Transport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>>;
}

pub struct IntakeController<T, P> {
    config: IntakeConfig,
    client: IntakeClient,
    transport: T,
    page: P,
    busy: BusyTracker,
}

impl<T: Transport, P: Page> IntakeController<T, P> {
    pub fn new(config: IntakeConfig, transport: T, page: P) -> Self {
        Self {
            client: IntakeClient::new(&config),
            config,
            transport,
            page,
            busy: BusyTracker::new(),
        }
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn state(&self) -> TransportState {
        self.busy.state()
    }

    pub fn in_flight(&self) -> usize {
        self.busy.in_flight()
    }

    /// Apply an event's presentational effects and hand the rest back.
    ///
    /// Call this synchronously from the event listener: the host must honor
    /// `prevent_default` before returning, then pass any `input` to `submit`.
    pub fn react(&self, event: InputEvent) -> Reaction {
        if let InputEvent::BrowseClick(id) = &event {
            if !self.config.elements.is_browse_trigger(id) {
                tracing::debug!(%id, "click outside the browse triggers");
                return Reaction::default();
            }
        }
        let reaction = input::react(event);
        if let Some(active) = reaction.drop_zone_active {
            self.page.set_drop_zone_active(active);
        }
        if reaction.open_file_chooser {
            self.page.open_file_chooser();
        }
        reaction
    }

    /// `react` followed by `submit` for hosts with no default to cancel.
    pub async fn handle(&self, event: InputEvent) -> Option<ResponseOutcome> {
        let input = self.react(event).input?;
        Some(self.submit(input).await)
    }

    /// Upload one input and apply the outcome to the page.
    pub async fn submit(&self, input: RawInput) -> ResponseOutcome {
        let request = self.client.build(input);
        let path = request.path.clone();

        let _busy = self.busy.enter(&self.page);
        tracing::debug!(
            method = request.method.as_str(),
            %path,
            in_flight = self.busy.in_flight(),
            "dispatching upload"
        );

        let outcome = match self.transport.execute(request).await {
            Ok(response) => {
                tracing::debug!(%path, status = response.status, "upload settled");
                interpret::classify(&response, &self.config.malformed_response_message)
            }
            Err(err) => {
                tracing::error!(%path, error = %err, "upload did not complete");
                ResponseOutcome::ErrorMessage(self.config.network_error_message.clone())
            }
        };
        self.apply(&outcome);
        outcome
    }

    fn apply(&self, outcome: &ResponseOutcome) {
        match outcome {
            ResponseOutcome::Redirect(location) | ResponseOutcome::JsonResult(location) => {
                self.page.navigate(location)
            }
            ResponseOutcome::ErrorMessage(message) => {
                self.page.show_error(&self.config.format_error(message))
            }
        }
    }
}
