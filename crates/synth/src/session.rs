//! Picking session state: one interactive episode of clicking fields to fill.
//!
//! ```text
//! Idle ──start──▶ Picking ──begin_request──▶ RequestInFlight
//!   ▲               │  ▲                          │
//!   └─────stop──────┘  └──────finish_request──────┘
//! ```
//!
//! Every session start bumps an epoch. A [`RequestTicket`] remembers the epoch
//! it was issued in, so a response that arrives after the session ended (or
//! restarted) is recognised as stale and must not be applied.

use fieldwise_core::fill::FillRequest;
use fieldwise_core::project::Project;
use fieldwise_core::provider::{Usage, format_usage};

use crate::labels::FieldCapture;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Picking,
    RequestInFlight,
}

/// Proof that a request was started, tied to the session that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    epoch: u64,
    debug: bool,
}

impl RequestTicket {
    /// Whether the request was sent with debug output enabled.
    pub fn debug(&self) -> bool {
        self.debug
    }
}

#[derive(Debug, Default)]
pub struct PickSession {
    state: SessionState,
    project: Option<Project>,
    debug: bool,
    epoch: u64,
}

impl PickSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != SessionState::Idle
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    /// Enter picking mode. An active session only swaps its project.
    pub fn start(&mut self, project: Project) {
        self.project = Some(project);
        if self.is_active() {
            return;
        }
        self.state = SessionState::Picking;
        self.debug = false;
        self.epoch += 1;
    }

    /// Flip debug output; returns the new setting. Ignored while idle.
    pub fn toggle_debug(&mut self) -> bool {
        if self.is_active() {
            self.debug = !self.debug;
        }
        self.debug
    }

    /// Start a request for a picked field.
    ///
    /// Returns `None` while idle or while another request is in flight; such
    /// triggers are dropped, never queued.
    pub fn begin_request(&mut self) -> Option<RequestTicket> {
        if self.state != SessionState::Picking {
            return None;
        }
        self.state = SessionState::RequestInFlight;
        Some(RequestTicket {
            epoch: self.epoch,
            debug: self.debug,
        })
    }

    /// Build the fill request for a captured field under the current session settings.
    pub fn fill_request(&self, capture: FieldCapture, ticket: &RequestTicket) -> FillRequest {
        FillRequest {
            project: self.project.clone(),
            field_label: capture.meta.field_label.clone(),
            field_meta: Some(capture.meta),
            field_value: capture.value,
            field_placeholder: capture.placeholder,
            debug: ticket.debug,
        }
    }

    /// Mark a request as answered. Returns whether its response may be applied.
    pub fn finish_request(&mut self, ticket: RequestTicket) -> bool {
        if ticket.epoch != self.epoch || self.state != SessionState::RequestInFlight {
            return false;
        }
        self.state = SessionState::Picking;
        true
    }

    /// Leave picking mode. Outstanding requests keep running but their tickets go stale.
    pub fn stop(&mut self) {
        self.state = SessionState::Idle;
        self.project = None;
        self.debug = false;
        self.epoch += 1;
    }

    /// Mode badge text.
    pub fn badge(&self) -> &'static str {
        if self.debug {
            "Request cost: -"
        } else {
            "AI Fill mode"
        }
    }

    /// Badge text after a debug response arrived.
    pub fn usage_badge(usage: Option<&Usage>) -> String {
        format_usage(usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldwise_core::field::FieldMeta;

    fn project(name: &str) -> Project {
        Project::new(name, "desc")
    }

    #[test]
    fn full_cycle() {
        let mut session = PickSession::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.begin_request().is_none());

        session.start(project("Acme"));
        assert_eq!(session.state(), SessionState::Picking);

        let ticket = session.begin_request().unwrap();
        assert_eq!(session.state(), SessionState::RequestInFlight);
        assert!(session.finish_request(ticket));
        assert_eq!(session.state(), SessionState::Picking);

        session.stop();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.project().is_none());
    }

    #[test]
    fn triggers_during_flight_are_ignored() {
        let mut session = PickSession::new();
        session.start(project("Acme"));
        let ticket = session.begin_request().unwrap();
        assert!(session.begin_request().is_none());
        assert!(session.finish_request(ticket));
        assert!(session.begin_request().is_some());
    }

    #[test]
    fn restart_while_active_only_swaps_project() {
        let mut session = PickSession::new();
        session.start(project("Acme"));
        session.toggle_debug();
        let ticket = session.begin_request().unwrap();

        session.start(project("Globex"));
        assert_eq!(session.project().unwrap().name, "Globex");
        assert_eq!(session.state(), SessionState::RequestInFlight);
        assert!(session.is_debug());
        assert!(session.finish_request(ticket));
    }

    #[test]
    fn late_response_after_stop_is_not_applied() {
        let mut session = PickSession::new();
        session.start(project("Acme"));
        let ticket = session.begin_request().unwrap();
        session.stop();
        assert!(!session.finish_request(ticket));

        // A new session does not revive the old ticket either
        session.start(project("Acme"));
        assert!(!session.finish_request(ticket));
        assert_eq!(session.state(), SessionState::Picking);
    }

    #[test]
    fn debug_only_toggles_while_active() {
        let mut session = PickSession::new();
        assert!(!session.toggle_debug());
        session.start(project("Acme"));
        assert_eq!(session.badge(), "AI Fill mode");
        assert!(session.toggle_debug());
        assert_eq!(session.badge(), "Request cost: -");
        session.stop();
        assert!(!session.is_debug());
    }

    #[test]
    fn fill_request_carries_session_context() {
        let mut session = PickSession::new();
        session.start(project("Acme"));
        session.toggle_debug();
        let ticket = session.begin_request().unwrap();
        assert!(ticket.debug());

        let capture = FieldCapture {
            meta: FieldMeta::from_label("Headline"),
            value: "Old".into(),
            placeholder: "Type here".into(),
        };
        let request = session.fill_request(capture, &ticket);
        assert_eq!(request.project.unwrap().name, "Acme");
        assert_eq!(request.field_label, "Headline");
        assert_eq!(request.field_value, "Old");
        assert!(request.debug);
    }

    #[test]
    fn usage_badge_formats_totals() {
        let usage = Usage {
            prompt_tokens: Some(3),
            completion_tokens: Some(4),
            total_tokens: None,
        };
        assert_eq!(PickSession::usage_badge(Some(&usage)), "Request cost: 7 tokens");
        assert_eq!(PickSession::usage_badge(None), "Request cost: no data");
    }
}
