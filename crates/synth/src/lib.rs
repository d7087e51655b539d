//! # Fieldwise Synth
//!
//! The field semantics and prompt synthesis engine: given one text-entry
//! field, work out what it is for and write a bounded prompt for it.
//!
//! Pipeline: [`labels::collect`] → [`classify::classify`] →
//! [`template::render`] → [`hint::inject_hint`] → [`limit::apply_limit`],
//! wrapped by [`prompt::synthesize`] and served by [`fill::FillService`].

pub mod classify;
pub mod fill;
pub mod hint;
pub mod inspect;
pub mod labels;
pub mod limit;
pub mod prompt;
pub mod session;
pub mod template;
pub mod writeback;

pub use classify::classify;
pub use fill::FillService;
pub use inspect::{ElementInspector, FixtureElement, HtmlDocument, HtmlElement, InspectError};
pub use labels::{FieldCapture, capture, collect};
pub use prompt::{PromptPlan, synthesize};
pub use session::{PickSession, RequestTicket, SessionState};
pub use writeback::render_filled;
