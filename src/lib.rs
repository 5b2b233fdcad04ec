//! Pagekit
//!
//! A rendering engine for data-driven landing pages. A page is described by
//! a JSON document (a list of typed sections plus page-level colors, fonts
//! and background) and rendered into a framework-neutral tree of styled
//! elements, or straight to HTML.
//!
//! # Features
//!
//! - **Style resolution**: solid, gradient, mesh, pattern, image and video
//!   backgrounds with defaults for every field
//! - **Scroll animations**: declarative entrance specs for a host to play
//! - **Forms**: per-form state with an injectable submission sink
//! - **Button actions**: scroll, link and download, dispatched to a host
//!
//! # Example
//!
//! ```
//! use pagekit::{PageDocument, PageSession, PageView, RenderConfig};
//!
//! # fn main() -> pagekit::Result<()> {
//! let doc = PageDocument::from_json_str(r#"{
//!     "headline": "Ship faster",
//!     "sections": [{ "id": "hero", "type": "hero", "content": { "headline": "Ship faster" } }]
//! }"#)?;
//!
//! let session = PageSession::new(doc, RenderConfig::default());
//! let page = session.render();
//! assert_eq!(page.view, PageView::Sections);
//! assert!(page.to_html().contains("Ship faster"));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod action;
pub mod animation;
pub mod document;
pub mod form;
pub mod host;
pub mod render;
pub mod session;
pub mod style;

pub use action::{ActionDispatcher, ButtonAction};
pub use animation::{resolve_scroll_animation, AnimationSpec};
pub use document::{PageDocument, Section, SectionBody};
pub use form::{FormScope, FormState, LogSink, MemorySink, SubmissionSink, SubmitStatus};
pub use host::{HostEnvironment, RecordingHost};
pub use render::{compose_page, render_initial, Node, PageView, RenderedPage};
pub use session::PageSession;
pub use style::{resolve_background, resolve_page_background, ConcreteStyle};

/// Simulated delay of the logging submission sink, in milliseconds
pub const DEFAULT_SUBMIT_LATENCY_MS: u64 = 1000;

/// Rendering configuration
///
/// Copy and defaults used when the document leaves something unspecified.
///
/// # Examples
///
/// ```
/// let cfg = pagekit::RenderConfig::default();
/// assert_eq!(cfg.default_font_family, "Inter");
/// ```
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Font used when the document has no `fontFamily`
    pub default_font_family: String,
    /// Submit button label while a submission is in flight
    pub submitting_label: String,
    /// Submit button label when neither the section nor the page sets one
    pub default_submit_label: String,
    /// Heading of form sections without a title
    pub default_form_title: String,
    pub thank_you_title: String,
    pub thank_you_message: String,
    /// Latency of `LogSink` created from this config
    pub submit_latency_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_font_family: document::DEFAULT_FONT_FAMILY.to_string(),
            submitting_label: "Submitting...".to_string(),
            default_submit_label: "Submit".to_string(),
            default_form_title: "Get in Touch".to_string(),
            thank_you_title: "Thank You!".to_string(),
            thank_you_message:
                "We've received your information and will be in touch with you soon.".to_string(),
            submit_latency_ms: DEFAULT_SUBMIT_LATENCY_MS,
        }
    }
}

impl RenderConfig {
    /// Reject configurations that would render blank controls
    pub fn validate(&self) -> Result<()> {
        if self.default_font_family.trim().is_empty() {
            return Err(Error::ConfigError("default_font_family must not be empty".to_string()));
        }
        if self.submitting_label.trim().is_empty() {
            return Err(Error::ConfigError("submitting_label must not be empty".to_string()));
        }
        Ok(())
    }

    /// Logging sink with this config's latency
    pub fn log_sink(&self) -> LogSink {
        LogSink::new(std::time::Duration::from_millis(self.submit_latency_ms))
    }
}
