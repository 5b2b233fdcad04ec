//! Button actions and their dispatch against the host environment

use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::document::str_at;
use crate::host::{Anchor, HostEnvironment, ScrollBehavior};

/// Declarative side effect attached to a hero or call-to-action button.
///
/// Targets are optional: a missing selector or URL makes the action a no-op
/// at dispatch time rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ButtonAction {
    Scroll {
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<String>,
    },
    Link {
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
    Download {
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
}

impl ButtonAction {
    /// Parse `{type, target?, url?}`. Unknown or missing `type` yields `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let kind = str_at(value, "type")?;
        match kind.as_str() {
            "scroll" => Some(ButtonAction::Scroll {
                target: str_at(value, "target"),
            }),
            "link" => Some(ButtonAction::Link {
                url: str_at(value, "url"),
            }),
            "download" => Some(ButtonAction::Download {
                url: str_at(value, "url"),
            }),
            other => {
                debug!("ignoring button action of unknown type '{}'", other);
                None
            }
        }
    }
}

/// Performs button actions on a host. Never fails: anything it cannot act on
/// is logged at debug level and dropped.
pub struct ActionDispatcher<'h, H: HostEnvironment + ?Sized> {
    host: &'h H,
}

impl<'h, H: HostEnvironment + ?Sized> ActionDispatcher<'h, H> {
    pub fn new(host: &'h H) -> Self {
        ActionDispatcher { host }
    }

    pub fn dispatch(&self, action: Option<&ButtonAction>) {
        let Some(action) = action else {
            debug!("button has no action");
            return;
        };

        match action {
            ButtonAction::Scroll { target: Some(selector) } => {
                match self.host.query_selector(selector) {
                    Some(el) => self.host.scroll_into_view(&el, ScrollBehavior::Smooth),
                    None => debug!("scroll target '{}' not found", selector),
                }
            }
            ButtonAction::Link { url: Some(url) } => self.host.open_url(url, "_blank"),
            ButtonAction::Download { url: Some(url) } => {
                let anchor = Anchor {
                    href: url.clone(),
                    download: String::new(),
                };
                self.host.click_anchor(&anchor);
            }
            other => debug!("action {:?} has no target", other),
        }
    }
}
