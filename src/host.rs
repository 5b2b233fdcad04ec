//! Host environment surface used by button actions.
//!
//! The engine never touches a real browser. Anything that needs one (element
//! lookup, smooth scrolling, opening tabs, triggering downloads) goes through
//! `HostEnvironment`, which a UI binding implements.

use std::collections::HashSet;
use std::sync::Mutex;

/// Opaque handle to an element found by `query_selector`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef {
    pub selector: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
}

/// A transient download link. Created by the dispatcher, clicked once and
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    /// Filename hint; empty lets the host pick one from the URL
    pub download: String,
}

pub trait HostEnvironment: Send + Sync {
    fn query_selector(&self, selector: &str) -> Option<ElementRef>;
    fn scroll_into_view(&self, element: &ElementRef, behavior: ScrollBehavior);
    /// Open `url` in the browsing context named by `target` (e.g. `_blank`)
    fn open_url(&self, url: &str, target: &str);
    fn click_anchor(&self, anchor: &Anchor);
}

/// Side effect observed by `RecordingHost`
#[derive(Debug, Clone, PartialEq)]
pub enum HostEffect {
    ScrolledTo { selector: String, behavior: ScrollBehavior },
    Opened { url: String, target: String },
    Downloaded(Anchor),
}

/// In-memory host that records effects instead of performing them.
///
/// Only selectors registered with `with_elements` resolve; everything else
/// behaves like a missing element.
pub struct RecordingHost {
    elements: HashSet<String>,
    effects: Mutex<Vec<HostEffect>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        RecordingHost {
            elements: HashSet::new(),
            effects: Mutex::new(Vec::new()),
        }
    }

    pub fn with_elements<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RecordingHost {
            elements: selectors.into_iter().map(Into::into).collect(),
            effects: Mutex::new(Vec::new()),
        }
    }

    pub fn effects(&self) -> Vec<HostEffect> {
        self.effects.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, effect: HostEffect) {
        self.effects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(effect);
    }
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostEnvironment for RecordingHost {
    fn query_selector(&self, selector: &str) -> Option<ElementRef> {
        self.elements.contains(selector).then(|| ElementRef {
            selector: selector.to_string(),
        })
    }

    fn scroll_into_view(&self, element: &ElementRef, behavior: ScrollBehavior) {
        self.record(HostEffect::ScrolledTo {
            selector: element.selector.clone(),
            behavior,
        });
    }

    fn open_url(&self, url: &str, target: &str) {
        self.record(HostEffect::Opened {
            url: url.to_string(),
            target: target.to_string(),
        });
    }

    fn click_anchor(&self, anchor: &Anchor) {
        self.record(HostEffect::Downloaded(anchor.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_host_resolves_only_known_selectors() {
        let h = RecordingHost::with_elements(["#features"]);
        assert!(h.query_selector("#features").is_some());
        assert!(h.query_selector("#pricing").is_none());
        assert!(h.effects().is_empty());
    }
}
