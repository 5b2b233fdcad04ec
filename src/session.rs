//! A mounted page: the document plus the form state that lives alongside it.

use std::collections::BTreeMap;

use log::debug;

use crate::action::ActionDispatcher;
use crate::document::{PageDocument, SectionBody};
use crate::form::{FormScope, FormState, FormValues, SubmissionSink};
use crate::host::HostEnvironment;
use crate::render::{compose_page, select_view, PageView, RenderContext, RenderedPage};
use crate::{Error, RenderConfig, Result};

/// One page instance.
///
/// The document is never mutated. Each form scope owns an independent
/// `FormState`, created on first edit or submit; dropping the session is the
/// only way to reset them.
pub struct PageSession {
    doc: PageDocument,
    config: RenderConfig,
    forms: BTreeMap<FormScope, FormState>,
}

impl PageSession {
    pub fn new(doc: PageDocument, config: RenderConfig) -> Self {
        PageSession {
            doc,
            config,
            forms: BTreeMap::new(),
        }
    }

    pub fn document(&self) -> &PageDocument {
        &self.doc
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Form scopes the current document renders
    pub fn form_scopes(&self) -> Vec<FormScope> {
        if self.doc.sections.is_empty() {
            return vec![FormScope::Fallback];
        }
        self.doc
            .sections
            .iter()
            .filter(|s| matches!(s.body, SectionBody::Form(_)))
            .map(|s| FormScope::Section(s.id.clone()))
            .collect()
    }

    pub fn form(&self, scope: &FormScope) -> Option<&FormState> {
        self.forms.get(scope)
    }

    /// Whether the current layout renders a form for `scope`
    pub fn renders(&self, scope: &FormScope) -> bool {
        match scope {
            FormScope::Fallback => self.doc.sections.is_empty(),
            FormScope::Section(id) => self
                .doc
                .sections
                .iter()
                .any(|s| s.id == *id && matches!(s.body, SectionBody::Form(_))),
        }
    }

    fn form_mut(&mut self, scope: &FormScope) -> Option<&mut FormState> {
        if !self.renders(scope) {
            debug!("page renders no form for {:?}", scope);
            return None;
        }
        Some(self.forms.entry(scope.clone()).or_default())
    }

    /// Edits to a scope the page does not render are dropped.
    pub fn set_field(&mut self, scope: &FormScope, id: impl Into<String>, value: impl Into<String>) {
        if let Some(form) = self.form_mut(scope) {
            form.set_field(id, value);
        }
    }

    /// First half of a submission; see `FormState::begin_submit`. Lets the
    /// caller deliver several scopes concurrently. `None` for a scope the
    /// page does not render.
    pub fn begin_submit(&mut self, scope: &FormScope) -> Option<FormValues> {
        self.form_mut(scope)?.begin_submit()
    }

    pub fn finish_submit(&mut self, scope: &FormScope, outcome: &Result<()>) {
        if let Some(form) = self.forms.get_mut(scope) {
            form.finish_submit(outcome);
        }
    }

    /// Submit `scope` through `sink`. Nothing is delivered for a scope the
    /// page does not render.
    pub async fn submit<S: SubmissionSink>(&mut self, scope: &FormScope, sink: &S) -> Result<()> {
        match self.form_mut(scope) {
            Some(form) => form.submit(sink).await,
            None => Err(Error::SubmissionError(format!(
                "page has no form for {:?}",
                scope
            ))),
        }
    }

    /// Run the button action of the section with `section_id` against `host`.
    pub fn click_button<H: HostEnvironment + ?Sized>(&self, section_id: &str, host: &H) {
        let Some(section) = self.doc.sections.iter().find(|s| s.id == section_id) else {
            debug!("click on unknown section '{}'", section_id);
            return;
        };
        ActionDispatcher::new(host).dispatch(section.button_action.as_ref());
    }

    fn context(&self) -> RenderContext<'_> {
        RenderContext::new(&self.doc, &self.config, &self.forms)
    }

    pub fn view(&self) -> PageView {
        select_view(&self.context())
    }

    pub fn render(&self) -> RenderedPage {
        compose_page(&self.context())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::MemorySink;
    use crate::host::{HostEffect, RecordingHost};
    use serde_json::json;

    fn session(v: serde_json::Value) -> PageSession {
        PageSession::new(PageDocument::from_value(&v).unwrap(), RenderConfig::default())
    }

    #[test]
    fn form_scopes_follow_the_layout() {
        let s = session(json!({}));
        assert_eq!(s.form_scopes(), vec![FormScope::Fallback]);

        let s = session(json!({ "sections": [
            { "id": "hero", "type": "hero" },
            { "id": "f1", "type": "form" },
            { "id": "f2", "type": "form" }
        ] }));
        assert_eq!(
            s.form_scopes(),
            vec![
                FormScope::Section("f1".to_string()),
                FormScope::Section("f2".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn fallback_submission_moves_to_thank_you() {
        let mut s = session(json!({ "formFields": [{ "id": "name" }] }));
        assert_eq!(s.view(), PageView::FallbackForm);
        s.set_field(&FormScope::Fallback, "name", "Ada");

        let sink = MemorySink::new();
        s.submit(&FormScope::Fallback, &sink).await.unwrap();
        assert_eq!(s.view(), PageView::ThankYou);
        assert_eq!(sink.deliveries()[0]["name"], "Ada");
    }

    #[test]
    fn submitting_disables_only_that_form() {
        let mut s = session(json!({
            "formFields": [{ "id": "email" }],
            "sections": [{ "id": "f1", "type": "form" }, { "id": "f2", "type": "form" }]
        }));
        let f1 = FormScope::Section("f1".to_string());
        assert!(s.begin_submit(&f1).is_some());

        let page = s.render();
        let buttons: Vec<bool> = page
            .root
            .elements()
            .into_iter()
            .filter(|e| e.tag == "button")
            .map(|e| e.attrs.contains_key("disabled"))
            .collect();
        assert_eq!(buttons, vec![true, false]);
        assert!(page.root.text_content().contains("Submitting..."));
    }

    #[test]
    fn failed_submission_shows_inline_error_and_keeps_values() {
        let mut s = session(json!({ "formFields": [{ "id": "email" }] }));
        s.set_field(&FormScope::Fallback, "email", "ada@example.com");
        s.begin_submit(&FormScope::Fallback);
        s.finish_submit(
            &FormScope::Fallback,
            &Err(crate::Error::SubmissionError("timeout".to_string())),
        );

        assert_eq!(s.view(), PageView::FallbackForm);
        let page = s.render();
        let alert = page
            .root
            .elements()
            .into_iter()
            .find(|e| e.attrs.get("role").map(String::as_str) == Some("alert"))
            .unwrap();
        assert_eq!(alert.children.len(), 1);
        let input = page.root.find_by_id("email").unwrap();
        assert_eq!(input.attrs["value"], "ada@example.com");
    }

    #[tokio::test]
    async fn submitting_a_scope_the_page_does_not_render_is_rejected() {
        let mut s = session(json!({
            "formFields": [{ "id": "email" }],
            "sections": [{ "id": "hero", "type": "hero" }]
        }));
        assert!(s.form_scopes().is_empty());
        let sink = MemorySink::new();

        let hero = FormScope::Section("hero".to_string());
        s.set_field(&hero, "email", "ada@example.com");
        let err = s.submit(&hero, &sink).await.unwrap_err();
        assert!(matches!(err, crate::Error::SubmissionError(_)));
        assert!(s.form(&hero).is_none());

        assert!(s.submit(&FormScope::Fallback, &sink).await.is_err());
        assert!(s.begin_submit(&FormScope::Fallback).is_none());
        s.finish_submit(&FormScope::Fallback, &Ok(()));

        assert!(sink.deliveries().is_empty());
        assert_eq!(s.view(), PageView::Sections);
    }

    #[test]
    fn renders_matches_form_scopes() {
        let s = session(json!({ "sections": [{ "id": "f", "type": "form" }, { "id": "h", "type": "hero" }] }));
        assert!(s.renders(&FormScope::Section("f".to_string())));
        assert!(!s.renders(&FormScope::Section("h".to_string())));
        assert!(!s.renders(&FormScope::Section("missing".to_string())));
        assert!(!s.renders(&FormScope::Fallback));
        assert!(session(json!({})).renders(&FormScope::Fallback));
    }

    #[test]
    fn click_button_dispatches_section_action() {
        let s = session(json!({ "sections": [{
            "id": "hero", "type": "hero",
            "buttonAction": { "type": "scroll", "target": "#form" }
        }] }));
        let host = RecordingHost::with_elements(["#form"]);
        s.click_button("hero", &host);
        s.click_button("missing", &host);
        assert_eq!(host.effects().len(), 1);
        assert!(matches!(host.effects()[0], HostEffect::ScrolledTo { .. }));
    }
}
