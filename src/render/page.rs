//! Page composition and the top-level view switch

use std::collections::BTreeMap;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::document::PageDocument;
use crate::form::{FormScope, FormState};
use crate::style::{resolve_page_background, ConcreteStyle};
use crate::RenderConfig;

use super::controls::{check_icon, icon_chip, render_form};
use super::sections::render_section;
use super::{escape_html, Element, Node, RenderContext};

/// Which of the three top-level layouts a page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageView {
    /// A form was submitted; sections are no longer shown
    ThankYou,
    /// The document has no sections; a single form over `formFields`
    FallbackForm,
    /// Every section in document order
    Sections,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPage {
    pub view: PageView,
    pub root: Node,
}

impl RenderedPage {
    /// Body markup only
    pub fn to_html(&self) -> String {
        self.root.to_html()
    }

    /// Hex SHA-256 of the body markup, usable as a cache key or ETag
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(self.to_html().as_bytes()))
    }

    /// Standalone HTML document around the rendered body
    pub fn to_document_html(&self, title: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
            escape_html(title),
            self.to_html()
        )
    }
}

/// Views are checked in priority order: a submitted form wins over an empty
/// section list, which wins over the section layout.
pub fn select_view(ctx: &RenderContext) -> PageView {
    if ctx.forms.values().any(FormState::is_submitted) {
        PageView::ThankYou
    } else if ctx.doc.sections.is_empty() {
        PageView::FallbackForm
    } else {
        PageView::Sections
    }
}

pub fn compose_page(ctx: &RenderContext) -> RenderedPage {
    let view = select_view(ctx);
    let root = match view {
        PageView::ThankYou => thank_you(ctx),
        PageView::FallbackForm => fallback_form(ctx),
        PageView::Sections => sections(ctx),
    };
    RenderedPage {
        view,
        root: root.into(),
    }
}

fn font_style(ctx: &RenderContext) -> ConcreteStyle {
    ConcreteStyle::new().with("font-family", ctx.font_family())
}

fn text_style(ctx: &RenderContext) -> ConcreteStyle {
    ConcreteStyle::new().with("color", ctx.doc.text_color())
}

/// Full-viewport centering shell shared by the thank-you and fallback views
fn centered_shell(ctx: &RenderContext) -> Element {
    Element::new("div")
        .class("min-h-screen flex items-center justify-center p-6")
        .style(resolve_page_background(ctx.doc))
}

fn thank_you(ctx: &RenderContext) -> Element {
    let primary = ctx.doc.primary_color();
    centered_shell(ctx).child(
        Element::new("div")
            .class("text-center max-w-md")
            .style(font_style(ctx))
            .child(
                Element::new("div")
                    .class("flex justify-center mb-6")
                    .child(icon_chip(primary, check_icon(primary))),
            )
            .child(
                Element::new("h2")
                    .class("text-3xl font-bold mb-4")
                    .style(text_style(ctx))
                    .text(ctx.config.thank_you_title.as_str()),
            )
            .child(
                Element::new("p")
                    .class("text-lg opacity-80")
                    .style(text_style(ctx))
                    .text(ctx.config.thank_you_message.as_str()),
            ),
    )
}

fn fallback_form(ctx: &RenderContext) -> Element {
    let doc = ctx.doc;
    let logo = doc.logo.as_deref().map(|src| {
        Element::new("div").class("flex justify-center mb-8").child(
            Element::new("img")
                .attr("src", src)
                .attr("alt", "Logo")
                .class("h-16 md:h-20 object-contain"),
        )
    });
    let subheadline = doc.subheadline.as_deref().map(|t| {
        Element::new("p")
            .class("text-xl md:text-2xl mb-6 opacity-90")
            .style(text_style(ctx))
            .text(t)
    });
    let submit = doc
        .cta_text
        .as_deref()
        .unwrap_or(ctx.config.default_submit_label.as_str());

    let header = Element::new("div")
        .class("text-center mb-12")
        .child_opt(logo)
        .child(
            Element::new("h1")
                .class("text-4xl md:text-6xl font-bold mb-4")
                .style(ConcreteStyle::new().with("color", doc.primary_color()))
                .text(doc.headline.as_deref().unwrap_or_default()),
        )
        .child_opt(subheadline)
        .child(
            Element::new("p")
                .class("text-lg md:text-xl max-w-2xl mx-auto opacity-80")
                .style(text_style(ctx))
                .text(doc.description.as_deref().unwrap_or_default()),
        );

    let card = Element::new("div")
        .class("rounded-2xl shadow-xl p-8 md:p-12 max-w-2xl mx-auto border border-gray-100")
        .style(ConcreteStyle::new().with("background-color", "white"))
        .child(render_form(
            ctx,
            FormScope::Fallback,
            submit,
            Some(doc.text_color()),
        ));

    centered_shell(ctx).child(
        Element::new("div")
            .class("w-full max-w-4xl")
            .style(font_style(ctx))
            .child(header)
            .child(card),
    )
}

fn sections(ctx: &RenderContext) -> Element {
    Element::new("div")
        .style(resolve_page_background(ctx.doc))
        .child(
            Element::new("div")
                .style(font_style(ctx))
                .children(ctx.doc.sections.iter().map(|s| render_section(s, ctx))),
        )
}

/// Render a document as it looks on first load, before any form interaction
pub fn render_initial(doc: &PageDocument, config: &RenderConfig) -> RenderedPage {
    let forms: BTreeMap<FormScope, FormState> = BTreeMap::new();
    compose_page(&RenderContext::new(doc, config, &forms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: serde_json::Value) -> PageDocument {
        PageDocument::from_value(&v).unwrap()
    }

    #[test]
    fn empty_sections_render_fallback_form() {
        let d = doc(json!({
            "headline": "Launch day",
            "ctaText": "Notify me",
            "formFields": [
                { "id": "name", "label": "Name" },
                { "id": "msg", "label": "Message", "type": "textarea" }
            ]
        }));
        let page = render_initial(&d, &RenderConfig::default());
        assert_eq!(page.view, PageView::FallbackForm);
        let text = page.root.text_content();
        assert!(text.contains("Launch day"));
        assert!(text.contains("Notify me"));
        assert!(page.root.find_by_id("name").is_some());
        assert_eq!(page.root.find_by_id("msg").unwrap().tag, "textarea");
        assert!(page.root.elements().iter().all(|e| e.tag != "section"));
    }

    #[test]
    fn sections_render_in_document_order() {
        let d = doc(json!({ "sections": [
            { "id": "a", "type": "hero", "content": { "headline": "First" } },
            { "id": "b", "type": "mystery" },
            { "id": "c", "type": "cta", "content": { "headline": "Last" } }
        ] }));
        let page = render_initial(&d, &RenderConfig::default());
        assert_eq!(page.view, PageView::Sections);
        let keys: Vec<&str> = page
            .root
            .elements()
            .into_iter()
            .filter(|e| e.tag == "section")
            .filter_map(|e| e.key.as_deref())
            .collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(page.root.text_content(), "FirstLast");
    }

    #[test]
    fn any_submitted_scope_shows_thank_you() {
        let d = doc(json!({ "sections": [{ "id": "f", "type": "form" }] }));
        let config = RenderConfig::default();
        let mut forms = BTreeMap::new();
        let mut state = FormState::new();
        state.begin_submit();
        state.finish_submit(&Ok(()));
        forms.insert(FormScope::Section("f".to_string()), state);

        let page = compose_page(&RenderContext::new(&d, &config, &forms));
        assert_eq!(page.view, PageView::ThankYou);
        assert!(page.root.text_content().contains("Thank You!"));
    }

    #[test]
    fn font_family_defaults_to_inter() {
        let page = render_initial(&doc(json!({})), &RenderConfig::default());
        let html = page.to_html();
        assert!(html.contains("font-family: Inter"));
        assert!(html.contains("min-height: 100vh"));
    }

    #[test]
    fn fingerprint_tracks_markup() {
        let a = render_initial(&doc(json!({ "headline": "One" })), &RenderConfig::default());
        let b = render_initial(&doc(json!({ "headline": "Two" })), &RenderConfig::default());
        assert_eq!(a.fingerprint().len(), 64);
        assert_eq!(a.fingerprint(), a.clone().fingerprint());
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn document_html_escapes_title() {
        let page = render_initial(&doc(json!({})), &RenderConfig::default());
        let html = page.to_document_html("A & B");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>A &amp; B</title>"));
    }
}
