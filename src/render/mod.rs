//! Render tree and HTML output.
//!
//! Sections and pages render into a small framework-neutral tree of
//! `Node`s. A host UI binding can walk it directly (styles, animations and
//! behaviors are typed), or call `to_html` for a static page whose
//! interactive parts are described in `data-*` attributes.

pub mod controls;
pub mod page;
pub mod sections;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::action::ButtonAction;
use crate::animation::AnimationSpec;
use crate::document::PageDocument;
use crate::form::{FormScope, FormState};
use crate::style::ConcreteStyle;
use crate::RenderConfig;

pub use page::{compose_page, render_initial, select_view, PageView, RenderedPage};
pub use sections::render_section;

/// What an element does when the user interacts with it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Behavior {
    /// Button click routed to the action dispatcher
    Action { action: Option<ButtonAction> },
    /// Form submission for a scope
    Submit { scope: FormScope },
    /// Field edit, written to the scope's form state
    Input { scope: FormScope, field: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub tag: &'static str,
    /// Stable sibling key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<&'static str, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<&'static str>,
    #[serde(skip_serializing_if = "ConcreteStyle::is_empty")]
    pub style: ConcreteStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior: Option<Behavior>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Element {
            tag,
            key: None,
            attrs: BTreeMap::new(),
            classes: Vec::new(),
            style: ConcreteStyle::new(),
            behavior: None,
            animation: None,
            children: Vec::new(),
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.insert(name, value.into());
        self
    }

    /// Whitespace-separated utility classes
    pub fn class(mut self, classes: &'static str) -> Self {
        self.classes.extend(classes.split_whitespace());
        self
    }

    pub fn style(mut self, style: ConcreteStyle) -> Self {
        self.style = style;
        self
    }

    pub fn behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = Some(behavior);
        self
    }

    pub fn animate(mut self, spec: AnimationSpec) -> Self {
        self.animation = Some(spec);
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append a child only when present
    pub fn child_opt(mut self, node: Option<impl Into<Node>>) -> Self {
        if let Some(n) = node {
            self.children.push(n.into());
        }
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::text(text))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "kebab-case")]
pub enum Node {
    Element(Element),
    Text { text: String },
    /// Author-supplied markup emitted without escaping
    TrustedHtml { html: String },
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

const VOID_ELEMENTS: &[&str] = &["img", "input", "source", "br", "hr", "meta", "link"];

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Every element in the subtree, depth-first, self included
    pub fn elements(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_elements(self, &mut out);
        out
    }

    /// First element carrying `id`
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.elements()
            .into_iter()
            .find(|el| el.attrs.get("id").map(String::as_str) == Some(id))
    }

    /// Concatenated text of the subtree (trusted HTML excluded)
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_html(self, &mut out);
        out
    }
}

fn collect_elements<'a>(node: &'a Node, out: &mut Vec<&'a Element>) {
    if let Node::Element(el) = node {
        out.push(el);
        for c in &el.children {
            collect_elements(c, out);
        }
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text { text } => out.push_str(text),
        Node::Element(el) => el.children.iter().for_each(|c| collect_text(c, out)),
        Node::TrustedHtml { .. } => {}
    }
}

fn write_html(node: &Node, out: &mut String) {
    match node {
        Node::Text { text } => out.push_str(&escape_html(text)),
        Node::TrustedHtml { html } => out.push_str(html),
        Node::Element(el) => {
            out.push('<');
            out.push_str(el.tag);
            for (name, value) in &el.attrs {
                push_attr(out, name, value);
            }
            if !el.classes.is_empty() {
                push_attr(out, "class", &el.classes.join(" "));
            }
            if !el.style.is_empty() {
                push_attr(out, "style", &el.style.to_css());
            }
            if let Some(spec) = &el.animation {
                push_attr(out, "data-animate", &to_json(spec));
            }
            match &el.behavior {
                Some(Behavior::Action { action: Some(action) }) => {
                    push_attr(out, "data-action", &to_json(action))
                }
                Some(Behavior::Action { action: None }) => {}
                Some(Behavior::Submit { scope }) => push_attr(out, "data-submit", &to_json(scope)),
                Some(Behavior::Input { scope, field }) => {
                    push_attr(out, "data-form", &to_json(scope));
                    push_attr(out, "data-field", field);
                }
                None => {}
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&el.tag) {
                return;
            }
            for c in &el.children {
                write_html(c, out);
            }
            out.push_str("</");
            out.push_str(el.tag);
            out.push('>');
        }
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_html(value));
    out.push('"');
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Inputs shared by every renderer in one pass
pub struct RenderContext<'a> {
    pub doc: &'a PageDocument,
    pub config: &'a RenderConfig,
    pub forms: &'a BTreeMap<FormScope, FormState>,
}

static IDLE_FORM: FormState = FormState::new();

impl<'a> RenderContext<'a> {
    pub fn new(
        doc: &'a PageDocument,
        config: &'a RenderConfig,
        forms: &'a BTreeMap<FormScope, FormState>,
    ) -> Self {
        RenderContext { doc, config, forms }
    }

    /// State for `scope`; forms nobody has touched yet read as idle and empty
    pub fn form(&self, scope: &FormScope) -> &'a FormState {
        self.forms.get(scope).unwrap_or(&IDLE_FORM)
    }

    pub fn font_family(&self) -> &'a str {
        self.doc.font_family(&self.config.default_font_family)
    }
}
