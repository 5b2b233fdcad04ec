//! Building blocks shared by several views: icons, buttons and the form.

use crate::action::ButtonAction;
use crate::document::{FormField, InputKind};
use crate::form::FormScope;
use crate::style::{tint, ConcreteStyle};

use super::{Behavior, Element, RenderContext};

const STAR_PATH: &str = "M234.5,114.38l-45.1,39.36,13.51,58.6a16,16,0,0,1-23.84,17.34l-51.11-31-51,31a16,16,0,0,1-23.84-17.34L66.61,153.8,21.5,114.38a16,16,0,0,1,9.11-28.06l59.46-5.15,23.21-55.36a15.95,15.95,0,0,1,29.44,0h0L166,81.17l59.44,5.15a16,16,0,0,1,9.11,28.06Z";
const CHECK_PATH: &str = "M9 12L11 14L15 10M21 12C21 16.9706 16.9706 21 12 21C7.02944 21 3 16.9706 3 12C3 7.02944 7.02944 3 12 3C16.9706 3 21 7.02944 21 12Z";

const INPUT_CLASSES: &str = "w-full rounded-lg border border-gray-300 px-4 py-3 text-gray-900 placeholder:text-gray-500 focus:border-blue-500 focus:outline-none focus:ring-2 focus:ring-blue-500";

pub fn star_icon(size: u32, fill: &str) -> Element {
    Element::new("svg")
        .attr("width", size.to_string())
        .attr("height", size.to_string())
        .attr("viewBox", "0 0 256 256")
        .attr("fill", fill)
        .child(Element::new("path").attr("d", STAR_PATH))
}

pub fn check_icon(stroke: &str) -> Element {
    Element::new("svg")
        .attr("width", "64")
        .attr("height", "64")
        .attr("viewBox", "0 0 24 24")
        .attr("fill", "none")
        .child(
            Element::new("path")
                .attr("d", CHECK_PATH)
                .attr("stroke", stroke)
                .attr("stroke-width", "2")
                .attr("stroke-linecap", "round")
                .attr("stroke-linejoin", "round"),
        )
}

/// Round badge tinted with `color` around an icon
pub fn icon_chip(color: &str, icon: Element) -> Element {
    Element::new("div")
        .class("rounded-full p-4")
        .style(ConcreteStyle::new().with("background-color", tint(color)))
        .child(icon)
}

fn accent_button_style(accent: &str) -> ConcreteStyle {
    ConcreteStyle::new()
        .with("background-color", accent)
        .with("color", "white")
}

/// Hero / call-to-action button wired to the action dispatcher
pub fn action_button(label: Option<&str>, action: Option<&ButtonAction>, accent: &str) -> Element {
    Element::new("button")
        .attr("type", "button")
        .class("text-lg px-8 h-14 rounded-lg transition-transform hover:scale-105")
        .style(accent_button_style(accent))
        .behavior(Behavior::Action {
            action: action.cloned(),
        })
        .text(label.unwrap_or_default())
}

/// The lead-capture form over the page's `formFields`.
///
/// `label_color` colors field labels on the page background; `None` uses the
/// dark label text meant for white cards.
pub fn render_form(
    ctx: &RenderContext,
    scope: FormScope,
    submit_label: &str,
    label_color: Option<&str>,
) -> Element {
    let state = ctx.form(&scope);
    let fields = ctx
        .doc
        .form_fields
        .iter()
        .map(|f| render_field(f, &scope, state.value(&f.id), label_color));

    let label = if state.is_submitting() {
        ctx.config.submitting_label.as_str()
    } else {
        submit_label
    };
    let mut button = Element::new("button")
        .attr("type", "submit")
        .class("w-full h-14 text-lg font-semibold rounded-lg transition-transform hover:scale-105")
        .style(accent_button_style(ctx.doc.accent_color()))
        .text(label);
    if state.is_submitting() {
        button = button.attr("disabled", "");
    }

    let error = state.error().map(|msg| {
        Element::new("p")
            .attr("role", "alert")
            .class("text-sm text-red-600")
            .text(msg)
    });

    Element::new("form")
        .class("space-y-6")
        .behavior(Behavior::Submit {
            scope: scope.clone(),
        })
        .children(fields)
        .child_opt(error)
        .child(button)
}

fn render_field(field: &FormField, scope: &FormScope, value: &str, label_color: Option<&str>) -> Element {
    let mut label = Element::new("label")
        .attr("for", field.id.as_str())
        .class("block text-sm font-medium")
        .style(ConcreteStyle::new().with_opt("color", label_color))
        .text(field.label.as_str());
    if label_color.is_none() {
        label = label.class("text-gray-900");
    }
    if field.required {
        label = label
            .text(" ")
            .child(Element::new("span").class("text-red-500").text("*"));
    }

    let behavior = Behavior::Input {
        scope: scope.clone(),
        field: field.id.clone(),
    };
    let control = match field.kind {
        InputKind::Textarea => Element::new("textarea")
            .attr("rows", "4")
            .class(INPUT_CLASSES)
            .text(value),
        kind => Element::new("input")
            .attr("type", kind.tag())
            .attr("value", value)
            .class(INPUT_CLASSES)
            .class("h-12"),
    };
    let mut control = control
        .attr("id", field.id.as_str())
        .attr("name", field.id.as_str())
        .behavior(behavior);
    if let Some(p) = &field.placeholder {
        control = control.attr("placeholder", p.as_str());
    }
    if field.required {
        control = control.attr("required", "");
    }

    Element::new("div")
        .key(field.id.as_str())
        .class("space-y-2")
        .child(label)
        .child(control)
}
