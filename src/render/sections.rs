//! Per-section layouts

use crate::animation::{mount_entrance, resolve_scroll_animation, staggered_entrance, MountItem, Stagger};
use crate::document::{
    BackgroundType, CtaContent, FeaturesContent, FormContent, HeroContent, ImageContent, Section,
    SectionBody, StatsContent, TestimonialsContent, TextContent, VideoContent,
};
use crate::form::FormScope;
use crate::style::{resolve_background, ConcreteStyle};

use super::controls::{action_button, icon_chip, render_form, star_icon};
use super::{Element, Node, RenderContext};

const VIDEO_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

/// Render one section: its styled (and possibly scroll-animated) container
/// plus the layout for its kind.
///
/// Sections without a scroll effect get no animation and therefore no
/// viewport observer. Unsupported kinds render as an empty container.
pub fn render_section(section: &Section, ctx: &RenderContext) -> Node {
    let styles = &section.styles;
    let mut container = Element::new("section")
        .key(section.id.as_str())
        .class(styles.padding.classes())
        .style(resolve_background(styles));
    let kind = section.body.kind_tag();
    if !kind.is_empty() {
        container = container.attr("id", kind);
    }
    if let Some(spec) = resolve_scroll_animation(styles.scroll_effect) {
        container = container.animate(spec);
    }

    if styles.background.kind == BackgroundType::Video {
        if let Some(src) = &styles.background.video {
            container = container.child(background_video(src));
        }
    }

    let body = match &section.body {
        SectionBody::Hero(c) => Some(hero(c, section, ctx)),
        SectionBody::Features(c) => Some(features(c, section, ctx)),
        SectionBody::Testimonials(c) => Some(testimonials(c, section, ctx)),
        SectionBody::Text(c) => Some(text(c)),
        SectionBody::Image(c) => Some(image(c)),
        SectionBody::Video(c) => video(c),
        SectionBody::Stats(c) => Some(stats(c, ctx)),
        SectionBody::Cta(c) => Some(cta(c, section, ctx)),
        SectionBody::Form(c) => Some(form(c, section, ctx)),
        SectionBody::Unsupported { .. } => return container.into(),
    };

    container
        .child(
            Element::new("div")
                .class("container mx-auto px-6 relative z-10")
                .child_opt(body),
        )
        .into()
}

fn background_video(src: &str) -> Element {
    Element::new("video")
        .attr("autoplay", "")
        .attr("loop", "")
        .attr("muted", "")
        .attr("playsinline", "")
        .class("absolute inset-0 w-full h-full object-cover -z-10")
        .child(
            Element::new("source")
                .attr("src", src)
                .attr("type", "video/mp4"),
        )
}

fn hero(c: &HeroContent, section: &Section, ctx: &RenderContext) -> Element {
    let logo = ctx.doc.logo.as_deref().map(|src| {
        Element::new("div")
            .class("flex justify-center mb-8")
            .animate(mount_entrance(MountItem::Logo))
            .child(
                Element::new("img")
                    .attr("src", src)
                    .attr("alt", "Logo")
                    .class("h-16 object-contain"),
            )
    });
    let line = |tag: &'static str, classes: &'static str, item: MountItem, text: &str| {
        Element::new(tag)
            .class(classes)
            .animate(mount_entrance(item))
            .text(text)
    };

    Element::new("div")
        .class("max-w-4xl mx-auto text-center")
        .child_opt(logo)
        .child(line(
            "h1",
            "text-5xl md:text-7xl font-bold mb-6",
            MountItem::Headline,
            c.headline.as_deref().unwrap_or_default(),
        ))
        .child_opt(c.subheadline.as_deref().map(|t| {
            line("p", "text-xl md:text-2xl mb-4 opacity-90", MountItem::Subheadline, t)
        }))
        .child_opt(c.description.as_deref().map(|t| {
            line("p", "text-lg md:text-xl mb-8 opacity-80", MountItem::Description, t)
        }))
        .child(
            Element::new("div")
                .animate(mount_entrance(MountItem::Button))
                .child(action_button(
                    c.cta_text.as_deref(),
                    section.button_action.as_ref(),
                    ctx.doc.accent_color(),
                )),
        )
}

fn features(c: &FeaturesContent, section: &Section, ctx: &RenderContext) -> Element {
    let text_color = section.styles.text_color.as_deref();
    let primary = ctx.doc.primary_color();
    let cards = c.items.iter().enumerate().map(|(idx, item)| {
        Element::new("div")
            .key(idx.to_string())
            .class("bg-white rounded-xl shadow-md hover:shadow-xl transition-shadow p-8 text-center border border-gray-200")
            .animate(staggered_entrance(Stagger::Features, idx))
            .child(
                Element::new("div")
                    .class("mb-4 flex justify-center")
                    .child(icon_chip(primary, star_icon(32, primary))),
            )
            .child(
                Element::new("h3")
                    .class("text-xl font-semibold mb-2 text-gray-900")
                    .text(item.title.as_deref().unwrap_or_default()),
            )
            .child(
                Element::new("p")
                    .class("text-gray-600")
                    .text(item.description.as_deref().unwrap_or_default()),
            )
    });

    Element::new("div")
        .class("max-w-6xl mx-auto")
        .child(
            Element::new("div")
                .class("text-center mb-12")
                .child(
                    Element::new("h2")
                        .class("text-3xl md:text-5xl font-bold mb-4")
                        .style(ConcreteStyle::new().with("color", text_color.unwrap_or(primary)))
                        .text(c.title.as_deref().unwrap_or_default()),
                )
                .child(
                    Element::new("p")
                        .class("text-lg md:text-xl")
                        .style(
                            ConcreteStyle::new()
                                .with("opacity", "0.8")
                                .with_opt("color", text_color),
                        )
                        .text(c.description.as_deref().unwrap_or_default()),
                ),
        )
        .child(
            Element::new("div")
                .class("grid md:grid-cols-3 gap-8")
                .children(cards),
        )
}

fn testimonials(c: &TestimonialsContent, section: &Section, ctx: &RenderContext) -> Element {
    let accent = ctx.doc.accent_color();
    let cards = c.items.iter().enumerate().map(|(idx, item)| {
        let stars = (0..item.rating).map(|_| star_icon(20, accent));
        Element::new("div")
            .key(idx.to_string())
            .class("bg-white rounded-xl shadow-md hover:shadow-xl transition-shadow p-8 border border-gray-200")
            .animate(staggered_entrance(Stagger::Testimonials, idx))
            .child(Element::new("div").class("flex gap-1 mb-4").children(stars))
            .child(
                Element::new("p")
                    .class("text-lg mb-4 italic text-gray-700")
                    .text(format!("\"{}\"", item.quote.as_deref().unwrap_or_default())),
            )
            .child(
                Element::new("div")
                    .child(
                        Element::new("p")
                            .class("font-semibold text-gray-900")
                            .text(item.name.as_deref().unwrap_or_default()),
                    )
                    .child(
                        Element::new("p")
                            .class("text-sm text-gray-600")
                            .text(item.role.as_deref().unwrap_or_default()),
                    ),
            )
    });

    Element::new("div")
        .class("max-w-6xl mx-auto")
        .child(
            Element::new("h2")
                .class("text-3xl md:text-5xl font-bold text-center mb-12")
                .style(ConcreteStyle::new().with_opt("color", section.styles.text_color.as_deref()))
                .text(c.title.as_deref().unwrap_or_default()),
        )
        .child(
            Element::new("div")
                .class("grid md:grid-cols-2 gap-8")
                .children(cards),
        )
}

fn text(c: &TextContent) -> Element {
    Element::new("div")
        .class("max-w-4xl mx-auto")
        .child(
            Element::new("h2")
                .class("text-3xl md:text-5xl font-bold mb-6")
                .text(c.title.as_deref().unwrap_or_default()),
        )
        .child(
            Element::new("div")
                .class("prose prose-lg max-w-none")
                .child(Node::TrustedHtml {
                    html: c.body.as_trusted_str().to_string(),
                }),
        )
}

fn image(c: &ImageContent) -> Element {
    let img = c.image.as_deref().map(|src| {
        Element::new("img")
            .attr("src", src)
            .attr("alt", c.caption.as_deref().unwrap_or("Image"))
            .class("w-full rounded-2xl shadow-2xl")
    });
    let caption = c.caption.as_deref().map(|t| {
        Element::new("p")
            .class("text-center mt-4 text-lg opacity-75")
            .text(t)
    });
    Element::new("div")
        .class("max-w-5xl mx-auto")
        .child_opt(img)
        .child_opt(caption)
}

/// Embedded external player; nothing without a URL
fn video(c: &VideoContent) -> Option<Element> {
    let url = c.url.as_deref()?;
    Some(
        Element::new("div").class("max-w-5xl mx-auto").child(
            Element::new("div")
                .class("aspect-video rounded-2xl overflow-hidden shadow-2xl")
                .child(
                    Element::new("iframe")
                        .attr("src", url)
                        .attr("allow", VIDEO_ALLOW)
                        .attr("allowfullscreen", "")
                        .class("w-full h-full"),
                ),
        ),
    )
}

fn stats(c: &StatsContent, ctx: &RenderContext) -> Element {
    let primary = ctx.doc.primary_color();
    let items = c.items.iter().enumerate().map(|(idx, item)| {
        Element::new("div")
            .key(idx.to_string())
            .class("text-center")
            .animate(staggered_entrance(Stagger::Stats, idx))
            .child(
                Element::new("div")
                    .class("text-5xl md:text-6xl font-bold mb-2")
                    .style(ConcreteStyle::new().with("color", primary))
                    .text(item.value.as_deref().unwrap_or_default()),
            )
            .child(
                Element::new("div")
                    .class("text-lg opacity-80")
                    .text(item.label.as_deref().unwrap_or_default()),
            )
    });
    Element::new("div").class("max-w-6xl mx-auto").child(
        Element::new("div")
            .class("grid md:grid-cols-3 gap-8")
            .children(items),
    )
}

fn cta(c: &CtaContent, section: &Section, ctx: &RenderContext) -> Element {
    Element::new("div")
        .class("max-w-4xl mx-auto text-center")
        .child(
            Element::new("h2")
                .class("text-3xl md:text-5xl font-bold mb-6")
                .text(c.headline.as_deref().unwrap_or_default()),
        )
        .child_opt(c.description.as_deref().map(|t| {
            Element::new("p")
                .class("text-lg md:text-xl mb-8 opacity-80")
                .text(t)
        }))
        .child(action_button(
            c.cta_text.as_deref(),
            section.button_action.as_ref(),
            ctx.doc.accent_color(),
        ))
}

fn form(c: &FormContent, section: &Section, ctx: &RenderContext) -> Element {
    let title = c
        .title
        .as_deref()
        .unwrap_or(ctx.config.default_form_title.as_str());
    let submit = c
        .submit_text
        .as_deref()
        .or(ctx.doc.cta_text.as_deref())
        .unwrap_or(ctx.config.default_submit_label.as_str());

    Element::new("div").class("max-w-2xl mx-auto").child(
        Element::new("div")
            .class("bg-white rounded-2xl shadow-2xl p-8 md:p-12")
            .child(
                Element::new("h2")
                    .class("text-3xl font-bold mb-6 text-center text-gray-900")
                    .text(title),
            )
            .child(render_form(
                ctx,
                FormScope::Section(section.id.clone()),
                submit,
                None,
            )),
    )
}
