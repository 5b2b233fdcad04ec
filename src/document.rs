//! Typed page document model and boundary parsing.
//!
//! A `PageDocument` is built once from loosely-typed JSON. Every field is
//! optional: missing or wrong-typed values are treated as absent and resolved
//! to defaults further down (style, animation, render). Downstream modules
//! never look at raw JSON again.

use std::collections::HashSet;
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::action::ButtonAction;
use crate::{Error, Result};

pub const DEFAULT_FONT_FAMILY: &str = "Inter";
pub const DEFAULT_PRIMARY_COLOR: &str = "#2563EB";
pub const DEFAULT_ACCENT_COLOR: &str = "#7C3AED";
pub const DEFAULT_TEXT_COLOR: &str = "#111827";

/// Rendering strategy for a surface's background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundType {
    #[default]
    Solid,
    Gradient,
    Mesh,
    Pattern,
    Image,
    /// Section-only: a muted looping video behind the content
    Video,
}

impl BackgroundType {
    /// Unknown tags resolve to `Solid`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "gradient" => BackgroundType::Gradient,
            "mesh" => BackgroundType::Mesh,
            "pattern" => BackgroundType::Pattern,
            "image" => BackgroundType::Image,
            "video" => BackgroundType::Video,
            "solid" => BackgroundType::Solid,
            other => {
                debug!("unknown background type '{}', using solid", other);
                BackgroundType::Solid
            }
        }
    }
}

/// Linear gradient direction (eight compass points) or a centered radial gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientDirection {
    Top,
    TopRight,
    Right,
    #[default]
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
    Radial,
}

impl GradientDirection {
    /// Accepts `to-br`, `br` and `bottom-right` spellings. Unknown tokens
    /// resolve to the bottom-right default.
    pub fn from_tag(tag: &str) -> Self {
        let t = tag.trim().to_ascii_lowercase();
        let t = t.strip_prefix("to-").unwrap_or(&t);
        match t {
            "t" | "top" => GradientDirection::Top,
            "tr" | "top-right" => GradientDirection::TopRight,
            "r" | "right" => GradientDirection::Right,
            "br" | "bottom-right" => GradientDirection::BottomRight,
            "b" | "bottom" => GradientDirection::Bottom,
            "bl" | "bottom-left" => GradientDirection::BottomLeft,
            "l" | "left" => GradientDirection::Left,
            "tl" | "top-left" => GradientDirection::TopLeft,
            "radial" => GradientDirection::Radial,
            other => {
                debug!("unknown gradient direction '{}', using bottom-right", other);
                GradientDirection::BottomRight
            }
        }
    }

    /// CSS `linear-gradient` direction keyword. `Radial` has none.
    pub fn css_keyword(self) -> Option<&'static str> {
        Some(match self {
            GradientDirection::Top => "to top",
            GradientDirection::TopRight => "to top right",
            GradientDirection::Right => "to right",
            GradientDirection::BottomRight => "to bottom right",
            GradientDirection::Bottom => "to bottom",
            GradientDirection::BottomLeft => "to bottom left",
            GradientDirection::Left => "to left",
            GradientDirection::TopLeft => "to top left",
            GradientDirection::Radial => return None,
        })
    }
}

/// Named background texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pattern {
    #[default]
    Dots,
    Grid,
    Lines,
    Circles,
    Zigzag,
    DiagonalLines,
    Hexagons,
}

impl Pattern {
    pub const ALL: [Pattern; 7] = [
        Pattern::Dots,
        Pattern::Grid,
        Pattern::Lines,
        Pattern::Circles,
        Pattern::Zigzag,
        Pattern::DiagonalLines,
        Pattern::Hexagons,
    ];

    /// Unknown names resolve to `Dots`.
    pub fn from_tag(tag: &str) -> Self {
        Pattern::ALL
            .into_iter()
            .find(|p| p.tag() == tag)
            .unwrap_or_else(|| {
                debug!("unknown pattern '{}', using dots", tag);
                Pattern::Dots
            })
    }

    pub fn tag(self) -> &'static str {
        match self {
            Pattern::Dots => "dots",
            Pattern::Grid => "grid",
            Pattern::Lines => "lines",
            Pattern::Circles => "circles",
            Pattern::Zigzag => "zigzag",
            Pattern::DiagonalLines => "diagonal-lines",
            Pattern::Hexagons => "hexagons",
        }
    }
}

/// Vertical section spacing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Padding {
    Small,
    Medium,
    #[default]
    Large,
    XLarge,
}

impl Padding {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "small" => Padding::Small,
            "medium" => Padding::Medium,
            "large" => Padding::Large,
            "xlarge" => Padding::XLarge,
            _ => Padding::default(),
        }
    }
}

/// Entrance animation played when a section scrolls into view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollEffect {
    #[default]
    None,
    Fade,
    Slide,
    Zoom,
    Parallax,
}

impl ScrollEffect {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "fade" => ScrollEffect::Fade,
            "slide" => ScrollEffect::Slide,
            "zoom" => ScrollEffect::Zoom,
            "parallax" => ScrollEffect::Parallax,
            _ => ScrollEffect::None,
        }
    }
}

/// Background configuration shared by the page and by sections.
///
/// Only the fields consulted by `kind` matter; the rest are carried along
/// unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Background {
    pub kind: BackgroundType,
    pub color: Option<String>,
    pub gradient_from: Option<String>,
    pub gradient_via: Option<String>,
    pub gradient_to: Option<String>,
    pub gradient_direction: Option<GradientDirection>,
    pub pattern: Option<Pattern>,
    pub image: Option<String>,
    pub video: Option<String>,
}

/// Per-section styling
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionStyle {
    pub background: Background,
    pub text_color: Option<String>,
    pub padding: Padding,
    pub scroll_effect: ScrollEffect,
}

/// Kind of input control a form field renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Email,
    Tel,
    Number,
    Url,
    Password,
    Date,
    Textarea,
}

impl InputKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "email" => InputKind::Email,
            "tel" => InputKind::Tel,
            "number" => InputKind::Number,
            "url" => InputKind::Url,
            "password" => InputKind::Password,
            "date" => InputKind::Date,
            "textarea" => InputKind::Textarea,
            _ => InputKind::Text,
        }
    }

    /// Value of the HTML `type` attribute (`textarea` is its own element)
    pub fn tag(self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Email => "email",
            InputKind::Tel => "tel",
            InputKind::Number => "number",
            InputKind::Url => "url",
            InputKind::Password => "password",
            InputKind::Date => "date",
            InputKind::Textarea => "textarea",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub id: String,
    pub label: String,
    pub kind: InputKind,
    pub placeholder: Option<String>,
    pub required: bool,
}

/// HTML supplied by the document author and emitted verbatim.
///
/// This is a trust boundary: nothing here is sanitized or escaped. The loader
/// that produced the document is responsible for guaranteeing the markup is
/// safe to inject.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    pub fn new(html: impl Into<String>) -> Self {
        TrustedHtml(html.into())
    }

    pub fn as_trusted_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeroContent {
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    pub description: Option<String>,
    pub cta_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureItem {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeaturesContent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub items: Vec<FeatureItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Testimonial {
    pub quote: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    /// Star count, 1..=5
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TestimonialsContent {
    pub title: Option<String>,
    pub items: Vec<Testimonial>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextContent {
    pub title: Option<String>,
    pub body: TrustedHtml,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageContent {
    pub image: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VideoContent {
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatItem {
    pub value: Option<String>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatsContent {
    pub items: Vec<StatItem>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CtaContent {
    pub headline: Option<String>,
    pub description: Option<String>,
    pub cta_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormContent {
    pub title: Option<String>,
    pub submit_text: Option<String>,
}

/// Type-specific section payload.
///
/// `Unsupported` keeps sections whose `type` tag is not recognized so the
/// composer can render them as empty containers in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Hero(HeroContent),
    Features(FeaturesContent),
    Testimonials(TestimonialsContent),
    Text(TextContent),
    Image(ImageContent),
    Video(VideoContent),
    Stats(StatsContent),
    Cta(CtaContent),
    Form(FormContent),
    Unsupported { kind: String },
}

impl SectionBody {
    /// The document's `type` tag for this section
    pub fn kind_tag(&self) -> &str {
        match self {
            SectionBody::Hero(_) => "hero",
            SectionBody::Features(_) => "features",
            SectionBody::Testimonials(_) => "testimonials",
            SectionBody::Text(_) => "text",
            SectionBody::Image(_) => "image",
            SectionBody::Video(_) => "video",
            SectionBody::Stats(_) => "stats",
            SectionBody::Cta(_) => "cta",
            SectionBody::Form(_) => "form",
            SectionBody::Unsupported { kind } => kind.as_str(),
        }
    }

    fn parse(kind: &str, content: &Value) -> Self {
        match kind {
            "hero" => SectionBody::Hero(HeroContent {
                headline: text_at(content, "headline"),
                subheadline: text_at(content, "subheadline"),
                description: text_at(content, "description"),
                cta_text: text_at(content, "ctaText"),
            }),
            "features" => SectionBody::Features(FeaturesContent {
                title: text_at(content, "title"),
                description: text_at(content, "description"),
                items: items_at(content)
                    .map(|item| FeatureItem {
                        title: text_at(item, "title"),
                        description: text_at(item, "description"),
                    })
                    .collect(),
            }),
            "testimonials" => SectionBody::Testimonials(TestimonialsContent {
                title: text_at(content, "title"),
                items: items_at(content)
                    .map(|item| Testimonial {
                        quote: text_at(item, "quote"),
                        name: text_at(item, "name"),
                        role: text_at(item, "role"),
                        rating: rating_at(item),
                    })
                    .collect(),
            }),
            "text" => SectionBody::Text(TextContent {
                title: text_at(content, "title"),
                body: TrustedHtml::new(text_at(content, "body").unwrap_or_default()),
            }),
            "image" => SectionBody::Image(ImageContent {
                image: text_at(content, "image"),
                caption: text_at(content, "caption"),
            }),
            "video" => SectionBody::Video(VideoContent {
                url: text_at(content, "url"),
            }),
            "stats" => SectionBody::Stats(StatsContent {
                items: items_at(content)
                    .map(|item| StatItem {
                        value: text_at(item, "value"),
                        label: text_at(item, "label"),
                    })
                    .collect(),
            }),
            "cta" => SectionBody::Cta(CtaContent {
                headline: text_at(content, "headline"),
                description: text_at(content, "description"),
                cta_text: text_at(content, "ctaText"),
            }),
            "form" => SectionBody::Form(FormContent {
                title: text_at(content, "title"),
                submit_text: text_at(content, "submitText"),
            }),
            other => {
                debug!("unsupported section type '{}'", other);
                SectionBody::Unsupported {
                    kind: other.to_string(),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Stable render key
    pub id: String,
    pub styles: SectionStyle,
    pub body: SectionBody,
    pub button_action: Option<ButtonAction>,
}

/// Root page description
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageDocument {
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    pub description: Option<String>,
    pub cta_text: Option<String>,
    pub logo: Option<String>,
    pub primary_color: Option<String>,
    pub accent_color: Option<String>,
    pub text_color: Option<String>,
    pub font_family: Option<String>,
    /// Page-wide background; `Video` is never produced here
    pub background: Background,
    pub form_fields: Vec<FormField>,
    pub sections: Vec<Section>,
}

impl PageDocument {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Validate and convert a raw JSON document. Fails only when the root is
    /// not an object.
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::DocumentError(
                "page document root must be a JSON object".to_string(),
            ));
        }

        let mut background = Background {
            kind: str_at(value, "pageBackgroundType")
                .map(|t| BackgroundType::from_tag(&t))
                .unwrap_or_default(),
            color: str_at(value, "backgroundColor"),
            gradient_from: str_at(value, "pageGradientFrom"),
            gradient_via: str_at(value, "pageGradientVia"),
            gradient_to: str_at(value, "pageGradientTo"),
            gradient_direction: str_at(value, "pageGradientDirection")
                .map(|d| GradientDirection::from_tag(&d)),
            pattern: str_at(value, "pageBackgroundPattern").map(|p| Pattern::from_tag(&p)),
            image: str_at(value, "pageBackgroundImage"),
            video: None,
        };
        if background.kind == BackgroundType::Video {
            debug!("video backgrounds are section-only; page falls back to solid");
            background.kind = BackgroundType::Solid;
        }

        let form_fields = array_at(value, "formFields")
            .enumerate()
            .filter_map(|(idx, f)| {
                let field = parse_form_field(f);
                if field.is_none() {
                    debug!("skipping form field #{} without an id", idx);
                }
                field
            })
            .collect();

        let author_ids: HashSet<String> = array_at(value, "sections")
            .filter_map(|s| str_at(s, "id"))
            .collect();
        let sections = array_at(value, "sections")
            .enumerate()
            .map(|(idx, s)| parse_section(idx, s, &author_ids))
            .collect();

        Ok(PageDocument {
            headline: text_at(value, "headline"),
            subheadline: text_at(value, "subheadline"),
            description: text_at(value, "description"),
            cta_text: text_at(value, "ctaText"),
            logo: str_at(value, "logo"),
            primary_color: str_at(value, "primaryColor"),
            accent_color: str_at(value, "accentColor"),
            text_color: str_at(value, "textColor"),
            font_family: str_at(value, "fontFamily"),
            background,
            form_fields,
            sections,
        })
    }

    pub fn primary_color(&self) -> &str {
        self.primary_color.as_deref().unwrap_or(DEFAULT_PRIMARY_COLOR)
    }

    pub fn accent_color(&self) -> &str {
        self.accent_color.as_deref().unwrap_or(DEFAULT_ACCENT_COLOR)
    }

    pub fn text_color(&self) -> &str {
        self.text_color.as_deref().unwrap_or(DEFAULT_TEXT_COLOR)
    }

    /// Configured font, else `fallback`
    pub fn font_family<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.font_family.as_deref().unwrap_or(fallback)
    }
}

fn parse_form_field(value: &Value) -> Option<FormField> {
    let id = str_at(value, "id")?;
    Some(FormField {
        label: text_at(value, "label").unwrap_or_else(|| id.clone()),
        kind: str_at(value, "type")
            .map(|t| InputKind::from_tag(&t))
            .unwrap_or_default(),
        placeholder: text_at(value, "placeholder"),
        required: value.get("required").and_then(Value::as_bool).unwrap_or(false),
        id,
    })
}

fn parse_section(index: usize, value: &Value, author_ids: &HashSet<String>) -> Section {
    let id = str_at(value, "id").unwrap_or_else(|| synthesized_id(index, author_ids));
    let kind = str_at(value, "type").unwrap_or_default();
    let styles = value
        .get("styles")
        .map(parse_section_style)
        .unwrap_or_default();
    let content = value.get("content").unwrap_or(&Value::Null);

    Section {
        body: SectionBody::parse(&kind, content),
        button_action: value.get("buttonAction").and_then(ButtonAction::from_value),
        id,
        styles,
    }
}

/// `section-{index}`, suffixed until it no longer clashes with an id the
/// author wrote
fn synthesized_id(index: usize, author_ids: &HashSet<String>) -> String {
    let base = format!("section-{}", index);
    let mut id = base.clone();
    let mut n = 1;
    while author_ids.contains(&id) {
        id = format!("{}-{}", base, n);
        n += 1;
    }
    id
}

fn parse_section_style(value: &Value) -> SectionStyle {
    SectionStyle {
        background: Background {
            kind: str_at(value, "backgroundType")
                .map(|t| BackgroundType::from_tag(&t))
                .unwrap_or_default(),
            color: str_at(value, "backgroundColor"),
            gradient_from: str_at(value, "gradientFrom"),
            gradient_via: str_at(value, "gradientVia"),
            gradient_to: str_at(value, "gradientTo"),
            gradient_direction: str_at(value, "gradientDirection")
                .map(|d| GradientDirection::from_tag(&d)),
            pattern: str_at(value, "backgroundPattern").map(|p| Pattern::from_tag(&p)),
            image: str_at(value, "backgroundImage"),
            video: str_at(value, "backgroundVideo"),
        },
        text_color: str_at(value, "textColor"),
        padding: str_at(value, "padding")
            .map(|p| Padding::from_tag(&p))
            .unwrap_or_default(),
        scroll_effect: str_at(value, "scrollEffect")
            .map(|e| ScrollEffect::from_tag(&e))
            .unwrap_or_default(),
    }
}

/// Non-empty string field. Empty strings count as absent so they pick up
/// defaults.
pub(crate) fn str_at(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Like `str_at` but also accepts numbers (stat values such as `10000`).
fn text_at(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::Number(n) => Some(n.to_string()),
        _ => str_at(value, key),
    }
}

fn array_at<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|a| a.as_slice())
        .unwrap_or(&[])
        .iter()
}

fn items_at(content: &Value) -> impl Iterator<Item = &Value> {
    array_at(content, "items")
}

/// Star count in 1..=5. Missing, zero or non-numeric ratings mean 5.
fn rating_at(item: &Value) -> u8 {
    match item.get("rating").and_then(Value::as_f64).map(f64::round) {
        Some(r) if r.is_finite() && r != 0.0 => r.clamp(1.0, 5.0) as u8,
        _ => 5,
    }
}
