//! Style resolution: background treatments, spacing and inline CSS.
//!
//! Both resolvers are total. Every branch has a default, so any
//! `SectionStyle` or `PageDocument` resolves to a usable style. Color
//! strings are passed through untouched; an invalid color simply has no
//! visual effect once applied.

use serde::ser::{Serialize, Serializer};

use crate::document::{Background, BackgroundType, GradientDirection, Padding, PageDocument, Pattern, SectionStyle};

pub const DEFAULT_GRADIENT_FROM: &str = "#2563EB";
pub const DEFAULT_GRADIENT_TO: &str = "#7C3AED";
pub const DEFAULT_MESH_FROM: &str = "#FF0080";
pub const DEFAULT_MESH_VIA: &str = "#7928CA";
pub const DEFAULT_MESH_TO: &str = "#4158D0";
pub const DEFAULT_PATTERN_BASE: &str = "#FFFFFF";
pub const DEFAULT_SOLID_BACKGROUND: &str = "transparent";

/// An ordered list of CSS declarations.
///
/// Setting a property that is already present replaces its value in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConcreteStyle {
    decls: Vec<(&'static str, String)>,
}

impl ConcreteStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: &'static str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.decls.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = value,
            None => self.decls.push((property, value)),
        }
        self
    }

    pub fn with(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Set only when `value` is present
    pub fn with_opt(mut self, property: &'static str, value: Option<&str>) -> Self {
        if let Some(v) = value {
            self.set(property, v);
        }
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.decls
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn declarations(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.decls.iter().map(|(p, v)| (*p, v.as_str()))
    }

    /// Inline `style` attribute form: `color: red; position: relative`
    pub fn to_css(&self) -> String {
        self.declarations()
            .map(|(p, v)| format!("{}: {}", p, v))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Serialize for ConcreteStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.declarations())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Surface {
    Page,
    Section,
}

/// Resolve a section's background, text color and clipping.
pub fn resolve_background(style: &SectionStyle) -> ConcreteStyle {
    let mut s = ConcreteStyle::new()
        .with_opt("color", style.text_color.as_deref())
        .with("position", "relative")
        .with("overflow", "hidden");
    apply_background(&mut s, &style.background, Surface::Section);
    s
}

/// Resolve the page-wide background. The page always fills the viewport and
/// image backgrounds stay fixed while scrolling.
pub fn resolve_page_background(doc: &PageDocument) -> ConcreteStyle {
    let mut s = ConcreteStyle::new().with("min-height", "100vh");
    apply_background(&mut s, &doc.background, Surface::Page);
    s
}

fn apply_background(s: &mut ConcreteStyle, bg: &Background, surface: Surface) {
    match bg.kind {
        BackgroundType::Gradient => {
            let from = bg.gradient_from.as_deref().unwrap_or(DEFAULT_GRADIENT_FROM);
            let to = bg.gradient_to.as_deref().unwrap_or(DEFAULT_GRADIENT_TO);
            let direction = bg.gradient_direction.unwrap_or_default();
            let value = match (surface, direction.css_keyword()) {
                (Surface::Page, None) => {
                    format!("radial-gradient(circle at center, {}, {})", from, to)
                }
                // radial is page-only; sections keep the default direction
                (_, keyword) => format!(
                    "linear-gradient({}, {}, {})",
                    keyword.unwrap_or("to bottom right"),
                    from,
                    to
                ),
            };
            s.set("background", value);
        }
        BackgroundType::Mesh => {
            s.set("background", mesh_gradient(bg));
            s.set("background-color", "#000000");
        }
        BackgroundType::Pattern => {
            let pattern = bg.pattern.unwrap_or_default();
            let size = pattern_tile_size(pattern);
            s.set("background-color", bg.color.as_deref().unwrap_or(DEFAULT_PATTERN_BASE));
            s.set("background-image", pattern_tile(pattern));
            s.set("background-size", format!("{}px {}px", size, size));
        }
        BackgroundType::Image if bg.image.is_some() => {
            let url = bg.image.as_deref().unwrap_or_default();
            s.set("background-image", css_url(url));
            s.set("background-size", "cover");
            s.set("background-position", "center");
            s.set("background-repeat", "no-repeat");
            if surface == Surface::Page {
                s.set("background-attachment", "fixed");
            }
        }
        // the section renderer overlays a <video>; nothing to compute here
        BackgroundType::Video if surface == Surface::Section => {}
        _ => {
            s.set(
                "background-color",
                bg.color.as_deref().unwrap_or(DEFAULT_SOLID_BACKGROUND),
            );
        }
    }
}

fn mesh_gradient(bg: &Background) -> String {
    let from = bg.gradient_from.as_deref().unwrap_or(DEFAULT_MESH_FROM);
    let via = bg.gradient_via.as_deref().unwrap_or(DEFAULT_MESH_VIA);
    let to = bg.gradient_to.as_deref().unwrap_or(DEFAULT_MESH_TO);
    [("0% 0%", from), ("100% 0%", via), ("100% 100%", to), ("0% 100%", from)]
        .iter()
        .map(|(at, color)| format!("radial-gradient(at {}, {} 0px, transparent 50%)", at, color))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Repeating tile for a named pattern
pub fn pattern_tile(pattern: Pattern) -> &'static str {
    match pattern {
        Pattern::Dots => "radial-gradient(circle, rgba(0,0,0,0.1) 1px, transparent 1px)",
        Pattern::Grid => "linear-gradient(rgba(0,0,0,0.05) 1px, transparent 1px), linear-gradient(90deg, rgba(0,0,0,0.05) 1px, transparent 1px)",
        Pattern::Lines => "repeating-linear-gradient(45deg, transparent, transparent 10px, rgba(0,0,0,0.05) 10px, rgba(0,0,0,0.05) 20px)",
        Pattern::Circles => "radial-gradient(circle, transparent 20%, rgba(0,0,0,0.05) 20%, rgba(0,0,0,0.05) 40%, transparent 40%, transparent)",
        Pattern::Zigzag => "linear-gradient(135deg, rgba(0,0,0,0.05) 25%, transparent 25%), linear-gradient(225deg, rgba(0,0,0,0.05) 25%, transparent 25%)",
        Pattern::DiagonalLines => "repeating-linear-gradient(-45deg, transparent, transparent 10px, rgba(0,0,0,0.05) 10px, rgba(0,0,0,0.05) 20px)",
        Pattern::Hexagons => "radial-gradient(circle at 0% 50%, rgba(0,0,0,0.05) 30%, transparent 30%), radial-gradient(circle at 100% 50%, rgba(0,0,0,0.05) 30%, transparent 30%)",
    }
}

/// Tile edge length in px
pub fn pattern_tile_size(pattern: Pattern) -> u32 {
    match pattern {
        Pattern::Grid => 20,
        _ => 30,
    }
}

fn css_url(url: &str) -> String {
    format!("url(\"{}\")", url.replace('\\', "\\\\").replace('"', "\\\""))
}

impl Padding {
    /// Responsive vertical padding utility classes
    pub fn classes(self) -> &'static str {
        match self {
            Padding::Small => "py-8 md:py-12",
            Padding::Medium => "py-12 md:py-16",
            Padding::Large => "py-16 md:py-24",
            Padding::XLarge => "py-24 md:py-32",
        }
    }

    /// (mobile, desktop) vertical padding in px
    pub fn vertical_px(self) -> (u32, u32) {
        match self {
            Padding::Small => (32, 48),
            Padding::Medium => (48, 64),
            Padding::Large => (64, 96),
            Padding::XLarge => (96, 128),
        }
    }
}

/// Faint tint of a hex color for icon chips (`#RRGGBB` + `20` alpha).
/// Other color syntaxes are returned unchanged.
pub fn tint(color: &str) -> String {
    let hex = color.strip_prefix('#').unwrap_or("");
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        format!("{}20", color)
    } else {
        color.to_string()
    }
}
