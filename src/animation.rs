//! Declarative entrance animations.
//!
//! Nothing here observes the viewport or drives frames. The resolvers only
//! describe where an element starts, where it ends and when to play; the host
//! UI layer performs the transition.

use serde::Serialize;

use crate::document::ScrollEffect;

/// Duration of every entrance transition, in seconds
pub const ENTRANCE_DURATION_SECS: f32 = 0.6;
/// Scroll effects fire once the element is within this many px of the viewport
pub const SCROLL_TRIGGER_MARGIN_PX: u32 = 100;

/// Animatable properties. Unset fields are not animated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Keyframe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    /// Vertical offset in px
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
}

impl Keyframe {
    fn opacity(opacity: f32) -> Self {
        Keyframe {
            opacity: Some(opacity),
            ..Default::default()
        }
    }

    fn y(mut self, y: f32) -> Self {
        self.y = Some(y);
        self
    }

    fn scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }
}

/// When an animation starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "on", rename_all = "kebab-case")]
pub enum Trigger {
    /// As soon as the element is first rendered
    Mount,
    /// The first time the element comes within `margin_px` of the viewport.
    /// With `once` set it never replays on later scrolls.
    InView { once: bool, margin_px: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    EaseOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transition {
    pub duration_secs: f32,
    pub delay_secs: f32,
    pub ease: Easing,
}

impl Transition {
    fn delayed(delay_secs: f32) -> Self {
        Transition {
            duration_secs: ENTRANCE_DURATION_SECS,
            delay_secs,
            ease: Easing::EaseOut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnimationSpec {
    pub initial: Keyframe,
    pub target: Keyframe,
    pub trigger: Trigger,
    pub transition: Transition,
}

/// Map a section's scroll effect to its entrance. `None` means no animation
/// and no viewport observer.
pub fn resolve_scroll_animation(effect: ScrollEffect) -> Option<AnimationSpec> {
    let (initial, target) = match effect {
        ScrollEffect::None => return None,
        ScrollEffect::Fade => (Keyframe::opacity(0.0), Keyframe::opacity(1.0)),
        ScrollEffect::Slide => (Keyframe::opacity(0.0).y(50.0), Keyframe::opacity(1.0).y(0.0)),
        ScrollEffect::Zoom => (
            Keyframe::opacity(0.0).scale(0.9),
            Keyframe::opacity(1.0).scale(1.0),
        ),
        ScrollEffect::Parallax => (
            Keyframe::opacity(0.0).y(100.0),
            Keyframe::opacity(1.0).y(0.0),
        ),
    };
    Some(AnimationSpec {
        initial,
        target,
        trigger: Trigger::InView {
            once: true,
            margin_px: SCROLL_TRIGGER_MARGIN_PX,
        },
        transition: Transition::delayed(0.0),
    })
}

/// Card grids whose items enter one after another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stagger {
    Features,
    Testimonials,
    Stats,
}

/// Entrance for the `index`th item of a grid, delayed by a tenth of a second
/// per position.
pub fn staggered_entrance(kind: Stagger, index: usize) -> AnimationSpec {
    let (initial, target) = match kind {
        Stagger::Features => (Keyframe::opacity(0.0).y(30.0), Keyframe::opacity(1.0).y(0.0)),
        Stagger::Testimonials => (
            Keyframe::opacity(0.0).scale(0.95),
            Keyframe::opacity(1.0).scale(1.0),
        ),
        Stagger::Stats => (
            Keyframe::opacity(0.0).scale(0.8),
            Keyframe::opacity(1.0).scale(1.0),
        ),
    };
    AnimationSpec {
        initial,
        target,
        trigger: Trigger::InView {
            once: true,
            margin_px: 0,
        },
        transition: Transition::delayed(index as f32 / 10.0),
    }
}

/// Hero elements that animate in on first render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountItem {
    Logo,
    Headline,
    Subheadline,
    Description,
    Button,
}

pub fn mount_entrance(item: MountItem) -> AnimationSpec {
    let (initial, target) = match item {
        MountItem::Logo => (
            Keyframe::opacity(0.0).scale(0.8),
            Keyframe::opacity(1.0).scale(1.0),
        ),
        _ => (Keyframe::opacity(0.0).y(20.0), Keyframe::opacity(1.0).y(0.0)),
    };
    let delay = match item {
        MountItem::Logo => 0.2,
        MountItem::Headline => 0.3,
        MountItem::Subheadline => 0.4,
        MountItem::Description => 0.5,
        MountItem::Button => 0.6,
    };
    AnimationSpec {
        initial,
        target,
        trigger: Trigger::Mount,
        transition: Transition::delayed(delay),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_yields_no_animation() {
        assert!(resolve_scroll_animation(ScrollEffect::None).is_none());
        assert!(resolve_scroll_animation(ScrollEffect::from_tag("wobble")).is_none());
    }

    #[test]
    fn named_effects_have_documented_endpoints() {
        let cases = [
            (ScrollEffect::Fade, None, None),
            (ScrollEffect::Slide, Some((50.0, 0.0)), None),
            (ScrollEffect::Zoom, None, Some((0.9, 1.0))),
            (ScrollEffect::Parallax, Some((100.0, 0.0)), None),
        ];
        for (effect, y, scale) in cases {
            let spec = resolve_scroll_animation(effect).unwrap();
            assert_eq!(spec.initial.opacity, Some(0.0));
            assert_eq!(spec.target.opacity, Some(1.0));
            assert_eq!(spec.initial.y.zip(spec.target.y), y, "{:?}", effect);
            assert_eq!(spec.initial.scale.zip(spec.target.scale), scale, "{:?}", effect);
            assert_eq!(
                spec.trigger,
                Trigger::InView {
                    once: true,
                    margin_px: 100
                }
            );
            assert_eq!(spec.transition.duration_secs, 0.6);
            assert_eq!(spec.transition.ease, Easing::EaseOut);
        }
    }

    #[test]
    fn stagger_delay_grows_by_a_tenth() {
        let third = staggered_entrance(Stagger::Stats, 3);
        assert!((third.transition.delay_secs - 0.3).abs() < 1e-6);
        assert_eq!(third.initial.scale, Some(0.8));
        assert_eq!(staggered_entrance(Stagger::Features, 0).transition.delay_secs, 0.0);
    }

    #[test]
    fn hero_items_play_on_mount_in_sequence() {
        let logo = mount_entrance(MountItem::Logo);
        let button = mount_entrance(MountItem::Button);
        assert_eq!(logo.trigger, Trigger::Mount);
        assert!(logo.transition.delay_secs < button.transition.delay_secs);
        assert_eq!(button.initial.y, Some(20.0));
    }

    #[test]
    fn serializes_compactly() {
        let spec = resolve_scroll_animation(ScrollEffect::Fade).unwrap();
        let json = serde_json::to_value(spec).unwrap();
        assert_eq!(json["initial"], serde_json::json!({ "opacity": 0.0 }));
        assert_eq!(json["trigger"]["on"], "in-view");
        assert_eq!(json["transition"]["ease"], "easeOut");
    }
}
