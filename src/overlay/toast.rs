//! Toast notification overlay.
//!
//! A transient notification with an icon and/or title, an optional
//! dimming backdrop, and an optional auto-hide timer. The backdrop blocks
//! mouse interaction but never dismisses the toast.

use crate::overlay::anim::Animation;
use crate::overlay::node::{self, Anchor, Element, Panel, PanelWidth, Surface};
use crate::overlay::{AfterLeave, HideOutcome, Lifecycle, OverlayState, TickEvent};
use crate::styles::theme;
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::Frame;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Built-in toast icons.
///
/// The icon-to-glyph mapping is a fixed table; a custom glyph is supplied
/// separately through [`ToastOptions::icon_glyph`] and never mutates the
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastIcon {
    Success,
    Error,
    Warning,
    Loading,
    #[default]
    None,
}

impl ToastIcon {
    /// Glyph for this icon, if it has one
    pub fn glyph(self) -> Option<&'static str> {
        match self {
            ToastIcon::Success => Some("\u{2714}"), // ✔
            ToastIcon::Error => Some("\u{2718}"),   // ✘
            ToastIcon::Warning => Some("\u{26A0}"), // ⚠
            ToastIcon::Loading => Some("\u{27F3}"), // ⟳
            ToastIcon::None => None,
        }
    }

    fn color(self) -> Color {
        let t = theme();
        match self {
            ToastIcon::Success => t.success,
            ToastIcon::Error => t.error,
            ToastIcon::Warning => t.warning,
            ToastIcon::Loading | ToastIcon::None => t.primary,
        }
    }
}

/// Where the toast is anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPlace {
    Top,
    #[default]
    Center,
    Bottom,
}

impl ToastPlace {
    fn anchor(self) -> Anchor {
        match self {
            ToastPlace::Top => Anchor::Top,
            ToastPlace::Center => Anchor::Center,
            ToastPlace::Bottom => Anchor::Bottom,
        }
    }
}

/// Icon/title arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastLayout {
    /// Icon above the title
    #[default]
    Block,
    /// Icon and title on one line
    Inline,
}

/// Defaults every toast presentation merges its options over
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToastConfig {
    /// Default icon
    #[serde(default)]
    pub icon: ToastIcon,
    /// Dim the background behind the toast
    #[serde(default)]
    pub mask: bool,
    /// Auto-hide delay in milliseconds; 0 disables auto-hide
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    /// Maximum panel width in columns
    #[serde(default = "default_max_width")]
    pub max_width: u16,
    #[serde(default)]
    pub place: ToastPlace,
    #[serde(default)]
    pub layout: ToastLayout,
    /// Animation used when the placement does not dictate one
    #[serde(default)]
    pub animation: Animation,
    /// Wrap the title instead of truncating to one line
    #[serde(default)]
    pub multi_line: bool,
    /// Enter/leave transition length in milliseconds
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
}

fn default_duration_ms() -> u64 {
    2000
}

fn default_max_width() -> u16 {
    48
}

pub(crate) fn default_transition_ms() -> u64 {
    160
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            icon: ToastIcon::None,
            mask: false,
            duration_ms: default_duration_ms(),
            max_width: default_max_width(),
            place: ToastPlace::Center,
            layout: ToastLayout::Block,
            animation: Animation::Fade,
            multi_line: false,
            transition_ms: default_transition_ms(),
        }
    }
}

/// Per-show options; unset fields fall back to the controller's config
#[derive(Default)]
pub struct ToastOptions {
    pub title: Option<String>,
    pub icon: Option<ToastIcon>,
    /// Custom glyph overriding the built-in icon table
    pub icon_glyph: Option<String>,
    pub mask: Option<bool>,
    /// Auto-hide delay; `Duration::ZERO` disables auto-hide
    pub duration: Option<Duration>,
    pub place: Option<ToastPlace>,
    pub layout: Option<ToastLayout>,
    pub animation: Option<Animation>,
    pub multi_line: Option<bool>,
    /// Inset from the anchored edge (top/bottom placements)
    pub offset: Option<u16>,
    /// Extra one-cell inset at the anchored edge
    pub safe_area: bool,
    /// Border color override
    pub accent: Option<Color>,
    /// Fired once teardown completes
    pub on_after_leave: Option<AfterLeave>,
}

impl ToastOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn icon(mut self, icon: ToastIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn icon_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.icon_glyph = Some(glyph.into());
        self
    }

    pub fn mask(mut self, mask: bool) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn place(mut self, place: ToastPlace) -> Self {
        self.place = Some(place);
        self
    }

    pub fn layout(mut self, layout: ToastLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn animation(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn multi_line(mut self, multi_line: bool) -> Self {
        self.multi_line = Some(multi_line);
        self
    }

    pub fn offset(mut self, offset: u16) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn safe_area(mut self, safe_area: bool) -> Self {
        self.safe_area = safe_area;
        self
    }

    pub fn accent(mut self, color: Color) -> Self {
        self.accent = Some(color);
        self
    }

    pub fn on_after_leave(mut self, hook: impl FnOnce() + 'static) -> Self {
        self.on_after_leave = Some(Box::new(hook));
        self
    }

    /// Turn these options into a loading preset: loading icon, no auto-hide
    pub fn loading(mut self) -> Self {
        self.icon = Some(ToastIcon::Loading);
        self
    }
}

/// Resolved state of the current presentation
struct ToastView {
    title: Option<String>,
    glyph: Option<String>,
    icon_color: Color,
    mask: bool,
    place: ToastPlace,
    layout: ToastLayout,
    multi_line: bool,
    animation: Animation,
    offset: u16,
    safe_area: bool,
    accent: Option<Color>,
    max_width: u16,
    on_after_leave: Option<AfterLeave>,
}

/// Toast overlay controller
#[derive(Default)]
pub struct Toast {
    config: ToastConfig,
    lifecycle: Lifecycle,
    current: Option<ToastView>,
    surface: Surface,
}

impl Toast {
    pub fn new(config: ToastConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replace the defaults future presentations merge over
    pub fn set_config(&mut self, config: ToastConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &ToastConfig {
        &self.config
    }

    pub fn state(&self) -> OverlayState {
        self.lifecycle.state()
    }

    /// Present a toast. A presentation already on screen is replaced:
    /// finished synchronously (timer cancelled, hook fired) before the new
    /// options take effect.
    pub fn show(&mut self, mut options: ToastOptions) {
        let cfg = &self.config;
        let place = options.place.unwrap_or(cfg.place);
        let icon = options.icon.unwrap_or(cfg.icon);

        let mut duration = options
            .duration
            .unwrap_or(Duration::from_millis(cfg.duration_ms));
        if icon == ToastIcon::Loading {
            // Loading toasts stay up until hidden manually.
            duration = Duration::ZERO;
            if options.title.is_none() {
                options.title = Some("Loading…".to_string());
            }
        }

        let glyph = options
            .icon_glyph
            .take()
            .or_else(|| icon.glyph().map(str::to_string));

        let has_title = options.title.as_deref().is_some_and(|t| !t.is_empty());
        if glyph.is_none() && !has_title {
            tracing::error!("toast requires a title or an icon; ignoring show");
            return;
        }

        let animation = options.animation.unwrap_or(match place {
            ToastPlace::Top => Animation::SlideDown,
            ToastPlace::Bottom => Animation::SlideUp,
            ToastPlace::Center => cfg.animation,
        });
        let offset = options.offset.unwrap_or(match place {
            ToastPlace::Center => 0,
            // Default inset so edge-anchored toasts clear the host chrome
            ToastPlace::Top | ToastPlace::Bottom => 1,
        });

        if !self.lifecycle.is_idle() {
            self.finish();
        }

        let view = ToastView {
            title: options.title,
            glyph,
            icon_color: icon.color(),
            mask: options.mask.unwrap_or(self.config.mask),
            place,
            layout: options.layout.unwrap_or(self.config.layout),
            multi_line: options.multi_line.unwrap_or(self.config.multi_line),
            animation,
            offset,
            safe_area: options.safe_area,
            accent: options.accent,
            max_width: self.config.max_width,
            on_after_leave: options.on_after_leave,
        };
        let transition = Duration::from_millis(self.config.transition_ms);
        let auto_hide = (!duration.is_zero()).then_some(duration);
        self.lifecycle.present(view.animation, transition, auto_hide);
        self.current = Some(view);
    }

    /// Begin hiding. No-op when idle or already hiding.
    pub fn hide(&mut self) {
        let Some(view) = &self.current else { return };
        let transition = Duration::from_millis(self.config.transition_ms);
        if self.lifecycle.request_hide(view.animation, transition) == HideOutcome::Immediate {
            self.finish();
        }
    }

    /// Advance the auto-hide timer and any running transition
    pub fn tick(&mut self) {
        match self.lifecycle.tick() {
            TickEvent::AutoHide => self.hide(),
            TickEvent::Finished => self.finish(),
            TickEvent::None => {}
        }
    }

    /// Tear down and fire the completion hook
    fn finish(&mut self) {
        self.lifecycle.reset();
        self.surface = Surface::default();
        if let Some(view) = self.current.take() {
            if let Some(hook) = view.on_after_leave {
                hook();
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.lifecycle.is_idle() {
            return;
        }
        let Some(view) = &self.current else { return };

        let mut panel = Panel::new(
            view.place.anchor(),
            PanelWidth::Auto {
                min: 12,
                max: view.max_width,
            },
        );
        panel.offset = view.offset;
        panel.safe_area = view.safe_area;
        panel.accent = view.accent;
        panel = panel.child(Element::Banner {
            icon: view.glyph.clone(),
            icon_color: Some(view.icon_color),
            title: view.title.clone(),
            inline: view.layout == ToastLayout::Inline,
            multi_line: view.multi_line,
        });

        self.surface = node::render(
            view.mask,
            &panel,
            self.lifecycle.effect(),
            area,
            frame.buffer_mut(),
        );
    }

    /// A masked toast swallows mouse input; it never dismisses on click
    /// and never consumes key presses.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if self.lifecycle.is_idle() {
            return false;
        }
        match event {
            Event::Mouse(_) => self.current.as_ref().is_some_and(|v| v.mask),
            _ => false,
        }
    }
}
