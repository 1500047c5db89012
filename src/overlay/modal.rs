//! Modal dialog overlay.
//!
//! A centered dialog with a title, body content, and a row of footer
//! buttons. Activating a button invokes the caller's callback with the
//! button key; unless the callback returns `true` ("keep open") the modal
//! hides itself. While presented, the modal consumes all input so the
//! background UI cannot scroll or react underneath it.

use crate::overlay::anim::Animation;
use crate::overlay::node::{self, Anchor, Element, Panel, PanelWidth, Row, Surface};
use crate::overlay::{AfterLeave, HideOutcome, KeyCallback, Lifecycle, OverlayState, TickEvent};
use crate::overlay::toast::default_transition_ms;
use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::Frame;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One footer button
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModalButton {
    pub text: String,
    /// Key reported to the callback; defaults to the button's position
    #[serde(default)]
    pub key: Option<String>,
    /// Text color override
    #[serde(default)]
    pub color: Option<Color>,
}

impl ModalButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            key: None,
            color: None,
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// Footer button arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FooterLayout {
    /// All buttons on one line
    #[default]
    Inline,
    /// One button per line
    Block,
}

fn default_buttons() -> Vec<ModalButton> {
    vec![
        ModalButton::new("Cancel").key("cancel"),
        ModalButton::new("Confirm").key("confirm"),
    ]
}

fn default_width() -> u16 {
    44
}

/// Defaults every modal presentation merges its options over
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModalConfig {
    /// Panel width in columns
    #[serde(default = "default_width")]
    pub width: u16,
    #[serde(default = "default_buttons")]
    pub buttons: Vec<ModalButton>,
    #[serde(default)]
    pub footer_layout: FooterLayout,
    /// Backdrop click (and Esc) dismisses the modal
    #[serde(default = "crate::config::default_true")]
    pub mask_can_close: bool,
    #[serde(default = "default_animation")]
    pub animation: Animation,
    /// Dark panel background regardless of theme
    #[serde(default)]
    pub dark: bool,
    /// Enter/leave transition length in milliseconds
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
}

fn default_animation() -> Animation {
    Animation::Scale
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            buttons: default_buttons(),
            footer_layout: FooterLayout::Inline,
            mask_can_close: true,
            animation: Animation::Scale,
            dark: false,
            transition_ms: default_transition_ms(),
        }
    }
}

/// Per-show options; unset fields fall back to the controller's config
#[derive(Default)]
pub struct ModalOptions {
    pub title: Option<String>,
    pub content: Option<String>,
    pub buttons: Option<Vec<ModalButton>>,
    pub footer_layout: Option<FooterLayout>,
    pub width: Option<u16>,
    pub mask_can_close: Option<bool>,
    pub animation: Option<Animation>,
    pub dark: Option<bool>,
    /// Border color override
    pub accent: Option<Color>,
    /// Invoked with the activated button key; `true` keeps the modal open
    pub callback: Option<KeyCallback>,
    /// Fired once teardown completes
    pub on_after_leave: Option<AfterLeave>,
}

impl ModalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn buttons(mut self, buttons: Vec<ModalButton>) -> Self {
        self.buttons = Some(buttons);
        self
    }

    pub fn footer_layout(mut self, layout: FooterLayout) -> Self {
        self.footer_layout = Some(layout);
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn mask_can_close(mut self, can_close: bool) -> Self {
        self.mask_can_close = Some(can_close);
        self
    }

    pub fn animation(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn dark(mut self, dark: bool) -> Self {
        self.dark = Some(dark);
        self
    }

    pub fn accent(mut self, color: Color) -> Self {
        self.accent = Some(color);
        self
    }

    pub fn callback(mut self, callback: impl FnMut(&str) -> bool + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    pub fn on_after_leave(mut self, hook: impl FnOnce() + 'static) -> Self {
        self.on_after_leave = Some(Box::new(hook));
        self
    }
}

/// Resolved state of the current presentation
struct ModalView {
    title: Option<String>,
    content: Option<String>,
    buttons: Vec<ModalButton>,
    footer_layout: FooterLayout,
    width: u16,
    mask_can_close: bool,
    animation: Animation,
    dark: bool,
    accent: Option<Color>,
    selected: usize,
    callback: Option<KeyCallback>,
    on_after_leave: Option<AfterLeave>,
}

impl ModalView {
    /// Key of the button at `index`: explicit key or the position
    fn button_key(&self, index: usize) -> String {
        self.buttons[index]
            .key
            .clone()
            .unwrap_or_else(|| index.to_string())
    }
}

/// Modal dialog controller
#[derive(Default)]
pub struct Modal {
    config: ModalConfig,
    lifecycle: Lifecycle,
    current: Option<ModalView>,
    surface: Surface,
}

impl Modal {
    pub fn new(config: ModalConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replace the defaults future presentations merge over
    pub fn set_config(&mut self, config: ModalConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    pub fn state(&self) -> OverlayState {
        self.lifecycle.state()
    }

    /// Present a modal. A presentation already on screen is replaced:
    /// finished synchronously (hook fired) before the new options take
    /// effect.
    pub fn show(&mut self, options: ModalOptions) {
        let has_title = options.title.as_deref().is_some_and(|t| !t.is_empty());
        let has_content = options.content.as_deref().is_some_and(|c| !c.is_empty());
        if !has_title && !has_content {
            tracing::error!("modal requires a title or content; ignoring show");
            return;
        }

        if !self.lifecycle.is_idle() {
            self.finish();
        }

        let cfg = &self.config;
        let view = ModalView {
            title: options.title,
            content: options.content,
            buttons: options.buttons.unwrap_or_else(|| cfg.buttons.clone()),
            footer_layout: options.footer_layout.unwrap_or(cfg.footer_layout),
            width: options.width.unwrap_or(cfg.width),
            mask_can_close: options.mask_can_close.unwrap_or(cfg.mask_can_close),
            animation: options.animation.unwrap_or(cfg.animation),
            dark: options.dark.unwrap_or(cfg.dark),
            accent: options.accent,
            selected: 0,
            callback: options.callback,
            on_after_leave: options.on_after_leave,
        };
        let transition = Duration::from_millis(cfg.transition_ms);
        self.lifecycle.present(view.animation, transition, None);
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

    /// Advance a running transition
    pub fn tick(&mut self) {
        match self.lifecycle.tick() {
            TickEvent::Finished => self.finish(),
            TickEvent::AutoHide | TickEvent::None => {}
        }
    }

    fn finish(&mut self) {
        self.lifecycle.reset();
        self.surface = Surface::default();
        if let Some(view) = self.current.take() {
            if let Some(hook) = view.on_after_leave {
                hook();
            }
        }
    }

    /// Invoke the callback with the key; hide unless it returns `true`
    fn activate(&mut self, key: &str) {
        let keep_open = self
            .current
            .as_mut()
            .and_then(|view| view.callback.as_mut())
            .is_some_and(|cb| cb(key));
        if !keep_open {
            self.hide();
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.lifecycle.is_idle() {
            return;
        }
        let Some(view) = &self.current else { return };

        let mut panel = Panel::new(Anchor::Center, PanelWidth::Fixed(view.width));
        panel.dark = view.dark;
        panel.accent = view.accent;
        if let Some(title) = &view.title {
            panel = panel.child(Element::Title(title.clone()));
        }
        if let Some(content) = &view.content {
            panel = panel.child(Element::Body(content.clone()));
        }
        if !view.buttons.is_empty() {
            let rows = view
                .buttons
                .iter()
                .enumerate()
                .map(|(i, b)| Row {
                    key: view.button_key(i),
                    text: b.text.clone(),
                    color: b.color,
                })
                .collect();
            panel = panel.child(Element::Divider).child(Element::Buttons {
                rows,
                selected: Some(view.selected),
                inline: view.footer_layout == FooterLayout::Inline,
            });
        }

        self.surface = node::render(
            true,
            &panel,
            self.lifecycle.effect(),
            area,
            frame.buffer_mut(),
        );
    }

    /// Handle input. While presented the modal is blocking: every key and
    /// mouse event is consumed, including scroll, so the background UI
    /// stays inert underneath it.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if self.lifecycle.is_idle() {
            return false;
        }
        let interactive = self.lifecycle.state() == OverlayState::Active;
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if interactive {
                    self.handle_key(key.code);
                }
                true
            }
            Event::Key(_) => true,
            Event::Mouse(mouse) => {
                if interactive {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        self.handle_click(mouse.column, mouse.row);
                    }
                }
                true
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        enum KeyAction {
            Hide,
            Activate(String),
            Handled,
        }
        let action = {
            let Some(view) = self.current.as_mut() else { return };
            match code {
                KeyCode::Esc if view.mask_can_close => KeyAction::Hide,
                KeyCode::Left | KeyCode::BackTab | KeyCode::Up => {
                    let len = view.buttons.len();
                    if len > 0 {
                        view.selected = (view.selected + len - 1) % len;
                    }
                    KeyAction::Handled
                }
                KeyCode::Right | KeyCode::Tab | KeyCode::Down => {
                    let len = view.buttons.len();
                    if len > 0 {
                        view.selected = (view.selected + 1) % len;
                    }
                    KeyAction::Handled
                }
                KeyCode::Enter if !view.buttons.is_empty() => {
                    KeyAction::Activate(view.button_key(view.selected))
                }
                _ => KeyAction::Handled,
            }
        };
        match action {
            KeyAction::Hide => self.hide(),
            KeyAction::Activate(key) => self.activate(&key),
            KeyAction::Handled => {}
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        if let Some(key) = self.surface.hit(column, row).map(str::to_string) {
            self.activate(&key);
        } else if !self.surface.contains(column, row) {
            // Backdrop click
            let closable = self.current.as_ref().is_some_and(|v| v.mask_can_close);
            if closable {
                self.hide();
            }
        }
    }
}
