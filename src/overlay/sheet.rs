//! Action sheet overlay.
//!
//! A bottom-anchored list of selectable rows plus a visually separated
//! cancel row. Activating a row invokes the caller's callback with the row
//! key; unless the callback returns `true` the sheet hides itself.

use crate::overlay::anim::Animation;
use crate::overlay::node::{self, Anchor, Element, Panel, PanelWidth, Row, Surface};
use crate::overlay::toast::default_transition_ms;
use crate::overlay::{AfterLeave, HideOutcome, KeyCallback, Lifecycle, OverlayState, TickEvent};
use crate::styles::theme;
use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::Frame;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One selectable row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetItem {
    pub text: String,
    /// Key reported to the callback; defaults to the row's position
    #[serde(default)]
    pub key: Option<String>,
    /// Text color override (e.g. red for a destructive action)
    #[serde(default)]
    pub color: Option<Color>,
}

impl SheetItem {
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

impl From<&str> for SheetItem {
    fn from(text: &str) -> Self {
        SheetItem::new(text)
    }
}

impl From<String> for SheetItem {
    fn from(text: String) -> Self {
        SheetItem::new(text)
    }
}

/// The cancel row at the bottom of the sheet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CancelItem {
    /// A "Cancel" row keyed `cancel`
    #[default]
    Default,
    /// A caller-supplied row; its key defaults to `cancel`
    Custom(SheetItem),
    /// No cancel row
    Hidden,
}

impl CancelItem {
    fn resolve(&self) -> Option<SheetItem> {
        match self {
            CancelItem::Default => Some(SheetItem::new("Cancel").key("cancel")),
            CancelItem::Custom(item) => {
                let mut item = item.clone();
                if item.key.is_none() {
                    item.key = Some("cancel".to_string());
                }
                Some(item)
            }
            CancelItem::Hidden => None,
        }
    }
}

/// Defaults every sheet presentation merges its options over
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    #[serde(default)]
    pub cancel: CancelItem,
    #[serde(default = "default_animation")]
    pub animation: Animation,
    /// Backdrop click (and Esc) dismisses the sheet
    #[serde(default = "crate::config::default_true")]
    pub mask_can_close: bool,
    /// Dark panel background regardless of theme
    #[serde(default)]
    pub dark: bool,
    /// Extra one-cell inset at the bottom edge
    #[serde(default = "crate::config::default_true")]
    pub safe_area: bool,
    /// Sheet width as a percentage of the area
    #[serde(default = "default_width_percent")]
    pub width_percent: u16,
    /// Enter/leave transition length in milliseconds
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
}

fn default_animation() -> Animation {
    Animation::SlideUp
}

fn default_width_percent() -> u16 {
    60
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            cancel: CancelItem::Default,
            animation: Animation::SlideUp,
            mask_can_close: true,
            dark: false,
            safe_area: true,
            width_percent: default_width_percent(),
            transition_ms: default_transition_ms(),
        }
    }
}

/// Per-show options; unset fields fall back to the controller's config
#[derive(Default)]
pub struct SheetOptions {
    pub title: Option<String>,
    pub items: Vec<SheetItem>,
    pub cancel: Option<CancelItem>,
    pub animation: Option<Animation>,
    pub mask_can_close: Option<bool>,
    pub dark: Option<bool>,
    pub safe_area: Option<bool>,
    /// Border color override
    pub accent: Option<Color>,
    /// Invoked with the activated row key; `true` keeps the sheet open
    pub callback: Option<KeyCallback>,
    /// Fired once teardown completes
    pub on_after_leave: Option<AfterLeave>,
}

impl SheetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn items<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SheetItem>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn item(mut self, item: impl Into<SheetItem>) -> Self {
        self.items.push(item.into());
        self
    }

    pub fn cancel(mut self, cancel: CancelItem) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn animation(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn mask_can_close(mut self, can_close: bool) -> Self {
        self.mask_can_close = Some(can_close);
        self
    }

    pub fn dark(mut self, dark: bool) -> Self {
        self.dark = Some(dark);
        self
    }

    pub fn safe_area(mut self, safe_area: bool) -> Self {
        self.safe_area = Some(safe_area);
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
struct SheetView {
    title: Option<String>,
    items: Vec<SheetItem>,
    cancel: Option<SheetItem>,
    animation: Animation,
    mask_can_close: bool,
    dark: bool,
    safe_area: bool,
    accent: Option<Color>,
    selected: usize,
    callback: Option<KeyCallback>,
    on_after_leave: Option<AfterLeave>,
}

impl SheetView {
    /// Total selectable rows: items plus the cancel row when present
    fn row_count(&self) -> usize {
        self.items.len() + usize::from(self.cancel.is_some())
    }

    /// Key of the row at `index` (items first, then the cancel row)
    fn row_key(&self, index: usize) -> String {
        if index < self.items.len() {
            self.items[index]
                .key
                .clone()
                .unwrap_or_else(|| index.to_string())
        } else {
            self.cancel
                .as_ref()
                .and_then(|c| c.key.clone())
                .unwrap_or_else(|| "cancel".to_string())
        }
    }
}

/// Action sheet controller
#[derive(Default)]
pub struct ActionSheet {
    config: SheetConfig,
    lifecycle: Lifecycle,
    current: Option<SheetView>,
    surface: Surface,
}

impl ActionSheet {
    pub fn new(config: SheetConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replace the defaults future presentations merge over
    pub fn set_config(&mut self, config: SheetConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn state(&self) -> OverlayState {
        self.lifecycle.state()
    }

    /// Present an action sheet. A presentation already on screen is
    /// replaced: finished synchronously (hook fired) before the new options
    /// take effect.
    pub fn show(&mut self, options: SheetOptions) {
        if options.items.is_empty() {
            tracing::error!("action sheet requires at least one item; ignoring show");
            return;
        }

        if !self.lifecycle.is_idle() {
            self.finish();
        }

        let cfg = &self.config;
        let cancel = options
            .cancel
            .unwrap_or_else(|| cfg.cancel.clone())
            .resolve();
        let view = SheetView {
            title: options.title,
            items: options.items,
            cancel,
            animation: options.animation.unwrap_or(cfg.animation),
            mask_can_close: options.mask_can_close.unwrap_or(cfg.mask_can_close),
            dark: options.dark.unwrap_or(cfg.dark),
            safe_area: options.safe_area.unwrap_or(cfg.safe_area),
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
        let t = theme();

        let mut panel = Panel::new(
            Anchor::Bottom,
            PanelWidth::Percent(self.config.width_percent),
        );
        panel.dark = view.dark;
        panel.accent = view.accent;
        panel.safe_area = view.safe_area;
        if let Some(title) = &view.title {
            panel = panel.child(Element::Title(title.clone()));
        }
        let rows = view
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| Row {
                key: view.row_key(i),
                text: item.text.clone(),
                color: item.color,
            })
            .collect();
        let selected_item = (view.selected < view.items.len()).then_some(view.selected);
        panel = panel.child(Element::Items {
            rows,
            selected: selected_item,
        });
        if let Some(cancel) = &view.cancel {
            let cancel_index = view.items.len();
            let selected_cancel = (view.selected == cancel_index).then_some(0);
            panel = panel.child(Element::Divider).child(Element::Items {
                rows: vec![Row {
                    key: view.row_key(cancel_index),
                    text: cancel.text.clone(),
                    color: cancel.color.or(Some(t.text_muted)),
                }],
                selected: selected_cancel,
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

    /// Handle input. Like the modal, a presented sheet is blocking: keys
    /// and mouse events (including scroll) are consumed.
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
                KeyCode::Up | KeyCode::BackTab => {
                    let len = view.row_count();
                    view.selected = (view.selected + len - 1) % len;
                    KeyAction::Handled
                }
                KeyCode::Down | KeyCode::Tab => {
                    view.selected = (view.selected + 1) % view.row_count();
                    KeyAction::Handled
                }
                KeyCode::Enter => KeyAction::Activate(view.row_key(view.selected)),
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

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn key_press(code: KeyCode) -> Event {
        Event::Key(crossterm::event::KeyEvent::new(
            code,
            crossterm::event::KeyModifiers::NONE,
        ))
    }

    #[test]
    fn test_show_with_empty_items_is_rejected() {
        let mut sheet = ActionSheet::default();
        sheet.show(SheetOptions::new());
        assert_eq!(sheet.state(), OverlayState::Idle);
    }

    #[test]
    fn test_keys_positional_then_cancel() {
        let view_keys = |sheet: &ActionSheet| {
            let view = sheet.current.as_ref().unwrap();
            (0..view.row_count()).map(|i| view.row_key(i)).collect::<Vec<_>>()
        };
        let mut sheet = ActionSheet::default();
        sheet.show(
            SheetOptions::new()
                .items(["A", "B"])
                .cancel(CancelItem::Custom(SheetItem::new("Close"))),
        );
        assert_eq!(view_keys(&sheet), vec!["0", "1", "cancel"]);
    }

    #[test]
    fn test_explicit_key_used_verbatim() {
        let mut sheet = ActionSheet::default();
        sheet.show(
            SheetOptions::new()
                .item(SheetItem::new("Delete").key("delete"))
                .item("Rename"),
        );
        let view = sheet.current.as_ref().unwrap();
        assert_eq!(view.row_key(0), "delete");
        assert_eq!(view.row_key(1), "1");
    }

    #[test]
    fn test_cancel_row_can_be_hidden() {
        let mut sheet = ActionSheet::default();
        sheet.show(SheetOptions::new().items(["A"]).cancel(CancelItem::Hidden));
        let view = sheet.current.as_ref().unwrap();
        assert_eq!(view.row_count(), 1);
    }

    #[test]
    fn test_callback_receives_selected_key_and_hides() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut sheet = ActionSheet::default();
        sheet.show(
            SheetOptions::new()
                .items(["A", "B"])
                .animation(Animation::None)
                .callback(move |key| {
                    sink.borrow_mut().push(key.to_string());
                    false
                }),
        );
        sheet.handle_event(&key_press(KeyCode::Down));
        sheet.handle_event(&key_press(KeyCode::Enter));
        assert_eq!(*seen.borrow(), vec!["1".to_string()]);
        assert_eq!(sheet.state(), OverlayState::Idle);
    }

    #[test]
    fn test_callback_true_keeps_sheet_open() {
        let mut sheet = ActionSheet::default();
        sheet.show(
            SheetOptions::new()
                .items(["A"])
                .animation(Animation::None)
                .callback(|_| true),
        );
        sheet.handle_event(&key_press(KeyCode::Enter));
        assert_eq!(sheet.state(), OverlayState::Active);
    }

    #[test]
    fn test_selection_wraps_over_cancel_row() {
        let mut sheet = ActionSheet::default();
        sheet.show(SheetOptions::new().items(["A", "B"]));
        // A -> B -> Cancel -> A
        sheet.handle_event(&key_press(KeyCode::Down));
        sheet.handle_event(&key_press(KeyCode::Down));
        assert_eq!(sheet.current.as_ref().unwrap().selected, 2);
        sheet.handle_event(&key_press(KeyCode::Down));
        assert_eq!(sheet.current.as_ref().unwrap().selected, 0);
    }

    #[test]
    fn test_esc_gated_on_mask_can_close() {
        let mut sheet = ActionSheet::default();
        sheet.show(
            SheetOptions::new()
                .items(["A"])
                .animation(Animation::None)
                .mask_can_close(false),
        );
        sheet.handle_event(&key_press(KeyCode::Esc));
        assert_eq!(sheet.state(), OverlayState::Active);
    }

    #[test]
    fn test_hook_fires_once() {
        let fired = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&fired);
        let mut sheet = ActionSheet::default();
        sheet.show(
            SheetOptions::new()
                .items(["A"])
                .animation(Animation::None)
                .on_after_leave(move || counter.set(counter.get() + 1)),
        );
        sheet.hide();
        sheet.hide();
        assert_eq!(fired.get(), 1);
    }
}
