//! Transient overlay widgets: toast, modal dialog, action sheet.
//!
//! All three widgets share one lifecycle: `Idle` (nothing presented) →
//! `Active` (options resolved, panel rendered, events handled) → `Hiding`
//! (leave transition running) → back to `Idle` (state cleared, completion
//! hook fired). `hide()` is idempotent; a second hide while one is already
//! in flight is dropped, so teardown and the hook run exactly once per
//! presentation. With [`Animation::None`] the `Hiding` state is skipped and
//! teardown is synchronous inside `hide()`.
//!
//! Controllers are owned by an [`Overlays`] context the host constructs at
//! startup; the context also owns the default configuration each `show`
//! call merges its options over. Showing a widget while one is already
//! presented *replaces* it: the current presentation is finished
//! synchronously (timer cancelled, hook fired) before the new one begins.

pub mod anim;
pub mod modal;
pub mod node;
pub mod sheet;
pub mod toast;

pub use anim::{Animation, DEFAULT_TRANSITION};
pub use modal::{FooterLayout, Modal, ModalButton, ModalConfig, ModalOptions};
pub use sheet::{ActionSheet, CancelItem, SheetConfig, SheetItem, SheetOptions};
pub use toast::{Toast, ToastConfig, ToastIcon, ToastLayout, ToastOptions, ToastPlace};

use crate::config::UiConfig;
use anim::{Effect, Phase, Transition};
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;
use std::time::{Duration, Instant};

/// Callback invoked with the key of the activated button/row.
///
/// Returning `true` keeps the overlay open; anything else hides it.
pub type KeyCallback = Box<dyn FnMut(&str) -> bool>;

/// Hook fired once teardown completes and the widget is idle again
pub type AfterLeave = Box<dyn FnOnce()>;

/// Lifecycle state of one overlay controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    /// Nothing presented; initial and terminal state
    #[default]
    Idle,
    /// Presented and interactive
    Active,
    /// Leave transition running; hide requests are dropped
    Hiding,
}

/// What `Lifecycle::request_hide` decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HideOutcome {
    /// Idle or already hiding; nothing to do
    Ignored,
    /// No leave transition; tear down now
    Immediate,
    /// Leave transition started; tear down when it completes
    Animating,
}

/// What `Lifecycle::tick` observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickEvent {
    None,
    /// Auto-hide deadline elapsed; the controller should call `hide()`
    AutoHide,
    /// Leave transition deadline elapsed; the controller should tear down
    Finished,
}

/// Shared state machine driving all three widgets.
///
/// Owns the current state, the running enter/leave transition, and the
/// auto-hide deadline. The deadline is cleared on every hide path, so a
/// stale timer can never dismiss a later presentation.
#[derive(Debug, Default)]
pub(crate) struct Lifecycle {
    state: OverlayState,
    transition: Option<Transition>,
    hide_at: Option<Instant>,
}

impl Lifecycle {
    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == OverlayState::Idle
    }

    /// Move to `Active`, starting the enter transition and arming the
    /// auto-hide deadline when one is requested.
    pub fn present(&mut self, animation: Animation, duration: Duration, auto_hide: Option<Duration>) {
        self.state = OverlayState::Active;
        self.transition = if animation == Animation::None || duration.is_zero() {
            None
        } else {
            Some(Transition::new(animation, Phase::Enter, duration))
        };
        self.hide_at = auto_hide
            .filter(|d| !d.is_zero())
            .map(|d| Instant::now() + d);
    }

    /// Begin hiding. Idempotent: ignored when idle or already hiding.
    pub fn request_hide(&mut self, animation: Animation, duration: Duration) -> HideOutcome {
        match self.state {
            OverlayState::Idle | OverlayState::Hiding => HideOutcome::Ignored,
            OverlayState::Active => {
                // Any hide path cancels a pending auto-hide.
                self.hide_at = None;
                if animation == Animation::None || duration.is_zero() {
                    self.reset();
                    HideOutcome::Immediate
                } else {
                    self.state = OverlayState::Hiding;
                    self.transition = Some(Transition::new(animation, Phase::Leave, duration));
                    HideOutcome::Animating
                }
            }
        }
    }

    /// Advance time-driven behavior: settle a finished enter transition,
    /// report an elapsed auto-hide deadline, complete a finished leave.
    pub fn tick(&mut self) -> TickEvent {
        match self.state {
            OverlayState::Idle => TickEvent::None,
            OverlayState::Active => {
                if self
                    .transition
                    .as_ref()
                    .is_some_and(|tr| tr.phase() == Phase::Enter && tr.is_complete())
                {
                    self.transition = None;
                }
                if self.hide_at.is_some_and(|at| Instant::now() >= at) {
                    self.hide_at = None;
                    TickEvent::AutoHide
                } else {
                    TickEvent::None
                }
            }
            OverlayState::Hiding => {
                // Teardown is gated on the leave transition's own deadline;
                // a stray enter transition can never complete a hide.
                if self
                    .transition
                    .as_ref()
                    .is_none_or(Transition::is_complete)
                {
                    self.reset();
                    TickEvent::Finished
                } else {
                    TickEvent::None
                }
            }
        }
    }

    /// Drop back to `Idle`, clearing the transition and deadline
    pub fn reset(&mut self) {
        self.state = OverlayState::Idle;
        self.transition = None;
        self.hide_at = None;
    }

    /// Geometry effect for the current transition frame
    pub fn effect(&self) -> Effect {
        self.transition
            .as_ref()
            .map_or(Effect::NONE, Transition::effect)
    }
}

/// Context owning the three overlay controllers and their default configs.
///
/// Construct one at startup and drive it from the host event loop:
/// [`Overlays::handle_event`] before the application's own event handling,
/// [`Overlays::tick`] once per loop iteration, and [`Overlays::render`]
/// after the application has drawn its frame so overlays land on top.
#[derive(Default)]
pub struct Overlays {
    toast: Toast,
    modal: Modal,
    sheet: ActionSheet,
}

impl Overlays {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context with widget defaults taken from a file config
    pub fn with_config(config: &UiConfig) -> Self {
        Self {
            toast: Toast::new(config.toast.clone()),
            modal: Modal::new(config.modal.clone()),
            sheet: ActionSheet::new(config.sheet.clone()),
        }
    }

    /// The toast controller
    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    /// The modal controller
    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// The action sheet controller
    pub fn sheet(&self) -> &ActionSheet {
        &self.sheet
    }

    // === Toast ===

    /// Show a toast. Requires a title or a non-`None` icon; otherwise the
    /// call is logged and ignored.
    pub fn show_toast(&mut self, options: ToastOptions) {
        self.toast.show(options);
    }

    pub fn hide_toast(&mut self) {
        self.toast.hide();
    }

    /// Show a loading toast: loading icon, no auto-hide
    pub fn show_loading(&mut self, options: ToastOptions) {
        self.toast.show(options.loading());
    }

    pub fn hide_loading(&mut self) {
        self.toast.hide();
    }

    /// Replace the defaults future toast presentations merge over
    pub fn set_toast_config(&mut self, config: ToastConfig) {
        self.toast.set_config(config);
    }

    // === Modal ===

    /// Show a modal dialog. Requires a title or content; otherwise the
    /// call is logged and ignored.
    pub fn show_modal(&mut self, options: ModalOptions) {
        self.modal.show(options);
    }

    pub fn hide_modal(&mut self) {
        self.modal.hide();
    }

    pub fn set_modal_config(&mut self, config: ModalConfig) {
        self.modal.set_config(config);
    }

    // === Action sheet ===

    /// Show an action sheet. Requires a non-empty item list; otherwise the
    /// call is logged and ignored.
    pub fn show_action_sheet(&mut self, options: SheetOptions) {
        self.sheet.show(options);
    }

    pub fn hide_action_sheet(&mut self) {
        self.sheet.hide();
    }

    pub fn set_sheet_config(&mut self, config: SheetConfig) {
        self.sheet.set_config(config);
    }

    // === Loop integration ===

    /// Whether any overlay is currently presented (active or hiding)
    pub fn is_active(&self) -> bool {
        self.toast.state() != OverlayState::Idle
            || self.modal.state() != OverlayState::Idle
            || self.sheet.state() != OverlayState::Idle
    }

    /// Advance all controllers; returns whether any overlay is still
    /// presented (i.e. the host should keep redrawing at tick rate).
    pub fn tick(&mut self) -> bool {
        self.toast.tick();
        self.modal.tick();
        self.sheet.tick();
        self.is_active()
    }

    /// Render all presented overlays on top of the frame.
    ///
    /// Draw order keeps the toast above the modal and the sheet, matching
    /// its transient, non-interactive role.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.sheet.render(frame, area);
        self.modal.render(frame, area);
        self.toast.render(frame, area);
    }

    /// Offer an event to the overlays, topmost first.
    ///
    /// Returns `true` when an overlay consumed the event; the host should
    /// then skip its own handling for this event.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        self.toast.handle_event(event)
            || self.modal.handle_event(event)
            || self.sheet.handle_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_initial_state_is_idle() {
        let lc = Lifecycle::default();
        assert_eq!(lc.state(), OverlayState::Idle);
        assert_eq!(lc.effect(), Effect::NONE);
    }

    #[test]
    fn test_hide_on_idle_is_ignored() {
        let mut lc = Lifecycle::default();
        assert_eq!(
            lc.request_hide(Animation::Fade, DEFAULT_TRANSITION),
            HideOutcome::Ignored
        );
        assert_eq!(lc.state(), OverlayState::Idle);
    }

    #[test]
    fn test_hide_without_animation_is_immediate() {
        let mut lc = Lifecycle::default();
        lc.present(Animation::None, DEFAULT_TRANSITION, None);
        assert_eq!(lc.state(), OverlayState::Active);
        assert_eq!(
            lc.request_hide(Animation::None, DEFAULT_TRANSITION),
            HideOutcome::Immediate
        );
        assert_eq!(lc.state(), OverlayState::Idle);
    }

    #[test]
    fn test_second_hide_while_hiding_is_ignored() {
        let mut lc = Lifecycle::default();
        lc.present(Animation::Fade, Duration::from_secs(60), None);
        assert_eq!(
            lc.request_hide(Animation::Fade, Duration::from_secs(60)),
            HideOutcome::Animating
        );
        assert_eq!(lc.state(), OverlayState::Hiding);
        assert_eq!(
            lc.request_hide(Animation::Fade, Duration::from_secs(60)),
            HideOutcome::Ignored
        );
    }

    #[test]
    fn test_leave_deadline_finishes_on_tick() {
        let mut lc = Lifecycle::default();
        lc.present(Animation::Fade, Duration::ZERO, None);
        lc.request_hide(Animation::Fade, Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(lc.tick(), TickEvent::Finished);
        assert_eq!(lc.state(), OverlayState::Idle);
    }

    #[test]
    fn test_auto_hide_deadline_reported_once() {
        let mut lc = Lifecycle::default();
        lc.present(Animation::None, Duration::ZERO, Some(Duration::from_millis(1)));
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(lc.tick(), TickEvent::AutoHide);
        assert_eq!(lc.tick(), TickEvent::None);
    }

    #[test]
    fn test_hide_cancels_auto_hide_deadline() {
        let mut lc = Lifecycle::default();
        lc.present(Animation::None, Duration::ZERO, Some(Duration::from_millis(1)));
        assert_eq!(lc.request_hide(Animation::None, Duration::ZERO), HideOutcome::Immediate);
        std::thread::sleep(Duration::from_millis(5));
        // Deadline was cleared by the hide; nothing fires later.
        assert_eq!(lc.tick(), TickEvent::None);
    }
}
