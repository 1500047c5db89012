//! Showcase application for the overlay widgets.
//!
//! Draws a static background page and triggers toasts, modals, and action
//! sheets from key presses. Overlay callbacks write the activated key into
//! a shared cell the page displays, so the keep-open/auto-hide behavior is
//! visible interactively.

use crate::overlay::{
    Animation, CancelItem, ModalButton, ModalOptions, Overlays, SheetItem, SheetOptions,
    ToastIcon, ToastOptions, ToastPlace,
};
use crate::styles::theme;
use crate::tui::Tui;
use crate::UiConfig;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub struct App {
    overlays: Overlays,
    /// Key reported by the most recent overlay callback
    last_action: Rc<RefCell<Option<String>>>,
    tick_rate: Duration,
    should_quit: bool,
}

impl App {
    pub fn new(config: &UiConfig, tick_rate: Duration) -> Self {
        Self {
            overlays: Overlays::with_config(config),
            last_action: Rc::new(RefCell::new(None)),
            tick_rate,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            if crossterm::event::poll(self.tick_rate)? {
                let event = crossterm::event::read()?;
                // Overlays get first refusal; a modal swallows everything.
                if !self.overlays.handle_event(&event) {
                    self.handle_event(&event);
                }
            }
            self.overlays.tick();
        }
        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        let Event::Key(key) = event else { return };
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('t') => self.overlays.show_toast(
                ToastOptions::new().title("Saved").icon(ToastIcon::Success),
            ),
            KeyCode::Char('e') => self.overlays.show_toast(
                ToastOptions::new()
                    .title("Connection lost")
                    .icon(ToastIcon::Error)
                    .place(ToastPlace::Top),
            ),
            KeyCode::Char('w') => self.overlays.show_toast(
                ToastOptions::new()
                    .title("Disk almost full")
                    .icon(ToastIcon::Warning)
                    .place(ToastPlace::Bottom)
                    .mask(true),
            ),
            KeyCode::Char('l') => self.overlays.show_loading(ToastOptions::new()),
            KeyCode::Char('h') => self.overlays.hide_toast(),
            KeyCode::Char('m') => {
                let sink = Rc::clone(&self.last_action);
                self.overlays.show_modal(
                    ModalOptions::new()
                        .title("Delete file?")
                        .content("This cannot be undone.")
                        .buttons(vec![
                            ModalButton::new("Cancel").key("cancel"),
                            ModalButton::new("Delete").key("delete").color(theme().error),
                        ])
                        .callback(move |key| {
                            *sink.borrow_mut() = Some(format!("modal: {key}"));
                            false
                        }),
                );
            }
            KeyCode::Char('d') => {
                let sink = Rc::clone(&self.last_action);
                self.overlays.show_modal(
                    ModalOptions::new()
                        .title("Keep me open")
                        .content("The confirm button keeps this dialog open.")
                        .dark(true)
                        .animation(Animation::Fade)
                        .callback(move |key| {
                            *sink.borrow_mut() = Some(format!("modal: {key}"));
                            key == "confirm"
                        }),
                );
            }
            KeyCode::Char('a') => {
                let sink = Rc::clone(&self.last_action);
                self.overlays.show_action_sheet(
                    SheetOptions::new()
                        .title("File actions")
                        .item("Open")
                        .item("Rename")
                        .item(SheetItem::new("Delete").key("delete").color(theme().error))
                        .cancel(CancelItem::Custom(SheetItem::new("Close")))
                        .callback(move |key| {
                            *sink.borrow_mut() = Some(format!("sheet: {key}"));
                            false
                        }),
                );
            }
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let t = theme();

        let page = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_style())
            .title(" scrim ")
            .title_alignment(Alignment::Center);
        let inner = page.inner(area);
        frame.render_widget(page, area);

        let chunks = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

        let heading = Paragraph::new("Transient overlay widgets")
            .alignment(Alignment::Center)
            .style(t.title_style());
        frame.render_widget(heading, chunks[0]);

        let hint = |key: &str, what: &str| {
            Line::from(vec![
                Span::styled(
                    format!("  {key}  "),
                    Style::default().fg(t.primary).add_modifier(Modifier::BOLD),
                ),
                Span::styled(what.to_string(), t.text_style()),
            ])
        };
        let hints = Paragraph::new(vec![
            hint("t", "success toast"),
            hint("e", "error toast (top)"),
            hint("w", "warning toast (bottom, masked)"),
            hint("l", "loading toast (h hides it)"),
            hint("m", "confirmation modal"),
            hint("d", "dark modal that keeps itself open"),
            hint("a", "action sheet"),
            hint("q", "quit"),
        ]);
        frame.render_widget(hints, chunks[1]);

        let status = match self.last_action.borrow().as_deref() {
            Some(action) => format!("last action: {action}"),
            None => "no action yet".to_string(),
        };
        let footer = Paragraph::new(status)
            .alignment(Alignment::Center)
            .style(t.muted_style());
        frame.render_widget(footer, chunks[2]);

        self.overlays.render(frame, area);
    }
}
