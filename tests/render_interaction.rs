//! Rendering and mouse interaction through a test backend: overlays are
//! drawn into a fixed-size buffer and clicks are dispatched at coordinates
//! looked up from the rendered text.

use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use scrim::{
    Animation, CancelItem, ModalOptions, OverlayState, Overlays, SheetItem, SheetOptions,
    ToastOptions,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn draw(overlays: &mut Overlays, terminal: &mut Terminal<TestBackend>) {
    terminal
        .draw(|frame| {
            let area = frame.area();
            overlays.render(frame, area);
        })
        .unwrap();
}

fn buffer_rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    let area = buffer.area;
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buffer.cell((x, y)).unwrap().symbol())
                .collect()
        })
        .collect()
}

/// Locate `needle` in the rendered buffer, returning (column, row)
fn find(rows: &[String], needle: &str) -> Option<(u16, u16)> {
    rows.iter().enumerate().find_map(|(y, row)| {
        row.find(needle).map(|byte_idx| {
            let col = row[..byte_idx].chars().count() as u16;
            (col, y as u16)
        })
    })
}

fn click(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn scroll() -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 1,
        row: 1,
        modifiers: KeyModifiers::NONE,
    })
}

#[test]
fn toast_renders_title_then_disappears_after_auto_hide() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut overlays = Overlays::new();
    overlays.show_toast(
        ToastOptions::new()
            .title("Saved")
            .duration(Duration::from_millis(1))
            .animation(Animation::None),
    );
    draw(&mut overlays, &mut terminal);
    assert!(find(&buffer_rows(&terminal), "Saved").is_some());

    std::thread::sleep(Duration::from_millis(5));
    overlays.tick();
    assert_eq!(overlays.toast().state(), OverlayState::Idle);
    draw(&mut overlays, &mut terminal);
    assert!(find(&buffer_rows(&terminal), "Saved").is_none());
}

#[test]
fn modal_button_clicks_respect_keep_open_callback() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut overlays = Overlays::new();
    overlays.show_modal(
        ModalOptions::new()
            .title("Delete file?")
            .animation(Animation::None)
            .callback(|key| key == "confirm"),
    );
    draw(&mut overlays, &mut terminal);

    // Clicking the confirm button keeps the modal open.
    let (x, y) = find(&buffer_rows(&terminal), "Confirm").expect("confirm button rendered");
    assert!(overlays.handle_event(&click(x, y)));
    assert_eq!(overlays.modal().state(), OverlayState::Active);

    // Clicking cancel closes it.
    draw(&mut overlays, &mut terminal);
    let (x, y) = find(&buffer_rows(&terminal), "Cancel").expect("cancel button rendered");
    overlays.handle_event(&click(x, y));
    assert_eq!(overlays.modal().state(), OverlayState::Idle);
}

#[test]
fn modal_backdrop_click_gated_on_mask_can_close() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut overlays = Overlays::new();
    overlays.show_modal(
        ModalOptions::new()
            .title("stay")
            .animation(Animation::None)
            .mask_can_close(false),
    );
    draw(&mut overlays, &mut terminal);
    overlays.handle_event(&click(0, 0));
    assert_eq!(overlays.modal().state(), OverlayState::Active);

    overlays.hide_modal();
    overlays.show_modal(ModalOptions::new().title("go").animation(Animation::None));
    draw(&mut overlays, &mut terminal);
    overlays.handle_event(&click(0, 0));
    assert_eq!(overlays.modal().state(), OverlayState::Idle);
}

#[test]
fn sheet_renders_items_and_cancel_row_and_dispatches_clicks() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut overlays = Overlays::new();
    overlays.show_action_sheet(
        SheetOptions::new()
            .items(["Open", "Rename"])
            .cancel(CancelItem::Custom(SheetItem::new("Close")))
            .animation(Animation::None)
            .callback(move |key| {
                sink.borrow_mut().push(key.to_string());
                true
            }),
    );
    draw(&mut overlays, &mut terminal);
    let rows = buffer_rows(&terminal);
    assert!(find(&rows, "Open").is_some());
    assert!(find(&rows, "Rename").is_some());
    assert!(find(&rows, "Close").is_some());

    let (x, y) = find(&rows, "Rename").unwrap();
    overlays.handle_event(&click(x, y));
    let (x, y) = find(&rows, "Close").unwrap();
    overlays.handle_event(&click(x, y));
    assert_eq!(*seen.borrow(), vec!["1".to_string(), "cancel".to_string()]);
}

#[test]
fn active_modal_consumes_scroll_events() {
    let mut overlays = Overlays::new();
    assert!(!overlays.handle_event(&scroll()));
    overlays.show_modal(ModalOptions::new().title("block"));
    assert!(overlays.handle_event(&scroll()));
    assert_eq!(overlays.modal().state(), OverlayState::Active);
}

#[test]
fn masked_toast_blocks_mouse_but_never_dismisses() {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut overlays = Overlays::new();
    overlays.show_toast(
        ToastOptions::new()
            .title("busy")
            .mask(true)
            .duration(Duration::ZERO)
            .animation(Animation::None),
    );
    draw(&mut overlays, &mut terminal);
    assert!(overlays.handle_event(&click(0, 0)));
    assert_eq!(overlays.toast().state(), OverlayState::Active);
}
