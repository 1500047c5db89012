//! File config persistence: saving and reloading widget defaults.

use ratatui::style::Color;
use scrim::{
    Animation, CancelItem, ModalButton, SheetItem, ToastIcon, ToastPlace, UiConfig,
};

#[test]
fn test_load_or_create_writes_defaults_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    assert!(!path.exists());

    let config = UiConfig::load_or_create(&path).unwrap();
    assert!(path.exists());
    assert_eq!(config.theme, "dark");
    assert_eq!(config.toast.duration_ms, 2000);
}

#[test]
fn test_saved_config_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = UiConfig::default();
    config.theme = "light".to_string();
    config.toast.place = ToastPlace::Bottom;
    config.toast.icon = ToastIcon::Warning;
    config.toast.duration_ms = 3500;
    config.modal.width = 60;
    config.modal.mask_can_close = false;
    config.modal.buttons = vec![
        ModalButton::new("No").key("no"),
        ModalButton::new("Yes").key("yes").color(Color::Green),
    ];
    config.sheet.animation = Animation::Fade;
    config.sheet.width_percent = 80;
    config.sheet.cancel = CancelItem::Custom(SheetItem::new("Dismiss").key("dismiss"));
    config.save(&path).unwrap();

    let loaded = UiConfig::load_or_create(&path).unwrap();
    assert_eq!(loaded.theme, "light");
    assert_eq!(loaded.toast.place, ToastPlace::Bottom);
    assert_eq!(loaded.toast.icon, ToastIcon::Warning);
    assert_eq!(loaded.toast.duration_ms, 3500);
    assert_eq!(loaded.modal.width, 60);
    assert!(!loaded.modal.mask_can_close);
    assert_eq!(loaded.modal.buttons.len(), 2);
    assert_eq!(loaded.modal.buttons[1].text, "Yes");
    assert_eq!(loaded.modal.buttons[1].key.as_deref(), Some("yes"));
    assert_eq!(loaded.modal.buttons[1].color, Some(Color::Green));
    assert_eq!(loaded.sheet.animation, Animation::Fade);
    assert_eq!(loaded.sheet.width_percent, 80);
    match &loaded.sheet.cancel {
        CancelItem::Custom(item) => {
            assert_eq!(item.text, "Dismiss");
            assert_eq!(item.key.as_deref(), Some("dismiss"));
        }
        other => panic!("unexpected cancel row: {other:?}"),
    }
}

#[test]
fn test_malformed_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "theme = [not toml").unwrap();
    assert!(UiConfig::load_or_create(&path).is_err());
}
