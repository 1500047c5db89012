//! scrim - transient overlay widgets for ratatui terminal apps
//!
//! Provides three overlay controllers - toast notifications, modal dialogs,
//! and action sheets - that render on top of an application's frame and
//! manage their own show/hide lifecycle, transitions, and input handling.

// Core modules
pub mod config;
pub mod overlay;
pub mod styles;

// Demo binary modules
pub mod app;
pub mod cli;
pub mod tui;

// Re-exports for convenience
pub use config::UiConfig;
pub use overlay::{
    ActionSheet, Animation, CancelItem, Modal, ModalButton, ModalConfig, ModalOptions,
    OverlayState, Overlays, SheetConfig, SheetItem, SheetOptions, Toast, ToastConfig, ToastIcon,
    ToastOptions, ToastPlace,
};
pub use styles::{init_theme, theme, Theme, ThemeType};
