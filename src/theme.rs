//! Theme Application
//!
//! Light and dark are forced with a class on `<html>`; "system" removes
//! both and leaves it to the stylesheet's `prefers-color-scheme` rules.

use bookstore_core::prefs::ThemeMode;
use log::warn;

const LIGHT_CLASS: &str = "theme-light";
const DARK_CLASS: &str = "theme-dark";

pub fn apply_theme(mode: ThemeMode) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let classes = root.class_list();
    let result = classes
        .remove_2(LIGHT_CLASS, DARK_CLASS)
        .and_then(|_| match mode {
            ThemeMode::Light => classes.add_1(LIGHT_CLASS),
            ThemeMode::Dark => classes.add_1(DARK_CLASS),
            ThemeMode::System => Ok(()),
        });
    if let Err(e) = result {
        warn!("Failed to apply theme: {:?}", e);
    }
}
