use morph_core::Presenter;
use winit::window::{CursorIcon, Window};

const TITLE: &str = "Particle Morph";

/// Shows narrative text in the window title and drives the cursor icon.
pub struct WindowPresenter<'w> {
    window: &'w Window,
}

impl<'w> WindowPresenter<'w> {
    pub fn new(window: &'w Window) -> Self {
        window.set_title(TITLE);
        Self { window }
    }
}

impl Presenter for WindowPresenter<'_> {
    fn fade_out_text(&mut self) {
        self.window.set_title(TITLE);
    }

    fn show_text(&mut self, text: &str) {
        log::info!("[text] {}", text);
        self.window.set_title(&format!("{TITLE} · {text}"));
    }

    fn set_pointer(&mut self, pointer: bool) {
        let icon = if pointer {
            CursorIcon::Pointer
        } else {
            CursorIcon::Default
        };
        self.window.set_cursor_icon(icon);
    }

    fn particle_activated(&mut self, index: usize) {
        log::info!("[click] synapse fired at node {}", index);
    }
}

/// Presenter for headless runs: everything goes to the log.
#[derive(Default)]
pub struct LogPresenter {
    pub texts: Vec<String>,
}

impl Presenter for LogPresenter {
    fn fade_out_text(&mut self) {
        log::debug!("[text] fade out");
    }

    fn show_text(&mut self, text: &str) {
        log::info!("[text] {}", text);
        self.texts.push(text.to_string());
    }

    fn set_pointer(&mut self, pointer: bool) {
        log::debug!("[text] pointer {}", pointer);
    }

    fn particle_activated(&mut self, index: usize) {
        log::info!("[click] synapse fired at node {}", index);
    }
}
