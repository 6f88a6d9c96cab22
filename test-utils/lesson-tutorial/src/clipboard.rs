//! Copying terminal output to the system clipboard
//!
//! The system clipboard is tried first. When it is unavailable (no display
//! server, headless SSH session) the text is handed back so the message panel
//! can show it for selection with the mouse instead.

use tracing::{debug, warn};

/// Where copied text ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    System,
    /// System clipboard failed; the text must be selected by hand
    Fallback(String),
}

#[derive(Default)]
pub struct Clipboard {
    system: Option<arboard::Clipboard>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copy(&mut self, text: &str) -> CopyOutcome {
        // The arboard handle is kept alive so X11 can serve later paste requests.
        if self.system.is_none() {
            match arboard::Clipboard::new() {
                Ok(cb) => self.system = Some(cb),
                Err(e) => debug!("arboard clipboard init failed: {}", e),
            }
        }

        if let Some(clipboard) = self.system.as_mut() {
            match clipboard.set_text(text) {
                Ok(()) => return CopyOutcome::System,
                Err(e) => {
                    warn!("Clipboard copy failed, falling back to manual selection: {}", e);
                    self.system = None;
                }
            }
        }

        CopyOutcome::Fallback(text.to_string())
    }
}
