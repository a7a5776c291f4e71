//! System clipboard access.

use ::clipboard::{ClipboardContext, ClipboardProvider};
use log::*;

/// Copy the text to the system clipboard. Returns false if no clipboard is
/// available.
///
pub fn copy(text: &str) -> bool {
    match ClipboardContext::new() {
        Ok(mut ctx) => match ctx.set_contents(text.to_owned()) {
            Ok(_) => {
                info!("Copied '{}' to clipboard.", text);
                true
            }
            Err(e) => {
                warn!("Failed to copy to clipboard: {}", e);
                false
            }
        },
        Err(e) => {
            warn!("Failed to initialize clipboard: {}", e);
            false
        }
    }
}
