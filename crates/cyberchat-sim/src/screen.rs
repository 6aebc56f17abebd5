//! Screen state
//!
//! Everything the terminal draws besides the gate itself: the message log,
//! the open host dialog and the line being typed. Pure data, no I/O.

use std::collections::VecDeque;

use cyberchat_gate::{GateView, PermissionSet, RequestId};

/// Messages kept for display.
const MAX_MESSAGES: usize = 64;

/// Host dialog awaiting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    /// System prompt to power on the adapter.
    Enable(RequestId),
    /// System prompt for a permission batch.
    Permissions(RequestId, PermissionSet),
}

impl Dialog {
    /// Question shown while the dialog is up.
    pub fn question(self) -> String {
        match self {
            Self::Enable(_) => "An app wants to turn on Bluetooth. Allow?".to_string(),
            Self::Permissions(_, set) => {
                let names: Vec<_> = set.permissions().iter().map(|p| p.name()).collect();
                format!("Allow CyberChat to use {}?", names.join(", "))
            },
        }
    }
}

/// Terminal-side state of the entry screen.
#[derive(Debug, Default)]
pub struct Screen {
    view: Option<GateView>,
    dialog: Option<Dialog>,
    messages: VecDeque<String>,
    input: String,
}

impl Screen {
    /// Last view rendered by the gate.
    pub fn view(&self) -> Option<&GateView> {
        self.view.as_ref()
    }

    /// Replace the gate view.
    pub fn set_view(&mut self, view: GateView) {
        self.view = Some(view);
    }

    /// Open host dialog, if any.
    pub fn dialog(&self) -> Option<Dialog> {
        self.dialog
    }

    /// Show a host dialog. Replaces any dialog already up.
    pub fn open_dialog(&mut self, dialog: Dialog) {
        if let Some(previous) = self.dialog.replace(dialog) {
            tracing::warn!("dialog {:?} replaced before it was answered", previous);
        }
    }

    /// Close the open dialog and return it.
    pub fn close_dialog(&mut self) -> Option<Dialog> {
        self.dialog.take()
    }

    /// Message log, oldest first.
    pub fn messages(&self) -> &VecDeque<String> {
        &self.messages
    }

    /// Append to the message log, dropping the oldest past the cap.
    pub fn push_message(&mut self, message: impl Into<String>) {
        if self.messages.len() == MAX_MESSAGES {
            self.messages.pop_front();
        }
        self.messages.push_back(message.into());
    }

    /// Prompt in front of the input line.
    pub fn prompt(&self) -> &'static str {
        match self.dialog {
            Some(_) => "[y/n] ",
            None => "> ",
        }
    }

    /// Line being typed.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Type a character.
    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    /// Delete the last character.
    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Submit the typed line, clearing it.
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }
}
