//! Transient per-session state.

use company_intel::{ChatSession, ChatTurn, CompanyRecord};

/// Everything the interactive session remembers between views.
///
/// Held by the main loop and passed down; the pipeline components stay
/// stateless. None of this survives the process — chat transcripts in
/// particular are never persisted.
#[derive(Default)]
pub struct SessionState {
    /// Name of the currently loaded dataset.
    pub current_dataset: Option<String>,

    /// Company currently selected in the explorer.
    pub current_company: Option<CompanyRecord>,

    /// Open chat session, if any.
    pub chat: Option<Box<dyn ChatSession>>,

    /// Turn-by-turn transcript of the open chat.
    pub chat_history: Vec<ChatTurn>,
}

impl SessionState {
    /// Drop the open chat and its transcript (e.g. when the selected
    /// company changes).
    pub fn reset_chat(&mut self) {
        self.chat = None;
        self.chat_history.clear();
    }
}
