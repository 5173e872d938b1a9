//! Support chat view state for the client and supervisor chat pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! The chat transport lives outside this client; pages render this state and
//! queue outgoing messages locally until a session is attached.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

/// Who authored a chat line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Client,
    Supervisor,
    Bot,
    System,
}

impl MessageKind {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Client => "chat-message chat-message--client",
            Self::Supervisor => "chat-message chat-message--supervisor",
            Self::Bot => "chat-message chat-message--bot",
            Self::System => "chat-message chat-message--system",
        }
    }
}

/// A single chat message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub kind: MessageKind,
    pub message: String,
    pub time: String,
    pub sender_name: Option<String>,
}

/// State for one support conversation.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub connected: bool,
    pub session_id: Option<String>,
    next_id: u64,
}

impl ChatState {
    /// True once a supervisor spoke or the system announced one joining.
    pub fn has_supervisor(&self) -> bool {
        self.messages.iter().any(|m| {
            m.kind == MessageKind::Supervisor || (m.kind == MessageKind::System && m.message.contains("Supervisor"))
        })
    }

    /// Whether the conversation view (rather than the start screen) shows.
    pub fn is_active(&self) -> bool {
        self.connected || self.session_id.is_some()
    }

    /// Short session label for the ticket header.
    pub fn session_label(&self) -> String {
        match &self.session_id {
            Some(id) => format!("#{}...", id.chars().take(8).collect::<String>()),
            None => "Aguardando...".to_owned(),
        }
    }

    pub fn attach(&mut self, session_id: impl Into<String>) {
        self.session_id = Some(session_id.into());
        self.connected = true;
    }

    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    /// Append a message; blank text is ignored. Returns the new id.
    pub fn push(
        &mut self,
        kind: MessageKind,
        text: &str,
        time: impl Into<String>,
        sender_name: Option<String>,
    ) -> Option<u64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id: self.next_id,
            kind,
            message: text.to_owned(),
            time: time.into(),
            sender_name,
        });
        Some(self.next_id)
    }
}
