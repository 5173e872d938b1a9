//! Transient toast notices (errors, confirmations, access denials).
//!
//! DESIGN
//! ======
//! Plain data mutated through an `RwSignal<NoticeState>` in context; the
//! `NoticeTray` component renders it and schedules auto-dismissal.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

/// Oldest notices are dropped beyond this many.
pub const MAX_NOTICES: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoticeLevel {
    #[default]
    Info,
    Success,
    Error,
}

impl NoticeLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "notice notice--info",
            Self::Success => "notice notice--success",
            Self::Error => "notice notice--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct NoticeState {
    pub notices: Vec<Notice>,
    next_id: u64,
}

impl NoticeState {
    /// Queue a notice and return its id.
    pub fn push(&mut self, level: NoticeLevel, title: impl Into<String>, description: Option<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.notices.push(Notice { id, level, title: title.into(), description });
        if self.notices.len() > MAX_NOTICES {
            let excess = self.notices.len() - MAX_NOTICES;
            self.notices.drain(..excess);
        }
        id
    }

    pub fn error(&mut self, title: impl Into<String>, description: Option<String>) -> u64 {
        self.push(NoticeLevel::Error, title, description)
    }

    pub fn success(&mut self, title: impl Into<String>, description: Option<String>) -> u64 {
        self.push(NoticeLevel::Success, title, description)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|n| n.id != id);
    }
}
