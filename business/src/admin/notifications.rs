//! Dismissible messages shown in the top bar.

use chrono::{DateTime, Utc};

use agora_states::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Clone)]
pub struct Notifications {
    items: Vec<Notice>,
    next_id: u64,
}

impl Notifications {
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let notice = Notice {
            id: self.next_id,
            level,
            message: message.into(),
            created_at: Utc::now(),
        };
        match level {
            NoticeLevel::Error => log::error!("{}", notice.message),
            NoticeLevel::Warning => log::warn!("{}", notice.message),
            NoticeLevel::Info => log::info!("{}", notice.message),
        }
        self.items.push(notice);
        self.next_id
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Info, message)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Warning, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Error, message)
    }

    /// Returns `false` if no notice had that id.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.items.last()
    }
}

impl State for Notifications {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismiss_removes_only_that_notice() {
        let mut notifications = Notifications::default();
        let first = notifications.error("provider unreachable");
        let second = notifications.info("saved");

        assert!(notifications.dismiss(first));
        assert!(!notifications.dismiss(first));
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications.latest().map(|n| n.id), Some(second));

        notifications.clear();
        assert!(notifications.is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let mut notifications = Notifications::default();
        let a = notifications.warning("one");
        notifications.clear();
        let b = notifications.warning("two");
        assert_ne!(a, b);
    }
}
