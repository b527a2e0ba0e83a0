use indexmap::IndexMap;
use log::{debug, info};

use crate::profiles::{mock_profiles, UserProfile};

/// Preview shown for a match with no messages yet.
pub const NEW_MATCH_PREVIEW: &str = "Say hi and break the ice";

const HOUR_MILLIS: u64 = 60 * 60 * 1000;

/// One message inside a conversation. `read` is only meaningful for
/// incoming messages; outgoing ones are born read.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub from_me: bool,
    pub text: String,
    pub sent_at_ms: u64,
    pub read: bool,
}

/// A matched profile plus its conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchEntry {
    pub profile: UserProfile,
    pub matched_at_ms: u64,
    pub messages: Vec<ChatMessage>,
    pub unread: u32,
}

impl MatchEntry {
    /// Text and timestamp for the conversation list row: the last message,
    /// or a say-hello placeholder dated to the match itself.
    pub fn preview(&self) -> (&str, u64) {
        match self.messages.last() {
            Some(message) => (&message.text, message.sent_at_ms),
            None => (NEW_MATCH_PREVIEW, self.matched_at_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError {
    UnknownMatch,
    EmptyMessage,
}

impl std::fmt::Display for SendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendError::UnknownMatch => write!(f, "no conversation with that match"),
            SendError::EmptyMessage => write!(f, "message text is empty"),
        }
    }
}

impl std::error::Error for SendError {}

/// Conversations keyed by profile id, kept in match order.
#[derive(Default)]
pub struct MatchStore {
    entries: IndexMap<String, MatchEntry>,
}

impl MatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new match. Returns false if the profile was already in the
    /// store; the existing conversation is kept untouched.
    pub fn add_match(&mut self, profile: UserProfile, now_ms: u64) -> bool {
        if self.entries.contains_key(&profile.id) {
            debug!("match with {} already recorded", profile.name);
            return false;
        }
        info!("new match with {}", profile.name);
        self.entries.insert(
            profile.id.clone(),
            MatchEntry {
                profile,
                matched_at_ms: now_ms,
                messages: Vec::new(),
                unread: 0,
            },
        );
        true
    }

    pub fn send_message(&mut self, to: &str, text: &str, now_ms: u64) -> Result<(), SendError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SendError::EmptyMessage);
        }
        let entry = self
            .entries
            .get_mut(to)
            .ok_or(SendError::UnknownMatch)?;
        debug!("message to {}: {text}", entry.profile.name);
        entry.messages.push(ChatMessage {
            from_me: true,
            text: text.to_string(),
            sent_at_ms: now_ms,
            read: true,
        });
        Ok(())
    }

    /// Appends an incoming message and bumps the unread counter.
    pub fn receive_message(&mut self, from: &str, text: &str, now_ms: u64) -> Result<(), SendError> {
        let entry = self
            .entries
            .get_mut(from)
            .ok_or(SendError::UnknownMatch)?;
        entry.messages.push(ChatMessage {
            from_me: false,
            text: text.to_string(),
            sent_at_ms: now_ms,
            read: false,
        });
        entry.unread += 1;
        Ok(())
    }

    /// Clears the unread state for one conversation. Unknown ids are a no-op.
    pub fn mark_read(&mut self, id: &str) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.unread = 0;
            for message in &mut entry.messages {
                message.read = true;
            }
        }
    }

    pub fn unread_total(&self) -> u32 {
        self.entries.values().map(|entry| entry.unread).sum()
    }

    pub fn get(&self, id: &str) -> Option<&MatchEntry> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Buckets an elapsed interval the way the conversation list labels it.
pub fn format_relative(now_ms: u64, then_ms: u64) -> String {
    let hours = now_ms.saturating_sub(then_ms) / HOUR_MILLIS;
    if hours < 1 {
        return "Just now".to_string();
    }
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = hours / 24;
    if days == 1 {
        "Yesterday".to_string()
    } else {
        format!("{days} days ago")
    }
}

/// Pre-seeded conversations the demo account starts with: an ongoing thread
/// with Emma and a fresh, silent match with Sofia.
pub fn demo_history(now_ms: u64) -> MatchStore {
    let mut store = MatchStore::new();
    let mut feed = mock_profiles().into_iter();
    let Some(emma) = feed.next() else { return store };
    let Some(sofia) = feed.next() else { return store };

    let emma_id = emma.id.clone();
    store.add_match(emma, now_ms.saturating_sub(48 * HOUR_MILLIS));
    let _ = store.send_message(
        &emma_id,
        "hey! your trail photos are great",
        now_ms.saturating_sub(3 * HOUR_MILLIS),
    );
    let _ = store.receive_message(
        &emma_id,
        "thanks! that was the ridge loop last weekend",
        now_ms.saturating_sub(HOUR_MILLIS / 2),
    );

    store.add_match(sofia, now_ms.saturating_sub(26 * HOUR_MILLIS));
    store
}

#[cfg(test)]
#[path = "tests/chat_tests.rs"]
mod tests;
