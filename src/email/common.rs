/// Common structures shared by the mailbox backends and the session
use chrono::{DateTime, FixedOffset, TimeZone};
use std::fmt;

/// Server-assigned identifier of a message (its IMAP UID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageHandle(pub u32);

impl fmt::Display for MessageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Header information retrieved for one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageMetadata {
    /// Full `From:` value, e.g. `Shop <deals@shop.example>`
    pub sender: String,
    pub subject: String,
    /// Kept in the offset the server reported, so its calendar date matches
    /// what an IMAP `BEFORE` search compares
    pub received_at: Option<DateTime<FixedOffset>>,
}

impl MessageMetadata {
    pub fn new(sender: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            subject: subject.into(),
            received_at: None,
        }
    }

    pub fn received<Tz: TimeZone>(mut self, at: DateTime<Tz>) -> Self {
        self.received_at = Some(at.fixed_offset());
        self
    }

    /// Bare address part of the sender, lowercased.
    ///
    /// `"Shop <Deals@Shop.example>"` gives `"deals@shop.example"`; a value
    /// without angle brackets is returned trimmed.
    pub fn sender_address(&self) -> String {
        let raw = match (self.sender.rfind('<'), self.sender.rfind('>')) {
            (Some(start), Some(end)) if start < end => &self.sender[start + 1..end],
            _ => self.sender.as_str(),
        };
        raw.trim().to_lowercase()
    }

    /// Part of the address before `@`, or the whole address when there is none
    pub fn sender_local_part(&self) -> String {
        let address = self.sender_address();
        match address.split_once('@') {
            Some((local, _)) => local.to_string(),
            None => address,
        }
    }

    /// Part of the address after `@`, empty when there is none
    pub fn sender_domain(&self) -> String {
        self.sender_address()
            .split_once('@')
            .map(|(_, domain)| domain.to_string())
            .unwrap_or_default()
    }

    /// Subject cut to `max` characters for console output
    pub fn short_subject(&self, max: usize) -> String {
        let subject = self.subject.trim();
        if subject.is_empty() {
            return "(no subject)".to_string();
        }
        if subject.chars().count() > max {
            let cut: String = subject.chars().take(max).collect();
            format!("{}...", cut)
        } else {
            subject.to_string()
        }
    }
}

/// One message of a fetched batch
#[derive(Debug, Clone)]
pub struct FetchedMessage {
    pub handle: MessageHandle,
    pub metadata: MessageMetadata,
}
