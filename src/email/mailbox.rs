use chrono::NaiveDate;

use crate::error::MailboxError;
use super::common::{FetchedMessage, MessageHandle};

/// Operations the cleanup session needs from a mail server.
///
/// The IMAP client implements it for real mailboxes; tests implement it over
/// an in-memory message list.
#[allow(async_fn_in_trait)]
pub trait Mailbox {
    /// Unread messages received strictly before `cutoff`, in server order
    async fn search_unread_before(&mut self, cutoff: NaiveDate) -> Result<Vec<MessageHandle>, MailboxError>;

    /// Header metadata for every handle of `batch`.
    ///
    /// Handles that vanished from the server are simply absent from the result.
    async fn fetch_metadata(&mut self, batch: &[MessageHandle]) -> Result<Vec<FetchedMessage>, MailboxError>;

    /// Flag a single message for deletion
    async fn delete(&mut self, handle: MessageHandle) -> Result<(), MailboxError>;

    /// Permanently remove the messages flagged by `delete`
    async fn expunge(&mut self) -> Result<(), MailboxError>;

    /// Release the connection. Must be safe to call more than once.
    async fn logout(&mut self) -> Result<(), MailboxError>;
}
