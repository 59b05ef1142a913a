use async_imap::Session;
use async_native_tls::{TlsConnector, TlsStream};
use chrono::{DateTime, FixedOffset, NaiveDate};
use futures::TryStreamExt;
use log::{debug, info, warn};
use std::collections::HashMap;
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncReadCompatExt};

use crate::config::ImapConfig;
use crate::email::{FetchedMessage, Mailbox, MessageHandle, MessageMetadata};
use crate::error::MailboxError;

type ImapSession = Session<TlsStream<Compat<TcpStream>>>;

/// IMAP search criteria for unread mail received before `cutoff`.
///
/// `BEFORE` compares the internal date with day granularity, which is
/// exactly the "received before the cutoff date" rule.
pub fn search_query(cutoff: NaiveDate) -> String {
    format!("UNSEEN BEFORE {}", cutoff.format("%-d-%b-%Y"))
}

/// Comma separated UID set for a batch
pub fn uid_set(batch: &[MessageHandle]) -> String {
    batch
        .iter()
        .map(|handle| handle.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Map a LOGIN failure: a tagged NO/BAD is a rejected login, anything else
/// (I/O, TLS, dropped connection) is a connection problem
pub fn login_error(err: async_imap::error::Error) -> MailboxError {
    match err {
        async_imap::error::Error::No(reason) | async_imap::error::Error::Bad(reason) => {
            MailboxError::Authentication(reason)
        }
        other => MailboxError::connection("login failed", other),
    }
}

/// `Date:` header value in the offset it was written with
fn header_date(date: &mail_parser::DateTime) -> Option<DateTime<FixedOffset>> {
    let offset = (i32::from(date.tz_hour) * 3600 + i32::from(date.tz_minute) * 60)
        * if date.tz_before_gmt { -1 } else { 1 };
    let offset = FixedOffset::east_opt(offset)?;
    DateTime::from_timestamp(date.to_timestamp(), 0).map(|at| at.with_timezone(&offset))
}

/// Build metadata from raw header bytes, using `fallback_date` (INTERNALDATE)
/// when present and the `Date:` header otherwise
pub fn parse_header_block(raw: &[u8], fallback_date: Option<DateTime<FixedOffset>>) -> MessageMetadata {
    let Some(parsed) = mail_parser::MessageParser::default().parse(raw) else {
        warn!("Unable to parse message headers ({} bytes)", raw.len());
        return MessageMetadata {
            sender: String::new(),
            subject: String::new(),
            received_at: fallback_date,
        };
    };

    let sender = parsed
        .from()
        .and_then(|addrs| addrs.first())
        .map(|addr| match (&addr.name, &addr.address) {
            (Some(name), Some(email)) => format!("{} <{}>", name, email),
            (None, Some(email)) => email.to_string(),
            (Some(name), None) => name.to_string(),
            (None, None) => String::new(),
        })
        .unwrap_or_default();

    let subject = parsed.subject().unwrap_or_default().trim().to_string();

    let received_at = fallback_date.or_else(|| parsed.date().and_then(header_date));

    MessageMetadata {
        sender,
        subject,
        received_at,
    }
}

/// Mailbox backed by a live IMAP session over implicit TLS
pub struct ImapClient {
    session: Option<ImapSession>,
}

impl ImapClient {
    pub async fn connect(config: &ImapConfig) -> Result<Self, MailboxError> {
        info!("Connecting to IMAP server {}:{}", config.server, config.port);

        let tcp_stream = TcpStream::connect((config.server.as_str(), config.port))
            .await
            .map_err(|e| MailboxError::connection("unable to reach the IMAP server", e))?;

        // async-imap speaks futures-io
        let tcp_stream_compat = tcp_stream.compat();

        let tls = TlsConnector::new();
        let tls_stream = tls
            .connect(&config.server, tcp_stream_compat)
            .await
            .map_err(|e| MailboxError::connection("TLS handshake failed", e))?;

        let client = async_imap::Client::new(tls_stream);

        let mut session = client
            .login(&config.username, &config.password)
            .await
            .map_err(|(e, _client)| login_error(e))?;

        session
            .select(&config.mailbox)
            .await
            .map_err(|e| MailboxError::connection(&format!("unable to select {}", config.mailbox), e))?;

        info!("✅ Connected as {}, mailbox {} selected", config.username, config.mailbox);

        Ok(ImapClient {
            session: Some(session),
        })
    }

    fn session(&mut self) -> Result<&mut ImapSession, MailboxError> {
        self.session
            .as_mut()
            .ok_or_else(|| MailboxError::Connection("session already closed".to_string()))
    }
}

impl Mailbox for ImapClient {
    async fn search_unread_before(&mut self, cutoff: NaiveDate) -> Result<Vec<MessageHandle>, MailboxError> {
        let query = search_query(cutoff);
        debug!("Search criteria: {}", query);

        let uids = self
            .session()?
            .uid_search(&query)
            .await
            .map_err(|e| MailboxError::connection("search failed", e))?;

        let mut handles: Vec<MessageHandle> = uids.into_iter().map(MessageHandle).collect();
        handles.sort_unstable();

        info!("Found {} unread message(s) before {}", handles.len(), cutoff);
        Ok(handles)
    }

    async fn fetch_metadata(&mut self, batch: &[MessageHandle]) -> Result<Vec<FetchedMessage>, MailboxError> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let set = uid_set(batch);
        debug!("Fetching headers for UIDs {}", set);

        let fetches: Vec<_> = self
            .session()?
            .uid_fetch(&set, "(UID INTERNALDATE BODY.PEEK[HEADER])")
            .await
            .map_err(|e| MailboxError::connection("header fetch failed", e))?
            .try_collect()
            .await
            .map_err(|e| MailboxError::connection("header fetch interrupted", e))?;

        let mut by_uid = HashMap::with_capacity(fetches.len());
        for fetch in &fetches {
            let Some(uid) = fetch.uid else {
                // Unsolicited FETCH responses (flag changes and the like)
                continue;
            };
            let internal_date = fetch.internal_date();
            let metadata = match fetch.header() {
                Some(raw) => parse_header_block(raw, internal_date),
                None => MessageMetadata {
                    sender: String::new(),
                    subject: String::new(),
                    received_at: internal_date,
                },
            };
            by_uid.insert(uid, metadata);
        }

        // Keep the batch order; the server may answer in any order
        let mut messages = Vec::with_capacity(batch.len());
        for handle in batch {
            match by_uid.remove(&handle.0) {
                Some(metadata) => messages.push(FetchedMessage {
                    handle: *handle,
                    metadata,
                }),
                None => warn!("UID {} disappeared before its headers were fetched", handle),
            }
        }

        Ok(messages)
    }

    async fn delete(&mut self, handle: MessageHandle) -> Result<(), MailboxError> {
        let _updates: Vec<_> = self
            .session()?
            .uid_store(handle.to_string(), "+FLAGS.SILENT (\\Deleted)")
            .await
            .map_err(|e| MailboxError::connection("store failed", e))?
            .try_collect()
            .await
            .map_err(|e| MailboxError::connection("store interrupted", e))?;

        debug!("UID {} flagged as deleted", handle);
        Ok(())
    }

    async fn expunge(&mut self) -> Result<(), MailboxError> {
        info!("Expunging deleted messages");
        let removed: Vec<_> = self
            .session()?
            .expunge()
            .await
            .map_err(|e| MailboxError::connection("expunge failed", e))?
            .try_collect()
            .await
            .map_err(|e| MailboxError::connection("expunge interrupted", e))?;

        debug!("Server expunged {} message(s)", removed.len());
        Ok(())
    }

    async fn logout(&mut self) -> Result<(), MailboxError> {
        let Some(mut session) = self.session.take() else {
            return Ok(());
        };

        info!("Logging out from the IMAP server");
        session
            .logout()
            .await
            .map_err(|e| MailboxError::connection("logout failed", e))
    }
}
