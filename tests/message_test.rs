use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

use mailsweep::config::{parse_batch_size, parse_cutoff_date};
use mailsweep::email::{MessageHandle, MessageMetadata};
use mailsweep::error::MailboxError;
use mailsweep::imap_client::{login_error, parse_header_block, search_query, uid_set};
use mailsweep::session::confirm::is_affirmative;

#[test]
fn test_sender_parts() {
    let message = MessageMetadata::new("\"Shop Team\" <Deals@News.Shop.example>", "Hi");

    assert_eq!(message.sender_address(), "deals@news.shop.example");
    assert_eq!(message.sender_local_part(), "deals");
    assert_eq!(message.sender_domain(), "news.shop.example");

    let bare = MessageMetadata::new("alerts", "Hi");
    assert_eq!(bare.sender_local_part(), "alerts");
    assert_eq!(bare.sender_domain(), "");
}

#[test]
fn test_short_subject() {
    let long = MessageMetadata::new("a@b.example", "é".repeat(60));
    let short = long.short_subject(50);
    assert_eq!(short.chars().count(), 53);
    assert!(short.ends_with("..."));

    assert_eq!(MessageMetadata::new("a@b.example", "Hello").short_subject(50), "Hello");
    assert_eq!(MessageMetadata::new("a@b.example", "  ").short_subject(50), "(no subject)");
}

#[test]
fn test_search_query_uses_imap_date_format() {
    let cutoff = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    assert_eq!(search_query(cutoff), "UNSEEN BEFORE 1-Jun-2025");
}

#[test]
fn test_uid_set() {
    assert_eq!(uid_set(&[MessageHandle(4), MessageHandle(9), MessageHandle(12)]), "4,9,12");
}

#[test]
fn test_parse_header_block_decodes_encoded_words() {
    let raw = b"From: =?UTF-8?Q?Caf=C3=A9_News?= <news@cafe.example>\r\n\
Subject: =?UTF-8?Q?Weekly_Newsletter_=E2=80=93_October?=\r\n\
Date: Fri, 14 Mar 2025 09:30:00 +0000\r\n\r\n";

    let metadata = parse_header_block(raw, None);

    assert_eq!(metadata.sender, "Café News <news@cafe.example>");
    assert_eq!(metadata.subject, "Weekly Newsletter – October");
    assert_eq!(
        metadata.received_at.map(|at| at.with_timezone(&Utc)),
        Some(Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap())
    );
}

#[test]
fn test_date_header_keeps_its_offset() {
    let raw = b"From: a@b.example\r\nSubject: Hi\r\nDate: Sat, 31 May 2025 23:30:00 -0500\r\n\r\n";

    let received = parse_header_block(raw, None).received_at.unwrap();

    assert_eq!(received.offset(), &FixedOffset::west_opt(5 * 3600).unwrap());
    assert_eq!(received.date_naive(), NaiveDate::from_ymd_opt(2025, 5, 31).unwrap());
    assert_eq!(received.with_timezone(&Utc), Utc.with_ymd_and_hms(2025, 6, 1, 4, 30, 0).unwrap());
}

#[test]
fn test_internal_date_wins_over_date_header() {
    let raw = b"From: a@b.example\r\nSubject: Hi\r\nDate: Fri, 14 Mar 2025 09:30:00 +0000\r\n\r\n";
    let internal = FixedOffset::east_opt(3600)
        .unwrap()
        .with_ymd_and_hms(2025, 3, 15, 0, 0, 0)
        .unwrap();

    let metadata = parse_header_block(raw, Some(internal));

    assert_eq!(metadata.sender, "a@b.example");
    assert_eq!(metadata.received_at, Some(internal));
}

#[test]
fn test_login_rejection_is_an_authentication_error() {
    let rejected = login_error(async_imap::error::Error::No("[AUTHENTICATIONFAILED] Invalid credentials".to_string()));
    assert!(matches!(rejected, MailboxError::Authentication(ref reason) if reason.contains("Invalid credentials")));

    let malformed = login_error(async_imap::error::Error::Bad("LOGIN expects two arguments".to_string()));
    assert!(matches!(malformed, MailboxError::Authentication(_)));
}

#[test]
fn test_login_transport_failure_is_a_connection_error() {
    let dropped = login_error(async_imap::error::Error::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionReset,
        "connection reset by peer",
    )));
    assert!(matches!(dropped, MailboxError::Connection(ref reason) if reason.contains("login failed")));

    assert!(matches!(
        login_error(async_imap::error::Error::ConnectionLost),
        MailboxError::Connection(_)
    ));
}

#[test]
fn test_affirmative_answers() {
    assert!(is_affirmative("yes"));
    assert!(is_affirmative(" YES\n"));
    assert!(!is_affirmative("y"));
    assert!(!is_affirmative("no"));
    assert!(!is_affirmative(""));
}

#[test]
fn test_config_value_parsers() {
    assert_eq!(parse_cutoff_date("2025-06-01").unwrap(), NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    assert!(parse_cutoff_date("06/01/2025").is_err());

    assert_eq!(parse_batch_size("100").unwrap(), 100);
    assert!(parse_batch_size("0").is_err());
    assert!(parse_batch_size("-3").is_err());
}
