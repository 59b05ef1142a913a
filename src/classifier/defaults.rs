//! Built-in rule lists used when no rules file is configured.

use super::rules::KeywordField;

/// Subject patterns, most specific first so that reports name the precise rule
pub const SUBJECT_PATTERNS: &[&str] = &[
    r"newsletter",
    r"unsubscribe",
    r"promotional",
    r"marketing",
    r"advertisement",
    r"promo",
    r"survey",
    r"feedback",
    r"linkedin.*invitation",
    r"(facebook|twitter|instagram).*notification",
    r"social.*notification",
    r"system.*notification",
    r"notification",
    r"alert.*account",
    r"security.*alert",
    r"backup.*complete",
    r"automated.*message",
    r"digest",
    r"weekly.*update",
    r"monthly.*report",
    r"spam",
];

pub const KEYWORDS: &[(&str, KeywordField)] = &[
    // Bulk-mail platforms and throwaway sender domains
    ("newsletters.com", KeywordField::SenderDomain),
    ("marketing.com", KeywordField::SenderDomain),
    ("promo.com", KeywordField::SenderDomain),
    ("noreply.com", KeywordField::SenderDomain),
    ("notifications.com", KeywordField::SenderDomain),
    ("alerts.com", KeywordField::SenderDomain),
    ("survey.com", KeywordField::SenderDomain),
    ("feedback.com", KeywordField::SenderDomain),
    ("mailchimp.com", KeywordField::SenderDomain),
    ("constantcontact.com", KeywordField::SenderDomain),
    ("sendgrid.net", KeywordField::SenderDomain),
    ("mailgun.org", KeywordField::SenderDomain),
    // Role and no-reply mailboxes
    ("noreply", KeywordField::SenderLocal),
    ("no-reply", KeywordField::SenderLocal),
    ("donotreply", KeywordField::SenderLocal),
    ("newsletter", KeywordField::SenderLocal),
    ("marketing", KeywordField::SenderLocal),
    ("promo", KeywordField::SenderLocal),
    ("deals", KeywordField::SenderLocal),
    ("offers", KeywordField::SenderLocal),
    ("notifications", KeywordField::SenderLocal),
    ("updates", KeywordField::SenderLocal),
    ("support", KeywordField::SenderLocal),
    ("team", KeywordField::SenderLocal),
    ("hello", KeywordField::SenderLocal),
    ("info", KeywordField::SenderLocal),
    // Promotional wording
    ("sale", KeywordField::Subject),
    ("discount", KeywordField::Subject),
    ("offer", KeywordField::Subject),
    ("deal", KeywordField::Subject),
    ("coupon", KeywordField::Subject),
    ("% off", KeywordField::Subject),
    ("free shipping", KeywordField::Subject),
];
