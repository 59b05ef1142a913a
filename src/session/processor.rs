use chrono::NaiveDate;
use log::{debug, error, info, warn};

use crate::classifier::{Classification, RuleMatch, RuleSet};
use crate::email::{Mailbox, MessageHandle, MessageMetadata};
use crate::error::MailboxError;
use super::confirm::Confirmation;
use super::interrupt::Interrupt;
use super::progress;
use super::stats::SessionStats;

const SUBJECT_WIDTH: usize = 50;
const SAMPLE_SIZE: usize = 5;
const DELETE_PROGRESS_EVERY: usize = 100;
const SHOWN_FAILURES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Collecting,
    Summarizing,
    AwaitingConfirmation,
    Deleting,
    Done,
    Aborted,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub cutoff: NaiveDate,
    pub batch_size: usize,
    /// Classify and report only, never delete
    pub preview: bool,
    pub limit: Option<usize>,
    pub show_kept: bool,
}

/// A message classified Delete, waiting for confirmation
#[derive(Debug, Clone)]
pub struct DeletionCandidate {
    pub handle: MessageHandle,
    pub metadata: MessageMetadata,
    pub rule: RuleMatch,
}

#[derive(Debug, Clone)]
pub struct DeleteFailure {
    pub handle: MessageHandle,
    pub subject: String,
    pub reason: String,
}

/// Outcome of a session that did not hit a fatal error
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub state: SessionState,
    pub found: usize,
    pub processed: usize,
    pub to_delete: usize,
    pub kept: usize,
    pub excluded: usize,
    pub deleted: usize,
    pub failures: Vec<DeleteFailure>,
    pub expunge_error: Option<String>,
}

/// Drives one connect-to-logout cleanup run over a mailbox
pub struct CleanupSession<M: Mailbox, C: Confirmation> {
    mailbox: M,
    confirmation: C,
    rules: RuleSet,
    options: SessionOptions,
    interrupt: Interrupt,
    state: SessionState,
    stats: SessionStats,
    candidates: Vec<DeletionCandidate>,
}

impl<M: Mailbox, C: Confirmation> CleanupSession<M, C> {
    pub fn new(mailbox: M, confirmation: C, rules: RuleSet, options: SessionOptions, interrupt: Interrupt) -> Self {
        CleanupSession {
            mailbox,
            confirmation,
            rules,
            options,
            interrupt,
            state: SessionState::Collecting,
            stats: SessionStats::new(),
            candidates: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn candidates(&self) -> &[DeletionCandidate] {
        &self.candidates
    }

    pub fn mailbox(&self) -> &M {
        &self.mailbox
    }

    pub fn confirmation(&self) -> &C {
        &self.confirmation
    }

    /// Run the whole session. The mailbox is logged out on every path.
    pub async fn run(&mut self) -> Result<SessionReport, MailboxError> {
        let outcome = self.drive().await;

        if let Err(e) = self.mailbox.logout().await {
            warn!("Logout failed: {}", e);
        }

        if let Err(e) = &outcome {
            error!("Session stopped: {}", e);
        }
        outcome
    }

    fn transition(&mut self, next: SessionState) {
        debug!("Session state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    async fn drive(&mut self) -> Result<SessionReport, MailboxError> {
        self.transition(SessionState::Collecting);
        self.stats = SessionStats::new();
        self.candidates.clear();

        let mut handles = self.mailbox.search_unread_before(self.options.cutoff).await?;
        if let Some(limit) = self.options.limit {
            handles.truncate(limit);
        }
        let found = handles.len();

        if handles.is_empty() {
            println!("✅ No unread messages older than {}", self.options.cutoff.format("%B %d, %Y"));
            self.transition(SessionState::Summarizing);
            self.transition(SessionState::Done);
            return Ok(self.report(found, 0, Vec::new(), None));
        }

        self.collect(&handles).await?;

        self.transition(SessionState::Summarizing);
        let interrupted = self.interrupt.is_triggered();
        self.print_summary(found, interrupted);

        if interrupted {
            self.transition(SessionState::Aborted);
            return Ok(self.report(found, 0, Vec::new(), None));
        }

        if self.options.preview {
            println!("\n⚠️  DRY RUN MODE - No messages were deleted");
            self.transition(SessionState::Done);
            return Ok(self.report(found, 0, Vec::new(), None));
        }

        if self.candidates.is_empty() {
            println!("No messages identified for deletion.");
            self.transition(SessionState::Done);
            return Ok(self.report(found, 0, Vec::new(), None));
        }

        self.transition(SessionState::AwaitingConfirmation);
        let prompt = format!(
            "\n❗ Proceed with deletion of {} messages? (yes/no): ",
            self.candidates.len()
        );
        let confirmed = match self.confirmation.confirm(&prompt).await {
            Ok(answer) => answer && !self.interrupt.is_triggered(),
            Err(e) => {
                warn!("No usable confirmation: {:#}", e);
                false
            }
        };

        if !confirmed {
            println!("Deletion cancelled.");
            self.transition(SessionState::Aborted);
            return Ok(self.report(found, 0, Vec::new(), None));
        }

        self.transition(SessionState::Deleting);
        let (deleted, failures, completed) = self.delete_candidates().await;

        if !completed {
            println!("🛑 Deletion stopped after {} message(s); nothing expunged", deleted + failures.len());
            self.transition(SessionState::Aborted);
            return Ok(self.report(found, deleted, failures, None));
        }

        let expunge_error = if deleted > 0 {
            println!("🔥 Permanently removing deleted messages...");
            match self.mailbox.expunge().await {
                Ok(()) => None,
                Err(e) => {
                    println!("❌ Error during expunge: {}", e);
                    Some(e.to_string())
                }
            }
        } else {
            None
        };

        self.transition(SessionState::Done);
        Ok(self.report(found, deleted, failures, expunge_error))
    }

    async fn collect(&mut self, handles: &[MessageHandle]) -> Result<(), MailboxError> {
        let total = handles.len();
        let batch_size = self.options.batch_size.max(1);
        let (batch_count, _) = progress::batch_layout(total, batch_size);

        println!("\n{}", "=".repeat(70));
        println!("🚀 ANALYSIS - {} message(s) in {} batch(es)", total, batch_count);
        println!("{}", "=".repeat(70));
        println!("💡 Press Ctrl+C at any time to stop");

        for (index, batch) in handles.chunks(batch_size).enumerate() {
            if self.interrupt.is_triggered() {
                info!("Interrupt requested, stopping before batch {}", index + 1);
                break;
            }

            println!("\n📦 Processing batch {}/{} ({} messages)...", index + 1, batch_count, batch.len());

            let fetched = self.mailbox.fetch_metadata(batch).await?;
            for message in fetched {
                if !Self::is_eligible(&message.metadata, self.options.cutoff) {
                    warn!("UID {} is undated or not older than the cutoff, skipping", message.handle);
                    self.stats.exclude();
                    continue;
                }

                let classification = self.rules.classify(&message.metadata);
                self.stats.record(&classification);
                let position = self.stats.processed();

                match classification {
                    Classification::Delete(rule) => {
                        println!(
                            "  ❌ [{}] {} ({})",
                            position,
                            message.metadata.short_subject(SUBJECT_WIDTH),
                            rule
                        );
                        self.candidates.push(DeletionCandidate {
                            handle: message.handle,
                            metadata: message.metadata,
                            rule,
                        });
                    }
                    Classification::Keep => {
                        if self.options.show_kept {
                            println!(
                                "  ✅ [{}] {} (keep)",
                                position,
                                message.metadata.short_subject(SUBJECT_WIDTH)
                            );
                        }
                    }
                }
            }

            println!("{}", progress::progress_line(total, self.stats.processed(), self.stats.elapsed()));
        }

        Ok(())
    }

    /// Received strictly before the cutoff, judged on the calendar date in the
    /// message's own offset. Undated messages are never eligible.
    fn is_eligible(metadata: &MessageMetadata, cutoff: NaiveDate) -> bool {
        metadata
            .received_at
            .map(|at| at.date_naive() < cutoff)
            .unwrap_or(false)
    }

    /// Returns (deleted, failures, ran to completion)
    async fn delete_candidates(&mut self) -> (usize, Vec<DeleteFailure>, bool) {
        let total = self.candidates.len();
        println!("\n🗑️  Removing {} messages...", total);

        let mut deleted = 0;
        let mut failures = Vec::new();

        for candidate in &self.candidates {
            if self.interrupt.is_triggered() {
                return (deleted, failures, false);
            }

            match self.mailbox.delete(candidate.handle).await {
                Ok(()) => {
                    deleted += 1;
                    if deleted % DELETE_PROGRESS_EVERY == 0 {
                        println!("  ⚡ Deleted: {}/{}", deleted, total);
                    }
                }
                Err(e) => {
                    if failures.len() < SHOWN_FAILURES {
                        println!("  ❌ Failed: {} ({})", candidate.metadata.short_subject(30), e);
                    }
                    failures.push(DeleteFailure {
                        handle: candidate.handle,
                        subject: candidate.metadata.subject.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        (deleted, failures, true)
    }

    fn print_summary(&self, found: usize, interrupted: bool) {
        println!("\n{}", "=".repeat(70));
        if interrupted {
            println!("🛑 ANALYSIS STOPPED EARLY");
        } else {
            println!("✅ ANALYSIS COMPLETE");
        }
        println!("{}", "=".repeat(70));
        println!("Messages processed: {}/{}", self.stats.processed(), found);
        println!("🗑️  Identified for deletion: {}", self.stats.to_delete());
        println!("✅ To keep: {}", self.stats.kept());
        if self.stats.excluded() > 0 {
            println!("⏭️  Skipped (undated or not older than cutoff): {}", self.stats.excluded());
        }
        if interrupted {
            println!(
                "⏳ Remaining: {}",
                found.saturating_sub(self.stats.processed() + self.stats.excluded())
            );
        }

        if self.candidates.is_empty() {
            return;
        }

        println!("\n📋 Sample messages identified for deletion:");
        for (i, candidate) in self.candidates.iter().take(SAMPLE_SIZE).enumerate() {
            println!("  {}. {}", i + 1, candidate.metadata.short_subject(60));
            println!("      From: {}", candidate.metadata.sender);
            println!("      Rule: {}", candidate.rule);
        }
        if self.candidates.len() > SAMPLE_SIZE {
            println!("  ... and {} more", self.candidates.len() - SAMPLE_SIZE);
        }
    }

    fn report(
        &self,
        found: usize,
        deleted: usize,
        failures: Vec<DeleteFailure>,
        expunge_error: Option<String>,
    ) -> SessionReport {
        SessionReport {
            state: self.state,
            found,
            processed: self.stats.processed(),
            to_delete: self.stats.to_delete(),
            kept: self.stats.kept(),
            excluded: self.stats.excluded(),
            deleted,
            failures,
            expunge_error,
        }
    }
}
