//! The validate and execute flows.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};
use tracing::{info, warn};

use crate::config::ImportConfig;
use crate::error::{ImportError, ImportResult};
use crate::models::{Member, Membership, MembershipMember, MembershipRole, SkippedRow};
use crate::parsing::{ParsedRow, detect_delimiter, parse_row};
use crate::store::MemberStore;

use super::duplicates::DuplicateChecker;
use super::events::ImportEvent;
use super::report::ValidationReport;

/// Splits an upload into lines, rejecting structurally unusable files.
fn file_lines(content: &str) -> ImportResult<Vec<&str>> {
    if content.trim().is_empty() {
        return Err(ImportError::EmptyUpload);
    }

    let lines: Vec<&str> = content.lines().collect();
    if lines.len() < 2 {
        return Err(ImportError::FileTooShort { lines: lines.len() });
    }

    Ok(lines)
}

/// Parses every non-blank data line. Row numbers are file line numbers, so
/// the first data row reports as row 2.
fn parse_data_rows(lines: &[&str], config: &ImportConfig) -> Vec<ParsedRow> {
    let delimiter = detect_delimiter(lines[0]);

    lines
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_row(line, delimiter, index + 1, config))
        .collect()
}

/// Validates an uploaded file without persisting anything.
///
/// Invalid rows contribute their errors to the report; valid rows are then
/// duplicate-checked against the persisted identifier snapshot and the rows
/// accepted earlier in the same file. The returned report is always
/// complete — validate mode never produces a partial result.
pub async fn validate(
    store: &dyn MemberStore,
    config: &ImportConfig,
    content: &str,
) -> ImportResult<ValidationReport> {
    let lines = file_lines(content)?;
    let rows = parse_data_rows(&lines, config);

    let mut checker = DuplicateChecker::new(store.existing_donman_ids().await?);
    let mut report = ValidationReport {
        total_rows: rows.len(),
        ..ValidationReport::default()
    };

    for row in rows {
        if !row.is_valid {
            report.errors.extend(row.errors);
            continue;
        }

        let Some(donman_id) = row.donman_id else {
            continue;
        };

        match checker.check(donman_id) {
            Some(kind) => report.skipped.push(SkippedRow {
                donman_id,
                name: row.name,
                reason: kind.reason().to_string(),
            }),
            None => {
                checker.record(donman_id);
                report.valid_count += 1;
            }
        }
    }

    report.skipped_count = report.skipped.len();
    // One row can fail on several fields; count rows, not errors.
    let error_rows: HashSet<usize> = report.errors.iter().map(|e| e.row).collect();
    report.error_count = error_rows.len();

    info!(
        total_rows = report.total_rows,
        valid = report.valid_count,
        errors = report.error_count,
        skipped = report.skipped_count,
        "validation completed"
    );

    Ok(report)
}

struct AcceptedRow {
    member: Member,
    membership: Membership,
}

struct BatchRun {
    store: Arc<dyn MemberStore>,
    batches: VecDeque<Vec<AcceptedRow>>,
    processed: usize,
    total: usize,
    skipped: Vec<SkippedRow>,
    finished: bool,
}

fn into_batches(rows: Vec<AcceptedRow>, batch_size: usize) -> VecDeque<Vec<AcceptedRow>> {
    let size = batch_size.max(1);
    let mut batches = VecDeque::new();
    let mut rows = rows.into_iter().peekable();
    while rows.peek().is_some() {
        batches.push_back(rows.by_ref().take(size).collect());
    }
    batches
}

/// Persists one batch: members, then memberships, then the links — the links
/// need both sides' assigned ids, so the ordering is mandatory.
async fn persist_batch(store: &dyn MemberStore, batch: Vec<AcceptedRow>) -> ImportResult<usize> {
    let count = batch.len();

    let (members, memberships): (Vec<_>, Vec<_>) = batch
        .into_iter()
        .map(|row| (row.member, row.membership))
        .unzip();

    let member_ids = store.insert_members(members).await?;
    let membership_ids = store.insert_memberships(memberships).await?;

    let links = membership_ids
        .iter()
        .zip(member_ids.iter())
        .map(|(&membership_id, &member_id)| MembershipMember {
            membership_id,
            member_id,
            role: MembershipRole::Primary,
        })
        .collect();
    store.insert_links(links).await?;

    Ok(count)
}

async fn next_event(mut run: BatchRun) -> Option<(ImportEvent, BatchRun)> {
    if run.finished {
        return None;
    }

    match run.batches.pop_front() {
        Some(batch) => match persist_batch(run.store.as_ref(), batch).await {
            Ok(count) => {
                run.processed += count;
                let event = ImportEvent::Progress {
                    processed: run.processed,
                    total: run.total,
                };
                Some((event, run))
            }
            Err(err) => {
                warn!(error = %err, processed = run.processed, "import aborted by storage failure");
                run.finished = true;
                let event = ImportEvent::Error {
                    message: err.to_string(),
                };
                Some((event, run))
            }
        },
        None => {
            info!(imported = run.processed, skipped = run.skipped.len(), "import completed");
            run.finished = true;
            let event = ImportEvent::Complete {
                imported: run.processed,
                skipped: std::mem::take(&mut run.skipped),
            };
            Some((event, run))
        }
    }
}

/// Executes an import: re-validates the whole file from scratch, then
/// persists accepted rows in batches, yielding events as the returned stream
/// is drained.
///
/// A prior validate call is never trusted. If any row fails validation the
/// stream yields a single `error` event and nothing is persisted. Duplicates
/// are skipped, not fatal. Batches already committed when a storage failure
/// occurs stay committed; there is no cross-batch rollback.
pub async fn execute(
    store: Arc<dyn MemberStore>,
    config: &ImportConfig,
    content: &str,
) -> ImportResult<BoxStream<'static, ImportEvent>> {
    let lines = file_lines(content)?;
    let rows = parse_data_rows(&lines, config);

    let error_rows: HashSet<usize> = rows
        .iter()
        .filter(|row| !row.is_valid)
        .map(|row| row.row_number)
        .collect();

    if !error_rows.is_empty() {
        let error_total: usize = rows.iter().map(|row| row.errors.len()).sum();
        warn!(
            rows = error_rows.len(),
            errors = error_total,
            "import rejected by validation"
        );
        let message = format!(
            "File validation failed with {error_total} error(s) across {} row(s). No rows were imported.",
            error_rows.len()
        );
        return Ok(stream::iter(vec![ImportEvent::Error { message }]).boxed());
    }

    let mut checker = DuplicateChecker::new(store.existing_donman_ids().await?);
    let mut skipped = Vec::new();
    let mut accepted = Vec::new();

    for row in rows {
        let ParsedRow {
            donman_id: Some(donman_id),
            member: Some(member),
            membership: Some(membership),
            name,
            ..
        } = row
        else {
            continue;
        };

        match checker.check(donman_id) {
            Some(kind) => skipped.push(SkippedRow {
                donman_id,
                name,
                reason: kind.reason().to_string(),
            }),
            None => {
                checker.record(donman_id);
                accepted.push(AcceptedRow { member, membership });
            }
        }
    }

    info!(
        accepted = accepted.len(),
        skipped = skipped.len(),
        batch_size = config.batch_size,
        "starting import"
    );

    let run = BatchRun {
        store,
        total: accepted.len(),
        batches: into_batches(accepted, config.batch_size),
        processed: 0,
        skipped,
        finished: false,
    };

    Ok(stream::unfold(run, next_event).boxed())
}
