use std::path::{Path, PathBuf};

use jiff::{SignedDuration, Timestamp};
use moodminder_core::keys;
use moodminder_core::models::analysis::AnalysisResult;
use moodminder_core::models::record::{AssessmentRecord, MoodStatus};

use crate::error::StorageError;
use crate::objects;

/// Lookback used when callers don't ask for a specific window.
pub const DEFAULT_HISTORY_DAYS: u32 = 30;

/// Append-only store of a user's assessments.
///
/// Records are never rewritten. A user's history is the set of record
/// objects under their prefix, ordered by the timestamp encoded in each key.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    root: PathBuf,
}

impl HistoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist one assessment for `user`.
    pub fn append(
        &self,
        user: &str,
        analysis: &AnalysisResult,
    ) -> Result<AssessmentRecord, StorageError> {
        let record = AssessmentRecord::new(user, analysis.clone());
        let key = keys::record(user, record.created_at, record.id);
        let body = serde_json::to_vec_pretty(&record)?;
        objects::put_object(&self.root, &key, &body)?;

        tracing::debug!(
            key = %key,
            band = %record.analysis.mood_category,
            "assessment saved"
        );
        Ok(record)
    }

    /// Records created in `[since, until]`, newest first. Either bound may be
    /// left open.
    pub fn history(
        &self,
        user: &str,
        since: Option<Timestamp>,
        until: Option<Timestamp>,
    ) -> Result<Vec<AssessmentRecord>, StorageError> {
        let since = since.map(|t| t.as_millisecond());
        let until = until.map(|t| t.as_millisecond());

        let mut records = Vec::new();
        for (millis, key) in self.record_keys(user)? {
            if since.is_some_and(|s| millis < s) || until.is_some_and(|u| millis > u) {
                continue;
            }
            if let Some(record) = self.read_owned(user, &key)? {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Records from the last `days` days, newest first.
    pub fn recent(&self, user: &str, days: u32) -> Result<Vec<AssessmentRecord>, StorageError> {
        let window = SignedDuration::from_hours(i64::from(days) * 24);
        let since = Timestamp::now()
            .checked_sub(window)
            .unwrap_or(Timestamp::MIN);
        self.history(user, Some(since), None)
    }

    /// The user's current mood, from their most recent assessment.
    pub fn latest(&self, user: &str) -> Result<Option<MoodStatus>, StorageError> {
        for (_, key) in self.record_keys(user)? {
            if let Some(record) = self.read_owned(user, &key)? {
                return Ok(Some(record.status()));
            }
        }
        Ok(None)
    }

    /// Remove every record for `user`. Returns how many were deleted.
    pub fn delete_history(&self, user: &str) -> Result<usize, StorageError> {
        let prefix = keys::user_history_prefix(user);
        let deleted = objects::delete_objects_by_prefix(&self.root, &prefix)?;
        tracing::info!(deleted, "assessment history deleted");
        Ok(deleted)
    }

    /// Record keys under the user's prefix with their timestamps, newest
    /// first.
    fn record_keys(&self, user: &str) -> Result<Vec<(i64, String)>, StorageError> {
        let prefix = keys::user_history_prefix(user);
        let mut record_keys: Vec<(i64, String)> = objects::list_objects(&self.root, &prefix)?
            .into_iter()
            .filter_map(|key| match keys::record_millis(&key) {
                Some(millis) => Some((millis, key)),
                None => {
                    tracing::debug!(key = %key, "skipping non-record object");
                    None
                }
            })
            .collect();
        record_keys.reverse();
        Ok(record_keys)
    }

    /// Read a record, dropping it if it belongs to someone else.
    fn read_owned(&self, user: &str, key: &str) -> Result<Option<AssessmentRecord>, StorageError> {
        let body = objects::get_object(&self.root, key)?;
        let record: AssessmentRecord = serde_json::from_slice(&body)?;
        if record.user != user {
            tracing::warn!(key = %key, "record owner does not match history prefix, skipping");
            return Ok(None);
        }
        Ok(Some(record))
    }
}
