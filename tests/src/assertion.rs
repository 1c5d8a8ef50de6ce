//! Assertion types and builders for verifying step results.

use tabula_graph::{MutationEntry, MutationRecord};
use tabula_tables::TableError;

use crate::error::{ScenarioError, ScenarioResult};

/// Mutation counts of one step, taken from the journal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationSummary {
    pub resources_created: usize,
    pub resources_updated: usize,
    pub resources_deleted: usize,
    pub literals_created: usize,
    pub literals_updated: usize,
    pub statements_created: usize,
    /// Number of statements deleted, across every batch.
    pub statements_deleted: usize,
    /// Number of delete calls.
    pub delete_batches: usize,
    pub total: usize,
}

impl MutationSummary {
    pub fn of(records: &[MutationRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };
        for record in records {
            match &record.entry {
                MutationEntry::CreateResource { .. } => summary.resources_created += 1,
                MutationEntry::UpdateResource { .. } => summary.resources_updated += 1,
                MutationEntry::DeleteResource { .. } => summary.resources_deleted += 1,
                MutationEntry::CreateLiteral { .. } => summary.literals_created += 1,
                MutationEntry::UpdateLiteral { .. } => summary.literals_updated += 1,
                MutationEntry::CreateStatement { .. } => summary.statements_created += 1,
                MutationEntry::DeleteStatements { ids } => {
                    summary.delete_batches += 1;
                    summary.statements_deleted += ids.len();
                }
                MutationEntry::CreatePredicate { .. } | MutationEntry::CreateClass { .. } => {}
            }
        }
        summary
    }
}

/// Expected outcome of a step.
#[derive(Debug, Default)]
pub struct Assertion {
    pub resources_created: Option<usize>,
    pub resources_updated: Option<usize>,
    pub resources_deleted: Option<usize>,
    pub literals_created: Option<usize>,
    pub literals_updated: Option<usize>,
    pub statements_created: Option<usize>,
    pub statements_deleted: Option<usize>,
    pub delete_batches: Option<usize>,
    pub total: Option<usize>,

    pub error: Option<TableError>,
    pub error_pattern: Option<String>,
}

impl Assertion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect the step to issue no mutation at all.
    pub fn untouched(self) -> Self {
        self.total(0)
    }

    pub fn total(mut self, n: usize) -> Self {
        self.total = Some(n);
        self
    }

    pub fn resources_created(mut self, n: usize) -> Self {
        self.resources_created = Some(n);
        self
    }

    pub fn resources_updated(mut self, n: usize) -> Self {
        self.resources_updated = Some(n);
        self
    }

    pub fn resources_deleted(mut self, n: usize) -> Self {
        self.resources_deleted = Some(n);
        self
    }

    pub fn literals_created(mut self, n: usize) -> Self {
        self.literals_created = Some(n);
        self
    }

    pub fn literals_updated(mut self, n: usize) -> Self {
        self.literals_updated = Some(n);
        self
    }

    pub fn statements_created(mut self, n: usize) -> Self {
        self.statements_created = Some(n);
        self
    }

    pub fn statements_deleted(mut self, n: usize) -> Self {
        self.statements_deleted = Some(n);
        self
    }

    pub fn delete_batches(mut self, n: usize) -> Self {
        self.delete_batches = Some(n);
        self
    }

    /// Expect the step to fail with exactly this error.
    pub fn error(mut self, error: TableError) -> Self {
        self.error = Some(error);
        self
    }

    /// Expect the step to fail with a message matching a regex.
    pub fn error_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.error_pattern = Some(pattern.into());
        self
    }

    /// Verify the assertion against a step result and its mutations.
    ///
    /// Counts are checked for failed steps too; a failed step run in a
    /// transaction leaves none.
    pub fn verify<T>(
        &self,
        step: &str,
        result: &Result<T, TableError>,
        summary: &MutationSummary,
    ) -> ScenarioResult<()> {
        self.verify_outcome(step, result)?;

        let checks = [
            ("total mutations", self.total, summary.total),
            ("resources created", self.resources_created, summary.resources_created),
            ("resources updated", self.resources_updated, summary.resources_updated),
            ("resources deleted", self.resources_deleted, summary.resources_deleted),
            ("literals created", self.literals_created, summary.literals_created),
            ("literals updated", self.literals_updated, summary.literals_updated),
            ("statements created", self.statements_created, summary.statements_created),
            ("statements deleted", self.statements_deleted, summary.statements_deleted),
            ("delete batches", self.delete_batches, summary.delete_batches),
        ];
        for (what, expected, actual) in checks {
            if let Some(expected) = expected {
                if expected != actual {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected {} {}, got {}", expected, what, actual),
                    ));
                }
            }
        }
        Ok(())
    }

    fn verify_outcome<T>(&self, step: &str, result: &Result<T, TableError>) -> ScenarioResult<()> {
        if let Some(expected) = &self.error {
            return match result {
                Err(actual) if actual == expected => Ok(()),
                Err(actual) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error {:?}, got {:?}", expected, actual),
                )),
                Ok(_) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error {:?}, but step succeeded", expected),
                )),
            };
        }

        if let Some(pattern) = &self.error_pattern {
            let re = regex_lite::Regex::new(pattern).map_err(|e| {
                ScenarioError::assertion_failed(step, format!("invalid regex pattern: {}", e))
            })?;
            return match result {
                Err(actual) if re.is_match(&actual.to_string()) => Ok(()),
                Err(actual) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error matching '{}', got: {}", pattern, actual),
                )),
                Ok(_) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error matching '{}', but step succeeded", pattern),
                )),
            };
        }

        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(ScenarioError::step_failed(step, e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tabula_core::{StatementId, ThingId};

    fn record(lsn: u64, entry: MutationEntry) -> MutationRecord {
        MutationRecord { lsn, entry }
    }

    #[test]
    fn test_summary_counts_deleted_statements() {
        let records = vec![
            record(1, MutationEntry::CreateStatement {
                id: StatementId::new("S1"),
                subject: ThingId::new("R1"),
                predicate: ThingId::new("P1"),
                object: ThingId::new("L1"),
            }),
            record(2, MutationEntry::DeleteStatements {
                ids: BTreeSet::from([StatementId::new("S2"), StatementId::new("S3")]),
            }),
        ];

        let summary = MutationSummary::of(&records);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.statements_created, 1);
        assert_eq!(summary.statements_deleted, 2);
        assert_eq!(summary.delete_batches, 1);
    }

    #[test]
    fn test_count_mismatch_fails() {
        let summary = MutationSummary {
            total: 3,
            ..MutationSummary::default()
        };

        let result =
            Assertion::new().untouched().verify("step", &Ok::<(), TableError>(()), &summary);

        assert!(matches!(result, Err(ScenarioError::AssertionFailed { .. })));
    }

    #[test]
    fn test_expected_error_matches() {
        let result: Result<(), TableError> = Err(TableError::MissingTableRows);

        assert!(Assertion::new()
            .error(TableError::MissingTableRows)
            .verify("step", &result, &MutationSummary::default())
            .is_ok());
        assert!(Assertion::new()
            .error_pattern("^Missing table rows")
            .verify("step", &result, &MutationSummary::default())
            .is_ok());
    }
}
