//! Identity sequence reconciliation after explicit-id inserts.
//!
//! Rows are loaded with their legacy ids, which leaves the backing sequence
//! pointing below MAX(id); the next natural insert would collide. Hosted
//! Postgres roles do not always own the sequences, so when setval is denied
//! the statement is surfaced for a privileged operator instead of failing
//! the unit.

use tracing::{info, warn};

use crate::error::Result;
use crate::report::SequenceOutcome;
use crate::target::TargetStore;

pub struct SequenceReconciler<'a> {
    target: &'a dyn TargetStore,
}

impl<'a> SequenceReconciler<'a> {
    pub fn new(target: &'a dyn TargetStore) -> Self {
        SequenceReconciler { target }
    }

    /// Align the sequence behind `table.column` with the loaded data.
    pub async fn reconcile(&self, table: &str, column: &str) -> Result<SequenceOutcome> {
        let max = self.target.max_value(table, column).await?;
        let next = max + 1;

        match self.target.set_sequence(table, column, next).await {
            Ok(()) => {
                info!(table, column, next, "sequence reconciled");
                Ok(SequenceOutcome::Applied { next_value: next })
            }
            Err(e) if e.is_run_fatal() => Err(e),
            Err(e) => {
                let statement = format!(
                    "SELECT setval(pg_get_serial_sequence('{}', '{}'), {}, false);",
                    table, column, next
                );
                warn!(
                    table,
                    column,
                    error = %e,
                    "setval denied, run manually: {}",
                    statement
                );
                Ok(SequenceOutcome::Reported { statement })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockTarget;
    use crate::value::SqlValue;

    #[tokio::test]
    async fn applies_max_plus_one() {
        let target = MockTarget::new();
        target.seed_reference(
            "socios",
            vec![
                (vec![SqlValue::I32(1)], SqlValue::I32(1)),
                (vec![SqlValue::I32(41)], SqlValue::I32(41)),
            ],
        );

        let outcome = SequenceReconciler::new(&target)
            .reconcile("socios", "id")
            .await
            .unwrap();
        match outcome {
            SequenceOutcome::Applied { next_value } => assert_eq!(next_value, 42),
            other => panic!("expected Applied, got {:?}", other),
        }
        assert_eq!(target.sequence("socios"), Some(42));
    }

    #[tokio::test]
    async fn denied_setval_reports_the_statement() {
        let target = MockTarget::new();
        target.seed_reference("socios", vec![(vec![SqlValue::I32(7)], SqlValue::I32(7))]);
        target.deny_set_sequence("socios");

        let outcome = SequenceReconciler::new(&target)
            .reconcile("socios", "id")
            .await
            .unwrap();
        match outcome {
            SequenceOutcome::Reported { statement } => {
                assert!(statement.contains("pg_get_serial_sequence('socios', 'id')"));
                assert!(statement.contains("8, false"));
            }
            other => panic!("expected Reported, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_table_restarts_at_one() {
        let target = MockTarget::new();
        target.seed_reference("socios", vec![]);

        let outcome = SequenceReconciler::new(&target)
            .reconcile("socios", "id")
            .await
            .unwrap();
        match outcome {
            SequenceOutcome::Applied { next_value } => assert_eq!(next_value, 1),
            other => panic!("expected Applied, got {:?}", other),
        }
    }
}
