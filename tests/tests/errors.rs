//! Rejected commands and failed updates.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tabula_core::vocab::classes;
use tabula_core::{GraphError, GraphResult, StatementId};
use tabula_graph::ports::{CreateResourceCommand, CreateStatementCommand, StatementUseCases};
use tabula_graph::InMemoryGraph;
use tabula_tests::prelude::*;

mod validation {
    use super::*;

    #[test]
    fn test_row_longer_than_header_is_rejected() -> ScenarioResult<()> {
        let harness = Harness::new();
        let id = harness.seed(&TableFixture::from_grid("t", &[&["a", "b"], &["x", "y"]]))?;
        let mut command = restate(&harness.read(&id)?, harness.contributor_id());
        if let Some(rows) = command.rows.as_mut() {
            rows[1].data.push(None);
        }

        harness.step(
            "too-many",
            Assertion::new()
                .error(TableError::too_many_row_values(1, 2))
                .untouched(),
            |s| s.update(command),
        )?;
        Ok(())
    }

    #[test]
    fn test_row_shorter_than_header_is_rejected() -> ScenarioResult<()> {
        let harness = Harness::new();
        let command = TableFixture::from_grid("t", &[&["a", "b"], &["x", "y"], &["z"]])
            .create_command(harness.contributor_id());

        harness.step(
            "too-few",
            Assertion::new().error(TableError::missing_row_values(2, 2)),
            |s| s.create(command),
        )?;
        Ok(())
    }

    #[test]
    fn test_empty_rows_are_rejected() -> ScenarioResult<()> {
        let harness = Harness::new();
        let command = CreateTableCommand::new(harness.contributor_id(), "t");

        harness.step(
            "no-rows",
            Assertion::new().error(TableError::MissingTableRows),
            |s| s.create(command),
        )?;
        Ok(())
    }

    #[test]
    fn test_header_must_be_a_literal() -> ScenarioResult<()> {
        let harness = Harness::new();
        let command = CreateTableCommand::new(harness.contributor_id(), "t")
            .with_things(ThingDefinitions::new().with_resource("#r", "not a title", &[]))
            .with_rows(vec![RowDefinition::of(&["#r"])]);

        harness.step(
            "resource-header",
            Assertion::new().error(TableError::header_must_be_literal(0)),
            |s| s.create(command),
        )?;
        Ok(())
    }

    #[test]
    fn test_temp_id_without_prefix_is_rejected() -> ScenarioResult<()> {
        let harness = Harness::new();
        let command = CreateTableCommand::new(harness.contributor_id(), "t")
            .with_things(ThingDefinitions::new().with_string("title", "a"))
            .with_rows(vec![RowDefinition::of(&["title"])]);

        harness.step(
            "bad-temp-id",
            Assertion::new().error(TableError::InvalidTempId("title".to_string())),
            |s| s.create(command),
        )?;
        Ok(())
    }

    #[test]
    fn test_temp_id_declared_twice_is_rejected() -> ScenarioResult<()> {
        let harness = Harness::new();
        let command = CreateTableCommand::new(harness.contributor_id(), "t")
            .with_things(
                ThingDefinitions::new()
                    .with_string("#a", "a")
                    .with_resource("#a", "also a", &[]),
            )
            .with_rows(vec![RowDefinition::of(&["#a"])]);

        harness.step(
            "duplicate-temp-id",
            Assertion::new().error(TableError::DuplicateTempIds(BTreeMap::from([(
                "#a".to_string(),
                2,
            )]))),
            |s| s.create(command),
        )?;
        Ok(())
    }

    #[test]
    fn test_unknown_cell_reference_is_rejected() -> ScenarioResult<()> {
        let harness = Harness::new();
        let id = harness.seed(&TableFixture::from_grid("t", &[&["a"], &["x"]]))?;
        let command =
            restate(&harness.read(&id)?, harness.contributor_id()).set_cell(1, 0, Some("R404"));

        harness.step(
            "unknown-thing",
            Assertion::new().error_pattern(r#"^Thing "R404" not found"#),
            |s| s.update(command),
        )?;
        Ok(())
    }
}

mod state {
    use super::*;

    #[test]
    fn test_missing_table_is_not_found() -> ScenarioResult<()> {
        let harness = Harness::new();
        let missing = ThingId::new("R404");

        harness.step(
            "missing",
            Assertion::new().error(TableError::TableNotFound(missing.clone())),
            |s| s.update(UpdateTableCommand::new(missing.clone(), harness.contributor_id())),
        )?;
        Ok(())
    }

    #[test]
    fn test_system_table_is_not_modifiable() -> ScenarioResult<()> {
        let harness = Harness::new();
        let id = harness
            .graph()
            .insert_resource(
                CreateResourceCommand::new(ContributorId::unknown(), "system")
                    .with_class(classes::TABLE)
                    .with_modifiable(false),
            )
            .map_err(|e| ScenarioError::setup(e.to_string()))?;

        harness.step(
            "read-only",
            Assertion::new()
                .error(TableError::TableNotModifiable(id.clone()))
                .untouched(),
            |s| {
                s.update(
                    UpdateTableCommand::new(id.clone(), harness.contributor_id()).with_label("x"),
                )
            },
        )?;
        Ok(())
    }
}

/// Creates statements normally but refuses to delete any.
struct UndeletableStatements {
    graph: Arc<InMemoryGraph>,
}

impl StatementUseCases for UndeletableStatements {
    fn create_statement(&self, command: CreateStatementCommand) -> GraphResult<StatementId> {
        self.graph.create_statement(command)
    }

    fn delete_statements(&self, _ids: &BTreeSet<StatementId>) -> GraphResult<()> {
        Err(GraphError::InvalidOperation("statements are read-only".to_string()))
    }
}

mod rollback {
    use super::*;

    #[test]
    fn test_failed_update_leaves_the_table_unchanged() -> ScenarioResult<()> {
        let graph = Arc::new(InMemoryGraph::new());
        let statements = Arc::new(UndeletableStatements {
            graph: graph.clone(),
        });
        let harness = Harness::with_ports(
            graph,
            |mut ports| {
                ports.statements = statements;
                ports
            },
            TableConfig::default(),
        );
        let fixture = TableFixture::from_grid("t", &[&["a", "b"], &["x", "y"]]);
        let id = harness.seed(&fixture)?;
        let command = restate(&harness.read(&id)?, harness.contributor_id())
            .with_things(ThingDefinitions::new().with_string("#z", "z"))
            .set_cell(1, 1, Some("#z"));

        // the new value is linked before the old link fails to go
        harness.step(
            "failing-delete",
            Assertion::new().error_pattern("read-only").untouched(),
            |s| s.update(command),
        )?;

        assert_eq!(TableFixture::from_table(&harness.read(&id)?), fixture);
        Ok(())
    }
}
