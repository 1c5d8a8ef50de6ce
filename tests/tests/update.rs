//! Table update scenarios.
//!
//! Every update restates the table by id and edits only what the scenario
//! changes, so anything beyond the edit must leave the graph untouched.

use proptest::prelude::*;
use tabula_tests::prelude::*;

fn people() -> TableFixture {
    TableFixture::new("People")
        .header(&["name", "age"])
        .row(&["Alice", "30"])
        .row(&["Bob", "25"])
        .row(&["Carol", "41"])
}

mod unchanged {
    use super::*;

    #[test]
    fn test_update_without_rows_touches_nothing() -> ScenarioResult<()> {
        let harness = Harness::new();
        let id = harness.seed(&people())?;

        harness.step("no-op", Assertion::new().untouched(), |s| {
            s.update(UpdateTableCommand::new(id.clone(), harness.contributor_id()))
        })?;
        Ok(())
    }

    #[test]
    fn test_restating_the_table_touches_nothing() -> ScenarioResult<()> {
        let harness = Harness::new();
        let id = harness.seed(&people())?;
        let command = restate(&harness.read(&id)?, harness.contributor_id());

        harness.step("restate", Assertion::new().untouched(), |s| s.update(command))?;
        Ok(())
    }
}

mod values {
    use super::*;

    #[test]
    fn test_changing_one_value_relinks_one_cell() -> ScenarioResult<()> {
        let harness = Harness::new();
        let id = harness.seed(&people())?;
        let before = harness.cell_ids(&id);
        let command = restate(&harness.read(&id)?, harness.contributor_id())
            .with_things(ThingDefinitions::new().with_string("#age", "31"))
            .set_cell(1, 1, Some("#age"));

        harness.step(
            "change-age",
            Assertion::new()
                .resources_created(0)
                .resources_deleted(0)
                .literals_created(1)
                .statements_created(1)
                .statements_deleted(1)
                .delete_batches(1)
                .total(3),
            |s| s.update(command),
        )?;

        let table = harness.read(&id)?;
        assert_eq!(table.data_rows()[0].data_labels(), vec![Some("Alice"), Some("31")]);
        assert_eq!(harness.cell_ids(&id), before);
        Ok(())
    }

    #[test]
    fn test_clearing_a_value_keeps_the_cell() -> ScenarioResult<()> {
        let harness = Harness::new();
        let id = harness.seed(&people())?;
        let before = harness.cell_ids(&id);
        let command = restate(&harness.read(&id)?, harness.contributor_id()).set_cell(2, 0, None);

        harness.step(
            "clear",
            Assertion::new()
                .resources_deleted(0)
                .statements_deleted(1)
                .statements_created(0),
            |s| s.update(command),
        )?;

        assert_eq!(harness.read(&id)?.data_rows()[1].data_labels(), vec![None, Some("25")]);
        assert_eq!(harness.cell_ids(&id), before);
        Ok(())
    }

    #[test]
    fn test_filling_an_empty_slot_creates_a_cell() -> ScenarioResult<()> {
        let harness = Harness::new();
        let id = harness.seed(&TableFixture::from_grid("t", &[&["a", "b"], &["x", ""]]))?;
        let command = restate(&harness.read(&id)?, harness.contributor_id())
            .with_things(ThingDefinitions::new().with_string("#y", "y"))
            .set_cell(1, 1, Some("#y"));

        harness.step(
            "fill",
            Assertion::new().resources_created(1).statements_deleted(0),
            |s| s.update(command),
        )?;

        assert_eq!(harness.read(&id)?.data_rows()[0].data_labels(), vec![Some("x"), Some("y")]);
        Ok(())
    }
}

mod rows {
    use super::*;

    #[test]
    fn test_removing_trailing_rows_keeps_remaining_cells() -> ScenarioResult<()> {
        let harness = Harness::new();
        let id = harness.seed(&people())?;
        let before = harness.cell_ids(&id);
        let command = restate(&harness.read(&id)?, harness.contributor_id()).keep_rows(1);

        // 2 rows and their 4 cells
        harness.step(
            "shrink",
            Assertion::new()
                .resources_created(0)
                .resources_deleted(6)
                .delete_batches(1),
            |s| s.update(command),
        )?;

        assert_eq!(harness.cell_ids(&id), before[..1].to_vec());
        assert_eq!(
            TableFixture::from_table(&harness.read(&id)?),
            TableFixture::from_grid("People", &[&["name", "age"], &["Alice", "30"]])
        );
        Ok(())
    }

    #[test]
    fn test_appending_rows() -> ScenarioResult<()> {
        let harness = Harness::new();
        let id = harness.seed(&people())?;
        let mut command = restate(&harness.read(&id)?, harness.contributor_id())
            .with_things(ThingDefinitions::new().with_string("#dave", "Dave"));
        if let Some(rows) = command.rows.as_mut() {
            rows.push(RowDefinition::new(Some("new"), vec![Some("#dave"), None]));
        }

        harness.step(
            "append",
            Assertion::new().resources_created(2).resources_deleted(0),
            |s| s.update(command),
        )?;

        let table = harness.read(&id)?;
        assert_eq!(table.data_rows().len(), 4);
        assert_eq!(table.data_rows()[3].label.as_deref(), Some("new"));
        assert_eq!(table.data_rows()[3].data_labels(), vec![Some("Dave"), None]);
        Ok(())
    }

    #[test]
    fn test_relabelling_a_row_updates_the_label_in_place() -> ScenarioResult<()> {
        let harness = Harness::new();
        let fixture = TableFixture::new("t").header(&["a"]).labelled_row("first", &["x"]);
        let id = harness.seed(&fixture)?;
        let command =
            restate(&harness.read(&id)?, harness.contributor_id()).set_label(1, Some("second"));

        harness.step(
            "relabel",
            Assertion::new().literals_updated(1).total(1),
            |s| s.update(command),
        )?;

        assert_eq!(harness.read(&id)?.data_rows()[0].label.as_deref(), Some("second"));
        Ok(())
    }

    #[test]
    fn test_removing_a_row_label() -> ScenarioResult<()> {
        let harness = Harness::new();
        let fixture = TableFixture::new("t").header(&["a"]).labelled_row("first", &["x"]);
        let id = harness.seed(&fixture)?;
        let command = restate(&harness.read(&id)?, harness.contributor_id()).set_label(1, None);

        harness.step(
            "unlabel",
            Assertion::new().statements_deleted(1).statements_created(0),
            |s| s.update(command),
        )?;

        assert_eq!(harness.read(&id)?.data_rows()[0].label, None);
        Ok(())
    }
}

mod columns {
    use super::*;

    #[test]
    fn test_adding_a_column() -> ScenarioResult<()> {
        let harness = Harness::new();
        let id = harness.seed(&TableFixture::from_grid("t", &[&["a"], &["x"]]))?;
        let mut command = restate(&harness.read(&id)?, harness.contributor_id())
            .with_things(ThingDefinitions::new().with_string("#b", "b").with_string("#y", "y"));
        if let Some(rows) = command.rows.as_mut() {
            rows[0].data.push(Some("#b".to_string()));
            rows[1].data.push(Some("#y".to_string()));
        }

        // column and data cell
        harness.step(
            "grow",
            Assertion::new().resources_created(2).resources_deleted(0),
            |s| s.update(command),
        )?;

        assert_eq!(
            TableFixture::from_table(&harness.read(&id)?),
            TableFixture::from_grid("t", &[&["a", "b"], &["x", "y"]])
        );
        Ok(())
    }

    #[test]
    fn test_removing_a_column() -> ScenarioResult<()> {
        let harness = Harness::new();
        let id = harness.seed(&TableFixture::from_grid("t", &[&["a", "b"], &["x", "y"]]))?;
        let command = restate(&harness.read(&id)?, harness.contributor_id()).keep_columns(1);

        harness.step(
            "shrink",
            Assertion::new().resources_created(0).resources_deleted(2),
            |s| s.update(command),
        )?;

        assert_eq!(harness.structure(&id).columns.len(), 1);
        assert_eq!(
            TableFixture::from_table(&harness.read(&id)?),
            TableFixture::from_grid("t", &[&["a"], &["x"]])
        );
        Ok(())
    }

    #[test]
    fn test_renaming_a_column() -> ScenarioResult<()> {
        let harness = Harness::new();
        let id = harness.seed(&TableFixture::from_grid("t", &[&["a"], &["x"]]))?;
        let before = harness.cell_ids(&id);
        let command = restate(&harness.read(&id)?, harness.contributor_id())
            .with_things(ThingDefinitions::new().with_string("#title", "renamed"))
            .set_cell(0, 0, Some("#title"));

        harness.step(
            "rename",
            Assertion::new().resources_created(0).resources_deleted(0),
            |s| s.update(command),
        )?;

        assert_eq!(harness.read(&id)?.header().data_labels(), vec![Some("renamed")]);
        assert_eq!(harness.cell_ids(&id), before);
        Ok(())
    }
}

mod metadata {
    use super::*;

    #[test]
    fn test_label_only_update() -> ScenarioResult<()> {
        let harness = Harness::new();
        let id = harness.seed(&people())?;

        harness.step(
            "rename",
            Assertion::new().resources_updated(1).total(1),
            |s| {
                s.update(
                    UpdateTableCommand::new(id.clone(), harness.contributor_id())
                        .with_label("Staff"),
                )
            },
        )?;

        let table = harness.read(&id)?;
        assert_eq!(table.label, "Staff");
        assert_eq!(table.data_rows().len(), 3);
        Ok(())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn test_any_single_edit_keeps_other_values(row in 1usize..4, slot in 0usize..2) {
        let harness = Harness::new();
        let id = harness.seed(&people()).unwrap();
        let command = restate(&harness.read(&id).unwrap(), harness.contributor_id())
            .with_things(ThingDefinitions::new().with_string("#new", "edited"))
            .set_cell(row, slot, Some("#new"));

        harness.step("edit", Assertion::new().resources_created(0).delete_batches(1), |s| {
            s.update(command)
        }).unwrap();

        let mut expected = TableFixture::from_table(&harness.read(&id).unwrap());
        expected.rows[row - 1].1[slot] = people().rows[row - 1].1[slot].clone();
        prop_assert_eq!(expected, people());
    }
}
