mod common;

use gp_catalog::KNOWN_ISOTOPES;
use gp_query::{AxisKind, Query, QueryError, QueryKind};

use common::*;

#[test]
fn resource_end_to_end() {
    let mut q = query(single_transfer_db(), QueryKind::Resource, 0, 24);
    assert!(!q.is_executed());

    let report = q.execute().expect("execute failed");
    assert!(q.is_executed());
    assert_eq!(report.rows_read, 1);
    assert_eq!(report.rows_skipped, 0);
    assert_eq!(report.shape, vec![24, 2, 2]);

    assert_eq!(q.axis_names(), vec!["time", "from", "to"]);
    assert_eq!(q.units(), vec!["months", "agentID", "agentID"]);
    assert_eq!(q.labels()[1], &[1, 2]);
    assert_eq!(q.labels()[2], &[1, 2]);

    let idx = |id: i64| q.axes()[1].index_of(id).unwrap();
    let data = q.values();
    assert_eq!(data[[5, idx(1), idx(2)].as_slice()], 10.0);
    assert_eq!(data.sum(), 10.0);
    assert_eq!(data.iter().filter(|&&v| v != 0.0).count(), 1);
    assert_consistent(&q);
}

#[test]
fn time_axis_matches_window() {
    for (t0, tf) in [(0, 24), (5, 6), (12, 120), (7, 7)] {
        let mut q = query(single_transfer_db(), QueryKind::Resource, t0, tf);
        q.execute().unwrap();
        assert_eq!(q.values().shape()[0], (tf - t0) as usize);
        let time: Vec<i64> = (t0..tf).collect();
        assert_eq!(q.labels()[0], time.as_slice());
    }
}

#[test]
fn rows_sharing_a_coordinate_accumulate() {
    let conn = empty_db();
    add_agent(&conn, 1, 0, 1200);
    add_agent(&conn, 2, 0, 1200);
    add_transaction(&conn, 1, 3, 1, 2, 3.0);
    add_transaction(&conn, 2, 3, 1, 2, 5.0);
    let mut q = query(conn, QueryKind::Resource, 0, 12);
    q.execute().unwrap();
    assert_eq!(q.cube().get(&[3, 0, 1]), Some(8.0));
}

#[test]
fn second_execute_fails_and_keeps_data() {
    let mut q = query(single_transfer_db(), QueryKind::Resource, 0, 24);
    q.execute().unwrap();
    let first = q.values().clone();

    let err = q.execute().unwrap_err();
    assert!(matches!(err, QueryError::Sequencing { .. }));
    assert!(err.to_string().contains("already executed"));
    assert_eq!(q.values(), &first);
}

#[test]
fn empty_window_activity_allocates_empty_axes() {
    let mut q = query(empty_db(), QueryKind::Resource, 0, 12);
    let report = q.execute().unwrap();
    assert_eq!(report.shape, vec![12, 0, 0]);
    assert_eq!(q.values().len(), 0);
    assert_consistent(&q);
}

#[test]
fn data_executes_on_first_use() {
    let mut q = query(single_transfer_db(), QueryKind::Resource, 0, 24);
    let total = q.data().unwrap().sum();
    assert_eq!(total, 10.0);
    assert!(q.is_executed());
    // Second call reads the stored array without re-executing.
    assert_eq!(q.data().unwrap().sum(), 10.0);
}

#[test]
fn unknown_kind_is_a_configuration_error() {
    let err = Query::new("does-not-matter.sqlite", "plutonium", 0, 12)
        .err()
        .expect("unknown kind must fail");
    assert!(matches!(err, QueryError::Configuration { .. }));

    let err = Query::new("does-not-matter.sqlite", "resource", 12, 0)
        .err()
        .expect("inverted window must fail");
    assert!(matches!(err, QueryError::Configuration { .. }));
}

#[test]
fn missing_store_file_is_a_store_error() {
    let path = std::env::temp_dir().join("gp_query_missing_store_does_not_exist.sqlite");
    let err = Query::new(&path, "resource", 0, 12)
        .err()
        .expect("missing file must fail");
    assert!(matches!(err, QueryError::Store(_)));
}

#[test]
fn oversized_array_reports_capacity_and_stays_unexecuted() {
    let mut q = query(single_transfer_db(), QueryKind::Resource, 0, 1200).with_max_cells(100);
    let err = q.execute().unwrap_err();
    match &err {
        QueryError::Capacity { shape, .. } => assert_eq!(shape, &vec![1200, 2, 2]),
        other => panic!("unexpected error {other:?}"),
    }
    assert!(err.to_string().contains("1200 x 2 x 2"));
    assert!(!q.is_executed());
    assert_eq!(q.values().len(), 0);
    assert_consistent(&q);
}

#[test]
fn huge_window_over_empty_store_reports_capacity() {
    let mut q = query(empty_db(), QueryKind::Resource, 0, 1 << 40);
    match q.execute().unwrap_err() {
        QueryError::Capacity { shape, .. } => assert_eq!(shape, vec![1 << 40, 0, 0]),
        other => panic!("unexpected error {other:?}"),
    }
    assert!(!q.is_executed());

    let q = query(single_transfer_db(), QueryKind::Resource, 0, 1 << 40);
    assert!(matches!(
        q.all_received_by(2),
        Err(QueryError::Capacity { .. })
    ));
}

#[test]
fn window_wider_than_i64_is_a_configuration_error() {
    let err = Query::new("does-not-matter.sqlite", "resource", i64::MIN, i64::MAX)
        .err()
        .expect("overwide window must fail");
    assert!(matches!(err, QueryError::Configuration { .. }));
}

#[test]
fn statement_is_editable_only_before_execution() {
    let conn = single_transfer_db();
    add_transaction(&conn, 2, 30, 2, 1, 4.0);
    let mut q = query(conn, QueryKind::Resource, 0, 48);

    q.statement_mut()
        .unwrap()
        .replace_where("Transactions.ID = TransactedResources.TransactionID AND Transactions.Time >= 20");
    q.execute().unwrap();
    assert_eq!(q.values().sum(), 4.0);

    let err = q.statement_mut().err().expect("statement is frozen");
    assert!(matches!(err, QueryError::Sequencing { .. }));
}

#[test]
fn rows_outside_window_are_skipped() {
    let conn = single_transfer_db();
    add_transaction(&conn, 2, 30, 2, 1, 4.0);
    let mut q = query(conn, QueryKind::Resource, 0, 24);
    // Drop the time bounds so the statement returns the month-30 row too.
    q.statement_mut()
        .unwrap()
        .replace_where("Transactions.ID = TransactedResources.TransactionID");
    let report = q.execute().unwrap();
    assert_eq!(report.rows_read, 2);
    assert_eq!(report.rows_skipped, 1);
    assert_eq!(q.values().sum(), 10.0);
}

#[test]
fn material_uses_reference_isotopes() {
    let conn = empty_db();
    add_agent(&conn, 1, 0, 1200);
    add_agent(&conn, 2, 0, 1200);
    add_transfer(&conn, 1, 2, 1, 2);
    add_isotopic_state(&conn, 1, 92235, 7.0);
    add_isotopic_state(&conn, 1, 92238, 93.0);
    let mut q = query(conn, QueryKind::Material, 0, 12);
    q.execute().unwrap();

    assert_eq!(q.axis_names(), vec!["time", "from", "to", "iso"]);
    assert_eq!(q.units()[3], "tons");
    assert_eq!(q.labels()[3], KNOWN_ISOTOPES.as_slice());

    let u235 = q.isotopes().index_of(92235).unwrap();
    let u238 = q.isotopes().index_of(92238).unwrap();
    assert_eq!(q.cube().get(&[2, 0, 1, u235]), Some(7.0));
    assert_eq!(q.cube().get(&[2, 0, 1, u238]), Some(93.0));
    assert_consistent(&q);
}

#[test]
fn material_skips_isotopes_outside_the_catalog() {
    let conn = empty_db();
    add_agent(&conn, 1, 0, 1200);
    add_agent(&conn, 2, 0, 1200);
    add_transfer(&conn, 1, 2, 1, 2);
    add_isotopic_state(&conn, 1, 92235, 7.0);
    add_isotopic_state(&conn, 1, 11023, 1.0);
    let mut q = query(conn, QueryKind::Material, 0, 12);
    let report = q.execute().unwrap();
    assert_eq!(report.rows_skipped, 1);
    assert_eq!(q.values().sum(), 7.0);
}

#[test]
fn contaminants_build_their_own_isotope_index() {
    let conn = empty_db();
    add_component(&conn, 10, "waste_form");
    add_component(&conn, 20, "buffer");
    add_contaminant(&conn, 1, 20, 55137, 0.5);
    add_contaminant(&conn, 1, 20, 55137, 0.25);
    add_contaminant(&conn, 3, 10, 92235, 2.0);
    let mut q = query(conn, QueryKind::Contaminants, 0, 6);
    q.execute().unwrap();

    assert_eq!(q.axis_names(), vec!["time", "CompID", "IsoID"]);
    assert_eq!(q.units(), vec!["months", "CompID", "IsoID"]);
    assert_eq!(q.template().quantity.unit, "kg");
    assert_eq!(q.labels()[1], &[10, 20]);
    assert_eq!(q.labels()[2], &[55137, 92235]);
    assert_eq!(q.isotopes().codes(), &[55137, 92235]);
    assert_eq!(q.cube().get(&[1, 1, 0]), Some(0.75));
    assert_eq!(q.cube().get(&[3, 0, 1]), Some(2.0));
    assert_consistent(&q);
}

#[test]
fn each_query_owns_its_isotope_index() {
    let conn = empty_db();
    add_contaminant(&conn, 1, 1, 55137, 0.5);
    add_component(&conn, 1, "waste_form");
    let mut contaminants = query(conn, QueryKind::Contaminants, 0, 6);
    let material = query(empty_db(), QueryKind::Material, 0, 6);

    contaminants.execute().unwrap();
    assert_eq!(contaminants.isotopes().len(), 1);
    assert_eq!(material.isotopes().len(), KNOWN_ISOTOPES.len());
}

#[test]
fn axes_before_execution_follow_the_template() {
    let q = query(empty_db(), QueryKind::Material, 0, 12);
    assert_eq!(q.axis_names(), vec!["time", "from", "to", "iso"]);
    assert_eq!(q.values().shape(), &[0, 0, 0, 0]);
    assert!(q.cube().position(AxisKind::Iso).is_some());
    assert_consistent(&q);
}

#[test]
fn received_by_sums_annual_buckets() {
    let conn = empty_db();
    add_agent(&conn, 1, 0, 1200);
    add_agent(&conn, 2, 0, 1200);
    add_transaction(&conn, 1, 0, 1, 2, 1.0);
    add_transaction(&conn, 2, 11, 1, 2, 2.0);
    add_transaction(&conn, 3, 12, 1, 2, 4.0);
    add_transaction(&conn, 4, 30, 1, 2, 8.0);
    add_transaction(&conn, 5, 13, 2, 1, 100.0);
    add_transaction(&conn, 6, 40, 1, 2, 16.0);
    let q = query(conn, QueryKind::Resource, 0, 36);

    let totals = q.all_received_by(2).unwrap().expect("to axis present");
    assert_eq!(totals, vec![3.0, 4.0, 8.0]);
}

#[test]
fn received_by_rejects_other_kinds_and_missing_axis() {
    let q = query(empty_db(), QueryKind::Material, 0, 36);
    assert!(matches!(
        q.all_received_by(2),
        Err(QueryError::Configuration { .. })
    ));

    let mut q = query(single_transfer_db(), QueryKind::Resource, 0, 24);
    q.execute().unwrap();
    q.collapse_receivers().unwrap();
    assert_eq!(q.all_received_by(2).unwrap(), None);
}
