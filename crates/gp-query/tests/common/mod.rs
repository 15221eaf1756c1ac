//! In-memory simulation output fixture.

#![allow(dead_code)]

use gp_query::{Query, QueryKind, TimeWindow};
use gp_store::Store;
use rusqlite::{Connection, params};

pub const SCHEMA: &str = "
CREATE TABLE Agents (ID INTEGER PRIMARY KEY, EnterDate INTEGER, LeaveDate INTEGER);
CREATE TABLE Transactions (ID INTEGER PRIMARY KEY, Time INTEGER, SenderID INTEGER, ReceiverID INTEGER);
CREATE TABLE TransactedResources (TransactionID INTEGER, Quantity REAL);
CREATE TABLE IsotopicStates (TransactionID INTEGER, IsoID INTEGER, value REAL);
CREATE TABLE gen_repo_components (CompID INTEGER, Type TEXT);
CREATE TABLE gen_repo_contaminants (Time INTEGER, CompID INTEGER, IsoID INTEGER, MassKG REAL);
";

pub fn empty_db() -> Connection {
    let conn = Connection::open_in_memory().expect("failed to open in-memory db");
    conn.execute_batch(SCHEMA).expect("failed to create schema");
    conn
}

pub fn add_agent(conn: &Connection, id: i64, enter: i64, leave: i64) {
    conn.execute(
        "INSERT INTO Agents (ID, EnterDate, LeaveDate) VALUES (?1, ?2, ?3)",
        params![id, enter, leave],
    )
    .expect("failed to insert agent");
}

pub fn add_transfer(conn: &Connection, id: i64, time: i64, sender: i64, receiver: i64) {
    conn.execute(
        "INSERT INTO Transactions (ID, Time, SenderID, ReceiverID) VALUES (?1, ?2, ?3, ?4)",
        params![id, time, sender, receiver],
    )
    .expect("failed to insert transaction");
}

pub fn add_transaction(conn: &Connection, id: i64, time: i64, sender: i64, receiver: i64, qty: f64) {
    add_transfer(conn, id, time, sender, receiver);
    conn.execute(
        "INSERT INTO TransactedResources (TransactionID, Quantity) VALUES (?1, ?2)",
        params![id, qty],
    )
    .expect("failed to insert resource");
}

pub fn add_isotopic_state(conn: &Connection, tx: i64, iso: i64, value: f64) {
    conn.execute(
        "INSERT INTO IsotopicStates (TransactionID, IsoID, value) VALUES (?1, ?2, ?3)",
        params![tx, iso, value],
    )
    .expect("failed to insert isotopic state");
}

pub fn add_contaminant(conn: &Connection, time: i64, comp: i64, iso: i64, mass: f64) {
    conn.execute(
        "INSERT INTO gen_repo_contaminants (Time, CompID, IsoID, MassKG) VALUES (?1, ?2, ?3, ?4)",
        params![time, comp, iso, mass],
    )
    .expect("failed to insert contaminant");
}

pub fn add_component(conn: &Connection, comp: i64, kind: &str) {
    conn.execute(
        "INSERT INTO gen_repo_components (CompID, Type) VALUES (?1, ?2)",
        params![comp, kind],
    )
    .expect("failed to insert component");
}

pub fn query(conn: Connection, kind: QueryKind, t0: i64, tf: i64) -> Query {
    let window = TimeWindow::new(t0, tf).expect("valid window");
    Query::with_store(Store::from_connection(conn), kind, window)
}

/// Two agents active for the whole century, one 10-unit transfer 1 -> 2 at month 5.
pub fn single_transfer_db() -> Connection {
    let conn = empty_db();
    add_agent(&conn, 1, 0, 1200);
    add_agent(&conn, 2, 0, 1200);
    add_transaction(&conn, 1, 5, 1, 2, 10.0);
    conn
}

/// `len(axes) == len(labels) == len(units) == rank`, and label counts match the shape.
pub fn assert_consistent(q: &Query) {
    let rank = q.values().ndim();
    assert_eq!(q.axis_names().len(), rank);
    assert_eq!(q.labels().len(), rank);
    assert_eq!(q.units().len(), rank);
    for (labels, &extent) in q.labels().iter().zip(q.values().shape()) {
        assert_eq!(labels.len(), extent);
    }
}
