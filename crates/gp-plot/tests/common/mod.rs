#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use gp_query::{Query, QueryKind, TimeWindow};
use gp_store::Store;
use rusqlite::{Connection, params};

const SCHEMA: &str = "
CREATE TABLE Agents (ID INTEGER PRIMARY KEY, EnterDate INTEGER, LeaveDate INTEGER);
CREATE TABLE Transactions (ID INTEGER PRIMARY KEY, Time INTEGER, SenderID INTEGER, ReceiverID INTEGER);
CREATE TABLE TransactedResources (TransactionID INTEGER, Quantity REAL);
CREATE TABLE IsotopicStates (TransactionID INTEGER, IsoID INTEGER, value REAL);
CREATE TABLE gen_repo_components (CompID INTEGER, Type TEXT);
CREATE TABLE gen_repo_contaminants (Time INTEGER, CompID INTEGER, IsoID INTEGER, MassKG REAL);
";

/// Three agents; transfers (time, sender, receiver, quantity).
pub fn flows(transfers: &[(i64, i64, i64, f64)]) -> Connection {
    let conn = Connection::open_in_memory().expect("failed to open in-memory db");
    conn.execute_batch(SCHEMA).expect("failed to create schema");
    for id in 1..=3 {
        conn.execute(
            "INSERT INTO Agents (ID, EnterDate, LeaveDate) VALUES (?1, 0, 1200)",
            params![id],
        )
        .expect("failed to insert agent");
    }
    for (i, &(t, s, r, q)) in transfers.iter().enumerate() {
        let id = i as i64 + 1;
        conn.execute(
            "INSERT INTO Transactions (ID, Time, SenderID, ReceiverID) VALUES (?1, ?2, ?3, ?4)",
            params![id, t, s, r],
        )
        .expect("failed to insert transaction");
        conn.execute(
            "INSERT INTO TransactedResources (TransactionID, Quantity) VALUES (?1, ?2)",
            params![id, q],
        )
        .expect("failed to insert resource");
        conn.execute(
            "INSERT INTO IsotopicStates (TransactionID, IsoID, value) VALUES (?1, 92235, ?2)",
            params![id, q],
        )
        .expect("failed to insert isotopic state");
    }
    conn
}

pub fn executed(conn: Connection, kind: QueryKind, t0: i64, tf: i64) -> Query {
    let window = TimeWindow::new(t0, tf).expect("valid window");
    let mut q = Query::with_store(Store::from_connection(conn), kind, window);
    q.execute().expect("execute failed");
    q
}

pub fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    std::fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}
