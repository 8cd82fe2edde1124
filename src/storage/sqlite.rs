use crate::{
    domain::{plan_move, Client, Lane, MoveRequest, Placement, PriorityBand, Shift},
    error::{BoardError, Result},
    storage::ClientStore,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row, Transaction};
use std::path::Path;
use std::str::FromStr;
use tokio::sync::Mutex;

const SCHEMA_VERSION: i64 = 1;

const CLIENT_COLUMNS: &str = "id, name, description, status, priority, created_at, updated_at";

/// SQLite-backed client store.
///
/// The connection sits behind an async mutex, so concurrent update requests
/// are serialized; each `move_client` additionally runs its whole
/// read-plan-write sequence inside one transaction, so readers never observe
/// a lane with a duplicate or missing priority.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) a database file. Call `initialize` before use.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a fresh in-memory database. Call `initialize` before use.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub async fn schema_version(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
    }

    fn migrate(conn: &Connection) -> Result<()> {
        let current: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        if current > SCHEMA_VERSION {
            return Err(BoardError::UnsupportedSchemaVersion {
                found: current,
                supported: SCHEMA_VERSION,
            });
        }

        if current < 1 {
            let sql = include_str!("../../migrations/0001_clients.sql");
            conn.execute_batch(sql)?;
            conn.execute("PRAGMA user_version = 1", []).map(|_| ())?;
        }

        Ok(())
    }

    /// Inserts a client at the tail of the given lane and returns it.
    ///
    /// Client creation is not part of the HTTP surface; this exists for
    /// seeding and tests.
    pub async fn insert_client(
        &self,
        name: &str,
        description: Option<&str>,
        lane: Lane,
    ) -> Result<Client> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        let priority = max_priority_tx(&tx, lane)? + 1;
        let now = Utc::now();
        tx.execute(
            "
            INSERT INTO clients (name, description, status, priority, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
            params![
                name,
                description,
                lane.as_str(),
                priority,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::debug!(id, lane = %lane, priority, "inserted client");

        let mut client = Client::new(id, name.to_string(), lane, priority);
        client.created_at = now;
        client.updated_at = now;
        client.description = description.map(str::to_string);
        Ok(client)
    }

    /// Populates an empty table with a small demo board. Returns the number
    /// of clients inserted (0 when the table already has rows).
    pub async fn seed_demo(&self) -> Result<usize> {
        {
            let conn = self.conn.lock().await;
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM clients", [], |row| row.get(0))?;
            if count > 0 {
                return Ok(0);
            }
        }

        let fixtures: &[(&str, &str, Lane)] = &[
            ("Evergreen Logistics", "Warehouse management rollout", Lane::Backlog),
            ("Harbor & Finch", "Brand site refresh", Lane::Backlog),
            ("Quanta Labs", "Telemetry dashboard", Lane::Backlog),
            ("Bluebird Travel", "Booking engine integration", Lane::InProgress),
            ("Mistral Foods", "Ordering portal", Lane::InProgress),
            ("Atlas Insurance", "Claims intake form", Lane::Complete),
        ];

        for (name, description, lane) in fixtures {
            self.insert_client(name, Some(description), *lane).await?;
        }

        tracing::info!(count = fixtures.len(), "seeded demo clients");
        Ok(fixtures.len())
    }
}

#[async_trait]
impl ClientStore for SqliteStore {
    async fn initialize(&self) -> Result<()> {
        let conn = self.conn.lock().await;
        Self::migrate(&conn)
    }

    async fn list_clients(&self) -> Result<Vec<Client>> {
        let conn = self.conn.lock().await;
        list_tx(&conn)
    }

    async fn clients_in_lane(&self, lane: Lane) -> Result<Vec<Client>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE status = ?1 ORDER BY priority"
        ))?;
        let rows = stmt.query_map([lane.as_str()], map_client_row)?;
        collect_clients(rows)
    }

    async fn client_by_id(&self, id: i64) -> Result<Client> {
        let conn = self.conn.lock().await;
        client_by_id_tx(&conn, id)?.ok_or(BoardError::ClientNotFound(id))
    }

    async fn move_client(&self, id: i64, request: MoveRequest) -> Result<Vec<Client>> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        let client = client_by_id_tx(&tx, id)?.ok_or(BoardError::ClientNotFound(id))?;
        let dest_lane = request.lane.unwrap_or(client.lane);
        let dest_tail = max_priority_tx(&tx, dest_lane)?;

        match plan_move(&client, dest_tail, request) {
            Some(plan) => {
                for shift in &plan.shifts {
                    apply_shift_tx(&tx, shift)?;
                }
                set_placement_tx(&tx, id, plan.placement)?;
                tracing::info!(
                    id,
                    from_lane = %client.lane,
                    from_priority = client.priority,
                    to_lane = %plan.placement.lane,
                    to_priority = plan.placement.priority,
                    "moved client"
                );
            }
            None => {
                tracing::debug!(id, "move request leaves client in place");
            }
        }

        let clients = list_tx(&tx)?;
        tx.commit()?;
        Ok(clients)
    }
}

/// Highest priority currently in a lane, 0 when the lane is empty.
fn max_priority_tx(conn: &Connection, lane: Lane) -> Result<i64> {
    Ok(conn.query_row(
        "SELECT COALESCE(MAX(priority), 0) FROM clients WHERE status = ?1",
        [lane.as_str()],
        |row| row.get(0),
    )?)
}

fn client_by_id_tx(conn: &Connection, id: i64) -> Result<Option<Client>> {
    conn.query_row(
        &format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?1"),
        [id],
        map_client_row,
    )
    .optional()
    .map_err(BoardError::from)
}

fn list_tx(conn: &Connection) -> Result<Vec<Client>> {
    let mut stmt = conn.prepare(&format!("SELECT {CLIENT_COLUMNS} FROM clients ORDER BY id"))?;
    let rows = stmt.query_map([], map_client_row)?;
    collect_clients(rows)
}

/// Applies `priority += delta` to every client in the shift's lane whose
/// priority falls in the band.
fn apply_shift_tx(tx: &Transaction<'_>, shift: &Shift) -> Result<usize> {
    let renumbered = match shift.band {
        PriorityBand::Above(n) => tx.execute(
            "UPDATE clients SET priority = priority + ?1 WHERE status = ?2 AND priority > ?3",
            params![shift.delta, shift.lane.as_str(), n],
        )?,
        PriorityBand::AtOrAbove(n) => tx.execute(
            "UPDATE clients SET priority = priority + ?1 WHERE status = ?2 AND priority >= ?3",
            params![shift.delta, shift.lane.as_str(), n],
        )?,
        PriorityBand::Slice { lo, hi } => tx.execute(
            "
            UPDATE clients SET priority = priority + ?1
            WHERE status = ?2 AND priority BETWEEN ?3 AND ?4
            ",
            params![shift.delta, shift.lane.as_str(), lo, hi],
        )?,
    };
    tracing::debug!(lane = %shift.lane, ?shift.band, shift.delta, renumbered, "applied shift");
    Ok(renumbered)
}

/// Sets a single client's lane and priority.
fn set_placement_tx(tx: &Transaction<'_>, id: i64, placement: Placement) -> Result<()> {
    tx.execute(
        "UPDATE clients SET status = ?1, priority = ?2, updated_at = ?3 WHERE id = ?4",
        params![
            placement.lane.as_str(),
            placement.priority,
            Utc::now().to_rfc3339(),
            id,
        ],
    )?;
    Ok(())
}

fn map_client_row(row: &Row<'_>) -> rusqlite::Result<Client> {
    let lane_raw: String = row.get(3)?;
    let lane = Lane::from_str(&lane_raw).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(err))
    })?;

    Ok(Client {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        lane,
        priority: row.get(4)?,
        created_at: timestamp_column(row, 5)?,
        updated_at: timestamp_column(row, 6)?,
    })
}

fn timestamp_column(row: &Row<'_>, index: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(index)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(
                index,
                Type::Text,
                Box::new(BoardError::Timestamp(err.to_string())),
            )
        })
}

fn collect_clients(
    rows: impl Iterator<Item = rusqlite::Result<Client>>,
) -> Result<Vec<Client>> {
    let mut clients = Vec::new();
    for row in rows {
        clients.push(row?);
    }
    Ok(clients)
}
