use crate::{
    domain::{Client, Lane, MoveRequest},
    error::Result,
};
use async_trait::async_trait;

pub mod sqlite;

/// Storage trait for reading and re-ranking clients
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Lists all clients
    async fn list_clients(&self) -> Result<Vec<Client>>;

    /// Lists the clients in one lane, ordered by priority
    async fn clients_in_lane(&self, lane: Lane) -> Result<Vec<Client>>;

    /// Loads a client by id
    async fn client_by_id(&self, id: i64) -> Result<Client>;

    /// Applies a lane and/or priority change to a client, renumbering the
    /// affected lanes so each keeps a contiguous 1..N priority run, and
    /// returns the refreshed full client list. The whole read-plan-write
    /// sequence runs in a single transaction.
    async fn move_client(&self, id: i64, request: MoveRequest) -> Result<Vec<Client>>;
}
