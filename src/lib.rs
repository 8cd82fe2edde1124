//! # Laneboard
//!
//! Core logic and HTTP API for a kanban-style client board.
//!
//! Clients sit in one of three status lanes (backlog, in-progress, complete)
//! with an integer priority ranking them inside the lane, 1 at the top.
//! Every lane keeps its priorities as a contiguous 1..N run; moving a client
//! between lanes or re-ranking it within one renumbers the neighbours it
//! displaces, inside a single storage transaction.

pub mod api;
pub mod domain;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use domain::{
    client::{Client, Lane},
    reorder::{MovePlan, MoveRequest},
};
pub use error::{BoardError, Result};
pub use storage::{sqlite::SqliteStore, ClientStore};
