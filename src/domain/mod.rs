pub mod client;
pub mod reorder;
pub mod sorting;

pub use client::{Client, Lane};
pub use reorder::{plan_move, MovePlan, MoveRequest, Placement, PriorityBand, Shift};
pub use sorting::{sort_clients, SortField, SortOrder};
