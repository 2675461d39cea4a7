//! C5 — persisted state. Postgres via `sqlx`, chosen over a file-backed
//! store because the schema needs named composite indexes and concurrent
//! per-market transactions (see the top-level design notes for why this
//! departs from the rest of the pipeline's otherwise-teacher-matched stack).

pub mod pool;
pub mod reads;
pub mod repository;
pub mod rows;

pub use pool::connect;
pub use repository::{persist_cycle_result, PersistedCycleResult};
