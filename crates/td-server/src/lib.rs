//! `td-server` — the HTTP surface of the rust_td dispatch service.
//!
//! A thin RPC layer: `POST /setup` installs topology and per-car targets
//! into the process-wide [`Store`], `POST /dispatch` runs one tick against
//! it, `GET /` answers liveness probes.  All domain logic lives in the
//! `td-*` library crates; the handlers only lock, validate, resolve and
//! serialize.
//!
//! # Concurrency
//!
//! The store sits behind a single `parking_lot::RwLock`.  Setup takes the
//! write guard, dispatch the read guard — a dispatch tick mutates its own
//! per-request car copies, never the store.

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::{AppState, Store};
