//! Bar management: recipe catalog, inventory, sales, and the pro tools
//! (creator, party mode, prep lab, analytics, menus, training).
//!
//! [`BarService`] is the single entry point. It owns the in-memory
//! [`state::BarState`] aggregate and persists every mutation through a
//! [`kv::KVStore`] backend.

pub mod defaults;
pub mod mix;
pub mod model;
pub mod service;
pub mod state;

pub use service::BarService;
