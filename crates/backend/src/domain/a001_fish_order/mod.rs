//! a001 Fish order: the `inventoryFisherNane` collection
//!
//! - store.rs: storage trait used by the service and live queries
//! - repository.rs: SQLite implementation (sea-orm)
//! - live_query.rs: change notices and per-filter live result sets
//! - service.rs: status mutator, creation, seeding

pub mod live_query;
pub mod repository;
pub mod service;
pub mod store;
