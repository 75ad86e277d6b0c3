// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export storage traits and backends

pub mod factory;
pub mod memory;
pub mod notion_store;
pub mod profile_repository;
pub mod repository;
pub mod store;

pub use factory::*;
pub use memory::*;
pub use notion_store::*;
pub use profile_repository::*;
pub use repository::*;
pub use store::*;
