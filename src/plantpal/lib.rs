//! # Plantpal Architecture
//!
//! Plantpal is a **UI-agnostic plant collection library**: a record store for
//! houseplants plus a pipeline that turns camera captures and picked files
//! into compact inline photos. The `plantpal` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, print.rs)                     │
//! │  - Parses arguments, formats output, sets up logging        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (1-based photo numbers → indexes)      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, search and sort, user-facing messages        │
//! │  - Returns `CmdResult`, never prints                        │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                              │
//!                 ▼                              ▼
//! ┌───────────────────────────────┐  ┌──────────────────────────┐
//! │  Record Store (store/)        │◄─│  Ingestion (ingest/)     │
//! │  - In-memory map + snapshot   │  │  - read, re-encode,      │
//! │  - SnapshotBackend trait      │  │    inline, append        │
//! └───────────────────────────────┘  └──────────────────────────┘
//! ```
//!
//! ## Persistence
//!
//! Every mutation rewrites the whole collection as one JSON snapshot. When
//! that write fails the change stays in memory and the caller gets
//! [`error::PlantError::Persistence`]; commands turn that into a warning.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Record store, snapshot backends and the seed collection
//! - [`ingest`]: Photo ingestion, compression and data URLs
//! - [`model`]: Core data types (`Plant`, `Photo`, `PlantPatch`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod ingest;
pub mod model;
pub mod store;
