//! # jt Architecture
//!
//! jt keeps a Johnny.Decimal style tag taxonomy for a file vault. Categories
//! (`31`) hold ids (`31.11`), ids hold extensions (`31.11+0001`), and
//! extensions are linked many-to-many with numbered vault folders
//! (`0000_0000_0000_0001`). It is a library with a CLI client, not the other
//! way round.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, resolves config, renders output        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Turns a working directory into a vault slot key          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One load → operate → save transaction per command        │
//! │  - Graph rules live in graph.rs, listings in views.rs       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The membership edge
//!
//! An extension lists its directories in `dirs`; a directory lists its
//! extensions in `ext`. The two lists are one relation stored twice, and every
//! operation in [`graph`] keeps them in step. Operations check everything
//! before they write, so a failed command leaves the database as it was.
//!
//! ## No I/O assumptions in the core
//!
//! From `api.rs` inward, code never prints, never exits and never reads the
//! environment. The vault root and database path arrive as values; the picker
//! and prompt arrive as an [`interact::Interaction`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per user-facing command
//! - [`graph`]: Create, link, rename, move and remove on the tag document
//! - [`views`]: Read-only listings
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: The persisted document
//! - [`tag`]: Key grammar and typed keys
//! - [`vault`]: Vault folder membership and slot allocation
//! - [`interact`]: Picker and prompt seam
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and colored rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod graph;
pub mod interact;
pub mod model;
pub mod store;
pub mod tag;
pub mod vault;
pub mod views;
