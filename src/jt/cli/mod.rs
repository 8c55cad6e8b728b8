//! # CLI Layer
//!
//! One client of the jt library, and the only code that touches the
//! terminal, the process environment or `std::process::exit`.
//!
//! - `setup`: clap definitions.
//! - `commands`: resolves configuration, builds a `JtApi<FileStore>` and
//!   dispatches one handler per subcommand.
//! - `render`: turns `CmdResult`s into colored lines.
//! - `print`: writes those lines out.
//!
//! Business rules live in the library; tests here cover argument parsing and
//! rendered text only.

mod commands;
mod print;
mod render;
mod setup;
mod styles;

pub use commands::run;
