use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jt", bin_name = "jt", version)]
#[command(about = "Johnny.Decimal tags for a file vault", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Tag database to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub db: Option<PathBuf>,

    /// Vault root to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub vault: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage categories, ids and extensions
    #[command(display_order = 1)]
    Tags {
        #[command(subcommand)]
        command: TagCommands,
    },

    /// Tag the current vault directory
    #[command(display_order = 2)]
    Add,

    /// Untag the current vault directory
    #[command(display_order = 3)]
    Rm,

    /// Pick one of this directory's tags and show it
    #[command(display_order = 4)]
    Nav,

    /// Show this directory's tags grouped by category
    #[command(display_order = 5)]
    Ls {
        /// Include categories with no tags here
        #[arg(short, long)]
        all: bool,
    },

    /// Preview the directories of every extension under an id
    #[command(name = "box", display_order = 6)]
    Preview {
        /// Id to preview (defaults to 01.01)
        id: Option<String>,
    },

    /// Create the next numbered directory in the vault
    #[command(display_order = 7)]
    Append,

    /// Name the current vault directory
    #[command(display_order = 8)]
    Rename {
        /// New name (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Get or set configuration
    #[command(display_order = 9)]
    Config {
        /// Configuration key (vault, db_path)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// Add a category, id or extension
    #[command(display_order = 1)]
    Add {
        /// AC, AC.ID or AC.ID+EXT
        key: String,

        /// Name (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Remove a category, id or extension
    #[command(display_order = 2)]
    Rm {
        /// AC, AC.ID or AC.ID+EXT
        key: String,
    },

    /// Re-key a tag; children and directory links follow
    #[command(display_order = 3)]
    Mv {
        /// Current key
        old: String,

        /// New key of the same level
        new: String,
    },

    /// Rename a tag or directory record
    #[command(display_order = 4)]
    Rename {
        /// AC, AC.ID, AC.ID+EXT or directory key
        key: String,

        /// New name (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// List tags
    #[command(alias = "ls", display_order = 5)]
    List {
        /// Show directories under each extension
        #[arg(short, long)]
        all: bool,

        /// AC, AC.ID, AC.ID+EXT or directory key (all categories if omitted)
        key: Option<String>,
    },

    /// Print the vault path of an extension's first directory
    #[command(display_order = 6)]
    Cd {
        /// AC.ID+EXT
        ext: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_nested_tag_commands() {
        let cli = Cli::try_parse_from(["jt", "tags", "add", "31.11", "Tax", "returns"]).unwrap();
        match cli.command {
            Commands::Tags {
                command: TagCommands::Add { key, name },
            } => {
                assert_eq!(key, "31.11");
                assert_eq!(name.join(" "), "Tax returns");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli =
            Cli::try_parse_from(["jt", "ls", "-a", "--vault", "/srv/v", "--db", "/tmp/x.json", "-v"])
                .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.vault, Some(PathBuf::from("/srv/v")));
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.json")));
        assert!(matches!(cli.command, Commands::Ls { all: true }));
    }

    #[test]
    fn box_takes_optional_id() {
        let cli = Cli::try_parse_from(["jt", "box"]).unwrap();
        assert!(matches!(cli.command, Commands::Preview { id: None }));
        let cli = Cli::try_parse_from(["jt", "box", "31.11"]).unwrap();
        assert!(matches!(cli.command, Commands::Preview { id: Some(_) }));
    }

    #[test]
    fn list_flag_precedes_key() {
        let cli = Cli::try_parse_from(["jt", "tags", "list", "-a", "31.11"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Tags {
                command: TagCommands::List { all: true, key: Some(_) }
            }
        ));
    }

    #[test]
    fn rename_needs_a_name() {
        assert!(Cli::try_parse_from(["jt", "rename"]).is_err());
        assert!(Cli::try_parse_from(["jt", "tags", "add", "31"]).is_err());
    }
}
