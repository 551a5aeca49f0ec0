mod cmd;
mod completions;
mod logging;
mod prompt;
mod tui;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::engine::ArgValueCompleter;
use clap_complete::env::CompleteEnv;
use std::path::PathBuf;

use memov2_core::config::loader::ConfigLoader;

#[derive(Debug, Parser)]
#[command(name = "memov2", version, about = "Daily todo files and categorised Markdown memos")]
struct Cli {
    /// Path to config.toml (default: $XDG_CONFIG_HOME/memov2/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Inspect or edit the configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Daily todo files
    #[command(subcommand)]
    Todos(TodosCommand),

    /// Categorised memos
    #[command(subcommand)]
    Memos(MemosCommand),
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print the resolved directories
    Show,
    /// Open config.toml in the editor
    Edit,
}

#[derive(Debug, Subcommand)]
enum TodosCommand {
    /// Create today's todo file from the previous one and open it
    New {
        /// Overwrite today's file if it exists
        #[arg(short, long)]
        truncate: bool,
    },
    /// Rebuild the todo weekly report and open it
    Weekly,
}

#[derive(Debug, Subcommand)]
enum MemosCommand {
    /// Create a memo and open it
    New {
        /// Memo title (prompted when omitted)
        title: Vec<String>,
    },
    /// Rebuild memos/index.md and open it
    Index,
    /// Rebuild the memo weekly report and open it
    Weekly,
    /// Print `title<TAB>path` for every memo
    List(ListArgs),
    /// Find memos by title, heading or text
    Search(SearchArgs),
    /// Open a memo
    Open {
        /// Memo path relative to the memos directory
        #[arg(add = ArgValueCompleter::new(completions::complete_memos))]
        path: PathBuf,
    },
    /// Change a memo's title
    Rename {
        #[arg(add = ArgValueCompleter::new(completions::complete_memos))]
        path: PathBuf,
        /// New title (prompted when omitted)
        title: Vec<String>,
    },
    /// Move a memo to another category (no category: the memos root)
    Move {
        #[arg(add = ArgValueCompleter::new(completions::complete_memos))]
        path: PathBuf,
        #[arg(add = ArgValueCompleter::new(completions::complete_categories))]
        category: Vec<String>,
    },
    /// Delete a memo
    Delete {
        #[arg(add = ArgValueCompleter::new(completions::complete_memos))]
        path: PathBuf,
    },
    /// Copy a memo to the next free second
    Duplicate {
        #[arg(add = ArgValueCompleter::new(completions::complete_memos))]
        path: PathBuf,
    },
    /// Align memo filenames and directories with their metadata
    Tidy,
    /// List category directories
    Categories,
    /// Browse memos interactively
    Browse,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Print paths relative to the memos directory
    #[arg(short, long)]
    pub short: bool,

    /// Print a JSON array
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Words to search for (joined with spaces)
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Print paths relative to the memos directory
    #[arg(short, long)]
    pub short: bool,

    /// Show where each memo matched
    #[arg(short, long)]
    pub context: bool,

    /// Print a JSON array
    #[arg(long)]
    pub json: bool,
}

fn main() {
    CompleteEnv::with_factory(Cli::command).complete();

    let cli = Cli::parse();

    let config = match ConfigLoader::load_or_init(cli.config.as_deref()) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error: error loading config: {e}");
            std::process::exit(1);
        }
    };
    logging::init(&config);

    let result = match cli.command {
        Commands::Config(ConfigCommand::Show) => cmd::config::show(&config),
        Commands::Config(ConfigCommand::Edit) => cmd::config::edit(&config),
        Commands::Todos(TodosCommand::New { truncate }) => cmd::todos::new(&config, truncate),
        Commands::Todos(TodosCommand::Weekly) => cmd::todos::weekly(&config),
        Commands::Memos(command) => match command {
            MemosCommand::New { title } => cmd::memos::new(&config, &title),
            MemosCommand::Index => cmd::memos::index(&config),
            MemosCommand::Weekly => cmd::memos::weekly(&config),
            MemosCommand::List(args) => cmd::memos::list(&config, &args),
            MemosCommand::Search(args) => cmd::memos::search(&config, &args),
            MemosCommand::Open { path } => cmd::memos::open(&config, &path),
            MemosCommand::Rename { path, title } => cmd::memos::rename(&config, &path, &title),
            MemosCommand::Move { path, category } => {
                cmd::memos::move_memo(&config, &path, category)
            }
            MemosCommand::Delete { path } => cmd::memos::delete(&config, &path),
            MemosCommand::Duplicate { path } => cmd::memos::duplicate(&config, &path),
            MemosCommand::Tidy => cmd::memos::tidy(&config),
            MemosCommand::Categories => cmd::memos::categories(&config),
            MemosCommand::Browse => tui::run(config),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn search_joins_query_words() {
        let cli = Cli::parse_from(["memov2", "memos", "search", "-c", "foo", "bar"]);
        match cli.command {
            Commands::Memos(MemosCommand::Search(args)) => {
                assert_eq!(args.query, vec!["foo", "bar"]);
                assert!(args.context);
                assert!(!args.short);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
