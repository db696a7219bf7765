use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "keydeck")]
#[command(author, version, about)]
#[command(long_about = "Present a fixed deck of slides with a table of contents \
    and an essential-slides filter.\n\n\
    Examples:\n  \
    keydeck deck.yaml                 Launch presentation (fullscreen)\n  \
    keydeck deck.yaml --essential     Start with only essential slides\n  \
    keydeck toc deck.yaml             Print the table of contents\n  \
    keydeck info deck.yaml            Print slide counts")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Deck file to present
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Start with the essential-slides filter on
    #[arg(long, global = false)]
    pub essential: bool,

    /// Start with the table of contents open
    #[arg(long, global = false)]
    pub toc: bool,

    #[command(flatten)]
    pub predicate: PredicateArgs,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// How essential slides are recognized.
#[derive(Args, Clone, Default)]
pub struct PredicateArgs {
    /// Title marker that flags a slide as essential
    #[arg(long, value_name = "GLYPH")]
    pub marker: Option<String>,

    /// Regular expression matched against titles instead of a marker
    #[arg(long, value_name = "REGEX", conflicts_with = "marker")]
    pub pattern: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the table of contents
    Toc {
        /// Deck file
        file: PathBuf,

        #[command(flatten)]
        predicate: PredicateArgs,
    },

    /// Print total and essential slide counts
    Info {
        /// Deck file
        file: PathBuf,

        #[command(flatten)]
        predicate: PredicateArgs,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.marker, defaults.start_filtered)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Toc { file, predicate }) => crate::commands::toc::run(&file, &predicate),
            Some(Commands::Info { file, predicate }) => {
                crate::commands::info::run(&file, &predicate)
            }
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::print_version();
                Ok(())
            }
            None => {
                if let Some(file) = self.file {
                    let options = crate::app::LaunchOptions {
                        windowed: self.windowed,
                        start_slide: self.slide,
                        start_filtered: self.essential,
                        toc_open: self.toc,
                    };
                    crate::app::run(file, &self.predicate, options)
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}
