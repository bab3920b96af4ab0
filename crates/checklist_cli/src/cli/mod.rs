use checklist_core::reducer::Filter;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Color theme for this invocation (default, noir, solarized)
    #[arg(long, global = true, value_name = "THEME")]
    pub theme: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new item
    ///
    /// Example: checklist add "Buy milk"
    Add {
        text: Option<String>,
    },
    /// Flip an item between open and done
    ///
    /// Example: checklist toggle item-1766188800000000000
    Toggle {
        id: String,
    },
    /// Remove an item
    ///
    /// Example: checklist remove item-1766188800000000000
    Remove {
        id: String,
    },
    /// Remove every completed item
    ///
    /// Example: checklist clear
    Clear,
    /// List items, optionally narrowed by status
    ///
    /// Example: checklist list active
    List {
        #[arg(value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterArg {
    All,
    Active,
    Completed,
}

impl std::fmt::Display for FilterArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        })
    }
}

impl From<FilterArg> for Filter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => Filter::All,
            FilterArg::Active => Filter::Active,
            FilterArg::Completed => Filter::Completed,
        }
    }
}
