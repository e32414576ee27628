use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "viewsync", version, about = "Server-driven UI state synchronization")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the server daemon
    Serve {
        #[arg(long)]
        socket: Option<String>,
        /// View definition to serve (JSON)
        #[arg(long)]
        view: Option<String>,
        /// Server config file (TOML)
        #[arg(long)]
        config: Option<String>,
    },
    /// Stop a running server
    Stop {
        #[arg(long)]
        socket: Option<String>,
    },
    /// Fetch and print the current directives
    Render {
        #[arg(long)]
        socket: Option<String>,
    },
    /// Send a checkbox state update
    Set {
        id: u64,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
        /// Queue the update instead of flagging it immediate
        #[arg(long)]
        deferred: bool,
        #[arg(long)]
        socket: Option<String>,
    },
    /// Inspect server components
    Component {
        #[command(subcommand)]
        command: ComponentCommands,
    },
    /// Load a view definition into a running server
    ViewLoad {
        path: String,
        #[arg(long)]
        socket: Option<String>,
    },
    /// Run a local client session against an in-process view
    Demo {
        #[arg(long, default_value_t = 4)]
        toggles: u64,
        #[arg(long)]
        view: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ComponentCommands {
    List {
        #[arg(long)]
        socket: Option<String>,
    },
    Show {
        id: u64,
        #[arg(long)]
        socket: Option<String>,
    },
}
