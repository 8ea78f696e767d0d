// src/cli/mod.rs — CLI definition (clap derive)

pub mod scripts;
pub mod serve;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lucence",
    about = "Plugin script store and head injection for the Lucence editor",
    version
)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
        /// Plugin script directory (overrides store.root)
        #[arg(long)]
        root: Option<String>,
    },
    /// Print the head markup injected for a render context
    Head {
        /// Render context, e.g. "page" or "post"
        context: String,
    },
    /// List stored plugin scripts
    List {
        /// Plugin script directory (overrides store.root)
        #[arg(long)]
        root: Option<String>,
    },
    /// Delete a plugin script (no-op if absent)
    Delete {
        /// Plugin name, without the .js extension
        name: String,
        /// Plugin script directory (overrides store.root)
        #[arg(long)]
        root: Option<String>,
    },
}
