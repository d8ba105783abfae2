// src/cli/commands.rs
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Fill in the suggestion form interactively
    Interactive,

    /// Ask for a single password suggestion
    Suggest {
        /// Password length (8-128)
        #[arg(long, short)]
        length: Option<i64>,

        /// Complexity: low, medium or high
        #[arg(long, short)]
        complexity: Option<String>,

        /// Keywords to make the password more memorable
        #[arg(long, short)]
        keywords: Option<String>,

        /// Copy the suggestion to the clipboard
        #[arg(long)]
        copy: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the HTTP API server
    Serve {
        /// API server port
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind to
        #[arg(long)]
        address: Option<String>,
    },
}
