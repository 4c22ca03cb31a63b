//! atpub CLI - offline tooling for atpub record addressing.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "atpub")]
#[command(about = "TID and record-address tooling for atpub", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate fresh timestamp identifiers
    Tid {
        /// Number of identifiers to generate
        #[arg(short, long, default_value = "1")]
        count: usize,
    },
    /// Parse or format at:// record addresses
    Address {
        #[command(subcommand)]
        command: AddressCommands,
    },
    /// Print well-known verification artifacts
    WellKnown {
        /// Repository DID
        #[arg(long)]
        did: String,
        /// Record key (13-character TID)
        #[arg(long)]
        rkey: String,
        /// Print the per-document <link> tag instead of the publication file body
        #[arg(long)]
        link: bool,
    },
}

#[derive(Subcommand)]
enum AddressCommands {
    /// Parse an at:// address into its components
    Parse {
        /// The address, e.g. at://did:plc:abc/site.standard.document/3jzfcijpj2z2a
        address: String,
    },
    /// Format an address from its components
    Format {
        /// Repository DID
        #[arg(long)]
        did: String,
        /// Collection NSID
        #[arg(long)]
        collection: String,
        /// Record key (13-character TID)
        #[arg(long)]
        rkey: String,
    },
}

fn main() -> Result<()> {
    // Respects RUST_LOG (e.g., RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tid { count } => commands::tid::run(count),
        Commands::Address { command } => match command {
            AddressCommands::Parse { address } => commands::address::parse(&address),
            AddressCommands::Format {
                did,
                collection,
                rkey,
            } => commands::address::format(&did, &collection, &rkey),
        },
        Commands::WellKnown { did, rkey, link } => commands::well_known::run(&did, &rkey, link),
    }
}
