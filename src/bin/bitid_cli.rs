//! Developer convenience binary for exercising `build_uri` / `challenge_valid`
//! from a terminal without wiring up an embedding application. Not part of
//! the library's public surface; gated behind the `cli` feature.

use bitid::{build_uri, challenge_valid, generate_nonce, qrcode, Network};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bitid-cli")]
#[command(about = "Build and verify BitID challenges from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mint a bitid:// challenge URI from a callback URI
    BuildUri {
        callback_uri: String,

        /// Nonce to embed; a random one is generated if omitted
        #[arg(long)]
        nonce: Option<String>,
    },

    /// Print the external QR-code renderer URL for a challenge URI
    Qrcode { bitid_uri: String },

    /// Generate a standalone nonce
    Nonce,

    /// Verify a wallet's response to a challenge
    Challenge {
        address: String,
        signature: String,
        bitid_uri: String,
        callback_uri: String,

        #[arg(long)]
        testnet: bool,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::BuildUri {
            callback_uri,
            nonce,
        } => match build_uri(&callback_uri, nonce.as_deref()) {
            Ok(uri) => println!("{uri}"),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        },

        Commands::Qrcode { bitid_uri } => println!("{}", qrcode(&bitid_uri)),

        Commands::Nonce => println!("{}", generate_nonce()),

        Commands::Challenge {
            address,
            signature,
            bitid_uri,
            callback_uri,
            testnet,
        } => {
            let ok = challenge_valid(&address, &signature, &bitid_uri, &callback_uri, testnet);
            let network = if testnet {
                Network::Testnet
            } else {
                Network::Mainnet
            };
            tracing::info!(?network, ok, "challenge_valid evaluated");
            if ok {
                println!("valid");
            } else {
                println!("invalid");
                std::process::exit(1);
            }
        }
    }
}
