//! Fallakte Server CLI
//!
//! Starts the HTTP server for batch document analysis.

use fallakte_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        let config_path = &args[2];
        ServerConfig::from_file(config_path)?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using defaults");
        eprintln!("Usage: fallakte-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Fallakte Server - Batch Document Analysis");
    println!();
    println!("USAGE:");
    println!("    fallakte-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address: IP address to bind (default: '127.0.0.1')");
    println!("    - bind_port: Port number (default: 8081)");
    println!("    - ollama_endpoint: Completion service URL (default: 'http://localhost:11434')");
    println!("    - model: Model name (default: 'llama3.2:3b')");
    println!("    - [analysis]: max_text_length, max_tokens, timeouts");
    println!("    - [batch]: concurrency, max_documents");
    println!();
}
