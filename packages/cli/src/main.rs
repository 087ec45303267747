mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{render, serve, RenderArgs, ServeArgs};

/// Pagecraft CLI - Visual HTML editor toolkit
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the server-side document for a request path
    Render(RenderArgs),

    /// Start the editor HTTP server
    Serve(ServeArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Render(args) => render(args),
        Command::Serve(args) => serve(args),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
