use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to serve on
    #[arg(short, long, default_value = "3030")]
    pub port: u16,
}

pub fn serve(args: ServeArgs) -> Result<()> {
    tracing_subscriber::fmt::init();

    println!(
        "{}",
        "Starting Pagecraft editor server...".bright_blue().bold()
    );
    println!("  http://localhost:{}", args.port.to_string().cyan());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(pagecraft_server::serve(args.port))?;
    Ok(())
}
