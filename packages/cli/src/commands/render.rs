use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_ssr::{RenderOptions, SsrRenderer};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Request path to render
    #[arg(default_value = "/")]
    pub path: String,

    /// Write the document to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Origin used for Open Graph URLs
    #[arg(long)]
    pub base_url: Option<String>,
}

pub fn render(args: RenderArgs) -> Result<()> {
    let mut options = RenderOptions::default();
    if let Some(base_url) = &args.base_url {
        options.base_url = base_url.clone();
    }

    let renderer = SsrRenderer::with_options(options);
    let document = renderer.render(&args.path)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &document)?;
            println!(
                "{} Rendered {} → {}",
                "✓".green(),
                args.path,
                path.display()
            );
        }
        None => print!("{}", document),
    }

    Ok(())
}
