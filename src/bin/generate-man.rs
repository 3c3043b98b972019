// Generate the prazo(1) man page into the directory given as the first argument

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::CommandFactory;
use prazo::cli::Cli;

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create directory: {}", out_dir.display()))?;

    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd.clone());
    let mut buffer: Vec<u8> = Vec::new();
    man.render(&mut buffer).context("Failed to render man page")?;
    let path = out_dir.join("prazo.1");
    std::fs::write(&path, buffer)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    for sub in cmd.get_subcommands() {
        let name = format!("prazo-{}", sub.get_name());
        let man = clap_mangen::Man::new(sub.clone());
        let mut buffer: Vec<u8> = Vec::new();
        man.render(&mut buffer)
            .with_context(|| format!("Failed to render man page for {}", name))?;
        let path = out_dir.join(format!("{}.1", name));
        std::fs::write(&path, buffer)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    println!("Man pages written to {}", out_dir.display());
    Ok(())
}
