//! Build automation tasks for Glade
//!
//! Usage:
//!   cargo xtask package [--platform P]   # Release binary + assets in dist/<platform>/
//!   cargo xtask check-assets             # Load every image and map layer, then exit

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

const BINARY: &str = "glade";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for Glade")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a native release and copy it with the assets into dist/
    Package {
        /// Target platform: windows, macos, linux (default: host)
        #[arg(long)]
        platform: Option<String>,
    },
    /// Run the game in asset check mode; fails on the first broken file
    CheckAssets,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Package { platform } => package(platform),
        Commands::CheckAssets => check_assets(),
    }
}

/// Get the project root directory
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask is not inside a workspace")
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Copy directory recursively
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src).with_context(|| format!("reading {}", src.display()))? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

fn host_platform() -> &'static str {
    if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "macos") {
        "macos"
    } else {
        "linux"
    }
}

fn binary_name(platform: &str) -> String {
    if platform == "windows" {
        format!("{}.exe", BINARY)
    } else {
        BINARY.to_string()
    }
}

/// Build a native release package
fn package(platform: Option<String>) -> Result<()> {
    let root = project_root()?;
    let platform = platform.unwrap_or_else(|| host_platform().to_string());
    let dist = root.join("dist").join(&platform);

    println!("Building native release for {}...", platform);

    // Clean and create dist folder
    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--bin", BINARY]),
    )?;

    let binary = binary_name(&platform);
    std::fs::copy(root.join("target/release").join(&binary), dist.join(&binary))
        .with_context(|| format!("copying {}", binary))?;

    copy_dir_recursive(&root.join("assets"), &dist.join("assets"))?;
    let config = root.join("glade.ron");
    if config.exists() {
        std::fs::copy(&config, dist.join("glade.ron"))?;
    }

    println!("Package complete: dist/{}/", platform);
    Ok(())
}

fn check_assets() -> Result<()> {
    let root = project_root()?;
    println!("Checking assets...");
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["run", "--release", "--bin", BINARY, "--", "--check-assets"]),
    )
}
