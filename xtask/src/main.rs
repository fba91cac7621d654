//! Build automation for image2deploy
//!
//! Usage: cargo xtask <command>
//!
//! Available commands:
//! - build: Build the project
//! - test: Run tests
//! - samples: Regenerate manifests under samples/
//! - dist: Create a release tarball
//! - ci: Run CI checks

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use xshell::{cmd, Shell};

const BIN: &str = "image2deploy";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for image2deploy")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the project
    Build {
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
    /// Regenerate samples/deployment-*.yaml and samples/groups from samples/images.csv
    Samples,
    /// Create a release tarball
    Dist {
        /// Target triple (e.g., x86_64-unknown-linux-gnu)
        #[arg(long)]
        target: Option<String>,
    },
    /// Run CI checks (format, clippy, test, samples)
    Ci,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;

    sh.change_dir(project_root()?);

    match cli.command {
        Commands::Build { release } => build(&sh, release),
        Commands::Test { integration } => test(&sh, integration),
        Commands::Samples => samples(&sh),
        Commands::Dist { target } => dist(&sh, target),
        Commands::Ci => ci(&sh),
    }
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    println!("🔨 Building {BIN}...");

    if release {
        cmd!(sh, "cargo build --release").run()?;
    } else {
        cmd!(sh, "cargo build").run()?;
    }

    println!("✅ Build completed");
    Ok(())
}

fn test(sh: &Shell, integration: bool) -> Result<()> {
    println!("🧪 Running tests...");

    if integration {
        cmd!(sh, "cargo test -p {BIN} --test '*'").run()?;
    } else {
        cmd!(sh, "cargo test --workspace").run()?;
    }

    println!("✅ All tests passed");
    Ok(())
}

fn samples(sh: &Shell) -> Result<()> {
    println!("📄 Regenerating samples...");

    let csv = "samples/images.csv";
    for profile in ["minimal", "extended"] {
        let out = format!("samples/deployment-{profile}.yaml");
        cmd!(
            sh,
            "cargo run --quiet --bin {BIN} -- generate --csv {csv} --name cp4d-images --namespace cp4d --profile {profile} --out {out}"
        )
        .run()
        .with_context(|| format!("Failed to generate {out}"))?;
    }

    cmd!(
        sh,
        "cargo run --quiet --bin {BIN} -- split --in {csv} --out-dir samples/groups --regex (db2u|opensearch|zen)"
    )
    .run()
    .context("Failed to split sample image list")?;

    println!("✅ Samples regenerated");
    Ok(())
}

fn dist(sh: &Shell, target: Option<String>) -> Result<()> {
    println!("📦 Creating distribution package...");

    let release_dir = match target {
        Some(ref triple) => {
            cmd!(sh, "cargo build --release --target {triple}").run()?;
            format!("target/{triple}/release")
        }
        None => {
            cmd!(sh, "cargo build --release").run()?;
            "target/release".to_string()
        }
    };

    sh.create_dir("dist")?;
    sh.copy_file(format!("{release_dir}/{BIN}"), "dist")?;

    let version = env!("CARGO_PKG_VERSION");
    let archive_name = match target {
        Some(ref triple) => format!("{BIN}-{version}-{triple}.tar.gz"),
        None => format!("{BIN}-{version}.tar.gz"),
    };

    cmd!(sh, "tar -czf {archive_name} -C dist {BIN}")
        .run()
        .context("Failed to create tarball")?;

    println!("✅ Distribution package created: {archive_name}");
    Ok(())
}

fn ci(sh: &Shell) -> Result<()> {
    println!("🔍 Running CI checks...");

    cmd!(sh, "cargo fmt --all -- --check").run()?;
    cmd!(sh, "cargo clippy --all-targets --all-features -- -D warnings").run()?;
    test(sh, false)?;
    samples(sh)?;

    println!("\n✅ All CI checks passed!");
    Ok(())
}

fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live inside the workspace")
}
