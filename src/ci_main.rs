//! CI 模式入口
//!
//! 需要 `before` 和 `after` 两个提交作为参数，只比较这两个提交之间的变更，
//! 不修改暂存区。

use std::path::PathBuf;
use std::process;

use clap::Parser;

use doc_sync::cli::{run, startup};
use doc_sync::{RunOptions, SyncError};

/// Translate documentation sources changed between two commits
#[derive(Parser, Debug)]
#[command(name = "doc-sync-ci")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Commit before the push
    #[arg(value_name = "BEFORE")]
    before: String,

    /// Commit after the push
    #[arg(value_name = "AFTER")]
    after: String,

    /// Repository root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Only list the translation tasks, without calling the model or writing files
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help / --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            let usage = SyncError::Usage("需要 'before' 和 'after' 两个提交作为参数".to_string());
            eprintln!("{}", usage);
            process::exit(1);
        }
    };

    let (root, env) = match startup(cli.root) {
        Ok(started) => started,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let options = RunOptions::ci(&cli.before, &cli.after).dry_run(cli.dry_run);
    if let Err(e) = run(&root, env, &options) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}
