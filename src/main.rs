//! 本地模式入口（pre-commit / pre-push 钩子）
//!
//! 不需要参数：自动识别暂存区或上一个提交的变更，写入译文后加入暂存区。

use std::path::PathBuf;
use std::process;

use clap::Parser;

use doc_sync::cli::{run, startup};
use doc_sync::RunOptions;

/// Translate changed documentation sources into every configured language
#[derive(Parser, Debug)]
#[command(name = "doc-sync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Repository root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Only list the translation tasks, without calling the model or writing files
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let cli = Cli::parse();

    let (root, env) = match startup(cli.root) {
        Ok(started) => started,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&root, env, &RunOptions::local().dry_run(cli.dry_run)) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}
