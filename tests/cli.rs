//! 命令行入口测试

use assert_cmd::Command;

#[allow(dead_code)]
mod common {
    include!("common/mod.rs");
}

use common::TestWorkspace;

/// CI 入口缺少参数时以状态码 1 退出
#[test]
fn test_ci_without_arguments_exits_with_one() {
    let ws = TestWorkspace::new();

    let output = Command::cargo_bin("doc-sync-ci")
        .unwrap()
        .current_dir(ws.root())
        .env_remove("OPENAI_API_KEY")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());

    println!("✅ 缺少参数时退出码为 1");
}

/// 只给出一个提交同样是用法错误
#[test]
fn test_ci_with_single_argument_exits_with_one() {
    let ws = TestWorkspace::new();

    Command::cargo_bin("doc-sync-ci")
        .unwrap()
        .current_dir(ws.root())
        .arg("abc123")
        .assert()
        .code(1);

    println!("✅ 参数不足时退出码为 1");
}

/// 帮助信息正常退出
#[test]
fn test_ci_help() {
    Command::cargo_bin("doc-sync-ci")
        .unwrap()
        .arg("--help")
        .assert()
        .success();
}

/// 缺少语言清单是致命的配置错误
#[test]
fn test_missing_languages_file_is_fatal() {
    let ws = TestWorkspace::new();
    ws.write("index.mdx", "# Index");

    Command::cargo_bin("doc-sync")
        .unwrap()
        .arg("--root")
        .arg(ws.root())
        .arg("--dry-run")
        .env_remove("DOC_SYNC_LANGUAGES_FILE")
        .assert()
        .code(1);

    assert!(!ws.exists("fr/index.mdx"));
}

/// dry-run 不需要 API 密钥，也不写文件
#[test]
fn test_dry_run_without_api_key() {
    let ws = TestWorkspace::new();
    ws.write("index.mdx", "# Index").write(
        "docs.json",
        r#"{"navigation": {"languages": [{"language": "en"}, {"language": "fr"}]}}"#,
    );

    Command::cargo_bin("doc-sync")
        .unwrap()
        .arg("--root")
        .arg(ws.root())
        .arg("--dry-run")
        .env_remove("OPENAI_API_KEY")
        .env_remove("DOC_SYNC_LANGUAGES_FILE")
        .env_remove("DOC_SYNC_LOG_LEVEL")
        .env_remove("RUST_LOG")
        .assert()
        .success();

    assert!(!ws.exists("fr/index.mdx"));
}

fn write_languages(ws: &TestWorkspace) {
    ws.write("index.mdx", "# Index").write(
        "docs.json",
        r#"{"navigation": {"languages": [{"language": "en"}, {"language": "fr"}]}}"#,
    );
}

/// 无效的日志级别只产生警告，运行照常完成
#[test]
fn test_invalid_log_level_is_not_fatal() {
    let ws = TestWorkspace::new();
    write_languages(&ws);

    let output = Command::cargo_bin("doc-sync")
        .unwrap()
        .arg("--root")
        .arg(ws.root())
        .arg("--dry-run")
        .env("DOC_SYNC_LOG_LEVEL", "verbose")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("OPENAI_API_KEY")
        .env_remove("DOC_SYNC_LANGUAGES_FILE")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DOC_SYNC_LOG_LEVEL"));
    assert!(stderr.contains("(dry-run)"));

    println!("✅ 无效日志级别回退到 info");
}

/// `.env` 中的日志设置在日志初始化之前生效
#[test]
fn test_dotenv_controls_logging() {
    let ws = TestWorkspace::new();
    write_languages(&ws);
    ws.write(".env", "DOC_SYNC_LOG_LEVEL=error\nNO_COLOR=1\n");

    let output = Command::cargo_bin("doc-sync")
        .unwrap()
        .arg("--root")
        .arg(ws.root())
        .arg("--dry-run")
        .env_remove("DOC_SYNC_LOG_LEVEL")
        .env_remove("NO_COLOR")
        .env_remove("RUST_LOG")
        .env_remove("OPENAI_API_KEY")
        .env_remove("DOC_SYNC_LANGUAGES_FILE")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("INFO"));
    assert!(!stderr.contains("(dry-run)"));

    println!("✅ .env 中的日志级别生效");
}
