// 集成测试公共模块
//
// 提供测试替身（版本控制、翻译服务）和临时工作区

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use doc_sync::config::{SyncConfig, TargetLanguage};
use doc_sync::error::{SyncError, SyncResult};
use doc_sync::sources::SourcePath;
use doc_sync::translator::{TranslationRequest, Translator};
use doc_sync::vcs::{DiffBase, VersionControl};

/// 脚本化的版本控制替身
#[derive(Default)]
pub struct FakeVcs {
    staged: Option<Vec<String>>,
    ranges: HashMap<(String, String), Vec<String>>,
    files: HashMap<(String, String), String>,
    unstageable: Vec<PathBuf>,
    pub reads: RefCell<Vec<(DiffBase, String)>>,
    pub staged_paths: RefCell<Vec<PathBuf>>,
}

impl FakeVcs {
    /// 暂存区为空、没有任何提交差异
    pub fn new() -> Self {
        Self {
            staged: Some(Vec::new()),
            ..Default::default()
        }
    }

    pub fn with_staged(mut self, paths: &[&str]) -> Self {
        self.staged = Some(paths.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn with_failing_staged(mut self) -> Self {
        self.staged = None;
        self
    }

    pub fn with_range(mut self, from: &str, to: &str, paths: &[&str]) -> Self {
        self.ranges.insert(
            (from.to_string(), to.to_string()),
            paths.iter().map(|p| p.to_string()).collect(),
        );
        self
    }

    pub fn with_previous_commit(self, paths: &[&str]) -> Self {
        self.with_range("HEAD~1", "HEAD", paths)
    }

    pub fn with_file_at(mut self, revision: &str, path: &str, content: &str) -> Self {
        self.files
            .insert((revision.to_string(), path.to_string()), content.to_string());
        self
    }

    pub fn with_unstageable(mut self, path: &str) -> Self {
        self.unstageable.push(PathBuf::from(path));
        self
    }

    pub fn read_revisions(&self) -> Vec<String> {
        self.reads
            .borrow()
            .iter()
            .map(|(base, _)| base.revision().to_string())
            .collect()
    }
}

impl VersionControl for FakeVcs {
    fn list_changed_paths(&self, from: &str, to: &str) -> SyncResult<Vec<String>> {
        self.ranges
            .get(&(from.to_string(), to.to_string()))
            .cloned()
            .ok_or_else(|| SyncError::VcsQuery(format!("unknown revision {}..{}", from, to)))
    }

    fn list_staged_paths(&self) -> SyncResult<Vec<String>> {
        self.staged
            .clone()
            .ok_or_else(|| SyncError::VcsQuery("not a git repository".to_string()))
    }

    fn read_file_at_ref(&self, base: &DiffBase, path: &SourcePath) -> SyncResult<Option<String>> {
        self.reads
            .borrow_mut()
            .push((base.clone(), path.as_str().to_string()));
        Ok(self
            .files
            .get(&(base.revision().to_string(), path.as_str().to_string()))
            .cloned())
    }

    fn stage_path(&self, path: &Path) -> SyncResult<()> {
        if self.unstageable.iter().any(|p| p == path) {
            return Err(SyncError::VcsQuery("index.lock exists".to_string()));
        }
        self.staged_paths.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

/// 记录下来的一次翻译调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub language_name: String,
    pub old_content: String,
    pub new_content: String,
    pub existing_translation: String,
}

/// 翻译服务替身：返回 `[语言] 新原文`，可指定第 N 次调用失败（从 1 开始）
#[derive(Default)]
pub struct FakeTranslator {
    pub calls: RefCell<Vec<RecordedCall>>,
    fail_on_call: Option<usize>,
}

impl FakeTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on_call(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn expected_output(language_name: &str, new_content: &str) -> String {
        format!("[{}] {}", language_name, new_content)
    }
}

impl Translator for FakeTranslator {
    fn translate(&self, request: &TranslationRequest<'_>) -> SyncResult<String> {
        self.calls.borrow_mut().push(RecordedCall {
            language_name: request.language_name.to_string(),
            old_content: request.old_content.to_string(),
            new_content: request.new_content.to_string(),
            existing_translation: request.existing_translation.to_string(),
        });

        if Some(self.call_count()) == self.fail_on_call {
            return Err(SyncError::TranslationCall("503 Service Unavailable".to_string()));
        }

        Ok(Self::expected_output(request.language_name, request.new_content))
    }
}

/// 临时仓库工作区
pub struct TestWorkspace {
    dir: tempfile::TempDir,
    pub config: SyncConfig,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
            config: SyncConfig::default(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(path, content).expect("write file");
        self
    }

    pub fn read(&self, relative: &str) -> Option<String> {
        fs::read_to_string(self.root().join(relative)).ok()
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.root().join(relative).is_file()
    }

    pub fn remove(&self, relative: &str) {
        fs::remove_file(self.root().join(relative)).expect("remove file");
    }
}

pub fn languages(codes: &[&str]) -> Vec<TargetLanguage> {
    codes.iter().map(|c| TargetLanguage::new(c)).collect()
}
