//! 源文档枚举与过滤
//!
//! 源文档是位于固定根目录下、带有指定扩展名的文件。根目录可以是
//! 非递归的（只扫描第一层，例如仓库根目录 `.`），也可以是递归的。

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use walkdir::WalkDir;

/// 源文档的相对路径，始终使用 `/` 作为分隔符，与 git 输出一致
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePath(String);

impl SourcePath {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into().replace('\\', "/");
        let path = path.trim_start_matches("./").to_string();
        SourcePath(path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 相对仓库根目录的路径
    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// 译文路径：`{language}/{source}`
    pub fn translated_path(&self, language: &str) -> PathBuf {
        Path::new(language).join(&self.0)
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SourcePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// 源文档根目录
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceRoot {
    /// 相对仓库根目录的路径，`.` 表示仓库根目录本身
    pub path: String,
    /// 是否递归扫描子目录
    #[serde(default)]
    pub recursive: bool,
}

impl SourceRoot {
    pub fn flat(path: &str) -> Self {
        Self {
            path: path.to_string(),
            recursive: false,
        }
    }

    pub fn recursive(path: &str) -> Self {
        Self {
            path: path.to_string(),
            recursive: true,
        }
    }

    fn normalized(&self) -> &str {
        let path = self.path.trim_end_matches('/');
        let path = path.trim_start_matches("./");
        if path.is_empty() {
            "."
        } else {
            path
        }
    }

    fn is_repo_root(&self) -> bool {
        self.normalized() == "."
    }

    /// 判断 git 风格的相对路径是否位于该根目录之下
    pub fn contains(&self, path: &str) -> bool {
        let parent = match path.rfind('/') {
            Some(idx) => &path[..idx],
            None => "",
        };

        if self.is_repo_root() {
            return self.recursive || parent.is_empty();
        }

        let root = self.normalized();
        if self.recursive {
            path.strip_prefix(root)
                .map_or(false, |rest| rest.starts_with('/'))
        } else {
            parent == root
        }
    }
}

/// 源文档范围：根目录列表 + 扩展名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceScope {
    pub roots: Vec<SourceRoot>,
    pub extension: String,
}

impl SourceScope {
    pub fn new(roots: Vec<SourceRoot>, extension: &str) -> Self {
        Self {
            roots,
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    fn has_extension(&self, path: &str) -> bool {
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext == self.extension)
    }

    /// 判断路径是否属于翻译范围
    pub fn is_in_scope(&self, path: &str) -> bool {
        let path = path.trim_start_matches("./");
        !path.is_empty()
            && self.has_extension(path)
            && self.roots.iter().any(|root| root.contains(path))
    }

    /// 从任意路径列表（例如 git 输出）中筛选出源文档
    pub fn filter<I, S>(&self, paths: I) -> BTreeSet<SourcePath>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .filter(|p| self.is_in_scope(p))
            .map(SourcePath::new)
            .collect()
    }

    /// 扫描仓库，返回所有源文档（按路径排序、去重）
    pub fn enumerate(&self, repo_root: &Path) -> Vec<SourcePath> {
        let mut found = BTreeSet::new();

        for root in &self.roots {
            let dir = if root.is_repo_root() {
                repo_root.to_path_buf()
            } else {
                repo_root.join(root.normalized())
            };

            if !dir.is_dir() {
                tracing::debug!("源目录不存在，跳过: {}", dir.display());
                continue;
            }

            let mut walker = WalkDir::new(&dir).min_depth(1).sort_by_file_name();
            if !root.recursive {
                walker = walker.max_depth(1);
            }

            for entry in walker.into_iter() {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        tracing::warn!("扫描 {} 时出错: {}", dir.display(), e);
                        continue;
                    }
                };

                // walkdir 不跟随符号链接，指向文件的链接同样算作源文档
                let is_file = entry.file_type().is_file()
                    || (entry.path_is_symlink() && entry.path().is_file());
                if !is_file {
                    continue;
                }

                let Some(relative) = relative_git_path(repo_root, entry.path()) else {
                    continue;
                };

                if self.is_in_scope(&relative) {
                    found.insert(SourcePath::new(relative));
                }
            }
        }

        let files: Vec<SourcePath> = found.into_iter().collect();
        tracing::info!("扫描到 {} 个源文件", files.len());
        tracing::debug!("源文件列表: {:?}", files);
        files
    }
}

fn relative_git_path(repo_root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(repo_root).ok()?;
    let parts: Vec<&str> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}
