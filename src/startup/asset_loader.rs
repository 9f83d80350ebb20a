use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use axum::body::Bytes;
use thiserror::Error;

/// 静态资源预加载错误（启动期致命）
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("静态资源目录不存在: {0:?}")]
    MissingRoot(PathBuf),
    #[error("读取目录失败 {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("读取文件失败 {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("文件路径无法转换为 UTF-8: {0:?}")]
    NonUtf8Path(PathBuf),
}

/// 单个静态资源
#[derive(Debug, Clone)]
pub struct StaticAsset {
    pub content: Bytes,
    pub content_type: &'static str,
}

/// 启动期一次性构建的只读资源表。
///
/// 不提供任何修改接口，构建完成后通过 `Arc` 共享。
#[derive(Debug, Default)]
pub struct StaticAssets {
    entries: HashMap<String, StaticAsset>,
}

impl StaticAssets {
    /// 按相对路径查找资源
    pub fn get(&self, path: &str) -> Option<&StaticAsset> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 所有资源路径（排序后，便于日志输出）
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

impl FromIterator<(String, Vec<u8>)> for StaticAssets {
    fn from_iter<I: IntoIterator<Item = (String, Vec<u8>)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(path, content)| {
                let asset = StaticAsset {
                    content_type: content_type_for(&path),
                    content: Bytes::from(content),
                };
                (path, asset)
            })
            .collect();
        Self { entries }
    }
}

/// 按文件后缀推断 Content-Type
pub fn content_type_for(path: &str) -> &'static str {
    if path.ends_with(".css") {
        "text/css; charset=utf-8"
    } else if path.ends_with(".js") {
        "application/javascript; charset=utf-8"
    } else if path.ends_with(".png") {
        "image/png"
    } else if path.ends_with(".jpg") || path.ends_with(".jpeg") {
        "image/jpeg"
    } else if path.ends_with(".html") {
        "text/html; charset=utf-8"
    } else {
        "application/octet-stream"
    }
}

/// 递归读取 `root` 下的全部文件到内存。
///
/// 任一文件读取失败即整体失败，不会返回部分加载的结果。
pub fn load_static_assets(root: &Path) -> Result<StaticAssets, AssetError> {
    if !root.is_dir() {
        return Err(AssetError::MissingRoot(root.to_path_buf()));
    }

    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let entries = fs::read_dir(&dir).map_err(|source| AssetError::ReadDir {
            path: dir.clone(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| AssetError::ReadDir {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            // file_type 不跟随符号链接：只下钻真实目录，指向目录的链接直接跳过
            let file_type = entry.file_type().map_err(|source| AssetError::ReadDir {
                path: path.clone(),
                source,
            })?;
            if file_type.is_dir() {
                stack.push(path);
                continue;
            }
            if file_type.is_symlink() && path.is_dir() {
                tracing::debug!("跳过指向目录的符号链接: {:?}", path);
                continue;
            }
            let content = fs::read(&path).map_err(|source| AssetError::ReadFile {
                path: path.clone(),
                source,
            })?;
            files.push((relative_key(root, &path)?, content));
        }
    }

    let assets: StaticAssets = files.into_iter().collect();
    tracing::debug!("静态资源列表: {:?}", assets.paths());
    Ok(assets)
}

/// 相对路径键，统一使用 `/` 分隔
fn relative_key(root: &Path, path: &Path) -> Result<String, AssetError> {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let parts = rel
        .components()
        .map(|c| {
            c.as_os_str()
                .to_str()
                .ok_or_else(|| AssetError::NonUtf8Path(path.to_path_buf()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn content_types_follow_suffix() {
        assert_eq!(content_type_for("style.css"), "text/css; charset=utf-8");
        assert_eq!(
            content_type_for("app.js"),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(content_type_for("logo.png"), "image/png");
        assert_eq!(content_type_for("a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("index.html"), "text/html; charset=utf-8");
        assert_eq!(content_type_for("favicon.ico"), "application/octet-stream");
        assert_eq!(content_type_for("README"), "application/octet-stream");
        // 后缀区分大小写
        assert_eq!(content_type_for("LOGO.PNG"), "application/octet-stream");
    }

    #[test]
    fn loads_nested_files_with_relative_keys() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("index.html"), b"<html></html>").unwrap();
        fs::create_dir_all(dir.path().join("img/icons")).unwrap();
        fs::write(dir.path().join("img/icons/logo.png"), [0x89, b'P']).unwrap();

        let assets = load_static_assets(dir.path()).expect("load");
        assert_eq!(assets.len(), 2);
        assert_eq!(assets.paths(), vec!["img/icons/logo.png", "index.html"]);

        let index = assets.get("index.html").expect("index");
        assert_eq!(index.content.as_ref(), b"<html></html>");
        assert_eq!(index.content_type, "text/html; charset=utf-8");
        assert_eq!(
            assets.get("img/icons/logo.png").unwrap().content_type,
            "image/png"
        );
        assert!(assets.get("missing.css").is_none());
    }

    #[test]
    fn repeated_lookups_return_same_bytes() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), b"console.log(1)").unwrap();
        let assets = load_static_assets(dir.path()).unwrap();

        let first = assets.get("app.js").unwrap().content.clone();
        let second = assets.get("app.js").unwrap().content.clone();
        assert_eq!(first, second);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_followed() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("css")).unwrap();
        fs::write(dir.path().join("css/site.css"), b"a{}").unwrap();
        fs::write(dir.path().join("index.html"), b"<html></html>").unwrap();
        // 指回根目录的环，以及指向文件的链接
        symlink(dir.path(), dir.path().join("css/loop")).unwrap();
        symlink(dir.path().join("index.html"), dir.path().join("home.html")).unwrap();

        let assets = load_static_assets(dir.path()).expect("load");
        assert_eq!(
            assets.paths(),
            vec!["css/site.css", "home.html", "index.html"]
        );
        assert_eq!(
            assets.get("home.html").unwrap().content.as_ref(),
            b"<html></html>"
        );
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_static_assets(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, AssetError::MissingRoot(_)));
    }

    #[test]
    fn empty_root_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let assets = load_static_assets(dir.path()).unwrap();
        assert!(assets.is_empty());
    }
}
