//! # 解析器模块
//!
//! 读取仪器导出的结果 XML 并提取测量值。
//!
//! ## 依赖关系
//! - 被 `commands/`、`batch/` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: results_xml

pub mod results_xml;

use crate::error::{GpcError, Result};
use crate::models::ResultTable;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// 默认的结果文件匹配模式
pub const DEFAULT_RESULTS_PATTERN: &str = "*results*.xml";

/// 读取并解析结果文件
///
/// 空结果表不是错误，调用方需自行检查 `is_empty()`。
pub fn parse_results_file(path: &Path) -> Result<ResultTable> {
    let content = fs::read_to_string(path).map_err(|e| GpcError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(results_xml::extract(&content))
}

/// 在目录中查找最新（按修改时间）的结果文件
pub fn find_latest_results(dir: &Path, pattern: &str) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(GpcError::DirectoryNotFound {
            path: dir.display().to_string(),
        });
    }

    let glob_pattern = glob::Pattern::new(pattern).map_err(|e| {
        GpcError::InvalidArgument(format!("Invalid pattern '{}': {}", pattern, e))
    })?;

    let mut latest: Option<(SystemTime, PathBuf)> = None;

    for entry in WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let matches = entry
            .file_name()
            .to_str()
            .map(|name| glob_pattern.matches(name))
            .unwrap_or(false);
        if !matches {
            continue;
        }

        let modified = entry
            .metadata()
            .ok()
            .and_then(|m| m.modified().ok())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        // 修改时间相同时取文件名较大者（时间戳命名）
        let newer = match &latest {
            None => true,
            Some((t, p)) => (modified, entry.path()) > (*t, p.as_path()),
        };
        if newer {
            latest = Some((modified, entry.path().to_path_buf()));
        }
    }

    latest.map(|(_, path)| path).ok_or_else(|| GpcError::NoFilesFound {
        dir: dir.display().to_string(),
        pattern: pattern.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gpcutil-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_parse_results_file() {
        let dir = scratch_dir("parse");
        let path = dir.join("results_20260113_151025.xml");
        fs::write(
            &path,
            "<result type=\"molar mass\">\n<name>Mn</name>\n<scalar units=\"g/mol\" uncertainty=\"300\" peak=\"1\">15000</scalar>\n",
        )
        .unwrap();

        let table = parse_results_file(&path).unwrap();
        assert_eq!(table[&1]["Mn"].value, 15000.0);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_results_file(Path::new("/nonexistent/results.xml")).unwrap_err();
        assert!(matches!(err, GpcError::FileReadError { .. }));
    }

    #[test]
    fn test_find_latest_results() {
        let dir = scratch_dir("latest");
        fs::write(dir.join("results_20260113_151025.xml"), "").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();

        let found = find_latest_results(&dir, DEFAULT_RESULTS_PATTERN).unwrap();
        assert_eq!(
            found.file_name().unwrap().to_str().unwrap(),
            "results_20260113_151025.xml"
        );

        fs::remove_dir_all(&dir).ok();
    }

    fn touch(path: &Path, secs_since_epoch: u64) {
        fs::write(path, "").unwrap();
        let mtime = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(secs_since_epoch);
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();
    }

    #[test]
    fn test_find_latest_results_prefers_newest_mtime() {
        let dir = scratch_dir("newest");
        // 较新的文件名排序在前，确保按修改时间而不是文件名选择
        touch(&dir.join("results_xml_b.xml"), 1_700_000_000);
        touch(&dir.join("results_xml_a.xml"), 1_700_000_100);
        touch(&dir.join("results_xml_c.xml"), 1_600_000_000);

        let found = find_latest_results(&dir, DEFAULT_RESULTS_PATTERN).unwrap();
        assert_eq!(found, dir.join("results_xml_a.xml"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_find_latest_results_tie_breaks_on_name() {
        let dir = scratch_dir("tie");
        touch(&dir.join("results_20260113_151025.xml"), 1_700_000_000);
        touch(&dir.join("results_20260114_090000.xml"), 1_700_000_000);
        touch(&dir.join("results_20260112_120000.xml"), 1_700_000_000);

        let found = find_latest_results(&dir, DEFAULT_RESULTS_PATTERN).unwrap();
        assert_eq!(found, dir.join("results_20260114_090000.xml"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_find_latest_results_none_matching() {
        let dir = scratch_dir("nomatch");
        fs::write(dir.join("notes.txt"), "").unwrap();

        let err = find_latest_results(&dir, DEFAULT_RESULTS_PATTERN).unwrap_err();
        assert!(matches!(err, GpcError::NoFilesFound { .. }));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_find_latest_results_missing_dir() {
        let err = find_latest_results(Path::new("/nonexistent/run"), "*.xml").unwrap_err();
        assert!(matches!(err, GpcError::DirectoryNotFound { .. }));
    }
}
