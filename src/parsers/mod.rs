//! # 解析器模块
//!
//! 提供 FHI-aims 输出文件的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: band_out, aims_out

pub mod aims_out;
pub mod band_out;

use crate::error::{AimskitError, Result};
use std::path::{Path, PathBuf};

/// 在目录中按 glob 模式匹配文件，结果按字典序排序
///
/// 目录部分先转义，目录名中的 `[`, `]`, `*` 等按字面匹配。
pub(crate) fn glob_in_dir(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let escaped = glob::Pattern::escape(&dir.display().to_string());
    let full = Path::new(&escaped).join(pattern).display().to_string();
    let paths = glob::glob(&full).map_err(|e| {
        AimskitError::InvalidArgument(format!("Invalid glob pattern '{}': {}", full, e))
    })?;

    let mut files: Vec<PathBuf> = paths.filter_map(|p| p.ok()).filter(|p| p.is_file()).collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_glob_in_dir_with_metacharacters() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("run[1]*");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("band1002.out"), "").unwrap();
        fs::write(dir.join("band1001.out"), "").unwrap();

        let files = glob_in_dir(&dir, "band*.out").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["band1001.out", "band1002.out"]);
    }
}
