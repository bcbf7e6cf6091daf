//! # FHI-aims 主输出文件解析器
//!
//! 从 aims.out 中提取费米能级、VBM 和 CBM。
//!
//! 主输出没有固定语法，这里只做基于标记字符串的逐行扫描。所有匹配规则
//! 都集中在 [`ValueQuery`] 中，调用方只通过 [`find_value`] 访问。
//!
//! ## SOC 计算
//! 二次变分 SOC 的结果附加在同一文件后部，以
//! `STARTING SECOND VARIATIONAL SOC CALCULATION` 行开始。该行之后（含该行）
//! 视为 SOC 段：SOC 模式只接受段内的匹配，非 SOC 模式只接受段前的匹配。
//!
//! ## 依赖关系
//! - 被 `commands/grid.rs` 使用
//! - 使用 `regex` 提取数值
//! - 使用 `utils/output.rs` 打印警告

use crate::error::{AimskitError, Result};
use crate::parsers::glob_in_dir;
use crate::utils::output;

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// SOC 段起始标记
pub const SOC_SECTION_MARKER: &str = "STARTING SECOND VARIATIONAL SOC CALCULATION";

const FERMI_MARKER: &str = "Chemical potential (Fermi level)";
const MD_FERMI_MARKER: &str = "| Chemical Potential                          :";
const VBM_MARKER: &str = "Highest occupied state (VBM)";
const CBM_MARKER: &str = "Lowest unoccupied state (CBM)";

/// 数值提取方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    /// 行中第一个浮点数
    FirstFloat,
    /// 倒数第二个空白分隔字段 (`... -4.12345678 eV`)
    SecondToLastToken,
}

/// 多次匹配时取哪一个
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// 首次匹配即停止扫描
    First,
    /// 取最后一次匹配
    Last,
}

/// 一个待提取的量
#[derive(Debug, Clone)]
pub struct ValueQuery {
    pub markers: Vec<&'static str>,
    pub extract: Extract,
    pub pick: Pick,
}

impl ValueQuery {
    /// 费米能级
    ///
    /// 非 SOC 模式同时接受 MD 输出格式，取第一次匹配；SOC 模式取段内最后一次。
    pub fn fermi_level(soc: bool) -> Self {
        if soc {
            ValueQuery {
                markers: vec![FERMI_MARKER],
                extract: Extract::FirstFloat,
                pick: Pick::Last,
            }
        } else {
            ValueQuery {
                markers: vec![FERMI_MARKER, MD_FERMI_MARKER],
                extract: Extract::FirstFloat,
                pick: Pick::First,
            }
        }
    }

    pub fn vbm() -> Self {
        ValueQuery {
            markers: vec![VBM_MARKER],
            extract: Extract::SecondToLastToken,
            pick: Pick::Last,
        }
    }

    pub fn cbm() -> Self {
        ValueQuery {
            markers: vec![CBM_MARKER],
            extract: Extract::SecondToLastToken,
            pick: Pick::Last,
        }
    }

    fn matches(&self, line: &str) -> bool {
        self.markers.iter().any(|m| line.contains(m))
    }

    fn extract_value(&self, line: &str) -> Option<f64> {
        match self.extract {
            Extract::FirstFloat => float_regex().find(line)?.as_str().parse().ok(),
            Extract::SecondToLastToken => {
                let tokens: Vec<&str> = line.split_whitespace().collect();
                if tokens.len() < 2 {
                    return None;
                }
                tokens[tokens.len() - 2].parse().ok()
            }
        }
    }
}

fn float_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-?\d*\.\d+(?:[Ee][-+]?\d+)?").expect("valid float regex"))
}

/// 在输出行中查找一个量
///
/// 对行序列做一次折叠，状态为 (是否已进入 SOC 段, 当前结果)。
pub fn find_value<'a, I>(lines: I, query: &ValueQuery, soc: bool) -> Option<f64>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut in_soc_section = false;
    let mut found = None;

    for line in lines {
        if line.contains(SOC_SECTION_MARKER) {
            in_soc_section = true;
        }

        if soc != in_soc_section || !query.matches(line) {
            continue;
        }

        if let Some(value) = query.extract_value(line) {
            found = Some(value);
            if query.pick == Pick::First {
                break;
            }
        }
    }

    found
}

/// 自动查找主输出文件：第一个文件名不含 `band` 和 `no_soc` 的 `*.out`
pub fn detect_output_file(dir: &Path) -> Option<PathBuf> {
    glob_in_dir(dir, "*.out").ok()?.into_iter().find(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy())
            .map(|n| !n.contains("band") && !n.contains("no_soc"))
            .unwrap_or(false)
    })
}

/// 确定实际读取的主输出文件
///
/// 指定文件存在则直接使用，否则在其所在目录自动检测；都找不到时打印警告并返回 `None`。
pub fn locate_output_file(path: &Path) -> Option<PathBuf> {
    if path.exists() {
        return Some(path.to_path_buf());
    }

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    match detect_output_file(dir) {
        Some(found) => {
            output::print_info(&format!("Using output file: {}", found.display()));
            Some(found)
        }
        None => {
            output::print_warning("No output file found");
            None
        }
    }
}

/// 读取主输出文件内容
pub fn read_output(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| AimskitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}

/// 读取费米能级
///
/// 文件经 [`locate_output_file`] 确定。任何失败都只打印警告并返回 `None`。
pub fn read_fermi_energy(path: &Path, soc: bool) -> Option<f64> {
    let path = locate_output_file(path)?;

    let content = match read_output(&path) {
        Ok(c) => c,
        Err(e) => {
            output::print_warning(&format!("Could not read Fermi energy from output file: {}", e));
            return None;
        }
    };

    let fermi = find_value(content.lines(), &ValueQuery::fermi_level(soc), soc);
    match fermi {
        Some(ef) => output::print_info(&format!("Found Fermi energy: {} eV", ef)),
        None => output::print_warning(
            "Fermi energy not found in output (using absolute eigenvalues)",
        ),
    }
    fermi
}

/// 读取 VBM 和 CBM
pub fn read_vbm_cbm(path: &Path, soc: bool) -> (Option<f64>, Option<f64>) {
    match read_output(path) {
        Ok(content) => (
            find_value(content.lines(), &ValueQuery::vbm(), soc),
            find_value(content.lines(), &ValueQuery::cbm(), soc),
        ),
        Err(_) => {
            output::print_warning("Could not read VBM/CBM from output file");
            (None, None)
        }
    }
}
