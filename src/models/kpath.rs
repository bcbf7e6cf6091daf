//! # k 线数据模型
//!
//! 高对称点常量表以及 `output band` 指令记录。
//!
//! ## 依赖关系
//! - 被 `kpath/generator.rs` 构建
//! - 被 `kpath/plot.rs` 和 `commands/klines.rs` 使用

use crate::error::AimskitError;
use std::fmt;
use std::str::FromStr;

/// 六角布里渊区的高对称点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighSymmetryPoint {
    /// Γ (0, 0, 0)
    G,
    /// K (1/3, 1/3, 0)
    K,
    /// M (1/2, 0, 0)
    M,
}

impl HighSymmetryPoint {
    /// 分数坐标
    pub fn coords(&self) -> [f64; 3] {
        match self {
            HighSymmetryPoint::G => [0.0, 0.0, 0.0],
            HighSymmetryPoint::K => [1.0 / 3.0, 1.0 / 3.0, 0.0],
            HighSymmetryPoint::M => [0.5, 0.0, 0.0],
        }
    }

    /// 用于标签和文件名的字母
    pub fn symbol(&self) -> &'static str {
        match self {
            HighSymmetryPoint::G => "G",
            HighSymmetryPoint::K => "K",
            HighSymmetryPoint::M => "M",
        }
    }
}

impl fmt::Display for HighSymmetryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for HighSymmetryPoint {
    type Err = AimskitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "G" => Ok(HighSymmetryPoint::G),
            "K" => Ok(HighSymmetryPoint::K),
            "M" => Ok(HighSymmetryPoint::M),
            _ => Err(AimskitError::UnknownCenterPoint(s.trim().to_uppercase())),
        }
    }
}

/// 一条 `output band` 指令
#[derive(Debug, Clone, PartialEq)]
pub struct BandLine {
    pub start: [f64; 3],
    pub end: [f64; 3],
    pub n_points: usize,
    pub start_label: String,
    pub end_label: String,
}

impl fmt::Display for BandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "output band {:16.12} {:16.12} {:16.12} {:16.12} {:16.12} {:16.12} {:4} {} {}",
            self.start[0],
            self.start[1],
            self.start[2],
            self.end[0],
            self.end[1],
            self.end[2],
            self.n_points,
            self.start_label,
            self.end_label
        )
    }
}

/// 一次生成得到的全部 k 线
#[derive(Debug, Clone)]
pub struct BandLineSet {
    /// 中心高对称点
    pub center: HighSymmetryPoint,

    /// 按 x 升序排列的指令
    pub lines: Vec<BandLine>,

    /// 去重、排序后的 x 位置
    pub x_positions: Vec<f64>,

    /// 穿过中心点的线的下标 (0 起)
    pub center_line: Option<usize>,

    /// 请求的线数 (稀疏 + 加密)
    pub requested: usize,
}

impl BandLineSet {
    /// 去重移除的线数
    pub fn duplicates_removed(&self) -> usize {
        self.requested.saturating_sub(self.lines.len())
    }
}
