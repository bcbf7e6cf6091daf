//! # HOMO/LUMO 定位
//!
//! 按分数占据约定（阈值 0.5）在占据数矩阵中定位 HOMO 和 LUMO 能带。
//!
//! 两次扫描彼此独立：HOMO 从最高能带向下找第一条在任一 k 点占据数 > 0.5
//! 的能带，LUMO 从最低能带向上找第一条在所有 k 点占据数都 < 0.5 的能带。
//! 占据数随能带不单调时（能级交叉、SOC 劈裂）不能保证 HOMO < LUMO。
//!
//! ## 依赖关系
//! - 被 `commands/grid.rs` 使用
//! - 使用 `models/band.rs`

use crate::models::BandData;

/// 占据/未占据判据
pub const OCCUPATION_THRESHOLD: f64 = 0.5;

/// 返回 (HOMO, LUMO) 能带下标；无法确定时为 `None`
pub fn find_homo_lumo(occupations: &[Vec<f64>]) -> (Option<usize>, Option<usize>) {
    let n_bands = match occupations.first() {
        Some(row) => row.len(),
        None => return (None, None),
    };

    let column = |band: usize| occupations.iter().map(move |row| row[band]);

    let homo = (0..n_bands)
        .rev()
        .find(|&b| column(b).any(|occ| occ > OCCUPATION_THRESHOLD));

    let lumo = (0..n_bands).find(|&b| column(b).all(|occ| occ < OCCUPATION_THRESHOLD));

    (homo, lumo)
}

/// HOMO/LUMO 能带在各 k 点上的本征值
#[derive(Debug, Clone)]
pub struct BandEdges {
    pub homo_index: usize,
    pub lumo_index: usize,
    pub homo: Vec<f64>,
    pub lumo: Vec<f64>,
}

impl BandEdges {
    /// 提取 HOMO/LUMO 两列本征值
    pub fn extract(data: &BandData, homo_index: usize, lumo_index: usize) -> Self {
        BandEdges {
            homo_index,
            lumo_index,
            homo: data.eigenvalue_column(homo_index),
            lumo: data.eigenvalue_column(lumo_index),
        }
    }

    /// 各 k 点的直接带隙 LUMO - HOMO
    pub fn gaps(&self) -> Vec<f64> {
        self.homo
            .iter()
            .zip(&self.lumo)
            .map(|(h, l)| l - h)
            .collect()
    }

    pub fn homo_range(&self) -> (f64, f64) {
        min_max(&self.homo)
    }

    pub fn lumo_range(&self) -> (f64, f64) {
        min_max(&self.lumo)
    }

    pub fn gap_range(&self) -> (f64, f64) {
        min_max(&self.gaps())
    }

    /// HOMO 下标不小于 LUMO 下标
    pub fn is_inverted(&self) -> bool {
        self.homo_index >= self.lumo_index
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
