//! # 能带数据模型
//!
//! 存储从 FHI-aims band*.out 文件中提取的 k 点、占据数和本征值。
//!
//! ## 依赖关系
//! - 被 `parsers/band_out.rs` 构建
//! - 被 `band/` 和 `commands/grid.rs` 使用

use serde::{Deserialize, Serialize};

/// 倒空间分数坐标 (kx, ky, kz)
pub type KPoint = [f64; 3];

/// 一组 band 文件的解析结果
///
/// `occupations[k][b]` 与 `eigenvalues[k][b]` 按 (k 点, 能带) 索引，
/// 行顺序与文件中的行顺序一致，多个文件按文件顺序拼接。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandData {
    /// k 点坐标
    pub kpoints: Vec<KPoint>,

    /// 占据数矩阵
    pub occupations: Vec<Vec<f64>>,

    /// 本征值矩阵 (eV)
    pub eigenvalues: Vec<Vec<f64>>,
}

impl BandData {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一行 (k 点及其各能带的占据数/本征值)
    pub fn push_row(&mut self, kpoint: KPoint, occupations: Vec<f64>, eigenvalues: Vec<f64>) {
        self.kpoints.push(kpoint);
        self.occupations.push(occupations);
        self.eigenvalues.push(eigenvalues);
    }

    /// 拼接另一组数据（不合并重复 k 点）
    pub fn append(&mut self, mut other: BandData) {
        self.kpoints.append(&mut other.kpoints);
        self.occupations.append(&mut other.occupations);
        self.eigenvalues.append(&mut other.eigenvalues);
    }

    /// k 点数
    pub fn len(&self) -> usize {
        self.kpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kpoints.is_empty()
    }

    /// 能带数（取第一行；行间一致性由解析器保证）
    pub fn n_bands(&self) -> usize {
        self.occupations.first().map(|row| row.len()).unwrap_or(0)
    }

    /// 取 k 点坐标的某一分量 (0 = kx, 1 = ky, 2 = kz)
    pub fn k_component(&self, axis: usize) -> Vec<f64> {
        self.kpoints.iter().map(|k| k[axis]).collect()
    }

    /// 取某条能带在所有 k 点上的本征值
    pub fn eigenvalue_column(&self, band: usize) -> Vec<f64> {
        self.eigenvalues.iter().map(|row| row[band]).collect()
    }
}
