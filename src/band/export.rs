//! # 能带数据导出
//!
//! 将 k 点与 HOMO/LUMO 本征值汇总导出为 CSV，便于表格软件或脚本直接读取。
//!
//! ## 依赖关系
//! - 被 `commands/grid.rs` 调用
//! - 使用 `band/edges.rs` 的 BandEdges
//! - 使用 `csv` + `serde` 写入

use crate::band::BandEdges;
use crate::error::{AimskitError, Result};
use crate::models::BandData;

use serde::Serialize;
use std::path::Path;

/// CSV 中的一行
#[derive(Debug, Serialize)]
struct EdgeRecord {
    kx: f64,
    ky: f64,
    kz: f64,
    homo_ev: f64,
    lumo_ev: f64,
    gap_ev: f64,
}

/// 导出 `kx,ky,kz,homo_ev,lumo_ev,gap_ev`
pub fn to_csv(data: &BandData, edges: &BandEdges, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for ((k, homo), lumo) in data.kpoints.iter().zip(&edges.homo).zip(&edges.lumo) {
        wtr.serialize(EdgeRecord {
            kx: k[0],
            ky: k[1],
            kz: k[2],
            homo_ev: *homo,
            lumo_ev: *lumo,
            gap_ev: lumo - homo,
        })?;
    }

    wtr.flush().map_err(|e| AimskitError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_edges_csv() {
        let mut data = BandData::new();
        data.push_row([0.0, 0.0, 0.0], vec![2.0, 0.0], vec![-1.0, 1.0]);
        data.push_row([0.5, 0.25, 0.0], vec![2.0, 0.0], vec![-0.5, 0.5]);
        let edges = BandEdges::extract(&data, 0, 1);

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("edges.csv");
        to_csv(&data, &edges, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "kx,ky,kz,homo_ev,lumo_ev,gap_ev");
        assert_eq!(lines[2], "0.5,0.25,0.0,-0.5,0.5,1.0");
        assert_eq!(lines.len(), 3);
    }
}
