//! # 两层 k 线生成器
//!
//! 在高对称点附近生成一组平行于 ky 的 `output band` 指令：
//! - 稀疏层：较宽 x 范围内的背景覆盖
//! - 加密层：中心点附近（如 Dirac 锥）的细致覆盖，总是包含精确的中心点
//!
//! 两层 x 位置合并后去重、升序排列，穿过中心点的线标记为 `*`。
//!
//! ## 输出格式
//! ```text
//! # FHI-aims band structure lines around G point
//! ...
//!
//! output band   0.000000000000   0.000000000000   0.000000000000   0.000000000000   0.500000000000   0.000000000000   41 G* A*
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/klines.rs` 调用
//! - 使用 `models/kpath.rs`

use crate::error::{AimskitError, Result};
use crate::models::{BandLine, BandLineSet, HighSymmetryPoint};

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// 去重容差
pub const DEDUP_TOLERANCE: f64 = 1e-8;

/// 判定某条线穿过中心点的容差，同时也是加密层对齐中心的阈值
pub const CENTER_TOLERANCE: f64 = 1e-6;

/// k 线生成参数
#[derive(Debug, Clone, PartialEq)]
pub struct KLineSpec {
    pub center: HighSymmetryPoint,
    pub sparse_range: (f64, f64),
    pub sparse_density: usize,
    pub cone_range: (f64, f64),
    pub cone_density: usize,
    pub y_range: (f64, f64),
    pub points_per_line: usize,
}

impl KLineSpec {
    /// 由表单输入构建（范围为 "min,max" 字符串）
    #[allow(clippy::too_many_arguments)]
    pub fn from_form(
        center: &str,
        sparse_range: &str,
        sparse_density: usize,
        cone_range: &str,
        cone_density: usize,
        y_range: &str,
        points_per_line: usize,
    ) -> Result<Self> {
        if [center, sparse_range, cone_range, y_range]
            .iter()
            .any(|s| s.trim().is_empty())
        {
            return Err(AimskitError::InvalidArgument(
                "Please fill in all fields".to_string(),
            ));
        }

        if cone_density == 0 {
            return Err(AimskitError::InvalidArgument(
                "Cone density must be at least 1 (the dense grid always contains the center point)"
                    .to_string(),
            ));
        }

        Ok(KLineSpec {
            center: center.parse()?,
            sparse_range: parse_range(sparse_range)?,
            sparse_density,
            cone_range: parse_range(cone_range)?,
            cone_density,
            y_range: parse_range(y_range)?,
            points_per_line,
        })
    }

    /// 稀疏层 x 位置
    pub fn sparse_positions(&self) -> Vec<f64> {
        linspace(self.sparse_range.0, self.sparse_range.1, self.sparse_density)
    }

    /// 加密层 x 位置（未对齐中心）
    pub fn cone_positions(&self) -> Vec<f64> {
        linspace(self.cone_range.0, self.cone_range.1, self.cone_density)
    }

    /// 加密层 x 位置，最接近中心的点被替换为精确的中心 x
    pub fn snapped_cone_positions(&self) -> Vec<f64> {
        let cx = self.center.coords()[0];
        let mut positions = self.cone_positions();

        let closest = positions
            .iter()
            .enumerate()
            .map(|(i, x)| (i, (x - cx).abs()))
            .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((i, d)),
            });

        if let Some((idx, dist)) = closest {
            if dist > CENTER_TOLERANCE {
                positions[idx] = cx;
            }
        }

        positions
    }

    /// 请求的总线数
    pub fn requested(&self) -> usize {
        self.sparse_density + self.cone_density
    }
}

/// 解析 "min,max"
pub fn parse_range(s: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(AimskitError::InvalidRange(s.to_string()));
    }

    let lo: f64 = parts[0]
        .trim()
        .parse()
        .map_err(|_| AimskitError::InvalidRange(s.to_string()))?;
    let hi: f64 = parts[1]
        .trim()
        .parse()
        .map_err(|_| AimskitError::InvalidRange(s.to_string()))?;

    Ok((lo, hi))
}

/// 在 [start, stop] 上等距取 n 个点（含端点）
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = stop;
            values
        }
    }
}

/// 移除容差内的重复值并升序排列
///
/// 与已保留的任一值相差小于 `tolerance` 的值被丢弃，先出现者保留。
pub fn remove_duplicate_lines(positions: &[f64], tolerance: f64) -> Vec<f64> {
    let mut unique: Vec<f64> = Vec::with_capacity(positions.len());

    for &x in positions {
        if !unique.iter().any(|u| (x - u).abs() < tolerance) {
            unique.push(x);
        }
    }

    unique.sort_by(|a, b| a.total_cmp(b));
    unique
}

/// 生成全部 k 线
pub fn generate_band_lines(spec: &KLineSpec) -> BandLineSet {
    let [cx, _, cz] = spec.center.coords();
    let (y_start, y_end) = spec.y_range;

    let mut all_positions = spec.sparse_positions();
    all_positions.extend(spec.snapped_cone_positions());

    let x_positions = remove_duplicate_lines(&all_positions, DEDUP_TOLERANCE);

    let mut center_line = None;
    let lines = x_positions
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let on_center = (x - cx).abs() < CENTER_TOLERANCE;
            if on_center {
                center_line = Some(i);
            }

            let (start_label, end_label) = if on_center {
                (format!("{}*", spec.center), "A*".to_string())
            } else {
                (format!("{}{}", spec.center, i + 1), format!("A{}", i + 1))
            };

            BandLine {
                start: [x, y_start, cz],
                end: [x, y_end, cz],
                n_points: spec.points_per_line,
                start_label,
                end_label,
            }
        })
        .collect();

    BandLineSet {
        center: spec.center,
        lines,
        x_positions,
        center_line,
        requested: spec.requested(),
    }
}

/// 渲染指令文件内容（注释表头 + 每行一条指令）
pub fn render_band_lines(spec: &KLineSpec, set: &BandLineSet) -> String {
    let mut out = String::new();

    // String 写入不会失败
    let _ = writeln!(
        out,
        "# FHI-aims band structure lines around {} point",
        set.center
    );
    let _ = writeln!(
        out,
        "# Sparse grid: {} lines from x={} to x={}",
        spec.sparse_density,
        py_float(spec.sparse_range.0),
        py_float(spec.sparse_range.1)
    );
    let _ = writeln!(
        out,
        "# Dense grid: {} lines from x={} to x={}",
        spec.cone_density,
        py_float(spec.cone_range.0),
        py_float(spec.cone_range.1)
    );
    let _ = writeln!(out, "# Total unique lines: {}", set.x_positions.len());
    if let Some(idx) = set.center_line {
        let _ = writeln!(out, "# Center line at index {} (marked with *)", idx + 1);
    }
    let _ = writeln!(
        out,
        "# Each line goes from y={} to y={} with {} points\n",
        py_float(spec.y_range.0),
        py_float(spec.y_range.1),
        spec.points_per_line
    );

    for line in &set.lines {
        let _ = writeln!(out, "{}", line);
    }

    out
}

/// 写出指令文件
pub fn write_band_lines(spec: &KLineSpec, set: &BandLineSet, output_path: &Path) -> Result<()> {
    fs::write(output_path, render_band_lines(spec, set)).map_err(|e| {
        AimskitError::FileWriteError {
            path: output_path.display().to_string(),
            source: e,
        }
    })
}

/// 表头数值格式：与常见浮点 repr 一致
///
/// 整数值保留 ".0"（0.0 而不是 0）；绝对值小于 1e-4 或不小于 1e16 时改用指数形式，
/// 指数带符号且至少两位（`-1e-05`, `2.5e+16`）。
fn py_float(v: f64) -> String {
    let abs = v.abs();
    if v.is_finite() && v != 0.0 && !(1e-4..1e16).contains(&abs) {
        let sci = format!("{:e}", v);
        return match sci.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(d) => ('-', d),
                    None => ('+', exp),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => sci,
        };
    }

    if v.is_finite() && v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn default_spec(center: &str) -> KLineSpec {
        KLineSpec::from_form(center, "-0.2,0.2", 10, "-0.05,0.05", 10, "0.0,0.5", 41).unwrap()
    }

    #[test]
    fn test_header_float_format() {
        assert_eq!(py_float(0.0), "0.0");
        assert_eq!(py_float(-2.0), "-2.0");
        assert_eq!(py_float(-0.05), "-0.05");
        assert_eq!(py_float(0.0001), "0.0001");
        assert_eq!(py_float(-0.00001), "-1e-05");
        assert_eq!(py_float(2.5e-7), "2.5e-07");
        assert_eq!(py_float(1e16), "1e+16");
        assert_eq!(py_float(1.5e123), "1.5e+123");
    }

    #[test]
    fn test_linspace() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(0.3, 1.0, 1), vec![0.3]);
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let v = linspace(-0.2, 0.2, 10);
        assert_eq!(v.len(), 10);
        assert_eq!(v[0], -0.2);
        assert_eq!(v[9], 0.2);
    }

    #[test]
    fn test_remove_duplicate_lines() {
        let unique = remove_duplicate_lines(&[0.1, -0.3, 0.1 + 5e-9, 0.2], DEDUP_TOLERANCE);
        assert_eq!(unique, vec![-0.3, 0.1, 0.2]);

        assert!(remove_duplicate_lines(&[], DEDUP_TOLERANCE).is_empty());
    }

    #[test]
    fn test_remove_duplicate_lines_idempotent() {
        let input = [0.5, 0.0, 0.25, 0.0 + 1e-9, -0.25, 0.5];
        let once = remove_duplicate_lines(&input, DEDUP_TOLERANCE);
        let twice = remove_duplicate_lines(&once, DEDUP_TOLERANCE);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 4);
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("-0.2, 0.2").unwrap(), (-0.2, 0.2));
        assert!(parse_range("0.2").is_err());
        assert!(parse_range("0.1,0.2,0.3").is_err());
        assert!(parse_range("a,0.2").is_err());
    }

    #[test]
    fn test_form_validation() {
        let blank = KLineSpec::from_form(" ", "-0.2,0.2", 10, "-0.05,0.05", 10, "0.0,0.5", 41);
        assert_eq!(blank.unwrap_err().to_string(), "Please fill in all fields");

        let unknown = KLineSpec::from_form("X", "-0.2,0.2", 10, "-0.05,0.05", 10, "0.0,0.5", 41);
        assert!(matches!(
            unknown.unwrap_err(),
            AimskitError::UnknownCenterPoint(_)
        ));

        let no_cone = KLineSpec::from_form("G", "-0.2,0.2", 10, "-0.05,0.05", 0, "0.0,0.5", 41);
        assert!(no_cone.is_err());
    }

    #[test]
    fn test_snap_replaces_not_inserts() {
        let spec = default_spec("G");
        let cone = spec.snapped_cone_positions();
        assert_eq!(cone.len(), 10);
        assert_eq!(cone.iter().filter(|&&x| x == 0.0).count(), 1);

        let set = generate_band_lines(&spec);
        assert_eq!(set.x_positions.iter().filter(|&&x| x == 0.0).count(), 1);
    }

    #[test]
    fn test_snap_skipped_when_already_on_center() {
        let spec = KLineSpec::from_form("G", "-0.2,0.2", 10, "-0.1,0.1", 3, "0.0,0.5", 41).unwrap();
        assert_eq!(spec.snapped_cone_positions(), spec.cone_positions());
    }

    #[test]
    fn test_default_gamma_lines() {
        let spec = default_spec("g");
        let set = generate_band_lines(&spec);

        // 两层之间没有重合点
        assert_eq!(set.lines.len(), 20);
        assert_eq!(set.duplicates_removed(), 0);

        let sorted = set.x_positions.windows(2).all(|w| w[0] < w[1]);
        assert!(sorted);

        let idx = set.center_line.unwrap();
        assert_eq!(set.x_positions[idx], 0.0);
        assert_eq!(set.lines[idx].start_label, "G*");
        assert_eq!(set.lines[idx].end_label, "A*");

        assert_eq!(set.lines[0].start_label, "G1");
        assert_eq!(set.lines[0].end_label, "A1");
        assert_eq!(set.lines[0].start, [-0.2, 0.0, 0.0]);
        assert_eq!(set.lines[0].end, [-0.2, 0.5, 0.0]);
        assert_eq!(set.lines[19].start_label, "G20");
    }

    #[test]
    fn test_overlapping_ranges_report_duplicates() {
        let spec = KLineSpec::from_form("G", "-0.1,0.1", 3, "-0.1,0.1", 3, "0.0,0.5", 41).unwrap();
        let set = generate_band_lines(&spec);

        assert_eq!(set.x_positions, vec![-0.1, 0.0, 0.1]);
        assert_eq!(set.duplicates_removed(), 3);
        assert_eq!(set.center_line, Some(1));
    }

    #[test]
    fn test_k_point_center() {
        let spec =
            KLineSpec::from_form("K", "0.133,0.533", 10, "0.283,0.383", 10, "0.0,0.5", 21).unwrap();
        let set = generate_band_lines(&spec);

        let idx = set.center_line.unwrap();
        assert_eq!(set.x_positions[idx], 1.0 / 3.0);
        assert_eq!(set.lines[idx].start_label, "K*");
        assert_eq!(set.lines[idx].start[2], 0.0);
        assert_eq!(set.lines[idx].n_points, 21);
    }

    #[test]
    fn test_rendered_file() {
        let spec = default_spec("G");
        let set = generate_band_lines(&spec);

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("band_lines_g_twotier.txt");
        write_band_lines(&spec, &set, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        let center = set.center_line.unwrap() + 1;

        assert_eq!(lines[0], "# FHI-aims band structure lines around G point");
        assert_eq!(lines[1], "# Sparse grid: 10 lines from x=-0.2 to x=0.2");
        assert_eq!(lines[2], "# Dense grid: 10 lines from x=-0.05 to x=0.05");
        assert_eq!(lines[3], "# Total unique lines: 20");
        assert_eq!(
            lines[4],
            format!("# Center line at index {} (marked with *)", center)
        );
        assert_eq!(
            lines[5],
            "# Each line goes from y=0.0 to y=0.5 with 41 points"
        );
        assert_eq!(lines[6], "");
        assert_eq!(lines.len(), 7 + 20);
        assert!(lines[7].starts_with("output band  -0.200000000000   0.000000000000"));
        assert!(lines[7].ends_with("   41 G1 A1"));
        assert!(lines[6 + center].ends_with(" G* A*"));
    }
}
