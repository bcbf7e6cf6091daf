//! # k 线预览图
//!
//! 使用 `plotters` 绘制稀疏层与加密层 k 线在 (kx, ky) 平面上的分布。
//!
//! ## 依赖关系
//! - 被 `commands/klines.rs` 调用
//! - 使用 `kpath/generator.rs` 的 KLineSpec
//! - 使用 `plotters` 渲染图表

use crate::error::{AimskitError, Result};
use crate::kpath::KLineSpec;

use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::path::Path;

/// 生成预览图，扩展名为 `.svg` 时输出 SVG，否则输出 PNG
pub fn generate_preview(spec: &KLineSpec, output_path: &Path, width: u32, height: u32) -> Result<()> {
    let use_svg = output_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);

    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_preview(&root, spec)?;
        root.present()
            .map_err(|e| AimskitError::PlotError(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_preview(&root, spec)?;
        root.present()
            .map_err(|e| AimskitError::PlotError(e.to_string()))?;
    }
    Ok(())
}

/// 绘图核心逻辑
fn draw_preview<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    spec: &KLineSpec,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let plot_err = |e: DrawingAreaErrorKind<DB::ErrorType>| {
        AimskitError::PlotError(format!("{:?}", e))
    };

    root.fill(&WHITE).map_err(plot_err)?;

    let [cx, cy, _] = spec.center.coords();
    let sparse = spec.sparse_positions();
    let cone = spec.cone_positions();
    let (y_start, y_end) = spec.y_range;

    let (x_lo, x_hi) = span(&[
        spec.sparse_range.0,
        spec.sparse_range.1,
        spec.cone_range.0,
        spec.cone_range.1,
        cx,
    ]);
    let (y_lo, y_hi) = span(&[y_start, y_end, cy]);
    let x_margin = ((x_hi - x_lo) * 0.05).max(1e-3);
    let y_margin = ((y_hi - y_lo) * 0.05).max(1e-3);

    let mut chart = ChartBuilder::on(root)
        .caption(
            format!("Band Structure Lines around {} point", spec.center),
            ("sans-serif", 24).into_font(),
        )
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (x_lo - x_margin)..(x_hi + x_margin),
            (y_lo - y_margin)..(y_hi + y_margin),
        )
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("kx")
        .y_desc("ky")
        .light_line_style(BLACK.mix(0.05))
        .draw()
        .map_err(plot_err)?;

    // 阴影区域
    let sparse_fill = BLUE.mix(0.05);
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(spec.sparse_range.0, y_lo), (spec.sparse_range.1, y_hi)],
            sparse_fill.filled(),
        )))
        .map_err(plot_err)?
        .label("Sparse region")
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], sparse_fill.filled()));

    let dense_fill = RED.mix(0.1);
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(spec.cone_range.0, y_lo), (spec.cone_range.1, y_hi)],
            dense_fill.filled(),
        )))
        .map_err(plot_err)?
        .label("Dense region")
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], dense_fill.filled()));

    // 稀疏层与加密层
    let sparse_style = BLUE.mix(0.3).stroke_width(1);
    chart
        .draw_series(
            sparse
                .iter()
                .map(|&x| PathElement::new(vec![(x, y_start), (x, y_end)], sparse_style)),
        )
        .map_err(plot_err)?
        .label("Sparse")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 15, y)], sparse_style));

    let dense_style = RED.mix(0.6).stroke_width(2);
    chart
        .draw_series(
            cone.iter()
                .map(|&x| PathElement::new(vec![(x, y_start), (x, y_end)], dense_style)),
        )
        .map_err(plot_err)?
        .label("Dense")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 15, y)], dense_style));

    // 中心点与参考线
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(cx, y_lo - y_margin), (cx, y_hi + y_margin)],
            BLACK.mix(0.5).stroke_width(1),
        )))
        .map_err(plot_err)?;

    chart
        .draw_series(std::iter::once(Cross::new((cx, cy), 8, BLACK.stroke_width(3))))
        .map_err(plot_err)?
        .label(format!("{} point", spec.center))
        .legend(|(x, y)| Cross::new((x + 7, y), 5, BLACK.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_err)?;

    Ok(())
}

fn span(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
