use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::extract::PlotError;
use super::smooth::smooth;
use crate::config::CONFIG;
use crate::models::curves::TrainingCurves;

// matplotlib 风格的橙色原始曲线
const RAW_COLOR: RGBColor = RGBColor(255, 165, 0);

fn render_err<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Render(e.to_string())
}

/// 渲染两栏曲线图并写到 out_path
///
/// 左边是按迭代计数的 loss（原始 + 平滑），右边是按 epoch 计数的
/// accuracy；没有 accuracy 数据时右边放一行占位文字。
pub fn render_curves(
    curves: &TrainingCurves,
    out_path: &Path,
    smooth_factor: f64,
) -> Result<(), PlotError> {
    let size = (CONFIG.plot.chart_width, CONFIG.plot.chart_height);
    let root = BitMapBackend::new(out_path, size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let panels = root.split_evenly((1, 2));
    draw_loss_panel(&panels[0], curves, smooth_factor)?;
    draw_accuracy_panel(&panels[1], curves)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn draw_loss_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    curves: &TrainingCurves,
    smooth_factor: f64,
) -> Result<(), PlotError> {
    let max_iter = curves.iters.last().copied().unwrap_or(1);
    let max_loss = curves.losses.iter().cloned().fold(f64::NAN, f64::max);
    let y_top = if max_loss.is_finite() && max_loss > 0.0 {
        max_loss * 1.05
    } else {
        1.0
    };

    let mut chart = ChartBuilder::on(area)
        .caption("Training Loss (CTC)", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0..max_iter + 1, 0f64..y_top)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Iterations")
        .y_desc("Loss")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(
            curves
                .iters
                .iter()
                .zip(curves.losses.iter())
                .map(|(&x, &y)| (x, y)),
            RAW_COLOR.mix(0.3),
        ))
        .map_err(render_err)?
        .label("Raw")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RAW_COLOR));

    // 点太少的时候平滑曲线没意义，超过 10 个点才画
    if curves.losses.len() > 10 {
        let smoothed = smooth(&curves.losses, smooth_factor);
        chart
            .draw_series(LineSeries::new(
                curves
                    .iters
                    .iter()
                    .zip(smoothed.iter())
                    .map(|(&x, &y)| (x, y)),
                &RED,
            ))
            .map_err(render_err)?
            .label("Smooth")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_err)?;

    Ok(())
}

fn draw_accuracy_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    curves: &TrainingCurves,
) -> Result<(), PlotError> {
    if !curves.has_accuracy() {
        let (w, h) = area.dim_in_pixel();
        area.draw(&Text::new(
            "No Accuracy Data Found",
            (w as i32 / 2 - 90, h as i32 / 2),
            ("sans-serif", 20),
        ))
        .map_err(render_err)?;
        return Ok(());
    }

    let max_epoch = curves.epochs.last().copied().unwrap_or(1);
    let mut chart = ChartBuilder::on(area)
        .caption("Test Accuracy", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0..max_epoch + 1, 0f64..1.05f64)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Epochs")
        .y_desc("Accuracy (0~1)")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(
            curves
                .epochs
                .iter()
                .zip(curves.accuracies.iter())
                .map(|(&x, &y)| (x, y)),
            &BLUE,
        ))
        .map_err(render_err)?
        .label("Accuracy")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart
        .draw_series(
            curves
                .epochs
                .iter()
                .zip(curves.accuracies.iter())
                .map(|(&x, &y)| Circle::new((x, y), 3, BLUE.filled())),
        )
        .map_err(render_err)?;

    // 标出最高点
    if let Some((epoch, acc)) = curves.max_accuracy() {
        chart
            .draw_series(std::iter::once(Text::new(
                format!("Max: {acc:.4}"),
                (epoch, acc),
                ("sans-serif", 16),
            )))
            .map_err(render_err)?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn loss_only_curves(n: usize) -> TrainingCurves {
        TrainingCurves {
            iters: (1..=n).collect(),
            losses: (0..n).map(|i| 1.0 / (i + 1) as f64).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_with_accuracy() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("curves.png");
        let mut curves = loss_only_curves(50);
        curves.epochs = vec![1, 2, 3];
        curves.accuracies = vec![0.5, 0.9, 0.7];

        render_curves(&curves, &out, 0.9).unwrap();
        assert!(out.exists());
        assert!(std::fs::metadata(&out).unwrap().len() > 0);
    }

    #[test]
    fn test_render_without_accuracy() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("curves.png");
        let curves = loss_only_curves(5);

        render_curves(&curves, &out, 0.9).unwrap();
        assert!(out.exists());
    }
}
