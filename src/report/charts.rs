use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::Path;

const SIZE: (u32, u32) = (1000, 600);

/// One bar per category
pub struct BarSeries {
    pub label: String,
    pub values: Vec<f64>,
}

/// Text for the axis tick at `x`, blank between categories
fn category_label(categories: &[String], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    categories.get(rounded as usize).cloned().unwrap_or_default()
}

fn headroom(max: f64) -> f64 {
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// Bar chart over categories; several series are drawn side by side
pub fn bar_chart(
    path: &Path,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    categories: &[String],
    series: &[BarSeries],
) -> Result<()> {
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0_f64, f64::max);
    let n = categories.len();

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..headroom(y_max))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|x| category_label(categories, *x))
        .y_label_formatter(&|y| format!("{y:.0}"))
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    let width = 0.8 / series.len().max(1) as f64;
    for (j, s) in series.iter().enumerate() {
        let color = Palette99::pick(j).to_rgba();
        let offset = -0.4 + j as f64 * width;
        chart
            .draw_series(s.values.iter().enumerate().map(|(i, value)| {
                let left = i as f64 + offset;
                Rectangle::new([(left, 0.0), (left + width, *value)], color.filled())
            }))?
            .label(s.label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()
        .with_context(|| format!("Failed to write chart {}", path.display()))?;
    Ok(())
}

/// Line with point markers over ordered categories
pub fn line_chart(
    path: &Path,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    categories: &[String],
    values: &[f64],
) -> Result<()> {
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = values.iter().copied().fold(0.0_f64, f64::max);
    let n = categories.len();

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..headroom(y_max))?;

    chart
        .configure_mesh()
        .x_labels(n)
        .x_label_formatter(&|x| category_label(categories, *x))
        .y_label_formatter(&|y| format!("{y:.0}"))
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, value)| (i as f64, *value))
        .collect();

    chart.draw_series(LineSeries::new(points.iter().copied(), BLUE.stroke_width(2)))?;
    chart.draw_series(points.iter().map(|point| Circle::new(*point, 4, BLUE.filled())))?;

    root.present()
        .with_context(|| format!("Failed to write chart {}", path.display()))?;
    Ok(())
}

/// Step outlines sharing one set of bin edges
pub struct StepSeries {
    pub label: String,
    pub values: Vec<f64>,
}

pub fn step_chart(
    path: &Path,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    edges: &[f64],
    series: &[StepSeries],
) -> Result<()> {
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = edges.last().copied().unwrap_or(1.0);
    let y_max = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0_f64, f64::max);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(0f64..x_max, 0f64..headroom(y_max))?;

    chart
        .configure_mesh()
        .x_label_formatter(&|x| format!("{x:.0}"))
        .y_label_formatter(&|y| format!("{y:.1e}"))
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    for (j, s) in series.iter().enumerate() {
        let color = Palette99::pick(j).to_rgba();
        let steps = s.values.iter().enumerate().flat_map(|(i, value)| {
            let left = edges.get(i).copied().unwrap_or(0.0);
            let right = edges.get(i + 1).copied().unwrap_or(left);
            [(left, *value), (right, *value)]
        });

        chart
            .draw_series(LineSeries::new(steps, color.stroke_width(2)))?
            .label(s.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()
        .with_context(|| format!("Failed to write chart {}", path.display()))?;
    Ok(())
}
