// Maps series data into chart configurations and owns the mounted chart handles
use crate::domain::series::{MultiSeries, SeriesData};
use crate::error::SeriesError;
use crate::presentation::surface::{ChartHandle, ViewSurface};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLUE: Rgb = Rgb(52, 152, 219);
    pub const GREEN: Rgb = Rgb(46, 204, 113);
    pub const YELLOW: Rgb = Rgb(241, 196, 15);
    pub const PURPLE: Rgb = Rgb(155, 89, 182);
    pub const RED: Rgb = Rgb(231, 76, 60);
    pub const TEAL: Rgb = Rgb(26, 188, 156);

    pub fn rgba(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Doughnut,
    Pie,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Fill {
    Single(String),
    Palette(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    pub background_color: Fill,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

/// Tick labels are prefixed by the chart host; `$` for money axes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ticks {
    pub prefix: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Ticks>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scales {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Axis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintain_aspect_ratio: Option<bool>,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

/// A complete chart configuration in the shape the charting library expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartSpec {
    /// Trend over time: one line, hidden legend, y axis from zero.
    pub fn line(label: &str, series: &SeriesData, color: Rgb) -> Result<Self, SeriesError> {
        series.validate(label)?;
        Ok(Self {
            kind: ChartKind::Line,
            data: ChartData {
                labels: series.labels.clone(),
                datasets: vec![Dataset {
                    label: Some(label.to_string()),
                    data: series.values.clone(),
                    background_color: Fill::Single(color.rgba(0.2)),
                    border_color: Some(color.rgba(1.0)),
                    border_width: Some(2),
                    tension: Some(0.1),
                    fill: None,
                }],
            },
            options: ChartOptions {
                responsive: true,
                maintain_aspect_ratio: None,
                plugins: hidden_legend(),
                scales: Some(zero_based_y()),
            },
        })
    }

    /// Categorical comparison with a single dataset.
    pub fn bar(label: &str, series: &SeriesData, color: Rgb) -> Result<Self, SeriesError> {
        series.validate(label)?;
        Ok(Self {
            kind: ChartKind::Bar,
            data: ChartData {
                labels: series.labels.clone(),
                datasets: vec![Dataset {
                    label: Some(label.to_string()),
                    data: series.values.clone(),
                    background_color: Fill::Single(color.rgba(0.7)),
                    border_color: None,
                    border_width: None,
                    tension: None,
                    fill: None,
                }],
            },
            options: ChartOptions {
                responsive: true,
                maintain_aspect_ratio: None,
                plugins: hidden_legend(),
                scales: Some(zero_based_y()),
            },
        })
    }

    /// Side-by-side bars, one dataset per named sequence, legend shown.
    pub fn grouped_bar(series: &MultiSeries, colors: &[Rgb]) -> Result<Self, SeriesError> {
        series.validate()?;
        let datasets = series
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| Dataset {
                label: Some(s.name.clone()),
                data: s.values.clone(),
                background_color: Fill::Single(pick(colors, i).rgba(0.7)),
                border_color: None,
                border_width: None,
                tension: None,
                fill: None,
            })
            .collect();

        Ok(Self {
            kind: ChartKind::Bar,
            data: ChartData {
                labels: series.labels.clone(),
                datasets,
            },
            options: ChartOptions {
                responsive: true,
                maintain_aspect_ratio: None,
                plugins: Plugins::default(),
                scales: Some(zero_based_y()),
            },
        })
    }

    pub fn stacked_bar(series: &MultiSeries, colors: &[Rgb]) -> Result<Self, SeriesError> {
        let mut spec = Self::grouped_bar(series, colors)?;
        spec.options.scales = Some(Scales {
            x: Some(Axis {
                stacked: Some(true),
                ..Axis::default()
            }),
            y: Some(Axis {
                stacked: Some(true),
                begin_at_zero: Some(true),
                ticks: None,
            }),
        });
        Ok(spec)
    }

    /// Proportional breakdown with the legend on the right.
    pub fn doughnut(series: &SeriesData, palette: &[Rgb]) -> Result<Self, SeriesError> {
        Self::proportional(ChartKind::Doughnut, series, palette)
    }

    pub fn pie(series: &SeriesData, palette: &[Rgb]) -> Result<Self, SeriesError> {
        Self::proportional(ChartKind::Pie, series, palette)
    }

    fn proportional(kind: ChartKind, series: &SeriesData, palette: &[Rgb]) -> Result<Self, SeriesError> {
        series.validate("breakdown")?;
        Ok(Self {
            kind,
            data: ChartData {
                labels: series.labels.clone(),
                datasets: vec![Dataset {
                    label: None,
                    data: series.values.clone(),
                    background_color: Fill::Palette(palette.iter().map(|c| c.rgba(0.7)).collect()),
                    border_color: None,
                    border_width: Some(1),
                    tension: None,
                    fill: None,
                }],
            },
            options: ChartOptions {
                responsive: true,
                maintain_aspect_ratio: None,
                plugins: Plugins {
                    legend: Legend {
                        display: None,
                        position: Some("right".to_string()),
                    },
                },
                scales: None,
            },
        })
    }

    /// Prefix y axis ticks with a dollar sign.
    pub fn currency_axis(mut self) -> Self {
        let scales = self.options.scales.get_or_insert_with(Scales::default);
        let y = scales.y.get_or_insert_with(Axis::default);
        y.ticks = Some(Ticks {
            prefix: "$".to_string(),
        });
        self
    }

    /// Let the canvas size drive the chart instead of a fixed aspect ratio.
    pub fn fluid(mut self) -> Self {
        self.options.maintain_aspect_ratio = Some(false);
        self
    }

    /// Area fill under every line dataset.
    pub fn filled(mut self) -> Self {
        for dataset in &mut self.data.datasets {
            dataset.fill = Some(true);
            if let Some(border) = &dataset.border_color {
                dataset.background_color = Fill::Single(border.replace(", 1)", ", 0.1)"));
            }
            dataset.border_width = None;
        }
        self
    }
}

fn pick(colors: &[Rgb], index: usize) -> Rgb {
    if colors.is_empty() {
        Rgb::BLUE
    } else {
        colors[index % colors.len()]
    }
}

fn hidden_legend() -> Plugins {
    Plugins {
        legend: Legend {
            display: Some(false),
            position: None,
        },
    }
}

fn zero_based_y() -> Scales {
    Scales {
        x: None,
        y: Some(Axis {
            stacked: None,
            begin_at_zero: Some(true),
            ticks: None,
        }),
    }
}

/// Tracks the chart mounted on each canvas so re-rendering replaces it.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    mounted: HashMap<String, ChartHandle>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, surface: &mut dyn ViewSurface, canvas: &str, spec: &ChartSpec) -> ChartHandle {
        if let Some(previous) = self.mounted.remove(canvas) {
            tracing::debug!("Destroying chart {:?} on {}", previous, canvas);
            surface.destroy_chart(previous);
        }
        let handle = surface.mount_chart(canvas, spec);
        self.mounted.insert(canvas.to_string(), handle);
        handle
    }

    pub fn release_all(&mut self, surface: &mut dyn ViewSurface) {
        for (_, handle) in self.mounted.drain() {
            surface.destroy_chart(handle);
        }
    }

}
