// A fully built set of surface changes, applied only after every part rendered cleanly
use crate::presentation::chart_renderer::{ChartRegistry, ChartSpec};
use crate::presentation::surface::{Row, ViewSurface};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewOp {
    Text { id: String, text: String },
    Class { id: String, class: String },
    Activate { group: String, id: String },
    Options { id: String, options: Vec<String> },
    Rows { table: String, rows: Vec<Row> },
    Chart { canvas: String, spec: ChartSpec },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewPlan {
    ops: Vec<ViewOp>,
}

impl ViewPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, id: &str, text: impl Into<String>) -> &mut Self {
        self.ops.push(ViewOp::Text {
            id: id.to_string(),
            text: text.into(),
        });
        self
    }

    pub fn class(&mut self, id: &str, class: &str) -> &mut Self {
        self.ops.push(ViewOp::Class {
            id: id.to_string(),
            class: class.to_string(),
        });
        self
    }

    pub fn activate(&mut self, group: &str, id: &str) -> &mut Self {
        self.ops.push(ViewOp::Activate {
            group: group.to_string(),
            id: id.to_string(),
        });
        self
    }

    pub fn options(&mut self, id: &str, options: Vec<String>) -> &mut Self {
        self.ops.push(ViewOp::Options {
            id: id.to_string(),
            options,
        });
        self
    }

    /// Replace every row of `table`.
    pub fn rows(&mut self, table: &str, rows: Vec<Row>) -> &mut Self {
        self.ops.push(ViewOp::Rows {
            table: table.to_string(),
            rows,
        });
        self
    }

    pub fn chart(&mut self, canvas: &str, spec: ChartSpec) -> &mut Self {
        self.ops.push(ViewOp::Chart {
            canvas: canvas.to_string(),
            spec,
        });
        self
    }

    pub fn apply(self, surface: &mut dyn ViewSurface, charts: &mut ChartRegistry) {
        for op in self.ops {
            match op {
                ViewOp::Text { id, text } => surface.set_text(&id, &text),
                ViewOp::Class { id, class } => surface.set_class(&id, &class),
                ViewOp::Activate { group, id } => surface.activate(&group, &id),
                ViewOp::Options { id, options } => surface.set_options(&id, &options),
                ViewOp::Rows { table, rows } => {
                    surface.clear_rows(&table);
                    for row in rows {
                        surface.append_row(&table, row);
                    }
                }
                ViewOp::Chart { canvas, spec } => {
                    charts.render(surface, &canvas, &spec);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::SeriesData;
    use crate::presentation::chart_renderer::Rgb;
    use crate::presentation::memory_surface::MemorySurface;
    use crate::presentation::surface::Cell;

    #[test]
    fn test_apply_replaces_rows_and_mounts_charts() {
        let mut surface = MemorySurface::new();
        let mut charts = ChartRegistry::new();
        surface.append_row("sales-table", Row::new(vec![Cell::text("stale")]));

        let series = SeriesData::new(vec!["Mon".to_string()], vec![5.0]);
        let mut plan = ViewPlan::new();
        plan.text("total-sales", "$5.00")
            .rows("sales-table", vec![Row::new(vec![Cell::text("fresh")])])
            .chart("sales-trend-chart", ChartSpec::line("Daily Sales", &series, Rgb::GREEN).unwrap());
        plan.apply(&mut surface, &mut charts);

        assert_eq!(surface.text("total-sales"), Some("$5.00"));
        assert_eq!(surface.row_count("sales-table"), 1);
        assert_eq!(surface.visible_rows("sales-table")[0].cell_text(0), "fresh");
        assert_eq!(surface.live_charts("sales-trend-chart"), 1);
    }
}
