// In-memory view surface used by the console front end and the tests
use crate::presentation::chart_renderer::ChartSpec;
use crate::presentation::surface::{ChartHandle, EventKind, Row, ViewSurface};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;

#[derive(Debug, Clone, Default)]
struct Element {
    text: Option<String>,
    class: Option<String>,
    visible: Option<bool>,
    value: Option<String>,
}

#[derive(Debug, Clone)]
struct RenderedRow {
    row: Row,
    visible: bool,
}

#[derive(Debug, Default)]
pub struct MemorySurface {
    elements: BTreeMap<String, Element>,
    active: BTreeMap<String, String>,
    options: BTreeMap<String, Vec<String>>,
    tables: BTreeMap<String, Vec<RenderedRow>>,
    charts: HashMap<ChartHandle, (String, ChartSpec)>,
    next_chart: u64,
    listeners: Vec<(String, EventKind)>,
    alerts: Vec<String>,
    navigations: Vec<String>,
    mutations: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Number of changes made to rendered content so far.
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    /// Plain text dump of everything rendered, in element id order.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for (id, element) in &self.elements {
            if element.visible == Some(false) {
                continue;
            }
            match (&element.text, &element.class) {
                (Some(text), Some(class)) => {
                    let _ = writeln!(out, "{:<24} {} ({})", id, text, class);
                }
                (Some(text), None) => {
                    let _ = writeln!(out, "{:<24} {}", id, text);
                }
                (None, _) => {
                    if let Some(value) = &element.value {
                        let _ = writeln!(out, "{:<24} [{}]", id, value);
                    }
                }
            }
        }

        for (group, id) in &self.active {
            let _ = writeln!(out, "[{}] active: {}", group, id);
        }

        for (table, rows) in &self.tables {
            let shown: Vec<&RenderedRow> = rows.iter().filter(|r| r.visible).collect();
            let _ = writeln!(out, "\n# {} ({} of {} rows)", table, shown.len(), rows.len());
            for rendered in shown {
                let cells: Vec<&str> = rendered.row.cells.iter().map(|c| c.text.as_str()).collect();
                let _ = writeln!(out, "  {}", cells.join(" | "));
            }
        }

        let mut charts: Vec<&(String, ChartSpec)> = self.charts.values().collect();
        charts.sort_by(|a, b| a.0.cmp(&b.0));
        for (canvas, spec) in charts {
            let _ = writeln!(
                out,
                "\n~ {} {:?} chart: {} labels, {} datasets",
                canvas,
                spec.kind,
                spec.data.labels.len(),
                spec.data.datasets.len()
            );
        }

        for alert in &self.alerts {
            let _ = writeln!(out, "\n! {}", alert);
        }

        out
    }

    fn element(&mut self, id: &str) -> &mut Element {
        self.elements.entry(id.to_string()).or_default()
    }
}

// Read-back used by the page and controller tests
#[cfg(test)]
impl MemorySurface {
    pub fn text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).and_then(|e| e.text.as_deref())
    }

    pub fn class(&self, id: &str) -> Option<&str> {
        self.elements.get(id).and_then(|e| e.class.as_deref())
    }

    pub fn is_visible(&self, id: &str) -> Option<bool> {
        self.elements.get(id).and_then(|e| e.visible)
    }

    pub fn active(&self, group: &str) -> Option<&str> {
        self.active.get(group).map(String::as_str)
    }

    pub fn options(&self, id: &str) -> &[String] {
        self.options.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn row_count(&self, table: &str) -> usize {
        self.tables.get(table).map(Vec::len).unwrap_or(0)
    }

    pub fn visible_rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .get(table)
            .map(|rows| rows.iter().filter(|r| r.visible).map(|r| r.row.clone()).collect())
            .unwrap_or_default()
    }

    pub fn chart(&self, canvas: &str) -> Option<&ChartSpec> {
        self.charts
            .values()
            .find(|(c, _)| c == canvas)
            .map(|(_, spec)| spec)
    }

    pub fn live_charts(&self, canvas: &str) -> usize {
        self.charts.values().filter(|(c, _)| c == canvas).count()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }
}

impl ViewSurface for MemorySurface {
    fn set_text(&mut self, id: &str, text: &str) {
        self.mutations += 1;
        self.element(id).text = Some(text.to_string());
    }

    fn set_class(&mut self, id: &str, class: &str) {
        self.mutations += 1;
        self.element(id).class = Some(class.to_string());
    }

    fn set_visible(&mut self, id: &str, visible: bool) {
        self.mutations += 1;
        self.element(id).visible = Some(visible);
    }

    fn activate(&mut self, group: &str, id: &str) {
        self.mutations += 1;
        self.active.insert(group.to_string(), id.to_string());
    }

    fn value(&self, id: &str) -> Option<String> {
        self.elements.get(id).and_then(|e| e.value.clone())
    }

    fn set_value(&mut self, id: &str, value: &str) {
        self.element(id).value = Some(value.to_string());
    }

    fn set_options(&mut self, id: &str, options: &[String]) {
        self.mutations += 1;
        self.options.insert(id.to_string(), options.to_vec());
    }

    fn clear_rows(&mut self, table: &str) {
        self.mutations += 1;
        self.tables.insert(table.to_string(), Vec::new());
    }

    fn append_row(&mut self, table: &str, row: Row) {
        self.mutations += 1;
        self.tables
            .entry(table.to_string())
            .or_default()
            .push(RenderedRow { row, visible: true });
    }

    fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .get(table)
            .map(|rows| rows.iter().map(|r| r.row.clone()).collect())
            .unwrap_or_default()
    }

    fn set_row_visible(&mut self, table: &str, index: usize, visible: bool) {
        if let Some(rendered) = self.tables.get_mut(table).and_then(|rows| rows.get_mut(index)) {
            self.mutations += 1;
            rendered.visible = visible;
        }
    }

    fn mount_chart(&mut self, canvas: &str, spec: &ChartSpec) -> ChartHandle {
        self.mutations += 1;
        self.next_chart += 1;
        let handle = ChartHandle(self.next_chart);
        self.charts.insert(handle, (canvas.to_string(), spec.clone()));
        handle
    }

    fn destroy_chart(&mut self, handle: ChartHandle) {
        if self.charts.remove(&handle).is_some() {
            self.mutations += 1;
        }
    }

    fn listen(&mut self, element: &str, event: EventKind) {
        self.listeners.push((element.to_string(), event));
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn navigate(&mut self, path: &str) {
        self.navigations.push(path.to_string());
    }
}
