// Rendering target contract: element ids are owned by the page markup
use crate::presentation::chart_renderer::ChartSpec;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub text: String,
    pub class: Option<String>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
        }
    }

    pub fn tagged(text: impl Into<String>, class: &str) -> Self {
        Self {
            text: text.into(),
            class: Some(class.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    /// Record identity carried as `data-id`.
    pub key: Option<String>,
    pub class: Option<String>,
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            key: None,
            class: None,
            cells,
        }
    }

    pub fn keyed(key: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            key: Some(key.into()),
            class: None,
            cells,
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn cell_text(&self, index: usize) -> &str {
        self.cells.get(index).map(|c| c.text.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub u64);

/// Event names a handler can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Input,
    Change,
    Submit,
}

/// What page code may do to the presentation layer.
pub trait ViewSurface {
    fn set_text(&mut self, id: &str, text: &str);

    fn set_class(&mut self, id: &str, class: &str);

    fn set_visible(&mut self, id: &str, visible: bool);

    /// Mark one element of a group active and deactivate the rest.
    fn activate(&mut self, group: &str, id: &str);

    /// Current value of a form control, if the user has set one.
    fn value(&self, id: &str) -> Option<String>;

    fn set_value(&mut self, id: &str, value: &str);

    /// Replace the dynamic options of a select element.
    fn set_options(&mut self, id: &str, options: &[String]);

    fn clear_rows(&mut self, table: &str);

    fn append_row(&mut self, table: &str, row: Row);

    fn rows(&self, table: &str) -> Vec<Row>;

    fn set_row_visible(&mut self, table: &str, index: usize, visible: bool);

    fn mount_chart(&mut self, canvas: &str, spec: &ChartSpec) -> ChartHandle;

    fn destroy_chart(&mut self, handle: ChartHandle);

    fn listen(&mut self, element: &str, event: EventKind);

    fn alert(&mut self, message: &str);

    fn navigate(&mut self, path: &str);
}
