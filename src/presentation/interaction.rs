// User interactions and the handler bindings a page declares for them
use crate::presentation::surface::EventKind;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionKind {
    Click,
    Input(String),
    Change(String),
    Submit,
    /// Delegated click on a row of a table or container.
    RowAction { row: usize },
    /// Delegated edit of one field of a row.
    RowEdit {
        row: usize,
        field: String,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub element: String,
    pub kind: InteractionKind,
}

impl Interaction {
    pub fn click(element: &str) -> Self {
        Self::new(element, InteractionKind::Click)
    }

    pub fn input(element: &str, value: &str) -> Self {
        Self::new(element, InteractionKind::Input(value.to_string()))
    }

    pub fn change(element: &str, value: &str) -> Self {
        Self::new(element, InteractionKind::Change(value.to_string()))
    }

    pub fn submit(element: &str) -> Self {
        Self::new(element, InteractionKind::Submit)
    }

    pub fn row_action(element: &str, row: usize) -> Self {
        Self::new(element, InteractionKind::RowAction { row })
    }

    pub fn row_edit(element: &str, row: usize, field: &str, value: &str) -> Self {
        Self::new(
            element,
            InteractionKind::RowEdit {
                row,
                field: field.to_string(),
                value: value.to_string(),
            },
        )
    }

    fn new(element: &str, kind: InteractionKind) -> Self {
        Self {
            element: element.to_string(),
            kind,
        }
    }

    pub fn event(&self) -> EventKind {
        match self.kind {
            InteractionKind::Click | InteractionKind::RowAction { .. } => EventKind::Click,
            InteractionKind::Input(_) => EventKind::Input,
            InteractionKind::Change(_) | InteractionKind::RowEdit { .. } => EventKind::Change,
            InteractionKind::Submit => EventKind::Submit,
        }
    }

    /// The value carried by input and change events.
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            InteractionKind::Input(v) | InteractionKind::Change(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised interaction '{0}'")]
pub struct ParseInteractionError(pub String);

/// Parses console lines such as `change customer-period 90` or `row inventory-table 2`.
impl FromStr for Interaction {
    type Err = ParseInteractionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let err = || ParseInteractionError(line.trim().to_string());
        let mut parts = line.split_whitespace();
        let verb = parts.next().ok_or_else(err)?;
        let element = parts.next().ok_or_else(err)?;
        let rest: Vec<&str> = parts.collect();

        match verb {
            "click" => Ok(Interaction::click(element)),
            "submit" => Ok(Interaction::submit(element)),
            "input" => Ok(Interaction::input(element, &rest.join(" "))),
            "change" => Ok(Interaction::change(element, &rest.join(" "))),
            "row" => {
                let row = rest.first().and_then(|r| r.parse().ok()).ok_or_else(err)?;
                Ok(Interaction::row_action(element, row))
            }
            "edit" => match rest.as_slice() {
                [row, field, value @ ..] => {
                    let row = row.parse().map_err(|_| err())?;
                    Ok(Interaction::row_edit(element, row, field, &value.join(" ")))
                }
                _ => Err(err()),
            },
            _ => Err(err()),
        }
    }
}

/// Meaning of a bound element, handled by the controller or the page itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingRole {
    Logout,
    Period,
    Search,
    CategoryFilter,
    StockFilter,
    OpenModal(&'static str),
    CloseModal(&'static str),
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub element: &'static str,
    pub event: EventKind,
    pub role: BindingRole,
}

impl Binding {
    pub const fn logout() -> Self {
        Self::new("logout-btn", EventKind::Click, BindingRole::Logout)
    }

    pub const fn period(element: &'static str) -> Self {
        Self::new(element, EventKind::Change, BindingRole::Period)
    }

    pub const fn search(element: &'static str) -> Self {
        Self::new(element, EventKind::Input, BindingRole::Search)
    }

    pub const fn category(element: &'static str) -> Self {
        Self::new(element, EventKind::Change, BindingRole::CategoryFilter)
    }

    pub const fn stock(element: &'static str) -> Self {
        Self::new(element, EventKind::Change, BindingRole::StockFilter)
    }

    pub const fn open_modal(trigger: &'static str, modal: &'static str) -> Self {
        Self::new(trigger, EventKind::Click, BindingRole::OpenModal(modal))
    }

    pub const fn close_modal(trigger: &'static str, modal: &'static str) -> Self {
        Self::new(trigger, EventKind::Click, BindingRole::CloseModal(modal))
    }

    pub const fn page(element: &'static str, event: EventKind) -> Self {
        Self::new(element, event, BindingRole::Page)
    }

    const fn new(element: &'static str, event: EventKind, role: BindingRole) -> Self {
        Self { element, event, role }
    }

    pub fn matches(&self, interaction: &Interaction) -> bool {
        self.element == interaction.element && self.event == interaction.event()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_console_lines() {
        assert_eq!(
            "change customer-period 90".parse::<Interaction>().unwrap(),
            Interaction::change("customer-period", "90")
        );
        assert_eq!(
            "input campaign-search spring sale".parse::<Interaction>().unwrap(),
            Interaction::input("campaign-search", "spring sale")
        );
        assert_eq!(
            "input customer-search".parse::<Interaction>().unwrap(),
            Interaction::input("customer-search", "")
        );
        assert_eq!(
            "row inventory-table 2".parse::<Interaction>().unwrap(),
            Interaction::row_action("inventory-table", 2)
        );
        assert_eq!(
            "edit sale-items-container 0 price 2.50".parse::<Interaction>().unwrap(),
            Interaction::row_edit("sale-items-container", 0, "price", "2.50")
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Interaction>().is_err());
        assert!("hover logout-btn".parse::<Interaction>().is_err());
        assert!("row inventory-table x".parse::<Interaction>().is_err());
        assert!("edit sale-items-container 0".parse::<Interaction>().is_err());
    }

    #[test]
    fn test_binding_matches_element_and_event() {
        let binding = Binding::period("marketing-period");
        assert!(binding.matches(&Interaction::change("marketing-period", "7")));
        assert!(!binding.matches(&Interaction::click("marketing-period")));
        assert!(!binding.matches(&Interaction::change("customer-period", "7")));
    }
}
