// Record collections to table rows, plus local row filtering
use crate::domain::filter::FilterState;
use crate::domain::records::{
    Activity, Campaign, Customer, CustomerSegment, FieldOption, InventoryItem, LowStockAlert,
    LowStockLine, Transaction, roas_class,
};
use crate::domain::series::CategoryBreakdown;
use crate::presentation::formatters::{
    NOT_AVAILABLE, format_count, format_currency, format_date, format_fixed2, format_number,
    format_share,
};
use crate::presentation::surface::{Cell, Row, ViewSurface};

pub const NO_ALERTS: &str = "No low stock items at this time.";

pub fn activity_rows(activities: &[Activity]) -> Vec<Row> {
    activities
        .iter()
        .map(|a| {
            Row::new(vec![
                Cell::tagged(format_date(&a.date), "activity-date"),
                Cell::tagged(a.message.clone(), "activity-message"),
            ])
        })
        .collect()
}

pub fn transaction_rows(transactions: &[Transaction]) -> Vec<Row> {
    transactions
        .iter()
        .map(|t| {
            Row::keyed(
                t.id.clone(),
                vec![
                    Cell::text(format_date(&t.date)),
                    Cell::text(t.id.clone()),
                    Cell::text(non_empty(t.customer.as_deref(), "Walk-in")),
                    Cell::text(format!("{} items", t.items.len())),
                    Cell::text(format_currency(t.amount)),
                    Cell::tagged("View", "btn-view"),
                ],
            )
        })
        .collect()
}

pub fn customer_rows(customers: &[Customer]) -> Vec<Row> {
    customers
        .iter()
        .map(|c| {
            let segment = CustomerSegment::classify(c.segment.as_deref());
            let last_visit = match c.last_visit.as_deref() {
                Some(date) if !date.is_empty() => format_date(date),
                _ => "Never".to_string(),
            };
            Row::keyed(
                c.id.clone(),
                vec![
                    Cell::text(non_empty(c.name.as_deref(), "Unknown")),
                    Cell::text(non_empty(c.email.as_deref(), "N/A")),
                    Cell::text(non_empty(c.phone.as_deref(), "N/A")),
                    Cell::text(or_not_available(c.total_spend, format_currency)),
                    Cell::text(or_not_available(c.visit_count, |n| n.to_string())),
                    Cell::text(last_visit),
                    Cell::tagged(segment.label(), &format!("segment-tag {}", segment.css_class())),
                ],
            )
        })
        .collect()
}

pub fn inventory_rows(items: &[InventoryItem]) -> Vec<Row> {
    items
        .iter()
        .map(|item| {
            let status = item.status();
            Row::keyed(
                item.id.clone(),
                vec![
                    Cell::text(item.name.clone()),
                    Cell::text(non_empty(item.sku.as_deref(), "N/A")),
                    Cell::text(non_empty(item.category.as_deref(), "Uncategorized")),
                    Cell::text(item.stock.to_string()),
                    Cell::text(format!("${}", format_fixed2(item.price))),
                    Cell::tagged(status.label(), &format!("stock-status {}", status.css_class())),
                    Cell::tagged("Edit", "btn-view"),
                ],
            )
        })
        .collect()
}

/// Distinct categories in first-seen order.
pub fn categories(items: &[InventoryItem]) -> Vec<String> {
    let mut seen = Vec::new();
    for item in items {
        let category = non_empty(item.category.as_deref(), "Uncategorized");
        if !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}

pub fn low_stock_alert_rows(alerts: &[LowStockAlert]) -> Vec<Row> {
    if alerts.is_empty() {
        return vec![Row::new(vec![Cell::text(NO_ALERTS)]).with_class("no-alerts")];
    }
    alerts
        .iter()
        .map(|a| {
            Row::new(vec![
                Cell::tagged(a.name.clone(), "alert-product"),
                Cell::tagged(
                    format!("Only {} remaining (threshold: {})", a.stock, a.threshold),
                    "alert-stock",
                ),
            ])
            .with_class("alert-item")
        })
        .collect()
}

pub fn campaign_rows(campaigns: &[Campaign]) -> Vec<Row> {
    campaigns
        .iter()
        .map(|c| {
            Row::keyed(
                c.id.clone(),
                vec![
                    Cell::text(c.name.clone()),
                    Cell::text(c.channel.clone()),
                    Cell::text(format_currency(c.spend)),
                    Cell::text(format_currency(c.revenue)),
                    Cell::tagged(format_fixed2(c.roas), roas_class(c.roas)),
                    Cell::text(or_not_available(c.impressions, format_count)),
                    Cell::text(or_not_available(c.clicks, format_count)),
                    Cell::text(format_currency(c.cpa)),
                ],
            )
        })
        .collect()
}

/// Category, amount and one-decimal share of the total.
pub fn breakdown_rows(breakdown: &CategoryBreakdown) -> Vec<Row> {
    breakdown
        .labels
        .iter()
        .zip(breakdown.values.iter())
        .zip(breakdown.shares())
        .map(|((label, value), share)| {
            Row::new(vec![
                Cell::text(label.clone()),
                Cell::text(format_currency(*value)),
                Cell::text(format_share(share)),
            ])
        })
        .collect()
}

pub fn low_stock_line_rows(lines: &[LowStockLine]) -> Vec<Row> {
    lines
        .iter()
        .map(|l| {
            Row::new(vec![
                Cell::text(l.name.clone()),
                Cell::text(format_number(l.current_stock as f64)),
                Cell::text(format_number(l.threshold as f64)),
                Cell::text(format_currency(l.value)),
            ])
        })
        .collect()
}

pub fn field_option_rows(options: &[FieldOption]) -> Vec<Row> {
    options
        .iter()
        .map(|o| {
            Row::keyed(o.id.clone(), vec![Cell::text(o.id.clone()), Cell::text(o.name.clone())])
                .with_class("column-checkbox")
        })
        .collect()
}

fn or_not_available<T>(value: Option<T>, format: impl Fn(T) -> String) -> String {
    value.map(format).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn non_empty(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// Which columns of a rendered table the local filters look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFilter {
    pub table: &'static str,
    pub search_columns: &'static [usize],
    pub category_column: Option<usize>,
    pub status_column: Option<usize>,
}

impl TableFilter {
    pub fn matches(&self, row: &Row, filters: &FilterState) -> bool {
        let needle = filters.needle();
        let search_ok = needle.is_empty()
            || self
                .search_columns
                .iter()
                .any(|&i| row.cell_text(i).to_lowercase().contains(&needle));

        let category_ok = match self.category_column {
            Some(i) if !filters.category.is_empty() => row.cell_text(i) == filters.category,
            _ => true,
        };

        let stock_ok = match self.status_column {
            Some(i) if !filters.stock.is_empty() => row.cells.get(i).is_some_and(|cell| {
                cell.text.eq_ignore_ascii_case(&filters.stock)
                    || cell
                        .class
                        .as_deref()
                        .is_some_and(|class| class.split_whitespace().any(|c| c == filters.stock))
            }),
            _ => true,
        };

        search_ok && category_ok && stock_ok
    }

    /// Toggle row visibility on the surface; returns the number left visible.
    pub fn apply(&self, surface: &mut dyn ViewSurface, filters: &FilterState) -> usize {
        let rows = surface.rows(self.table);
        let mut visible = 0;
        for (index, row) in rows.iter().enumerate() {
            let keep = self.matches(row, filters);
            if keep {
                visible += 1;
            }
            surface.set_row_visible(self.table, index, keep);
        }
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::memory_surface::MemorySurface;
    use serde_json::json;

    fn items() -> Vec<InventoryItem> {
        serde_json::from_value(json!([
            {"id": 1, "name": "Pale Ale", "sku": "PA-1", "category": "Beer", "stock": 0, "threshold": 5, "price": 4.0},
            {"id": 2, "name": "Stout", "category": "Beer", "stock": 3, "threshold": 5, "price": 4.5},
            {"id": 3, "name": "Merlot", "category": "Wine", "stock": 10, "threshold": 5, "price": 7.25}
        ]))
        .unwrap()
    }

    const INVENTORY: TableFilter = TableFilter {
        table: "inventory-table",
        search_columns: &[0],
        category_column: Some(2),
        status_column: Some(5),
    };

    fn rendered() -> MemorySurface {
        let mut surface = MemorySurface::new();
        for row in inventory_rows(&items()) {
            surface.append_row("inventory-table", row);
        }
        surface
    }

    #[test]
    fn test_inventory_rows_classify_and_fallback() {
        let rows = inventory_rows(&items());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].cell_text(5), "Out of Stock");
        assert_eq!(rows[1].cell_text(5), "Low Stock");
        assert_eq!(rows[1].cell_text(1), "N/A");
        assert_eq!(rows[2].cell_text(5), "In Stock");
        assert_eq!(rows[2].cell_text(4), "$7.25");
        assert_eq!(rows[2].key.as_deref(), Some("3"));
    }

    #[test]
    fn test_row_count_matches_records() {
        let customers: Vec<Customer> = serde_json::from_value(json!([
            {"name": "Ada", "totalSpend": 10, "visitCount": 1, "segment": "loyal"},
            {"totalSpend": 0, "visitCount": 0}
        ]))
        .unwrap();
        let rows = customer_rows(&customers);
        assert_eq!(rows.len(), customers.len());
        assert_eq!(rows[1].cell_text(0), "Unknown");
        assert_eq!(rows[1].cell_text(5), "Never");
        assert_eq!(rows[0].cells[6].class.as_deref(), Some("segment-tag loyal"));
    }

    #[test]
    fn test_search_is_case_insensitive_and_idempotent() {
        let mut surface = rendered();
        let filters = FilterState {
            search_term: "ALE".to_string(),
            ..FilterState::default()
        };

        assert_eq!(INVENTORY.apply(&mut surface, &filters), 1);
        let once: Vec<Row> = surface.visible_rows("inventory-table");
        assert_eq!(INVENTORY.apply(&mut surface, &filters), 1);
        assert_eq!(surface.visible_rows("inventory-table"), once);
        assert_eq!(once[0].cell_text(0), "Pale Ale");
    }

    #[test]
    fn test_category_and_stock_filters_combine() {
        let mut surface = rendered();
        let filters = FilterState {
            category: "Beer".to_string(),
            stock: "low-stock".to_string(),
            ..FilterState::default()
        };
        assert_eq!(INVENTORY.apply(&mut surface, &filters), 1);
        assert_eq!(surface.visible_rows("inventory-table")[0].cell_text(0), "Stout");

        let cleared = FilterState::default();
        assert_eq!(INVENTORY.apply(&mut surface, &cleared), 3);
    }

    #[test]
    fn test_stock_filter_accepts_label() {
        let mut surface = rendered();
        let filters = FilterState {
            stock: "in stock".to_string(),
            ..FilterState::default()
        };
        assert_eq!(INVENTORY.apply(&mut surface, &filters), 1);
    }

    #[test]
    fn test_empty_alerts_show_placeholder() {
        let rows = low_stock_alert_rows(&[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cell_text(0), NO_ALERTS);
        assert_eq!(rows[0].class.as_deref(), Some("no-alerts"));
    }

    #[test]
    fn test_breakdown_rows_show_shares() {
        let breakdown = CategoryBreakdown {
            labels: vec!["Food".to_string(), "Drinks".to_string()],
            values: vec![1000.0, 500.0],
            total: 1500.0,
        };
        let rows = breakdown_rows(&breakdown);
        assert_eq!(rows[0].cell_text(1), "$1,000.00");
        assert_eq!(rows[0].cell_text(2), "66.7%");
        assert_eq!(rows[1].cell_text(2), "33.3%");
    }

    #[test]
    fn test_categories_are_distinct() {
        assert_eq!(categories(&items()), vec!["Beer".to_string(), "Wine".to_string()]);
    }
}
