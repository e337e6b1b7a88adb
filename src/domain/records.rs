// Record collections and their derived presentation classes
use serde::{Deserialize, Deserializer};

/// Accept either a JSON string or number as a record identity.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct Activity {
    pub date: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    pub amount: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub total_spend: Option<f64>,
    #[serde(default)]
    pub visit_count: Option<u64>,
    #[serde(default)]
    pub last_visit: Option<String>,
    #[serde(default)]
    pub segment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryItem {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub stock: i64,
    pub threshold: i64,
    pub price: f64,
}

impl InventoryItem {
    pub fn status(&self) -> StockStatus {
        StockStatus::classify(self.stock, self.threshold)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LowStockAlert {
    pub name: String,
    pub stock: i64,
    pub threshold: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Campaign {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    pub channel: String,
    pub spend: f64,
    pub revenue: f64,
    pub roas: f64,
    #[serde(default)]
    pub impressions: Option<u64>,
    #[serde(default)]
    pub clicks: Option<u64>,
    pub cpa: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockLine {
    pub name: String,
    pub current_stock: i64,
    pub threshold: i64,
    pub value: f64,
}

/// Selectable column or filter field offered by the custom report builder.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldOption {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn classify(stock: i64, threshold: i64) -> Self {
        if stock == 0 {
            StockStatus::OutOfStock
        } else if stock <= threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerSegment {
    HighValue,
    Loyal,
    AtRisk,
    New,
    Unsegmented,
}

impl CustomerSegment {
    pub fn classify(raw: Option<&str>) -> Self {
        match raw {
            Some("high_value") => CustomerSegment::HighValue,
            Some("loyal") => CustomerSegment::Loyal,
            Some("at_risk") => CustomerSegment::AtRisk,
            Some("new") => CustomerSegment::New,
            _ => CustomerSegment::Unsegmented,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CustomerSegment::HighValue => "High Value",
            CustomerSegment::Loyal => "Loyal",
            CustomerSegment::AtRisk => "At Risk",
            CustomerSegment::New => "New",
            CustomerSegment::Unsegmented => "Unsegmented",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            CustomerSegment::HighValue => "high-value",
            CustomerSegment::Loyal => "loyal",
            CustomerSegment::AtRisk => "at-risk",
            CustomerSegment::New => "new",
            CustomerSegment::Unsegmented => "unsegmented",
        }
    }
}

/// Return on ad spend bucket; break-even counts as positive.
pub fn roas_class(roas: f64) -> &'static str {
    if roas >= 1.0 {
        "roas-positive"
    } else {
        "roas-negative"
    }
}
