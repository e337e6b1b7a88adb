// Line items of the add-sale form

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaleLine {
    pub quantity: f64,
    pub price: f64,
}

impl Default for SaleLine {
    fn default() -> Self {
        Self {
            quantity: 1.0,
            price: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SaleDraft {
    lines: Vec<SaleLine>,
}

impl SaleDraft {
    pub fn add_line(&mut self) -> usize {
        self.lines.push(SaleLine::default());
        self.lines.len() - 1
    }

    pub fn remove_line(&mut self, index: usize) -> bool {
        if index < self.lines.len() {
            self.lines.remove(index);
            true
        } else {
            false
        }
    }

    /// Update one field of a line. Unparseable input counts as zero.
    pub fn set_field(&mut self, index: usize, field: &str, raw: &str) -> bool {
        let Some(line) = self.lines.get_mut(index) else {
            return false;
        };
        let value = raw.trim().parse::<f64>().unwrap_or(0.0);
        match field {
            "quantity" => line.quantity = value,
            "price" => line.price = value,
            _ => return false,
        }
        true
    }

    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(|l| l.quantity * l.price).sum()
    }
}
