// One view per business page
pub mod customers;
pub mod dashboard;
pub mod inventory;
pub mod marketing;
pub mod reports;
pub mod sales;
