// Presentation layer - rendering contract, formatting and the console front end
pub mod chart_renderer;
pub mod cli;
pub mod formatters;
pub mod interaction;
pub mod memory_surface;
pub mod surface;
pub mod table_renderer;
pub mod view_plan;
