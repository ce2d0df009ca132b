pub mod api;
pub mod model;
pub mod table;
pub mod ui;
