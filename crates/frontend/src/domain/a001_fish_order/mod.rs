pub mod api;
pub mod live;
pub mod ui;
