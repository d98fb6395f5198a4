//! Fish Order Details UI Module
//!
//! - view_model.rs: состояние диалога и команды смены статуса
//! - view.rs: Leptos компонент (только UI)

mod view;
mod view_model;

pub use view::FishOrderDetails;
pub use view_model::FishOrderDetailsViewModel;
