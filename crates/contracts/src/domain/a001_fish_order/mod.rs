pub mod aggregate;
pub mod live;
