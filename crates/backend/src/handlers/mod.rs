pub mod a001_fish_order;
pub mod logs;
