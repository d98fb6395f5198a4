pub mod a001_fish_order;
