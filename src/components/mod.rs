pub mod activity;
pub mod controls;
