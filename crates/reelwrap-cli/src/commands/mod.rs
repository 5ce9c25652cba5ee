pub mod add;
pub mod config;
pub mod diary;
pub mod list;
pub mod render;
