//! HTTP handlers

pub mod catalog;
pub mod dishes;
pub mod health;
pub mod menus;
pub mod submenus;
