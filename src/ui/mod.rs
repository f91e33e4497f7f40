//! UI module - reusable rendering pieces shared by the app panels

pub mod components;
