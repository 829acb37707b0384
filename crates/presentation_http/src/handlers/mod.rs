//! HTTP request handlers

pub mod form;
pub mod health;
pub mod live;
pub mod model;
pub mod predict;
