//! Request handlers module

pub mod config;
pub mod dashboard;
pub mod department;
pub mod employee;
