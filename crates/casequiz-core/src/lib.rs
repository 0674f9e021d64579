//! casequiz-core: case repository, answer evaluation and quiz scoring.
//!
//! This crate defines the case and quiz data model, loads catalogs, grades
//! answers, and tracks quiz attempts. Rendering is left to the caller.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;
pub mod report;
pub mod repository;
pub mod seed;
pub mod session;
