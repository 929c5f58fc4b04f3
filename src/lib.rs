//! Fair Share Calculator
//!
//! This crate splits shared expenses between two parties in proportion to
//! their incomes, and serializes the calculator's input state so it can be
//! shared as a short store-backed link or a self-contained legacy link.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod codec;
pub mod config;
pub mod error;
pub mod models;
