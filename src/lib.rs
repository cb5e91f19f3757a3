//! Leave Entitlement and Balance Engine
//!
//! This crate calculates chargeable leave days, pro-rata entitlements and
//! leave balances for Australian HR record keeping, and drives the request
//! approval workflow that keeps the balance ledger consistent.

#![warn(missing_docs)]

pub mod api;
pub mod cache;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod store;
pub mod workflow;
