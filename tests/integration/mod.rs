//! Integration test suite for hotelagg
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **pipeline**: fetch → map → reconcile → query over scripted supplier payloads
//! - **http_suppliers**: the reqwest client and the cache against a local stub server
//! - **cli**: the `hotelagg` binary end to end

#[path = "../common/mod.rs"]
mod common;

mod http_suppliers;
mod pipeline;
