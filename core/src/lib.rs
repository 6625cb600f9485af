//! reality-core — financial metrics aggregation and scoring for a small
//! agency's ledger.
//!
//! Pipeline: windowed ledger sums ([`aggregator`]) → derived ratios
//! ([`metrics`]) → threshold buckets and composite score ([`scoring`]) →
//! primary-risk attribution ([`risk`]). [`service::RealityService`] wires
//! the pipeline for the transport layer; [`store::LedgerStore`] is the
//! only module that talks to SQLite.

pub mod aggregator;
pub mod clock;
pub mod error;
pub mod metrics;
pub mod reconciler;
pub mod risk;
pub mod scoring;
pub mod service;
pub mod store;
pub mod types;
