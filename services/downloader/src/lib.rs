//! TikTok video lookup service
//!
//! A single endpoint that takes a TikTok video page URL, extracts the video
//! metadata embedded in the page and probes the direct media URL.

pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod gate;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
