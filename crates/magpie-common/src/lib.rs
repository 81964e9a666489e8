//! Common utilities for the Magpie scraping engine.
//!
//! This crate provides shared infrastructure used by the other Magpie
//! components:
//! - **Input issue reporting** - per-stage tallies of tolerated input
//!   problems, announced once on stderr

pub mod issues;
