//! Shared test utilities for the xmlfile workspace.
//!
//! This crate provides standardised fixtures so crate test suites do not
//! each roll their own temp files. It is a dev-dependency only, never
//! published.
//!
//! # Modules
//!
//! - [`file`]: [`file::TestXmlFile`] builder for XML files on disk
//! - [`fixtures`]: sample documents shared across suites

pub mod file;
pub mod fixtures;
