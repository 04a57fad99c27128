//! Idempotent convergence of XML configuration files
//!
//! This crate provides the engine that keeps an XML file in a declared
//! state:
//!
//! - **Document store**: [`XmlFile`] loads a file (namespaces and blank text
//!   stripped), holds it in memory and saves it atomically
//! - **Matcher**: [`XmlFile::find`], [`XmlFile::matches`] and
//!   [`node_matches`] decide whether nodes satisfy a [`ValueDescriptor`]
//! - **Mutator**: [`XmlFile::set_tag`] upserts children,
//!   [`XmlFile::remove_tag`] and [`XmlFile::remove_elements`] prune
//! - **Converter**: [`node_to_descriptor`] reads observed state back
//!
//! # Architecture
//!
//! ```text
//!          xmlfile-core
//!               |
//!      +--------+---------+
//!      |                  |
//! xmlfile-fs      xmlfile-content
//! ```
//!
//! # Example
//!
//! ```no_run
//! use xmlfile_core::{Result, ValueDescriptor, XmlFile};
//!
//! fn converge() -> Result<()> {
//!     let mut file = XmlFile::open("/etc/app/server.xml")?;
//!     let desired = ValueDescriptor::new().with_attribute("port", "8080");
//!
//!     if !file.matches("//server/connector[@port='8080']", &desired)? {
//!         file.set_tag("//server", "connector", "[@port='8080']", &desired)?;
//!         file.save()?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod file;
pub mod logging;
pub mod matcher;
pub mod mutator;

pub use config::{MANAGED_MARKER, XmlFileConfig};
pub use convert::node_to_descriptor;
pub use error::{Error, Result};
pub use file::XmlFile;
pub use matcher::node_matches;
pub use mutator::{Change, SetOutcome, Transition};
pub use xmlfile_content::{Document, NodeId, NodeKind, NodeRef, ValueDescriptor};
