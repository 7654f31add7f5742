//! Deviser package description parser.
//!
//! This crate provides a [`PackageParser`](parser::PackageParser) to load the XML
//! description of an SBML extension package (its classes, attributes, plugins
//! and enumerations) into a strongly-typed, cross-linked [`Package`](model::Package)
//! that code generators consume read-only.
//!
//! The binary `deviser` parses a description and prints the model as JSON.

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod validate;
