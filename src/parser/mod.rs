//! Deviser package description parser.
//!
//! Provides [`PackageParser`] to load an XML package description into a
//! [`Package`]. The work runs as one linear pipeline split over sub-modules:
//!
//! - [`source`] – File I/O abstraction
//! - [`helpers`] – Value coercion, type names and ListOf naming
//! - [`concrete`] – Pre-scan of concrete subclasses
//! - [`element`] – Element and attribute assembly
//! - [`plugin`] – Plugin assembly and reference resolution
//! - [`enums`] – Enumeration assembly
//! - [`link`] – Back-reference linking

pub mod concrete;
pub mod element;
pub mod enums;
pub mod helpers;
pub mod link;
pub mod plugin;
pub mod source;

pub use concrete::ConcreteDictionary;
pub use helpers::{get_value, plural, standardize_types, to_bool, to_int};
pub use plugin::{ReferenceMatch, resolve_reference};
pub use source::*;

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::model::*;
use camino::Utf8Path;
use helpers::get_string;
use log::debug;
use roxmltree::{Document, Node};

/// Package description parser. Generic over [`ContentSource`] so it can read
/// from the filesystem ([`FsSource`]) or any other source.
pub struct PackageParser<S: ContentSource> {
    config: ParserConfig,
    source: S,
}

impl<S: ContentSource> PackageParser<S> {
    pub fn new(config: ParserConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Read and parse a description file into a linked [`Package`].
    pub fn parse_package_file(&mut self, path: impl AsRef<Utf8Path>) -> Result<Package, ParseError> {
        let path = path.as_ref();
        let text = self.source.read_to_string(path)?;
        parse_package_from_text(&text, path, &self.config)
    }
}

/// Parse description text. `path` is only used in error messages.
pub fn parse_package_from_text(
    text: &str,
    path: &Utf8Path,
    config: &ParserConfig,
) -> Result<Package, ParseError> {
    let doc = Document::parse(text).map_err(|source| ParseError::Xml {
        path: path.to_path_buf(),
        source,
    })?;
    let root = doc
        .descendants()
        .find(|n| n.is_element() && n.has_tag_name("package"))
        .ok_or_else(|| ParseError::MissingRoot {
            path: path.to_path_buf(),
        })?;
    build_package(root, config)
}

fn build_package(root: Node, config: &ParserConfig) -> Result<Package, ParseError> {
    let name = get_string(root, "name").unwrap_or_default().to_lowercase();

    let concretes = ConcreteDictionary::scan(root);
    debug!("{}: {} concrete entries", name, concretes.len());

    let (sbml_elements, elements) =
        element::parse_elements(root, &name, &config.language, &concretes)?;
    debug!("{}: {} elements", name, sbml_elements.len());

    let plugins = plugin::parse_plugins(
        root,
        &elements,
        &concretes,
        config.strict_references,
    )?;
    debug!("{}: {} plugins", name, plugins.len());

    let enums = enums::parse_enums(root);
    debug!("{}: {} enums", name, enums.len());

    let (sbml_level, sbml_version, pkg_version) = match root
        .descendants()
        .find(|n| n.is_element() && n.has_tag_name("pkgVersion"))
    {
        Some(v) => (
            to_int(get_value(v, "level")),
            to_int(get_value(v, "version")),
            to_int(get_value(v, "pkg_version")),
        ),
        None => (3, 1, 1),
    };

    let mut package = Package {
        fullname: get_string(root, "fullname").unwrap_or_default(),
        number: to_int(get_value(root, "number")),
        offset: to_int(get_value(root, "offset")),
        version: to_int(get_value(root, "version")),
        sbml_level,
        sbml_version,
        pkg_version,
        required: to_bool(get_value(root, "required")),
        elements,
        sbml_elements,
        plugins,
        enums,
        additional_decls: get_string(root, "additionalDecls").filter(|s| !s.is_empty()),
        additional_defs: get_string(root, "additionalDefs").filter(|s| !s.is_empty()),
        name,
    };
    link::link_package(&mut package);
    Ok(package)
}
