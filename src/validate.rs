//! Consistency checks over a parsed [`Package`].
//!
//! Parsing never validates; this pass is run explicitly. [`ensure_valid`]
//! turns error findings into a [`ParseError`].

use crate::error::ParseError;
use crate::model::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    fn warning(message: String) -> Self {
        Self {
            severity: Severity::Warning,
            message,
        }
    }

    fn error(message: String) -> Self {
        Self {
            severity: Severity::Error,
            message,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

/// Run every check and return the findings in a stable order.
pub fn validate(package: &Package) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    check_duplicates(package, &mut out);
    check_element_references(package, &mut out);
    check_abstract_elements(package, &mut out);
    check_links(package, &mut out);
    out
}

pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity == Severity::Error)
}

/// Fail with [`ParseError::Invalid`] when any finding is an error. Warnings
/// never fail.
pub fn ensure_valid(package: &Package, diagnostics: &[Diagnostic]) -> Result<(), ParseError> {
    if !has_errors(diagnostics) {
        return Ok(());
    }
    let count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    Err(ParseError::Invalid {
        package: package.name.clone(),
        count,
    })
}

fn check_duplicates(package: &Package, out: &mut Vec<Diagnostic>) {
    let mut names: HashSet<&str> = HashSet::new();
    for e in &package.sbml_elements {
        if !names.insert(e.name.as_str()) {
            out.push(Diagnostic::error(format!(
                "element '{}' is declared more than once",
                e.name
            )));
        }
    }

    let mut typecodes: HashMap<&str, &str> = HashMap::new();
    for e in package.typecoded_elements() {
        if e.typecode.is_empty() {
            continue;
        }
        if let Some(first) = typecodes.insert(e.typecode.as_str(), e.name.as_str()) {
            if first != e.name {
                out.push(Diagnostic::error(format!(
                    "typecode '{}' is used by both '{}' and '{}'",
                    e.typecode, first, e.name
                )));
            }
        }
    }
}

fn check_element_references(package: &Package, out: &mut Vec<Diagnostic>) {
    let names: HashSet<&str> = package
        .sbml_elements
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    for view in package.attributes() {
        let attr = view.attribute();
        if !attr.attr_type.references_element() {
            continue;
        }
        let owner = owner_name(&view);
        match attr.element.as_deref() {
            None => out.push(Diagnostic::error(format!(
                "attribute '{}' of '{}' has type '{}' but names no element",
                attr.name, owner, attr.attr_type
            ))),
            Some(target) if !names.contains(target) => out.push(Diagnostic::warning(format!(
                "attribute '{}' of '{}' references '{}', which is not declared in package '{}'",
                attr.name, owner, target, package.name
            ))),
            Some(_) => {}
        }
    }
}

fn check_abstract_elements(package: &Package, out: &mut Vec<Diagnostic>) {
    for e in package.sbml_elements.iter().filter(|e| e.is_abstract) {
        if e.concrete.is_empty() {
            out.push(Diagnostic::warning(format!(
                "abstract element '{}' has no concrete classes",
                e.name
            )));
        }
    }
}

fn check_links(package: &Package, out: &mut Vec<Diagnostic>) {
    for e in &package.sbml_elements {
        if e.root.is_none() {
            out.push(Diagnostic::error(format!("element '{}' is not linked", e.name)));
        }
        for c in e.concrete.iter().filter(|c| package.parent_of(c).is_none()) {
            out.push(Diagnostic::error(format!(
                "concrete '{}' of '{}' has no parent",
                c.name, e.name
            )));
        }
    }
    for view in package.attributes() {
        let attr = view.attribute();
        if view.root().is_none() || attr.parent != Some(view.location()) {
            out.push(Diagnostic::error(format!(
                "attribute '{}' of '{}' is not linked to its owner",
                attr.name,
                owner_name(&view)
            )));
        }
    }
}

fn owner_name(view: &AttributeView<'_>) -> String {
    match view.parent() {
        Some(OwnerRef::Element(e)) => e.name.clone(),
        Some(OwnerRef::ListOf(e)) => format!("ListOf {}", e.name),
        Some(OwnerRef::Plugin(p)) => format!("{} plugin", p.sbase),
        None => "<unlinked>".to_string(),
    }
}
