//! First pass over `<element>` nodes collecting the concrete subclasses of
//! every element.

use super::helpers::{children_named, get_string, get_value, to_int};
use crate::error::ParseError;
use crate::model::{Concrete, ConcreteMap};
use roxmltree::Node;

/// Name → concrete list for every `<element>` of a description.
#[derive(Debug, Clone, Default)]
pub struct ConcreteDictionary {
    entries: ConcreteMap,
}

impl ConcreteDictionary {
    /// Scan every `<element>` below `root` in document order. Elements without
    /// `<concrete>` children still get an (empty) entry.
    pub fn scan(root: Node) -> Self {
        let mut entries = ConcreteMap::new();
        for node in root
            .descendants()
            .filter(|n| n.is_element() && n.has_tag_name("element"))
        {
            let name = get_value(node, "name").unwrap_or("").to_string();
            let concretes: Vec<Concrete> = children_named(node, "concretes", "concrete")
                .map(read_concrete)
                .collect();
            // Redeclared names keep the first declaration's list.
            entries.entry(name).or_insert(concretes);
        }
        Self { entries }
    }

    /// Concrete list of an abstract class. A name never seen by [`scan`](Self::scan)
    /// is an inconsistent description.
    pub fn lookup(&self, name: &str) -> Result<&[Concrete], ParseError> {
        self.entries
            .get(name)
            .map(|v| v.as_slice())
            .ok_or_else(|| ParseError::UnknownAbstract {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }
}

fn read_concrete(node: Node) -> Concrete {
    Concrete {
        name: get_string(node, "name").unwrap_or_default(),
        element: get_string(node, "element").unwrap_or_default(),
        min_num_children: to_int(get_value(node, "minNumChildren")),
        max_num_children: to_int(get_value(node, "maxNumChildren")),
        parent: None,
    }
}
