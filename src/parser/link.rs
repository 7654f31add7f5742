//! Back-reference linking over a fully assembled [`Package`].

use crate::model::*;

/// Attach `root` to every element and attribute, and `parent` to every
/// attribute and concrete entry. Runs once, after all assembly.
pub fn link_package(package: &mut Package) {
    let root = RootLink {
        package: package.name.clone(),
    };

    for (i, element) in package.sbml_elements.iter_mut().enumerate() {
        let id = ElementId(i);
        element.root = Some(root.clone());
        for c in &mut element.concrete {
            c.parent = Some(id);
        }
        for attr in &mut element.attribs {
            link_attribute(attr, Owner::Element(id), id, &root);
        }
        for attr in &mut element.lo_attribs {
            link_attribute(attr, Owner::ListOf(id), id, &root);
        }
    }

    for (i, plugin) in package.plugins.iter_mut().enumerate() {
        let owner = Owner::Plugin(PluginId(i));
        for attr in &mut plugin.attribs {
            attr.parent = Some(owner);
            attr.root = Some(root.clone());
        }
    }
}

fn link_attribute(attr: &mut Attribute, owner: Owner, element: ElementId, root: &RootLink) {
    attr.parent = Some(owner);
    attr.root = Some(root.clone());
    for c in &mut attr.concrete {
        c.parent = Some(element);
    }
}
