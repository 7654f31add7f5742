//! `<element>` and `<attribute>` assembly.

use super::concrete::ConcreteDictionary;
use super::helpers::{
    children_named, get_string, get_value, list_of_class_name, list_of_name, standardize_types,
    to_bool, to_int,
};
use crate::config::LanguageConfig;
use crate::error::ParseError;
use crate::model::*;
use roxmltree::Node;

/// Read one `<attribute>` (or `<listOfAttribute>`) node.
///
/// Abstract attributes take the concrete list of the class named by their
/// `element` field, or of their own name when `element` is absent.
pub fn parse_attribute_node(
    node: Node,
    concretes: &ConcreteDictionary,
) -> Result<Attribute, ParseError> {
    let name = get_string(node, "name").unwrap_or_default();
    let attr_type = standardize_types(get_value(node, "type").unwrap_or(""));
    let element = get_string(node, "element").filter(|e| !e.is_empty());
    let is_abstract = to_bool(get_value(node, "abstract"));
    let concrete = if is_abstract {
        let key = element.as_deref().unwrap_or(&name);
        concretes.lookup(key)?.to_vec()
    } else {
        Vec::new()
    };
    Ok(Attribute {
        attr_type,
        reqd: to_bool(get_value(node, "required")),
        element,
        is_abstract,
        concrete,
        xml_name: get_string(node, "xmlName").filter(|x| !x.is_empty()),
        parent: None,
        root: None,
        name,
    })
}

/// Read every `tag` child of `node` as an attribute, in order, whether it
/// sits directly under `node` or inside a `wrapper` element.
pub fn parse_attributes(
    node: Node,
    wrapper: &'static str,
    tag: &'static str,
    concretes: &ConcreteDictionary,
) -> Result<Vec<Attribute>, ParseError> {
    children_named(node, wrapper, tag)
        .map(|child| parse_attribute_node(child, concretes))
        .collect()
}

/// Build the full [`Element`] and its [`ElementRef`] for one `<element>` node.
pub fn parse_element_node(
    node: Node,
    id: ElementId,
    package: &str,
    language: &LanguageConfig,
    concretes: &ConcreteDictionary,
) -> Result<(Element, ElementRef), ParseError> {
    let name = get_string(node, "name").unwrap_or_default();
    let typecode = get_string(node, "typeCode").unwrap_or_default();
    let has_list_of = to_bool(get_value(node, "hasListOf"));
    let is_abstract = to_bool(get_value(node, "abstract"));
    let lo_element_name = get_string(node, "listOfName").filter(|s| !s.is_empty());
    let lo_class_name = get_string(node, "listOfClassName").filter(|s| !s.is_empty());

    let attribs = parse_attributes(node, "attributes", "attribute", concretes)?;
    let lo_attribs = parse_attributes(node, "listOfAttributes", "listOfAttribute", concretes)?;

    let concrete = if is_abstract {
        concretes.lookup(&name)?.to_vec()
    } else {
        Vec::new()
    };

    let element_ref = ElementRef {
        name: name.clone(),
        typecode: typecode.clone(),
        is_list_of: has_list_of,
        list_of_name: list_of_name(
            language,
            &name,
            lo_element_name.as_deref(),
            lo_class_name.as_deref(),
        ),
        list_of_class_name: list_of_class_name(
            language,
            &name,
            lo_element_name.as_deref(),
            lo_class_name.as_deref(),
        ),
        id,
    };

    let element = Element {
        package: package.to_string(),
        typecode,
        has_list_of,
        has_children: to_bool(get_value(node, "hasChildren")),
        has_math: to_bool(get_value(node, "hasMath")),
        is_abstract,
        children_overwrite_element_name: to_bool(get_value(
            node,
            "childrenOverwriteElementName",
        )),
        base_class: get_string(node, "baseClass")
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| language.base_class.clone()),
        attribs,
        lo_attribs,
        element_name: get_string(node, "elementName").filter(|s| !s.is_empty()),
        lo_element_name,
        lo_class_name,
        concrete,
        additional_decls: get_string(node, "additionalDecls").filter(|s| !s.is_empty()),
        additional_defs: get_string(node, "additionalDefs").filter(|s| !s.is_empty()),
        min_num_list_of_children: to_int(get_value(node, "minNumListOfChildren")),
        max_num_list_of_children: to_int(get_value(node, "maxNumListOfChildren")),
        root: None,
        name,
    };
    Ok((element, element_ref))
}

/// Second pass over `<element>` nodes: full records plus lightweight refs, both
/// in document order.
pub fn parse_elements(
    root: Node,
    package: &str,
    language: &LanguageConfig,
    concretes: &ConcreteDictionary,
) -> Result<(Vec<Element>, Vec<ElementRef>), ParseError> {
    let mut elements = Vec::new();
    let mut refs = Vec::new();
    for node in root
        .descendants()
        .filter(|n| n.is_element() && n.has_tag_name("element"))
    {
        let id = ElementId(elements.len());
        let (element, element_ref) = parse_element_node(node, id, package, language, concretes)?;
        elements.push(element);
        refs.push(element_ref);
    }
    Ok((elements, refs))
}
