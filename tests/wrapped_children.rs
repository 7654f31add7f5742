use camino::Utf8Path;
use deviser_schema::config::ParserConfig;
use deviser_schema::model::{AttributeType, ElementId, Package};
use deviser_schema::parser::parse_package_from_text;

const XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package name="wrap" number="300" offset="4000000">
  <elements>
    <element name="Base" typeCode="WRAP_BASE" abstract="true" hasListOf="true">
      <attributes>
        <attribute name="id" type="SId" required="true"/>
        <attribute name="kind" type="enum" element="Kind" required="false"/>
      </attributes>
      <listOfAttributes>
        <listOfAttribute name="total" type="uint" required="false"/>
      </listOfAttributes>
      <concretes>
        <concrete name="x" element="X"/>
        <concrete name="y" element="Y"/>
      </concretes>
    </element>
    <element name="X" typeCode="WRAP_X" baseClass="Base"/>
    <element name="Y" typeCode="WRAP_Y" baseClass="Base"/>
  </elements>
  <plugins>
    <plugin extensionPoint="Model">
      <references>
        <reference name="X"/>
        <reference name="listOfBases"/>
      </references>
      <attributes>
        <attribute name="wrapRef" type="SIdRef" required="false"/>
      </attributes>
    </plugin>
  </plugins>
  <enums>
    <enum name="Kind">
      <enumValues>
        <enumValue name="KIND_A" value="a"/>
        <enumValue name="KIND_B" value="b"/>
      </enumValues>
    </enum>
  </enums>
</package>
"#;

fn parse() -> Package {
    parse_package_from_text(XML, Utf8Path::new("wrap.xml"), &ParserConfig::default()).unwrap()
}

#[test]
fn wrapped_attributes_and_list_of_attributes_are_read() {
    let pkg = parse();
    let base = &pkg.sbml_elements[0];
    let names: Vec<&str> = base.attribs.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["id", "kind"]);
    assert_eq!(base.attribs[0].attr_type, AttributeType::SId);
    assert_eq!(base.attribs[1].element.as_deref(), Some("Kind"));
    assert_eq!(base.lo_attribs.len(), 1);
    assert_eq!(base.lo_attribs[0].attr_type, AttributeType::UInt);
}

#[test]
fn wrapped_concretes_resolve_in_order() {
    let pkg = parse();
    let base = pkg.element_by_name("Base").unwrap();
    let pairs: Vec<(&str, &str)> = base
        .concrete
        .iter()
        .map(|c| (c.name.as_str(), c.element.as_str()))
        .collect();
    assert_eq!(pairs, vec![("x", "X"), ("y", "Y")]);
    assert!(base.concrete.iter().all(|c| c.parent == Some(ElementId(0))));
}

#[test]
fn wrapped_references_and_plugin_attributes_resolve() {
    let pkg = parse();
    let model = &pkg.plugins[0];
    let ext: Vec<&str> = model.extension.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(ext, vec!["X"]);
    let lo: Vec<&str> = model.lo_extension.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(lo, vec!["Base"]);
    assert_eq!(model.attribs.len(), 1);
    assert_eq!(model.attribs[0].attr_type, AttributeType::SIdRef);
}

#[test]
fn wrapped_enum_values_keep_order() {
    let pkg = parse();
    let kind = pkg.enum_by_name("Kind").unwrap();
    let values: Vec<(&str, &str)> = kind
        .values
        .iter()
        .map(|v| (v.name.as_str(), v.value.as_str()))
        .collect();
    assert_eq!(values, vec![("KIND_A", "a"), ("KIND_B", "b")]);
}

#[test]
fn wrapped_attributes_are_cross_linked() {
    let pkg = parse();
    assert_eq!(pkg.attributes().count(), 4);
    for view in pkg.attributes() {
        assert!(std::ptr::eq(view.root().unwrap(), &pkg));
        assert_eq!(view.attribute().parent, Some(view.location()));
    }
}
