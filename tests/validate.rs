use camino::Utf8Path;
use deviser_schema::config::ParserConfig;
use deviser_schema::model::Package;
use deviser_schema::parser::parse_package_from_text;
use deviser_schema::error::ParseError;
use deviser_schema::validate::{Severity, ensure_valid, has_errors, validate};

fn parse(xml: &str) -> Package {
    parse_package_from_text(xml, Utf8Path::new("v.xml"), &ParserConfig::default()).unwrap()
}

#[test]
fn consistent_package_has_no_findings() {
    let pkg = parse(
        r#"<package name="ok">
  <element name="Group" typeCode="OK_GROUP">
    <attribute name="members" type="lo_element" element="Member" required="false"/>
  </element>
  <element name="Member" typeCode="OK_MEMBER" hasListOf="true"/>
  <element name="Scratch" typeCode="HACK"/>
  <element name="Other" typeCode="HACK"/>
</package>"#,
    );
    let findings = validate(&pkg);
    assert!(findings.is_empty(), "{:?}", findings);
}

#[test]
fn reports_duplicates_and_dangling_references() {
    let pkg = parse(
        r#"<package name="bad">
  <element name="A" typeCode="BAD_A">
    <attribute name="child" type="element" element="Elsewhere"/>
    <attribute name="nothing" type="element"/>
  </element>
  <element name="A" typeCode="BAD_B"/>
  <element name="C" typeCode="BAD_B"/>
  <element name="D" typeCode="BAD_D" abstract="true"/>
</package>"#,
    );
    let findings = validate(&pkg);
    let messages: Vec<String> = findings.iter().map(|d| d.to_string()).collect();

    assert!(has_errors(&findings));
    assert!(messages.iter().any(|m| m == "error: element 'A' is declared more than once"));
    assert!(messages
        .iter()
        .any(|m| m == "error: typecode 'BAD_B' is used by both 'A' and 'C'"));
    assert!(messages.iter().any(|m| m
        == "warning: attribute 'child' of 'A' references 'Elsewhere', which is not declared in package 'bad'"));
    assert!(messages
        .iter()
        .any(|m| m == "error: attribute 'nothing' of 'A' has type 'element' but names no element"));
    assert!(messages
        .iter()
        .any(|m| m == "warning: abstract element 'D' has no concrete classes"));
    assert_eq!(findings.len(), 5);

    match ensure_valid(&pkg, &findings) {
        Err(ParseError::Invalid { package, count }) => {
            assert_eq!(package, "bad");
            assert_eq!(count, 3);
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
}

#[test]
fn warnings_alone_pass_validation() {
    let pkg = parse(
        r#"<package name="soft">
  <element name="D" typeCode="SOFT_D" abstract="true"/>
</package>"#,
    );
    let findings = validate(&pkg);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Warning);
    assert!(ensure_valid(&pkg, &findings).is_ok());
}

#[test]
fn unlinked_records_are_reported() {
    let mut pkg = parse(
        r#"<package name="p">
  <element name="A" typeCode="P_A"><attribute name="id" type="SId"/></element>
</package>"#,
    );
    pkg.sbml_elements[0].attribs[0].parent = None;
    pkg.sbml_elements[0].root = None;
    let findings = validate(&pkg);
    assert_eq!(findings.len(), 2);
    assert!(findings.iter().all(|d| d.severity == Severity::Error));
}
