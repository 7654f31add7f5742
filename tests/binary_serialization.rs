use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use deviser_schema::config::ParserConfig;
use deviser_schema::error::ParseError;
use deviser_schema::model::PackageDoc;
use deviser_schema::parser::{ContentSource, PackageParser};
use std::collections::HashMap;
use tempfile::NamedTempFile;

struct MemSource {
    files: HashMap<String, String>,
}
impl ContentSource for MemSource {
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String, ParseError> {
        self.files
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| ParseError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not in memory"),
            })
    }
}

#[test]
fn test_binary_serialization() -> Result<()> {
    let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<package name="fbc" fullname="Flux Balance Constraints" number="800" offset="2000000" required="false">
  <element name="FluxBound" typeCode="SBML_FBC_FLUXBOUND" hasListOf="true">
    <attribute name="id" type="SId" required="false"/>
    <attribute name="operation" type="enum" element="FluxBoundOperation" required="true"/>
    <attribute name="value" type="double" required="true"/>
  </element>
  <element name="Objective" typeCode="SBML_FBC_OBJECTIVE" hasListOf="true" hasChildren="true">
    <attribute name="fluxObjectives" type="lo_element" element="FluxObjective" required="true"/>
  </element>
  <plugin extensionPoint="Model">
    <reference name="listOfFluxBounds"/>
    <reference name="listOfObjectives"/>
  </plugin>
  <enum name="FluxBoundOperation">
    <enumValue name="FLUXBOUND_OPERATION_LESS_EQUAL" value="lessEqual"/>
    <enumValue name="FLUXBOUND_OPERATION_GREATER_EQUAL" value="greaterEqual"/>
  </enum>
</package>
"#;

    let path = Utf8PathBuf::from("mem://fbc.xml");
    let mut files = HashMap::new();
    files.insert(path.as_str().to_string(), xml.to_string());
    let source = MemSource { files };
    let mut parser = PackageParser::new(ParserConfig::default(), source);
    let package = parser.parse_package_file(&path).expect("parse package XML");

    let doc = PackageDoc { package };

    // Create a temporary file
    let temp_file = NamedTempFile::new()?;
    let temp_path = temp_file.path();

    doc.save_to_binary(temp_path)?;
    let loaded_doc = PackageDoc::load_from_binary(temp_path)?;

    assert_eq!(loaded_doc, doc);
    let pkg = &loaded_doc.package;
    assert_eq!(pkg.sbml_elements.len(), 2);
    assert_eq!(pkg.plugins[0].lo_extension.len(), 2);
    assert_eq!(pkg.enums[0].values[1].value, "greaterEqual");
    assert_eq!(pkg.attributes().count(), 4);
    assert!(pkg.attributes().all(|a| a.root().is_some()));

    Ok(())
}

#[test]
fn load_rejects_foreign_files() -> Result<()> {
    let temp_file = NamedTempFile::new()?;
    std::fs::write(temp_file.path(), b"PKGSNAP\x01\x00\x00\x00")?;
    let err = PackageDoc::load_from_binary(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("magic"));
    Ok(())
}

#[test]
fn missing_file_is_io_error() {
    let mut parser = PackageParser::new(
        ParserConfig::default(),
        MemSource {
            files: HashMap::new(),
        },
    );
    assert!(matches!(
        parser.parse_package_file("mem://absent.xml"),
        Err(ParseError::Io { .. })
    ));
}
