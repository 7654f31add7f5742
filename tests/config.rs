use camino::{Utf8Path, Utf8PathBuf};
use deviser_schema::config::{LanguageConfig, ParserConfig};
use deviser_schema::parser::{FsSource, PackageParser, parse_package_from_text};
use std::fs;

const XML: &str = r#"<package name="sedx">
  <element name="Task" typeCode="SEDX_TASK" hasListOf="true"/>
  <element name="Output" typeCode="SEDX_OUTPUT" baseClass="SedBase"/>
  <plugin extensionPoint="SedDocument"><reference name="listOfTasks"/></plugin>
</package>"#;

#[test]
fn defaults_describe_sbml() {
    let config = ParserConfig::default();
    assert_eq!(config.language, LanguageConfig::default());
    assert_eq!(config.language.base_class, "SBase");
    assert_eq!(config.language.prefix, "SBML");
    assert!(!config.strict_references);
}

#[test]
fn partial_toml_keeps_remaining_defaults() {
    let config = ParserConfig::from_toml_str(
        r#"
strict_references = true

[language]
name = "sedml"
base_class = "SedBase"
"#,
    )
    .unwrap();
    assert!(config.strict_references);
    assert_eq!(config.language.name, "sedml");
    assert_eq!(config.language.base_class, "SedBase");
    assert_eq!(config.language.prefix, "SBML");
    assert_eq!(config.language.list_of_prefix, "ListOf");
}

#[test]
fn invalid_toml_is_rejected() {
    assert!(ParserConfig::from_toml_str("strict_references = \"maybe\"").is_err());
}

#[test]
fn language_base_class_applies_to_elements_without_one() {
    let config = ParserConfig {
        language: LanguageConfig {
            base_class: "SedBase".to_string(),
            ..LanguageConfig::default()
        },
        strict_references: true,
    };
    let pkg = parse_package_from_text(XML, Utf8Path::new("sedx.xml"), &config).unwrap();
    assert_eq!(pkg.sbml_elements[0].base_class, "SedBase");
    assert_eq!(pkg.sbml_elements[1].base_class, "SedBase");
    assert_eq!(pkg.plugins[0].lo_extension[0].name, "Task");
}

#[test]
fn config_and_description_load_from_disk() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).unwrap();
    let config_path = root.join("deviser.toml");
    fs::write(&config_path, "[language]\nlist_of_prefix = \"Collection\"\n").unwrap();
    let xml_path = root.join("sedx.xml");
    fs::write(&xml_path, XML).unwrap();

    let config = ParserConfig::load(&config_path).unwrap();
    let mut parser = PackageParser::new(config, FsSource);
    assert_eq!(parser.config().language.list_of_prefix, "Collection");
    let pkg = parser.parse_package_file(&xml_path).unwrap();
    assert_eq!(pkg.elements[0].list_of_class_name, "CollectionTasks");
    assert_eq!(pkg.elements[0].list_of_name, "collectionTasks");
    // listOfTasks no longer names anything under this convention.
    assert!(pkg.plugins[0].lo_extension.is_empty());
}

#[test]
fn missing_config_file_is_an_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let missing = Utf8PathBuf::from_path_buf(temp_dir.path().join("nope.toml")).unwrap();
    let err = ParserConfig::load(&missing).unwrap_err();
    assert!(format!("{:#}", err).contains("nope.toml"));
}
