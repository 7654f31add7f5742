//! Package model: elements, attributes, plugins and enums parsed from a description,
//! plus the binary snapshot wrapper.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ────────────────────────────────────────────────────────────────────────────
// PackageDoc – binary snapshot wrapper
// ────────────────────────────────────────────────────────────────────────────

const SNAPSHOT_MAGIC: &[u8; 7] = b"DEVISER";
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDoc {
    pub package: Package,
}

impl PackageDoc {
    /// Save the PackageDoc to a binary file with magic bytes and versioning.
    pub fn save_to_binary<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        std::io::Write::write_all(&mut writer, SNAPSHOT_MAGIC)?;
        std::io::Write::write_all(&mut writer, &SNAPSHOT_VERSION.to_le_bytes())?;
        bincode::serde::encode_into_std_write(self, &mut writer, bincode::config::standard())?;
        Ok(())
    }

    /// Load a PackageDoc from a binary file, checking magic bytes and version.
    pub fn load_from_binary<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        let mut reader = std::io::BufReader::new(file);
        let mut magic = [0u8; 7];
        std::io::Read::read_exact(&mut reader, &mut magic)?;
        if &magic != SNAPSHOT_MAGIC {
            anyhow::bail!("Invalid magic bytes: expected 'DEVISER'");
        }
        let mut version_bytes = [0u8; 4];
        std::io::Read::read_exact(&mut reader, &mut version_bytes)?;
        let version = u32::from_le_bytes(version_bytes);
        if version != SNAPSHOT_VERSION {
            anyhow::bail!("Unsupported version: {}", version);
        }
        let doc: PackageDoc =
            bincode::serde::decode_from_std_read(&mut reader, bincode::config::standard())?;
        Ok(doc)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Arena handles
// ────────────────────────────────────────────────────────────────────────────

/// Index of an [`Element`] in [`Package::sbml_elements`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub usize);

/// Index of a [`Plugin`] in [`Package::plugins`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginId(pub usize);

/// Owning record of an [`Attribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// Attribute lives in the element's `attribs`.
    Element(ElementId),
    /// Attribute lives in the element's `lo_attribs` (the generated ListOf wrapper).
    ListOf(ElementId),
    Plugin(PluginId),
}

/// Marks a record as linked to the package that owns it.
///
/// The package itself is reached through [`Package`] navigation helpers; this
/// only records which package did the linking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootLink {
    pub package: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Package
// ────────────────────────────────────────────────────────────────────────────

/// A parsed SBML extension package description.
///
/// Owns every element, attribute, plugin and enumeration by value. All
/// back-references inside the graph are indices into these vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Lowercase package identifier (e.g. `"qual"`).
    pub name: String,
    pub fullname: String,
    /// Base of the package's type-code range.
    pub number: i64,
    /// Base of the package's error-code range.
    pub offset: i64,
    pub version: i64,
    pub sbml_level: i64,
    pub sbml_version: i64,
    pub pkg_version: i64,
    pub required: bool,
    /// Lightweight element entries, parallel to `sbml_elements`.
    pub elements: Vec<ElementRef>,
    pub sbml_elements: Vec<Element>,
    pub plugins: Vec<Plugin>,
    pub enums: Vec<Enum>,
    #[serde(default)]
    pub additional_decls: Option<String>,
    #[serde(default)]
    pub additional_defs: Option<String>,
}

impl Package {
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.sbml_elements.get(id.0)
    }

    pub fn plugin(&self, id: PluginId) -> Option<&Plugin> {
        self.plugins.get(id.0)
    }

    pub fn element_by_name(&self, name: &str) -> Option<&Element> {
        self.sbml_elements.iter().find(|e| e.name == name)
    }

    pub fn enum_by_name(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Elements that take part in typecode enumeration, in declaration order.
    /// Elements carrying the `HACK` sentinel are skipped.
    pub fn typecoded_elements(&self) -> impl Iterator<Item = &Element> {
        self.sbml_elements.iter().filter(|e| !e.is_hack())
    }

    /// Every attribute of the package (element, ListOf and plugin attributes)
    /// paired with navigation back to its owner and to this package.
    pub fn attributes(&self) -> impl Iterator<Item = AttributeView<'_>> {
        let from_elements = self.sbml_elements.iter().enumerate().flat_map(move |(i, e)| {
            let id = ElementId(i);
            let own = e.attribs.iter().map(move |attr| AttributeView {
                package: self,
                attr,
                location: Owner::Element(id),
            });
            let lo = e.lo_attribs.iter().map(move |attr| AttributeView {
                package: self,
                attr,
                location: Owner::ListOf(id),
            });
            own.chain(lo)
        });
        let from_plugins = self.plugins.iter().enumerate().flat_map(move |(i, p)| {
            p.attribs.iter().map(move |attr| AttributeView {
                package: self,
                attr,
                location: Owner::Plugin(PluginId(i)),
            })
        });
        from_elements.chain(from_plugins)
    }

    /// Resolve the element a concrete entry belongs to.
    pub fn parent_of(&self, concrete: &Concrete) -> Option<&Element> {
        concrete.parent.and_then(|id| self.element(id))
    }
}

/// An attribute together with the package it was borrowed from.
#[derive(Debug, Clone, Copy)]
pub struct AttributeView<'a> {
    package: &'a Package,
    attr: &'a Attribute,
    location: Owner,
}

/// Resolved owner of an attribute.
#[derive(Debug, Clone, Copy)]
pub enum OwnerRef<'a> {
    Element(&'a Element),
    ListOf(&'a Element),
    Plugin(&'a Plugin),
}

impl<'a> AttributeView<'a> {
    pub fn attribute(&self) -> &'a Attribute {
        self.attr
    }

    /// Where the attribute physically lives in the package.
    pub fn location(&self) -> Owner {
        self.location
    }

    /// The package that owns this attribute, if the attribute has been linked.
    pub fn root(&self) -> Option<&'a Package> {
        match &self.attr.root {
            Some(link) if link.package == self.package.name => Some(self.package),
            _ => None,
        }
    }

    pub fn parent(&self) -> Option<OwnerRef<'a>> {
        match self.attr.parent? {
            Owner::Element(id) => self.package.element(id).map(OwnerRef::Element),
            Owner::ListOf(id) => self.package.element(id).map(OwnerRef::ListOf),
            Owner::Plugin(id) => self.package.plugin(id).map(OwnerRef::Plugin),
        }
    }

    /// The owning element, for element and ListOf attributes.
    pub fn parent_element(&self) -> Option<&'a Element> {
        match self.parent()? {
            OwnerRef::Element(e) | OwnerRef::ListOf(e) => Some(e),
            OwnerRef::Plugin(_) => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Element
// ────────────────────────────────────────────────────────────────────────────

/// Typecode sentinel excluding an element from typecode and error-table output.
pub const HACK_TYPECODE: &str = "HACK";

/// One class definition within a package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    /// Name of the owning package.
    pub package: String,
    pub typecode: String,
    pub has_list_of: bool,
    pub has_children: bool,
    pub has_math: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    pub children_overwrite_element_name: bool,
    pub base_class: String,
    pub attribs: Vec<Attribute>,
    pub lo_attribs: Vec<Attribute>,
    /// XML serialization name override.
    #[serde(default)]
    pub element_name: Option<String>,
    /// ListOf XML name override (`listOfName`).
    #[serde(default)]
    pub lo_element_name: Option<String>,
    /// ListOf class name override (`listOfClassName`).
    #[serde(default)]
    pub lo_class_name: Option<String>,
    /// Concrete subclasses; only populated for abstract elements.
    #[serde(default)]
    pub concrete: Vec<Concrete>,
    #[serde(default)]
    pub additional_decls: Option<String>,
    #[serde(default)]
    pub additional_defs: Option<String>,
    #[serde(default)]
    pub min_num_list_of_children: i64,
    #[serde(default)]
    pub max_num_list_of_children: i64,
    #[serde(default)]
    pub root: Option<RootLink>,
}

impl Element {
    pub fn is_hack(&self) -> bool {
        self.typecode == HACK_TYPECODE
    }
}

/// Lightweight entry in [`Package::elements`], used for plugin reference
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRef {
    pub name: String,
    pub typecode: String,
    pub is_list_of: bool,
    /// Resolved ListOf XML name (override or default plural rule).
    pub list_of_name: String,
    /// Resolved ListOf class name (override or default plural rule).
    pub list_of_class_name: String,
    pub id: ElementId,
}

/// A non-abstract subclass that may stand in for an abstract element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concrete {
    pub name: String,
    pub element: String,
    #[serde(default)]
    pub min_num_children: i64,
    #[serde(default)]
    pub max_num_children: i64,
    #[serde(default)]
    pub parent: Option<ElementId>,
}

// ────────────────────────────────────────────────────────────────────────────
// Attribute
// ────────────────────────────────────────────────────────────────────────────

/// Canonical attribute type. Unknown names are kept verbatim in
/// [`AttributeType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Bool,
    UInt,
    Int,
    Double,
    String,
    SId,
    SIdRef,
    UnitSId,
    UnitSIdRef,
    Enum,
    Element,
    LoElement,
    InlineLoElement,
    Other(String),
}

impl AttributeType {
    pub fn as_str(&self) -> &str {
        match self {
            AttributeType::Bool => "bool",
            AttributeType::UInt => "uint",
            AttributeType::Int => "int",
            AttributeType::Double => "double",
            AttributeType::String => "string",
            AttributeType::SId => "SId",
            AttributeType::SIdRef => "SIdRef",
            AttributeType::UnitSId => "UnitSId",
            AttributeType::UnitSIdRef => "UnitSIdRef",
            AttributeType::Enum => "enum",
            AttributeType::Element => "element",
            AttributeType::LoElement => "lo_element",
            AttributeType::InlineLoElement => "inline_lo_element",
            AttributeType::Other(s) => s,
        }
    }

    /// True for types whose `element` field names another class.
    pub fn references_element(&self) -> bool {
        matches!(
            self,
            AttributeType::Element | AttributeType::LoElement | AttributeType::InlineLoElement
        )
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AttributeType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(crate::parser::standardize_types(&s))
    }
}

impl Serialize for AttributeType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// An attribute of an element, a ListOf wrapper or a plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    pub reqd: bool,
    /// Referenced class name for `element`/`lo_element` attributes.
    #[serde(default)]
    pub element: Option<String>,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub concrete: Vec<Concrete>,
    /// XML name override (`xmlName`).
    #[serde(default)]
    pub xml_name: Option<String>,
    #[serde(default)]
    pub parent: Option<Owner>,
    #[serde(default)]
    pub root: Option<RootLink>,
}

impl Attribute {
    /// Name used when serializing to XML.
    pub fn xml_name(&self) -> &str {
        self.xml_name.as_deref().unwrap_or(&self.name)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Plugin / Enum
// ────────────────────────────────────────────────────────────────────────────

/// Package-specific additions to an existing SBML class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugin {
    /// Extended SBML class (e.g. `"Model"`).
    pub sbase: String,
    pub extension: Vec<ElementRef>,
    pub lo_extension: Vec<ElementRef>,
    pub attribs: Vec<Attribute>,
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub typecode: Option<String>,
    #[serde(default)]
    pub additional_decls: Option<String>,
    #[serde(default)]
    pub additional_defs: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    /// Literal constant as written in the XML.
    pub value: String,
}

/// Concrete lists keyed by the owning element's name, in document order.
pub type ConcreteMap = IndexMap<String, Vec<Concrete>>;
