//! Node kinds: the closed set the collector dispatches on, and the runtime
//! table that maps numeric discriminants to kind names.
//!
//! Numeric kinds are parser-version specific, so no numbering is baked in.
//! Symbolic kinds (`"FunctionDeclaration"`) resolve without a table.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::errors::CoreError;

/// Statement-level kinds the declaration collector understands.
///
/// Everything else is carried as `Other` with its canonical name, which keeps
/// the "ignore unknown kinds" policy an explicit match arm.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    SourceFile,
    ModuleBlock,
    ModuleDeclaration,
    FunctionDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    TypeAliasDeclaration,
    EnumDeclaration,
    VariableStatement,
    ExportAssignment,
    ImportDeclaration,
    ImportEqualsDeclaration,
    Other(String),
}

impl SyntaxKind {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "SourceFile" => Self::SourceFile,
            "ModuleBlock" => Self::ModuleBlock,
            "ModuleDeclaration" => Self::ModuleDeclaration,
            "FunctionDeclaration" => Self::FunctionDeclaration,
            "ClassDeclaration" => Self::ClassDeclaration,
            "InterfaceDeclaration" => Self::InterfaceDeclaration,
            "TypeAliasDeclaration" => Self::TypeAliasDeclaration,
            "EnumDeclaration" => Self::EnumDeclaration,
            "VariableStatement" => Self::VariableStatement,
            "ExportAssignment" => Self::ExportAssignment,
            "ImportDeclaration" => Self::ImportDeclaration,
            "ImportEqualsDeclaration" => Self::ImportEqualsDeclaration,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::SourceFile => "SourceFile",
            Self::ModuleBlock => "ModuleBlock",
            Self::ModuleDeclaration => "ModuleDeclaration",
            Self::FunctionDeclaration => "FunctionDeclaration",
            Self::ClassDeclaration => "ClassDeclaration",
            Self::InterfaceDeclaration => "InterfaceDeclaration",
            Self::TypeAliasDeclaration => "TypeAliasDeclaration",
            Self::EnumDeclaration => "EnumDeclaration",
            Self::VariableStatement => "VariableStatement",
            Self::ExportAssignment => "ExportAssignment",
            Self::ImportDeclaration => "ImportDeclaration",
            Self::ImportEqualsDeclaration => "ImportEqualsDeclaration",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from numeric kind discriminants to canonical kind names.
#[derive(Debug, Clone, Default)]
pub struct KindTable {
    names: HashMap<i64, String>,
}

impl KindTable {
    /// An empty table: only symbolic kinds resolve.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a JSON document.
    ///
    /// Accepts a bidirectional enum dump (`{"0": "Unknown", "Unknown": 0}`) or
    /// a plain `{name: number}` object. When several names share a number the
    /// first one in document order wins, except that range markers
    /// (`FirstStatement`, `LastToken`, ...) only win when nothing else names
    /// that number.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidKindTable` if the document is not an object
    /// or yields no entries.
    pub fn from_value(value: &Value) -> Result<Self, CoreError> {
        let Some(entries) = value.as_object() else {
            return Err(CoreError::InvalidKindTable(
                "expected a JSON object mapping kind names to numbers".to_string(),
            ));
        };

        let mut names: HashMap<i64, String> = HashMap::new();
        let mut markers: HashMap<i64, String> = HashMap::new();

        for (key, entry) in entries {
            let pair = match entry {
                Value::Number(number) => number.as_i64().map(|n| (n, key.as_str())),
                Value::String(name) => key.parse::<i64>().ok().map(|n| (n, name.as_str())),
                _ => None,
            };
            let Some((number, name)) = pair else {
                continue;
            };
            let slot = if is_range_marker(name) {
                &mut markers
            } else {
                &mut names
            };
            slot.entry(number).or_insert_with(|| name.to_string());
        }

        for (number, name) in markers {
            names.entry(number).or_insert(name);
        }

        if names.is_empty() {
            return Err(CoreError::InvalidKindTable(
                "table contains no kind entries".to_string(),
            ));
        }

        Ok(Self { names })
    }

    /// Parse a table from JSON text.
    ///
    /// # Errors
    /// Returns `CoreError::Json` for malformed JSON, or any error from
    /// [`KindTable::from_value`].
    pub fn from_json_str(text: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Load a table from a JSON file.
    ///
    /// # Errors
    /// Returns `CoreError::Io` if the file cannot be read, or any error from
    /// [`KindTable::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn insert(&mut self, number: i64, name: impl Into<String>) {
        self.names.insert(number, name.into());
    }

    #[must_use]
    pub fn name_of(&self, number: i64) -> Option<&str> {
        self.names.get(&number).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Canonical name for a raw `kind` value.
    ///
    /// Strings are already names and come back unchanged. Numbers are looked up
    /// in the table; unmapped numbers render as `SyntaxKind(<n>)`. Any other
    /// shape has no name.
    #[must_use]
    pub fn kind_name(&self, kind: &Value) -> Option<String> {
        match kind {
            Value::String(name) => Some(name.clone()),
            Value::Number(number) => {
                let Some(n) = number.as_i64() else {
                    return Some(format!("SyntaxKind({number})"));
                };
                Some(
                    self.name_of(n)
                        .map_or_else(|| format!("SyntaxKind({n})"), str::to_string),
                )
            }
            _ => None,
        }
    }

    /// Classify a raw `kind` value into the closed statement-kind set.
    #[must_use]
    pub fn classify(&self, kind: Option<&Value>) -> SyntaxKind {
        match kind {
            Some(Value::String(name)) => SyntaxKind::from_name(name),
            Some(Value::Number(number)) => number
                .as_i64()
                .and_then(|n| self.name_of(n))
                .map_or_else(
                    || SyntaxKind::Other(format!("SyntaxKind({number})")),
                    SyntaxKind::from_name,
                ),
            Some(other) => SyntaxKind::Other(other.to_string()),
            None => SyntaxKind::Other(String::from("<missing kind>")),
        }
    }
}

/// `FirstX` / `LastX` aliases that bracket ranges of the kind enumeration.
fn is_range_marker(name: &str) -> bool {
    ["First", "Last"].iter().any(|prefix| {
        name.strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(char::is_uppercase)
    })
}
