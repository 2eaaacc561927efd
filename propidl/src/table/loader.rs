//! Reads property tables from static TOML or JSON data files.
//!
//! The top-level `binding` key holds a mapping of identifier to descriptor
//! record. Source order is kept, so the generated interface lists
//! properties in the order the table declares them.

use camino::Utf8Path;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::{PropertyDescriptor, PropertyFlag, PropertyKind, PropertyTable, RuleType};
use crate::error::LoadError;

/// Binding name used when the caller does not supply one.
pub const DEFAULT_BINDING: &str = "data";

/// On-disk shape of a descriptor record.
#[derive(Debug, Deserialize)]
struct DescriptorRecord {
    #[serde(default)]
    id: Option<String>,
    name: String,
    method: String,
    #[serde(rename = "type")]
    kind: RecordKind,
    #[serde(default)]
    rules: Vec<RuleType>,
    #[serde(default)]
    pref: String,
    #[serde(default)]
    flags: Vec<PropertyFlag>,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    prop_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RecordKind {
    Longhand,
    Shorthand,
    Alias,
}

/// Loads the property table at `path`, reading the mapping under `binding`.
///
/// `.json` files are parsed as JSON; anything else is parsed as TOML.
/// Every call re-reads the file.
///
/// # Errors
///
/// Returns a [`LoadError`] when the file is missing or unreadable, fails to
/// parse, lacks the binding, holds a non-mapping binding, or contains a
/// record that does not match the descriptor schema.
pub fn load_table(path: &Utf8Path, binding: &str) -> Result<PropertyTable, LoadError> {
    let data = read_source(path)?;
    let document = parse_document(path, &data)?;
    let records = match document.get(binding) {
        None => {
            return Err(LoadError::MissingBinding {
                path: path.to_path_buf(),
                binding: binding.to_owned(),
            });
        }
        Some(Value::Object(records)) => records,
        Some(_) => {
            return Err(LoadError::BindingNotMapping {
                path: path.to_path_buf(),
                binding: binding.to_owned(),
            });
        }
    };

    let descriptors = records
        .iter()
        .map(|(key, value)| decode_record(key, value))
        .collect::<Result<Vec<_>, _>>()?;
    let table = PropertyTable::from_descriptors(descriptors)?;
    debug!(path = %path, binding, properties = table.len(), "loaded property table");
    Ok(table)
}

fn read_source(path: &Utf8Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound(path.to_path_buf())
        } else {
            LoadError::Read {
                path: path.to_path_buf(),
                source: err,
            }
        }
    })
}

fn parse_document(path: &Utf8Path, data: &str) -> Result<Map<String, Value>, LoadError> {
    let parse_error = |source: Box<dyn std::error::Error + Send + Sync>| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        return match serde_json::from_str::<Value>(data).map_err(|e| parse_error(e.into()))? {
            Value::Object(document) => Ok(document),
            _ => Err(parse_error("top level is not an object".into())),
        };
    }

    let document: toml::Table = toml::from_str(data).map_err(|e| parse_error(e.into()))?;
    match serde_json::to_value(document).map_err(|e| parse_error(e.into()))? {
        Value::Object(converted) => Ok(converted),
        _ => Err(parse_error("top level is not a table".into())),
    }
}

fn decode_record(key: &str, value: &Value) -> Result<PropertyDescriptor, LoadError> {
    let record_error = |message: String| LoadError::Record {
        id: key.to_owned(),
        message,
    };
    let record = DescriptorRecord::deserialize(value).map_err(|e| record_error(e.to_string()))?;

    if let Some(id) = record.id.as_deref().filter(|id| *id != key) {
        return Err(record_error(format!("record id `{id}` does not match its key")));
    }

    let kind = match (record.kind, record.prop_id) {
        (RecordKind::Alias, Some(prop_id)) => PropertyKind::Alias { prop_id },
        (RecordKind::Alias, None) => {
            return Err(record_error("alias record is missing `prop_id`".to_owned()));
        }
        (RecordKind::Longhand | RecordKind::Shorthand, Some(_)) => {
            return Err(record_error(
                "`prop_id` is only valid on alias records".to_owned(),
            ));
        }
        (RecordKind::Longhand, None) => PropertyKind::Longhand,
        (RecordKind::Shorthand, None) => PropertyKind::Shorthand,
    };

    Ok(PropertyDescriptor {
        id: key.to_owned(),
        name: record.name,
        method: record.method,
        kind,
        rules: record.rules,
        pref: record.pref,
        flags: record.flags,
        aliases: record.aliases,
    })
}

#[cfg(test)]
mod tests {
    //! Tests for table loading.

    use super::*;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    const TOML_TABLE: &str = r#"
[data.zoom]
name = "zoom"
method = "Zoom"
type = "longhand"
rules = ["Style"]

[data.transform]
name = "transform"
method = "Transform"
type = "longhand"
rules = ["Style"]
aliases = ["webkit_transform"]

[data.webkit_transform]
name = "-webkit-transform"
method = "WebkitTransform"
type = "alias"
prop_id = "transform"
rules = ["Style"]
"#;

    #[fixture]
    fn workdir() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn write(dir: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("UTF-8 temp path");
        std::fs::write(&path, contents).expect("write table");
        path
    }

    #[rstest]
    fn loads_toml_in_source_order(workdir: TempDir) {
        let path = write(&workdir, "props.toml", TOML_TABLE);
        let table = load_table(&path, DEFAULT_BINDING).expect("load table");

        let ids: Vec<_> = table.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["zoom", "transform", "webkit_transform"]);
        let alias = table.get("webkit_transform").expect("alias present");
        assert_eq!(
            alias.kind,
            PropertyKind::Alias {
                prop_id: "transform".to_owned()
            }
        );
        assert!(alias.pref.is_empty());
    }

    #[rstest]
    fn loads_json_in_source_order(workdir: TempDir) {
        let json = r#"{"props": {
            "word_wrap": {"name": "word-wrap", "method": "WordWrap", "type": "alias",
                          "prop_id": "overflow_wrap", "rules": ["Style"]},
            "overflow_wrap": {"name": "overflow-wrap", "method": "OverflowWrap",
                              "type": "longhand", "rules": ["Style"],
                              "flags": ["CanAnimateOnCompositor"], "aliases": ["word_wrap"]}
        }}"#;
        let path = write(&workdir, "props.json", json);
        let table = load_table(&path, "props").expect("load table");

        let ids: Vec<_> = table.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["word_wrap", "overflow_wrap"]);
    }

    #[rstest]
    fn missing_file_is_reported(workdir: TempDir) {
        let path = Utf8PathBuf::from_path_buf(workdir.path().join("absent.toml"))
            .expect("UTF-8 temp path");
        let err = load_table(&path, DEFAULT_BINDING).expect_err("missing file");
        assert!(matches!(err, LoadError::NotFound(p) if p == path));
    }

    #[rstest]
    fn missing_binding_is_reported(workdir: TempDir) {
        let path = write(&workdir, "props.toml", TOML_TABLE);
        let err = load_table(&path, "properties").expect_err("missing binding");
        assert!(matches!(err, LoadError::MissingBinding { binding, .. } if binding == "properties"));
    }

    #[rstest]
    fn non_mapping_binding_is_reported(workdir: TempDir) {
        let path = write(&workdir, "props.toml", "data = [\"zoom\"]\n");
        let err = load_table(&path, DEFAULT_BINDING).expect_err("binding is a list");
        assert!(matches!(err, LoadError::BindingNotMapping { .. }));
    }

    #[rstest]
    fn parse_failure_is_reported(workdir: TempDir) {
        let path = write(&workdir, "props.toml", "[data\nname = ");
        let err = load_table(&path, DEFAULT_BINDING).expect_err("invalid TOML");
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[rstest]
    #[case::missing_method("[data.zoom]\nname = \"zoom\"\ntype = \"longhand\"\n", "method")]
    #[case::alias_without_target(
        "[data.word_wrap]\nname = \"word-wrap\"\nmethod = \"WordWrap\"\ntype = \"alias\"\n",
        "prop_id"
    )]
    #[case::mismatched_id(
        "[data.zoom]\nid = \"scale\"\nname = \"zoom\"\nmethod = \"Zoom\"\ntype = \"longhand\"\n",
        "does not match"
    )]
    #[case::empty_method(
        "[data.zoom]\nname = \"zoom\"\nmethod = \"\"\ntype = \"longhand\"\n",
        "`method`"
    )]
    #[case::empty_name(
        "[data.zoom]\nname = \"\"\nmethod = \"Zoom\"\ntype = \"longhand\"\n",
        "`name`"
    )]
    #[case::quoted_name(
        "[data.zoom]\nname = 'zo\"om'\nmethod = \"Zoom\"\ntype = \"longhand\"\n",
        "`name`"
    )]
    fn malformed_records_name_the_property(
        workdir: TempDir,
        #[case] contents: &str,
        #[case] needle: &str,
    ) {
        let path = write(&workdir, "props.toml", contents);
        let err = load_table(&path, DEFAULT_BINDING).expect_err("malformed record");
        let LoadError::Record { id, message } = &err else {
            panic!("expected a record error, got {err:?}");
        };
        assert!(id == "zoom" || id == "word_wrap", "unexpected id {id}");
        assert!(message.contains(needle), "message `{message}` lacks `{needle}`");
    }
}
