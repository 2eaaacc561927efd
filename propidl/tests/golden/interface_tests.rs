//! Golden tests for generated interfaces.
//!
//! The fixture table holds one property of every shape the generator
//! distinguishes; each interface rendered from it must match the checked-in
//! `.webidl` file byte for byte.

use camino::{Utf8Path, Utf8PathBuf};
use propidl::GeneratorConfig;
use propidl::output::{WriteOutcome, write_interface_file};
use propidl::pipeline::{InterfacePlan, plan_interfaces};
use propidl::table::{DEFAULT_BINDING, load_table};
use rstest::rstest;
use test_helpers::webidl::{binding_aliases_of, find_attribute, spellings};

fn manifest_dir() -> &'static Utf8Path {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR"))
}

fn fixture(name: &str) -> Utf8PathBuf {
    manifest_dir().join("tests").join("fixtures").join(name)
}

fn expected(interface: &str) -> String {
    let path = manifest_dir()
        .join("tests")
        .join("golden")
        .join("expected")
        .join(format!("{interface}.webidl"));
    std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("read {path}: {err}"))
}

fn plans(table: &str) -> Vec<InterfacePlan> {
    let config = GeneratorConfig::default();
    let props = load_table(&fixture(table), DEFAULT_BINDING).expect("fixture table loads");
    plan_interfaces(&props, &config, &[]).expect("fixture table plans")
}

fn rendered(table: &str, interface: &str) -> String {
    let config = GeneratorConfig::default();
    plans(table)
        .iter()
        .find(|plan| plan.target.interface == interface)
        .map(|plan| plan.render(&config.layout()))
        .unwrap_or_else(|| panic!("{interface} not planned"))
}

#[rstest]
#[case::style_toml("props.toml", "CSS2Properties")]
#[case::page_toml("props.toml", "CSSPageDescriptors")]
#[case::position_try_toml("props.toml", "CSSPositionTryDescriptors")]
#[case::style_json("props.json", "CSS2Properties")]
#[case::page_json("props.json", "CSSPageDescriptors")]
#[case::position_try_json("props.json", "CSSPositionTryDescriptors")]
fn golden_interface_matches(#[case] table: &str, #[case] interface: &str) {
    assert_eq!(rendered(table, interface), expected(interface));
}

#[rstest]
fn golden_style_interface_structure() {
    let idl = rendered("props.toml", "CSS2Properties");

    let names = spellings(&idl);
    assert!(!names.contains(&"xLang") && !names.contains(&"XLang"));
    assert!(!names.contains(&"float") && !names.contains(&"wordWrap"));
    assert_eq!(
        names.iter().filter(|name| name.ends_with("ppearance")).count(),
        2
    );

    let float = find_attribute(&idl, "cssFloat").expect("cssFloat declared");
    assert_eq!(binding_aliases_of(float), ["float"]);

    let transform = find_attribute(&idl, "transform").expect("transform declared");
    assert_eq!(
        binding_aliases_of(transform),
        ["webkitTransform", "-webkit-transform", "WebkitTransform"]
    );
}

#[rstest]
fn golden_every_attribute_carries_mandatory_annotations() {
    for interface in ["CSS2Properties", "CSSPageDescriptors", "CSSPositionTryDescriptors"] {
        let idl = rendered("props.toml", interface);
        for name in spellings(&idl) {
            let line = find_attribute(&idl, name).expect("declared");
            assert!(
                line.contains(
                    "CEReactions, SetterThrows, SetterNeedsSubjectPrincipal=NonSystem"
                ),
                "{interface}.{name}: {line}"
            );
        }
    }
}

#[rstest]
fn golden_generation_is_idempotent() {
    let first = rendered("props.toml", "CSS2Properties");
    let second = rendered("props.toml", "CSS2Properties");
    assert_eq!(first, second);
}

#[rstest]
fn golden_files_are_rewritten_only_when_changed() -> anyhow::Result<()> {
    let tempdir = tempfile::tempdir()?;
    let out_dir = Utf8PathBuf::from_path_buf(tempdir.path().to_path_buf())
        .map_err(|path| anyhow::anyhow!("non UTF-8 temp dir {}", path.display()))?;
    let config = GeneratorConfig::default();

    for plan in plans("props.toml") {
        let content = plan.render(&config.layout());
        let file_name = plan.target.file_name();
        let (path, first) = write_interface_file(&out_dir, &file_name, &content)?;
        assert_eq!(first, WriteOutcome::Written);
        assert_eq!(std::fs::read_to_string(&path)?, expected(&plan.target.interface));
        let (_, second) = write_interface_file(&out_dir, &file_name, &content)?;
        assert_eq!(second, WriteOutcome::Unchanged);
    }
    Ok(())
}
