use anyhow::Result;
use serde_json::json;

use doxystub::{MetadataIndex, ModuleSnapshot, NameRegistry, StubEmitter, TypeTranslator};

fn fixture_index() -> MetadataIndex {
    serde_json::from_value(json!({
        "classes": {
            "ns::Robot": {
                "brief": "A simulated robot.",
                "members": {
                    "Robot": {
                        "params": [{ "name": "name", "type": "std::string" }]
                    },
                    "calibrate": {
                        "type": "void",
                        "params": [{ "name": "gain", "type": "double" }],
                        "brief": "Calibrates the sensors",
                        "detailed": [{ "name": "gain", "desc": "filter gain" }],
                        "verbatim": "Call once after power-up.",
                        "returns": "nothing"
                    },
                    "step": {
                        "type": "bool",
                        "params": [{ "name": "dt", "type": "double" }],
                        "brief": "Advances the simulation",
                        "detailed": [{ "name": "dt", "desc": "time step" }],
                        "returns": "true on success"
                    },
                    "frames": {
                        "type": "std::vector<std::string>",
                        "static": true,
                        "params": [{ "name": "n", "type": "int" }],
                        "brief": "Computes X",
                        "detailed": [{ "name": "n", "desc": "frame count" }]
                    },
                    "mass": {
                        "type": "double",
                        "brief": "Total mass"
                    }
                }
            }
        }
    }))
    .expect("fixture index deserializes")
}

fn fixture_snapshot() -> ModuleSnapshot {
    serde_json::from_value(json!({
        "module": "robolib",
        "registry": { "ns::Robot": "Robot" },
        "members": [
            { "name": "Robot", "kind": "class", "members": [
                { "name": "__init__", "kind": "callable",
                  "doc": "__init__( (object)arg1, (str)arg2) -> None :" },
                { "name": "_internal", "kind": "callable" },
                { "name": "calibrate", "kind": "callable" },
                { "name": "frames", "kind": "callable" },
                { "name": "mass", "kind": "attribute" },
                { "name": "step", "kind": "callable" },
                { "name": "tags", "kind": "attribute" }
            ]},
            { "name": "Orphan", "kind": "class", "members": [
                { "name": "values", "kind": "attribute" }
            ]},
            { "name": "_private_fn", "kind": "callable" },
            { "name": "wrap_angle", "kind": "callable",
              "doc": "wrap_angle( (float)angle) -> float :" },
            { "name": "helper", "kind": "callable", "doc": "Free form docs." },
            { "name": "version", "kind": "attribute" }
        ]
    }))
    .expect("fixture snapshot deserializes")
}

fn emit_fixture() -> Result<String> {
    let index = fixture_index();
    let snapshot = fixture_snapshot();
    let registry = NameRegistry::build(&snapshot.module, &snapshot.registry);
    let translator = TypeTranslator::build(
        snapshot
            .registry
            .iter()
            .map(|(native, exposed)| (native.as_str(), exposed.as_str())),
    );

    let mut out = Vec::new();
    let mut emitter = StubEmitter::new(&mut out, &snapshot.module, &index, &registry, &translator);
    emitter.emit_module(&snapshot)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn stub_starts_with_the_import_header() -> Result<()> {
    let stub = emit_fixture()?;
    assert!(stub.starts_with("import numpy\n"));
    Ok(())
}

#[test]
fn class_brief_is_emitted_under_the_header() -> Result<()> {
    let stub = emit_fixture()?;
    assert!(stub.contains("class Robot:\n  \"\"\"A simulated robot.\"\"\"\n"));
    Ok(())
}

#[test]
fn constructor_resolves_through_the_class_name() -> Result<()> {
    let stub = emit_fixture()?;
    // The documented constructor carries the class's declared parameter, an
    // implicit self, and no return annotation beyond the default.
    let expected = "  def __init__(\n    self: Robot,\n    name: str, # std::string\n\n  ) -> any:\n    ...\n";
    assert!(stub.contains(expected), "missing constructor block:\n{stub}");
    Ok(())
}

#[test]
fn static_method_carries_marker_types_and_doc_body() -> Result<()> {
    let stub = emit_fixture()?;
    let expected = concat!(
        "  @staticmethod\n",
        "  def frames(\n",
        "    n: int, # int\n",
        "\n",
        "  ) -> list[str]:\n",
        "    \"\"\"Computes X\n",
        "\n",
        "    :param n: frame count\"\"\"\n",
        "    ...\n",
    );
    assert!(stub.contains(expected), "missing static block:\n{stub}");
    Ok(())
}

#[test]
fn instance_method_gets_self_and_labeled_docs() -> Result<()> {
    let stub = emit_fixture()?;
    let expected = concat!(
        "  def step(\n",
        "    self: Robot,\n",
        "    dt: float, # double\n",
        "\n",
        "  ) -> bool:\n",
        "    \"\"\"Advances the simulation\n",
        "\n",
        "    :param dt: time step\n",
        "    :return: true on success\"\"\"\n",
        "    ...\n",
    );
    assert!(stub.contains(expected), "missing instance method:\n{stub}");
    Ok(())
}

#[test]
fn remarks_sit_between_param_docs_and_return_description() -> Result<()> {
    let stub = emit_fixture()?;
    let expected = concat!(
        "  def calibrate(\n",
        "    self: Robot,\n",
        "    gain: float, # double\n",
        "\n",
        "  ) -> None:\n",
        "    \"\"\"Calibrates the sensors\n",
        "\n",
        "    :param gain: filter gain\n",
        "    Call once after power-up.\n",
        "    :return: nothing\"\"\"\n",
        "    ...\n",
    );
    assert!(stub.contains(expected), "missing remarks block:\n{stub}");
    Ok(())
}

#[test]
fn full_output_matches_the_golden_stub() -> Result<()> {
    let stub = emit_fixture()?;
    let golden = r#"import numpy
class Robot:
  """A simulated robot."""
  def __init__(
    self: Robot,
    name: str, # std::string

  ) -> any:
    ...

  def calibrate(
    self: Robot,
    gain: float, # double

  ) -> None:
    """Calibrates the sensors

    :param gain: filter gain
    Call once after power-up.
    :return: nothing"""
    ...

  @staticmethod
  def frames(
    n: int, # int

  ) -> list[str]:
    """Computes X

    :param n: frame count"""
    ...

  mass: float # double
  """Total mass"""

  def step(
    self: Robot,
    dt: float, # double

  ) -> bool:
    """Advances the simulation

    :param dt: time step
    :return: true on success"""
    ...

  tags: any


class Orphan:
  values: any


def wrap_angle(
  angle: float,

) -> float:
  ...


def helper(

) -> any:
  ...


"#;
    assert_eq!(stub, golden);
    Ok(())
}

#[test]
fn documented_attribute_keeps_raw_type_and_brief() -> Result<()> {
    let stub = emit_fixture()?;
    assert!(stub.contains("  mass: float # double\n  \"\"\"Total mass\"\"\"\n"));
    Ok(())
}

#[test]
fn undocumented_members_degrade_to_any() -> Result<()> {
    let stub = emit_fixture()?;
    assert!(stub.contains("  tags: any\n"));
    // Orphan has no registry counterpart at all; its attribute still emits.
    assert!(stub.contains("class Orphan:\n  values: any\n"));
    Ok(())
}

#[test]
fn module_callable_falls_back_to_the_prototype() -> Result<()> {
    let stub = emit_fixture()?;
    let expected = "def wrap_angle(\n  angle: float,\n\n) -> float:\n  ...\n";
    assert!(stub.contains(expected), "missing fallback callable:\n{stub}");
    Ok(())
}

#[test]
fn free_form_docstring_emits_a_bare_signature() -> Result<()> {
    let stub = emit_fixture()?;
    assert!(stub.contains("def helper(\n\n) -> any:\n  ...\n"));
    Ok(())
}

#[test]
fn private_names_are_filtered_and_order_is_preserved() -> Result<()> {
    let stub = emit_fixture()?;
    assert!(!stub.contains("_internal"));
    assert!(!stub.contains("_private_fn"));
    // Module-level plain attributes carry no stub entry.
    assert!(!stub.contains("version"));

    let robot = stub.find("class Robot:").expect("Robot emitted");
    let orphan = stub.find("class Orphan:").expect("Orphan emitted");
    let wrap = stub.find("def wrap_angle(").expect("wrap_angle emitted");
    let helper = stub.find("def helper(").expect("helper emitted");
    assert!(robot < orphan && orphan < wrap && wrap < helper);

    assert_eq!(stub.matches("class Robot:").count(), 1);
    assert_eq!(stub.matches("def wrap_angle(").count(), 1);
    Ok(())
}

#[test]
fn parameter_count_matches_the_descriptor_plus_self() -> Result<()> {
    let stub = emit_fixture()?;
    let block_start = stub.find("  def step(").expect("step emitted");
    let block_end = stub[block_start..].find(") -> ").expect("step closes") + block_start;
    let params = stub[block_start..block_end]
        .lines()
        .filter(|line| line.trim_end().ends_with(',') || line.contains(": "))
        .count();
    // One declared parameter plus the implicit self.
    assert_eq!(params, 2);
    Ok(())
}
