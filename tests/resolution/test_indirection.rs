//! Imports, re-exports, wildcards and module path probing

use crate::common::TestProject;
use tscomp::resolution::DiagnosticKind;
use tscomp::{Diagnostics, ParseError, ResolveError};

#[test]
fn test_multi_step_indirection_is_transparent() {
    let project = TestProject::new();
    project.add_file("index.ts", "export { Widget as PublicWidget } from './lib';\n");
    project.add_file("lib/index.ts", "export * from './widgets';\n");
    project.add_file(
        "lib/widgets/index.ts",
        "import { Impl as Widget } from './impl';\nexport { Widget };\n",
    );
    project.add_file("lib/widgets/impl.ts", "/** The widget. */\nexport class Impl {}\n");

    // `export { Widget }` without a source is terminal, so the chain through
    // widgets/index.ts only works because the import binding is checked first
    let mut diagnostics = Diagnostics::new();
    let widget = project
        .resolve("PublicWidget", "index.ts", false, &mut diagnostics)
        .unwrap();

    assert_eq!(widget.name(), "Impl");
    assert_eq!(widget.file_name(), project.file("lib/widgets/impl.ts"));
    assert_eq!(widget.comment(), Some("The widget."));
    assert_eq!(
        widget.reference().file_name_referenced.as_deref(),
        Some(project.file("index.ts").as_path())
    );
}

#[test]
fn test_sourceless_reexport_is_not_followed() {
    let project = TestProject::new();
    project.add_file(
        "a.ts",
        "import { Thing } from './b';\nexport { Thing as Renamed };\n",
    );
    project.add_file("b.ts", "export class Thing {}\n");

    let mut diagnostics = Diagnostics::new();
    let err = project
        .resolve("Renamed", "a.ts", false, &mut diagnostics)
        .unwrap_err();

    assert!(matches!(err, ResolveError::SymbolNotFound { ref name, .. } if name == "Renamed"));
    assert_eq!(
        diagnostics.of_kind(DiagnosticKind::UnfollowedExport).count(),
        1
    );
}

#[test]
fn test_wildcard_failures_are_suppressed() {
    let project = TestProject::new();
    project.add_file(
        "index.ts",
        r#"
export * from './missing';
export * from './broken';
export * from 'some-package';
export * from './good';
"#,
    );
    project.add_file("broken.ts", "export class {{\n");
    project.add_file("good.ts", "export class Good {}\n");

    let mut diagnostics = Diagnostics::new();
    let good = project
        .resolve("Good", "index.ts", false, &mut diagnostics)
        .unwrap();

    assert_eq!(good.file_name(), project.file("good.ts"));
    assert_eq!(
        diagnostics
            .of_kind(DiagnosticKind::SuppressedWildcardTarget)
            .count(),
        3
    );
    assert_eq!(diagnostics.of_kind(DiagnosticKind::PackageTarget).count(), 1);
}

#[test]
fn test_missing_import_target_propagates() {
    let project = TestProject::new();
    project.add_file("a.ts", "import { Gone } from './gone';\n");

    let mut diagnostics = Diagnostics::new();
    let err = project
        .resolve("Gone", "a.ts", false, &mut diagnostics)
        .unwrap_err();

    assert!(matches!(
        err,
        ResolveError::Parse(ParseError::FileNotFound { .. })
    ));
}

#[test]
fn test_wildcard_barrels_referencing_each_other() {
    let project = TestProject::new();
    project.add_file("a.ts", "export * from './b';\n");
    project.add_file("b.ts", "export * from './a';\n");

    let mut diagnostics = Diagnostics::new();
    let err = project
        .resolve("Nothing", "a.ts", false, &mut diagnostics)
        .unwrap_err();

    assert!(matches!(err, ResolveError::SymbolNotFound { .. }));
    assert_eq!(
        diagnostics
            .of_kind(DiagnosticKind::RevisitedReference)
            .count(),
        1
    );
}

#[test]
fn test_declaration_files_and_js_specifiers() {
    let project = TestProject::new();
    project.add_file(
        "index.ts",
        r#"
import { Ambient } from './types';
import { Esm } from './esm.js';
export class UsesAmbient extends Ambient {}
export class UsesEsm extends Esm {}
"#,
    );
    project.add_file(
        "types.d.ts",
        "export declare abstract class Ambient<T = string> {}\n",
    );
    project.add_file("esm.ts", "export class Esm {}\n");

    assert_eq!(
        project.chain("UsesAmbient", "index.ts").unwrap(),
        vec!["UsesAmbient", "Ambient"]
    );
    assert_eq!(
        project.chain("UsesEsm", "index.ts").unwrap(),
        vec!["UsesEsm", "Esm"]
    );

    let mut diagnostics = Diagnostics::new();
    let ambient = project
        .resolve("Ambient", "types.d.ts", false, &mut diagnostics)
        .unwrap();
    assert!(ambient.as_class().unwrap().is_abstract);
}

#[test]
fn test_tsx_sources_resolve() {
    let project = TestProject::new();
    project.add_file(
        "view.tsx",
        "import { Base } from './base';\nexport class View extends Base {\n  render() { return <div />; }\n}\n",
    );
    project.add_file("base.ts", "export class Base {}\n");

    assert_eq!(project.chain("View", "view").unwrap(), vec!["View", "Base"]);
}

#[test]
fn test_syntax_error_is_fatal_outside_wildcards() {
    let project = TestProject::new();
    project.add_file("a.ts", "import { B } from './b';\nexport class A extends B {}\n");
    project.add_file("b.ts", "export class B extends {\n");

    let err = project.chain("A", "a.ts").unwrap_err();
    assert_eq!(err.status_code(), "PARSE_ERROR");
}

#[test]
fn test_anonymous_default_export_is_malformed() {
    let project = TestProject::new();
    project.add_file("a.ts", "export default class {}\n");

    let mut diagnostics = Diagnostics::new();
    let err = project
        .resolve("Anything", "a.ts", false, &mut diagnostics)
        .unwrap_err();
    assert!(matches!(err, ResolveError::MalformedExport { line: 1, .. }));
}
