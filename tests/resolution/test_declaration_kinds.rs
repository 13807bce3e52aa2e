//! Interfaces, implements clauses, type aliases and enums

use crate::common::TestProject;
use tscomp::resolution::exported_classes;
use tscomp::{Diagnostics, ResolveError, SymbolKind, SymbolReference};

#[test]
fn test_interface_chain_follows_single_parent() {
    let project = TestProject::new();
    project.add_file(
        "shapes.ts",
        r#"
import { Named } from './named';
export interface Shape extends Named {}
export interface Polygon<N extends number = 3> extends Shape {}
"#,
    );
    project.add_file("named.ts", "export interface Named {}\n");

    let builder = project.builder();
    let mut diagnostics = Diagnostics::new();
    let polygon = builder
        .resolver()
        .resolve(
            &SymbolReference::new("Polygon", project.file("shapes.ts")),
            true,
            &mut diagnostics,
        )
        .unwrap();
    let chain = builder.build_chain(polygon, &mut diagnostics).unwrap();

    let names: Vec<&str> = chain.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["Polygon", "Shape", "Named"]);
    assert!(chain.iter().all(|s| s.kind() == SymbolKind::Interface));
    assert_eq!(chain[2].file_name(), project.file("named.ts"));

    let n = &chain[0].generics().unwrap()["N"];
    assert_eq!(n.constraint.as_ref().unwrap().text, "number");
    assert_eq!(n.default.as_ref().unwrap().text, "3");
}

#[test]
fn test_class_superclass_lookup_ignores_interfaces() {
    let project = TestProject::new();
    project.add_file(
        "a.ts",
        "interface Base {}\nexport class A extends Base {}\n",
    );

    let err = project.chain("A", "a.ts").unwrap_err();
    assert!(matches!(err, ResolveError::SymbolNotFound { ref name, .. } if name == "Base"));
}

#[test]
fn test_interface_extending_class_is_rejected() {
    let project = TestProject::new();
    project.add_file(
        "a.ts",
        "class Point {}\nexport interface Point3d extends Point {}\n",
    );

    let builder = project.builder();
    let mut diagnostics = Diagnostics::new();
    let point = builder
        .resolver()
        .resolve(
            &SymbolReference::new("Point3d", project.file("a.ts")),
            true,
            &mut diagnostics,
        )
        .unwrap();

    match builder.build_chain(point, &mut diagnostics).unwrap_err() {
        ResolveError::UnsupportedHeritage {
            expression, line, ..
        } => {
            assert_eq!(expression, "Point");
            assert_eq!(line, 2);
        }
        other => panic!("expected UnsupportedHeritage, got {other:?}"),
    }
}

#[test]
fn test_implements_links_classes_and_interfaces() {
    let project = TestProject::new();
    project.add_file(
        "service.ts",
        r#"
import { Disposable } from './disposable';
import { Base } from './base';
class Mixin {}
export class Service extends Base implements Disposable, Mixin {}
"#,
    );
    project.add_file("disposable.ts", "export interface Disposable {}\n");
    project.add_file(
        "base.ts",
        "import { Disposable } from './disposable';\nexport abstract class Base implements Disposable {}\n",
    );

    let builder = project.builder();
    let mut diagnostics = Diagnostics::new();
    let service = builder
        .resolver()
        .resolve(
            &SymbolReference::new("Service", project.file("service.ts")),
            false,
            &mut diagnostics,
        )
        .unwrap();
    let service = builder.load_chain(service, &mut diagnostics).unwrap();
    let service = service.as_class().unwrap();

    let implemented: Vec<(&str, SymbolKind)> = service
        .implements_interfaces
        .iter()
        .map(|s| (s.name(), s.kind()))
        .collect();
    assert_eq!(
        implemented,
        vec![
            ("Disposable", SymbolKind::Interface),
            ("Mixin", SymbolKind::Class)
        ]
    );

    // Diamond through Base is not a cycle
    let base = service.super_class.as_ref().unwrap();
    assert!(base.is_abstract);
    assert_eq!(base.implements_interfaces[0].name(), "Disposable");
}

#[test]
fn test_type_aliases_and_enums_resolve_through_imports() {
    let project = TestProject::new();
    project.add_file(
        "index.ts",
        "import { Id, Mode } from './types';\nexport * from './types';\n",
    );
    project.add_file(
        "types.ts",
        r#"
/** Identifier of a record. */
export type Id<T extends string = string> = T | number;
export const enum Mode { Read = 'r', Write = 'w' }
"#,
    );

    let builder = project.builder();
    let mut diagnostics = Diagnostics::new();

    let id = builder
        .resolver()
        .resolve_type(
            &SymbolReference::new("Id", project.file("index.ts")),
            &mut diagnostics,
        )
        .unwrap();
    assert_eq!(id.kind(), SymbolKind::TypeAlias);
    assert_eq!(id.comment(), Some("Identifier of a record."));

    let mode = builder
        .resolver()
        .resolve_type(
            &SymbolReference::new("Mode", project.file("index.ts")),
            &mut diagnostics,
        )
        .unwrap();
    let summary = serde_json::to_value(mode.summary()).unwrap();
    assert_eq!(summary["kind"], "enum");
    assert_eq!(summary["members"][1]["name"], "Write");
    assert_eq!(summary["members"][1]["value"], "'w'");
}

#[test]
fn test_export_enumeration_lists_only_classes() {
    let project = TestProject::new();
    project.add_file(
        "index.ts",
        r#"
export * from './a';
export { Hidden as Visible } from './b';
export type Alias = string;
export interface Contract {}
export class Local {}
"#,
    );
    project.add_file("a.ts", "export class FromA {}\nexport class Local {}\n");
    project.add_file("b.ts", "class Hidden {}\nexport {};\n");

    let builder = project.builder();
    let mut diagnostics = Diagnostics::new();
    let exports =
        exported_classes(builder.resolver(), &project.file("index.ts"), &mut diagnostics)
            .unwrap();

    let names: Vec<&str> = exports.names().collect();
    assert_eq!(names, vec!["Local", "Visible", "FromA"]);
    assert_eq!(exports.get("Local").unwrap().via, project.file("index.ts"));
    assert_eq!(exports.get("Visible").unwrap().declared_name, "Hidden");
}
