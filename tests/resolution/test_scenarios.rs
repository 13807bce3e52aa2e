//! End-to-end resolution scenarios across small file graphs

use crate::common::TestProject;
use tscomp::{Diagnostics, ResolveError};

#[test]
fn test_imported_superclass_chain() {
    let project = TestProject::new();
    project.add_file("a.ts", "export class Base {}\n");
    project.add_file(
        "b.ts",
        "import { Base } from './a';\nexport class Child extends Base {}\n",
    );

    let chain = project.chain("Child", "b.ts").unwrap();
    assert_eq!(chain, vec!["Child", "Base"]);
}

#[test]
fn test_generic_constraint_is_recorded() {
    let project = TestProject::new();
    project.add_file(
        "a.ts",
        "interface Foo {}\nexport class X<T extends Foo, U> {}\n",
    );

    let mut diagnostics = Diagnostics::new();
    let x = project.resolve("X", "a.ts", false, &mut diagnostics).unwrap();
    let generics = x.generics().unwrap();

    let names: Vec<&str> = generics.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["T", "U"]);

    let bound = generics["T"].constraint.as_ref().unwrap();
    assert_eq!(bound.text, "Foo");
    assert_eq!(bound.kind, "type_identifier");
    assert!(generics["U"].constraint.is_none());
}

#[test]
fn test_member_expression_heritage_is_an_error() {
    let project = TestProject::new();
    project.add_file(
        "a.ts",
        "import * as ns from './b';\n\nclass A extends ns.B {}\n",
    );

    match project.chain("A", "a.ts").unwrap_err() {
        ResolveError::UnsupportedHeritage {
            name,
            expression,
            path,
            line,
            column,
            ..
        } => {
            assert_eq!(name, "A");
            assert_eq!(expression, "ns.B");
            assert_eq!(path, project.file("a.ts"));
            assert_eq!(line, 3);
            assert_eq!(column, 17);
        }
        other => panic!("expected UnsupportedHeritage, got {other:?}"),
    }
}

#[test]
fn test_second_wildcard_target_provides_symbol() {
    let project = TestProject::new();
    project.add_file("a.ts", "export * from './b';\nexport * from './c';\n");
    project.add_file("b.ts", "export class Other {}\n");
    project.add_file("c.ts", "export class X {}\n");

    let mut diagnostics = Diagnostics::new();
    let x = project.resolve("X", "a.ts", false, &mut diagnostics).unwrap();

    assert_eq!(x.name(), "X");
    assert_eq!(x.file_name(), project.file("c.ts"));
    // The miss in b.ts is recorded, not raised
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_cross_file_superclass_cycle() {
    let project = TestProject::new();
    project.add_file(
        "a.ts",
        "import { B } from './b';\nexport class A extends B {}\n",
    );
    project.add_file(
        "b.ts",
        "import { A } from './a';\nexport class B extends A {}\n",
    );

    match project.chain("A", "a.ts").unwrap_err() {
        ResolveError::CyclicHierarchy { name, chain, .. } => {
            assert_eq!(name, "A");
            assert_eq!(chain, vec!["A", "B", "A"]);
        }
        other => panic!("expected CyclicHierarchy, got {other:?}"),
    }
}
