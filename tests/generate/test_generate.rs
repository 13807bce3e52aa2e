//! Whole-package descriptor generation

use crate::common::TestProject;
use std::fs;
use tscomp::{FileAstCache, GenerateError, Generator, Settings};

fn sample_package() -> TestProject {
    let project = TestProject::new();
    project.add_file(
        "package.json",
        r#"{ "name": "@demo/widgets", "version": "0.3.0", "types": "index.d.ts" }"#,
    );
    project.add_file(".componentsignore", r#"["Internal"]"#);
    project.add_file(
        "index.ts",
        r#"
export * from './lib/Button';
export * from './lib/Internal';
export { Broken } from './lib/Broken';
"#,
    );
    project.add_file(
        "lib/Button.ts",
        r#"
import { Widget } from './Widget';

/**
 * A clickable widget.
 */
export class Button<L extends string = string> extends Widget {}
"#,
    );
    project.add_file("lib/Widget.ts", "export abstract class Widget {}\n");
    project.add_file("lib/Internal.ts", "export class Internal {}\n");
    project.add_file(
        "lib/Broken.ts",
        "import * as ns from './Widget';\nexport class Broken extends ns.Widget {}\n",
    );
    project
}

fn settings_for(project: &TestProject) -> Settings {
    let mut settings = Settings::default();
    settings.package_dir = project.path().to_path_buf();
    settings.generate.parallel_threads = 2;
    settings
}

#[test]
fn test_generate_writes_descriptors_and_reports_failures() {
    let project = sample_package();
    let settings = settings_for(&project);
    let cache = FileAstCache::new();

    let report = Generator::new(&settings, &cache).run().unwrap();

    assert_eq!(report.package, "@demo/widgets");
    assert_eq!(report.entry, project.file("index.ts"));
    assert_eq!(report.ignored, vec!["Internal"]);

    let written: Vec<&str> = report.written.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(written, vec!["Button"]);

    // One bad class does not stop the others
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "Broken");
    assert_eq!(report.failed[0].1.status_code(), "UNSUPPORTED_HERITAGE");
    assert!(!report.is_success());

    let descriptor_path = project.file("components/Button.jsonld");
    let descriptor: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(descriptor_path).unwrap()).unwrap();
    assert_eq!(
        descriptor,
        serde_json::json!({
            "@id": "@demo/widgets:Button",
            "requireElement": "Button",
            "@type": "Class",
            "extends": ["@demo/widgets:Widget"],
            "comment": "A clickable widget.",
            "genericTypeParameters": [
                { "@id": "@demo/widgets:Button__generic_L", "range": "string", "default": "string" }
            ]
        })
    );

    assert!(!project.file("components/Internal.jsonld").exists());
    assert!(!project.file("components/Widget.jsonld").exists());
}

#[test]
fn test_generate_honors_output_settings() {
    let project = sample_package();
    let mut settings = settings_for(&project);
    settings.generate.output_dir = "dist/descriptors".into();
    settings.generate.extension = ".json".to_string();
    settings.generate.ignore_file = "missing-ignore-file".into();

    let cache = FileAstCache::new();
    let report = Generator::new(&settings, &cache).run().unwrap();

    // Without an ignore file, Internal is generated too
    assert!(report.ignored.is_empty());
    assert!(project.file("dist/descriptors/Button.json").exists());
    assert!(project.file("dist/descriptors/Internal.json").exists());
}

#[test]
fn test_generate_falls_back_to_source_index() {
    let project = TestProject::new();
    project.add_file("package.json", r#"{ "name": "plain" }"#);
    project.add_file("src/index.ts", "export class Thing {}\n");

    let mut settings = settings_for(&project);
    settings.generate.source_dir = "src".into();

    let cache = FileAstCache::new();
    let report = Generator::new(&settings, &cache).run().unwrap();
    assert_eq!(report.entry, project.file("src/index.ts"));
    assert!(project.file("components/Thing.jsonld").exists());
}

#[test]
fn test_generate_without_package_json() {
    let project = TestProject::new();
    let settings = settings_for(&project);
    let cache = FileAstCache::new();

    let err = Generator::new(&settings, &cache).run().unwrap_err();
    assert!(matches!(err, GenerateError::PackageMetadata { .. }));
}

#[test]
fn test_broken_reexports_do_not_abort_the_package() {
    let project = TestProject::new();
    project.add_file("package.json", r#"{ "name": "p" }"#);
    project.add_file(
        "index.ts",
        r#"
export class Good {}
export { Gone } from './lib/missing';
export { Anonymous } from './lib/bad';
export { Hidden } from './lib/hidden';
"#,
    );
    project.add_file("lib/bad.ts", "\nexport default class {}\n");
    project.add_file("lib/hidden.ts", "export class Hidden {}\n");
    project.add_file(".componentsignore", r#"["Hidden", "Anonymous"]"#);

    let settings = settings_for(&project);
    let cache = FileAstCache::new();
    let report = Generator::new(&settings, &cache).run().unwrap();

    let written: Vec<&str> = report.written.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(written, vec!["Good"]);
    assert!(project.file("components/Good.jsonld").exists());

    // An ignored name is skipped even when its re-export is broken
    assert_eq!(report.ignored, vec!["Hidden", "Anonymous"]);

    let failed: Vec<(&str, String)> = report
        .failed
        .iter()
        .map(|(name, e)| (name.as_str(), e.status_code()))
        .collect();
    assert_eq!(failed, vec![("Gone", "FILE_NOT_FOUND".to_string())]);
}

#[test]
fn test_malformed_reexport_target_is_reported_per_class() {
    let project = TestProject::new();
    project.add_file("package.json", r#"{ "name": "p" }"#);
    project.add_file(
        "index.ts",
        "export class Good {}\nexport { Anonymous } from './lib/bad';\n",
    );
    project.add_file("lib/bad.ts", "\nexport default class {}\n");

    let settings = settings_for(&project);
    let cache = FileAstCache::new();
    let report = Generator::new(&settings, &cache).run().unwrap();

    assert_eq!(report.written.len(), 1);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "Anonymous");
    assert_eq!(report.failed[0].1.status_code(), "MALFORMED_EXPORT");
}

#[test]
fn test_parent_ids_use_exported_names() {
    let project = TestProject::new();
    project.add_file("package.json", r#"{ "name": "p" }"#);
    project.add_file(
        "index.ts",
        r#"
export { BaseImpl as Base } from './lib/base';
export { MixinImpl as Mixin } from './lib/mixin';
export * from './lib/child';
"#,
    );
    project.add_file("lib/base.ts", "export abstract class BaseImpl {}\n");
    project.add_file("lib/mixin.ts", "export class MixinImpl {}\n");
    project.add_file(
        "lib/child.ts",
        r#"
import { BaseImpl } from './base';
import { MixinImpl } from './mixin';
export class Child extends BaseImpl implements MixinImpl {}
"#,
    );

    let settings = settings_for(&project);
    let cache = FileAstCache::new();
    let report = Generator::new(&settings, &cache).run().unwrap();
    assert!(report.is_success());

    let written: Vec<&str> = report.written.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(written, vec!["Base", "Mixin", "Child"]);

    let child: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(project.file("components/Child.jsonld")).unwrap(),
    )
    .unwrap();
    assert_eq!(child["extends"], serde_json::json!(["p:Base", "p:Mixin"]));

    let base: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(project.file("components/Base.jsonld")).unwrap(),
    )
    .unwrap();
    assert_eq!(base["@id"], "p:Base");
    assert_eq!(base["requireElement"], "Base");
    assert_eq!(base["@type"], "AbstractClass");
}
