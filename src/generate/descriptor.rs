//! Component descriptors

use crate::resolution::{ClassLoaded, ExportedClasses, Generics, LoadedSymbol};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComponentType {
    Class,
    AbstractClass,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenericTypeParameter {
    #[serde(rename = "@id")]
    pub id: String,
    /// Constraint type, as written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// One class as the dependency-injection runtime sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentDescriptor {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "requireElement")]
    pub require_element: String,
    #[serde(rename = "@type")]
    pub component_type: ComponentType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(
        rename = "genericTypeParameters",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub generic_type_parameters: Vec<GenericTypeParameter>,
}

impl ComponentDescriptor {
    /// Build from a class whose hierarchy links are loaded
    ///
    /// `exported_name` is the name consumers import the class under, which
    /// differs from the declared name behind an aliasing re-export.
    /// `extends` lists the superclass first, then implemented classes and
    /// interfaces in declaration order. Parents are named the way `exports`
    /// publishes them; a parent the package does not export keeps its
    /// declared name.
    pub fn from_class(
        prefix: &str,
        exported_name: &str,
        class: &ClassLoaded,
        exports: &ExportedClasses,
    ) -> Self {
        let id = component_id(prefix, exported_name);

        let mut extends = Vec::new();
        if let Some(parent) = &class.super_class {
            extends.push(parent_id(
                prefix,
                exports,
                &parent.reference.file_name,
                &parent.reference.local_name,
            ));
        }
        extends.extend(class.implements_interfaces.iter().map(|implemented| {
            parent_id(prefix, exports, implemented.file_name(), implemented.name())
        }));

        Self {
            generic_type_parameters: generic_parameters(&id, &class.generics),
            id,
            require_element: exported_name.to_string(),
            component_type: if class.is_abstract {
                ComponentType::AbstractClass
            } else {
                ComponentType::Class
            },
            extends,
            comment: class.comment.clone(),
        }
    }

    /// `None` unless the symbol is a class
    pub fn from_symbol(
        prefix: &str,
        exported_name: &str,
        symbol: &LoadedSymbol,
        exports: &ExportedClasses,
    ) -> Option<Self> {
        symbol
            .as_class()
            .map(|class| Self::from_class(prefix, exported_name, class, exports))
    }
}

pub fn component_id(prefix: &str, name: &str) -> String {
    format!("{prefix}:{name}")
}

fn parent_id(prefix: &str, exports: &ExportedClasses, file: &Path, declared: &str) -> String {
    let name = exports.exported_name(file, declared).unwrap_or(declared);
    component_id(prefix, name)
}

fn generic_parameters(component: &str, generics: &Generics) -> Vec<GenericTypeParameter> {
    generics
        .iter()
        .map(|(name, parameter)| GenericTypeParameter {
            id: format!("{component}__generic_{name}"),
            range: parameter.constraint.as_ref().map(|t| t.text.clone()),
            default: parameter.default.as_ref().map(|t| t.text.clone()),
        })
        .collect()
}
