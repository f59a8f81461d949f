//! Model extraction
//!
//! Turns parsed headers into a [`ClassModel`] for a list of requested base
//! names. Discovery order is input file order, then declaration order.

use crate::config::GeneratorConfig;
use crate::error::{RegistryError, RegistryResult};
use crate::model::{
    BaseType, ClassModel, ConcreteType, Constructor, GenericParam, Parameter, TypeDescriptor,
};
use classforge_parser::ast::{Access, ClassDecl, ConstructorDecl, TemplateArg, TemplateParamKind};
use classforge_parser::parser::HeaderParser;
use classforge_parser::Annotation;
use indexmap::IndexMap;
use std::path::Path;
use tracing::{debug, info, warn};

pub const REGISTRY_NAME_KEY: &str = "registry_name";
pub const REGISTRY_ALIASES_KEY: &str = "registry_aliases";
pub const CATEGORY_KEY: &str = "category";

/// Annotations found above one class; later lines override earlier ones
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassAnnotations {
    pub registry_name: Option<String>,
    pub aliases: Vec<String>,
    pub category: Option<String>,
    pub metadata: IndexMap<String, String>,
}

impl ClassAnnotations {
    pub fn from_annotations(annotations: Vec<Annotation>) -> Self {
        let mut result = Self::default();
        for Annotation { key, value } in annotations {
            match key.as_str() {
                REGISTRY_NAME_KEY => result.registry_name = Some(value),
                REGISTRY_ALIASES_KEY => {
                    result.aliases = value
                        .split(',')
                        .map(str::trim)
                        .filter(|alias| !alias.is_empty())
                        .map(String::from)
                        .collect();
                }
                CATEGORY_KEY => result.category = Some(value),
                _ => {
                    debug!(key = %key, value = %value, "keeping annotation as metadata");
                    result.metadata.insert(key, value);
                }
            }
        }
        result
    }
}

pub struct ModelExtractor<'c> {
    config: &'c GeneratorConfig,
    requested: Vec<String>,
    bases: IndexMap<String, BaseType>,
    concretes: Vec<ConcreteType>,
}

impl<'c> ModelExtractor<'c> {
    pub fn new<I, S>(requested: I, config: &'c GeneratorConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            config,
            requested: requested.into_iter().map(Into::into).collect(),
            bases: IndexMap::new(),
            concretes: Vec::new(),
        }
    }

    /// Read and scan one header
    pub fn add_file(&mut self, path: &Path) -> RegistryResult<()> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| RegistryError::UnreadableInput {
                path: path.to_path_buf(),
                source,
            })?;
        self.add_source(&path.to_string_lossy(), &contents)
    }

    /// Scan one header's contents
    pub fn add_source(&mut self, path: &str, contents: &str) -> RegistryResult<()> {
        let header = HeaderParser::parse_header_with_source(contents, Some(path.to_string()))
            .map_err(|source| RegistryError::Parse {
                file: path.to_string(),
                source,
            })?;

        let mut previous_end = 0;
        let mut found = 0;
        for class in &header.classes {
            let annotations = self.annotations_for(contents, class, previous_end);
            previous_end = class.span.end_line();
            if self.visit_class(path, class, annotations)? {
                found += 1;
            }
        }

        info!(file = %path, classes = header.classes.len(), registered = found, "scanned header");
        Ok(())
    }

    /// Collect the annotation window above a class: at most
    /// `annotation_lookback` lines, never reaching into the previous class
    fn annotations_for(&self, contents: &str, class: &ClassDecl, previous_end: usize) -> ClassAnnotations {
        let line = class.span.start_line();
        if line <= 1 {
            return ClassAnnotations::default();
        }
        let last = line - 1;
        let first = line
            .saturating_sub(self.config.annotation_lookback)
            .max(previous_end + 1)
            .max(1);
        ClassAnnotations::from_annotations(HeaderParser::annotations_in_lines(contents, first, last))
    }

    /// Register a class as a base or concrete type. Returns whether it was
    /// registered.
    fn visit_class(
        &mut self,
        path: &str,
        class: &ClassDecl,
        annotations: ClassAnnotations,
    ) -> RegistryResult<bool> {
        if self.requested.contains(&class.name) && !class.is_specialization() {
            self.register_base(path, class, annotations)?;
            return Ok(true);
        }

        let Some(base) = self
            .requested
            .iter()
            .find(|base| class.derives_from(base))
            .cloned()
        else {
            return Ok(false);
        };

        if class.is_specialization() {
            debug!(class = %class.name, base = %base, "skipping template specialization");
            return Ok(false);
        }
        if class.is_abstract {
            warn!(class = %class.name, base = %base, "skipping abstract subclass");
            return Ok(false);
        }

        let extra: Vec<&String> = self
            .requested
            .iter()
            .filter(|other| **other != base && class.derives_from(other))
            .collect();
        if !extra.is_empty() {
            warn!(class = %class.name, base = %base, "derives from several requested bases; registering under the first");
        }

        match self.concrete_type(path, class, &base, annotations) {
            Some(concrete) => {
                debug!(
                    class = %concrete.name,
                    base = %base,
                    constructors = concrete.constructors.len(),
                    "found concrete type"
                );
                self.concretes.push(concrete);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn register_base(
        &mut self,
        path: &str,
        class: &ClassDecl,
        annotations: ClassAnnotations,
    ) -> RegistryResult<()> {
        if let Some(existing) = self.bases.get(&class.name) {
            return Err(RegistryError::DuplicateBase {
                name: class.name.clone(),
                first: existing.source_file.clone(),
                second: path.to_string(),
            });
        }

        let base = BaseType {
            name: class.name.clone(),
            generic_params: generic_params(class),
            category: annotations.category,
            namespace: class.namespace.clone(),
            source_file: path.to_string(),
            metadata: annotations.metadata,
        };
        debug!(
            base = %base.name,
            file = %path,
            category = %base.category(),
            generics = ?base.generic_params,
            "found base type"
        );
        self.bases.insert(base.name.clone(), base);
        Ok(())
    }

    fn concrete_type(
        &self,
        path: &str,
        class: &ClassDecl,
        base: &str,
        annotations: ClassAnnotations,
    ) -> Option<ConcreteType> {
        let base_args = class
            .bases
            .iter()
            .find(|spec| spec.ty.simple_name() == base)
            .and_then(|spec| spec.ty.path.segments.last())
            .and_then(|segment| segment.args.as_ref())
            .map(|args| args.iter().map(TemplateArg::to_string).collect())
            .unwrap_or_default();

        let declared = class.constructors.len();
        let constructors: Vec<Constructor> = class
            .constructors
            .iter()
            .filter(|ctor| is_usable(class, ctor))
            .map(constructor_from_decl)
            .collect();

        if declared > 0 && constructors.is_empty() {
            warn!(class = %class.name, "no public constructor; skipping");
            return None;
        }

        Some(ConcreteType {
            name: class.name.clone(),
            base: base.to_string(),
            base_args,
            generic_params: generic_params(class)
                .into_iter()
                .map(|param| param.name)
                .collect(),
            namespace: class.namespace.clone(),
            source_file: path.to_string(),
            registry_name: annotations.registry_name,
            aliases: annotations.aliases,
            category: annotations.category,
            constructors,
            metadata: annotations.metadata,
        })
    }

    /// Assemble the model in requested-base order
    pub fn finish(self) -> RegistryResult<ClassModel> {
        let mut model = ClassModel::new();
        let mut bases = self.bases;

        for name in &self.requested {
            let base = bases
                .shift_remove(name)
                .ok_or_else(|| RegistryError::BaseNotFound { name: name.clone() })?;
            model.add_base(base);
        }

        for concrete in self.concretes {
            if let Err(concrete) = model.add_concrete(concrete) {
                warn!(class = %concrete.name, "concrete type without a registered base");
            }
        }

        for hierarchy in model.hierarchies() {
            if hierarchy.concretes.is_empty() {
                warn!(base = %hierarchy.base.name, "base type has no concrete types");
            }
        }

        Ok(model)
    }
}

fn is_usable(class: &ClassDecl, ctor: &ConstructorDecl) -> bool {
    if ctor.is_deleted {
        debug!(class = %class.name, "skipping deleted constructor");
        return false;
    }
    if ctor.access != Access::Public {
        debug!(class = %class.name, access = %ctor.access, "skipping non-public constructor");
        return false;
    }
    true
}

fn constructor_from_decl(ctor: &ConstructorDecl) -> Constructor {
    let params = ctor
        .params
        .iter()
        .enumerate()
        .map(|(i, param)| Parameter {
            ty: TypeDescriptor::new(param.ty.to_string()),
            name: param
                .name
                .clone()
                .unwrap_or_else(|| format!("unnamed{}", i)),
            default: param.default.clone(),
        })
        .collect();
    Constructor::new(params)
}

/// Template parameters; unnamed ones become `T<i>` (type) or `N<i>`
fn generic_params(class: &ClassDecl) -> Vec<GenericParam> {
    class
        .template_params
        .iter()
        .flatten()
        .enumerate()
        .map(|(i, param)| match &param.kind {
            TemplateParamKind::Type => GenericParam::type_param(
                param.name.clone().unwrap_or_else(|| format!("T{}", i)),
            ),
            TemplateParamKind::NonType(ty) => GenericParam::value_param(
                param.name.clone().unwrap_or_else(|| format!("N{}", i)),
                ty.to_string().as_str(),
            ),
        })
        .collect()
}

/// Parse every input in order and assemble the model
pub fn extract_model<P: AsRef<Path>>(
    bases: &[String],
    inputs: &[P],
    config: &GeneratorConfig,
) -> RegistryResult<ClassModel> {
    let mut extractor = ModelExtractor::new(bases.iter().cloned(), config);
    for input in inputs {
        extractor.add_file(input.as_ref())?;
    }
    extractor.finish()
}
