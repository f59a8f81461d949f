//! In-process factory over a registry's dispatch plan.
//!
//! Behaves like the generated `create_instance_*` pair: two-stage dispatch,
//! first match wins, and every failure (unknown name, unmatched overload, bad
//! cell, faulting or panicking constructor) collapses to `None`.

use crate::cell::{NamedBundle, ParamCell};
use crate::error::{Result, RuntimeError};
use crate::value::{Instance, Value};
use classforge_registry::{
    DispatchOutcome, OverloadEntry, Parameter, Registry, TypeDispatch,
};
use indexmap::IndexMap;
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

/// Stands in for a constructor body that can fail
pub type ConstructorHook = Box<dyn Fn(&Instance) -> std::result::Result<(), String> + Send + Sync>;

pub struct Factory<'r> {
    registry: &'r Registry,
    hooks: IndexMap<String, ConstructorHook>,
}

impl<'r> Factory<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            hooks: IndexMap::new(),
        }
    }

    /// Run `hook` after every construction of `concrete`
    pub fn with_hook<F>(mut self, concrete: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&Instance) -> std::result::Result<(), String> + Send + Sync + 'static,
    {
        self.hooks.insert(concrete.into(), Box::new(hook));
        self
    }

    pub fn registry(&self) -> &Registry {
        self.registry
    }

    /// Positional convention: canonical name, exact arity, no defaults
    pub fn create_positional(
        &self,
        base: &str,
        class_name: &str,
        type_args: &[&str],
        args: Vec<Value>,
    ) -> Option<Instance> {
        absent_on_error(self.try_create_positional(base, class_name, type_args, args))
    }

    /// Named convention: resolved name, size range, required names present,
    /// missing defaulted parameters filled from their literal
    pub fn create_named(
        &self,
        base: &str,
        class_name: &str,
        type_args: &[&str],
        bundle: &NamedBundle,
    ) -> Option<Instance> {
        absent_on_error(self.try_create_named(base, class_name, type_args, bundle))
    }

    pub fn try_create_positional(
        &self,
        base: &str,
        class_name: &str,
        type_args: &[&str],
        args: Vec<Value>,
    ) -> Result<Instance> {
        let outcome = self
            .registry
            .plan()
            .dispatch_positional(base, class_name, args.len());
        let (ty, overload) = matched(outcome, base, class_name)?;

        let values = overload
            .params
            .iter()
            .zip(args)
            .map(|(param, value)| {
                let value = cast(param, &ParamCell::passthrough(value))?;
                Ok((param.name.clone(), value))
            })
            .collect::<Result<IndexMap<_, _>>>()?;

        self.construct(base, ty, overload, type_args, values)
    }

    pub fn try_create_named(
        &self,
        base: &str,
        class_name: &str,
        type_args: &[&str],
        bundle: &NamedBundle,
    ) -> Result<Instance> {
        let keys: Vec<&str> = bundle.keys().collect();
        let outcome = self.registry.plan().dispatch_named(base, class_name, &keys);
        let (ty, overload) = matched(outcome, base, class_name)?;

        let values = overload
            .params
            .iter()
            .map(|param| {
                let value = match (bundle.get(&param.name), &param.default) {
                    (Some(cell), _) => cast(param, cell)?,
                    (None, Some(default)) => Value::from_default(default, param.ty.primitive_kind()),
                    // Dispatch only admits bundles carrying every required name
                    (None, None) => {
                        return Err(RuntimeError::NoMatchingConstructor {
                            base: base.to_string(),
                            name: class_name.to_string(),
                        });
                    }
                };
                Ok((param.name.clone(), value))
            })
            .collect::<Result<IndexMap<_, _>>>()?;

        self.construct(base, ty, overload, type_args, values)
    }

    /// Identify a live instance through its base handle
    pub fn type_name<'a>(&'a self, instance: &Instance) -> &'a str {
        self.registry
            .get_type_name(&instance.base, &instance.concrete)
    }

    fn construct(
        &self,
        base: &str,
        ty: &TypeDispatch,
        overload: &OverloadEntry,
        type_args: &[&str],
        fields: IndexMap<String, Value>,
    ) -> Result<Instance> {
        let type_args = self.check_type_args(base, ty, type_args)?;
        let instantiation = ty
            .instantiation(&type_args)
            .ok_or_else(|| RuntimeError::TypeArgumentMismatch {
                base: base.to_string(),
                concrete: ty.concrete.clone(),
                args: type_args.join(", "),
            })?;

        let instance = Instance {
            concrete: ty.concrete.clone(),
            base: base.to_string(),
            instantiation,
            type_args,
            constructor: overload.index,
            fields,
        };

        if let Some(hook) = self.hooks.get(&ty.concrete) {
            match panic::catch_unwind(AssertUnwindSafe(|| hook(&instance))) {
                Ok(Ok(())) => {}
                Ok(Err(message)) => {
                    return Err(RuntimeError::ConstructorFault {
                        concrete: ty.concrete.clone(),
                        message,
                    });
                }
                Err(_) => {
                    return Err(RuntimeError::ConstructorPanic {
                        concrete: ty.concrete.clone(),
                    });
                }
            }
        }

        debug!(instance = %instance, "constructed");
        Ok(instance)
    }

    /// The caller supplies exactly the base's type arguments, and the type
    /// must derive from the base instantiated with them
    fn check_type_args(&self, base: &str, ty: &TypeDispatch, type_args: &[&str]) -> Result<Vec<String>> {
        let expected = self
            .registry
            .plan()
            .base(base)
            .map(|b| b.generic_params.len())
            .unwrap_or_default();
        if type_args.len() != expected {
            return Err(RuntimeError::TypeArgumentArity {
                base: base.to_string(),
                expected,
                found: type_args.len(),
            });
        }

        let type_args: Vec<String> = type_args.iter().map(|arg| arg.to_string()).collect();
        if !ty.accepts_type_args(&type_args) {
            return Err(RuntimeError::TypeArgumentMismatch {
                base: base.to_string(),
                concrete: ty.concrete.clone(),
                args: type_args.join(", "),
            });
        }
        Ok(type_args)
    }
}

fn matched<'p>(
    outcome: DispatchOutcome<'p>,
    base: &str,
    class_name: &str,
) -> Result<(&'p TypeDispatch, &'p OverloadEntry)> {
    match outcome {
        DispatchOutcome::Matched { ty, overload } => Ok((ty, overload)),
        DispatchOutcome::UnknownType => Err(RuntimeError::UnknownType {
            base: base.to_string(),
            name: class_name.to_string(),
        }),
        DispatchOutcome::NoMatchingConstructor => Err(RuntimeError::NoMatchingConstructor {
            base: base.to_string(),
            name: class_name.to_string(),
        }),
    }
}

fn cast(param: &Parameter, cell: &ParamCell) -> Result<Value> {
    cell.cast(&param.ty).map_err(|source| RuntimeError::Cast {
        parameter: param.name.clone(),
        source,
    })
}

fn absent_on_error(result: Result<Instance>) -> Option<Instance> {
    match result {
        Ok(instance) => Some(instance),
        Err(error) => {
            debug!(%error, "construction yielded no instance");
            None
        }
    }
}
