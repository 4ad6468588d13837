//! Run-time construction of generated types.
//!
//! Generated code registers an explicit constructor table per type through
//! [`Generated::constructors`]; nothing is discovered reflectively. Every
//! lookup or construction failure yields `None`, logs the cause and keeps it
//! for [`Registry::last_failure`].

use crate::Generated;
use std::{
    any::{Any, TypeId, type_name},
    collections::{HashMap, VecDeque},
    fmt,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{LazyLock, Mutex, PoisonError, RwLock},
};
use thiserror::Error as ThisError;

///
/// FactoryError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FactoryError {
    #[error("no generated type registered for blueprint '{0}'")]
    UnknownBlueprint(String),

    #[error("no constructor of '{blueprint}' takes {arguments} argument(s) of the given types")]
    NoMatchingConstructor { blueprint: String, arguments: usize },

    #[error("missing argument of type {expected}")]
    MissingArgument { expected: &'static str },

    #[error("argument is not of type {expected}")]
    ArgumentMismatch { expected: &'static str },

    #[error("constructor of '{blueprint}' panicked: {message}")]
    Panicked { blueprint: String, message: String },

    #[error("'{blueprint}' did not construct a {expected}")]
    WrongInstance {
        blueprint: String,
        expected: &'static str,
    },
}

///
/// Args
///
/// Positional, type-erased constructor arguments.
///

#[derive(Default)]
pub struct Args {
    values: VecDeque<Box<dyn Any>>,
}

impl Args {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<T: Any>(&mut self, value: T) {
        self.values.push_back(Box::new(value));
    }

    #[must_use]
    pub fn with<T: Any>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Runtime types of the remaining arguments, in order.
    #[must_use]
    pub fn type_ids(&self) -> Vec<TypeId> {
        self.values.iter().map(|v| v.as_ref().type_id()).collect()
    }

    /// Take the next argument as a `T`.
    pub fn take<T: Any>(&mut self) -> Result<T, FactoryError> {
        let expected = type_name::<T>();
        let value = self
            .values
            .pop_front()
            .ok_or(FactoryError::MissingArgument { expected })?;

        value
            .downcast::<T>()
            .map(|v| *v)
            .map_err(|_| FactoryError::ArgumentMismatch { expected })
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args").field("len", &self.len()).finish()
    }
}

///
/// Param
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Param {
    pub id: TypeId,
    pub name: &'static str,
}

impl Param {
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }
}

/// Type-erased constructor body emitted by the generator.
pub type BuildFn = fn(&mut Args) -> Result<Box<dyn Any>, FactoryError>;

///
/// Constructor
///

#[derive(Clone)]
pub struct Constructor {
    params: Vec<Param>,
    build: BuildFn,
}

impl Constructor {
    #[must_use]
    pub fn new(params: Vec<Param>, build: BuildFn) -> Self {
        Self { params, build }
    }

    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// True when `ids` are exactly this constructor's parameter types.
    #[must_use]
    pub fn accepts(&self, ids: &[TypeId]) -> bool {
        self.params.len() == ids.len() && self.params.iter().zip(ids).all(|(p, id)| p.id == *id)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.params.iter().map(|p| p.name).collect();

        write!(f, "Constructor({})", names.join(", "))
    }
}

///
/// Entry
///

#[derive(Clone, Debug)]
struct Entry {
    blueprint: &'static str,
    name: &'static str,
    constructors: Vec<Constructor>,
}

///
/// Registry
///
/// Generated types keyed by blueprint, both by `TypeId` and by qualified path.
///

#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<Entry>,
    by_type: HashMap<TypeId, usize>,
    by_path: HashMap<&'static str, usize>,
    last_failure: Mutex<Option<FactoryError>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `G`, replacing any earlier registration for its blueprint.
    pub fn register<G: Generated>(&mut self) {
        let entry = Entry {
            blueprint: G::BLUEPRINT,
            name: G::NAME,
            constructors: G::constructors(),
        };
        let blueprint_id = TypeId::of::<G::Blueprint>();

        let index = match self.by_type.get(&blueprint_id) {
            Some(&index) => {
                self.by_path.remove(self.entries[index].blueprint);
                self.entries[index] = entry;
                index
            }
            None => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        };
        self.by_type.insert(blueprint_id, index);
        self.by_path.insert(G::BLUEPRINT, index);

        tracing::debug!(blueprint = G::BLUEPRINT, generated = G::NAME, "registered");
    }

    #[must_use]
    pub fn contains<B: Any>(&self) -> bool {
        self.by_type.contains_key(&TypeId::of::<B>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Generated type name registered for a blueprint path.
    #[must_use]
    pub fn generated_name(&self, blueprint: &str) -> Option<&'static str> {
        self.by_path.get(blueprint).map(|&i| self.entries[i].name)
    }

    /// Construct the generated type for blueprint `B`.
    pub fn build<B: Any>(&self, args: Args) -> Option<Box<dyn Any>> {
        let entry = self
            .by_type
            .get(&TypeId::of::<B>())
            .map(|&i| &self.entries[i])
            .ok_or_else(|| FactoryError::UnknownBlueprint(type_name::<B>().to_string()));

        self.settle(entry.and_then(|entry| construct(entry, args)))
    }

    /// Construct the generated type for a blueprint given by qualified path.
    pub fn build_named(&self, blueprint: &str, args: Args) -> Option<Box<dyn Any>> {
        let entry = self
            .by_path
            .get(blueprint)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| FactoryError::UnknownBlueprint(blueprint.to_string()));

        self.settle(entry.and_then(|entry| construct(entry, args)))
    }

    /// Construct and downcast to the concrete generated type `G`.
    pub fn build_as<G: Generated>(&self, args: Args) -> Option<G> {
        let instance = self.build::<G::Blueprint>(args)?;

        let typed = instance
            .downcast::<G>()
            .map(|g| *g)
            .map_err(|_| FactoryError::WrongInstance {
                blueprint: G::BLUEPRINT.to_string(),
                expected: type_name::<G>(),
            });

        self.settle(typed)
    }

    /// Cause of the most recent failed construction.
    #[must_use]
    pub fn last_failure(&self) -> Option<FactoryError> {
        self.last_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn settle<T>(&self, result: Result<T, FactoryError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, "autoimpl factory failed");
                *self
                    .last_failure
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner) = Some(e);
                None
            }
        }
    }
}

// Pick the constructor matching the argument types and run it. An empty
// argument list selects the nullary constructor.
fn construct(entry: &Entry, mut args: Args) -> Result<Box<dyn Any>, FactoryError> {
    let ids = args.type_ids();
    let ctor = entry
        .constructors
        .iter()
        .find(|c| c.accepts(&ids))
        .ok_or_else(|| FactoryError::NoMatchingConstructor {
            blueprint: entry.blueprint.to_string(),
            arguments: ids.len(),
        })?;

    catch_unwind(AssertUnwindSafe(|| (ctor.build)(&mut args))).map_err(|payload| {
        FactoryError::Panicked {
            blueprint: entry.blueprint.to_string(),
            message: panic_message(payload.as_ref()),
        }
    })?
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}

//
// Process-wide registry
//

static REGISTRY: LazyLock<RwLock<Registry>> = LazyLock::new(|| RwLock::new(Registry::new()));

/// Register `G` with the process-wide registry.
pub fn register<G: Generated>() {
    REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register::<G>();
}

/// Run `f` against the process-wide registry.
pub fn with_registry<R>(f: impl FnOnce(&Registry) -> R) -> R {
    f(&REGISTRY.read().unwrap_or_else(PoisonError::into_inner))
}

/// [`Registry::build`] on the process-wide registry.
pub fn build<B: Any>(args: Args) -> Option<Box<dyn Any>> {
    with_registry(|r| r.build::<B>(args))
}

/// [`Registry::build_named`] on the process-wide registry.
pub fn build_named(blueprint: &str, args: Args) -> Option<Box<dyn Any>> {
    with_registry(|r| r.build_named(blueprint, args))
}

/// [`Registry::build_as`] on the process-wide registry.
pub fn build_as<G: Generated>(args: Args) -> Option<G> {
    with_registry(|r| r.build_as::<G>(args))
}

/// [`Registry::last_failure`] on the process-wide registry.
#[must_use]
pub fn last_failure() -> Option<FactoryError> {
    with_registry(Registry::last_failure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    struct Greeter {
        greeting: String,
    }

    impl Greeter {
        fn new() -> Self {
            Self::with_greeting("hello".to_string())
        }

        fn with_greeting(greeting: String) -> Self {
            Self { greeting }
        }

        fn exploding(_: u8) -> Self {
            panic!("boom")
        }
    }

    #[allow(non_camel_case_types)]
    struct Greeter_Impl {
        base: Greeter,
    }

    impl Generated for Greeter_Impl {
        type Blueprint = Greeter;
        const BLUEPRINT: &'static str = "crate::greet::Greeter";
        const NAME: &'static str = "crate::greet::Greeter_Impl";

        fn constructors() -> Vec<Constructor> {
            vec![
                Constructor::new(vec![], |_| {
                    let instance: Box<dyn Any> = Box::new(Self {
                        base: Greeter::new(),
                    });
                    Ok(instance)
                }),
                Constructor::new(vec![Param::of::<String>()], |args| {
                    let a0 = args.take::<String>()?;
                    let instance: Box<dyn Any> = Box::new(Self {
                        base: Greeter::with_greeting(a0),
                    });
                    Ok(instance)
                }),
                Constructor::new(vec![Param::of::<u8>()], |args| {
                    let a0 = args.take::<u8>()?;
                    let instance: Box<dyn Any> = Box::new(Self {
                        base: Greeter::exploding(a0),
                    });
                    Ok(instance)
                }),
            ]
        }
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.register::<Greeter_Impl>();
        registry
    }

    #[test]
    fn empty_args_select_nullary_constructor() {
        let greeter = registry()
            .build_as::<Greeter_Impl>(Args::new())
            .expect("nullary constructor");

        assert_eq!(greeter.base.greeting, Greeter::new().greeting);
    }

    #[test]
    fn arguments_select_constructor_by_type() {
        let registry = registry();
        let instance = registry
            .build::<Greeter>(args!["hi".to_string()])
            .expect("string constructor");

        let greeter = instance.downcast::<Greeter_Impl>().expect("generated type");
        assert_eq!(greeter.base.greeting, "hi");
        assert!(registry.last_failure().is_none());
    }

    #[test]
    fn lookup_by_path_matches_lookup_by_type() {
        let registry = registry();

        assert!(registry.contains::<Greeter>());
        assert_eq!(
            registry.generated_name("crate::greet::Greeter"),
            Some("crate::greet::Greeter_Impl")
        );
        assert!(
            registry
                .build_named("crate::greet::Greeter", Args::new())
                .is_some()
        );
    }

    #[test]
    fn unknown_blueprint_yields_none() {
        let registry = registry();

        assert!(registry.build::<String>(Args::new()).is_none());
        assert!(matches!(
            registry.last_failure(),
            Some(FactoryError::UnknownBlueprint(_))
        ));

        assert!(registry.build_named("crate::nope::Nope", Args::new()).is_none());
        assert_eq!(
            registry.last_failure(),
            Some(FactoryError::UnknownBlueprint("crate::nope::Nope".to_string()))
        );
    }

    #[test]
    fn mismatched_arguments_yield_none() {
        let registry = registry();

        assert!(registry.build::<Greeter>(args![1_u32]).is_none());
        assert_eq!(
            registry.last_failure(),
            Some(FactoryError::NoMatchingConstructor {
                blueprint: "crate::greet::Greeter".to_string(),
                arguments: 1,
            })
        );
    }

    #[test]
    fn panicking_constructor_yields_none() {
        let registry = registry();

        assert!(registry.build::<Greeter>(args![7_u8]).is_none());
        assert!(matches!(
            registry.last_failure(),
            Some(FactoryError::Panicked { message, .. }) if message == "boom"
        ));
    }

    #[test]
    fn take_reports_missing_and_mismatched_arguments() {
        let mut args = args![1_u8];

        assert_eq!(
            args.take::<String>(),
            Err(FactoryError::ArgumentMismatch {
                expected: type_name::<String>()
            })
        );
        assert!(matches!(
            args.take::<u8>(),
            Err(FactoryError::MissingArgument { .. })
        ));
    }

    #[test]
    fn reregistering_replaces_entry() {
        let mut registry = registry();
        registry.register::<Greeter_Impl>();

        assert_eq!(registry.len(), 1);
    }
}
