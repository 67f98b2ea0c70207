//! Name-keyed modifier factories.
//!
//! [`ModifierRegistry`] maps a modifier name (`"padding"`, `"glassmorphism"`)
//! to a factory that builds a [`Modifier`] from loosely typed [`ModifierArgs`].
//! The registry is a cheap shared handle: clones see the same map. Plugins
//! register their factories through [`ModifierRegistry::install`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::css::{Angle, Length};

use super::Modifier;

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// A single factory argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Arg {
    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Arg::Number(_) => "number",
            Arg::Text(_) => "text",
            Arg::Bool(_) => "bool",
        }
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Number(value)
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Arg::Number(f64::from(value))
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Text(value.to_owned())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Text(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

/// Error produced by a factory when its arguments do not fit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FactoryError {
    #[error("missing argument {index}: expected {expected}")]
    MissingArgument { index: usize, expected: &'static str },

    #[error("argument {index}: expected {expected}, found {found}")]
    InvalidArgument {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("expected {expected}, found {found}")]
    Arity { expected: &'static str, found: usize },
}

/// Positional factory arguments with typed accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifierArgs(Vec<Arg>);

impl ModifierArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an argument (builder).
    pub fn arg(mut self, arg: impl Into<Arg>) -> Self {
        self.0.push(arg.into());
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arg> {
        self.0.get(index)
    }

    fn required(&self, index: usize, expected: &'static str) -> Result<&Arg, FactoryError> {
        self.get(index)
            .ok_or(FactoryError::MissingArgument { index, expected })
    }

    fn mismatch(index: usize, expected: &'static str, found: &Arg) -> FactoryError {
        FactoryError::InvalidArgument {
            index,
            expected,
            found: found.type_name(),
        }
    }

    pub fn number(&self, index: usize) -> Result<f64, FactoryError> {
        match self.required(index, "number")? {
            Arg::Number(n) => Ok(*n),
            other => Err(Self::mismatch(index, "number", other)),
        }
    }

    pub fn text(&self, index: usize) -> Result<&str, FactoryError> {
        match self.required(index, "text")? {
            Arg::Text(s) => Ok(s),
            other => Err(Self::mismatch(index, "text", other)),
        }
    }

    pub fn bool(&self, index: usize) -> Result<bool, FactoryError> {
        match self.required(index, "bool")? {
            Arg::Bool(b) => Ok(*b),
            other => Err(Self::mismatch(index, "bool", other)),
        }
    }

    /// A length: numbers are pixels, text is parsed (`"50%"`, `"auto"`).
    pub fn length(&self, index: usize) -> Result<Length, FactoryError> {
        match self.required(index, "length")? {
            Arg::Number(n) => Ok(Length::px(*n)),
            arg @ Arg::Text(s) => Length::parse(s).ok_or_else(|| Self::mismatch(index, "length", arg)),
            other => Err(Self::mismatch(index, "length", other)),
        }
    }

    /// An angle: numbers are degrees, text is parsed (`"0.5turn"`).
    pub fn angle(&self, index: usize) -> Result<Angle, FactoryError> {
        match self.required(index, "angle")? {
            Arg::Number(n) => Ok(Angle::Deg(*n)),
            Arg::Text(s) => Ok(Angle::parse(s)),
            other => Err(Self::mismatch(index, "angle", other)),
        }
    }

    pub fn opt_number(&self, index: usize) -> Result<Option<f64>, FactoryError> {
        self.optional(index, Self::number)
    }

    pub fn opt_text(&self, index: usize) -> Result<Option<&str>, FactoryError> {
        match self.get(index) {
            None => Ok(None),
            Some(_) => self.text(index).map(Some),
        }
    }

    pub fn opt_bool(&self, index: usize) -> Result<Option<bool>, FactoryError> {
        self.optional(index, Self::bool)
    }

    pub fn opt_length(&self, index: usize) -> Result<Option<Length>, FactoryError> {
        self.optional(index, Self::length)
    }

    fn optional<T>(
        &self,
        index: usize,
        read: impl Fn(&Self, usize) -> Result<T, FactoryError>,
    ) -> Result<Option<T>, FactoryError> {
        match self.get(index) {
            None => Ok(None),
            Some(_) => read(self, index).map(Some),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arg> {
        self.0.iter()
    }
}

impl From<Vec<Arg>> for ModifierArgs {
    fn from(args: Vec<Arg>) -> Self {
        Self(args)
    }
}

impl From<()> for ModifierArgs {
    fn from(_: ()) -> Self {
        Self::new()
    }
}

/// Build [`ModifierArgs`] from a list of values convertible to [`Arg`].
///
/// ```
/// use mantle::modifier_args;
/// let args = modifier_args![8, "50%", true];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! modifier_args {
    ($($arg:expr),* $(,)?) => {
        $crate::modifier::ModifierArgs::from(
            ::std::vec![$($crate::modifier::Arg::from($arg)),*] as ::std::vec::Vec<$crate::modifier::Arg>
        )
    };
}

// ---------------------------------------------------------------------------
// Plugins
// ---------------------------------------------------------------------------

/// A bundle of modifier factories installed as a unit.
pub trait ModifierPlugin {
    /// Plugin name, used in logs.
    fn name(&self) -> &str;

    /// The package users install to get this plugin.
    fn package(&self) -> &str {
        self.name()
    }

    /// Register this plugin's factories.
    fn install(&self, registry: &ModifierRegistry);
}

// ---------------------------------------------------------------------------
// ModifierRegistry
// ---------------------------------------------------------------------------

/// Builds a modifier from positional arguments.
pub type ModifierFactory = Rc<dyn Fn(&ModifierArgs) -> Result<Modifier, FactoryError>>;

#[derive(Default)]
struct RegistryState {
    factories: IndexMap<String, ModifierFactory>,
    sealed: bool,
}

thread_local! {
    static GLOBAL: ModifierRegistry = ModifierRegistry::with_builtins();
}

/// Shared, insertion-ordered `name -> factory` map.
#[derive(Clone, Default)]
pub struct ModifierRegistry {
    inner: Rc<RefCell<RegistryState>>,
}

impl ModifierRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in modifier.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        super::kinds::register_builtins(&registry);
        registry
    }

    /// The thread's default registry, pre-filled with the built-ins.
    pub fn global() -> Self {
        GLOBAL.with(ModifierRegistry::clone)
    }

    /// Register `factory` under `name`. An existing factory is replaced and
    /// keeps its position in [`list`](Self::list).
    pub fn register(
        &self,
        name: &str,
        factory: impl Fn(&ModifierArgs) -> Result<Modifier, FactoryError> + 'static,
    ) {
        self.register_factory(name, Rc::new(factory));
    }

    pub fn register_factory(&self, name: &str, factory: ModifierFactory) {
        let mut state = self.inner.borrow_mut();
        if state.sealed {
            warn!(name, "registering a modifier on a sealed registry");
        }
        if state.factories.insert(name.to_owned(), factory).is_some() {
            debug!(name, "modifier factory replaced");
        }
    }

    pub fn get(&self, name: &str) -> Option<ModifierFactory> {
        self.inner.borrow().factories.get(name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.inner.borrow().factories.contains_key(name)
    }

    /// Registered names in first-registration order.
    pub fn list(&self) -> Vec<String> {
        self.inner.borrow().factories.keys().cloned().collect()
    }

    /// Remove every factory and reopen registration.
    pub fn clear(&self) {
        let mut state = self.inner.borrow_mut();
        state.factories.clear();
        state.sealed = false;
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().factories.is_empty()
    }

    /// Build the modifier registered as `name`. `None` if nothing is
    /// registered under that name.
    pub fn resolve(&self, name: &str, args: &ModifierArgs) -> Option<Result<Modifier, FactoryError>> {
        // Release the borrow before calling: factories may use the registry.
        let factory = self.get(name)?;
        Some(factory(args))
    }

    /// End the registration phase. Lookups of missing names fail fast from
    /// now on instead of deferring to apply time.
    pub fn seal(&self) {
        self.inner.borrow_mut().sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.inner.borrow().sealed
    }

    /// Let `plugin` register its factories.
    pub fn install(&self, plugin: &dyn ModifierPlugin) {
        let before = self.len();
        plugin.install(self);
        debug!(
            plugin = plugin.name(),
            package = plugin.package(),
            added = self.len().saturating_sub(before),
            "modifier plugin installed"
        );
    }

    /// Whether two handles share the same map.
    pub fn ptr_eq(a: &ModifierRegistry, b: &ModifierRegistry) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for ModifierRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("ModifierRegistry")
            .field("names", &state.factories.keys().collect::<Vec<_>>())
            .field("sealed", &state.sealed)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
