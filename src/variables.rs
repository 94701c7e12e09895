use crate::error::Error;
use crate::lexer::is_variable;
use hashbrown::HashMap;

lazy_static! {
    /// Built-in constants. They can be used in any expression and can not be
    /// rebound.
    pub static ref CONSTANTS: HashMap<String, f64> = {
        let mut map = HashMap::<String, f64>::new();
        map.insert("pi".into(), std::f64::consts::PI);
        map.insert("e".into(), std::f64::consts::E);
        map.shrink_to_fit();
        map
    };
}

/// Values of the variables of an expression.
///
/// Lookups see the built-in [`CONSTANTS`](struct.CONSTANTS.html) first, then
/// the bindings given by the caller or by a resolver. Names are never
/// removed, and constants can not be shadowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    bindings: HashMap<String, f64>,
}

impl Variables {
    /// Create a table holding only the built-in constants
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any previous binding of `name`.
    ///
    /// Fails with `ConfigurationError` if `name` is a constant or is not a
    /// valid variable name.
    pub fn bind<S: Into<String>>(&mut self, name: S, value: f64) -> Result<(), Error> {
        let name = name.into();
        if CONSTANTS.contains_key(&name) {
            return Err(Error::ConfigurationError(format!(
                "can not rebind constant '{}'",
                name
            )));
        }
        if !is_variable(&name) {
            return Err(Error::ConfigurationError(format!(
                "'{}' is not a valid variable name",
                name
            )));
        }
        self.bindings.insert(name, value);
        Ok(())
    }

    /// Get the value of `name`, if it is a constant or is bound
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        CONSTANTS
            .get(name)
            .or_else(|| self.bindings.get(name))
            .copied()
    }

    /// Check whether `name` has a value
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over the bound names and their values, constants excluded
    pub fn bindings(&self) -> impl Iterator<Item = (&str, f64)> {
        self.bindings.iter().map(|(name, &value)| (name.as_str(), value))
    }
}
