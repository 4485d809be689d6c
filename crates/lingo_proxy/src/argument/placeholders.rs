//! Named placeholder transform.

use std::sync::Arc;

use dashmap::DashMap;
use lingo_types::Component;
use rustc_hash::FxBuildHasher;

use crate::key::{KeyNaming, WordSplit};
use crate::{ArgumentTransform, MethodId, ParamDesc};

/// Wraps each rendered argument in a named placeholder.
///
/// The name is the parameter's declared display name, or its identifier in
/// snake_case (`userName` → `user_name`). Names are computed once per
/// parameter.
pub struct NamedPlaceholders {
    naming: KeyNaming,
    names: DashMap<(MethodId, usize), Arc<str>, FxBuildHasher>,
}

impl NamedPlaceholders {
    pub fn new() -> Self {
        NamedPlaceholders {
            naming: KeyNaming {
                prefix: String::new(),
                delimiter: '_',
                split: WordSplit::Camel,
            },
            names: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Placeholder name for `param`.
    pub fn name_of(&self, param: &ParamDesc) -> Arc<str> {
        let key = (param.method().clone(), param.index());
        if let Some(name) = self.names.get(&key).map(|hit| Arc::clone(hit.value())) {
            return name;
        }
        let name: Arc<str> = match param.display_name() {
            Some(display) => Arc::from(display),
            None => Arc::from(self.naming.format(param.name())),
        };
        Arc::clone(self.names.entry(key).or_insert(name).value())
    }
}

impl Default for NamedPlaceholders {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgumentTransform for NamedPlaceholders {
    fn transform(&self, param: &ParamDesc, rendered: Component) -> Component {
        Component::placeholder(self.name_of(param), rendered)
    }
}
