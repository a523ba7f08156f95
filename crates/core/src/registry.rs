//! Registered modules and the root pointer.

use std::fmt;
use std::rc::Rc;

use itertools::Itertools;
use log::{debug, info};

use crate::error::Result;
use crate::io::{MenuScope, OutputMultiplexer};
use crate::session::Session;

/// A menu entry that runs some functionality.
///
/// Modules sharing a [`context`](Module::context) are listed together;
/// the empty context is the top-level list.
pub trait Module {
    fn name(&self) -> &str;

    fn context(&self) -> &str {
        ""
    }

    /// Position within the context list, before sorting by name.
    fn context_order(&self) -> i32 {
        0
    }

    /// Hidden modules are left out of option tables but can still be
    /// chosen by their exact command token.
    fn hidden(&self) -> bool {
        false
    }

    fn run(&self, session: &mut Session) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleId(usize);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Called with the scope of every prompt about to be shown.
pub type ScopeObserver = Box<dyn FnMut(MenuScope, &mut OutputMultiplexer) -> Result<()>>;

/// Every module known to the program, plus which one is the root.
///
/// Modules are never removed once registered.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: Vec<Rc<dyn Module>>,
    root: Option<ModuleId>,
    pub(crate) observers: Vec<ScopeObserver>,
}

impl ModuleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, module: impl Module + 'static) -> ModuleId {
        let id = ModuleId(self.modules.len());
        info!(
            "Registered module `{}` in context `{}`",
            module.name(),
            module.context()
        );
        self.modules.push(Rc::new(module));
        id
    }

    #[must_use]
    pub fn get(&self, id: ModuleId) -> Option<Rc<dyn Module>> {
        self.modules.get(id.0).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Modules of `context`, ordered by context order, then name.
    #[must_use]
    pub fn in_context(&self, context: &str) -> Vec<ModuleId> {
        self.modules
            .iter()
            .enumerate()
            .filter(|(_, module)| module.context() == context)
            .sorted_by(|(_, a), (_, b)| {
                a.context_order()
                    .cmp(&b.context_order())
                    .then_with(|| a.name().cmp(b.name()))
            })
            .map(|(index, _)| ModuleId(index))
            .collect()
    }

    /// First module registered under `name`, compared case-insensitively.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<ModuleId> {
        self.modules
            .iter()
            .position(|module| module.name().eq_ignore_ascii_case(name))
            .map(ModuleId)
    }

    #[must_use]
    pub fn root(&self) -> Option<ModuleId> {
        self.root
    }

    pub fn set_root(&mut self, id: ModuleId) {
        debug!("Module {id} is now the root");
        self.root = Some(id);
    }

    /// Adds an observer told about the scope of every prompt.
    pub fn subscribe(&mut self, observer: ScopeObserver) {
        self.observers.push(observer);
    }
}
