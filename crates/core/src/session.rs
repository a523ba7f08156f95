//! The context every module runs in.

use std::io::Write;

use indexmap::IndexMap;
use log::{debug, info};

use crate::busy::BusyIndicator;
use crate::error::{Error, Result};
use crate::io::{InputMultiplexer, MenuScope, OutputMultiplexer};
use crate::phrases;
use crate::registry::{ModuleId, ModuleRegistry};
use crate::selection::ModuleChoice;
use crate::translate::{TranslationLookup, COMMAND_LANGUAGE};

/// Writer the busy indicator animates on.
pub type BusyWriter = Box<dyn Write + Send>;

/// A named entry of [`Session::choose_action`].
pub type Action = Box<dyn FnMut(&mut Session) -> Result<()>>;

/// Owns the I/O multiplexers, the translation lookup, the module registry
/// and the busy indicator.
///
/// Modules receive a `&mut Session` when they run and use its prompt helpers
/// ([`choose_option`](Session::choose_option),
/// [`input_confirm`](Session::input_confirm), [`run_loop`](Session::run_loop),
/// ...) to talk to the user.
pub struct Session {
    pub output: OutputMultiplexer,
    pub input: InputMultiplexer,
    translator: Box<dyn TranslationLookup>,
    language: String,
    registry: ModuleRegistry,
    active: Option<ModuleId>,
    busy: Option<BusyIndicator<BusyWriter>>,
}

impl Session {
    pub fn new(
        output: OutputMultiplexer,
        input: InputMultiplexer,
        translator: impl TranslationLookup + 'static,
        language: impl Into<String>,
        registry: ModuleRegistry,
    ) -> Self {
        Self {
            output,
            input,
            translator: Box::new(translator),
            language: language.into(),
            registry,
            active: None,
            busy: None,
        }
    }

    #[must_use]
    pub fn with_busy_indicator(mut self, busy: BusyIndicator<BusyWriter>) -> Self {
        self.busy = Some(busy);
        self
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ModuleRegistry {
        &mut self.registry
    }

    /// Module currently running, `None` at the program's own top level.
    #[must_use]
    pub fn active_module(&self) -> Option<ModuleId> {
        self.active
    }

    /// `key` in the session language.
    #[must_use]
    pub fn translate(&self, key: &str) -> String {
        self.translator.get_text(key, &self.language)
    }

    /// Command token users can type to pick the option named `name`.
    #[must_use]
    pub fn command_token(&self, name: &str) -> String {
        self.translator.get_text(name, COMMAND_LANGUAGE)
    }

    /// Scope of a prompt shown now: root when the running module is the
    /// registry's root.
    #[must_use]
    pub fn scope(&self) -> MenuScope {
        if self.active == self.registry.root() {
            MenuScope::Root
        } else {
            MenuScope::Nested
        }
    }

    /// Publishes the scope of the prompt about to be shown to the input
    /// multiplexer and every registry observer.
    pub(crate) fn announce_scope(&mut self) -> Result<MenuScope> {
        let scope = self.scope();
        self.input.set_scope(scope);
        for observer in &mut self.registry.observers {
            observer(scope, &mut self.output)?;
        }
        Ok(scope)
    }

    pub fn start_busy(&mut self) {
        if let Some(busy) = &mut self.busy {
            busy.start();
        }
    }

    pub fn stop_busy(&mut self) -> Result<()> {
        match &mut self.busy {
            Some(busy) => busy.stop(),
            None => Ok(()),
        }
    }

    /// Waits for an answer, stopping the busy indicator first.
    pub fn read_answer(&mut self, is_sensitive: bool) -> Result<String> {
        self.stop_busy()?;
        self.input.read(is_sensitive)
    }

    /// Waits for a key press, stopping the busy indicator first.
    pub fn read_key(&mut self) -> Result<char> {
        self.stop_busy()?;
        self.input.read_key()
    }

    /// Runs a module, making it the active one until it returns.
    pub fn run_module(&mut self, id: ModuleId) -> Result<()> {
        let module = self
            .registry
            .get(id)
            .ok_or_else(|| Error::UnknownModule(id.to_string()))?;

        info!("Running module `{}`", module.name());
        let previous = self.active.replace(id);
        let result = module.run(self);
        self.active = previous;
        debug!("Module `{}` returned", module.name());
        result
    }

    /// Runs the module registered under `name`.
    pub fn run_module_named(&mut self, name: &str) -> Result<()> {
        let id = self
            .registry
            .find(name)
            .ok_or_else(|| Error::UnknownModule(name.to_string()))?;
        self.run_module(id)
    }

    /// Lists the modules of `context` and runs the chosen ones until the
    /// user answers blank.
    ///
    /// With `auto_select_single_root`, a top-level context holding exactly one
    /// module makes that module the root and runs it directly.
    pub fn choose_module(
        &mut self,
        context: &str,
        title: &str,
        auto_select_single_root: bool,
    ) -> Result<()> {
        let ids = self.registry.in_context(context);

        if auto_select_single_root && context.is_empty() && ids.len() == 1 {
            self.registry.set_root(ids[0]);
            return self.run_module(ids[0]);
        }

        let choices: Vec<ModuleChoice> = ids
            .iter()
            .filter_map(|id| {
                self.registry.get(*id).map(|module| ModuleChoice {
                    id: *id,
                    name: module.name().to_string(),
                    hidden: module.hidden(),
                })
            })
            .collect();

        loop {
            let Some((_, choice)) = self.choose_option(&choices, title)? else {
                return Ok(());
            };
            let id = choice.id;
            self.run_module(id)?;
        }
    }

    /// Menu over named actions, running the chosen one until the user
    /// answers blank.
    pub fn choose_action(
        &mut self,
        actions: &mut IndexMap<String, Action>,
        title: &str,
    ) -> Result<()> {
        loop {
            let names: Vec<String> = actions.keys().cloned().collect();
            let Some((index, _)) = self.choose_option(&names, title)? else {
                return Ok(());
            };
            if let Some((_, action)) = actions.get_index_mut(index) {
                action(self)?;
            }
        }
    }

    /// Tells the user the feature is not there yet and waits for a key.
    pub fn not_implemented(&mut self) -> Result<()> {
        let notice = format!("#{}", self.translate(phrases::NOT_IMPLEMENTED));
        let prompt = format!("?{}", self.translate(phrases::PRESS_ANY_KEY));

        self.output.write_line(&notice, &[])?.write_line("", &[])?;
        self.output.write(&prompt, &[])?;
        self.read_key()?;
        self.output.write_line("", &[])?.write_line("", &[])?;
        Ok(())
    }
}
