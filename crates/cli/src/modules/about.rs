//! Program information. Hidden: picked only by typing its command token.

use std::path::{Path, PathBuf};

use menucon_core::error::Result;
use menucon_core::markup::escape;
use menucon_core::registry::Module;
use menucon_core::session::Session;

pub const NAME: &str = "About";
pub const DESCRIPTION: &str = "Interactive console built from selectable modules.";
pub const DATA_DIRECTORY: &str = "Data directory: {0}";
pub const LANGUAGE: &str = "Language: {0}";
pub const MODULE_COUNT: &str = "Modules: {0}";

pub struct About {
    data_dir: PathBuf,
}

impl About {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
        }
    }
}

impl Module for About {
    fn name(&self) -> &str {
        NAME
    }

    fn hidden(&self) -> bool {
        true
    }

    fn run(&self, session: &mut Session) -> Result<()> {
        let description = session.translate(DESCRIPTION);
        let data_dir = format!("#{}", session.translate(DATA_DIRECTORY));
        let language = format!("#{}", session.translate(LANGUAGE));
        let modules = format!("#{}", session.translate(MODULE_COUNT));
        let module_count = session.registry().len();
        let current_language = escape(session.language());

        session
            .output
            .write_line(
                "^{0} {1}^",
                &[&crate::PROGRAM_NAME, &env!("CARGO_PKG_VERSION")],
            )?
            .write_line("{0}", &[&escape(&description)])?
            .write_line("", &[])?
            .write_line(&data_dir, &[&escape(&self.data_dir.display().to_string())])?
            .write_line(&language, &[&current_language])?
            .write_line(&modules, &[&module_count])?
            .write_line("", &[])?;
        Ok(())
    }
}
