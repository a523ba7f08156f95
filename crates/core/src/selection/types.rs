use crate::registry::ModuleId;

/// Something that can be listed as an option.
pub trait Choice {
    /// Name shown in the option table, before translation.
    fn display_name(&self) -> String;

    /// Every name the option can be picked by. The first is the display name.
    fn names(&self) -> Vec<String> {
        vec![self.display_name()]
    }

    /// Hidden options are left out of the table and can only be picked by
    /// their exact command token.
    fn is_hidden(&self) -> bool {
        false
    }
}

impl Choice for str {
    fn display_name(&self) -> String {
        self.to_string()
    }
}

impl Choice for String {
    fn display_name(&self) -> String {
        self.clone()
    }
}

impl<T: Choice + ?Sized> Choice for &T {
    fn display_name(&self) -> String {
        (**self).display_name()
    }

    fn names(&self) -> Vec<String> {
        (**self).names()
    }

    fn is_hidden(&self) -> bool {
        (**self).is_hidden()
    }
}

/// An option known by several names; shown by the first.
impl<T: Choice> Choice for Vec<T> {
    fn display_name(&self) -> String {
        self.first().map(Choice::display_name).unwrap_or_default()
    }

    fn names(&self) -> Vec<String> {
        self.iter().map(Choice::display_name).collect()
    }
}

/// A registered module, as listed by [`Session::choose_module`](crate::session::Session::choose_module).
#[derive(Debug, Clone)]
pub struct ModuleChoice {
    pub id: ModuleId,
    pub name: String,
    pub hidden: bool,
}

impl Choice for ModuleChoice {
    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// An option after translation, as the resolver sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Position in the caller's option slice.
    pub index: usize,
    /// Untranslated display name.
    pub name: String,
    /// Translated names; the first is shown.
    pub names: Vec<String>,
    /// Token from the command pseudo-language, falling back to the name.
    pub command: String,
    pub hidden: bool,
}

impl Candidate {
    #[must_use]
    pub fn label(&self) -> &str {
        self.names.first().map_or(self.name.as_str(), String::as_str)
    }

    /// Whether the command token differs from the name and is worth showing.
    #[must_use]
    pub fn has_distinct_command(&self) -> bool {
        self.command != self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_and_string_choices() {
        assert_eq!("Alpha".display_name(), "Alpha");
        assert_eq!(String::from("Beta").names(), vec!["Beta"]);
        assert!(!"Gamma".is_hidden());
    }

    #[test]
    fn test_vec_choice_uses_first_name() {
        let aliases = vec!["Delete", "Remove", "rm"];
        assert_eq!(aliases.display_name(), "Delete");
        assert_eq!(aliases.names(), vec!["Delete", "Remove", "rm"]);

        let empty: Vec<&str> = Vec::new();
        assert_eq!(empty.display_name(), "");
    }

    #[test]
    fn test_candidate_label_and_command() {
        let candidate = Candidate {
            index: 0,
            name: "Alpha".to_string(),
            names: vec!["Alfa".to_string()],
            command: "a".to_string(),
            hidden: false,
        };
        assert_eq!(candidate.label(), "Alfa");
        assert!(candidate.has_distinct_command());
    }
}
