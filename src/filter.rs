//! # Predefined Style Filter
//!
//! Classifies appended styles as built-in or custom. Built-in status comes
//! from the style's [`BuiltinRole`], never from its id or display name: a
//! German `berschrift1` and an English `Heading1` share the role
//! `heading 1`, so the master's definition stands in for both.

use std::collections::HashMap;

use crate::model::{BuiltinRole, StyleCatalog, StyleDefinition};

/// How an appended style relates to the master's predefined styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleClass {
    /// A user-authored style.
    Custom,
    /// A predefined style. `master_id` names the master's definition with
    /// the same role, if the master has one.
    Builtin { master_id: Option<String> },
}

/// Role lookup over the master catalog, taken before any merging starts.
#[derive(Debug, Clone)]
pub struct PredefinedFilter {
    by_role: HashMap<BuiltinRole, String>,
}

impl PredefinedFilter {
    pub fn new(master: &StyleCatalog) -> Self {
        let mut by_role = HashMap::new();
        for style in master {
            if let Some(role) = style.role {
                // first definition of a role wins, like default resolution
                by_role.entry(role).or_insert_with(|| style.style_id.clone());
            }
        }
        Self { by_role }
    }

    /// The master's style id for a role.
    pub fn master_id(&self, role: BuiltinRole) -> Option<&str> {
        self.by_role.get(&role).map(String::as_str)
    }

    pub fn classify(&self, style: &StyleDefinition) -> StyleClass {
        match style.role {
            Some(role) => StyleClass::Builtin {
                master_id: self.master_id(role).map(str::to_string),
            },
            None => StyleClass::Custom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StyleType;

    fn english_master() -> StyleCatalog {
        StyleCatalog::from_styles(vec![
            StyleDefinition::new("Normal", StyleType::Paragraph)
                .with_name("Normal")
                .with_role(BuiltinRole::Normal),
            StyleDefinition::new("Heading1", StyleType::Paragraph)
                .with_name("heading 1")
                .with_role(BuiltinRole::Heading(1)),
            StyleDefinition::new("MyStyle1", StyleType::Paragraph).with_name("My Style 1"),
        ])
    }

    #[test]
    fn test_translated_builtin_maps_to_master_definition() {
        let filter = PredefinedFilter::new(&english_master());
        let german = StyleDefinition::new("berschrift1", StyleType::Paragraph)
            .with_name("Überschrift 1")
            .with_role(BuiltinRole::Heading(1));

        assert!(german.is_builtin());
        assert_eq!(
            filter.classify(&german),
            StyleClass::Builtin {
                master_id: Some("Heading1".to_string())
            }
        );
    }

    #[test]
    fn test_builtin_missing_from_master() {
        let filter = PredefinedFilter::new(&english_master());
        let strong = StyleDefinition::new("Fett", StyleType::Character).with_role(BuiltinRole::Strong);
        assert_eq!(
            filter.classify(&strong),
            StyleClass::Builtin { master_id: None }
        );
    }

    #[test]
    fn test_display_name_does_not_make_a_style_builtin() {
        let filter = PredefinedFilter::new(&english_master());
        // custom style that happens to be called "heading 1"
        let impostor = StyleDefinition::new("Heading1", StyleType::Paragraph).with_name("heading 1");
        assert!(!impostor.is_builtin());
        assert_eq!(filter.classify(&impostor), StyleClass::Custom);
    }

    #[test]
    fn test_first_definition_of_a_role_wins() {
        let mut master = english_master();
        master.insert(
            StyleDefinition::new("Heading1Alt", StyleType::Paragraph)
                .with_role(BuiltinRole::Heading(1)),
        );
        let filter = PredefinedFilter::new(&master);
        assert_eq!(filter.master_id(BuiltinRole::Heading(1)), Some("Heading1"));
    }
}
