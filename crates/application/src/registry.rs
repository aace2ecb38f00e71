use fieldkit_domain::FieldKind;

/// One registered input type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTypeEntry {
    kind: FieldKind,
    display_label: String,
    supports_options: bool,
}

impl InputTypeEntry {
    /// Creates a registry entry.
    #[must_use]
    pub fn new(kind: FieldKind, display_label: impl Into<String>, supports_options: bool) -> Self {
        Self {
            kind,
            display_label: display_label.into(),
            supports_options,
        }
    }

    /// Returns the kind this entry registers.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the label shown in admin dropdowns.
    #[must_use]
    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    /// Returns whether fields of this kind accept admin-defined choices.
    #[must_use]
    pub fn supports_options(&self) -> bool {
        self.supports_options
    }
}

/// Explicit allow-list of admin-selectable input types.
///
/// Field definitions only save when their control's kind is registered, so
/// hosts can narrow the palette (or relabel entries) without touching the
/// domain model.
#[derive(Debug, Clone)]
pub struct InputTypeRegistry {
    entries: Vec<InputTypeEntry>,
}

impl InputTypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates the standard registry covering every built-in control.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(InputTypeEntry::new(FieldKind::Text, "Text Input", false));
        registry.register(InputTypeEntry::new(FieldKind::Email, "Email Input", false));
        registry.register(InputTypeEntry::new(FieldKind::Number, "Number Input", false));
        registry.register(InputTypeEntry::new(FieldKind::Textarea, "Textarea", false));
        registry.register(InputTypeEntry::new(
            FieldKind::Select,
            "Select Dropdown",
            true,
        ));
        registry.register(InputTypeEntry::new(FieldKind::Radio, "Radio Buttons", true));
        registry.register(InputTypeEntry::new(FieldKind::Checkbox, "Checkbox", false));
        registry
    }

    /// Registers an entry, replacing any existing entry of the same kind.
    pub fn register(&mut self, entry: InputTypeEntry) {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|candidate| candidate.kind() == entry.kind())
        {
            *existing = entry;
        } else {
            self.entries.push(entry);
        }
    }

    /// Returns whether the kind is registered.
    #[must_use]
    pub fn supports(&self, kind: FieldKind) -> bool {
        self.entry(kind).is_some()
    }

    /// Returns the entry for a kind.
    #[must_use]
    pub fn entry(&self, kind: FieldKind) -> Option<&InputTypeEntry> {
        self.entries.iter().find(|entry| entry.kind() == kind)
    }

    /// Returns `(kind, label)` pairs for admin dropdowns, in registration order.
    #[must_use]
    pub fn admin_options(&self) -> Vec<(FieldKind, String)> {
        self.entries
            .iter()
            .map(|entry| (entry.kind(), entry.display_label().to_owned()))
            .collect()
    }
}
