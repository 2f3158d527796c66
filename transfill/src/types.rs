//! Core types for extracted resource units.
//! The extractor decodes into these; the diff engine and merge writer consume them.

/// The kind of translatable unit found in a resource document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// A single-line `<string name="...">...</string>` entry.
    String,
    /// A `<string-array name="...">` element with nested `<item>` children.
    StringArray,
    /// A `<plurals name="...">` element with `<item quantity="...">` children.
    Plurals,
}

/// One translatable entry extracted from a resource document.
///
/// `markup` is the verbatim matched block (opening tag, attributes, body,
/// closing tag) and is what gets diffed and sent for translation. `body` is
/// the inner text, used only to decide whether an entry counts as blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUnit {
    /// The `name` attribute, unique within one (file, locale) pair.
    pub name: String,

    /// Which pattern produced this unit.
    pub kind: UnitKind,

    /// The full matched block, preserved byte-for-byte.
    pub markup: String,

    /// The text between the opening and closing tags.
    pub body: String,
}

impl ResourceUnit {
    /// A unit is blank when its body is empty after trimming. Blank entries
    /// in a target locale are retranslated on the next run.
    pub fn is_blank(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// All units extracted from one (file, locale) pair, in order of appearance.
///
/// Built fresh on every extraction; never mutated after that. A later unit
/// with the same name replaces the earlier one in place, so iteration order
/// stays the order of first appearance in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleResourceMap {
    units: Vec<ResourceUnit>,
}

impl LocaleResourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a unit, replacing any earlier unit with the same name (last-wins).
    pub fn insert(&mut self, unit: ResourceUnit) {
        match self.units.iter_mut().find(|u| u.name == unit.name) {
            Some(existing) => *existing = unit,
            None => self.units.push(unit),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ResourceUnit> {
        self.units.iter().find(|u| u.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Units in order of appearance in the source document.
    pub fn units(&self) -> impl Iterator<Item = &ResourceUnit> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
