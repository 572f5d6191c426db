//! Vocabulary registry.
//!
//! Stores the words the shell understands, indexed by id, alias and
//! abbreviation. The registry is built once through the consuming
//! [`VocabularyRegistry::register`] and is read-only afterwards.

use std::collections::{BTreeSet, HashMap, HashSet};

use orgshell_foundation::{ContextLevel, EntityKind, RegistrationError, ValueType, WordKind};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Handle to a registered word. The index is the registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WordRef(usize);

impl WordRef {
    /// Returns the registration index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Fields shared by every word kind.
#[derive(Clone, Debug, PartialEq)]
pub struct WordMeta {
    /// Unique lowercase id.
    pub id: String,
    /// One-line description for help output.
    pub description: String,
    /// Alternate spellings.
    pub aliases: Vec<String>,
    /// Short forms.
    pub abbreviations: Vec<String>,
    /// Shallowest context in which the word may be executed.
    pub min_level: ContextLevel,
}

impl WordMeta {
    fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            aliases: Vec::new(),
            abbreviations: Vec::new(),
            min_level: ContextLevel::System,
        }
    }
}

/// Broad grouping of actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionCategory {
    /// Create/read/update/delete.
    Crud,
    /// Moving through contexts.
    Navigation,
    /// Shell housekeeping.
    System,
    /// Reporting and analysis.
    Analysis,
}

/// The data operation an action performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CrudOperation {
    /// Makes a new record.
    Create,
    /// Reads records.
    Read,
    /// Changes a record.
    Update,
    /// Removes a record.
    Delete,
}

/// A verb such as `create` or `show`.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionWord {
    /// Shared fields.
    pub meta: WordMeta,
    /// Category.
    pub category: ActionCategory,
    /// CRUD operation, if any.
    pub crud: Option<CrudOperation>,
    /// Whether an entity word must accompany the action.
    pub requires_entity: bool,
    /// Whether the action destroys data.
    pub destructive: bool,
    /// Warning shown before a destructive action.
    pub warning: Option<String>,
}

impl ActionWord {
    /// Creates an action word.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        category: ActionCategory,
    ) -> Self {
        Self {
            meta: WordMeta::new(id, description),
            category,
            crud: None,
            requires_entity: false,
            destructive: false,
            warning: None,
        }
    }

    /// Sets the CRUD operation.
    #[must_use]
    pub fn with_crud(mut self, op: CrudOperation) -> Self {
        self.crud = Some(op);
        self
    }

    /// Marks the action as needing an entity word.
    #[must_use]
    pub fn requiring_entity(mut self) -> Self {
        self.requires_entity = true;
        self
    }

    /// Marks the action as destructive with a warning.
    #[must_use]
    pub fn destructive(mut self, warning: impl Into<String>) -> Self {
        self.destructive = true;
        self.warning = Some(warning.into());
        self
    }
}

/// A qualifier such as `holding`.
#[derive(Clone, Debug, PartialEq)]
pub struct ModifierWord {
    /// Shared fields.
    pub meta: WordMeta,
    /// Entity ids the modifier can qualify.
    pub applies_to: Vec<String>,
    /// Modifier ids that cannot be combined with this one.
    pub exclusive_with: Vec<String>,
}

impl ModifierWord {
    /// Creates a modifier word.
    #[must_use]
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            meta: WordMeta::new(id, description),
            applies_to: Vec::new(),
            exclusive_with: Vec::new(),
        }
    }

    /// Sets the entity ids this modifier applies to.
    #[must_use]
    pub fn applies_to<I, S>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.applies_to = entities.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the modifiers this one excludes.
    #[must_use]
    pub fn exclusive_with<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusive_with = modifiers.into_iter().map(Into::into).collect();
        self
    }
}

/// A noun such as `company`.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityWord {
    /// Shared fields.
    pub meta: WordMeta,
    /// The entity this word denotes.
    pub entity: EntityKind,
}

impl EntityWord {
    /// Creates an entity word.
    #[must_use]
    pub fn new(id: impl Into<String>, description: impl Into<String>, entity: EntityKind) -> Self {
        Self {
            meta: WordMeta::new(id, description),
            entity,
        }
    }
}

/// A key such as `currency` in `currency=EUR`.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeWord {
    /// Shared fields.
    pub meta: WordMeta,
    /// Type of the attribute's value.
    pub value_type: ValueType,
    /// Entities the attribute belongs to.
    pub applies_to: Vec<EntityKind>,
}

impl AttributeWord {
    /// Creates an attribute word.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        value_type: ValueType,
    ) -> Self {
        Self {
            meta: WordMeta::new(id, description),
            value_type,
            applies_to: Vec::new(),
        }
    }

    /// Sets the entities this attribute belongs to.
    #[must_use]
    pub fn applies_to(mut self, entities: impl IntoIterator<Item = EntityKind>) -> Self {
        self.applies_to = entities.into_iter().collect();
        self
    }
}

macro_rules! shared_builders {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl $ty {
                /// Adds alternate spellings.
                #[must_use]
                pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
                where
                    I: IntoIterator<Item = S>,
                    S: Into<String>,
                {
                    self.meta.aliases.extend(aliases.into_iter().map(Into::into));
                    self
                }

                /// Adds short forms.
                #[must_use]
                pub fn with_abbreviations<I, S>(mut self, abbreviations: I) -> Self
                where
                    I: IntoIterator<Item = S>,
                    S: Into<String>,
                {
                    self.meta
                        .abbreviations
                        .extend(abbreviations.into_iter().map(Into::into));
                    self
                }

                /// Sets the minimum execution level.
                #[must_use]
                pub fn with_min_level(mut self, level: ContextLevel) -> Self {
                    self.meta.min_level = level;
                    self
                }
            }

            impl From<$ty> for Word {
                fn from(word: $ty) -> Self {
                    Word::$variant(word)
                }
            }
        )*
    };
}

/// A vocabulary word of any kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Word {
    /// An action.
    Action(ActionWord),
    /// A modifier.
    Modifier(ModifierWord),
    /// An entity.
    Entity(EntityWord),
    /// An attribute.
    Attribute(AttributeWord),
}

shared_builders! {
    ActionWord => Action,
    ModifierWord => Modifier,
    EntityWord => Entity,
    AttributeWord => Attribute,
}

impl Word {
    /// Returns the shared fields.
    #[must_use]
    pub fn meta(&self) -> &WordMeta {
        match self {
            Word::Action(w) => &w.meta,
            Word::Modifier(w) => &w.meta,
            Word::Entity(w) => &w.meta,
            Word::Attribute(w) => &w.meta,
        }
    }

    /// Returns the word's kind.
    #[must_use]
    pub fn kind(&self) -> WordKind {
        match self {
            Word::Action(_) => WordKind::Action,
            Word::Modifier(_) => WordKind::Modifier,
            Word::Entity(_) => WordKind::Entity,
            Word::Attribute(_) => WordKind::Attribute,
        }
    }

    /// Returns the canonical id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.meta().id
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.meta().description
    }

    /// Returns the aliases.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.meta().aliases
    }

    /// Returns the abbreviations.
    #[must_use]
    pub fn abbreviations(&self) -> &[String] {
        &self.meta().abbreviations
    }

    /// Returns the minimum execution level.
    #[must_use]
    pub fn min_level(&self) -> ContextLevel {
        self.meta().min_level
    }

    /// Whether the word is a destructive action.
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        matches!(self, Word::Action(a) if a.destructive)
    }

    /// Returns the value type of an attribute word.
    #[must_use]
    pub fn value_type(&self) -> Option<&ValueType> {
        match self {
            Word::Attribute(a) => Some(&a.value_type),
            _ => None,
        }
    }

    /// Returns the entity kind of an entity word.
    #[must_use]
    pub fn entity_kind(&self) -> Option<EntityKind> {
        match self {
            Word::Entity(e) => Some(e.entity),
            _ => None,
        }
    }
}

/// Runtime storage for all vocabulary words.
#[derive(Clone, Debug, Default)]
pub struct VocabularyRegistry {
    /// Words in registration order
    words: Vec<Word>,
    /// Lowercase id -> word
    ids: HashMap<String, WordRef>,
    /// Lowercase id, alias or abbreviation -> word
    surface: HashMap<String, WordRef>,
    /// Uppercase choice options declared by attribute words
    known_values: BTreeSet<String>,
}

impl VocabularyRegistry {
    /// Creates a new empty vocabulary registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a word, consuming the registry.
    ///
    /// # Errors
    ///
    /// Fails when the id is empty or already registered, or when any id,
    /// alias or abbreviation collides with text another word already owns.
    pub fn register(mut self, word: impl Into<Word>) -> Result<Self, RegistrationError> {
        let word = word.into();
        let id = word.id().to_lowercase();
        if id.trim().is_empty() {
            return Err(RegistrationError::EmptyWordId);
        }
        if self.ids.contains_key(&id) {
            return Err(RegistrationError::DuplicateWord(id));
        }

        let mut forms = vec![id.clone()];
        for form in word.aliases().iter().chain(word.abbreviations()) {
            let form = form.to_lowercase();
            if !form.is_empty() && !forms.contains(&form) {
                forms.push(form);
            }
        }
        for form in &forms {
            if let Some(existing) = self.surface.get(form) {
                return Err(RegistrationError::AliasConflict {
                    alias: form.clone(),
                    word: id,
                    existing: self.words[existing.index()].id().to_string(),
                });
            }
        }

        let word_ref = WordRef(self.words.len());
        for form in forms {
            self.surface.insert(form, word_ref);
        }
        if let Some(ValueType::Choice(options)) = word.value_type() {
            self.known_values
                .extend(options.iter().map(|o| o.to_uppercase()));
        }
        self.ids.insert(id, word_ref);
        self.words.push(word);
        Ok(self)
    }

    /// Returns the word with this id (case-insensitive).
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Word> {
        self.get_ref(id).and_then(|r| self.word(r))
    }

    /// Returns the handle of the word with this id.
    #[must_use]
    pub fn get_ref(&self, id: &str) -> Option<WordRef> {
        self.ids.get(&id.to_lowercase()).copied()
    }

    /// Resolves a handle.
    #[must_use]
    pub fn word(&self, word_ref: WordRef) -> Option<&Word> {
        self.words.get(word_ref.index())
    }

    /// Looks up text against ids, aliases and abbreviations.
    #[must_use]
    pub fn lookup(&self, text: &str) -> Option<WordRef> {
        self.surface.get(&text.to_lowercase()).copied()
    }

    /// Returns all words of a kind, in registration order.
    #[must_use]
    pub fn by_type(&self, kind: WordKind) -> Vec<&Word> {
        self.words.iter().filter(|w| w.kind() == kind).collect()
    }

    /// Iterates over all words in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (WordRef, &Word)> {
        self.words.iter().enumerate().map(|(i, w)| (WordRef(i), w))
    }

    /// Whether the text is an enumerated value some attribute accepts.
    #[must_use]
    pub fn is_known_value(&self, text: &str) -> bool {
        self.known_values.contains(&text.to_uppercase())
    }

    /// Returns all enumerated values, uppercase and sorted.
    #[must_use]
    pub fn known_values(&self) -> &BTreeSet<String> {
        &self.known_values
    }

    /// Returns every surface form (ids, aliases, abbreviations).
    #[must_use]
    pub fn surface_forms(&self) -> Vec<&str> {
        let mut forms: Vec<&str> = self.surface.keys().map(String::as_str).collect();
        forms.sort_unstable();
        forms
    }

    /// Number of registered words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no words are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Ids of the given handles, skipping dangling ones.
    #[must_use]
    pub fn ids_of(&self, refs: &[WordRef]) -> Vec<&str> {
        refs.iter()
            .filter_map(|r| self.word(*r))
            .map(Word::id)
            .collect()
    }

    /// Kinds of the words behind `refs`.
    #[must_use]
    pub fn kinds_of(&self, refs: &[WordRef]) -> HashSet<WordKind> {
        refs.iter()
            .filter_map(|r| self.word(*r))
            .map(Word::kind)
            .collect()
    }
}
