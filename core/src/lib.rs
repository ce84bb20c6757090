//! Phonetic editor and phrase tree conversion core for a Bopomofo/Zhuyin
//! input method.
//!
//! Two halves, matching `spec.md` §1:
//!
//! - **Phonetic editing** ([`phone`], [`layout`], [`editor`]): per-keyboard
//!   key-to-syllable state machines producing packed [`phone::Phone`] codes.
//! - **Phrase resolution** ([`tree`], [`dict`], [`phrase_iter`],
//!   [`convert`]): a memory-mapped trie over syllable sequences, resolved by
//!   a Viterbi-style DP into the highest-scoring phrase segmentation.
//!
//! [`config`] and [`userdict`] are the ambient configuration and
//! user-dictionary collaborator boundary; [`error`] is the shared error
//! taxonomy.

pub mod config;
pub mod convert;
pub mod dict;
pub mod editor;
pub mod error;
pub mod layout;
pub mod phone;
pub mod phrase_iter;
pub mod tree;
pub mod userdict;

pub use config::EngineConfig;
pub use convert::{ConversionCore, PhraseSpan, Segmentation};
pub use dict::PhraseDict;
pub use editor::{EditorState, PhoneticEditor};
pub use error::{EngineError, MalformedPhoneError};
pub use layout::{KeyBehavior, KeyboardLayoutCompat};
pub use phone::Phone;
pub use phrase_iter::{PhraseEntry, PhraseIterator};
pub use tree::Tree;
pub use userdict::{InMemoryUserDict, UserDictionary};

use std::path::Path;

/// Owns the memory-mapped tree index and phrase dictionary for one data
/// directory, and the conversion core built over them (`spec.md` §3
/// "Lifecycle"). File names mirror the teacher's on-disk layout.
pub struct Engine {
    tree: Tree,
    dict: PhraseDict,
    config: EngineConfig,
}

const TREE_FILE_NAME: &str = "tree.dat";
const DICT_FILE_NAME: &str = "phrase.dat";

impl Engine {
    /// Opens the tree index and phrase dictionary under `config.data_directory`.
    #[tracing::instrument(skip(config), fields(data_directory = %config.data_directory.display()))]
    pub fn open(config: EngineConfig) -> Result<Engine, EngineError> {
        let tree_path = config.data_directory.join(TREE_FILE_NAME);
        let dict_path = config.data_directory.join(DICT_FILE_NAME);
        let tree = Tree::open(&tree_path)?;
        let dict = PhraseDict::open(&dict_path)?;
        tracing::info!(records = tree.record_count(), "opened phrase tree");
        Ok(Engine { tree, dict, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Starts a new phonetic editor using the engine's default layout.
    pub fn new_editor(&self) -> PhoneticEditor {
        PhoneticEditor::new(self.config.default_layout)
    }

    /// Starts a new phonetic editor using an explicit layout.
    pub fn new_editor_with_layout(&self, layout: KeyboardLayoutCompat) -> PhoneticEditor {
        PhoneticEditor::new(layout)
    }

    /// Builds a conversion core over this engine's tree and dictionary,
    /// optionally merging in `user_dict` as pseudo-leaves (`spec.md` §4.G).
    pub fn conversion_core<'a>(&'a self, user_dict: Option<&'a dyn UserDictionary>) -> ConversionCore<'a> {
        ConversionCore::new(&self.tree, &self.dict, user_dict, self.config.length_bonus_step, self.config.conversion_cache_capacity)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn dict(&self) -> &PhraseDict {
        &self.dict
    }
}

/// Convenience wrapper over [`Engine::open`] taking a bare data directory
/// with default config (`spec.md` §6 `open(data_directory) → engine | error`).
pub fn open(data_directory: impl AsRef<Path>) -> Result<Engine, EngineError> {
    let mut config = EngineConfig::default();
    config.data_directory = data_directory.as_ref().to_path_buf();
    Engine::open(config)
}
