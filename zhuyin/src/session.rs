//! Per-session state: a phonetic editor plus the syllable buffer it feeds,
//! converted on demand through the engine's conversion core.
//!
//! Implements the abstract `new_session`/`session_input`/`session_buffer`/
//! `session_preedit`/`session_candidates` API named in `spec.md` §6.

use bopomofo_core::{ConversionCore, Engine, KeyBehavior, KeyboardLayoutCompat, Phone, PhoneticEditor, UserDictionary};

/// One IME session: a phonetic editor over a growing syllable buffer,
/// resolved into phrases through the owning [`Engine`]'s tree and
/// dictionary. Mutated only by its driving thread (`spec.md` §3 Lifecycle).
pub struct Session<'a> {
    engine: &'a Engine,
    user_dict: Option<&'a dyn UserDictionary>,
    editor: PhoneticEditor,
    syllables: Vec<Phone>,
}

impl<'a> Session<'a> {
    pub fn new(engine: &'a Engine, layout: KeyboardLayoutCompat) -> Self {
        Session { engine, user_dict: None, editor: PhoneticEditor::new(layout), syllables: Vec::new() }
    }

    /// Same as `new`, but merges `user_dict` entries into conversion as
    /// pseudo-leaves (`spec.md` §4.G, component K).
    pub fn with_user_dictionary(engine: &'a Engine, layout: KeyboardLayoutCompat, user_dict: &'a dyn UserDictionary) -> Self {
        Session { engine, user_dict: Some(user_dict), editor: PhoneticEditor::new(layout), syllables: Vec::new() }
    }

    /// Feeds one key to the phonetic editor. A `Commit` pushes the
    /// completed syllable onto the buffer that `buffer()`/`candidates()`
    /// convert. Once the buffer already holds `max_syllables` committed
    /// phones (`spec.md` §3), further keys are rejected with `Error`
    /// rather than composing a syllable the buffer has no room for.
    pub fn input(&mut self, key: char) -> KeyBehavior {
        if self.syllables.len() >= self.engine.config().max_syllables {
            tracing::trace!(%key, behavior = ?KeyBehavior::Error, "syllable buffer full");
            return KeyBehavior::Error;
        }
        let behavior = self.editor.input(key);
        if behavior == KeyBehavior::Commit {
            let phone = self.editor.current_phone();
            if phone.is_committable() {
                self.syllables.push(phone);
            }
        }
        tracing::trace!(%key, ?behavior, "session input");
        behavior
    }

    /// Unwinds the partial syllable one slot at a time; once the editor is
    /// empty, pops the most recently committed syllable instead.
    pub fn backspace(&mut self) {
        if self.editor.is_entering() {
            self.editor.backspace();
        } else if self.syllables.pop().is_none() {
            self.editor.backspace();
        }
    }

    /// Discards the committed syllable buffer and any partial syllable.
    pub fn clear(&mut self) {
        self.editor.clear();
        self.syllables.clear();
    }

    /// The converted, committed prefix (`spec.md` §6 `session_buffer`):
    /// the best-scoring segmentation of the committed syllable buffer,
    /// concatenated.
    pub fn buffer(&self) -> Result<String, bopomofo_core::EngineError> {
        let segmentation = self.conversion_core().convert(&self.syllables)?;
        Ok(segmentation.spans.into_iter().map(|span| span.text).collect())
    }

    /// The not-yet-committed tail (`spec.md` §6 `session_preedit`): the
    /// phonetic editor's in-progress syllable, rendered to Bopomofo text, or
    /// empty when nothing is being composed.
    pub fn preedit(&self) -> String {
        if !self.editor.is_entering() {
            return String::new();
        }
        self.editor.current_phone().to_utf8().unwrap_or_default()
    }

    /// The ordered phrase strings making up the current best segmentation
    /// of the committed buffer (`spec.md` §6 `session_candidates`).
    pub fn candidates(&self) -> Result<Vec<String>, bopomofo_core::EngineError> {
        let segmentation = self.conversion_core().convert(&self.syllables)?;
        Ok(segmentation.spans.into_iter().map(|span| span.text).collect())
    }

    fn conversion_core(&self) -> ConversionCore<'a> {
        self.engine.conversion_core(self.user_dict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bopomofo_core::EngineConfig;
    use std::fs::File;
    use std::io::Write;

    fn write_record(buf: &mut Vec<u8>, key: u16, a: u32, b: u32) {
        buf.extend_from_slice(&key.to_be_bytes());
        buf.push((a >> 16) as u8);
        buf.push((a >> 8) as u8);
        buf.push(a as u8);
        buf.push((b >> 16) as u8);
        buf.push((b >> 8) as u8);
        buf.push(b as u8);
    }

    fn open_test_engine(dir_name: &str) -> (Engine, std::path::PathBuf) {
        open_test_engine_with_cap(dir_name, EngineConfig::default().max_syllables)
    }

    fn open_test_engine_with_cap(dir_name: &str, max_syllables: usize) -> (Engine, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!("{dir_name}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let phone = Phone::encode(9, 2, 10, 3).unwrap(); // ㄓㄨㄥˇ
        let mut dict_bytes = Vec::new();
        dict_bytes.extend_from_slice("種".as_bytes());
        dict_bytes.push(0);

        let mut tree_bytes = Vec::new();
        write_record(&mut tree_bytes, 1, 1, 2);
        write_record(&mut tree_bytes, phone.0, 2, 3);
        write_record(&mut tree_bytes, 0, 0, 50);

        File::create(dir.join("tree.dat")).unwrap().write_all(&tree_bytes).unwrap();
        File::create(dir.join("phrase.dat")).unwrap().write_all(&dict_bytes).unwrap();

        let mut config = EngineConfig::default();
        config.data_directory = dir.clone();
        config.max_syllables = max_syllables;
        (Engine::open(config).unwrap(), dir)
    }

    #[test]
    fn commits_a_syllable_and_converts_the_buffer() {
        let (engine, dir) = open_test_engine("session_commit");
        let mut session = Session::new(&engine, KeyboardLayoutCompat::Default);

        assert_eq!(session.input('5'), KeyBehavior::Absorb);
        assert_eq!(session.input('j'), KeyBehavior::Absorb);
        assert_eq!(session.input('/'), KeyBehavior::Absorb);
        assert!(!session.preedit().is_empty());
        assert_eq!(session.input('3'), KeyBehavior::Commit);
        assert_eq!(session.preedit(), "");
        assert_eq!(session.buffer().unwrap(), "種");
        assert_eq!(session.candidates().unwrap(), vec!["種".to_string()]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn clear_discards_committed_syllables() {
        let (engine, dir) = open_test_engine("session_clear");
        let mut session = Session::new(&engine, KeyboardLayoutCompat::Default);
        session.input('5');
        session.input('j');
        session.input('/');
        session.input('3');
        assert_eq!(session.buffer().unwrap(), "種");

        session.clear();
        assert_eq!(session.buffer().unwrap(), "");
        assert_eq!(session.preedit(), "");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn rejects_input_once_syllable_buffer_is_full() {
        let (engine, dir) = open_test_engine_with_cap("session_cap", 1);
        let mut session = Session::new(&engine, KeyboardLayoutCompat::Default);

        session.input('5');
        session.input('j');
        session.input('/');
        assert_eq!(session.input('3'), KeyBehavior::Commit);
        assert_eq!(session.buffer().unwrap(), "種");

        // Buffer is now at its one-syllable cap; further keys are rejected
        // outright rather than composing a syllable with nowhere to go.
        assert_eq!(session.input('5'), KeyBehavior::Error);
        assert_eq!(session.preedit(), "");
        assert_eq!(session.buffer().unwrap(), "種");

        // Freeing a slot lets composition resume.
        session.backspace();
        assert_eq!(session.buffer().unwrap(), "");
        assert_eq!(session.input('5'), KeyBehavior::Absorb);

        std::fs::remove_dir_all(&dir).ok();
    }
}
