//! Phrase dictionary (component E): a memory-mapped blob of NUL-terminated
//! UTF-8 phrase strings, addressed by byte offset (`spec.md` §3, §4.E, §6).

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::error::EngineError;

/// A zero-copy view over the phrase blob file.
pub struct PhraseDict {
    mmap: Mmap,
}

impl PhraseDict {
    pub fn open(path: &Path) -> Result<PhraseDict, EngineError> {
        let file = File::open(path).map_err(|_| EngineError::MissingDataFile { path: path.to_path_buf() })?;
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(PhraseDict { mmap })
    }

    /// Reads the NUL-terminated UTF-8 phrase starting at `offset`
    /// (`spec.md` §4.E). Fails with `CorruptDictionary` if `offset` is out
    /// of bounds, no terminator is found before the end of the blob, or the
    /// bytes are not valid UTF-8.
    pub fn phrase_at(&self, offset: u32) -> Result<&str, EngineError> {
        let start = offset as usize;
        if start >= self.mmap.len() {
            return Err(EngineError::CorruptDictionary {
                detail: format!("phrase offset {offset} is beyond blob length {}", self.mmap.len()),
            });
        }
        let rest = &self.mmap[start..];
        let len = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| EngineError::CorruptDictionary {
                detail: format!("no NUL terminator found for phrase at offset {offset}"),
            })?;
        std::str::from_utf8(&rest[..len]).map_err(|_| EngineError::CorruptDictionary {
            detail: format!("phrase at offset {offset} is not valid UTF-8"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_file(name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{name}_{}", std::process::id()));
        let mut f = File::create(&path).unwrap();
        f.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn reads_nul_terminated_phrases() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice("台灣".as_bytes());
        bytes.push(0);
        let second_offset = bytes.len() as u32;
        bytes.extend_from_slice("不知道".as_bytes());
        bytes.push(0);

        let path = write_temp_file("dict_ok", &bytes);
        let dict = PhraseDict::open(&path).unwrap();
        assert_eq!(dict.phrase_at(0).unwrap(), "台灣");
        assert_eq!(dict.phrase_at(second_offset).unwrap(), "不知道");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn rejects_missing_terminator() {
        let bytes = "台灣".as_bytes().to_vec();
        let path = write_temp_file("dict_bad", &bytes);
        let dict = PhraseDict::open(&path).unwrap();
        assert!(dict.phrase_at(0).is_err());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn rejects_out_of_bounds_offset() {
        let bytes = "台灣\0".as_bytes().to_vec();
        let path = write_temp_file("dict_oob", &bytes);
        let dict = PhraseDict::open(&path).unwrap();
        assert!(dict.phrase_at(1_000).is_err());
        std::fs::remove_file(path).ok();
    }
}
