//! # zhuyin
//!
//! Session wrapper around `bopomofo-core`, turning its phonetic editor and
//! conversion core into the small per-session API an IME shim actually
//! drives: feed keys in, read back the committed buffer, the in-progress
//! preedit, and the current phrase candidates (`spec.md` §6).

pub mod session;

pub use bopomofo_core::{
    open, ConversionCore, Engine, EngineConfig, EngineError, KeyBehavior, KeyboardLayoutCompat,
    MalformedPhoneError, Phone, PhraseDict, Segmentation, Tree, UserDictionary,
};
pub use session::Session;
