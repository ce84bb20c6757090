use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use zhuyin::{open, KeyBehavior, KeyboardLayoutCompat, Session};

/// Interactive Bopomofo/Zhuyin conversion REPL over a prebuilt tree index
/// and phrase dictionary directory.
#[derive(Parser)]
#[command(name = "zhuyin", about = "Bopomofo/Zhuyin input method REPL")]
struct Cli {
    /// Directory containing tree.dat and phrase.dat
    data_directory: PathBuf,

    /// Keyboard layout to compose with
    #[arg(long, value_enum, default_value = "default")]
    layout: Layout,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Layout {
    Default,
    Hsu,
    Eten,
    Pinyin,
}

impl From<Layout> for KeyboardLayoutCompat {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Default => KeyboardLayoutCompat::Default,
            Layout::Hsu => KeyboardLayoutCompat::Hsu,
            Layout::Eten => KeyboardLayoutCompat::Et,
            Layout::Pinyin => KeyboardLayoutCompat::HanyuPinyin,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let engine = match open(&cli.data_directory) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("failed to open {}: {}", cli.data_directory.display(), err);
            std::process::exit(1);
        }
    };

    let mut session = Session::new(&engine, cli.layout.into());

    println!("type Bopomofo keys, one line per batch; ':clear' resets, ':quit' exits");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let line = line.trim();
        match line {
            ":quit" | ":q" => break,
            ":clear" => {
                session.clear();
                continue;
            }
            _ => {}
        }

        for key in line.chars() {
            if key == '\u{8}' {
                session.backspace();
                continue;
            }
            match session.input(key) {
                KeyBehavior::KeyError | KeyBehavior::Error => {
                    eprintln!("rejected key '{key}'");
                }
                KeyBehavior::NoWord => {
                    eprintln!("no syllable to complete for '{key}'");
                }
                KeyBehavior::Ignore | KeyBehavior::Absorb | KeyBehavior::Commit => {}
            }
        }

        let preedit = session.preedit();
        match session.buffer() {
            Ok(buffer) => println!("buffer: {buffer}{preedit}"),
            Err(err) => eprintln!("conversion failed: {err}"),
        }
        io::stdout().flush().ok();
    }
}
