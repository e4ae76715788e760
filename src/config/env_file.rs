//! `.env` file loading.
//!
//! The file is parsed into memory with dotenvy's iterator API and never
//! exported into the process environment, so resolution can compare the two
//! sources explicitly. Keys are folded to lowercase; later duplicates win.
//!
//! Values are never expanded. `$` is literal everywhere, and a backslash is
//! literal outside double quotes. Inside double quotes the usual escapes
//! (`\\`, `\"`, `\'`, `\$`, `\ `, `\n`) apply and any other backslash is kept.
//! Comments, `export` prefixes and quoting follow dotenvy.
//!
//! Parse errors report only the file path and position. The offending line is
//! never included because it may hold the password.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name looked up in the working directory by default. Also the `key`
/// of errors raised for the file itself.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Process variable that overrides the `.env` location. Matched exactly.
pub const ENV_FILE_VAR: &str = "DBCONF_ENV_FILE";

#[derive(Debug, Clone, Default)]
pub struct EnvFile {
    path: Option<PathBuf>,
    entries: HashMap<String, String>,
}

impl EnvFile {
    /// An empty file, as if none existed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the file at `path`. A file that does not exist yields an empty
    /// `EnvFile`; one that exists but cannot be read or parsed is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no env file, skipping");
                return Ok(Self {
                    path: Some(path.to_path_buf()),
                    entries: HashMap::new(),
                });
            }
            Err(err) => return Err(read_error(path, &err)),
        };

        let entries = parse(&text, path)?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded env file");

        Ok(Self {
            path: Some(path.to_path_buf()),
            entries,
        })
    }

    /// Parse env-file syntax from any reader. Used for in-memory sources.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let source = Path::new("<memory>");
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|err| read_error(source, &err))?;
        Ok(Self {
            path: None,
            entries: parse(&text, source)?,
        })
    }

    /// Where the file was loaded from, if it came from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Look up an entry by name, ignoring case. Blank values count as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_lowercase())
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `override_path` (the value of `$DBCONF_ENV_FILE`) if non-empty, else `./.env`.
pub fn default_path(override_path: Option<&OsStr>) -> PathBuf {
    match override_path {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_ENV_FILE),
    }
}

fn parse(text: &str, source: &Path) -> Result<HashMap<String, String>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let literal = escape_literals(text);

    let mut entries = HashMap::new();
    for item in dotenvy::from_read_iter(literal.as_bytes()) {
        let (key, value) = item.map_err(|err| parse_error(source, &err))?;
        entries.insert(key.to_lowercase(), value);
    }
    Ok(entries)
}

/// Rewrite env-file text so dotenvy reads `$` and stray backslashes as
/// plain characters. Single-quoted text and comments pass through untouched.
fn escape_literals(text: &str) -> String {
    #[derive(Clone, Copy)]
    enum State {
        Unquoted,
        Single,
        Double,
        Comment,
    }

    let mut out = String::with_capacity(text.len() + 8);
    let mut state = State::Unquoted;
    // A `#` only opens a comment at line start or after whitespace.
    let mut after_space = true;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Comment => {
                if c == '\n' {
                    state = State::Unquoted;
                    after_space = true;
                }
                out.push(c);
            }
            State::Single => {
                if c == '\'' {
                    state = State::Unquoted;
                    after_space = false;
                }
                out.push(c);
            }
            State::Double => match c {
                '"' => {
                    state = State::Unquoted;
                    after_space = false;
                    out.push(c);
                }
                '$' => out.push_str("\\$"),
                '\\' => match chars.peek() {
                    Some(&next) if matches!(next, '\\' | '\'' | '"' | '$' | ' ' | 'n') => {
                        chars.next();
                        out.push('\\');
                        out.push(next);
                    }
                    _ => out.push_str("\\\\"),
                },
                _ => out.push(c),
            },
            State::Unquoted => match c {
                '#' if after_space => {
                    state = State::Comment;
                    out.push(c);
                }
                '\'' => {
                    state = State::Single;
                    out.push(c);
                }
                '"' => {
                    state = State::Double;
                    out.push(c);
                }
                '$' => {
                    after_space = false;
                    out.push_str("\\$");
                }
                '\\' => {
                    after_space = false;
                    out.push_str("\\\\");
                }
                _ => {
                    after_space = c.is_whitespace();
                    out.push(c);
                }
            },
        }
    }
    out
}

fn parse_error(source: &Path, err: &dotenvy::Error) -> Error {
    let message = match err {
        dotenvy::Error::LineParse(_, index) => {
            tracing::warn!(path = %source.display(), position = index, "malformed env file");
            format!("{}: malformed line at position {index}", source.display())
        }
        dotenvy::Error::Io(io_err) => read_message(source, io_err),
        _ => format!("{}: unreadable env file", source.display()),
    };
    Error::InvalidConfiguration {
        key: DEFAULT_ENV_FILE.to_string(),
        message,
    }
}

fn read_error(source: &Path, err: &io::Error) -> Error {
    Error::InvalidConfiguration {
        key: DEFAULT_ENV_FILE.to_string(),
        message: read_message(source, err),
    }
}

fn read_message(source: &Path, err: &io::Error) -> String {
    format!("{}: unreadable env file: {}", source.display(), err.kind())
}
