//! Point-in-time snapshot of process environment variables.
//!
//! Keys are matched case-insensitively. Values are kept as `OsString` so a
//! variable that is not valid UTF-8 can be reported as invalid instead of
//! silently looking unset.

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};

#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, OsString>,
}

impl Environment {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        Self::from_vars(std::env::vars_os())
    }

    /// Build a snapshot from explicit pairs.
    ///
    /// When several spellings of one key are present, the all-lowercase
    /// spelling wins; otherwise the first one seen is kept. Keys that are not
    /// valid UTF-8 are dropped since no configuration key can match them.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let mut map: HashMap<String, OsString> = HashMap::new();
        for (key, value) in vars {
            let Ok(key) = key.into().into_string() else {
                continue;
            };
            let folded = key.to_lowercase();
            let exact = folded == key;
            if exact || !map.contains_key(&folded) {
                map.insert(folded, value.into());
            }
        }
        Self { vars: map }
    }

    /// Look up a variable by name, ignoring case.
    pub fn get(&self, key: &str) -> Option<&OsStr> {
        self.vars.get(&key.to_lowercase()).map(OsString::as_os_str)
    }
}
