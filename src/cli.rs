//! Clap adapter for the flag layer.
//!
//! Compiled only with the `clap` Cargo feature (on by default). The engine
//! itself knows nothing about clap: it talks to [`FlagSource`], and
//! [`ClapFlags`] is one implementation of it built from parsed
//! [`ArgMatches`].
//!
//! Only arguments the user actually typed are reported. Values clap filled in
//! from `default_value` or an env fallback stay out of the flag layer, so a
//! clap default never shadows a config file or env var.

use std::collections::HashMap;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::source::FlagSource;

/// Explicitly-given command-line arguments, keyed by lower-cased arg id.
#[derive(Debug, Clone, Default)]
pub struct ClapFlags {
    values: HashMap<String, String>,
}

impl ClapFlags {
    /// Collect every argument whose value came from the command line. For
    /// arguments given more than once the last value wins.
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let mut values = HashMap::new();
        for id in matches.ids() {
            let name = id.as_str();
            if matches.value_source(name) != Some(ValueSource::CommandLine) {
                continue;
            }
            let Ok(Some(raw)) = matches.try_get_raw(name) else {
                continue;
            };
            if let Some(last) = raw.last() {
                values.insert(name.to_lowercase(), last.to_string_lossy().into_owned());
            }
        }
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FlagSource for ClapFlags {
    fn lookup(&self, name: &str) -> Option<String> {
        self.values.get(&name.to_lowercase()).cloned()
    }
}
