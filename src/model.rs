use crate::constant::LONG_PREFIX;

/// The identity of an option: a short key, a long name, or both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    short: Option<char>,
    long: Option<String>,
}

impl Key {
    pub(crate) fn new(short: Option<char>, long: Option<String>) -> Self {
        Self { short, long }
    }

    /// The short key (ex: `'n'` for `-n`), if any.
    pub fn short(&self) -> Option<char> {
        self.short
    }

    /// The long name (ex: `"number"` for `--number`), if any.
    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.short.is_none() && self.long.is_none()
    }

    /// The bare label used in error messages: the long name when present, otherwise the short key.
    pub fn label(&self) -> String {
        match (&self.long, &self.short) {
            (Some(long), _) => long.clone(),
            (None, Some(short)) => short.to_string(),
            (None, None) => String::default(),
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.short, &self.long) {
            (Some(s), Some(l)) => write!(f, "-{s}/{LONG_PREFIX}{l}"),
            (Some(s), None) => write!(f, "-{s}"),
            (None, Some(l)) => write!(f, "{LONG_PREFIX}{l}"),
            (None, None) => write!(f, "<anonymous>"),
        }
    }
}

/// A request to stop parsing and exit the program.
///
/// Produced by the builtin help/version options, self-documenting choice values, and any callback that
/// returns [`Reaction::Terminate`].
/// The core never exits the process itself; this travels back out of `parse` as `ParseError::Terminate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Termination {
    /// The text to show the user before exiting.
    pub message: String,
    /// The exit code to use.
    pub code: i32,
}

impl Termination {
    /// A successful (exit code `0`) termination.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 0,
        }
    }
}

/// The outcome of an option callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Keep parsing.
    Continue,
    /// Fail the option with a callback error.
    Reject,
    /// Stop parsing and request the program exits.
    Terminate(Termination),
}

impl From<bool> for Reaction {
    fn from(value: bool) -> Self {
        if value {
            Reaction::Continue
        } else {
            Reaction::Reject
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some('n'), Some("number"), "number", "-n/--number")]
    #[case(Some('n'), None, "n", "-n")]
    #[case(None, Some("number"), "number", "--number")]
    fn key_label(
        #[case] short: Option<char>,
        #[case] long: Option<&str>,
        #[case] expected_label: &str,
        #[case] expected_display: &str,
    ) {
        let key = Key::new(short, long.map(|l| l.to_string()));
        assert_eq!(key.label(), expected_label);
        assert_eq!(key.to_string(), expected_display);
        assert!(!key.is_empty());
    }

    #[test]
    fn reaction_from_bool() {
        assert_eq!(Reaction::from(true), Reaction::Continue);
        assert_eq!(Reaction::from(false), Reaction::Reject);
    }
}
