use std::cell::Cell;
use std::fmt::Display;
use std::str::FromStr;

use crate::api::Scalar;
use crate::constant::{LONG_PREFIX, OPTION_PREFIX};
use crate::model::{Key, Reaction};
use crate::parser::printer::HelpStyle;
use crate::parser::{ConfigError, OptionFault, ParseError};
use crate::prelude::Value;

const DEFAULT_HELP_WORD: &str = "VALUE";

/// The special behaviour the parser attaches to its own help/version options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Builtin {
    Help,
    Version,
}

// A fixed write into a caller owned variable, applied on every match.
enum Effect<'ap> {
    Toggle {
        target: &'ap Cell<bool>,
        value: bool,
    },
    Assign {
        target: &'ap Cell<i32>,
        value: i32,
        // When present, the target must still hold this before it is assigned.
        once: Option<i32>,
    },
}

type Callback<'ap> = Box<dyn FnMut(&Key, &str) -> Reaction + 'ap>;

/// A command line option (switch).
///
/// Identified by a short key (`-n`), a long name (`--number`), or both.
/// Any combination of a value, flag effects and a callback may be attached; an option with nothing attached is legal.
///
/// ### Example
/// ```
/// use argot::{Opt, Parser};
/// use std::cell::Cell;
///
/// let verbose = Cell::new(false);
/// let mut level: u32 = 1;
/// let mut parser = Parser::new();
/// parser.add_option(Opt::new('v', "verbose").toggle(&verbose, true)).unwrap();
/// parser.add_option(Opt::long("level").stow(&mut level).optional("5")).unwrap();
/// parser.parse(&["program", "-v", "--level"], false).unwrap();
/// drop(parser);
///
/// assert!(verbose.get());
/// assert_eq!(level, 5);
/// ```
pub struct Opt<'ap> {
    key: Key,
    sink: Option<Box<dyn Value + 'ap>>,
    default: Option<String>,
    effects: Vec<Effect<'ap>>,
    callback: Option<Callback<'ap>>,
    role: Option<Builtin>,
    help: String,
    help_word: Option<String>,
    show_default: bool,
    hidden: bool,
    deferred_error: Option<ConfigError>,
}

impl<'ap> std::fmt::Debug for Opt<'ap> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match &self.sink {
            Some(sink) => sink.type_name(),
            None => "-".to_string(),
        };
        write!(
            f,
            "Opt[{key}, {value}, effects={e}, callback={c}]",
            key = self.key,
            e = self.effects.len(),
            c = self.callback.is_some(),
        )
    }
}

impl<'ap> Opt<'ap> {
    fn create(short: Option<char>, long: Option<String>) -> Self {
        Self {
            key: Key::new(short, long),
            sink: None,
            default: None,
            effects: Vec::default(),
            callback: None,
            role: None,
            help: String::default(),
            help_word: None,
            show_default: false,
            hidden: false,
            deferred_error: None,
        }
    }

    /// Create an option with both a short key and a long name (`-n/--number`).
    pub fn new(short: char, long: impl Into<String>) -> Self {
        Self::create(Some(short), Some(long.into()))
    }

    /// Create an option with only a short key (`-n`).
    pub fn short(short: char) -> Self {
        Self::create(Some(short), None)
    }

    /// Create an option with only a long name (`--number`).
    pub fn long(long: impl Into<String>) -> Self {
        Self::create(None, Some(long.into()))
    }

    /// Attach a value to the option, so it takes a value when matched.
    /// By default the value is required; see [`Opt::optional`].
    pub fn store(mut self, value: impl Value + 'ap) -> Self {
        self.sink.replace(Box::new(value));
        self
    }

    /// Attach a [`Scalar`] value bound to `variable`.
    pub fn stow<T>(self, variable: &'ap mut T) -> Self
    where
        T: FromStr + Display + 'ap,
    {
        self.store(Scalar::new(variable))
    }

    /// Make the value optional: when matched without a value, `default` is set instead.
    /// An optional value is never taken from the following token.
    pub fn optional(mut self, default: impl Into<String>) -> Self {
        self.default.replace(default.into());
        self
    }

    /// On every match, assign `value` into `target`.
    pub fn set(mut self, target: &'ap Cell<i32>, value: i32) -> Self {
        self.effects.push(Effect::Assign {
            target,
            value,
            once: None,
        });
        self
    }

    /// Guard the preceding [`Opt::set`]: the assignment fails ("cannot re-set") unless the target still holds `init`.
    ///
    /// Use the same `init` on several options sharing a target to make them mutually exclusive.
    pub fn once(mut self, init: i32) -> Self {
        match self.effects.last_mut() {
            Some(Effect::Assign { once, .. }) => {
                once.replace(init);
            }
            _ => {
                self.deferred_error.replace(ConfigError(format!(
                    "Option {} uses once() without a preceding set().",
                    self.key
                )));
            }
        }

        self
    }

    /// On every match, assign `value` into `target`.
    pub fn toggle(mut self, target: &'ap Cell<bool>, value: bool) -> Self {
        self.effects.push(Effect::Toggle { target, value });
        self
    }

    /// On every match, call `callback` with the option's key and value text (empty when there is none).
    ///
    /// The callback may return a `bool` (`false` fails the parse) or a full [`Reaction`].
    pub fn call<F, R>(mut self, mut callback: F) -> Self
    where
        F: FnMut(&Key, &str) -> R + 'ap,
        R: Into<Reaction>,
    {
        self.callback
            .replace(Box::new(move |key: &Key, text: &str| -> Reaction {
                callback(key, text).into()
            }));
        self
    }

    /// Document the option in the help.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help = description.into();
        self
    }

    /// The placeholder for the value in the help (ex: `--number=INT`).
    pub fn help_word(mut self, word: impl Into<String>) -> Self {
        self.help_word.replace(word.into());
        self
    }

    /// Append the current value, as ` (default: ..)`, to the help.
    pub fn show_default(mut self) -> Self {
        self.show_default = true;
        self
    }

    /// Leave the option out of the help.
    pub fn hide(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub(crate) fn role(mut self, builtin: Builtin) -> Self {
        self.role.replace(builtin);
        self
    }

    /// The key identifying this option.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Whether the option takes a value at all.
    pub fn takes_value(&self) -> bool {
        self.sink.is_some()
    }

    /// Whether the option requires a value.
    pub fn needs_value(&self) -> bool {
        self.sink.is_some() && self.default.is_none()
    }

    /// Whether the option is left out of the help.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub(crate) fn builtin(&self) -> Option<Builtin> {
        self.role
    }

    // The display of the attached value, if any.
    pub(crate) fn display_value(&self) -> Option<String> {
        self.sink.as_ref().map(|sink| sink.to_display())
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.key.is_empty() {
            return Err(ConfigError(
                "Cannot register an option without a short key or long name.".to_string(),
            ));
        }

        if let Some(error) = &self.deferred_error {
            return Err(error.clone());
        }

        match &self.sink {
            Some(sink) => sink.validate(),
            None => Ok(()),
        }
    }

    /// Apply a match without a value.
    pub fn process(&mut self) -> Result<(), ParseError> {
        self.apply(None)
    }

    /// Apply a match with the value `text`.
    pub fn process_with(&mut self, text: &str) -> Result<(), ParseError> {
        self.apply(Some(text))
    }

    fn apply(&mut self, text: Option<&str>) -> Result<(), ParseError> {
        match (&mut self.sink, text) {
            (Some(sink), Some(text)) => sink.set(text)?,
            (Some(sink), None) => match &self.default {
                Some(default) => sink.set(default)?,
                None => return Err(fault(&self.key, OptionFault::MissingValue)),
            },
            (None, Some(text)) => {
                return Err(fault(
                    &self.key,
                    OptionFault::UnwantedValue(text.to_string()),
                ))
            }
            (None, None) => {}
        };

        for effect in &self.effects {
            match effect {
                Effect::Toggle { target, value } => target.set(*value),
                Effect::Assign {
                    target,
                    value,
                    once,
                } => {
                    if let Some(init) = once {
                        if target.get() != *init {
                            return Err(fault(&self.key, OptionFault::CannotReset));
                        }
                    }

                    target.set(*value);
                }
            }
        }

        if let Some(callback) = &mut self.callback {
            match callback(&self.key, text.unwrap_or_default()) {
                Reaction::Continue => {}
                Reaction::Reject => return Err(fault(&self.key, OptionFault::Callback)),
                Reaction::Terminate(termination) => {
                    return Err(ParseError::Terminate(termination))
                }
            }
        }

        Ok(())
    }

    /// The left column of the help line.
    pub(crate) fn usage(&self, style: HelpStyle) -> String {
        let mut usage = match (style, self.key.short(), self.key.long()) {
            (HelpStyle::Dashed, Some(s), Some(l)) => {
                format!("{OPTION_PREFIX}{s}, {LONG_PREFIX}{l}")
            }
            (HelpStyle::Dashed, Some(s), None) => format!("{OPTION_PREFIX}{s}"),
            (HelpStyle::Dashed, None, Some(l)) => format!("    {LONG_PREFIX}{l}"),
            (HelpStyle::Bare, Some(s), Some(l)) => format!("{s}, {l}"),
            (HelpStyle::Bare, Some(s), None) => s.to_string(),
            (HelpStyle::Bare, None, Some(l)) => l.to_string(),
            (_, None, None) => String::default(),
        };

        if self.sink.is_some() {
            let word = self.value_word();

            if self.default.is_some() {
                usage.push_str(&format!("[={word}]"));
            } else {
                usage.push_str(&format!("={word}"));
            }
        }

        usage
    }

    /// The middle column of the help line.
    pub(crate) fn description(&self) -> String {
        match (&self.sink, self.show_default) {
            (Some(sink), true) => {
                let default = sink.to_display();

                if self.help.is_empty() {
                    format!("(default: {default})")
                } else {
                    format!("{} (default: {default})", self.help)
                }
            }
            _ => self.help.clone(),
        }
    }

    fn value_word(&self) -> String {
        match (&self.help_word, self.key.long()) {
            (Some(word), _) => word.clone(),
            (None, Some(long)) => long.to_uppercase().replace('-', "_"),
            (None, None) => DEFAULT_HELP_WORD.to_string(),
        }
    }
}

fn fault(key: &Key, cause: OptionFault) -> ParseError {
    ParseError::Option {
        option: key.label(),
        cause,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Discard;
    use crate::model::Termination;
    use crate::test::assert_contains;
    use rstest::rstest;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn process_inert() {
        let mut option = Opt::short('x');
        option.process().unwrap();
        assert!(!option.takes_value());
        assert!(!option.needs_value());
    }

    #[test]
    fn process_no_sink() {
        // Setup
        let flag = Cell::new(false);
        let mut option = Opt::new('f', "flag").toggle(&flag, true);

        // Execute & verify
        let error = option.process_with("abc").unwrap_err();
        assert_eq!(
            error,
            ParseError::Option {
                option: "flag".to_string(),
                cause: OptionFault::UnwantedValue("abc".to_string()),
            }
        );
        assert!(!flag.get());

        option.process().unwrap();
        assert!(flag.get());
    }

    #[test]
    fn process_required_value() {
        let mut value: u32 = 0;
        let mut option = Opt::short('n').stow(&mut value);
        assert!(option.takes_value());
        assert!(option.needs_value());

        let error = option.process().unwrap_err();
        assert_eq!(
            error,
            ParseError::Option {
                option: "n".to_string(),
                cause: OptionFault::MissingValue,
            }
        );

        option.process_with("4").unwrap();
        drop(option);
        assert_eq!(value, 4);
    }

    #[test]
    fn process_optional_value() {
        let mut value = String::default();
        let mut option = Opt::long("name").stow(&mut value).optional("fallback");
        assert!(option.takes_value());
        assert!(!option.needs_value());

        option.process().unwrap();
        drop(option);
        assert_eq!(value, "fallback");
    }

    #[test]
    fn process_set_once() {
        // Setup
        let mode = Cell::new(0);
        let mut first = Opt::short('a').set(&mode, 1).once(0);
        let mut second = Opt::short('b').set(&mode, 2).once(0);

        // Execute & verify
        first.process().unwrap();
        assert_eq!(mode.get(), 1);

        let error = second.process().unwrap_err();
        assert_eq!(
            error,
            ParseError::Option {
                option: "b".to_string(),
                cause: OptionFault::CannotReset,
            }
        );
        assert_eq!(mode.get(), 1);

        // Same option twice is also a re-set.
        assert_matches!(
            first.process(),
            Err(ParseError::Option {
                cause: OptionFault::CannotReset,
                ..
            })
        );
    }

    #[test]
    fn process_effects_fire_every_match() {
        let count = Cell::new(0);
        let on = Cell::new(false);
        let mut option = Opt::short('a').set(&count, 7).toggle(&on, true);

        option.process().unwrap();
        count.set(0);
        on.set(false);
        option.process().unwrap();

        assert_eq!(count.get(), 7);
        assert!(on.get());
    }

    #[rstest]
    #[case(true, Ok(()))]
    #[case(false, Err(OptionFault::Callback))]
    fn process_callback(#[case] accept: bool, #[case] expected: Result<(), OptionFault>) {
        // Setup
        let seen = Rc::new(RefCell::new(Vec::default()));
        let inner = seen.clone();
        let mut option = Opt::new('c', "call")
            .store(Discard)
            .call(move |key: &Key, text: &str| {
                inner
                    .borrow_mut()
                    .push(format!("{}:{text}", key.short().unwrap()));
                accept
            });

        // Execute
        let result = option.process_with("xyz");

        // Verify
        assert_eq!(
            result,
            expected.map_err(|cause| ParseError::Option {
                option: "call".to_string(),
                cause,
            })
        );
        assert_eq!(*seen.borrow(), vec!["c:xyz".to_string()]);
    }

    #[test]
    fn process_callback_empty_text() {
        let seen = Rc::new(RefCell::new(None));
        let inner = seen.clone();
        let mut option = Opt::short('c').call(move |_: &Key, text: &str| {
            inner.borrow_mut().replace(text.to_string());
            Reaction::Continue
        });

        option.process().unwrap();
        assert_eq!(seen.borrow().as_deref(), Some(""));
    }

    #[test]
    fn process_callback_terminate() {
        let mut option =
            Opt::short('q').call(|_: &Key, _: &str| Reaction::Terminate(Termination::success("done")));

        let error = option.process().unwrap_err();
        assert_eq!(error, ParseError::Terminate(Termination::success("done")));
    }

    #[test]
    fn conversion_leaves_effects() {
        let mut value: i32 = 3;
        let flag = Cell::new(false);
        let mut option = Opt::short('n').stow(&mut value).toggle(&flag, true);

        assert_matches!(option.process_with("x"), Err(ParseError::Conversion(_)));
        drop(option);
        assert_eq!(value, 3);
        assert!(!flag.get());
    }

    #[test]
    fn once_without_set() {
        let flag = Cell::new(false);
        let option = Opt::short('a').toggle(&flag, true).once(0);

        let error = option.validate().unwrap_err();
        assert_contains!(error.message(), "without a preceding set()");
    }

    #[rstest]
    #[case(Opt::new('n', "number"), HelpStyle::Dashed, "-n, --number")]
    #[case(Opt::short('n'), HelpStyle::Dashed, "-n")]
    #[case(Opt::long("number"), HelpStyle::Dashed, "    --number")]
    #[case(Opt::new('n', "number").store(Discard), HelpStyle::Dashed, "-n, --number=NUMBER")]
    #[case(Opt::new('n', "dry-run").store(Discard).optional("1"), HelpStyle::Dashed, "-n, --dry-run[=DRY_RUN]")]
    #[case(Opt::short('n').store(Discard), HelpStyle::Dashed, "-n=VALUE")]
    #[case(Opt::short('n').store(Discard).help_word("INT"), HelpStyle::Dashed, "-n=INT")]
    #[case(Opt::new('n', "number"), HelpStyle::Bare, "n, number")]
    #[case(Opt::long("number").store(Discard), HelpStyle::Bare, "number=NUMBER")]
    #[case(Opt::short('n').store(Discard).optional("1"), HelpStyle::Bare, "n[=VALUE]")]
    fn usage(#[case] option: Opt, #[case] style: HelpStyle, #[case] expected: &str) {
        assert_eq!(option.usage(style), expected);
    }

    #[test]
    fn description_default() {
        let mut value: f32 = 2.5;
        let option = Opt::short('r').stow(&mut value).help("The rate.").show_default();
        assert_eq!(option.description(), "The rate. (default: 2.5)");

        // Without a value there is nothing to show.
        let option = Opt::short('r').help("The rate.").show_default();
        assert_eq!(option.description(), "The rate.");
    }
}
