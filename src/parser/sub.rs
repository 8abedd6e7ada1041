use crate::api::Opt;
use crate::constant::{DEFAULT_SEPARATOR, VALUE_DELIMITER};
use crate::parser::base::{ConfigError, ParseError, Parser};
use crate::parser::printer::HelpStyle;
use crate::prelude::Value;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A parser of `name=value` clauses, used as the value of a single option.
///
/// Clauses are separated by `,` (see [`SubParser::separator`]) and split on their first `=`.
/// Each clause is matched against the long names (or single character short keys) of the sub-parser's own options,
/// with the same value rules as the top level parser.
///
/// ### Example
/// ```
/// use argot::{Opt, Parser, SubParser};
/// use std::cell::Cell;
///
/// let mut size: u32 = 0;
/// let sync = Cell::new(false);
/// let mut parser = Parser::new();
/// parser
///     .add_option(
///         Opt::new('o', "options").store(
///             SubParser::new()
///                 .add(Opt::long("size").stow(&mut size))
///                 .add(Opt::long("sync").toggle(&sync, true)),
///         ),
///     )
///     .unwrap();
/// parser.parse(&["program", "-o", "size=4,sync"], false).unwrap();
/// drop(parser);
///
/// assert_eq!(size, 4);
/// assert!(sync.get());
/// ```
pub struct SubParser<'ap> {
    parser: Parser<'ap>,
    separator: char,
    deferred_error: Option<ConfigError>,
}

impl<'ap> std::fmt::Debug for SubParser<'ap> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubParser")
            .field("separator", &self.separator)
            .field("parser", &self.parser)
            .finish()
    }
}

impl<'ap> Default for SubParser<'ap> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'ap> SubParser<'ap> {
    /// Create an empty sub-parser.
    pub fn new() -> Self {
        Self {
            parser: Parser::with_style(HelpStyle::Bare),
            separator: DEFAULT_SEPARATOR,
            deferred_error: None,
        }
    }

    /// Use `separator` between the clauses.
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Add an option, matched by the clauses.
    ///
    /// A short key and a single character long name are the same clause, so they may not repeat each other.
    pub fn add(mut self, option: Opt<'ap>) -> Self {
        let result = self
            .check_clause(&option)
            .and_then(|()| self.parser.add_option(option));
        self.defer(result);
        self
    }

    /// Add a free text line to the help.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.parser.add_text(text);
        self
    }

    /// Add the `help` clause, which stops the parse with the help of this sub-parser.
    pub fn help_option(mut self) -> Self {
        let result = self.parser.add_opt_help();
        self.defer(result);
        self
    }

    /// Fix the width of the help.
    pub fn width(mut self, width: usize) -> Self {
        self.parser.set_width(Some(width));
        self
    }

    /// The underlying parser.
    pub fn parser(&self) -> &Parser<'ap> {
        &self.parser
    }

    /// The underlying parser, mutably (ex: to add or remove options after construction).
    pub fn parser_mut(&mut self) -> &mut Parser<'ap> {
        &mut self.parser
    }

    /// Render the help of the clauses.
    pub fn get_help(&self) -> String {
        self.parser.get_help()
    }

    fn defer(&mut self, result: Result<(), ConfigError>) {
        if let Err(error) = result {
            if self.deferred_error.is_none() {
                self.deferred_error.replace(error);
            }
        }
    }

    fn check_clause(&self, option: &Opt<'ap>) -> Result<(), ConfigError> {
        let key = option.key();

        if let Some(short) = key.short() {
            if self.parser.position_long(&short.to_string()).is_some() {
                return Err(ConfigError(format!(
                    "Cannot duplicate the clause name '{short}'."
                )));
            }
        }

        if let Some(long) = key.long() {
            let mut characters = long.chars();

            if let (Some(single), None) = (characters.next(), characters.next()) {
                if self.parser.position_short(single).is_some() {
                    return Err(ConfigError(format!(
                        "Cannot duplicate the clause name '{long}'."
                    )));
                }
            }
        }

        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        if let Some(position) = self.parser.position_long(name) {
            return Some(position);
        }

        let mut characters = name.chars();

        match (characters.next(), characters.next()) {
            (Some(single), None) => self.parser.position_short(single),
            _ => None,
        }
    }
}

impl<'ap> Value for SubParser<'ap> {
    fn set(&mut self, text: &str) -> Result<(), ParseError> {
        // A trailing separator is ignored, but an empty clause elsewhere is looked up (and fails).
        for clause in text.split_terminator(self.separator) {
            let (name, value) = match clause.split_once(VALUE_DELIMITER) {
                Some((name, value)) => (name, Some(value)),
                None => (clause, None),
            };

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Sub-parser clause '{name}' with value {value:?}.");
            }

            // Unknown clauses are never ignored.
            let position = self
                .position(name)
                .ok_or_else(|| ParseError::UnknownOption(name.to_string()))?;
            self.parser.invoke(position, value)?;
        }

        Ok(())
    }

    fn to_display(&self) -> String {
        self.parser
            .options()
            .iter()
            .filter(|option| option.builtin().is_none())
            .filter_map(|option| {
                option
                    .display_value()
                    .map(|value| format!("{}{VALUE_DELIMITER}{value}", option.key().label()))
            })
            .collect::<Vec<String>>()
            .join(&self.separator.to_string())
    }

    fn type_name(&self) -> String {
        "sub-options".to_string()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match &self.deferred_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
