use terminal_size::{terminal_size, Width};
use thiserror::Error;

use crate::api::{Argument, Builtin, Opt};
use crate::constant::*;
use crate::model::Termination;
use crate::parser::interface::{ConsoleInterface, UserInterface};
use crate::parser::printer::{self, HelpLine, HelpStyle};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// A token (or value) paired with the index of the token it came from.
pub(crate) type OffsetValue = (usize, String);

/// A registration mistake, such as a repeated option key.
/// These are programmer errors, surfaced when the parser is configured rather than when it parses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

impl ConfigError {
    /// The description of the mistake.
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// A token could not be converted to the type of its value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("error converting '{token}' to {type_name}")]
pub struct ConversionError {
    /// The offending text.
    pub token: String,
    /// The logical type the text was meant to convert to.
    pub type_name: String,
}

impl ConversionError {
    /// Create a conversion error for `token` targeting `type_name`.
    pub fn new(token: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            type_name: type_name.into(),
        }
    }
}

/// Why a matched option could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionFault {
    /// The option requires a value, but none was given.
    #[error("missing value")]
    MissingValue,
    /// The option takes no value, but one was given.
    #[error("unwanted value '{0}'")]
    UnwantedValue(String),
    /// A set-once effect found its variable already set.
    #[error("cannot re-set")]
    CannotReset,
    /// The option's callback rejected the match.
    #[error("callback error")]
    Callback,
}

/// Why the positional arguments could not be bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentFault {
    /// The number of positional tokens differs from the number of declared arguments.
    #[error("expected {expected} positional argument(s), but {provided} were provided")]
    Count {
        /// The number of declared arguments.
        expected: usize,
        /// The number of positional tokens.
        provided: usize,
    },
    /// The argument has no value to store into.
    #[error("no place to store argument '{0}'")]
    NoSink(String),
}

/// The ways `parse` can stop short.
///
/// Every variant aborts the remainder of the parse.
/// Side effects applied before the failure are not undone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A value could not be converted.
    #[error("Parse error: {0}.")]
    Conversion(#[from] ConversionError),
    /// A matched option could not be processed.
    #[error("Parse error: {cause} for option: {option}.")]
    Option {
        /// The label of the option (its long name, otherwise its short key).
        option: String,
        /// What went wrong.
        cause: OptionFault,
    },
    /// An option token did not match any option (and unknown options were not being ignored).
    #[error("Parse error: unknown option: {0}.")]
    UnknownOption(String),
    /// The positional arguments could not be bound.
    #[error("Parse error: {0}.")]
    MissingArgument(ArgumentFault),
    /// Not a failure: the program was asked to exit (ex: `--help`).
    #[error("Termination requested (exit code {}).", .0.code)]
    Terminate(Termination),
}

/// The option parser.
///
/// Owns the registered options/arguments and tokenizes the command line against them.
/// Configure via [`CommandLineParser`](crate::CommandLineParser), or directly with the `add_*` methods.
///
/// ### Example
/// ```
/// use argot::{Opt, Parser};
///
/// let mut count: u32 = 0;
/// let mut parser = Parser::new();
/// parser.add_option(Opt::new('c', "count").stow(&mut count)).unwrap();
/// parser.parse(&["program", "-c", "3"], false).unwrap();
/// drop(parser);
///
/// assert_eq!(count, 3);
/// ```
pub struct Parser<'ap> {
    header: String,
    version: String,
    program: Option<String>,
    options: Vec<Opt<'ap>>,
    arguments: Vec<Argument<'ap>>,
    help_lines: Vec<HelpLine>,
    positional: Vec<OffsetValue>,
    style: HelpStyle,
    width: Option<usize>,
    pub(crate) user_interface: Box<dyn UserInterface>,
}

impl<'ap> std::fmt::Debug for Parser<'ap> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("program", &self.program)
            .field("options", &self.options.len())
            .field("arguments", &self.arguments.len())
            .finish()
    }
}

impl<'ap> Default for Parser<'ap> {
    fn default() -> Self {
        Self::with_style(HelpStyle::Dashed)
    }
}

impl<'ap> Parser<'ap> {
    /// Create an empty parser.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_style(style: HelpStyle) -> Self {
        Self {
            header: String::default(),
            version: String::default(),
            program: None,
            options: Vec::default(),
            arguments: Vec::default(),
            help_lines: Vec::default(),
            positional: Vec::default(),
            style,
            width: None,
            user_interface: Box::new(ConsoleInterface::default()),
        }
    }

    /// Register an option.
    ///
    /// Fails if the option has neither a short key nor a long name, repeats a key/name already registered,
    /// or its value reports a configuration mistake.
    pub fn add_option(&mut self, option: Opt<'ap>) -> Result<(), ConfigError> {
        option.validate()?;
        let key = option.key().clone();

        if let Some(short) = key.short() {
            if self.find_key(short).is_some() {
                return Err(ConfigError(format!(
                    "Cannot duplicate the option key '{short}'."
                )));
            }
        }

        if let Some(long) = key.long() {
            if self.find_name(long).is_some() {
                return Err(ConfigError(format!(
                    "Cannot duplicate the option name '{long}'."
                )));
            }
        }

        if !option.is_hidden() {
            self.help_lines.push(HelpLine::Opt(key));
        }

        self.options.push(option);
        Ok(())
    }

    /// Register a positional argument.
    /// The order of registration is the positional order.
    pub fn add_argument(&mut self, argument: Argument<'ap>) -> Result<(), ConfigError> {
        argument.validate()?;

        if self.find_argument(argument.name()).is_some() {
            return Err(ConfigError(format!(
                "Cannot duplicate the argument '{}'.",
                argument.name()
            )));
        }

        if !argument.is_hidden() {
            self.help_lines
                .push(HelpLine::Argument(argument.name().to_string()));
        }

        self.arguments.push(argument);
        Ok(())
    }

    /// Add a free text line to the help, in between the option/argument lines.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.help_lines.push(HelpLine::Text(text.into()));
    }

    /// Register the help option (`-h/--help`).
    /// Matching it stops the parse with a [`Termination`] carrying the header and help text.
    pub fn add_opt_help(&mut self) -> Result<(), ConfigError> {
        let option = match self.style {
            HelpStyle::Dashed => Opt::new(HELP_SHORT, HELP_NAME),
            HelpStyle::Bare => Opt::long(HELP_NAME),
        };
        self.add_option(option.help(HELP_MESSAGE).role(Builtin::Help))
    }

    /// Register the version option (`-V/--version`).
    /// Matching it stops the parse with a [`Termination`] carrying `version`.
    pub fn add_opt_version(&mut self, version: impl Into<String>) -> Result<(), ConfigError> {
        self.version = version.into();
        self.add_option(
            Opt::new(VERSION_SHORT, VERSION_NAME)
                .help(VERSION_MESSAGE)
                .role(Builtin::Version),
        )
    }

    /// Find the option with the short key `short`.
    pub fn find_key(&self, short: char) -> Option<&Opt<'ap>> {
        self.position_short(short).map(|i| &self.options[i])
    }

    /// Find the option with the long name `name`.
    pub fn find_name(&self, name: &str) -> Option<&Opt<'ap>> {
        self.position_long(name).map(|i| &self.options[i])
    }

    /// Find the argument named `name`.
    pub fn find_argument(&self, name: &str) -> Option<&Argument<'ap>> {
        self.arguments.iter().find(|a| a.name() == name)
    }

    /// Remove (and return) the option with the short key `short`, along with its help line.
    pub fn remove_key(&mut self, short: char) -> Option<Opt<'ap>> {
        let position = self.position_short(short)?;
        Some(self.remove_option(position))
    }

    /// Remove (and return) the option with the long name `name`, along with its help line.
    pub fn remove_name(&mut self, name: &str) -> Option<Opt<'ap>> {
        let position = self.position_long(name)?;
        Some(self.remove_option(position))
    }

    /// Remove (and return) the argument named `name`, along with its help line.
    pub fn remove_argument(&mut self, name: &str) -> Option<Argument<'ap>> {
        let position = self.arguments.iter().position(|a| a.name() == name)?;
        let argument = self.arguments.remove(position);
        self.help_lines
            .retain(|line| !matches!(line, HelpLine::Argument(n) if n == name));
        Some(argument)
    }

    /// Remove every option, argument and help line.
    pub fn remove_all(&mut self) {
        self.options.clear();
        self.arguments.clear();
        self.help_lines.clear();
    }

    fn remove_option(&mut self, position: usize) -> Opt<'ap> {
        let option = self.options.remove(position);
        let key = option.key();
        self.help_lines
            .retain(|line| !matches!(line, HelpLine::Opt(k) if k == key));
        option
    }

    /// The registered options, in registration order.
    pub fn options(&self) -> &[Opt<'ap>] {
        &self.options
    }

    /// The registered arguments, in positional order.
    pub fn arguments(&self) -> &[Argument<'ap>] {
        &self.arguments
    }

    /// The positional tokens collected by the most recent parse.
    pub fn args(&self) -> Vec<&str> {
        self.positional
            .iter()
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// The program name, captured from the first token of the first parse.
    pub fn program(&self) -> Option<&str> {
        self.program.as_deref()
    }

    /// Set the header, shown above the help text by the help option.
    pub fn set_header(&mut self, text: impl Into<String>) {
        self.header = text.into();
    }

    /// The header.
    pub fn get_header(&self) -> &str {
        &self.header
    }

    /// Fix the width used to wrap the help text.
    /// When unset, the terminal width is used (or no wrapping, if there isn't a terminal).
    pub fn set_width(&mut self, width: Option<usize>) {
        self.width = width;
    }

    /// Render the help text: every help line in registration order, one per line.
    pub fn get_help(&self) -> String {
        let width = self.width.or_else(|| {
            terminal_size().map(|(Width(terminal_width), _)| terminal_width as usize)
        });
        printer::render(
            &self.help_lines,
            &self.options,
            &self.arguments,
            self.style,
            width,
        )
    }

    /// Run the parser against the input tokens.
    ///
    /// The first token is the program name; it is captured (see [`Parser::program`]) but not parsed.
    /// Matched options apply their values, effects and callbacks as they are encountered.
    /// Once all tokens are consumed, the positional tokens are bound to the declared arguments (if any).
    ///
    /// With `ignore_unknown`, unrecognized option tokens are skipped instead of failing the parse.
    pub fn parse(&mut self, tokens: &[&str], ignore_unknown: bool) -> Result<(), ParseError> {
        self.consume(tokens, ignore_unknown)
            .map_err(|(_, error)| error)
    }

    // Errors carry the index of the token at fault.
    pub(crate) fn consume(
        &mut self,
        tokens: &[&str],
        ignore_unknown: bool,
    ) -> Result<(), (usize, ParseError)> {
        self.positional.clear();

        if self.program.is_none() {
            if let Some(program) = tokens.first() {
                self.program.replace(program.to_string());
            }
        }

        let mut cursor = 1;

        while cursor < tokens.len() {
            let offset = cursor;
            self.feed(tokens, &mut cursor, ignore_unknown)
                .map_err(|error| (offset, error))?;
            cursor += 1;
        }

        self.bind_arguments(tokens.len())
    }

    fn feed(
        &mut self,
        tokens: &[&str],
        cursor: &mut usize,
        ignore_unknown: bool,
    ) -> Result<(), ParseError> {
        let token = tokens[*cursor];

        // Find a 'long' option, such as:
        //  --initial
        //  --initial=..
        if let Some(body) = token.strip_prefix(LONG_PREFIX) {
            return self.match_long(body, ignore_unknown);
        }

        // Find 'short' option(s), such as (both -i and -v are example short options):
        //  -i
        //  -i..
        //  -i ..
        //  -vi..
        //  -vi ..
        if let Some(body) = token.strip_prefix(OPTION_PREFIX) {
            return self.match_short(body, tokens, cursor, ignore_unknown);
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Token '{token}' is positional.");
        }

        self.positional.push((*cursor, token.to_string()));
        Ok(())
    }

    fn match_long(&mut self, body: &str, ignore_unknown: bool) -> Result<(), ParseError> {
        let (name, value) = match body.split_once(VALUE_DELIMITER) {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        match self.position_long(name) {
            Some(position) => self.invoke(position, value),
            None if ignore_unknown => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Ignoring unknown option '{LONG_PREFIX}{name}'.");
                }

                Ok(())
            }
            None => Err(ParseError::UnknownOption(format!("{LONG_PREFIX}{name}"))),
        }
    }

    fn match_short(
        &mut self,
        body: &str,
        tokens: &[&str],
        cursor: &mut usize,
        ignore_unknown: bool,
    ) -> Result<(), ParseError> {
        for (index, single) in body.char_indices() {
            let position = match self.position_short(single) {
                Some(position) => position,
                // The rest of the token is abandoned.
                None if ignore_unknown => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Ignoring unknown option '{OPTION_PREFIX}{single}' and the remainder of '{body}'.");
                    }

                    return Ok(());
                }
                None => {
                    return Err(ParseError::UnknownOption(format!(
                        "{OPTION_PREFIX}{single}"
                    )))
                }
            };

            if !self.options[position].takes_value() {
                self.invoke(position, None)?;
                continue;
            }

            // The remainder of the token always wins over the next token.
            let remainder = &body[index + single.len_utf8()..];

            if !remainder.is_empty() {
                return self.invoke(position, Some(remainder));
            }

            if self.options[position].needs_value() && *cursor + 1 < tokens.len() {
                *cursor += 1;
                return self.invoke(position, Some(tokens[*cursor]));
            }

            return self.invoke(position, None);
        }

        Ok(())
    }

    /// Process the option at `position`, then act on its builtin role (if any).
    pub(crate) fn invoke(&mut self, position: usize, text: Option<&str>) -> Result<(), ParseError> {
        let option = &mut self.options[position];

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Matched option {} with value {text:?}.", option.key());
        }

        match text {
            Some(text) => option.process_with(text)?,
            None => option.process()?,
        };

        match option.builtin() {
            Some(Builtin::Help) => Err(ParseError::Terminate(self.help_termination())),
            Some(Builtin::Version) => Err(ParseError::Terminate(Termination::success(
                self.version.clone(),
            ))),
            None => Ok(()),
        }
    }

    fn help_termination(&self) -> Termination {
        match self.style {
            HelpStyle::Dashed => {
                Termination::success(format!("{}\n{}", self.header, self.get_help()))
            }
            HelpStyle::Bare => Termination::success(format!("\n{}", self.get_help())),
        }
    }

    fn bind_arguments(&mut self, end: usize) -> Result<(), (usize, ParseError)> {
        if self.arguments.is_empty() {
            return Ok(());
        }

        if self.positional.len() != self.arguments.len() {
            return Err((
                end,
                ParseError::MissingArgument(ArgumentFault::Count {
                    expected: self.arguments.len(),
                    provided: self.positional.len(),
                }),
            ));
        }

        for (argument, (offset, text)) in self.arguments.iter_mut().zip(self.positional.iter()) {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Binding '{text}' to argument '{}'.", argument.name());
            }

            argument.process(text).map_err(|error| (*offset, error))?;
        }

        Ok(())
    }

    pub(crate) fn position_short(&self, short: char) -> Option<usize> {
        self.options
            .iter()
            .position(|o| o.key().short() == Some(short))
    }

    pub(crate) fn position_long(&self, name: &str) -> Option<usize> {
        self.options
            .iter()
            .position(|o| o.key().long() == Some(name))
    }
}
