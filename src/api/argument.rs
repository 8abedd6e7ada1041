use std::fmt::Display;
use std::str::FromStr;

use crate::api::Scalar;
use crate::parser::{ArgumentFault, ConfigError, ParseError};
use crate::prelude::Value;

/// A required positional argument.
///
/// Arguments are bound, in registration order, to the positional tokens left over once every option is matched.
///
/// ### Example
/// ```
/// use argot::{Argument, Parser};
///
/// let mut source = String::default();
/// let mut count: usize = 0;
/// let mut parser = Parser::new();
/// parser.add_argument(Argument::new("source").stow(&mut source)).unwrap();
/// parser.add_argument(Argument::new("count").stow(&mut count)).unwrap();
/// parser.parse(&["program", "a.txt", "2"], false).unwrap();
/// drop(parser);
///
/// assert_eq!(source, "a.txt");
/// assert_eq!(count, 2);
/// ```
pub struct Argument<'ap> {
    name: String,
    sink: Option<Box<dyn Value + 'ap>>,
    help: String,
    hidden: bool,
}

impl<'ap> std::fmt::Debug for Argument<'ap> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match &self.sink {
            Some(sink) => sink.type_name(),
            None => "-".to_string(),
        };
        write!(f, "Argument[{}, {value}]", self.name)
    }
}

impl<'ap> Argument<'ap> {
    /// Create an argument named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sink: None,
            help: String::default(),
            hidden: false,
        }
    }

    /// Attach the value the positional token is converted into.
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

    /// Document the argument in the help.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help = description.into();
        self
    }

    /// Leave the argument out of the help.
    pub fn hide(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// The argument's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the argument is left out of the help.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        match &self.sink {
            Some(sink) => sink.validate(),
            None => Ok(()),
        }
    }

    /// Bind the positional token `text`.
    pub fn process(&mut self, text: &str) -> Result<(), ParseError> {
        match &mut self.sink {
            Some(sink) => sink.set(text),
            None => Err(ParseError::MissingArgument(ArgumentFault::NoSink(
                self.name.clone(),
            ))),
        }
    }

    pub(crate) fn usage(&self) -> String {
        self.name.to_uppercase()
    }

    pub(crate) fn description(&self) -> String {
        self.help.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process() {
        let mut value: i16 = 0;
        let mut argument = Argument::new("value").stow(&mut value);

        argument.process("-12").unwrap();
        assert_matches!(argument.process("12x"), Err(ParseError::Conversion(_)));
        drop(argument);
        assert_eq!(value, -12);
    }

    #[test]
    fn process_no_sink() {
        let mut argument = Argument::new("value");
        let error = argument.process("x").unwrap_err();
        assert_eq!(error.to_string(), "Parse error: no place to store argument 'value'.");
    }

    #[test]
    fn help_columns() {
        let argument = Argument::new("input-file").help("The file to read.");
        assert_eq!(argument.usage(), "INPUT-FILE");
        assert_eq!(argument.description(), "The file to read.");
        assert!(!argument.is_hidden());
        assert!(Argument::new("x").hide().is_hidden());
    }
}
