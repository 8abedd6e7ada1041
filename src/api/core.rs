use crate::api::Parameter;
use crate::parser::{ConfigError, ConsoleInterface, Parser, UserInterface};

/// The command line parser builder.
///
/// Registration mistakes (ex: a repeated option key) are held back until the parser is built.
///
/// ### Example
/// ```
/// use argot::{Argument, CommandLineParser, Opt};
///
/// let mut name = String::default();
/// let mut times: u32 = 1;
/// let mut parser = CommandLineParser::new()
///     .header("Usage: greet [OPTION]... NAME")
///     .help_option()
///     .add(Opt::new('t', "times").stow(&mut times).help("How many greetings."))
///     .add(Argument::new("name").stow(&mut name))
///     .build();
///
/// parser.parse_tokens(&["greet", "-t", "2", "world"], false).unwrap();
/// drop(parser);
///
/// assert_eq!(name, "world");
/// assert_eq!(times, 2);
/// ```
pub struct CommandLineParser<'ap> {
    parser: Parser<'ap>,
    deferred_error: Option<ConfigError>,
}

impl<'ap> Default for CommandLineParser<'ap> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'ap> CommandLineParser<'ap> {
    /// Create a command line parser.
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            deferred_error: None,
        }
    }

    /// Document the header, shown above the help.
    /// If repeated, only the final header will apply.
    pub fn header(mut self, text: impl Into<String>) -> Self {
        self.parser.set_header(text);
        self
    }

    /// Add a free text line to the help, at this point amongst the options/arguments.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.parser.add_text(text);
        self
    }

    /// Add an option/argument to the command line parser.
    ///
    /// The order of arguments corresponds to their positional order during parsing.
    /// The order of options only affects the help.
    pub fn add(mut self, parameter: impl Into<Parameter<'ap>>) -> Self {
        let result = match parameter.into() {
            Parameter::Opt(option) => self.parser.add_option(option),
            Parameter::Argument(argument) => self.parser.add_argument(argument),
        };
        self.defer(result);
        self
    }

    /// Add the help option (`-h/--help`).
    pub fn help_option(mut self) -> Self {
        let result = self.parser.add_opt_help();
        self.defer(result);
        self
    }

    /// Add the version option (`-V/--version`), which shows `version`.
    pub fn version_option(mut self, version: impl Into<String>) -> Self {
        let result = self.parser.add_opt_version(version);
        self.defer(result);
        self
    }

    /// Fix the width of the help.
    /// By default, the help is fit to the terminal.
    pub fn width(mut self, width: usize) -> Self {
        self.parser.set_width(Some(width));
        self
    }

    fn defer(&mut self, result: Result<(), ConfigError>) {
        if let Err(error) = result {
            // Only the first mistake is reported.
            if self.deferred_error.is_none() {
                self.deferred_error.replace(error);
            }
        }
    }

    pub(crate) fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<Parser<'ap>, ConfigError> {
        if let Some(error) = self.deferred_error {
            return Err(error);
        }

        let mut parser = self.parser;
        parser.set_interface(user_interface);
        Ok(parser)
    }

    /// Build the command line parser as a Result.
    /// This finalizes the configuration and checks for errors (ex: a repeated option key).
    pub fn build_parser(self) -> Result<Parser<'ap>, ConfigError> {
        self.build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Build the command line parser.
    /// This finalizes the configuration and checks for errors (ex: a repeated option key).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> Parser<'ap> {
        match self.build_parser() {
            Ok(parser) => parser,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Argument, Discard, ListValue, Opt};
    use crate::parser::util::{channel_interface, InMemoryInterface};
    use crate::test::assert_contains;
    use rstest::rstest;
    use std::cell::Cell;

    #[test]
    fn empty_build() {
        // Setup
        let clp = CommandLineParser::new();

        // Execute
        let mut parser = clp.build_parser().unwrap();

        // Verify
        parser.parse_tokens(&[], false).unwrap();
        assert_eq!(parser.get_help(), "");
    }

    #[rstest]
    #[case(vec!["program", "x"], false, vec![])]
    #[case(vec!["program", "--items=1", "x"], false, vec![1])]
    #[case(vec!["program", "-f", "--items=01,3,2", "x"], true, vec![1, 3, 2])]
    #[case(vec!["program", "x", "-i", "4", "--flag"], true, vec![4])]
    fn build(
        #[case] tokens: Vec<&str>,
        #[case] expected_flag: bool,
        #[case] expected_items: Vec<u32>,
    ) {
        // Setup
        let flag = Cell::new(false);
        let mut items: Vec<u32> = Vec::default();
        let mut name = String::default();
        let clp = CommandLineParser::new()
            .header("abc def")
            .add(Opt::new('f', "flag").toggle(&flag, true))
            .add(Opt::new('i', "items").store(ListValue::new(&mut items)))
            .add(Argument::new("name").stow(&mut name));

        // Execute
        let mut parser = clp.build_parser().unwrap();

        // Verify
        // We're testing that build sets up the right parser.
        // So the verification involves invoking the parser with the various permutations.
        parser.parse_tokens(tokens.as_slice(), false).unwrap();
        assert_eq!(parser.get_header(), "abc def");
        drop(parser);
        assert_eq!(flag.get(), expected_flag);
        assert_eq!(items, expected_items);
        assert_eq!(name, "x");
    }

    #[rstest]
    #[case(
        CommandLineParser::new().add(Opt::short('a')).add(Opt::short('a')),
        "Cannot duplicate the option key 'a'."
    )]
    #[case(
        CommandLineParser::new().add(Opt::long("abc")).add(Opt::long("abc")).add(Opt::short('a')).add(Opt::short('a')),
        "Cannot duplicate the option name 'abc'."
    )]
    #[case(
        CommandLineParser::new().add(Argument::new("x").store(Discard)).add(Argument::new("x").store(Discard)),
        "Cannot duplicate the argument 'x'."
    )]
    #[case(
        CommandLineParser::new().add(Opt::short('h')).help_option(),
        "Cannot duplicate the option key 'h'."
    )]
    fn build_error(#[case] clp: CommandLineParser, #[case] expected: &str) {
        let error = clp.build_parser().unwrap_err();
        assert_eq!(error.message(), expected);
    }

    #[test]
    fn build_help() {
        // Setup
        let mut level: u32 = 3;
        let clp = CommandLineParser::new()
            .header("Usage: program [OPTION]... FILE")
            .width(80)
            .text("Options:")
            .help_option()
            .add(
                Opt::new('l', "level")
                    .stow(&mut level)
                    .help("The level.")
                    .show_default(),
            )
            .add(Opt::long("secret").hide())
            .text("Arguments:")
            .add(Argument::new("file").store(Discard).help("The file."));
        let (sender, receiver) = channel_interface();

        // Execute
        let mut parser = clp.build_with_interface(Box::new(sender)).unwrap();

        // Verify
        // We're testing that build sets up the right parser.
        // So the verification involves invoking the parser with --help and spot-checking the output.
        let error_code = parser.parse_tokens(&["program", "--help"], false).unwrap_err();
        assert_eq!(error_code, 0);
        drop(parser);

        let message = receiver.consume_message();
        assert_contains!(message, "Usage: program [OPTION]... FILE\nOptions:\n");
        assert_contains!(message, "  -h, --help");
        assert_contains!(message, "display this help list and exit");
        assert_contains!(message, "  -l, --level=LEVEL");
        assert_contains!(message, "The level. (default: 3)");
        assert_contains!(message, "Arguments:\n  FILE");
        assert!(!message.contains("secret"));
    }

    #[test]
    fn build_version() {
        let clp = CommandLineParser::new().version_option("program 1.0.0");
        let interface = InMemoryInterface::default();
        let mut parser = clp
            .build_with_interface(Box::new(interface.clone()))
            .unwrap();

        let error_code = parser.parse_tokens(&["program", "-V"], false).unwrap_err();
        assert_eq!(error_code, 0);
        assert_eq!(interface.consume_message(), "program 1.0.0");
    }
}
