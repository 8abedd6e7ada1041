use std::env;

use crate::parser::base::*;
use crate::parser::interface::{ErrorContext, UserInterface};

impl<'ap> Parser<'ap> {
    pub(crate) fn set_interface(&mut self, user_interface: Box<dyn UserInterface>) {
        self.user_interface = user_interface;
    }

    /// Run the parser against the input tokens, reporting the outcome to the user.
    ///
    /// Behaves as [`Parser::parse`], except the outcome is displayed rather than returned:
    /// * A termination (ex: `--help`) displays its message and returns with `Err(code)` (typically `0`).
    /// * An error displays the error along with the tokens, pointing at the one at fault, and returns with `Err(1)`.
    pub fn parse_tokens(&mut self, tokens: &[&str], ignore_unknown: bool) -> Result<(), i32> {
        match self.consume(tokens, ignore_unknown) {
            Ok(()) => Ok(()),
            Err((_, ParseError::Terminate(termination))) => {
                self.user_interface.print(termination.message);
                Err(termination.code)
            }
            Err((offset, parse_error)) => {
                self.user_interface.print_error(parse_error);
                self.user_interface
                    .print_error_context(ErrorContext::new(offset, tokens));
                Err(1)
            }
        }
    }

    /// Run the parser against the Cli [`env::args`].
    ///
    /// Behaves as [`Parser::parse_tokens`], except the process exits (via [`std::process::exit`]) with the
    /// code of any termination or error.
    pub fn parse_env(&mut self, ignore_unknown: bool) {
        let command_input: Vec<String> = env::args().collect();

        match self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
            ignore_unknown,
        ) {
            Ok(()) => {}
            Err(exit_code) => {
                std::process::exit(exit_code);
            }
        };
    }
}
