mod base;
mod interface;
mod middleware;
pub(crate) mod printer;
mod sub;

pub use base::{ArgumentFault, ConfigError, ConversionError, OptionFault, ParseError, Parser};
pub(crate) use interface::{ConsoleInterface, ErrorContext, UserInterface};
pub use sub::SubParser;

#[cfg(test)]
pub(crate) use interface::util;
