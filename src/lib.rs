//! `argot` is a command line option parser for Rust.
//!
//! It converts the raw command line tokens into strongly typed program state, and renders a decorated help.
//! `argot` prioritizes the following design concerns:
//! * *Typed values*:
//! The program never calls a `&str -> T` conversion itself.
//! Every option/argument value is bound to a program variable through the [`Value`](prelude::Value) trait.
//! * *Classic syntax*:
//! Short options (`-v`) may be bundled (`-vq`) and take their value in the same token (`-n5`) or the next (`-n 5`).
//! Long options (`--number`) take their value after an `=` (`--number=5`).
//! * *Nested options*:
//! A [`SubParser`] is itself a value, allowing a single option to take a list of `name=value` clauses
//! (ex: `-o size=4,sync`).
//! * *No surprise exits*:
//! Parsing never exits the program by itself.
//! A request to stop (ex: `--help`) is returned as [`ParseError::Terminate`].
//! Only the convenience wrappers ([`CommandLineParser::build`] and [`Parser::parse_env`]) exit.
//!
//! # Usage
//! ```
//! use argot::{Argument, CommandLineParser, Opt, SetValue};
//! use std::cell::Cell;
//!
//! const LOW: i32 = 0;
//! const HIGH: i32 = 1;
//!
//! let verbose = Cell::new(false);
//! let mut priority: i32 = LOW;
//! let mut count: u32 = 1;
//! let mut target = String::default();
//! let mut parser = CommandLineParser::new()
//!     .header("Usage: deliver [OPTION]... TARGET")
//!     .help_option()
//!     .version_option("deliver 1.0.0")
//!     .add(Opt::new('v', "verbose").toggle(&verbose, true).help("Explain what is being done."))
//!     .add(
//!         Opt::new('p', "priority")
//!             .store(
//!                 SetValue::new(&mut priority)
//!                     .choice_valued("low", LOW, "Whenever.")
//!                     .choice_valued("high", HIGH, "Right now."),
//!             )
//!             .help("How urgent the delivery is."),
//!     )
//!     .add(Opt::new('c', "count").stow(&mut count).show_default())
//!     .add(Argument::new("target").stow(&mut target))
//!     .build();
//!
//! parser
//!     .parse_tokens(&["deliver", "-vc3", "--priority=high", "home"], false)
//!     .unwrap();
//! drop(parser);
//!
//! assert!(verbose.get());
//! assert_eq!(priority, HIGH);
//! assert_eq!(count, 3);
//! assert_eq!(target, "home");
//! ```
//!
//! # Options
//! An [`Opt`] is identified by a short key, a long name, or both.
//! Any combination of the following may be attached:
//! * A value ([`Opt::store`] or [`Opt::stow`]), required by default or optional via [`Opt::optional`].
//! * Flag effects, writing a fixed value into a caller owned [`Cell`](std::cell::Cell) ([`Opt::toggle`], [`Opt::set`]).
//! A set effect may be guarded with [`Opt::once`], making several options mutually exclusive.
//! * A callback ([`Opt::call`]), which may continue, reject, or terminate the parse.
//!
//! Everything attached fires on every match, in the order value, effects, callback.
//! Nothing is undone when a later token fails.
//!
//! # Arguments
//! An [`Argument`] is a required positional parameter.
//! Once all the tokens are matched, the positional tokens must number exactly the declared arguments,
//! and are bound in order.
//!
//! # Values
//! * [`Scalar`]: any `T: FromStr + Display`.
//! * [`ListValue`]: a separated list of `T`.
//! * [`SetValue`]: one name from a finite set, stored as an integer code.
//! * [`TermValue`]: one term from a finite set, stored as the term.
//! * [`RelValue`]: an absolute (`3.5`) or relative (`+3.5`) number.
//! * [`SubParser`]: a list of `name=value` clauses, matched against its own options.
//! * [`Discard`]: accepts anything, and drops it.
#![deny(missing_docs)]
mod api;
mod constant;
mod model;
mod parser;
pub mod prelude;

pub use api::*;
pub use model::*;
pub use parser::{ArgumentFault, ConfigError, ConversionError, OptionFault, ParseError, Parser, SubParser};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
