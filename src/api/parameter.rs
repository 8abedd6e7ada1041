use crate::api::{Argument, Opt};

/// Either kind of registration accepted by [`CommandLineParser::add`](crate::CommandLineParser::add).
#[derive(Debug)]
pub enum Parameter<'ap> {
    /// An option (switch).
    Opt(Opt<'ap>),
    /// A positional argument.
    Argument(Argument<'ap>),
}

impl<'ap> From<Opt<'ap>> for Parameter<'ap> {
    fn from(value: Opt<'ap>) -> Self {
        Parameter::Opt(value)
    }
}

impl<'ap> From<Argument<'ap>> for Parameter<'ap> {
    fn from(value: Argument<'ap>) -> Self {
        Parameter::Argument(value)
    }
}
