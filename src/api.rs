mod argument;
mod choice;
mod core;
mod field;
mod option;
mod parameter;

pub use self::core::*;
pub use argument::*;
pub use choice::*;
pub use field::*;
pub use option::Opt;
pub(crate) use option::Builtin;
pub use parameter::*;
