//! Traits which, typically, may be imported without concern: `use argot::prelude::*`.
use std::cell::RefCell;
use std::rc::Rc;

use crate::parser::{ConfigError, ParseError};

/// Behaviour to convert between a `&str` token and a strongly typed variable.
///
/// Every option/argument value is bound through this trait.
/// Implement it to supply your own kind of value (the provided ones are [`Scalar`](crate::Scalar),
/// [`SetValue`](crate::SetValue), [`TermValue`](crate::TermValue), [`ListValue`](crate::ListValue),
/// [`RelValue`](crate::RelValue), [`Discard`](crate::Discard) and [`SubParser`](crate::SubParser)).
// Needs to be imported in order to implement a custom `Value`.
pub trait Value {
    /// Convert `text` into the bound variable.
    ///
    /// Must either fully consume `text` or fail without writing to the variable.
    fn set(&mut self, text: &str) -> Result<(), ParseError>;

    /// Format the bound variable, such that `set(to_display())` reproduces the same state.
    fn to_display(&self) -> String;

    /// The name of the logical type, used in conversion errors.
    fn type_name(&self) -> String;

    /// Report any configuration mistake recorded while building this value.
    /// Checked when the owning option/argument is registered.
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

impl<V: Value + ?Sized> Value for Box<V> {
    fn set(&mut self, text: &str) -> Result<(), ParseError> {
        (**self).set(text)
    }

    fn to_display(&self) -> String {
        (**self).to_display()
    }

    fn type_name(&self) -> String {
        (**self).type_name()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        (**self).validate()
    }
}

/// Shared ownership, for when the caller keeps a handle on the value (ex: to render a `SubParser`'s help).
impl<V: Value + ?Sized> Value for Rc<RefCell<V>> {
    fn set(&mut self, text: &str) -> Result<(), ParseError> {
        self.borrow_mut().set(text)
    }

    fn to_display(&self) -> String {
        self.borrow().to_display()
    }

    fn type_name(&self) -> String {
        self.borrow().type_name()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.borrow().validate()
    }
}

/// Behaviour for declaring the choices of a finite-set value.
// Needs to be imported in order to declare choices.
pub trait Choices<T> {
    /// Declare a choice, along with its help description.
    fn choice(self, variant: T, description: impl Into<String>) -> Self;
}
