use std::fmt::Display;
use std::str::FromStr;

use crate::constant::DEFAULT_SEPARATOR;
use crate::parser::{ConversionError, ParseError};
use crate::prelude::Value;

/// The name of `T` without its module paths (ex: `Vec<String>` rather than `alloc::vec::Vec<alloc::string::String>`).
pub(crate) fn type_label<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let mut label = String::default();
    let mut path = String::default();

    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            path.push(c);
        } else {
            label.push_str(path.rsplit("::").next().unwrap_or_default());
            path.clear();
            label.push(c);
        }
    }

    label.push_str(path.rsplit("::").next().unwrap_or_default());
    label
}

/// A value of any type `T: FromStr + Display`.
///
/// ### Example
/// ```
/// use argot::prelude::*;
/// use argot::Scalar;
///
/// let mut ratio: f64 = 0.0;
/// let mut value = Scalar::new(&mut ratio);
/// value.set("0.25").unwrap();
/// assert_eq!(value.to_display(), "0.25");
/// assert!(value.set("0.25 ").is_err());
/// ```
pub struct Scalar<'ap, T> {
    variable: &'ap mut T,
}

impl<'ap, T> Scalar<'ap, T> {
    /// Bind a scalar value to `variable`.
    pub fn new(variable: &'ap mut T) -> Self {
        Self { variable }
    }
}

impl<'ap, T> Value for Scalar<'ap, T>
where
    T: FromStr + Display,
{
    fn set(&mut self, text: &str) -> Result<(), ParseError> {
        let value =
            T::from_str(text).map_err(|_| ConversionError::new(text, type_label::<T>()))?;
        *self.variable = value;
        Ok(())
    }

    fn to_display(&self) -> String {
        self.variable.to_string()
    }

    fn type_name(&self) -> String {
        type_label::<T>()
    }
}

/// A separated list of `T`, replacing the bound `Vec` as a whole.
///
/// A trailing separator is ignored, and the empty text sets the empty list.
pub struct ListValue<'ap, T> {
    variable: &'ap mut Vec<T>,
    separator: char,
}

impl<'ap, T> ListValue<'ap, T> {
    /// Bind a list value to `variable`, separated by `,`.
    pub fn new(variable: &'ap mut Vec<T>) -> Self {
        Self {
            variable,
            separator: DEFAULT_SEPARATOR,
        }
    }

    /// Use `separator` between the items.
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }
}

impl<'ap, T> Value for ListValue<'ap, T>
where
    T: FromStr + Display,
{
    fn set(&mut self, text: &str) -> Result<(), ParseError> {
        // All or nothing.
        let values = text
            .split_terminator(self.separator)
            .map(|piece| {
                T::from_str(piece).map_err(|_| ConversionError::new(piece, type_label::<T>()))
            })
            .collect::<Result<Vec<T>, ConversionError>>()?;
        *self.variable = values;
        Ok(())
    }

    fn to_display(&self) -> String {
        self.variable
            .iter()
            .map(|item| item.to_string())
            .collect::<Vec<String>>()
            .join(&self.separator.to_string())
    }

    fn type_name(&self) -> String {
        format!("list of {}", type_label::<T>())
    }
}

/// A number that is either absolute (`3.5`) or relative (`+3.5`).
///
/// ### Example
/// ```
/// use argot::prelude::*;
/// use argot::RelValue;
///
/// let mut amount: f64 = 0.0;
/// let mut relative = false;
/// let mut value = RelValue::new(&mut amount, &mut relative);
/// value.set("+2").unwrap();
/// assert_eq!(value.to_display(), "+2");
/// drop(value);
///
/// assert_eq!(amount, 2.0);
/// assert!(relative);
/// ```
pub struct RelValue<'ap> {
    value: &'ap mut f64,
    relative: &'ap mut bool,
}

impl<'ap> RelValue<'ap> {
    /// Bind a relative value to the number `value` and its flag `relative`.
    pub fn new(value: &'ap mut f64, relative: &'ap mut bool) -> Self {
        Self { value, relative }
    }
}

impl<'ap> Value for RelValue<'ap> {
    fn set(&mut self, text: &str) -> Result<(), ParseError> {
        let (relative, number) = match text.strip_prefix('+') {
            Some(number) => (true, number),
            None => (false, text),
        };
        // Only one '+' marks a relative number; the rest must be an ordinary (possibly negative) number.
        if number.starts_with('+') {
            return Err(ConversionError::new(text, self.type_name()).into());
        }

        let value =
            f64::from_str(number).map_err(|_| ConversionError::new(text, self.type_name()))?;
        *self.value = value;
        *self.relative = relative;
        Ok(())
    }

    fn to_display(&self) -> String {
        if *self.relative {
            format!("+{}", self.value)
        } else {
            self.value.to_string()
        }
    }

    fn type_name(&self) -> String {
        "relative number".to_string()
    }
}

/// Accepts, and drops, any value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl Value for Discard {
    fn set(&mut self, _text: &str) -> Result<(), ParseError> {
        Ok(())
    }

    fn to_display(&self) -> String {
        String::default()
    }

    fn type_name(&self) -> String {
        "anything".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn type_labels() {
        assert_eq!(type_label::<u8>(), "u8");
        assert_eq!(type_label::<String>(), "String");
        assert_eq!(type_label::<Vec<String>>(), "Vec<String>");
        assert_eq!(type_label::<(i32, String)>(), "(i32, String)");
    }

    #[rstest]
    #[case("1", 1)]
    #[case("-1", -1)]
    #[case("+1", 1)]
    #[case("0010", 10)]
    fn scalar(#[case] text: &str, #[case] expected: i64) {
        let mut variable: i64 = 0;
        let mut value = Scalar::new(&mut variable);

        value.set(text).unwrap();
        assert_eq!(value.to_display(), expected.to_string());
        drop(value);
        assert_eq!(variable, expected);
    }

    #[rstest]
    #[case("")]
    #[case(" 1")]
    #[case("1 ")]
    #[case("1x")]
    #[case("1.0")]
    fn scalar_invalid(#[case] text: &str) {
        let mut variable: i64 = 7;
        let mut value = Scalar::new(&mut variable);

        let error = value.set(text).unwrap_err();
        assert_eq!(error, ParseError::Conversion(ConversionError::new(text, "i64")));
        drop(value);
        assert_eq!(variable, 7);
    }

    #[test]
    fn scalar_round_trip() {
        let mut variable: f64 = 0.0;
        let mut value = Scalar::new(&mut variable);
        value.set("3.5").unwrap();
        let display = value.to_display();
        value.set("0").unwrap();
        value.set(&display).unwrap();
        assert_eq!(value.to_display(), "3.5");
    }

    #[rstest]
    #[case("1,2,3", ',', vec![1, 2, 3])]
    #[case("1,2,", ',', vec![1, 2])]
    #[case("1:2", ':', vec![1, 2])]
    #[case("", ',', vec![])]
    #[case("4", ',', vec![4])]
    fn list(#[case] text: &str, #[case] separator: char, #[case] expected: Vec<u32>) {
        let mut variable: Vec<u32> = vec![9];
        let mut value = ListValue::new(&mut variable).separator(separator);

        value.set(text).unwrap();
        drop(value);
        assert_eq!(variable, expected);
    }

    #[test]
    fn list_all_or_nothing() {
        // Setup
        let mut variable: Vec<u32> = vec![9];
        let mut value = ListValue::new(&mut variable);

        // Execute
        let error = value.set("1,x,3").unwrap_err();

        // Verify
        assert_eq!(error, ParseError::Conversion(ConversionError::new("x", "u32")));
        assert_eq!(value.type_name(), "list of u32");
        drop(value);
        assert_eq!(variable, vec![9]);
    }

    #[test]
    fn list_display() {
        let mut variable: Vec<String> = Vec::default();
        let mut value = ListValue::new(&mut variable).separator(';');
        value.set("a;b;c").unwrap();
        assert_eq!(value.to_display(), "a;b;c");
    }

    #[rstest]
    #[case("+3.5", 3.5, true)]
    #[case("3.5", 3.5, false)]
    #[case("-2", -2.0, false)]
    #[case("+-2", -2.0, true)]
    fn rel_value(#[case] text: &str, #[case] expected: f64, #[case] expected_relative: bool) {
        // Setup
        let mut variable: f64 = 0.0;
        let mut relative = !expected_relative;
        let mut value = RelValue::new(&mut variable, &mut relative);

        // Execute
        value.set(text).unwrap();

        // Verify
        assert_eq!(value.to_display(), text);
        drop(value);
        assert_eq!(variable, expected);
        assert_eq!(relative, expected_relative);
    }

    #[rstest]
    #[case("+abc")]
    #[case("++2")]
    #[case("+")]
    fn rel_value_invalid(#[case] text: &str) {
        let mut variable: f64 = 1.0;
        let mut relative = true;
        let mut value = RelValue::new(&mut variable, &mut relative);

        let error = value.set(text).unwrap_err();
        assert_eq!(
            error,
            ParseError::Conversion(ConversionError::new(text, "relative number"))
        );
        drop(value);
        assert_eq!(variable, 1.0);
        assert!(relative);
    }

    #[test]
    fn discard() {
        let mut value = Discard;
        value.set("anything at all").unwrap();
        assert_eq!(value.to_display(), "");
    }
}
