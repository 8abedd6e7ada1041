use crate::constant::{AUTO_CODE_START, HELP_LIST_MESSAGE, HELP_NAME};
use crate::model::Termination;
use crate::parser::{ConfigError, ConversionError, ParseError};
use crate::prelude::{Choices, Value};

// Width of the "    name: " column in a choice listing.
const LISTING_NAME_WIDTH: usize = 16;

fn listing<'n>(entries: impl Iterator<Item = (&'n str, &'n str)>) -> String {
    entries
        .map(|(name, help)| {
            let label = format!("    {name}: ");
            format!("{label:LISTING_NAME_WIDTH$}{help}\n")
        })
        .collect()
}

fn choice_type_name<'n>(names: impl Iterator<Item = &'n str>) -> String {
    format!("one of [{}]", names.collect::<Vec<&str>>().join(", "))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Element {
    name: String,
    value: i32,
    help: String,
}

/// A value from a finite set of names, stored as the integer code of the matched name.
///
/// Codes may be given explicitly ([`SetValue::choice_valued`]), or allocated automatically ([`Choices::choice`]).
/// Automatic codes start at `-100` and descend, so they never collide with any code already in the set.
///
/// ### Example
/// ```
/// use argot::prelude::*;
/// use argot::SetValue;
///
/// const FAST: i32 = 1;
/// const SAFE: i32 = 2;
///
/// let mut mode: i32 = FAST;
/// let mut value = SetValue::new(&mut mode)
///     .choice_valued("fast", FAST, "Skip the checks.")
///     .choice_valued("safe", SAFE, "Check everything.");
/// value.set("safe").unwrap();
/// assert_eq!(value.to_display(), "safe");
/// drop(value);
///
/// assert_eq!(mode, SAFE);
/// ```
pub struct SetValue<'ap> {
    variable: &'ap mut i32,
    elements: Vec<Element>,
    title: Option<String>,
    deferred_error: Option<ConfigError>,
}

impl<'ap> SetValue<'ap> {
    /// Bind a set value to `variable`.
    pub fn new(variable: &'ap mut i32) -> Self {
        Self {
            variable,
            elements: Vec::default(),
            title: None,
            deferred_error: None,
        }
    }

    /// Declare the choice `name`, stored as the explicit code `value`.
    pub fn choice_valued(
        mut self,
        name: impl Into<String>,
        value: i32,
        help: impl Into<String>,
    ) -> Self {
        let name = name.into();

        if self.elements.iter().any(|e| e.value == value) {
            self.defer(format!("Duplicate value {value} in the set (for '{name}')."));
        }

        self.push(name, value, help.into());
        self
    }

    /// Reserve the choice `help`, which stops the parse with `title` and the listing of every choice.
    pub fn self_documenting(mut self, title: impl Into<String>) -> Self {
        self.title.replace(title.into());
        self.choice(HELP_NAME, HELP_LIST_MESSAGE)
    }

    /// As [`SetValue::self_documenting`], with an explicit code for the `help` choice.
    pub fn self_documenting_valued(mut self, title: impl Into<String>, value: i32) -> Self {
        self.title.replace(title.into());
        self.choice_valued(HELP_NAME, value, HELP_LIST_MESSAGE)
    }

    /// The code of the choice `name`.
    pub fn value_of(&self, name: &str) -> Option<i32> {
        self.find_name(name).map(|e| e.value)
    }

    /// The name of the choice with the code `value`.
    pub fn name_of(&self, value: i32) -> Option<&str> {
        self.find_value(value).map(|e| e.name.as_str())
    }

    /// The help of the choice `name`.
    pub fn help_of(&self, name: &str) -> Option<&str> {
        self.find_name(name).map(|e| e.help.as_str())
    }

    /// The help of the choice with the code `value`.
    pub fn help_for(&self, value: i32) -> Option<&str> {
        self.find_value(value).map(|e| e.help.as_str())
    }

    /// Every choice, one per line, with its help.
    pub fn listing(&self) -> String {
        listing(
            self.elements
                .iter()
                .map(|e| (e.name.as_str(), e.help.as_str())),
        )
    }

    fn find_name(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name == name)
    }

    fn find_value(&self, value: i32) -> Option<&Element> {
        self.elements.iter().find(|e| e.value == value)
    }

    fn next_code(&self) -> Option<i32> {
        let lowest = self
            .elements
            .iter()
            .map(|e| e.value)
            .fold(AUTO_CODE_START + 1, std::cmp::min);

        // Below `i32::MIN` there is nothing left, so fall back to the highest unused code under the start.
        lowest.checked_sub(1).or_else(|| {
            (i32::MIN..=AUTO_CODE_START)
                .rev()
                .find(|code| self.find_value(*code).is_none())
        })
    }

    fn push(&mut self, name: String, value: i32, help: String) {
        if self.find_name(&name).is_some() {
            self.defer(format!("Duplicate choice '{name}' in the set."));
        }

        self.elements.push(Element { name, value, help });
    }

    fn defer(&mut self, message: String) {
        if self.deferred_error.is_none() {
            self.deferred_error.replace(ConfigError(message));
        }
    }
}

impl<'ap, 'n> Choices<&'n str> for SetValue<'ap> {
    fn choice(mut self, variant: &'n str, description: impl Into<String>) -> Self {
        match self.next_code() {
            Some(value) => self.push(variant.to_string(), value, description.into()),
            None => self.defer(format!("No free code left in the set (for '{variant}').")),
        }

        self
    }
}

impl<'ap> Value for SetValue<'ap> {
    fn set(&mut self, text: &str) -> Result<(), ParseError> {
        if let Some(title) = &self.title {
            if text == HELP_NAME {
                return Err(ParseError::Terminate(Termination::success(format!(
                    "\n{title}\n\n{}",
                    self.listing()
                ))));
            }
        }

        let value = self
            .value_of(text)
            .ok_or_else(|| ConversionError::new(text, self.type_name()))?;
        *self.variable = value;
        Ok(())
    }

    fn to_display(&self) -> String {
        match self.name_of(*self.variable) {
            Some(name) => name.to_string(),
            None => self.variable.to_string(),
        }
    }

    fn type_name(&self) -> String {
        choice_type_name(self.elements.iter().map(|e| e.name.as_str()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match &self.deferred_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

/// A value from a finite set of terms, stored as the matched term itself.
///
/// ### Example
/// ```
/// use argot::prelude::*;
/// use argot::TermValue;
///
/// let mut colour = String::from("red");
/// let mut value = TermValue::new(&mut colour)
///     .choice("red", "The warm one.")
///     .choice("blue", "The cool one.");
/// assert!(value.set("green").is_err());
/// value.set("blue").unwrap();
/// drop(value);
///
/// assert_eq!(colour, "blue");
/// ```
pub struct TermValue<'ap> {
    variable: &'ap mut String,
    terms: Vec<(String, String)>,
    title: Option<String>,
    deferred_error: Option<ConfigError>,
}

impl<'ap> TermValue<'ap> {
    /// Bind a term value to `variable`.
    pub fn new(variable: &'ap mut String) -> Self {
        Self {
            variable,
            terms: Vec::default(),
            title: None,
            deferred_error: None,
        }
    }

    /// Reserve the term `help`, which stops the parse with `title` and the listing of every term.
    pub fn self_documenting(mut self, title: impl Into<String>) -> Self {
        self.title.replace(title.into());
        self.choice(HELP_NAME, HELP_LIST_MESSAGE)
    }

    /// The help of the term `term`.
    pub fn help_of(&self, term: &str) -> Option<&str> {
        self.terms
            .iter()
            .find(|(t, _)| t == term)
            .map(|(_, help)| help.as_str())
    }

    /// Every term, one per line, with its help.
    pub fn listing(&self) -> String {
        listing(self.terms.iter().map(|(t, h)| (t.as_str(), h.as_str())))
    }
}

impl<'ap, 'n> Choices<&'n str> for TermValue<'ap> {
    fn choice(mut self, variant: &'n str, description: impl Into<String>) -> Self {
        if self.help_of(variant).is_some() && self.deferred_error.is_none() {
            self.deferred_error.replace(ConfigError(format!(
                "Duplicate term '{variant}' in the set."
            )));
        }

        self.terms.push((variant.to_string(), description.into()));
        self
    }
}

impl<'ap> Value for TermValue<'ap> {
    fn set(&mut self, text: &str) -> Result<(), ParseError> {
        if let Some(title) = &self.title {
            if text == HELP_NAME {
                return Err(ParseError::Terminate(Termination::success(format!(
                    "\n{title}\n\n{}",
                    self.listing()
                ))));
            }
        }

        if self.help_of(text).is_none() {
            return Err(ConversionError::new(text, self.type_name()).into());
        }

        *self.variable = text.to_string();
        Ok(())
    }

    fn to_display(&self) -> String {
        self.variable.clone()
    }

    fn type_name(&self) -> String {
        choice_type_name(self.terms.iter().map(|(t, _)| t.as_str()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match &self.deferred_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
