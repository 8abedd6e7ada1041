use crate::parser::ParseError;

/// Points at the token where a parse failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ErrorContext {
    tokens: Vec<String>,
    // Index into `tokens`; may be one past the end.
    offset: usize,
}

impl ErrorContext {
    /// `offset` indexes into `tokens`, which includes the program name (not shown).
    pub(crate) fn new(offset: usize, tokens: &[&str]) -> Self {
        Self {
            tokens: tokens.iter().skip(1).map(|t| t.to_string()).collect(),
            offset: offset.saturating_sub(1),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let column: usize = self
            .tokens
            .iter()
            .take(self.offset)
            .map(|t| t.chars().count() + 1)
            .sum();
        writeln!(f, "{}", self.tokens.join(" "))?;
        write!(f, "{:column$}^", "")
    }
}

pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: ParseError);
    fn print_error_context(&self, error_context: ErrorContext);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: ParseError) {
        eprintln!("{error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}

#[cfg(test)]
pub(crate) mod util {
    use crate::parser::{ErrorContext, ParseError, UserInterface};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::mpsc;

    /// Shares its buffers through `Rc`, so a clone can be handed to the parser while the test keeps the other.
    #[derive(Clone, Default)]
    pub(crate) struct InMemoryInterface {
        message: Rc<RefCell<Option<Vec<String>>>>,
        error: Rc<RefCell<Option<String>>>,
        error_context: Rc<RefCell<Option<ErrorContext>>>,
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            // Allows for print() to be called many times, concatenating the messages.
            self.message
                .borrow_mut()
                .get_or_insert_with(Vec::default)
                .push(message);
        }

        fn print_error(&self, error: ParseError) {
            // Assumes print_error() is only ever called once.
            self.error.borrow_mut().replace(error.to_string());
        }

        fn print_error_context(&self, error_context: ErrorContext) {
            // Assumes print_error_context() is only ever called once.
            self.error_context.borrow_mut().replace(error_context);
        }
    }

    impl InMemoryInterface {
        pub(crate) fn consume(&self) -> (Option<String>, Option<String>, Option<ErrorContext>) {
            (
                self.message
                    .borrow_mut()
                    .take()
                    .map(|messages| messages.join("\n")),
                self.error.borrow_mut().take(),
                self.error_context.borrow_mut().take(),
            )
        }

        pub(crate) fn consume_message(&self) -> String {
            let (message, error, error_context) = self.consume();
            assert_eq!(error, None);
            assert_eq!(error_context, None);
            message.unwrap()
        }
    }

    pub(crate) fn channel_interface() -> (SenderInterface, ReceiverInterface) {
        let (message_tx, message_rx) = mpsc::channel();
        let (error_tx, error_rx) = mpsc::channel();
        let sender = SenderInterface {
            message_tx,
            error_tx,
        };
        let receiver = ReceiverInterface {
            message_rx,
            error_rx,
        };
        (sender, receiver)
    }

    pub(crate) struct SenderInterface {
        message_tx: mpsc::Sender<Option<String>>,
        error_tx: mpsc::Sender<Option<String>>,
    }

    impl Drop for SenderInterface {
        fn drop(&mut self) {
            self.message_tx.send(None).unwrap();
            self.error_tx.send(None).unwrap();
        }
    }

    impl UserInterface for SenderInterface {
        fn print(&self, message: String) {
            // Allows for print() to be called many times, with the receiver concatenating the messages.
            self.message_tx.send(Some(message)).unwrap();
        }

        fn print_error(&self, error: ParseError) {
            self.error_tx.send(Some(error.to_string())).unwrap();
        }

        fn print_error_context(&self, error_context: ErrorContext) {
            self.error_tx.send(Some(error_context.to_string())).unwrap();
        }
    }

    pub(crate) struct ReceiverInterface {
        message_rx: mpsc::Receiver<Option<String>>,
        error_rx: mpsc::Receiver<Option<String>>,
    }

    impl ReceiverInterface {
        /// Blocks until the sender is dropped.
        pub(crate) fn consume(self) -> (Option<String>, Option<String>) {
            (drain(self.message_rx), drain(self.error_rx))
        }

        pub(crate) fn consume_message(self) -> String {
            let (message, error) = self.consume();
            assert_eq!(error, None);
            message.unwrap()
        }
    }

    fn drain(receiver: mpsc::Receiver<Option<String>>) -> Option<String> {
        let mut values = Vec::default();

        while let Ok(Some(message)) = receiver.recv() {
            values.push(message);
        }

        if values.is_empty() {
            None
        } else {
            Some(values.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec!["p", "1", "blah"], 2, "1 blah\n  ^")]
    #[case(vec!["p", "blah"], 1, "blah\n^")]
    #[case(vec!["p", "a", "b"], 3, "a b\n    ^")]
    #[case(vec!["p"], 1, "\n^")]
    fn error_context(#[case] tokens: Vec<&str>, #[case] offset: usize, #[case] expected: &str) {
        let error_context = ErrorContext::new(offset, tokens.as_slice());
        assert_eq!(error_context.to_string(), expected);
    }
}
