pub(crate) const OPTION_PREFIX: char = '-';
pub(crate) const LONG_PREFIX: &str = "--";
pub(crate) const VALUE_DELIMITER: char = '=';
pub(crate) const DEFAULT_SEPARATOR: char = ',';

pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const HELP_MESSAGE: &str = "display this help list and exit";
pub(crate) const HELP_LIST_MESSAGE: &str = "show this list";

pub(crate) const VERSION_NAME: &str = "version";
pub(crate) const VERSION_SHORT: char = 'V';
pub(crate) const VERSION_MESSAGE: &str = "print program version and exit";

// Auto-assigned choice codes count down from here.
pub(crate) const AUTO_CODE_START: i32 = -100;
