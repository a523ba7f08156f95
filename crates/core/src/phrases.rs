//! Built-in phrases. Each constant is also the lookup key for its
//! translations, which ship in `phrases.yml`.

pub const CHOOSE_ONE: &str = "Choose or input blank to exit: ";
pub const CHOOSE_MULTIPLE: &str = "Choose multiple with _Regex_ or input blank to exit: ";
pub const CHOOSE_WRONG: &str = "Wrong choice, dude.";
pub const CHOOSE_BLANK: &str = "(blank)";
pub const CONFIRMED: &str = "Confirmed";
pub const CONFIRM_SELECTION: &str = "Type \"{0}\" to confirm previous selection:";
pub const CANCELED: &str = "Canceled";
pub const NOT_IMPLEMENTED: &str = "Under development.";
pub const PRESS_ANY_KEY: &str = "Press any key to continue.";
pub const RESOURCES: &str = "Resources:";
pub const OPERATIONS: &str = "Operations:";
pub const LOOP_CONTROL: &str = "To pause use [P], to stop use [ESC].";
pub const LOOP_CANCELED: &str = "Execution canceled by user.";
pub const LOOP_PAUSED: &str = "Execution paused by the user. Press any key to continue.";
pub const AVAILABLE_MODULES: &str = "Available modules:";
pub const FINISHED: &str = "Finished.";
pub const FILE_LOAD_ERROR: &str = "There was an error loading the file \"{0}\".";
pub const FILE_CONTENT_INVALID: &str = "The contents of the file \"{0}\" are not valid.";

/// Every built-in phrase, in declaration order.
pub const ALL: [&str; 18] = [
    CHOOSE_ONE,
    CHOOSE_MULTIPLE,
    CHOOSE_WRONG,
    CHOOSE_BLANK,
    CONFIRMED,
    CONFIRM_SELECTION,
    CANCELED,
    NOT_IMPLEMENTED,
    PRESS_ANY_KEY,
    RESOURCES,
    OPERATIONS,
    LOOP_CONTROL,
    LOOP_CANCELED,
    LOOP_PAUSED,
    AVAILABLE_MODULES,
    FINISHED,
    FILE_LOAD_ERROR,
    FILE_CONTENT_INVALID,
];

/// Translations of the phrases above, keyed phrase first, then language.
pub const BUILTIN_TRANSLATIONS: &str = include_str!("phrases.yml");
