// Console text shown by the menu session.

pub const MENU_BANNER_RULE: &str = "=============================================";
pub const MENU_TITLE: &str = " Corner Grocer Item Tracking Menu";
pub const MENU_OPTIONS: [&str; 4] = [
    "1. Search for an item",
    "2. Print all item frequencies",
    "3. Print all item histogram",
    "4. Exit",
];
pub const MENU_FOOTER_RULE: &str = "---------------------------------------------";
pub const CHOICE_PROMPT: &str = "Enter your choice (1-4): ";

pub const SEARCH_PROMPT: &str = "Enter the item you wish to search for: ";
pub const FREQUENCY_LIST_HEADER: &str = "--- All Item Frequencies ---";
pub const HISTOGRAM_HEADER: &str = "--- All Item Histogram ---";
pub const FAREWELL_MESSAGE: &str = "Exiting program. Goodbye!";

pub const INVALID_INPUT_MESSAGE: &str = "Invalid input. Please enter a number.";
pub const INVALID_CHOICE_MESSAGE: &str = "Invalid choice. Please enter a number between 1 and 4.";
