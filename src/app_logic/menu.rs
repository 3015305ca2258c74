/*
 * Menu choices and the state machine that drives the interactive loop.
 *
 * The loop starts in `AwaitingChoice`. A raw token that parses as one of the
 * four choices moves it to `Dispatching`; anything else is rejected with an
 * `InvalidMenuInput` and the state is unchanged. After a dispatch the loop
 * returns to `AwaitingChoice`, except for `Exit`, which leads to `Terminated`.
 * `Terminated` has no outgoing transitions.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Search,
    ListFrequencies,
    Histogram,
    Exit,
}

impl MenuChoice {
    pub fn from_number(number: i64) -> Option<Self> {
        match number {
            1 => Some(MenuChoice::Search),
            2 => Some(MenuChoice::ListFrequencies),
            3 => Some(MenuChoice::Histogram),
            4 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidMenuInput {
    NotNumeric(String),
    OutOfRange(i64),
}

impl std::fmt::Display for InvalidMenuInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidMenuInput::NotNumeric(raw) => write!(f, "'{raw}' is not a number"),
            InvalidMenuInput::OutOfRange(n) => write!(f, "{n} is not a menu option"),
        }
    }
}

impl std::error::Error for InvalidMenuInput {}

/// Parses one whitespace-free token as a menu choice.
pub fn parse_choice(raw: &str) -> Result<MenuChoice, InvalidMenuInput> {
    let number = raw
        .parse::<i64>()
        .map_err(|_| InvalidMenuInput::NotNumeric(raw.to_string()))?;
    MenuChoice::from_number(number).ok_or(InvalidMenuInput::OutOfRange(number))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    AwaitingChoice,
    Dispatching(MenuChoice),
    Terminated,
}

impl MenuState {
    pub fn is_terminal(self) -> bool {
        self == MenuState::Terminated
    }

    pub fn on_choice_input(self, raw: &str) -> Result<MenuState, InvalidMenuInput> {
        match self {
            MenuState::AwaitingChoice => parse_choice(raw).map(MenuState::Dispatching),
            other => Ok(other),
        }
    }

    pub fn on_dispatched(self) -> MenuState {
        match self {
            MenuState::Dispatching(MenuChoice::Exit) => MenuState::Terminated,
            MenuState::Dispatching(_) => MenuState::AwaitingChoice,
            other => other,
        }
    }

    // Console input ended; nothing more can be read.
    pub fn on_input_closed(self) -> MenuState {
        MenuState::Terminated
    }
}
