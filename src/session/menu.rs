//! Menu transitions.

use std::num::IntErrorKind;

use crate::error_handling::InputError;

/// The six menu entries. Every choice returns to the menu except `Exit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    LocateSelf = 1,
    LocateTarget = 2,
    ShowLast = 3,
    SaveLast = 4,
    RenderMap = 5,
    Exit = 6,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::LocateSelf,
        MenuChoice::LocateTarget,
        MenuChoice::ShowLast,
        MenuChoice::SaveLast,
        MenuChoice::RenderMap,
        MenuChoice::Exit,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }
}

impl TryFrom<i64> for MenuChoice {
    type Error = InputError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        MenuChoice::ALL
            .into_iter()
            .find(|choice| i64::from(choice.number()) == value)
            .ok_or(InputError::UnknownMenuChoice(value))
    }
}

/// Parses a menu entry typed by the user.
pub fn parse_menu_choice(input: &str) -> Result<MenuChoice, InputError> {
    MenuChoice::try_from(parse_integer(input.trim())?)
}

/// Parses an integer entry. Values too large for `i64` saturate so they are
/// treated as out of range rather than as non-numbers.
pub(crate) fn parse_integer(trimmed: &str) -> Result<i64, InputError> {
    trimmed.parse().or_else(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => Ok(i64::MAX),
        IntErrorKind::NegOverflow => Ok(i64::MIN),
        _ => Err(InputError::NotANumber(trimmed.to_string())),
    })
}

/// What the session does after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}
