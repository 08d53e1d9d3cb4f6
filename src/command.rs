//! Command parsing
//!
//! A command line is split on spaces into at most [`MAX_TOKENS`] tokens;
//! the first one names the command, the rest are its arguments. Extra
//! tokens are ignored. Numbers are read C-style: the longest numeric prefix
//! counts and anything unparsable reads as zero.

use heapless::Vec;

use crate::config::MAX_TOKENS;
use crate::registry::RegistryError;

const COMMAND_SET: &str = "set";
const COMMAND_LIST: &str = "list";
const COMMAND_SHOW: &str = "show";
const COMMAND_ADD: &str = "add";
const COMMAND_REMOVE: &str = "remove";
const COMMAND_COLOR: &str = "color";
const COMMAND_RESET: &str = "reset";

/// A parsed command, borrowing names from the input line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command<'a> {
    /// Light the indicator of a screen
    Set { name: &'a str },
    /// Print the screen table
    List,
    /// Print the stored configuration
    Show,
    /// Register or update a screen
    Add { name: &'a str, indicator: i32 },
    /// Unregister a screen
    Remove { name: &'a str },
    /// Fade the indicator to a new color
    Color {
        hue: f32,
        saturation: f32,
        intensity: i32,
    },
    /// Fade back to the default color
    Reset,
}

/// Errors reported back on the command channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    InsufficientParameters,
    UnknownCommand,
    UnknownScreen,
    ScreenListFull,
    NameTooLong,
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let reason = match self {
            CommandError::InsufficientParameters => "Insufficient parameters",
            CommandError::UnknownCommand => "Unknown command",
            CommandError::UnknownScreen => "Unknown screen",
            CommandError::ScreenListFull => "Screen list full",
            CommandError::NameTooLong => "Screen name too long",
        };
        f.write_str(reason)
    }
}

impl From<RegistryError> for CommandError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::CapacityExceeded => CommandError::ScreenListFull,
            RegistryError::NameTooLong => CommandError::NameTooLong,
            RegistryError::EmptyName => CommandError::InsufficientParameters,
        }
    }
}

/// Split a line into at most [`MAX_TOKENS`] space separated tokens
pub fn tokenize(line: &str) -> Vec<&str, MAX_TOKENS> {
    line.split(' ')
        .filter(|token| !token.is_empty())
        .take(MAX_TOKENS)
        .collect()
}

impl<'a> Command<'a> {
    /// Parse one command line
    pub fn parse(line: &'a str) -> Result<Self, CommandError> {
        let tokens = tokenize(line);
        let Some((&name, args)) = tokens.split_first() else {
            return Err(CommandError::UnknownCommand);
        };

        let command = match name {
            COMMAND_SET => {
                let [name, ..] = required::<1>(args)?;
                Command::Set { name }
            }
            COMMAND_LIST => Command::List,
            COMMAND_SHOW => Command::Show,
            COMMAND_ADD => {
                let [name, indicator, ..] = required::<2>(args)?;
                Command::Add {
                    name,
                    indicator: parse_int(indicator),
                }
            }
            COMMAND_REMOVE => {
                let [name, ..] = required::<1>(args)?;
                Command::Remove { name }
            }
            COMMAND_COLOR => {
                let [hue, saturation, intensity] = required::<3>(args)?;
                Command::Color {
                    hue: parse_float(hue),
                    saturation: parse_float(saturation),
                    intensity: parse_int(intensity),
                }
            }
            COMMAND_RESET => Command::Reset,
            _ => return Err(CommandError::UnknownCommand),
        };
        Ok(command)
    }
}

/// Take the first `N` arguments or fail with `InsufficientParameters`
fn required<'a, const N: usize>(args: &[&'a str]) -> Result<[&'a str; N], CommandError> {
    args.first_chunk::<N>()
        .copied()
        .ok_or(CommandError::InsufficientParameters)
}

/// Parse the leading integer of `text`, like C `atoi`
///
/// Values beyond the `i32` range saturate.
pub fn parse_int(text: &str) -> i32 {
    let bytes = text.trim_start().as_bytes();
    let (negative, digits) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, bytes),
    };

    let mut value: i64 = 0;
    for digit in digits.iter().take_while(|b| b.is_ascii_digit()) {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'));
    }
    if negative {
        value = -value;
    }

    i32::try_from(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX))).unwrap_or_default()
}

/// Parse the leading decimal number of `text`, like C `atof`
pub fn parse_float(text: &str) -> f32 {
    let text = text.trim_start();
    text[..float_prefix_len(text.as_bytes())]
        .parse()
        .unwrap_or(0.0)
}

/// Length of the longest `[sign] digits [. digits] [e [sign] digits]` prefix
fn float_prefix_len(bytes: &[u8]) -> usize {
    let count_digits = |from: usize| {
        bytes
            .get(from..)
            .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = count_digits(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(end + 1);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_digits = count_digits(exponent);
        if exponent_digits > 0 {
            end = exponent + exponent_digits;
        }
    }
    end
}
