//! Line-oriented prompt helpers
//!
//! Input is coerced to the expected type and nothing more: amounts must parse
//! as decimals and PINs as unsigned integers.

use crate::types::{BankError, Pin};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Write `prompt`, then read one line of input
///
/// Returns `None` at end of input. The returned line is trimmed.
pub fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<Option<String>, BankError> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Parse a money amount, accepting plain and scientific notation
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

pub fn parse_pin(text: &str) -> Option<Pin> {
    text.trim().parse().ok()
}
