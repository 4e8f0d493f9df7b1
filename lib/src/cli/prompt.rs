//! Interactive prediction loop.
//!
//! Reads one mileage per line and answers with the estimated price until the
//! user types `quit`/`exit` or input ends. Bad lines are answered and the
//! prompt repeats; they never end the session.

use crate::error::{RegressionError, Result};
use crate::model::{Fitted, InferenceModel, LinearModel};
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "Enter mileage (km): ";
pub const INVALID_NUMBER: &str = "Please enter a valid number.";
pub const NEGATIVE_MILEAGE: &str = "Mileage must be 0 or greater.";

/// Parses a user-supplied mileage.
///
/// # Errors
/// [`RegressionError::InvalidValue`] carrying a message fit to show the user:
/// [`INVALID_NUMBER`] for text that is not a finite number,
/// [`NEGATIVE_MILEAGE`] for values below zero.
pub fn parse_mileage(text: &str) -> Result<f64> {
    let mileage: f64 = text
        .trim()
        .parse()
        .map_err(|_| RegressionError::InvalidValue(INVALID_NUMBER.to_string()))?;
    if !mileage.is_finite() {
        return Err(RegressionError::InvalidValue(INVALID_NUMBER.to_string()));
    }
    if mileage < 0.0 {
        return Err(RegressionError::InvalidValue(NEGATIVE_MILEAGE.to_string()));
    }
    Ok(mileage)
}

fn is_quit(text: &str) -> bool {
    text.eq_ignore_ascii_case("quit") || text.eq_ignore_ascii_case("exit")
}

/// Runs the loop over `input`, writing prompts and answers to `output`.
///
/// `on_estimate` is called with `(mileage, price)` after every successful
/// prediction. Returns the number of predictions made.
pub fn run_prompt<R, W, F>(
    mut input: R,
    output: &mut W,
    model: &LinearModel<Fitted>,
    mut on_estimate: F,
) -> io::Result<usize>
where
    R: BufRead,
    W: Write,
    F: FnMut(f64, f64),
{
    writeln!(output, "=== Car Price Prediction ===")?;
    writeln!(output, "Enter a mileage to estimate its price; 'quit' to leave.")?;
    writeln!(output)?;

    let mut answered = 0;
    let mut line = String::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // EOF
            writeln!(output)?;
            break;
        }
        let text = line.trim();
        if is_quit(text) {
            break;
        }

        match parse_mileage(text) {
            Ok(mileage) => {
                let price = model.predict(&mileage);
                writeln!(output, "Predicted price: {:.2}", price)?;
                writeln!(output)?;
                answered += 1;
                on_estimate(mileage, price);
            }
            Err(RegressionError::InvalidValue(msg)) => writeln!(output, "{}", msg)?,
            Err(e) => writeln!(output, "Error: {}", e)?,
        }
    }

    writeln!(output, "Program terminated.")?;
    Ok(answered)
}
