// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;

use crate::options::NumberMode;

#[derive(Debug, Clone, Default)]
struct Exponent {
    negative: bool,
    signed: bool,
    digits: String,
}

/// Accumulates a number literal across writes.
///
/// Grammar: optional `-`, digits, optional `.` and digits, optional `e`/`E`
/// with an optional sign and digits. The digits are kept as text so either
/// [`NumberMode`] can be applied when the number ends.
#[derive(Debug, Clone, Default)]
pub(crate) struct NumberDecoder {
    negative: bool,
    integer: String,
    fraction: Option<String>,
    exponent: Option<Exponent>,
}

impl NumberDecoder {
    /// Starts a number with its first character, `-` or a digit.
    pub fn new(first: char) -> Self {
        let mut number = Self::default();
        if first == '-' {
            number.negative = true;
        } else {
            number.integer.push(first);
        }
        number
    }

    /// Feeds the next character. Returns `false` if `c` cannot continue the
    /// number, in which case nothing was consumed.
    pub fn push(&mut self, c: char) -> bool {
        match c {
            '0'..='9' => {
                if let Some(exponent) = &mut self.exponent {
                    exponent.digits.push(c);
                } else if let Some(fraction) = &mut self.fraction {
                    fraction.push(c);
                } else {
                    self.integer.push(c);
                }
                true
            }
            '.' if self.fraction.is_none() && self.exponent.is_none() => {
                self.fraction = Some(String::new());
                true
            }
            'e' | 'E' if self.exponent.is_none() => {
                self.exponent = Some(Exponent::default());
                true
            }
            '-' | '+' => match &mut self.exponent {
                Some(exponent) if !exponent.signed && exponent.digits.is_empty() => {
                    exponent.signed = true;
                    exponent.negative = c == '-';
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    /// Produces the final value.
    pub fn finish(self, mode: NumberMode) -> f64 {
        match mode {
            NumberMode::Exact => self.parse_exact(),
            NumberMode::Accumulate => self.accumulate(),
        }
    }

    fn parse_exact(&self) -> f64 {
        let fraction = self.fraction.as_deref().unwrap_or_default();
        let (exponent_negative, exponent) = match &self.exponent {
            Some(exponent) => (exponent.negative, exponent.digits.as_str()),
            None => (false, ""),
        };

        let mut text = String::with_capacity(
            self.integer.len() + fraction.len() + exponent.len() + 8,
        );
        if self.negative {
            text.push('-');
        }
        push_digits_or_zero(&mut text, &self.integer);
        text.push('.');
        push_digits_or_zero(&mut text, fraction);
        text.push('e');
        if exponent_negative {
            text.push('-');
        }
        push_digits_or_zero(&mut text, exponent);

        // Always of the form -?D.De-?D, which the float parser accepts
        text.parse().unwrap_or(f64::NAN)
    }

    fn accumulate(&self) -> f64 {
        let mut value = 0.0f64;
        for digit in digit_values(&self.integer) {
            value = value * 10.0 + digit;
        }
        if let Some(fraction) = &self.fraction {
            for (position, digit) in (1i32..).zip(digit_values(fraction)) {
                value += 10f64.powi(-position) * digit;
            }
        }
        if let Some(exponent) = &self.exponent {
            let power = exponent.digits.bytes().fold(0i32, |acc, b| {
                acc.saturating_mul(10).saturating_add(i32::from(b - b'0'))
            });
            if power != 0 {
                let power = if exponent.negative { -power } else { power };
                value *= 10f64.powi(power);
            }
        }
        if self.negative {
            -value
        } else {
            value
        }
    }
}

fn push_digits_or_zero(text: &mut String, digits: &str) {
    if digits.is_empty() {
        text.push('0');
    } else {
        text.push_str(digits);
    }
}

fn digit_values(digits: &str) -> impl Iterator<Item = f64> + '_ {
    digits.bytes().map(|b| f64::from(b - b'0'))
}
