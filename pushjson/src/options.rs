// SPDX-License-Identifier: Apache-2.0

/// How numbers are turned into `f64` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberMode {
    /// Keep the digits as text and parse them once when the number ends.
    ///
    /// The result is identical to `str::parse::<f64>` on the same literal.
    #[default]
    Exact,
    /// Fold every digit into a floating-point accumulator as it arrives:
    /// `value * 10 + digit` for integer digits, `digit * 10^-n` for fraction
    /// digits, then scale by `10^exponent`.
    ///
    /// Integers beyond 2^53 and long fractions may differ from the exact
    /// parse by a few ulps.
    Accumulate,
}

/// How `\uXXXX` escapes that encode UTF-16 surrogates are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurrogateMode {
    /// A high surrogate escape directly followed by a low surrogate escape
    /// decodes to one supplementary-plane character. Unpaired halves become
    /// U+FFFD.
    #[default]
    Combine,
    /// Every escape is decoded on its own, so each surrogate half becomes
    /// U+FFFD.
    Independent,
}

/// Runtime configuration for [`PushParser`](crate::PushParser).
///
/// # Examples
///
/// ```rust
/// use pushjson::{Callbacks, NumberMode, ParserOptions, PushParser};
///
/// let options = ParserOptions {
///     number_mode: NumberMode::Accumulate,
///     ..Default::default()
/// };
/// let mut parser = PushParser::with_options(Callbacks::new(), options);
/// parser.end(Some("[1, 2.5]")).unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserOptions {
    /// Number decoding strategy. Defaults to [`NumberMode::Exact`].
    pub number_mode: NumberMode,
    /// Surrogate escape handling. Defaults to [`SurrogateMode::Combine`].
    pub surrogate_mode: SurrogateMode,
}
