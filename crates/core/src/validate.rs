//! Precondition checks run before a value is accepted.
//!
//! Every check is synchronous and fails on the first violation with
//! [`FilterError::InvalidArgument`].

use std::fmt;
use std::ops::Bound;

use crate::error::{FilterError, Result};

/// Fails unless `min <= value <= max`.
pub fn check_range<T>(option: &str, value: T, min: T, max: T) -> Result<T>
where
    T: PartialOrd + fmt::Display + Copy,
{
    // Written as a negated conjunction so NaN is rejected.
    if !(value >= min && value <= max) {
        return Err(FilterError::invalid_argument(
            option,
            format!("must be in [{min}, {max}], got {value}"),
        ));
    }
    Ok(value)
}

/// Fails when `value` is empty or only whitespace.
pub fn check_not_empty<'a>(option: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(FilterError::invalid_argument(option, "must not be empty"));
    }
    Ok(value)
}

/// Fails with `message` when `predicate` rejects `value`.
pub fn check_predicate<T>(
    option: &str,
    value: T,
    predicate: impl FnOnce(&T) -> bool,
    message: &str,
) -> Result<T> {
    if !predicate(&value) {
        return Err(FilterError::invalid_argument(option, message));
    }
    Ok(value)
}

/// Declared numeric constraint of an option.
///
/// `unset` is a sentinel meaning "let ffmpeg pick the default". It bypasses
/// the bounds only when declared here; a sentinel that merely happens to be
/// out of range is rejected like any other value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBounds<T> {
    pub min: Bound<T>,
    pub max: Bound<T>,
    pub unset: Option<T>,
}

impl<T: Copy> NumericBounds<T> {
    /// No constraint at all.
    pub const fn any() -> Self {
        Self {
            min: Bound::Unbounded,
            max: Bound::Unbounded,
            unset: None,
        }
    }

    /// `[min, max]`.
    pub const fn inclusive(min: T, max: T) -> Self {
        Self {
            min: Bound::Included(min),
            max: Bound::Included(max),
            unset: None,
        }
    }

    /// `[min, +inf)`.
    pub const fn at_least(min: T) -> Self {
        Self {
            min: Bound::Included(min),
            max: Bound::Unbounded,
            unset: None,
        }
    }

    /// `(min, max]`.
    pub const fn above(min: T, max: T) -> Self {
        Self {
            min: Bound::Excluded(min),
            max: Bound::Included(max),
            unset: None,
        }
    }

    /// Declares `sentinel` as the per-option "unset" value.
    pub const fn with_unset(mut self, sentinel: T) -> Self {
        self.unset = Some(sentinel);
        self
    }
}

impl<T: fmt::Display> fmt::Display for NumericBounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.min {
            Bound::Included(min) => write!(f, "[{min}, ")?,
            Bound::Excluded(min) => write!(f, "({min}, ")?,
            Bound::Unbounded => f.write_str("(-inf, ")?,
        }
        match &self.max {
            Bound::Included(max) => write!(f, "{max}]")?,
            Bound::Excluded(max) => write!(f, "{max})")?,
            Bound::Unbounded => f.write_str("+inf)")?,
        }
        if let Some(unset) = &self.unset {
            write!(f, " or {unset} for unset")?;
        }
        Ok(())
    }
}

/// Fails unless `value` satisfies `bounds` or equals its declared sentinel.
pub fn check_bounds<T>(option: &str, value: T, bounds: &NumericBounds<T>) -> Result<T>
where
    T: PartialOrd + fmt::Display + Copy,
{
    if bounds.unset.is_some_and(|sentinel| sentinel == value) {
        return Ok(value);
    }

    // NaN is unordered even against itself.
    let comparable = value.partial_cmp(&value).is_some();
    let above_min = match bounds.min {
        Bound::Included(min) => value >= min,
        Bound::Excluded(min) => value > min,
        Bound::Unbounded => true,
    };
    let below_max = match bounds.max {
        Bound::Included(max) => value <= max,
        Bound::Excluded(max) => value < max,
        Bound::Unbounded => true,
    };

    if !(comparable && above_min && below_max) {
        return Err(FilterError::invalid_argument(
            option,
            format!("must be in {bounds}, got {value}"),
        ));
    }
    Ok(value)
}

/// A named, pure predicate over text input.
#[derive(Clone, Copy)]
pub struct Rule {
    pub description: &'static str,
    pub predicate: fn(&str) -> bool,
}

impl Rule {
    pub const fn new(description: &'static str, predicate: fn(&str) -> bool) -> Self {
        Self {
            description,
            predicate,
        }
    }

    /// Applies the rule, reporting its description on failure.
    pub fn check<'a>(&self, option: &str, value: &'a str) -> Result<&'a str> {
        check_predicate(option, value, |v| (self.predicate)(v), self.description)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("description", &self.description)
            .finish()
    }
}
