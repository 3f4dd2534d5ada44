//! # Employee Codes
//!
//! HR assigns each employee a sequential code such as `EMP-0042`: an
//! uppercase alphanumeric prefix, a hyphen, and a zero-padded sequence.
//! The next code is one past the highest sequence already issued for the
//! prefix. Codes under other prefixes, or with a non-numeric tail, are
//! ignored when computing the next one.

use crate::error::OrgError;
use crate::hierarchy::Employee;

/// Default prefix for employee codes.
pub const DEFAULT_PREFIX: &str = "EMP";

/// Default zero-padded width of the numeric sequence.
pub const DEFAULT_WIDTH: usize = 4;

/// Validated employee code format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeCodeFormat {
    prefix: String,
    width: usize,
}

impl Default for EmployeeCodeFormat {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            width: DEFAULT_WIDTH,
        }
    }
}

impl EmployeeCodeFormat {
    /// Create a format. The prefix is upper-cased.
    pub fn new(prefix: &str, width: usize) -> Result<Self, OrgError> {
        let prefix = prefix.trim();
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(OrgError::InvalidCodePrefix(prefix.to_string()));
        }
        if width == 0 {
            return Err(OrgError::InvalidCodeWidth);
        }
        Ok(Self {
            prefix: prefix.to_ascii_uppercase(),
            width,
        })
    }

    /// The normalized prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The zero-padded width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Render the code for a sequence number.
    pub fn format(&self, sequence: u32) -> String {
        format!("{}-{:0width$}", self.prefix, sequence, width = self.width)
    }

    /// Extract the sequence number of a code issued under this prefix.
    ///
    /// The prefix comparison is case-insensitive; the tail must be all
    /// ASCII digits.
    pub fn parse(&self, code: &str) -> Option<u32> {
        let (prefix, digits) = code.trim().split_once('-')?;
        if !prefix.eq_ignore_ascii_case(&self.prefix) {
            return None;
        }
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    /// The code after the highest sequence in `existing`.
    pub fn next_code<'a, I>(&self, existing: I) -> Result<String, OrgError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let highest = existing
            .into_iter()
            .filter_map(|code| self.parse(code))
            .max()
            .unwrap_or(0);
        let next = highest
            .checked_add(1)
            .ok_or_else(|| OrgError::CodeSequenceExhausted {
                prefix: self.prefix.clone(),
            })?;
        Ok(self.format(next))
    }

    /// The next code given the codes already assigned in an employee snapshot.
    pub fn next_for_snapshot(&self, employees: &[Employee]) -> Result<String, OrgError> {
        self.next_code(employees.iter().filter_map(|e| e.employee_code.as_deref()))
    }
}
