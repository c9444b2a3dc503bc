use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Prefix every ticket identifier starts with, including the dash.
pub const TICKET_PREFIX: &str = "sc-";

/// A tracker ticket identifier such as `sc-1234`.
///
/// The digits are kept exactly as written (leading zeros included) so the
/// reference rendered into notes matches the file name it came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketId {
    digits: String,
}

impl TicketId {
    /// Parse a full identifier (`sc-<digits>`).
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let digits = s
            .strip_prefix(TICKET_PREFIX)
            .ok_or_else(|| TypeError::InvalidTicket(s.to_string()))?;
        Self::from_digits(digits)
    }

    /// Build an identifier from its numeric part.
    pub fn from_digits(digits: &str) -> Result<Self, TypeError> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypeError::InvalidTicket(format!("{TICKET_PREFIX}{digits}")));
        }
        Ok(Self {
            digits: digits.to_string(),
        })
    }

    /// The numeric portion, as written.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// The ticket's numeric value, usable for ordering.
    pub fn number(&self) -> TicketNumber {
        TicketNumber::from_digits(&self.digits)
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TICKET_PREFIX}{}", self.digits)
    }
}

/// Arbitrary-length ticket number with numeric ordering.
///
/// Stored without leading zeros, so comparing by length and then
/// lexicographically is the same as comparing the values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TicketNumber(String);

impl TicketNumber {
    fn from_digits(digits: &str) -> Self {
        let significant = digits.trim_start_matches('0');
        if significant.is_empty() {
            Self("0".to_string())
        } else {
            Self(significant.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for TicketNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for TicketNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordering key for merging fragments.
///
/// Variant order matters: every `Ticket` sorts before every `Unticketed`.
/// Unticketed fragments carry their discovery position so they keep their
/// relative order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SortKey {
    Ticket(TicketNumber),
    Unticketed(usize),
}

impl SortKey {
    /// Key for a fragment with the given ticket, or the `seq`-th
    /// unticketed fragment.
    pub fn for_ticket(ticket: Option<&TicketId>, seq: usize) -> Self {
        match ticket {
            Some(t) => Self::Ticket(t.number()),
            None => Self::Unticketed(seq),
        }
    }
}
