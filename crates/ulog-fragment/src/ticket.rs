//! Ticket extraction from fragment file names.
//!
//! A ticket is `sc-` followed by one or more ASCII digits, anywhere in the
//! name. The first occurrence wins and its digits are taken greedily, so
//! `fix-sc-12-sc-34.json` yields `sc-12`. Matching is case-sensitive.

use std::path::Path;

use ulog_types::{TicketId, TICKET_PREFIX};

/// Scan a file name for a ticket identifier.
///
/// # Examples
///
/// ```
/// use ulog_fragment::ticket::extract_ticket;
///
/// assert_eq!(extract_ticket("sc-1234.json").unwrap().to_string(), "sc-1234");
/// assert_eq!(extract_ticket("feature-sc-7-login.json").unwrap().digits(), "7");
/// assert!(extract_ticket("sc-.json").is_none());
/// assert!(extract_ticket("notes.json").is_none());
/// ```
pub fn extract_ticket(file_name: &str) -> Option<TicketId> {
    let mut offset = 0;
    while let Some(pos) = file_name[offset..].find(TICKET_PREFIX) {
        let start = offset + pos + TICKET_PREFIX.len();
        let rest = &file_name[start..];
        let len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if len > 0 {
            return TicketId::from_digits(&rest[..len]).ok();
        }
        // The prefix is ASCII, so stepping one byte stays on a char boundary.
        offset += pos + 1;
    }
    None
}

/// Ticket for a fragment path. Only the file name is scanned, never the
/// directories leading to it.
pub fn ticket_for_path(path: &Path) -> Option<TicketId> {
    let name = path.file_name()?.to_string_lossy();
    extract_ticket(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ticket_name() {
        assert_eq!(extract_ticket("sc-42.json").unwrap().to_string(), "sc-42");
    }

    #[test]
    fn ticket_inside_longer_name() {
        let t = extract_ticket("2024-01-feature-sc-1234-new-login.json").unwrap();
        assert_eq!(t.digits(), "1234");
    }

    #[test]
    fn first_valid_match_wins() {
        assert_eq!(extract_ticket("sc-12-sc-34.json").unwrap().digits(), "12");
        assert_eq!(extract_ticket("sc-x-sc-34.json").unwrap().digits(), "34");
        assert_eq!(extract_ticket("desc-sc-9.json").unwrap().digits(), "9");
    }

    #[test]
    fn prefix_without_digits_is_ignored() {
        assert!(extract_ticket("sc-.json").is_none());
        assert!(extract_ticket("sc-abc.json").is_none());
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(extract_ticket("SC-12.json").is_none());
    }

    #[test]
    fn leading_zeros_are_kept() {
        assert_eq!(extract_ticket("sc-0042.json").unwrap().digits(), "0042");
    }

    #[test]
    fn non_ascii_names_do_not_panic() {
        assert_eq!(extract_ticket("ünïcødé-sc-5.json").unwrap().digits(), "5");
        assert!(extract_ticket("ünïcødé.json").is_none());
    }

    #[test]
    fn only_the_file_name_is_scanned() {
        let path = Path::new("/work/sc-99/notes/misc.json");
        assert!(ticket_for_path(path).is_none());
        let path = Path::new("/work/notes/sc-7.json");
        assert_eq!(ticket_for_path(path).unwrap().digits(), "7");
    }
}
