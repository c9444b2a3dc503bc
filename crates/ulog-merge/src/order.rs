//! Fragment ordering.

use ulog_types::{Fragment, SortKey};

/// Sort fragments for merging.
///
/// Ticketed fragments come first, ascending by ticket number. Unticketed
/// fragments follow in the order they were given. The sort is stable, so two
/// fragments for the same ticket keep their discovery order.
pub fn order_fragments(fragments: Vec<Fragment>) -> Vec<Fragment> {
    let mut unticketed = 0;
    let mut keyed: Vec<(SortKey, Fragment)> = fragments
        .into_iter()
        .map(|fragment| {
            let key = fragment.sort_key(unticketed);
            if fragment.ticket.is_none() {
                unticketed += 1;
            }
            (key, fragment)
        })
        .collect();

    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, fragment)| fragment).collect()
}
