//! Ticket annotation: append a tracker link to every leaf of a fragment.

use ulog_types::{Fragment, Node, TicketId};

/// Story URL base used when none is configured.
pub const DEFAULT_TRACKER_URL: &str = "https://app.shortcut.com/springboardvr/story";

/// Base URL of the ticket tracker. A ticket's link is `<base>/<digits>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackerUrl {
    base: String,
}

impl TrackerUrl {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Link to the ticket's page.
    pub fn link(&self, ticket: &TicketId) -> String {
        format!("{}/{}", self.base, ticket.digits())
    }

    /// Suffix appended to annotated leaves: ` [[sc-12](<base>/12)]`.
    pub fn reference(&self, ticket: &TicketId) -> String {
        format!(" [[{ticket}]({})]", self.link(ticket))
    }
}

impl Default for TrackerUrl {
    fn default() -> Self {
        Self::new(DEFAULT_TRACKER_URL)
    }
}

/// Append the ticket reference to every leaf of `tree`. Without a ticket the
/// tree is returned as is.
pub fn annotate(tree: Node, ticket: Option<&TicketId>, tracker: &TrackerUrl) -> Node {
    match ticket {
        Some(ticket) => {
            let suffix = tracker.reference(ticket);
            tree.map_leaves(&|value| value + &suffix)
        }
        None => tree,
    }
}

/// Annotate a fragment's tree with its own ticket.
pub fn annotate_fragment(fragment: Fragment, tracker: &TrackerUrl) -> Fragment {
    let Fragment {
        source_path,
        ticket,
        tree,
    } = fragment;
    let tree = annotate(tree, ticket.as_ref(), tracker);
    Fragment {
        source_path,
        ticket,
        tree,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ticket(s: &str) -> TicketId {
        TicketId::parse(s).unwrap()
    }

    #[test]
    fn reference_format() {
        let tracker = TrackerUrl::default();
        assert_eq!(
            tracker.reference(&ticket("sc-2")),
            " [[sc-2](https://app.shortcut.com/springboardvr/story/2)]"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_dropped() {
        let tracker = TrackerUrl::new("https://tracker.example/t/");
        assert_eq!(tracker.link(&ticket("sc-5")), "https://tracker.example/t/5");
    }

    #[test]
    fn every_leaf_is_annotated() {
        let tracker = TrackerUrl::new("https://t.example");
        let tree = Node::from_json(json!({
            "fixed": {"bugs": "Crash", "ui": {"deep": "Glitch"}},
            "added": ["One", "Two"]
        }));

        let annotated = annotate(tree, Some(&ticket("sc-3")), &tracker);
        let suffix = " [[sc-3](https://t.example/3)]";
        assert_eq!(
            annotated,
            Node::from_json(json!({
                "fixed": {"bugs": format!("Crash{suffix}"), "ui": {"deep": format!("Glitch{suffix}")}},
                "added": [format!("One{suffix}"), format!("Two{suffix}")]
            }))
        );
    }

    #[test]
    fn no_ticket_leaves_tree_untouched() {
        let tree = Node::from_json(json!({"fixed": {"bugs": "Crash"}}));
        assert_eq!(annotate(tree.clone(), None, &TrackerUrl::default()), tree);
    }

    #[test]
    fn annotate_fragment_uses_its_ticket() {
        let fragment = Fragment::new(
            "sc-9.json",
            Some(ticket("sc-9")),
            Node::from_json(json!({"changed": "Thing"})),
        );
        let out = annotate_fragment(fragment, &TrackerUrl::new("u"));
        assert_eq!(out.tree.leaves(), vec!["Thing [[sc-9](u/9)]"]);
        assert_eq!(out.ticket, Some(ticket("sc-9")));
    }
}
