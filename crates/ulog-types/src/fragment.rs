use std::path::{Path, PathBuf};

use crate::node::Node;
use crate::ticket::{SortKey, TicketId};

/// One note file, decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    /// Where the fragment was read from.
    pub source_path: PathBuf,
    /// Ticket extracted from the file name, if any.
    pub ticket: Option<TicketId>,
    /// The decoded note tree. Always a [`Node::Section`].
    pub tree: Node,
}

impl Fragment {
    pub fn new(source_path: impl Into<PathBuf>, ticket: Option<TicketId>, tree: Node) -> Self {
        Self {
            source_path: source_path.into(),
            ticket,
            tree,
        }
    }

    pub fn path(&self) -> &Path {
        &self.source_path
    }

    /// Sort key for this fragment; `seq` is its position among unticketed
    /// fragments in discovery order.
    pub fn sort_key(&self, seq: usize) -> SortKey {
        SortKey::for_ticket(self.ticket.as_ref(), seq)
    }
}
