//! Events recorded by the [`Builder`][crate::builder::Builder].
//!
//! A parse doesn't build a tree directly, it records a flat list of events
//! that describe the tree. This is what makes backtracking cheap, undoing
//! work is just truncating the list.

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Event<K> {
    /// A node starts here.
    ///
    /// If `forward_parent` is set, the node at that index starts here too and
    /// wraps this one. That's how [`precede`][crate::builder::CompletedMarker::precede]
    /// wraps a node without moving events around.
    Start {
        completion: Completion<K>,
        forward_parent: Option<usize>,
    },

    /// The most recently started node that's still open ends here.
    Finish,

    /// The next significant token, and any trivia before it.
    Token,

    /// An empty error node.
    Error(String),
}

impl<K> Event<K> {
    pub(crate) fn tombstone() -> Self {
        Event::Start {
            completion: Completion::Abandoned,
            forward_parent: None,
        }
    }
}

/// What the node started by an [`Event::Start`] turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Completion<K> {
    /// The marker hasn't been resolved yet.
    Open,
    /// The marker was dropped, there's no node.
    Abandoned,
    Node(K),
    Error(String),
}
