//! Modal Isolation
//!
//! Makes everything outside an active subtree non-interactive and restores
//! it afterwards.
//!
//! # Invariants
//!
//! 1. **Path stays live**: after `activate(root)`, `root` and every node on
//!    its ancestor path up to the isolation boundary are interactive.
//! 2. **Siblings are suppressed**: every other child met on the walk is
//!    non-interactive unless the opt-out predicate exempts it. A sibling
//!    holding an exempt descendant is not flipped itself; its children are
//!    suppressed the same way instead, so an exempt node never ends up under
//!    a non-interactive ancestor of this activation's making.
//! 3. **Exact reversal**: each activation records precisely the nodes it
//!    flipped, in which direction, so `deactivate` undoes only its own work.
//!    Nodes already non-interactive because of an outer activation are left
//!    alone on the way in and therefore untouched on the way out.
//! 4. **LIFO**: activations nest. Deactivating anything but the innermost
//!    open activation is rejected without touching any flag. Activation ids
//!    carry the issuing manager, so a record from another manager never
//!    matches an open activation here.
//!
//! # Failure Modes
//!
//! - A root whose ancestor chain never reaches the boundary (detached) yields
//!   an empty record; nothing is mutated.
//! - A focus memory that was detached in the meantime is not restored and no
//!   fallback target is chosen.

use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::A11yError;

// --- Collaborators ---

/// Read access to the tree structure
pub trait TreeQuery {
    type Node: Copy + Eq + Hash + fmt::Debug;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Ordered children that can carry an interactivity flag
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Topmost node of the walk (its siblings are never touched)
    fn isolation_root(&self) -> Self::Node;
}

/// Per-node interactivity flag
pub trait InteractivitySink: TreeQuery {
    fn is_interactive(&self, node: Self::Node) -> bool;
    fn set_interactive(&mut self, node: Self::Node, interactive: bool);
}

/// Input focus
pub trait FocusSink: TreeQuery {
    fn current_focus(&self) -> Option<Self::Node>;

    /// Move focus; hosts may refuse (returns false)
    fn move_focus_to(&mut self, node: Self::Node) -> bool;

    fn is_attached(&self, node: Self::Node) -> bool;
}

/// Everything the isolation manager needs from its host
pub trait IsolationHost: InteractivitySink + FocusSink {}

impl<T: InteractivitySink + FocusSink> IsolationHost for T {}

// --- Records ---

static NEXT_MANAGER: AtomicU64 = AtomicU64::new(1);

/// Identifier of one activation: issuing manager plus sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivationId {
    manager: u64,
    seq: u64,
}

impl fmt::Display for ActivationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.manager, self.seq)
    }
}

/// Node that held focus right before an activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusMemory<N>(Option<N>);

impl<N: Copy + fmt::Debug> FocusMemory<N> {
    pub fn capture<H: FocusSink<Node = N>>(host: &H) -> Self {
        Self(host.current_focus())
    }

    pub fn node(&self) -> Option<N> {
        self.0
    }

    /// Move focus back if the node is still attached
    pub fn restore<H: FocusSink<Node = N>>(self, host: &mut H) -> bool {
        match self.0 {
            Some(node) if host.is_attached(node) => host.move_focus_to(node),
            Some(node) => {
                tracing::debug!(node = ?node, "focus memory detached, not restoring");
                false
            }
            None => false,
        }
    }
}

/// What one activation changed
#[derive(Debug, PartialEq, Eq)]
pub struct ActivationRecord<N> {
    id: ActivationId,
    root: N,
    suppressed: Vec<N>,
    reactivated: Vec<N>,
    focus_memory: FocusMemory<N>,
}

impl<N: Copy> ActivationRecord<N> {
    pub fn id(&self) -> ActivationId {
        self.id
    }

    pub fn root(&self) -> N {
        self.root
    }

    /// Nodes this activation made non-interactive, in walk order
    pub fn suppressed(&self) -> &[N] {
        &self.suppressed
    }

    /// Nodes this activation made interactive again, in walk order
    pub fn reactivated(&self) -> &[N] {
        &self.reactivated
    }

    pub fn focus_memory(&self) -> FocusMemory<N> {
        self.focus_memory
    }
}

/// A deactivation that was refused; the record is handed back untouched
#[derive(Debug, thiserror::Error)]
#[error("{reason}")]
pub struct Rejected<N: fmt::Debug> {
    pub record: ActivationRecord<N>,
    pub reason: A11yError,
}

// --- Manager ---

/// Modal isolation manager
///
/// Owns the activation id counter and the stack of open activations.
#[derive(Debug)]
pub struct ModalIsolation {
    manager: u64,
    next_seq: u64,
    open: Vec<ActivationId>,
}

impl Default for ModalIsolation {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalIsolation {
    pub fn new() -> Self {
        Self {
            manager: NEXT_MANAGER.fetch_add(1, Ordering::Relaxed),
            next_seq: 0,
            open: Vec::new(),
        }
    }

    /// Number of open activations
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Innermost open activation
    pub fn innermost(&self) -> Option<ActivationId> {
        self.open.last().copied()
    }

    /// Suppress everything outside `root`
    ///
    /// Walks from `root` up to the host's isolation root. At each level the
    /// child on the path is made interactive if it was not, and every other
    /// child that is interactive and not exempted by `opt_out` is suppressed.
    /// A child with an exempt descendant is entered rather than suppressed.
    pub fn activate<H, F>(
        &mut self,
        host: &mut H,
        root: H::Node,
        opt_out: F,
    ) -> ActivationRecord<H::Node>
    where
        H: IsolationHost,
        F: Fn(H::Node) -> bool,
    {
        let id = ActivationId {
            manager: self.manager,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.open.push(id);

        let mut record = ActivationRecord {
            id,
            root,
            suppressed: Vec::new(),
            reactivated: Vec::new(),
            focus_memory: FocusMemory::capture(host),
        };

        let Some(path) = Self::path_to_boundary(host, root) else {
            tracing::debug!(
                activation = %id,
                root = ?root,
                "root is detached, nothing to isolate"
            );
            return record;
        };

        for pair in path.windows(2) {
            let (on_path, parent) = (pair[0], pair[1]);

            if !host.is_interactive(on_path) {
                host.set_interactive(on_path, true);
                record.reactivated.push(on_path);
            }

            for child in host.children(parent) {
                if child != on_path {
                    Self::suppress(host, child, &opt_out, &mut record.suppressed);
                }
            }
        }

        tracing::debug!(
            activation = %id,
            root = ?root,
            suppressed = record.suppressed.len(),
            reactivated = record.reactivated.len(),
            "isolation activated"
        );
        record
    }

    /// Undo an activation and restore the focus captured by it
    pub fn deactivate<H>(
        &mut self,
        host: &mut H,
        record: ActivationRecord<H::Node>,
    ) -> Result<(), Rejected<H::Node>>
    where
        H: IsolationHost,
    {
        match self.innermost() {
            Some(top) if top == record.id => {
                self.open.pop();
            }
            Some(top) if self.open.contains(&record.id) => {
                tracing::debug!(
                    activation = %record.id,
                    innermost = %top,
                    "out of order deactivation rejected"
                );
                let reason = A11yError::OutOfOrderDeactivation {
                    activation: record.id,
                    innermost: top,
                };
                return Err(Rejected { record, reason });
            }
            _ => {
                debug_assert!(
                    self.open.contains(&record.id),
                    "activation {} was not issued by this manager or is already closed",
                    record.id
                );
                return Ok(());
            }
        }

        for &node in &record.suppressed {
            host.set_interactive(node, true);
        }
        for &node in &record.reactivated {
            host.set_interactive(node, false);
        }

        tracing::debug!(activation = %record.id, root = ?record.root, "isolation deactivated");
        record.focus_memory.restore(host);
        Ok(())
    }

    /// Make `node` non-interactive, or descend when an exempt node lies below
    fn suppress<H, F>(host: &mut H, node: H::Node, opt_out: &F, suppressed: &mut Vec<H::Node>)
    where
        H: InteractivitySink,
        F: Fn(H::Node) -> bool,
    {
        if opt_out(node) || !host.is_interactive(node) {
            return;
        }
        if Self::holds_opt_out(host, node, opt_out) {
            for child in host.children(node) {
                Self::suppress(host, child, opt_out, suppressed);
            }
        } else {
            host.set_interactive(node, false);
            suppressed.push(node);
        }
    }

    fn holds_opt_out<H, F>(host: &H, node: H::Node, opt_out: &F) -> bool
    where
        H: TreeQuery,
        F: Fn(H::Node) -> bool,
    {
        host.children(node)
            .into_iter()
            .any(|child| opt_out(child) || Self::holds_opt_out(host, child, opt_out))
    }

    /// `[root, parent, …, boundary]`, or `None` when the boundary is unreachable
    fn path_to_boundary<H: TreeQuery>(host: &H, root: H::Node) -> Option<Vec<H::Node>> {
        let boundary = host.isolation_root();
        let mut path = vec![root];
        let mut current = root;
        while current != boundary {
            current = host.parent(current)?;
            path.push(current);
        }
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    /// Plain adjacency host for exercising the walk in isolation
    #[derive(Default)]
    struct MockHost {
        parent: HashMap<u32, u32>,
        children: HashMap<u32, Vec<u32>>,
        inert: HashSet<u32>,
        focus: Option<u32>,
    }

    impl MockHost {
        fn add(&mut self, parent: u32, child: u32) {
            self.parent.insert(child, parent);
            self.children.entry(parent).or_default().push(child);
        }
    }

    impl TreeQuery for MockHost {
        type Node = u32;

        fn parent(&self, node: u32) -> Option<u32> {
            self.parent.get(&node).copied()
        }

        fn children(&self, node: u32) -> Vec<u32> {
            self.children.get(&node).cloned().unwrap_or_default()
        }

        fn isolation_root(&self) -> u32 {
            0
        }
    }

    impl InteractivitySink for MockHost {
        fn is_interactive(&self, node: u32) -> bool {
            !self.inert.contains(&node)
        }

        fn set_interactive(&mut self, node: u32, interactive: bool) {
            if interactive {
                self.inert.remove(&node);
            } else {
                self.inert.insert(node);
            }
        }
    }

    impl FocusSink for MockHost {
        fn current_focus(&self) -> Option<u32> {
            self.focus
        }

        fn move_focus_to(&mut self, node: u32) -> bool {
            self.focus = Some(node);
            true
        }

        fn is_attached(&self, node: u32) -> bool {
            let mut n = node;
            while n != 0 {
                match self.parent.get(&n) {
                    Some(&p) => n = p,
                    None => return false,
                }
            }
            true
        }
    }

    // 0 > [1, 2, 3 > [4, 5]]
    fn host() -> MockHost {
        let mut host = MockHost::default();
        host.add(0, 1);
        host.add(0, 2);
        host.add(0, 3);
        host.add(3, 4);
        host.add(3, 5);
        host
    }

    #[test]
    fn test_activate_suppresses_siblings_on_every_level() {
        let mut host = host();
        let mut iso = ModalIsolation::new();
        let record = iso.activate(&mut host, 5, |_| false);

        assert_eq!(record.suppressed(), &[4, 1, 2]);
        assert!(record.reactivated().is_empty());
        assert!(host.is_interactive(5));
        assert!(host.is_interactive(3));
        assert_eq!(iso.depth(), 1);
    }

    #[test]
    fn test_opt_out_is_left_alone() {
        let mut host = host();
        let mut iso = ModalIsolation::new();
        let record = iso.activate(&mut host, 5, |n| n == 2);

        assert_eq!(record.suppressed(), &[4, 1]);
        assert!(host.is_interactive(2));
    }

    #[test]
    fn test_sibling_holding_opt_out_is_entered() {
        // 0 > [1 > [6 > [7, 8], 9], 2, 3 > [4, 5]]
        let mut host = host();
        host.add(1, 6);
        host.add(6, 7);
        host.add(6, 8);
        host.add(1, 9);
        let mut iso = ModalIsolation::new();
        let record = iso.activate(&mut host, 5, |n| n == 7);

        assert_eq!(record.suppressed(), &[4, 8, 9, 2]);
        assert!(host.is_interactive(1));
        assert!(host.is_interactive(6));
        assert!(host.is_interactive(7));

        iso.deactivate(&mut host, record).unwrap();
        assert!(host.inert.is_empty());
    }

    #[test]
    fn test_activation_ids_differ_across_managers() {
        let mut host = host();
        let mut first = ModalIsolation::new();
        let mut second = ModalIsolation::default();
        let a = first.activate(&mut host, 5, |_| false);
        let b = second.activate(&mut host, 2, |_| false);

        assert_ne!(a.id(), b.id());
        assert_ne!(first.innermost(), second.innermost());
    }

    #[test]
    fn test_detached_root_is_noop() {
        let mut host = host();
        host.children.insert(9, vec![10]);
        host.parent.insert(10, 9);
        let mut iso = ModalIsolation::new();
        let record = iso.activate(&mut host, 10, |_| false);

        assert!(record.suppressed().is_empty());
        assert!(host.inert.is_empty());
        assert!(iso.deactivate(&mut host, record).is_ok());
        assert_eq!(iso.depth(), 0);
    }

    #[test]
    fn test_deactivate_restores_focus() {
        let mut host = host();
        host.focus = Some(1);
        let mut iso = ModalIsolation::new();
        let record = iso.activate(&mut host, 5, |_| false);
        assert_eq!(record.focus_memory().node(), Some(1));
        host.focus = Some(5);

        iso.deactivate(&mut host, record).unwrap();
        assert_eq!(host.focus, Some(1));
        assert!(host.inert.is_empty());
    }

    #[test]
    fn test_out_of_order_is_rejected() {
        let mut host = host();
        let mut iso = ModalIsolation::new();
        let outer = iso.activate(&mut host, 3, |_| false);
        let inner = iso.activate(&mut host, 5, |_| false);
        let before = host.inert.clone();

        let rejected = iso.deactivate(&mut host, outer).unwrap_err();
        assert!(matches!(rejected.reason, A11yError::OutOfOrderDeactivation { .. }));
        assert_eq!(host.inert, before);

        iso.deactivate(&mut host, inner).unwrap();
        iso.deactivate(&mut host, rejected.record).unwrap();
        assert!(host.inert.is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not issued by this manager")]
    fn test_foreign_record_asserts() {
        let mut host = host();
        let mut other = ModalIsolation::new();
        let record = other.activate(&mut host, 5, |_| false);
        ModalIsolation::new().deactivate(&mut host, record).ok();
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not issued by this manager")]
    fn test_record_from_live_manager_with_same_depth_asserts() {
        let mut host = host();
        let mut first = ModalIsolation::new();
        let mut second = ModalIsolation::new();
        let foreign = first.activate(&mut host, 5, |_| false);
        let _own = second.activate(&mut host, 2, |_| false);
        second.deactivate(&mut host, foreign).ok();
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_record_from_live_manager_leaves_stack_alone() {
        let mut host = host();
        let mut first = ModalIsolation::new();
        let mut second = ModalIsolation::new();
        let foreign = first.activate(&mut host, 5, |_| false);
        let own = second.activate(&mut host, 2, |_| false);
        let before = host.inert.clone();

        assert!(second.deactivate(&mut host, foreign).is_ok());
        assert_eq!(second.depth(), 1);
        assert_eq!(second.innermost(), Some(own.id()));
        assert_eq!(host.inert, before);
    }
}
