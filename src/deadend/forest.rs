/// One entry in the forest. Only roots carry bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Link<C> {
    /// A component representative with the number of ids resolving to it.
    Root { size: usize, color: C },

    /// A member pointing towards its representative.
    Child(usize),

    /// An id excluded from every component; still addressable, never merged.
    Erased,
}

/// A disjoint-set forest over a fixed universe of ids `0..len`, each component carrying a color.
///
/// Union is by size and `find` compresses every visited path. Ids outside the universe are a
/// programming error and panic.
#[derive(Clone, Debug)]
pub struct Forest<C: Copy> {
    links: Vec<Link<C>>,
}

impl<C: Copy> Forest<C> {
    /// Builds a forest of singletons, one per supplied color.
    pub fn new(colors: Vec<C>) -> Forest<C> {
        Forest {
            links: colors.into_iter().map(|color| Link::Root { size: 1, color }).collect(),
        }
    }

    /// Drops a singleton from all size accounting and iteration.
    ///
    /// Erasing a member of a merged component would orphan its other members, so it panics.
    pub fn erase(&mut self, id: usize) {
        match self.links[id] {
            Link::Root { size: 1, .. } | Link::Erased => self.links[id] = Link::Erased,
            _ => panic!("cannot erase id {id}; it belongs to a merged component"),
        }
    }

    /// Finds the representative of `id`, pointing every node on the way straight at it.
    ///
    /// Erased ids are their own representative.
    pub fn find(&mut self, id: usize) -> usize {
        let mut root = id;
        while let Link::Child(parent) = self.links[root] {
            root = parent;
        }

        let mut node = id;
        while let Link::Child(parent) = self.links[node] {
            self.links[node] = Link::Child(root);
            node = parent;
        }
        root
    }

    /// Calls `f(root, size, color)` for every live component; see [`Forest::roots`].
    pub fn for_each_root(&self, mut f: impl FnMut(usize, usize, C)) {
        self.roots().for_each(|(root, size, color)| f(root, size, color));
    }

    /// Whether `id` has been erased.
    pub fn is_erased(&self, id: usize) -> bool {
        matches!(self.links[id], Link::Erased)
    }

    /// The size of the universe, erased ids included.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Iterates `(root, size, color)` for every live component, in no promised order.
    pub fn roots(&self) -> impl Iterator<Item = (usize, usize, C)> + '_ {
        self.links.iter().enumerate().filter_map(|(id, link)| match *link {
            Link::Root { size, color } => Some((id, size, color)),
            Link::Child(_) | Link::Erased => None,
        })
    }

    /// The number of ids in the component containing `id`; zero for erased ids.
    pub fn size_of(&mut self, id: usize) -> usize {
        let root = self.find(id);
        match self.links[root] {
            Link::Root { size, .. } => size,
            Link::Child(_) | Link::Erased => 0,
        }
    }

    /// Merges the components of `a` and `b`, keeping the larger root (the root of `a` on a tie).
    ///
    /// Returns whether anything merged; already-joined and erased ids are left alone.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }

        let (Link::Root { size: sa, color: ca }, Link::Root { size: sb, color: cb }) = (self.links[ra], self.links[rb]) else {
            return false;
        };

        let (keep, absorb, color) = if sb > sa { (rb, ra, cb) } else { (ra, rb, ca) };
        self.links[keep] = Link::Root { size: sa + sb, color };
        self.links[absorb] = Link::Child(keep);
        true
    }
}
