use crate::error::{lossy, InsertError, MatchError};
use crate::params::Params;

use percent_encoding::percent_decode_str;

use std::borrow::Cow;
use std::cmp::min;
use std::mem;
use std::str;

/// A successful match consisting of the registered value and the URL parameters, returned by
/// [`Node::at`](crate::Node::at).
#[derive(Debug)]
pub struct Match<'n, 'p, V> {
    /// The value stored under the matched node.
    pub value: V,
    /// The route parameters. See [parameters](crate#parameters) for more details.
    pub params: Params<'n, 'p>,
}

/// The types of nodes the tree can hold.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
enum NodeKind {
    /// The first node inserted into an empty tree.
    Root,
    /// A URL parameter, ex: `/:id`.
    Param,
    /// A catch-all parameter, ex: `/*static`. Both the empty node in front of
    /// the wildcard and the wildcard leaf itself carry this kind.
    CatchAll,
    /// Anything else.
    Static,
}

/// A node in a radix tree ordered by priority.
///
/// Priority is just the number of values registered in sub nodes
/// (children, grandchildren, and so on..).
///
/// A node either has static children, dispatched through `indices`, or exactly
/// one wildcard child at `children[0]`, never both.
#[derive(Debug, Clone)]
pub struct Node<T> {
    prefix: Vec<u8>,
    wild_child: bool,
    kind: NodeKind,
    indices: Vec<u8>,
    children: Vec<Node<T>>,
    value: Option<T>,
    priority: u32,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            prefix: Vec::new(),
            wild_child: false,
            kind: NodeKind::Static,
            indices: Vec::new(),
            children: Vec::new(),
            value: None,
            priority: 0,
        }
    }
}

impl<T> Node<T> {
    /// Construct a new `Node`.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    pub(crate) fn is_catch_all(&self) -> bool {
        self.kind == NodeKind::CatchAll
    }

    /// Register a value in the tree under the given path.
    ///
    /// ```rust
    /// # use routetree::Node;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut tree = Node::new();
    /// tree.insert("/home", "Welcome!")?;
    /// tree.insert("/users/:id", "A User")?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// An error leaves the tree in a consistent but possibly re-shaped state;
    /// routers are expected to treat it as fatal.
    pub fn insert(&mut self, path: impl Into<String>, value: T) -> Result<(), InsertError> {
        let full_path = path.into();
        if !full_path.starts_with('/') {
            return Err(InsertError::MalformedPath { path: full_path });
        }

        let mut path = full_path.as_bytes();
        self.priority += 1;

        // Empty tree
        if self.prefix.is_empty() && self.children.is_empty() {
            self.insert_child(path, &full_path, value)?;
            self.kind = NodeKind::Root;
            return Ok(());
        }

        let mut current = self;

        'walk: loop {
            // Find the longest common prefix.
            // This also implies that the common prefix contains no ':' or '*'
            // since the existing key can't contain those chars.
            let max = min(path.len(), current.prefix.len());
            let i = path[..max]
                .iter()
                .zip(&current.prefix)
                .take_while(|(a, b)| a == b)
                .count();

            // Split edge
            if i < current.prefix.len() {
                current.split(i);
            }

            // Otherwise add value to current node
            if i == path.len() {
                if current.value.is_some() {
                    return Err(InsertError::Duplicate { path: full_path });
                }

                current.value = Some(value);
                return Ok(());
            }

            // Make new node a child of this node
            path = &path[i..];

            if current.wild_child {
                current = &mut current.children[0];
                current.priority += 1;

                // Check if the wildcard matches
                if path.starts_with(&current.prefix)
                    // Adding a child to a catch-all is not possible
                    && current.kind != NodeKind::CatchAll
                    // Check for longer wildcard, e.g. :name and :names
                    && (current.prefix.len() == path.len() || path[current.prefix.len()] == b'/')
                {
                    continue 'walk;
                }

                return Err(InsertError::wildcard_conflict(&full_path, path, current));
            }

            let next = path[0];

            // `/` after param
            if current.kind == NodeKind::Param && next == b'/' && current.children.len() == 1 {
                current = &mut current.children[0];
                current.priority += 1;
                continue 'walk;
            }

            // Check if a child with the next path byte exists
            if let Some(i) = current.indices.iter().position(|&c| c == next) {
                let i = current.update_child_priority(i);
                current = &mut current.children[i];
                continue 'walk;
            }

            if next != b':' && next != b'*' {
                current.indices.push(next);
                current.children.push(Self::default());
                let i = current.update_child_priority(current.indices.len() - 1);
                current = &mut current.children[i];
            }

            return current.insert_child(path, &full_path, value);
        }
    }

    // Moves everything after `at` into a new static child.
    fn split(&mut self, at: usize) {
        let child = Self {
            prefix: self.prefix[at..].to_owned(),
            wild_child: self.wild_child,
            kind: NodeKind::Static,
            indices: mem::take(&mut self.indices),
            children: mem::take(&mut self.children),
            value: self.value.take(),
            priority: self.priority - 1,
        };

        self.indices = vec![self.prefix[at]];
        self.prefix.truncate(at);
        self.children = vec![child];
        self.wild_child = false;
    }

    // Increments priority of the given child and reorders if necessary,
    // returning the new position (index) of the child.
    fn update_child_priority(&mut self, pos: usize) -> usize {
        self.children[pos].priority += 1;
        let priority = self.children[pos].priority;

        // adjust position (move to front)
        let mut new_pos = pos;
        while new_pos > 0 && self.children[new_pos - 1].priority < priority {
            self.children.swap(new_pos - 1, new_pos);
            self.indices.swap(new_pos - 1, new_pos);
            new_pos -= 1;
        }

        new_pos
    }

    fn insert_child(&mut self, mut path: &[u8], full_path: &str, value: T) -> Result<(), InsertError> {
        let mut current = self;

        loop {
            let (start, end) = match find_wildcard(path, full_path)? {
                Some(wildcard) => wildcard,
                None => {
                    current.prefix = path.to_owned();
                    current.value = Some(value);
                    return Ok(());
                }
            };

            let wildcard = &path[start..end];

            // existing children would be unreachable behind the wildcard
            if !current.children.is_empty() {
                return Err(InsertError::ChildConflict {
                    segment: lossy(wildcard),
                    path: full_path.to_owned(),
                });
            }

            // check if the wildcard has a name
            if wildcard.len() < 2 {
                return Err(InsertError::UnnamedParam {
                    path: full_path.to_owned(),
                });
            }

            if wildcard[0] == b':' {
                // Insert prefix before the current wildcard
                if start > 0 {
                    current.prefix = path[..start].to_owned();
                    path = &path[start..];
                }

                current.wild_child = true;
                current.children = vec![Self {
                    prefix: path[..wildcard.len()].to_owned(),
                    kind: NodeKind::Param,
                    priority: 1,
                    ..Self::default()
                }];
                current = &mut current.children[0];

                // If the path doesn't end with the wildcard, then there
                // will be another non-wildcard subpath starting with '/'
                if wildcard.len() < path.len() {
                    path = &path[wildcard.len()..];
                    current.children = vec![Self {
                        priority: 1,
                        ..Self::default()
                    }];
                    current = &mut current.children[0];
                    continue;
                }

                // Otherwise we're done. Insert the value in the new leaf
                current.value = Some(value);
                return Ok(());
            }

            // catch-all
            if end != path.len() {
                return Err(InsertError::InvalidCatchAll {
                    path: full_path.to_owned(),
                });
            }

            // the separator in front of the catch-all belongs to an existing node
            if start == 0 {
                if current.prefix.last() == Some(&b'/') {
                    return Err(InsertError::CatchAllConflict {
                        path: full_path.to_owned(),
                    });
                }

                return Err(InsertError::CatchAllWithoutSlash {
                    path: full_path.to_owned(),
                });
            }

            let slash = start - 1;
            if path[slash] != b'/' {
                return Err(InsertError::CatchAllWithoutSlash {
                    path: full_path.to_owned(),
                });
            }

            current.prefix = path[..slash].to_owned();
            current.indices = vec![b'/'];

            // first node: catch-all node with an empty path,
            // second node: the wildcard holding the value
            current.children = vec![Self {
                wild_child: true,
                kind: NodeKind::CatchAll,
                priority: 1,
                children: vec![Self {
                    prefix: path[slash..].to_owned(),
                    kind: NodeKind::CatchAll,
                    value: Some(value),
                    priority: 1,
                    ..Self::default()
                }],
                ..Self::default()
            }];

            return Ok(());
        }
    }

    /// Tries to find a value in the tree matching the given path.
    ///
    /// If no value can be found it returns a trailing slash redirect
    /// recommendation, see [`tsr`](crate::MatchError::tsr).
    ///
    /// ```rust
    /// # use routetree::Node;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut tree = Node::new();
    /// tree.insert("/home", "Welcome!")?;
    ///
    /// let matched = tree.at("/home").unwrap();
    /// assert_eq!(*matched.value, "Welcome!");
    /// # Ok(())
    /// # }
    /// ```
    pub fn at<'n, 'p>(&'n self, path: &'p str) -> Result<Match<'n, 'p, &'n T>, MatchError> {
        let mut params = Params::new();
        let value = self.find(path, &mut params, false)?;
        Ok(Match { value, params })
    }

    /// Like [`at`](Node::at), but percent-decodes parameter values.
    ///
    /// ```rust
    /// # use routetree::Node;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut tree = Node::new();
    /// tree.insert("/hello/:name", ())?;
    ///
    /// let matched = tree.at_unescaped("/hello/foo%2fbar").unwrap();
    /// assert_eq!(matched.params.get("name"), Some("foo/bar"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn at_unescaped<'n, 'p>(&'n self, path: &'p str) -> Result<Match<'n, 'p, &'n T>, MatchError> {
        let mut params = Params::new();
        let value = self.find(path, &mut params, true)?;
        Ok(Match { value, params })
    }

    /// Walks the tree for `path`, appending captured parameters to `params`.
    ///
    /// With `unescape` set, parameter values are percent-decoded; values that
    /// do not decode to UTF-8 are kept as they appear in the path.
    pub fn find<'n, 'p>(
        &'n self,
        full_path: &'p str,
        params: &mut Params<'n, 'p>,
        unescape: bool,
    ) -> Result<&'n T, MatchError> {
        let mut current = self;
        let mut path = full_path.as_bytes();

        // whether the node we descended from holds a value, so that a lone
        // trailing slash left over for `current` can be removed
        let mut parent_value = false;

        loop {
            let prefix = current.prefix.as_slice();

            if path.len() > prefix.len() {
                if !path.starts_with(prefix) {
                    return Err(MatchError::new(false));
                }

                path = &path[prefix.len()..];

                // If this node does not have a wildcard (param or catch-all)
                // child, we can just look up the next child node and continue
                // to walk down the tree
                if !current.wild_child {
                    if let Some(i) = current.indices.iter().position(|&c| c == path[0]) {
                        parent_value = current.value.is_some();
                        current = &current.children[i];
                        continue;
                    }

                    // Nothing found.
                    // We can recommend to redirect to the same URL without a
                    // trailing slash if a leaf exists for that path.
                    let tsr = path == b"/" && current.value.is_some();
                    return Err(MatchError::new(tsr));
                }

                // Handle wildcard child, which is always the only child
                current = &current.children[0];

                // `path` starts on a segment boundary, so its offset into the
                // original string is a char boundary.
                let offset = full_path.len() - path.len();

                match current.kind {
                    NodeKind::Param => {
                        // find param end (either '/' or path end)
                        let end = path.iter().position(|&c| c == b'/').unwrap_or(path.len());
                        let raw = &full_path[offset..offset + end];
                        params.push(current.wildcard_name(1), decode(raw, unescape));

                        // we need to go deeper!
                        if end < path.len() {
                            if let Some(child) = current.children.first() {
                                path = &path[end..];
                                parent_value = current.value.is_some();
                                current = child;
                                continue;
                            }

                            // ... but we can't
                            return Err(MatchError::new(path.len() == end + 1));
                        }

                        if let Some(value) = current.value.as_ref() {
                            return Ok(value);
                        }

                        // No value found. Check if a value for this path + a
                        // trailing slash exists for TSR recommendation
                        let tsr = match current.children.as_slice() {
                            [child] => (child.prefix == b"/" && child.value.is_some()) || child.leads_to_catch_all(),
                            _ => false,
                        };

                        return Err(MatchError::new(tsr));
                    }
                    NodeKind::CatchAll => {
                        params.push(current.wildcard_name(2), decode(&full_path[offset..], unescape));

                        return current.value.as_ref().ok_or(MatchError::new(false));
                    }
                    NodeKind::Root | NodeKind::Static => unreachable!("invalid node type"),
                }
            }

            if path == prefix {
                // We should have reached the node containing the value.
                // Check if this node has a value registered.
                if let Some(value) = current.value.as_ref() {
                    return Ok(value);
                }

                // Only the trailing slash was left for this node, so the
                // route without it ends at the parent
                if path == b"/" && parent_value {
                    return Err(MatchError::new(true));
                }

                // No value found. Check if a value for this path + a
                // trailing slash exists for trailing slash recommendation
                if let Some(i) = current.indices.iter().position(|&c| c == b'/') {
                    let child = &current.children[i];
                    let tsr = (child.prefix.len() == 1 && child.value.is_some()) || child.leads_to_catch_all();
                    return Err(MatchError::new(tsr));
                }

                return Err(MatchError::new(false));
            }

            // Nothing found. We can recommend to redirect to the same URL with an
            // extra trailing slash if a leaf exists for that path, or without
            // one if the leftover slash is all that kept the parent from matching
            let tsr = (path == b"/" && parent_value)
                || (prefix.len() == path.len() + 1
                    && prefix[path.len()] == b'/'
                    && path == &prefix[..path.len()]
                    && current.value.is_some());

            return Err(MatchError::new(tsr));
        }
    }

    // Whether this `/` child is the way into a catch-all, either directly or
    // through the empty static node left in front of it by a param or a split.
    fn leads_to_catch_all(&self) -> bool {
        match self.kind {
            NodeKind::CatchAll => self.children.first().map_or(false, |leaf| leaf.value.is_some()),
            _ => self.prefix.is_empty() && self.indices == b"/" && self.children[0].leads_to_catch_all(),
        }
    }

    // The name of a wildcard node, skipping the `:` or `/*` marker.
    fn wildcard_name(&self, marker: usize) -> &str {
        // wildcards are whole pattern segments, so they are always valid UTF-8
        str::from_utf8(&self.prefix)
            .ok()
            .and_then(|prefix| prefix.get(marker..))
            .unwrap_or_default()
    }

    /// Makes a case-insensitive match of the given path and tries to find a value.
    /// It can optionally also fix trailing slashes.
    /// If the match is successful, it returns the case corrected path.
    ///
    /// ```rust
    /// # use routetree::Node;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut tree = Node::new();
    /// tree.insert("/home", "Welcome!")?;
    ///
    /// let path = tree.path_ignore_case("/HoMe/", true).unwrap();
    /// assert_eq!(path, "/home");
    /// # Ok(())
    /// # }
    /// ```
    pub fn path_ignore_case(&self, path: impl AsRef<str>, fix_trailing_slash: bool) -> Option<String> {
        let path = path.as_ref();
        let mut insensitive_path = Vec::with_capacity(path.len() + 1);

        if self.fold_walk(path, None, &mut insensitive_path, fix_trailing_slash) {
            return String::from_utf8(insensitive_path).ok();
        }

        None
    }

    // `path` is the remaining request. If `partial` is set, `path` starts with
    // the char it describes, whose first bytes were matched by ancestors.
    fn fold_walk(
        &self,
        path: &str,
        partial: Option<Partial>,
        out: &mut Vec<u8>,
        fix_trailing_slash: bool,
    ) -> bool {
        let (consumed, partial) = match fold_prefix(&self.prefix, path, partial) {
            Some(matched) => matched,
            None => {
                // Nothing found.
                // Try to fix the path by adding a trailing slash
                if fix_trailing_slash && self.value.is_some() {
                    if let Some((&b'/', prefix)) = self.prefix.split_last() {
                        if let Some((consumed, None)) = fold_prefix(prefix, path, partial) {
                            if consumed == path.len() {
                                out.extend_from_slice(&self.prefix);
                                return true;
                            }
                        }
                    }
                }

                return false;
            }
        };

        out.extend_from_slice(&self.prefix);
        let path = &path[consumed..];

        if partial.is_none() && path.is_empty() {
            // We should have reached the node containing the value.
            // Check if this node has a value registered.
            if self.value.is_some() {
                return true;
            }

            // No value found.
            // Try to fix the path by adding a trailing slash
            if fix_trailing_slash {
                if let Some(i) = self.indices.iter().position(|&c| c == b'/') {
                    let child = &self.children[i];
                    if (child.prefix.len() == 1 && child.value.is_some()) || child.leads_to_catch_all() {
                        out.push(b'/');
                        return true;
                    }
                }
            }

            return false;
        }

        if self.wild_child {
            // a wildcard always starts on a char boundary
            return partial.is_none() && self.children[0].fold_wildcard(path, out, fix_trailing_slash);
        }

        // If this node does not have a wildcard (param or catch-all) child,
        // we can just look up the next child node and continue to walk down
        // the tree
        let partial = match partial {
            Some(partial) => partial,
            None => match path.chars().next() {
                Some(ch) => Partial::new(ch),
                None => return false,
            },
        };

        // Both the lowercase and the uppercase byte might exist as an index,
        // so every case variant of the char has to be tried.
        let len = out.len();
        let mut tried = [None; 3];
        for (n, variant) in partial.variants().enumerate() {
            let mut buf = [0; 4];
            let encoded = variant.encode_utf8(&mut buf).as_bytes();

            let Some(i) = self.indices.iter().position(|&c| c == encoded[partial.done]) else {
                continue;
            };

            if tried.contains(&Some(i)) {
                continue;
            }
            tried[n] = Some(i);

            if self.children[i].fold_walk(path, Some(partial), out, fix_trailing_slash) {
                return true;
            }

            out.truncate(len);
        }

        // Nothing found. We can recommend to redirect to the same URL
        // without a trailing slash if a leaf exists for that path
        fix_trailing_slash && partial.done == 0 && path == "/" && self.value.is_some()
    }

    fn fold_wildcard(&self, path: &str, out: &mut Vec<u8>, fix_trailing_slash: bool) -> bool {
        match self.kind {
            NodeKind::Param => {
                // find param end (either '/' or path end)
                let end = path.find('/').unwrap_or(path.len());

                // add param value to case insensitive path
                out.extend_from_slice(&path.as_bytes()[..end]);

                // we need to go deeper!
                if end < path.len() {
                    if let Some(child) = self.children.first() {
                        let len = out.len();
                        if child.fold_walk(&path[end..], None, out, fix_trailing_slash) {
                            return true;
                        }
                        out.truncate(len);
                    }

                    // ... but we can't, unless only a trailing slash is left
                    return fix_trailing_slash && path.len() == end + 1 && self.value.is_some();
                }

                if self.value.is_some() {
                    return true;
                }

                // No value found. Check if a value for this path + a
                // trailing slash exists
                if fix_trailing_slash {
                    if let [child] = self.children.as_slice() {
                        if (child.prefix == b"/" && child.value.is_some()) || child.leads_to_catch_all() {
                            out.push(b'/');
                            return true;
                        }
                    }
                }

                false
            }
            NodeKind::CatchAll => {
                out.extend_from_slice(path.as_bytes());
                true
            }
            NodeKind::Root | NodeKind::Static => unreachable!("invalid node type"),
        }
    }

    /// Checks that every node's priority equals the number of values below it.
    /// Returns the mismatching `(found, expected)` pair on failure.
    #[cfg(any(test, feature = "__test_helpers"))]
    pub fn check_priorities(&self) -> Result<u32, (u32, u32)> {
        let mut priority = 0;
        for child in &self.children {
            priority += child.check_priorities()?;
        }

        if self.value.is_some() {
            priority += 1;
        }

        if self.priority != priority {
            return Err((self.priority, priority));
        }

        Ok(priority)
    }
}

fn decode(raw: &str, unescape: bool) -> Cow<'_, str> {
    if !unescape {
        return Cow::Borrowed(raw);
    }

    percent_decode_str(raw)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(raw))
}

// Search for a wildcard segment and check the name for invalid characters.
// Returns the start and end of the first wildcard in `path`.
fn find_wildcard(path: &[u8], full_path: &str) -> Result<Option<(usize, usize)>, InsertError> {
    // A wildcard starts with ':' (param) or '*' (catch-all)
    let Some(start) = path.iter().position(|&c| c == b':' || c == b'*') else {
        return Ok(None);
    };

    // Find end and check for invalid characters
    for (i, &c) in path.iter().enumerate().skip(start + 1) {
        match c {
            b'/' => return Ok(Some((start, i))),
            b':' | b'*' => {
                return Err(InsertError::TooManyParams {
                    segment: lossy(&path[start..]),
                    path: full_path.to_owned(),
                })
            }
            _ => {}
        }
    }

    Ok(Some((start, path.len())))
}

/// A request char whose encoding is spread over more than one node.
///
/// The tree compares raw bytes while case folding works on chars, so the char
/// is carried through the walk together with the bytes of it matched so far.
#[derive(Clone, Copy)]
struct Partial {
    ch: char,
    matched: [u8; 4],
    done: usize,
}

impl Partial {
    fn new(ch: char) -> Self {
        Partial {
            ch,
            matched: [0; 4],
            done: 0,
        }
    }

    // Case variants of the char consistent with the bytes matched so far.
    fn variants(self) -> impl Iterator<Item = char> {
        case_variants(self.ch).filter(move |variant| {
            let mut buf = [0; 4];
            variant
                .encode_utf8(&mut buf)
                .as_bytes()
                .starts_with(&self.matched[..self.done])
        })
    }
}

// Matches `prefix` against the start of `path` ignoring case.
//
// Returns the number of bytes of `path` made up of chars that were matched
// completely, and the char left hanging over the end of `prefix`, if any.
// Chars are only ever decoded from `path`, whose slices always start on a
// char boundary; `prefix` may begin or end in the middle of a char.
fn fold_prefix(prefix: &[u8], path: &str, partial: Option<Partial>) -> Option<(usize, Option<Partial>)> {
    let mut i = 0;
    let mut consumed = 0;

    if let Some(mut partial) = partial {
        let width = partial.ch.len_utf8();
        let take = min(width - partial.done, prefix.len());

        partial.matched[partial.done..partial.done + take].copy_from_slice(&prefix[..take]);
        partial.done += take;

        partial.variants().next()?;

        if partial.done < width {
            return Some((0, (partial.done > 0).then_some(partial)));
        }

        i = take;
        consumed = width;
    }

    let mut chars = path[consumed..].chars();
    while i < prefix.len() {
        let ch = chars.next()?;
        let width = ch.len_utf8();
        let rest = &prefix[i..];

        if width > rest.len() {
            let mut partial = Partial::new(ch);
            partial.matched[..rest.len()].copy_from_slice(rest);
            partial.done = rest.len();
            partial.variants().next()?;

            return Some((consumed, Some(partial)));
        }

        let mut buf = [0; 4];
        if !case_variants(ch).any(|variant| rest.starts_with(variant.encode_utf8(&mut buf).as_bytes())) {
            return None;
        }

        i += width;
        consumed += width;
    }

    Some((consumed, None))
}

// The lowercase, uppercase and original form of a char, in that order,
// restricted to forms with a single char mapping of the same encoded width.
fn case_variants(ch: char) -> impl Iterator<Item = char> {
    let lower = simple_case(ch.to_lowercase());
    let upper = simple_case(ch.to_uppercase());

    [lower, upper, Some(ch)]
        .into_iter()
        .enumerate()
        .filter_map(move |(i, variant)| {
            let variant = variant.filter(|v| v.len_utf8() == ch.len_utf8())?;
            // skip forms already yielded
            let seen = [lower, upper][..min(i, 2)].contains(&Some(variant));
            (!seen).then_some(variant)
        })
}

fn simple_case(mut mapping: impl Iterator<Item = char>) -> Option<char> {
    match (mapping.next(), mapping.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}
