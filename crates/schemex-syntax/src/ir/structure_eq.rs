//! Structural equality for expression trees.
//!
//! `structure_eq` compares trees ignoring "surface hints": fields that record
//! where and how something was written but don't change what it means.
//!
//! # Hint Fields (ignored during comparison)
//!
//! - `Node::span`, `Property::span` - source positions
//! - `Node::comments`, `Property::comments` - attached comments
//! - `Node::parenthesized` - redundant grouping
//! - `Key::Identifier` vs `Key::String` - `a: 1` and `"a": 1` name the same property
//!
//! # Core Fields (must match exactly)
//!
//! - All names, values, operators
//! - Tree shape

use crate::ir::{Key, Node, NodeKind, ObjectMember, Property};

/// Trait for structural equality comparison.
///
/// Unlike `PartialEq`, this ignores positions, comments and grouping, so a
/// hand-built tree can be compared against one read from source.
pub trait StructureEq {
    /// Compare two values for structural equality.
    fn structure_eq(&self, other: &Self) -> bool;
}

impl StructureEq for Node {
    fn structure_eq(&self, other: &Self) -> bool {
        self.kind.structure_eq(&other.kind)
    }
}

impl StructureEq for NodeKind {
    fn structure_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                NodeKind::Assignment {
                    operator: o1,
                    target: t1,
                    value: v1,
                },
                NodeKind::Assignment {
                    operator: o2,
                    target: t2,
                    value: v2,
                },
            ) => o1 == o2 && t1.structure_eq(t2) && v1.structure_eq(v2),

            (
                NodeKind::Binary {
                    operator: o1,
                    left: l1,
                    right: r1,
                },
                NodeKind::Binary {
                    operator: o2,
                    left: l2,
                    right: r2,
                },
            ) => o1 == o2 && l1.structure_eq(l2) && r1.structure_eq(r2),

            (
                NodeKind::Logical {
                    operator: o1,
                    left: l1,
                    right: r1,
                },
                NodeKind::Logical {
                    operator: o2,
                    left: l2,
                    right: r2,
                },
            ) => o1 == o2 && l1.structure_eq(l2) && r1.structure_eq(r2),

            (
                NodeKind::Unary {
                    operator: o1,
                    argument: a1,
                },
                NodeKind::Unary {
                    operator: o2,
                    argument: a2,
                },
            ) => o1 == o2 && a1.structure_eq(a2),

            (NodeKind::Identifier { name: a }, NodeKind::Identifier { name: b }) => a == b,

            (
                NodeKind::Member {
                    object: o1,
                    property: p1,
                    computed: c1,
                },
                NodeKind::Member {
                    object: o2,
                    property: p2,
                    computed: c2,
                },
            ) => c1 == c2 && o1.structure_eq(o2) && p1.structure_eq(p2),

            (NodeKind::Object { members: a }, NodeKind::Object { members: b }) => {
                vec_structure_eq(a, b)
            }
            (NodeKind::Array { elements: a }, NodeKind::Array { elements: b }) => {
                vec_structure_eq(a, b)
            }

            (NodeKind::Number { value: a }, NodeKind::Number { value: b }) => a == b,
            (NodeKind::String { value: a }, NodeKind::String { value: b }) => a == b,
            (NodeKind::Boolean { value: a }, NodeKind::Boolean { value: b }) => a == b,
            (NodeKind::Null, NodeKind::Null) => true,
            (
                NodeKind::Regex {
                    pattern: p1,
                    flags: f1,
                },
                NodeKind::Regex {
                    pattern: p2,
                    flags: f2,
                },
            ) => p1 == p2 && f1 == f2,

            (
                NodeKind::Call {
                    callee: c1,
                    arguments: a1,
                },
                NodeKind::Call {
                    callee: c2,
                    arguments: a2,
                },
            ) => c1.structure_eq(c2) && vec_structure_eq(a1, a2),

            (
                NodeKind::Arrow {
                    params: p1,
                    body: b1,
                },
                NodeKind::Arrow {
                    params: p2,
                    body: b2,
                },
            ) => vec_structure_eq(p1, p2) && b1.structure_eq(b2),

            (
                NodeKind::Conditional {
                    test: t1,
                    consequent: c1,
                    alternate: a1,
                },
                NodeKind::Conditional {
                    test: t2,
                    consequent: c2,
                    alternate: a2,
                },
            ) => t1.structure_eq(t2) && c1.structure_eq(c2) && a1.structure_eq(a2),

            (NodeKind::Spread { argument: a }, NodeKind::Spread { argument: b }) => {
                a.structure_eq(b)
            }

            _ => false,
        }
    }
}

impl StructureEq for ObjectMember {
    fn structure_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ObjectMember::Property(a), ObjectMember::Property(b)) => a.structure_eq(b),
            (ObjectMember::Spread(a), ObjectMember::Spread(b)) => a.structure_eq(b),
            _ => false,
        }
    }
}

impl StructureEq for Property {
    fn structure_eq(&self, other: &Self) -> bool {
        self.computed == other.computed
            && self.key.structure_eq(&other.key)
            && self.value.structure_eq(&other.value)
    }
}

impl StructureEq for Key {
    fn structure_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Expression(a), Key::Expression(b)) => a.structure_eq(b),
            (
                Key::Regex {
                    pattern: p1,
                    flags: f1,
                },
                Key::Regex {
                    pattern: p2,
                    flags: f2,
                },
            ) => p1 == p2 && f1 == f2,
            (Key::Regex { .. }, _) | (_, Key::Regex { .. }) => false,
            (Key::Expression(_), _) | (_, Key::Expression(_)) => false,
            // Identifier, string and number keys compare by the name they denote
            _ => self.name() == other.name(),
        }
    }
}

fn vec_structure_eq<T: StructureEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.structure_eq(y))
}
