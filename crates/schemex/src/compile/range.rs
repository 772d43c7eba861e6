//! Numeric ranges written as comparisons.
//!
//! Both forms are recognised by shape alone: the bounds must be number
//! literals, the middle operand is compiled as an ordinary schema.

use super::compile;
use crate::config::Config;
use crate::error::Result;
use crate::methods::set_key;
use crate::schema::Schema;
use schemex_syntax::{BinaryOp, Node, NodeKind};

/// `min <= x < max` (either operator may be `<` or `<=`).
pub struct Between<'a> {
    lower: f64,
    lower_op: BinaryOp,
    value: &'a Node,
    upper_op: BinaryOp,
    upper: f64,
}

fn is_less(op: BinaryOp) -> bool {
    matches!(op, BinaryOp::Lt | BinaryOp::Le)
}

impl<'a> Between<'a> {
    pub fn matches(node: &'a Node) -> Option<Self> {
        let NodeKind::Binary {
            operator: upper_op,
            left,
            right,
        } = &node.kind
        else {
            return None;
        };
        let NodeKind::Binary {
            operator: lower_op,
            left: lower,
            right: value,
        } = &left.kind
        else {
            return None;
        };
        if !is_less(*upper_op) || !is_less(*lower_op) {
            return None;
        }
        Some(Self {
            lower: lower.as_number()?,
            lower_op: *lower_op,
            value,
            upper_op: *upper_op,
            upper: right.as_number()?,
        })
    }

    pub fn compile(self, config: &mut Config) -> Result<Schema> {
        let schema = compile(self.value, config)?;
        let lower_key = match self.lower_op {
            BinaryOp::Le => "minimum",
            _ => "exclusiveMinimum",
        };
        let upper_key = match self.upper_op {
            BinaryOp::Le => "maximum",
            _ => "exclusiveMaximum",
        };
        let schema = set_key(schema, lower_key, Schema::number(self.lower));
        Ok(set_key(schema, upper_key, Schema::number(self.upper)))
    }
}

/// `x < max`, `x <= max`, `x > min`, `x >= min`.
pub struct Bound<'a> {
    value: &'a Node,
    operator: BinaryOp,
    limit: f64,
}

impl<'a> Bound<'a> {
    pub fn matches(node: &'a Node) -> Option<Self> {
        let NodeKind::Binary {
            operator,
            left,
            right,
        } = &node.kind
        else {
            return None;
        };
        if !operator.is_relational() {
            return None;
        }
        Some(Self {
            value: left,
            operator: *operator,
            limit: right.as_number()?,
        })
    }

    pub fn compile(self, config: &mut Config) -> Result<Schema> {
        let schema = compile(self.value, config)?;
        let key = match self.operator {
            BinaryOp::Lt => "exclusiveMaximum",
            BinaryOp::Le => "maximum",
            BinaryOp::Gt => "exclusiveMinimum",
            _ => "minimum",
        };
        Ok(set_key(schema, key, Schema::number(self.limit)))
    }
}
