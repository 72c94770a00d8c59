//! Renders a statement as Cypher text.

use crate::ast::{
    is_identifier, Condition, Expression, Node, Relationship, Segment, Statement, Visitable,
    Visitor,
};
use std::collections::HashSet;
use tracing::trace;

pub fn render(statement: &Statement) -> String {
    let mut renderer = Renderer::new();
    statement.accept(&mut renderer);
    let cypher = renderer.finish();
    trace!(length = cypher.len(), "rendered statement");
    cypher
}

fn push_quoted(out: &mut String, name: &str) {
    out.push('`');
    out.push_str(&name.replace('`', "``"));
    out.push('`');
}

/// Property and map keys are quoted unless they are plain identifiers.
fn push_key(out: &mut String, key: &str) {
    if is_identifier(key) {
        out.push_str(key);
    } else {
        push_quoted(out, key);
    }
}

/// A [`Visitor`] writing Cypher text. Usable on any
/// [`Visitable`], not only on whole statements.
#[derive(Debug, Default)]
pub struct Renderer {
    out: String,
    depth: usize,
    /// Open lists: the depth of their direct children and how many
    /// of those were written.
    lists: Vec<(usize, usize)>,
    /// Set while the children of a fully written segment are visited.
    skip_depth: Option<usize>,
    /// Named nodes that were written with their labels.
    visited_nodes: HashSet<Node>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.out.trim().to_string()
    }

    fn separate(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with(' ') {
            self.out.push(' ');
        }
    }

    fn node(&mut self, node: &Node) {
        self.out.push('(');
        if let Some(name) = node.symbolic_name() {
            self.out.push_str(name.value());
        }
        if node.symbolic_name().is_none() || !self.visited_nodes.contains(node) {
            for label in node.labels() {
                self.out.push(':');
                push_quoted(&mut self.out, label);
            }
            if node.symbolic_name().is_some() {
                self.visited_nodes.insert(node.clone());
            }
        }
        self.out.push(')');
    }

    fn relationship_detail(&mut self, relationship: &Relationship) {
        let direction = relationship.direction();
        self.out.push_str(direction.symbol_left());
        let name = relationship.symbolic_name();
        if name.is_some() || !relationship.types().is_empty() {
            self.out.push('[');
            if let Some(name) = name {
                self.out.push_str(name.value());
            }
            for (idx, kind) in relationship.types().iter().enumerate() {
                self.out.push_str(if idx == 0 { ":" } else { "|" });
                push_quoted(&mut self.out, kind);
            }
            self.out.push(']');
        }
        self.out.push_str(direction.symbol_right());
    }

    fn enter_expression(&mut self, expression: &Expression) {
        match expression {
            Expression::Literal(literal) => self.out.push_str(&literal.to_string()),
            Expression::Parameter(name) => {
                self.out.push('$');
                self.out.push_str(name.value());
            }
            Expression::Function { name, .. } => {
                self.out.push_str(name);
                self.out.push('(');
            }
            Expression::Operation { .. } => self.out.push('('),
            Expression::List(_) => self.out.push('['),
            Expression::Asterisk => self.out.push('*'),
            Expression::Variable(_)
            | Expression::Property { .. }
            | Expression::Aliased { .. }
            | Expression::Pattern(_)
            | Expression::Map(_) => (),
        }
    }

    fn leave_expression(&mut self, expression: &Expression) {
        match expression {
            Expression::Property { key, .. } => {
                self.out.push('.');
                push_key(&mut self.out, key);
            }
            Expression::Function { .. } | Expression::Operation { .. } => self.out.push(')'),
            Expression::List(_) => self.out.push(']'),
            Expression::Aliased { alias, .. } => {
                self.out.push_str(" AS ");
                self.out.push_str(alias.value());
            }
            _ => (),
        }
    }
}

impl Visitor for Renderer {
    fn enter(&mut self, segment: Segment<'_>) {
        let depth = self.depth;
        self.depth += 1;
        if self.skip_depth.is_some() {
            return;
        }

        if let Some((child_depth, written)) = self.lists.last_mut() {
            if *child_depth == depth {
                if *written > 0 {
                    self.out.push_str(", ");
                }
                *written += 1;
            }
        }
        if segment.is_list() {
            self.lists.push((depth + 1, 0));
        }

        match segment {
            Segment::Match(clause) => {
                self.separate();
                if clause.is_optional() {
                    self.out.push_str("OPTIONAL ");
                }
                self.out.push_str("MATCH ");
            }
            Segment::Where(_) => self.out.push_str(" WHERE "),
            Segment::Return(clause) => {
                self.separate();
                self.out.push_str("RETURN ");
                if clause.is_distinct() {
                    self.out.push_str("DISTINCT ");
                }
            }
            Segment::With(clause) => {
                self.separate();
                self.out.push_str("WITH ");
                if clause.is_distinct() {
                    self.out.push_str("DISTINCT ");
                }
            }
            Segment::Delete(clause) => {
                self.separate();
                if clause.is_detach() {
                    self.out.push_str("DETACH ");
                }
                self.out.push_str("DELETE ");
            }
            Segment::Order(_) => self.out.push_str(" ORDER BY "),
            Segment::Skip(skip) => self.out.push_str(&format!(" SKIP {}", skip)),
            Segment::Limit(limit) => self.out.push_str(&format!(" LIMIT {}", limit)),
            Segment::Condition(condition) => match condition {
                Condition::Compound(_) => self.out.push('('),
                Condition::Not(_) => self.out.push_str("NOT ("),
                _ => (),
            },
            Segment::Operator(operator) => {
                self.out.push(' ');
                self.out.push_str(operator.symbol());
                if !operator.is_postfix() {
                    self.out.push(' ');
                }
            }
            Segment::Expression(expression) => self.enter_expression(expression),
            Segment::Map(_) => self.out.push('{'),
            Segment::MapEntry(key) => {
                push_key(&mut self.out, key);
                self.out.push_str(": ");
            }
            Segment::Node(node) => {
                self.node(node);
                self.skip_depth = Some(depth);
            }
            Segment::RelationshipDetail(relationship) => {
                self.relationship_detail(relationship);
                self.skip_depth = Some(depth);
            }
            Segment::SymbolicName(name) => self.out.push_str(name.value()),
            Segment::SinglePartQuery(_)
            | Segment::MultiPartQuery(_)
            | Segment::Part(_)
            | Segment::Pattern(_)
            | Segment::ExpressionList(_)
            | Segment::SortItem(_)
            | Segment::Relationship(_)
            | Segment::RelationshipChain(_) => (),
        }
    }

    fn leave(&mut self, segment: Segment<'_>) {
        self.depth -= 1;
        if let Some(skip_depth) = self.skip_depth {
            if skip_depth == self.depth {
                self.skip_depth = None;
            }
            return;
        }

        if segment.is_list() {
            self.lists.pop();
        }

        match segment {
            Segment::Condition(condition) => match condition {
                Condition::Compound(_) | Condition::Not(_) => self.out.push(')'),
                _ => (),
            },
            Segment::SortItem(item) => {
                if let Some(direction) = item.direction() {
                    self.out.push(' ');
                    self.out.push_str(direction.symbol());
                }
            }
            Segment::Expression(expression) => self.leave_expression(expression),
            Segment::Map(_) => self.out.push('}'),
            _ => (),
        }
    }
}
