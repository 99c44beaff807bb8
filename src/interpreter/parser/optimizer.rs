use crate::{
    ast::{Conditional, Node, Operation},
    error::ParseError,
    interpreter::parser::core::ParseResult,
};

/// The cast pseudo-operator.
pub const CAST_SYMBOL: &str = ":";

fn optimize_all(nodes: Vec<Node>) -> ParseResult<Vec<Node>> {
    nodes.into_iter().map(optimize).collect()
}

fn optimize_boxed(node: Box<Node>) -> ParseResult<Box<Node>> {
    optimize(*node).map(Box::new)
}

/// Rewrites a tree bottom-up.
///
/// Every `value : type` operation becomes a [`Node::Cast`] whose target is
/// the identifier on the right and whose child is the operand on the left.
/// All other nodes are rebuilt unchanged.
///
/// # Errors
/// `ParseError::InvalidCast` if the right operand of `:` is not a plain
/// identifier.
///
/// # Example
/// ```
/// use tea::{ast::Node, interpreter::parser::core::Parser};
///
/// let root = Parser::default().parse("3.7 : int;").unwrap();
/// let Node::Sequence(children) = root else { panic!() };
///
/// assert!(matches!(&children[0], Node::Cast { datatype, .. } if datatype == "int"));
/// ```
pub fn optimize(node: Node) -> ParseResult<Node> {
    Ok(match node {
        Node::Operation(Operation { symbol, children, tags }) => {
            let children = optimize_all(children)?;
            if symbol != CAST_SYMBOL {
                return Ok(Node::Operation(Operation { symbol,
                                                      children,
                                                      tags }));
            }

            let mut children = children.into_iter();
            match (children.next(), children.next()) {
                (Some(child), Some(Node::Identifier(datatype))) => {
                    Node::Cast { datatype,
                                 child: Box::new(child) }
                },
                (_, found) => {
                    return Err(ParseError::InvalidCast { found: found.map_or_else(|| "nothing".to_string(),
                                                                                  |node| node.to_string()) });
                },
            }
        },
        Node::Call { name, arguments } => Node::Call { name,
                                                       arguments: optimize_all(arguments)? },
        Node::Cast { datatype, child } => Node::Cast { datatype,
                                                       child: optimize_boxed(child)? },
        Node::Sequence(children) => Node::Sequence(optimize_all(children)?),
        Node::Assignment { name, child } => Node::Assignment { name,
                                                               child: optimize_boxed(child)? },
        Node::Branch { conditionals, otherwise } => {
            let conditionals = conditionals.into_iter()
                                           .map(|Conditional { condition, body }| {
                                               Ok(Conditional { condition: optimize(condition)?,
                                                                body:      optimize(body)?, })
                                           })
                                           .collect::<ParseResult<_>>()?;
            Node::Branch { conditionals,
                           otherwise: otherwise.map(optimize_boxed).transpose()? }
        },
        Node::Loop { condition, body } => Node::Loop { condition: optimize_boxed(condition)?,
                                                       body:      optimize_boxed(body)?, },
        Node::Return(child) => Node::Return(optimize_boxed(child)?),
        leaf @ (Node::Literal(_)
        | Node::Identifier(_)
        | Node::Declaration { .. }
        | Node::Break
        | Node::Continue) => leaf,
    })
}
