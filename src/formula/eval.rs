use super::error::FormulaError;
use super::parser::{parse, BinOp, Expr};
use crate::engine::namespace::Namespace;

/// Parses and evaluates a formula against a namespace snapshot.
///
/// Arithmetic follows IEEE-754 throughout: division by zero produces an
/// infinity or NaN, never an error. The only evaluation-time failure is a
/// reference to a name the namespace does not hold, which is also how a
/// forward reference to a later charge surfaces.
pub fn evaluate(src: &str, namespace: &Namespace) -> Result<f64, FormulaError> {
    let expr = parse(src)?;
    eval_expr(&expr, namespace)
}

pub fn eval_expr(expr: &Expr, namespace: &Namespace) -> Result<f64, FormulaError> {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Variable(name) => namespace
            .get(name)
            .ok_or_else(|| FormulaError::UnknownVariable(name.clone())),
        Expr::Negate(inner) => Ok(-eval_expr(inner, namespace)?),
        Expr::Binary { op, lhs, rhs } => {
            let l = eval_expr(lhs, namespace)?;
            let r = eval_expr(rhs, namespace)?;
            Ok(match op {
                BinOp::Add => l + r,
                BinOp::Sub => l - r,
                BinOp::Mul => l * r,
                BinOp::Div => l / r,
                BinOp::Rem => l % r,
            })
        }
    }
}
