/// Math expression evaluator for the expression input dialect
///
/// Understands arithmetic, matrix literals (`[1, 0; 0, 1]` or
/// `[[1, 0], [0, 1]]`) and a handful of matrix helpers such as
/// `identity(3)`, `transpose(M)` and `det(M)`.
use nalgebra::{DMatrix, DVector};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{
        alpha1, alphanumeric1, char, digit0, digit1, multispace0, one_of, space0,
    },
    combinator::{all_consuming, map, map_res, opt, recognize},
    error::{Error, ErrorKind},
    multi::{fold_many0, many0, separated_list0},
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};

use crate::error::EvalError;
use crate::value::Value;

/// Largest dimension accepted by the matrix constructors
const MAX_DIMENSION: usize = 64;

/// Deepest nesting of brackets, parentheses, calls and exponents
const MAX_DEPTH: usize = 64;

/// Capability that turns an expression string into a plain nested value.
///
/// Parsers take one of these as an optional collaborator; when it is absent
/// the expression dialect is skipped.
pub trait ExpressionEvaluator {
    fn evaluate(&self, input: &str) -> Result<Value, EvalError>;
}

/// Built-in evaluator backed by a small nom grammar
#[derive(Debug, Clone, Copy, Default)]
pub struct MathEvaluator;

impl ExpressionEvaluator for MathEvaluator {
    fn evaluate(&self, input: &str) -> Result<Value, EvalError> {
        let expr = parse_expression(input)?;
        eval(&expr)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Number(f64),
    Symbol(String),
    Call(String, Vec<Expr>),
    /// Matrix literal: outer vec is `;`-separated rows, inner is `,`-separated cells
    Matrix(Vec<Vec<Expr>>),
    Neg(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// Left-associative run of `+ -` or `* /` operands, kept flat
    Chain(Box<Expr>, Vec<(BinOp, Expr)>),
}

/// Where the parser is: nesting depth and whether inside brackets or parentheses
#[derive(Debug, Clone, Copy)]
struct Ctx {
    depth: usize,
    enclosed: bool,
}

impl Ctx {
    const TOP: Ctx = Ctx {
        depth: 0,
        enclosed: false,
    };

    fn descend(self, input: &str, enclosed: bool) -> Result<Ctx, nom::Err<Error<&str>>> {
        if self.depth >= MAX_DEPTH {
            return Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge)));
        }
        Ok(Ctx {
            depth: self.depth + 1,
            enclosed: self.enclosed || enclosed,
        })
    }
}

fn parse_expression(input: &str) -> Result<Expr, EvalError> {
    match all_consuming(terminated(|i| expr(Ctx::TOP, i), space0))(input) {
        Ok((_, expr)) => Ok(expr),
        Err(nom::Err::Failure(e)) if e.code == ErrorKind::TooLarge => Err(EvalError::Domain(
            "expression nested too deeply".to_string(),
        )),
        Err(e) => Err(EvalError::Syntax(format!("{:?}", e))),
    }
}

/// Whitespace between tokens. Newlines only count inside `[...]` or `(...)`,
/// so multi-line delimited rows never read as one expression.
fn gap(ctx: Ctx, input: &str) -> IResult<&str, &str> {
    if ctx.enclosed {
        multispace0(input)
    } else {
        space0(input)
    }
}

fn ws<'a, O, F>(ctx: Ctx, inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    preceded(move |i| gap(ctx, i), inner)
}

/// `+` or `-` as a binary operator.
///
/// A sign with a space before it but none after (`1 -2`) starts a new
/// token instead, so delimited rows never read as one long sum.
fn additive_op(ctx: Ctx, input: &str) -> IResult<&str, BinOp> {
    let (rest, spacing) = gap(ctx, input)?;
    let (after, op) = one_of("+-")(rest)?;
    if !spacing.is_empty() && !after.starts_with(char::is_whitespace) {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Char)));
    }
    Ok((after, if op == '+' { BinOp::Add } else { BinOp::Sub }))
}

fn multiplicative_op(ctx: Ctx, input: &str) -> IResult<&str, BinOp> {
    let (after, op) = ws(ctx, one_of("*/"))(input)?;
    Ok((after, if op == '*' { BinOp::Mul } else { BinOp::Div }))
}

fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary(op, Box::new(lhs), Box::new(rhs))
}

/// `operand (operator operand)*` without growing the tree with its length
fn chain<'a>(
    ctx: Ctx,
    input: &'a str,
    operator: fn(Ctx, &'a str) -> IResult<&'a str, BinOp>,
    operand: fn(Ctx, &'a str) -> IResult<&'a str, Expr>,
) -> IResult<&'a str, Expr> {
    let (mut input, first) = operand(ctx, input)?;
    let mut rest = Vec::new();
    while let Ok((after, op)) = operator(ctx, input) {
        match operand(ctx, after) {
            Ok((after, rhs)) => {
                rest.push((op, rhs));
                input = after;
            }
            Err(nom::Err::Error(_)) => break,
            Err(e) => return Err(e),
        }
    }
    if rest.is_empty() {
        Ok((input, first))
    } else {
        Ok((input, Expr::Chain(Box::new(first), rest)))
    }
}

fn expr(ctx: Ctx, input: &str) -> IResult<&str, Expr> {
    chain(ctx, input, additive_op, term)
}

fn term(ctx: Ctx, input: &str) -> IResult<&str, Expr> {
    chain(ctx, input, multiplicative_op, unary)
}

// Runs of signs collapse to a single negation or none
fn unary(ctx: Ctx, input: &str) -> IResult<&str, Expr> {
    let (input, negative) = fold_many0(
        ws(ctx, one_of("+-")),
        || false,
        |negative, sign| negative ^ (sign == '-'),
    )(input)?;
    let (input, operand) = power(ctx, input)?;
    Ok(if negative {
        (input, Expr::Neg(Box::new(operand)))
    } else {
        (input, operand)
    })
}

// `-2^2` is `-(2^2)` and `2^3^2` is `2^(3^2)`
fn power(ctx: Ctx, input: &str) -> IResult<&str, Expr> {
    let (input, base) = atom(ctx, input)?;
    let (after, caret) = opt(ws(ctx, char('^')))(input)?;
    if caret.is_none() {
        return Ok((input, base));
    }
    let (after, exponent) = unary(ctx.descend(after, false)?, after)?;
    Ok((after, binary(BinOp::Pow, base, exponent)))
}

fn atom(ctx: Ctx, input: &str) -> IResult<&str, Expr> {
    let (input, _) = gap(ctx, input)?;
    alt((
        number,
        |i| matrix(ctx, i),
        |i| call_or_symbol(ctx, i),
        |i| parens(ctx, i),
    ))(input)
}

fn number(input: &str) -> IResult<&str, Expr> {
    let mantissa = alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ));
    let exponent = opt(tuple((one_of("eE"), opt(one_of("+-")), digit1)));
    map(
        map_res(recognize(pair(mantissa, exponent)), str::parse::<f64>),
        Expr::Number,
    )(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn call_or_symbol(ctx: Ctx, input: &str) -> IResult<&str, Expr> {
    let (input, name) = identifier(input)?;
    let name = name.to_string();
    let (after, open) = opt(ws(ctx, char('(')))(input)?;
    if open.is_none() {
        return Ok((input, Expr::Symbol(name)));
    }
    let inner = ctx.descend(after, true)?;
    let (after, args) = separated_list0(ws(inner, char(',')), |i| expr(inner, i))(after)?;
    let (after, _) = ws(inner, char(')'))(after)?;
    Ok((after, Expr::Call(name, args)))
}

fn parens(ctx: Ctx, input: &str) -> IResult<&str, Expr> {
    let (input, _) = char('(')(input)?;
    let inner = ctx.descend(input, true)?;
    let (input, body) = expr(inner, input)?;
    let (input, _) = ws(inner, char(')'))(input)?;
    Ok((input, body))
}

fn matrix(ctx: Ctx, input: &str) -> IResult<&str, Expr> {
    let (input, _) = char('[')(input)?;
    let inner = ctx.descend(input, true)?;
    let row = separated_list0(ws(inner, char(',')), |i| expr(inner, i));
    let (input, rows) = separated_list0(ws(inner, char(';')), row)(input)?;
    let (input, _) = ws(inner, char(']'))(input)?;
    Ok((input, Expr::Matrix(rows)))
}

fn eval(expr: &Expr) -> Result<Value, EvalError> {
    match expr {
        Expr::Number(x) => Ok(Value::Scalar(*x)),
        Expr::Symbol(name) => constant(name)
            .map(Value::Scalar)
            .ok_or_else(|| EvalError::UnknownSymbol(name.clone())),
        Expr::Neg(inner) => Ok(map_scalars(eval(inner)?, &|x| -x)),
        Expr::Binary(op, lhs, rhs) => apply_binary(*op, eval(lhs)?, eval(rhs)?),
        Expr::Chain(first, rest) => rest
            .iter()
            .try_fold(eval(first)?, |acc, (op, rhs)| apply_binary(*op, acc, eval(rhs)?)),
        Expr::Call(name, args) => {
            let args = args.iter().map(eval).collect::<Result<Vec<_>, _>>()?;
            call(name, args)
        }
        Expr::Matrix(rows) => eval_matrix(rows),
    }
}

fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" | "PI" => Some(std::f64::consts::PI),
        "e" | "E" => Some(std::f64::consts::E),
        "tau" => Some(std::f64::consts::TAU),
        _ => None,
    }
}

fn eval_matrix(rows: &[Vec<Expr>]) -> Result<Value, EvalError> {
    let mut evaluated = Vec::with_capacity(rows.len());
    for row in rows {
        let cells = row.iter().map(eval).collect::<Result<Vec<_>, _>>()?;
        evaluated.push(cells);
    }

    // Without `;` the literal is a plain list, e.g. `[1, 2, 3]` or `[[1, 2], [3, 4]]`
    if evaluated.len() == 1 {
        return Ok(Value::List(evaluated.remove(0)));
    }

    let width = evaluated[0].len();
    if evaluated.iter().any(|row| row.len() != width) {
        return Err(EvalError::DimensionMismatch(
            "matrix rows must have the same length".to_string(),
        ));
    }
    Ok(Value::List(evaluated.into_iter().map(Value::List).collect()))
}

fn map_scalars(value: Value, f: &dyn Fn(f64) -> f64) -> Value {
    match value {
        Value::Scalar(x) => Value::Scalar(f(x)),
        Value::List(items) => Value::List(items.into_iter().map(|v| map_scalars(v, f)).collect()),
    }
}

/// Element-wise combination with scalar broadcasting
fn zip_with(lhs: Value, rhs: Value, f: &dyn Fn(f64, f64) -> f64) -> Result<Value, EvalError> {
    match (lhs, rhs) {
        (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(f(a, b))),
        (Value::Scalar(a), list @ Value::List(_)) => Ok(map_scalars(list, &|b| f(a, b))),
        (list @ Value::List(_), Value::Scalar(b)) => Ok(map_scalars(list, &|a| f(a, b))),
        (Value::List(a), Value::List(b)) => {
            if a.len() != b.len() {
                return Err(EvalError::DimensionMismatch(format!(
                    "cannot combine lists of length {} and {}",
                    a.len(),
                    b.len()
                )));
            }
            a.into_iter()
                .zip(b)
                .map(|(x, y)| zip_with(x, y, f))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List)
        }
    }
}

fn apply_binary(op: BinOp, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    match op {
        BinOp::Add => zip_with(lhs, rhs, &|a, b| a + b),
        BinOp::Sub => zip_with(lhs, rhs, &|a, b| a - b),
        BinOp::Mul => match (&lhs, &rhs) {
            (Value::List(_), Value::List(_)) => multiply(&lhs, &rhs),
            _ => zip_with(lhs, rhs, &|a, b| a * b),
        },
        BinOp::Div => match rhs {
            Value::List(_) => Err(EvalError::Domain(
                "division by a matrix is not supported".to_string(),
            )),
            rhs => zip_with(lhs, rhs, &|a, b| a / b),
        },
        BinOp::Pow => match (lhs, rhs) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a.powf(b))),
            _ => Err(EvalError::Domain("matrix power is not supported".to_string())),
        },
    }
}

/// Read a list of scalars as a vector
fn as_vector(value: &Value) -> Option<DVector<f64>> {
    let items = value.as_list()?;
    let data = items
        .iter()
        .map(|item| match item {
            Value::Scalar(x) => Some(*x),
            Value::List(_) => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some(DVector::from_vec(data))
}

/// Read a non-empty list of equal-length scalar rows as a matrix
fn as_matrix(value: &Value) -> Option<DMatrix<f64>> {
    let rows = value.as_list()?;
    if rows.is_empty() {
        return None;
    }
    let rows = rows.iter().map(as_vector).collect::<Option<Vec<_>>>()?;
    let ncols = rows[0].len();
    if rows.iter().any(|row| row.len() != ncols) {
        return None;
    }
    let data: Vec<f64> = rows.iter().flat_map(|row| row.iter().copied()).collect();
    Some(DMatrix::from_row_slice(rows.len(), ncols, &data))
}

fn matrix_to_value(m: &DMatrix<f64>) -> Value {
    Value::List(
        m.row_iter()
            .map(|row| Value::List(row.iter().copied().map(Value::Scalar).collect()))
            .collect(),
    )
}

fn vector_to_value(v: &DVector<f64>) -> Value {
    Value::List(v.iter().copied().map(Value::Scalar).collect())
}

fn mismatch(lhs: (usize, usize), rhs: (usize, usize)) -> EvalError {
    EvalError::DimensionMismatch(format!(
        "cannot multiply {}x{} by {}x{}",
        lhs.0, lhs.1, rhs.0, rhs.1
    ))
}

fn multiply(lhs: &Value, rhs: &Value) -> Result<Value, EvalError> {
    if let Some(a) = as_vector(lhs) {
        if let Some(b) = as_vector(rhs) {
            if a.len() != b.len() {
                return Err(mismatch((1, a.len()), (b.len(), 1)));
            }
            return Ok(Value::Scalar(a.dot(&b)));
        }
        if let Some(b) = as_matrix(rhs) {
            if a.len() != b.nrows() {
                return Err(mismatch((1, a.len()), b.shape()));
            }
            let row = a.transpose() * b;
            return Ok(Value::List(row.iter().copied().map(Value::Scalar).collect()));
        }
    }

    if let Some(a) = as_matrix(lhs) {
        if let Some(b) = as_vector(rhs) {
            if a.ncols() != b.len() {
                return Err(mismatch(a.shape(), (b.len(), 1)));
            }
            return Ok(vector_to_value(&(a * b)));
        }
        if let Some(b) = as_matrix(rhs) {
            if a.ncols() != b.nrows() {
                return Err(mismatch(a.shape(), b.shape()));
            }
            return Ok(matrix_to_value(&(a * b)));
        }
    }

    Err(EvalError::DimensionMismatch(
        "operands are not numeric matrices".to_string(),
    ))
}

fn dimension(name: &str, arg: &Value) -> Result<usize, EvalError> {
    match arg {
        Value::Scalar(x) if x.is_finite() && *x >= 0.0 && x.fract() == 0.0 => {
            let n = *x as usize;
            if n > MAX_DIMENSION {
                return Err(EvalError::Domain(format!(
                    "{}: dimension {} exceeds {}",
                    name, n, MAX_DIMENSION
                )));
            }
            Ok(n)
        }
        _ => Err(EvalError::Domain(format!(
            "{}: dimension must be a non-negative integer",
            name
        ))),
    }
}

fn expect_args(name: &str, args: &[Value], expected: &'static str, ok: bool) -> Result<(), EvalError> {
    if ok {
        Ok(())
    } else {
        Err(EvalError::Arity {
            name: name.to_string(),
            expected,
            got: args.len(),
        })
    }
}

fn call(name: &str, mut args: Vec<Value>) -> Result<Value, EvalError> {
    let elementwise: Option<fn(f64) -> f64> = match name {
        "sqrt" => Some(f64::sqrt),
        "abs" => Some(f64::abs),
        "sin" => Some(f64::sin),
        "cos" => Some(f64::cos),
        "tan" => Some(f64::tan),
        "exp" => Some(f64::exp),
        "log" => Some(f64::ln),
        "round" => Some(f64::round),
        "floor" => Some(f64::floor),
        "ceil" => Some(f64::ceil),
        _ => None,
    };
    if let Some(f) = elementwise {
        expect_args(name, &args, "1", args.len() == 1)?;
        return Ok(map_scalars(args.remove(0), &f));
    }

    match name {
        "identity" | "eye" => {
            expect_args(name, &args, "1 or 2", matches!(args.len(), 1 | 2))?;
            let rows = dimension(name, &args[0])?;
            let cols = match args.get(1) {
                Some(arg) => dimension(name, arg)?,
                None => rows,
            };
            Ok(matrix_to_value(&DMatrix::identity(rows, cols)))
        }
        "zeros" | "ones" => {
            expect_args(name, &args, "1 or 2", matches!(args.len(), 1 | 2))?;
            let fill = if name == "zeros" { 0.0 } else { 1.0 };
            let rows = dimension(name, &args[0])?;
            match args.get(1) {
                Some(arg) => {
                    let cols = dimension(name, arg)?;
                    Ok(matrix_to_value(&DMatrix::from_element(rows, cols, fill)))
                }
                None => Ok(vector_to_value(&DVector::from_element(rows, fill))),
            }
        }
        "transpose" => {
            expect_args(name, &args, "1", args.len() == 1)?;
            let arg = args.remove(0);
            match as_matrix(&arg) {
                Some(m) => Ok(matrix_to_value(&m.transpose())),
                None => Ok(arg),
            }
        }
        "det" => {
            expect_args(name, &args, "1", args.len() == 1)?;
            if let Value::Scalar(x) = args[0] {
                return Ok(Value::Scalar(x));
            }
            match as_matrix(&args[0]) {
                Some(m) if m.is_square() => Ok(Value::Scalar(m.determinant())),
                _ => Err(EvalError::DimensionMismatch(
                    "det requires a square matrix".to_string(),
                )),
            }
        }
        _ => Err(EvalError::UnknownFunction(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn evaluate(input: &str) -> Result<Value, EvalError> {
        MathEvaluator.evaluate(input)
    }

    fn scalar(input: &str) -> f64 {
        match evaluate(input) {
            Ok(Value::Scalar(x)) => x,
            other => panic!("expected scalar for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_arithmetic_precedence() {
        assert_eq!(scalar("1 + 2 * 3"), 7.0);
        assert_eq!(scalar("(1 + 2) * 3"), 9.0);
        assert_eq!(scalar("-2^2"), -4.0);
        assert_eq!(scalar("2^3^2"), 512.0);
        assert_eq!(scalar("10 - 4 - 3"), 3.0);
        assert_eq!(scalar(".5e1"), 5.0);
        assert_relative_eq!(scalar("cos(pi)"), -1.0);
    }

    #[test]
    fn test_matrix_literals() {
        let semicolons = evaluate("[1, 0, 0; 0, 1, 0; 0, 0, 1]").unwrap();
        let nested = evaluate("[[1,0,0],[0,1,0],[0,0,1]]").unwrap();
        assert_eq!(semicolons, nested);
        assert_eq!(evaluate("identity(3)").unwrap(), nested);
        assert_eq!(evaluate("eye(3)").unwrap(), nested);
    }

    #[test]
    fn test_ragged_rows() {
        assert!(matches!(
            evaluate("[1, 2; 3]"),
            Err(EvalError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_broadcast_and_products() {
        assert_eq!(
            evaluate("2 * [1, 2; 3, 4]").unwrap(),
            Value::from_rows([[2.0, 4.0], [6.0, 8.0]])
        );
        assert_eq!(
            evaluate("[1, 2; 3, 4] * [1, 1]").unwrap(),
            Value::List(vec![Value::Scalar(3.0), Value::Scalar(7.0)])
        );
        assert_eq!(
            evaluate("[1, 2; 3, 4] * [0, 1; 1, 0]").unwrap(),
            Value::from_rows([[2.0, 1.0], [4.0, 3.0]])
        );
        assert_eq!(scalar("[1, 2, 3] * [4, 5, 6]"), 32.0);
        assert_eq!(
            evaluate("[1, 2] + [3, 4]").unwrap(),
            Value::List(vec![Value::Scalar(4.0), Value::Scalar(6.0)])
        );
        assert!(evaluate("[1, 2] + [1, 2, 3]").is_err());
        assert!(evaluate("[1, 2; 3, 4] * [1, 2, 3]").is_err());
    }

    #[test]
    fn test_functions() {
        assert_eq!(
            evaluate("transpose([1, 2; 3, 4])").unwrap(),
            Value::from_rows([[1.0, 3.0], [2.0, 4.0]])
        );
        assert_relative_eq!(scalar("det([2, 0; 0, 3])"), 6.0, epsilon = 1e-12);
        assert_eq!(
            evaluate("zeros(2, 3)").unwrap(),
            Value::from_rows([[0.0; 3], [0.0; 3]])
        );
        assert_eq!(
            evaluate("ones(2)").unwrap(),
            Value::List(vec![Value::Scalar(1.0), Value::Scalar(1.0)])
        );
        assert_eq!(
            evaluate("abs([-1, 2])").unwrap(),
            Value::List(vec![Value::Scalar(1.0), Value::Scalar(2.0)])
        );
        assert!(matches!(
            evaluate("frobnicate(1)"),
            Err(EvalError::UnknownFunction(_))
        ));
        assert!(matches!(evaluate("sqrt(1, 2)"), Err(EvalError::Arity { .. })));
        assert!(matches!(evaluate("identity(1.5)"), Err(EvalError::Domain(_))));
        assert!(matches!(evaluate("foo"), Err(EvalError::UnknownSymbol(_))));
    }

    #[test]
    fn test_delimited_rows_are_not_expressions() {
        assert!(matches!(evaluate("1,0,0;0,1,0"), Err(EvalError::Syntax(_))));
        assert!(matches!(evaluate("1 0 0\n0 1 0"), Err(EvalError::Syntax(_))));
        assert!(matches!(evaluate("1 -2 -3"), Err(EvalError::Syntax(_))));
        assert!(matches!(evaluate("1\n-2"), Err(EvalError::Syntax(_))));
        assert!(matches!(evaluate(""), Err(EvalError::Syntax(_))));
    }

    #[test]
    fn test_newlines_inside_brackets() {
        let identity = evaluate("identity(3)").unwrap();
        assert_eq!(evaluate("[1, 0, 0;\n 0, 1, 0;\n 0, 0, 1]").unwrap(), identity);
        assert_eq!(evaluate("[\n  [1, 0, 0],\n  [0, 1, 0],\n  [0, 0, 1]\n]").unwrap(), identity);
        assert_eq!(scalar("(1 +\n 2) * 3"), 9.0);
        assert_relative_eq!(scalar("det(\n[2, 0; 0, 3]\n)"), 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nesting_limit() {
        let parens = |n: usize| format!("{}1{}", "(".repeat(n), ")".repeat(n));
        assert_eq!(scalar(&parens(MAX_DEPTH)), 1.0);
        for input in [
            parens(MAX_DEPTH + 1),
            parens(5000),
            format!("{}1{}", "[".repeat(5000), "]".repeat(5000)),
            format!("{}2", "2^".repeat(5000)),
            format!("{}1", "abs(".repeat(5000)),
        ] {
            assert_eq!(
                evaluate(&input),
                Err(EvalError::Domain("expression nested too deeply".to_string()))
            );
        }
    }

    #[test]
    fn test_long_runs_stay_flat() {
        assert_eq!(scalar(&format!("{}1", "- ".repeat(5001))), -1.0);
        assert_eq!(scalar(&format!("{}1", "-".repeat(100_000))), 1.0);
        assert_eq!(scalar(&vec!["1"; 100_000].join(" + ")), 100_000.0);
        assert_eq!(scalar(&vec!["1"; 10_000].join(" * ")), 1.0);
    }

    #[test]
    fn test_dimension_limit() {
        assert!(evaluate("zeros(64, 64)").is_ok());
        assert!(matches!(evaluate("zeros(1024, 1024)"), Err(EvalError::Domain(_))));
        assert!(matches!(evaluate("identity(65)"), Err(EvalError::Domain(_))));
    }

    #[test]
    fn test_spacing_around_signs() {
        assert_eq!(scalar("1 - 2"), -1.0);
        assert_eq!(scalar("1-2"), -1.0);
        assert_eq!(scalar("1- 2"), -1.0);
        assert_eq!(scalar("1 - -2"), 3.0);
        assert_eq!(scalar("\t2 *\t3 "), 6.0);
    }
}
