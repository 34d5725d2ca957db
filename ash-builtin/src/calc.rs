use super::ShellProxy;
use ash_types::{Context, ExitStatus};
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;
use thiserror::Error;
use tracing::debug;

#[derive(Parser)]
#[grammar = "calc.pest"]
struct CalcParser;

#[derive(Error, Debug, PartialEq)]
pub enum CalcError {
    #[error("invalid expression: {0}")]
    Syntax(String),

    #[error("division by zero")]
    DivisionByZero,
}

pub fn description() -> &'static str {
    "Evaluate an arithmetic expression"
}

/// Built-in calc command implementation
/// Supports + - * / %, parentheses and unary minus
pub fn command(ctx: &Context, argv: Vec<String>, _proxy: &mut dyn ShellProxy) -> ExitStatus {
    let expr = argv.get(1..).map(|args| args.join(" ")).unwrap_or_default();
    match evaluate(&expr) {
        Ok(value) => {
            let msg = format!("Result: {}", format_number(value));
            ctx.write_stdout(&console::style(msg).green().to_string()).ok();
            ExitStatus::ExitedWith(0)
        }
        Err(err) => {
            debug!("calc failed for {:?}: {}", expr, err);
            let msg = match err {
                CalcError::Syntax(_) => "calc: invalid expression".to_string(),
                other => format!("calc: {other}"),
            };
            ctx.write_stderr(&console::style(msg).red().for_stderr().to_string())
                .ok();
            ExitStatus::ExitedWith(1)
        }
    }
}

pub fn evaluate(input: &str) -> Result<f64, CalcError> {
    let mut pairs = CalcParser::parse(Rule::calculation, input)
        .map_err(|e| CalcError::Syntax(e.to_string()))?;
    match pairs.next() {
        Some(expr) => eval_expr(expr),
        None => Err(CalcError::Syntax("empty expression".to_string())),
    }
}

fn eval_expr(pair: Pair<Rule>) -> Result<f64, CalcError> {
    match pair.as_rule() {
        Rule::expr | Rule::term => {
            let mut inner = pair.into_inner();
            let mut acc = match inner.next() {
                Some(first) => eval_expr(first)?,
                None => return Err(CalcError::Syntax("missing operand".to_string())),
            };
            while let (Some(op), Some(rhs)) = (inner.next(), inner.next()) {
                let rhs = eval_expr(rhs)?;
                acc = match op.as_rule() {
                    Rule::add => acc + rhs,
                    Rule::subtract => acc - rhs,
                    Rule::multiply => acc * rhs,
                    Rule::divide if rhs == 0.0 => return Err(CalcError::DivisionByZero),
                    Rule::divide => acc / rhs,
                    Rule::modulo if rhs == 0.0 => return Err(CalcError::DivisionByZero),
                    Rule::modulo => acc % rhs,
                    other => return Err(CalcError::Syntax(format!("unexpected {other:?}"))),
                };
            }
            Ok(acc)
        }
        Rule::factor => {
            let mut negate = false;
            for inner in pair.into_inner() {
                if inner.as_rule() == Rule::neg {
                    negate = !negate;
                } else {
                    let value = eval_expr(inner)?;
                    return Ok(if negate { -value } else { value });
                }
            }
            Err(CalcError::Syntax("missing operand".to_string()))
        }
        Rule::number => pair
            .as_str()
            .parse::<f64>()
            .map_err(|e| CalcError::Syntax(e.to_string())),
        other => Err(CalcError::Syntax(format!("unexpected {other:?}"))),
    }
}

/// Integral results print without a fractional part
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
