use crate::expr::Expr;
use crate::simplify::rules::{
    flatten_sum, is_sum, simplify_add, simplify_div, simplify_fully, simplify_mul, simplify_pow,
    simplify_sub, sum_of,
};
use num_traits::{Signed, ToPrimitive};

/// Products with more terms than this are left factored.
const DISTRIBUTE_TERM_LIMIT: usize = 64;

/// Multiply out products of sums and positive integer powers of sums.
pub fn expand(expr: Expr) -> Expr {
    simplify_fully(expand_node(simplify_fully(expr)))
}

fn expand_node(expr: Expr) -> Expr {
    match expr {
        Expr::Add(a, b) => simplify_add(expand_node(*a), expand_node(*b)),
        Expr::Sub(a, b) => simplify_sub(expand_node(*a), expand_node(*b)),
        Expr::Neg(a) => distribute(Expr::integer(-1), expand_node(*a)),
        Expr::Mul(a, b) => distribute(expand_node(*a), expand_node(*b)),
        Expr::Div(a, b) => simplify_div(expand_node(*a), expand_node(*b)),
        Expr::Pow(base, exp) => {
            let base = expand_node(*base);
            let exp = expand_node(*exp);
            match small_power(&exp) {
                Some(n) if is_sum(&base) => {
                    (1..n).fold(base.clone(), |acc, _| distribute(acc, base.clone()))
                }
                _ => simplify_pow(base, exp),
            }
        }
        leaf => leaf,
    }
}

fn small_power(exp: &Expr) -> Option<usize> {
    match exp {
        Expr::Constant(e) if e.is_integer() && e.is_positive() => e
            .to_integer()
            .to_usize()
            .filter(|n| *n <= DISTRIBUTE_TERM_LIMIT),
        _ => None,
    }
}

fn distribute(a: Expr, b: Expr) -> Expr {
    let left = flatten_sum(&a);
    let right = flatten_sum(&b);
    if left.len() * right.len() > DISTRIBUTE_TERM_LIMIT {
        return simplify_mul(a, b);
    }
    if left.len() == 1 && right.len() == 1 {
        return simplify_mul(a, b);
    }
    let products: Vec<Expr> = left
        .iter()
        .flat_map(|l| right.iter().map(move |r| simplify_mul(l.clone(), r.clone())))
        .collect();
    sum_of(products)
}
