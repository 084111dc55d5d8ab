use crate::expr;

/// Renders `expr` as an indented tree, one node per line:
///
/// ```text
/// +
/// ├── 1.0
/// └── *
///     ├── 2.0
///     └── 3.0
/// ```
pub fn print(expr: &expr::Expr) -> String {
    let mut output = String::new();
    write_node(expr, &mut output, "");
    output
}

fn write_node(expr: &expr::Expr, output: &mut String, prefix: &str) {
    match expr {
        expr::Expr::Literal(literal) => {
            output.push_str(&format!("{}\n", literal));
        }
        expr::Expr::Grouping(inner) => {
            output.push_str("()\n");
            write_last_child(inner, output, prefix);
        }
        expr::Expr::Unary(operator, right) => {
            output.push_str(&format!("{}\n", operator.lexeme));
            write_last_child(right, output, prefix);
        }
        expr::Expr::Binary(left, operator, right) => {
            output.push_str(&format!("{}\n", operator.lexeme));
            output.push_str(prefix);
            output.push_str("├── ");
            write_node(left, output, &format!("{}│   ", prefix));
            write_last_child(right, output, prefix);
        }
    }
}

fn write_last_child(expr: &expr::Expr, output: &mut String, prefix: &str) {
    output.push_str(prefix);
    output.push_str("└── ");
    write_node(expr, output, &format!("{}    ", prefix));
}
