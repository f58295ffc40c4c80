//! Textual, identifier-safe function rewrites (§4.3b).
//!
//! Each rewrite locates case-insensitive calls to a source-dialect
//! function name at a word boundary, captures the balanced-paren argument
//! list (so nested calls and parenthesized expressions inside an argument
//! don't confuse the split), and replaces the whole call with the
//! engine-dialect equivalent built from the same argument text.

use regex::Regex;

use crate::sqltext::{find_matching_paren, split_top_level};

pub fn rewrite_functions(sql: &str) -> String {
    let sql = rewrite_call(sql, "IFF", 3, |a| {
        format!("CASE WHEN {} THEN {} ELSE {} END", a[0], a[1], a[2])
    });
    let sql = rewrite_call(&sql, "NVL2", 3, |a| {
        format!("CASE WHEN {} IS NOT NULL THEN {} ELSE {} END", a[0], a[1], a[2])
    });
    let sql = rewrite_call(&sql, "NVL", 2, |a| format!("COALESCE({}, {})", a[0], a[1]));
    let sql = rewrite_call(&sql, "LISTAGG", 2, |a| format!("STRING_AGG({}, {})", a[0], a[1]));
    let sql = rewrite_call(&sql, "DATEDIFF", 3, |a| {
        format!("date_diff('{}', {}, {})", unquote_part(&a[0]), a[1], a[2])
    });
    rewrite_call(&sql, "DATEADD", 3, |a| {
        format!("({} + ({}) * INTERVAL '1 {}')", a[2], a[1], unquote_part(&a[0]))
    })
}

/// `DATEADD`/`DATEDIFF`'s first argument is a bare date-part keyword
/// (`day`, `month`, …) in the source dialect; strip any quoting a caller
/// supplied so the rewritten call always carries a clean string literal.
fn unquote_part(part: &str) -> String {
    part.trim().trim_matches('\'').trim_matches('"').to_lowercase()
}

/// Finds every balanced-paren call to `name` (case-insensitive, at a word
/// boundary) with exactly `arity` top-level comma-separated arguments, and
/// replaces it with `render(args)`. Calls with a different argument count
/// are left untouched, since that almost always means the rewrite doesn't
/// apply (a user-defined function of the same name, say) rather than a
/// malformed call worth failing compilation over.
fn rewrite_call(sql: &str, name: &str, arity: usize, render: impl Fn(&[String]) -> String) -> String {
    let pattern = Regex::new(&format!(r"(?i)\b{name}\s*\(")).expect("valid function-call regex");
    let mut out = String::with_capacity(sql.len());
    let mut cursor = 0;

    while let Some(m) = pattern.find(&sql[cursor..]) {
        let call_start = cursor + m.start();
        let open_paren = cursor + m.end() - 1;
        out.push_str(&sql[cursor..call_start]);

        match find_matching_paren(sql, open_paren) {
            Some(close_paren) => {
                let args_text = &sql[open_paren + 1..close_paren];
                let args = split_top_level(args_text);
                if args.len() == arity {
                    out.push_str(&render(&args));
                } else {
                    out.push_str(&sql[call_start..=close_paren]);
                }
                cursor = close_paren + 1;
            }
            None => {
                // Unbalanced parens: leave the rest of the input untouched
                // rather than guess.
                out.push_str(&sql[call_start..]);
                cursor = sql.len();
            }
        }
    }
    out.push_str(&sql[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_iff() {
        assert_eq!(
            rewrite_functions("SELECT IFF(1=1,'yes','no')"),
            "SELECT CASE WHEN 1=1 THEN 'yes' ELSE 'no' END"
        );
    }

    #[test]
    fn rewrites_nvl_and_nvl2() {
        assert_eq!(rewrite_functions("SELECT NVL(NULL,'d')"), "SELECT COALESCE(NULL, 'd')");
        assert_eq!(
            rewrite_functions("SELECT NVL2(a,b,c)"),
            "SELECT CASE WHEN a IS NOT NULL THEN b ELSE c END"
        );
    }

    #[test]
    fn rewrites_datediff_and_dateadd() {
        assert_eq!(
            rewrite_functions("SELECT DATEDIFF(day,'2024-01-01','2024-01-10')"),
            "SELECT date_diff('day', '2024-01-01', '2024-01-10')"
        );
        assert_eq!(
            rewrite_functions("SELECT DATEADD(day, 5, d)"),
            "SELECT (d + (5) * INTERVAL '1 day')"
        );
    }

    #[test]
    fn rewrites_listagg() {
        assert_eq!(
            rewrite_functions("SELECT LISTAGG(name, ', ')"),
            "SELECT STRING_AGG(name, ', ')"
        );
    }

    #[test]
    fn leaves_unrelated_calls_untouched() {
        assert_eq!(rewrite_functions("SELECT COUNT(*) FROM t"), "SELECT COUNT(*) FROM t");
    }

    #[test]
    fn handles_nested_parens_in_arguments() {
        assert_eq!(
            rewrite_functions("SELECT IFF(a > (1+2), 'x', 'y')"),
            "SELECT CASE WHEN a > (1+2) THEN 'x' ELSE 'y' END"
        );
    }
}
