pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

/// Longest prefix of `value` that fits in `max` bytes without splitting a character.
pub fn truncated(value: &str, max: usize) -> (&str, bool) {
    if value.len() <= max {
        return (value, false);
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    (&value[..end], true)
}

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {{
        let (head, cut) = $crate::truncated(&$query, 497);
        format!("{}{}", head.trim_end(), if cut { "..." } else { "" })
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separated_by_skips_empty_items() {
        let mut out = String::from("(");
        separated_by(
            &mut out,
            ["a", "", "b"],
            |out, v| out.push_str(v),
            ",",
        );
        assert_eq!(out, "(a,b");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let query = "é".repeat(300);
        let result = truncate_long!(query);
        assert!(result.ends_with("..."));
        assert!(result.len() <= 500);
        assert_eq!(truncate_long!("select 1"), "select 1");
    }
}
