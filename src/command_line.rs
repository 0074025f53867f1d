use regex::Regex;
use std::sync::LazyLock;

// Quoted literals, optionally prefixed (b'..', r"..", rb'..'), stay one token
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?x)
        [A-Za-z]{0,2}"(?:[^"\\]|\\.)*"
        | [A-Za-z]{0,2}'(?:[^'\\]|\\.)*'
        | \S+
        "#,
    )
    .expect("command token pattern is valid")
});

/// Split a command line into the command name and its arguments.
///
/// Returns `None` for blank lines and `#` comments.
pub fn tokenize(line: &str) -> Option<(String, Vec<String>)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut tokens = TOKEN.find_iter(line).map(|token| token.as_str().to_string());
    let name = tokens.next()?;
    Some((name, tokens.collect()))
}
