/// Builds an argument list for an entry point from displayable values.
///
/// ```rust
/// use harbor::harbor_args;
///
/// let args = harbor_args!["--seed", 42, "--verbose"];
/// assert_eq!(args, vec!["--seed", "42", "--verbose"]);
///
/// let empty = harbor_args![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! harbor_args {
    () => {
        Vec::<String>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        vec![$(::std::string::ToString::to_string(&$arg)),+]
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn harbor_args_accepts_mixed_values() {
        let port = 8080;
        let args = crate::harbor_args!["--port", port, "--name", String::from("shop"),];

        assert_eq!(args, vec!["--port", "8080", "--name", "shop"]);
    }
}
