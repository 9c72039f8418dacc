/// Logs entry and exit of `$body` at debug level, evaluating to its result.
#[macro_export]
macro_rules! log_fn {
    ($name:expr, $body:block) => {{
        let name = $name;
        log::debug!("-> {}", name);
        let result = { $body };
        log::debug!("<- {}", name);
        result
    }};
}
