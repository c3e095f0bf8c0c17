use std::fmt::Debug;

/// Turns any `Result` with a debuggable error into a `Result<T, String>`,
/// prefixing the error with some context.
pub trait ErrorStringExt<T> {
    fn err_to_string(self, context: &str) -> Result<T, String>;
}

impl<T, E: Debug> ErrorStringExt<T> for Result<T, E> {
    fn err_to_string(self, context: &str) -> Result<T, String> {
        self.map_err(|err| format!("{context}: {err:?}"))
    }
}
