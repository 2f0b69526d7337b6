use super::{err, ErrorKind, Result};
use easy_ext::ext;

#[ext(OptionExt)]
pub(crate) impl<T> Option<T> {
    #[track_caller]
    fn fatal_ctx<S>(self, message: impl FnOnce() -> S) -> Result<T>
    where
        S: Into<String>,
    {
        // Not using closures (e.g. `ok_or_else`), because `#[track_caller]`
        // doesn't propagate to them.
        match self {
            Some(value) => Ok(value),
            None => Err(err!(ErrorKind::Fatal { message: message() })),
        }
    }
}
