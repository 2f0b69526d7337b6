use easy_ext::ext;

pub(crate) mod prelude {
    pub(crate) use super::ErrorExt as _;
    pub(crate) use super::StrExt as _;
}

#[ext(ErrorExt)]
pub(crate) impl<E> E
where
    E: std::error::Error + ?Sized,
{
    fn display_chain(&self) -> display_error_chain::DisplayErrorChain<&Self> {
        display_error_chain::DisplayErrorChain::new(self)
    }
}

#[ext(StrExt)]
pub(crate) impl str {
    /// Returns the last `max_chars` characters of the string
    fn tail_chars(&self, max_chars: usize) -> &str {
        let skip = self.chars().count().saturating_sub(max_chars);
        let offset = self
            .char_indices()
            .nth(skip)
            .map_or(self.len(), |(offset, _)| offset);
        &self[offset..]
    }

    fn is_ascii_number(&self) -> bool {
        !self.is_empty() && self.bytes().all(|byte| byte.is_ascii_digit())
    }
}
