use easy_ext::ext;

#[ext(UrlExt)]
pub(crate) impl url::Url {
    /// Returns a copy of the URL with the given path segments appended to it.
    /// The trailing slash of the base URL is ignored.
    fn with_segments<T: AsRef<str>>(&self, segments: impl IntoIterator<Item = T>) -> url::Url {
        let mut url = self.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Resolves a possibly relative link found on a page of this site
    fn resolve(&self, link: &str) -> Option<url::Url> {
        self.join(link).ok()
    }
}
