use url::Url;

/// Joins a site-relative directory and a relative path segment with exactly
/// one `/` between them. An empty `rest` returns `dir` unchanged.
pub fn join_dir(dir: &str, rest: &str) -> String {
    let rest = rest.trim_start_matches('/');
    if rest.is_empty() {
        return dir.to_owned();
    }
    match dir.ends_with('/') {
        true => format!("{}{}", dir, rest),
        false => format!("{}/{}", dir, rest),
    }
}

/// The directory for page `page_number` of a listing rooted at `dir`. The
/// first page lives at `dir` itself.
pub fn page_dir(dir: &str, page_number: usize) -> String {
    match page_number > 1 {
        false => dir.to_owned(),
        true => join_dir(dir, &format!("page/{}", page_number)),
    }
}

/// Returns `url` with a trailing slash on its path, so that [`Url::join`]
/// treats the last segment as a directory rather than replacing it.
pub fn directory_url(url: &Url) -> Url {
    let mut url = url.clone();
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
