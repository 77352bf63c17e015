use reqwest::Url;

// ###################################
// ->   URL utils
// ###################################
/// Appends the relative `path` to `base`, keeping every segment of the base path.
/// `Url::join` alone drops the last segment when the base lacks a trailing `/`.
pub fn join_url(base: &Url, path: &str) -> Result<Url, String> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let dir_path = format!("{}/", base.path());
        base.set_path(&dir_path);
    }

    base.join(path.trim_start_matches('/'))
        .map_err(|er| er.to_string())
}
