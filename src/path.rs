/// Returns the canonical URL path for `p`, eliminating `.` and `..` elements.
///
/// The following rules are applied:
///
/// 1. Multiple slashes are replaced by a single slash.
/// 2. Each `.` path element (the current directory) is eliminated.
/// 3. Each inner `..` path element (the parent directory) is eliminated along
///    with the non-`..` element that precedes it.
/// 4. `..` elements that begin a rooted path are eliminated, so `/..` becomes `/`.
///
/// A missing leading slash is added and a trailing slash is preserved. If the
/// result of this process is empty, `/` is returned.
///
/// ```rust
/// use routetree::clean_path;
///
/// assert_eq!(clean_path("abc//def/./../ghi/"), "/abc/ghi/");
/// assert_eq!(clean_path("/../.."), "/");
/// ```
pub fn clean_path(p: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    // a final `.` names the directory itself, so it keeps the slash
    let mut trailing = false;

    for segment in p.split('/') {
        match segment {
            "" => {}
            "." => trailing = true,
            ".." => {
                segments.pop();
                trailing = false;
            }
            _ => {
                segments.push(segment);
                trailing = false;
            }
        }
    }

    if segments.is_empty() {
        return String::from("/");
    }

    let mut cleaned = String::with_capacity(p.len() + 1);
    for segment in segments {
        cleaned.push('/');
        cleaned.push_str(segment);
    }

    if trailing || p.ends_with('/') {
        cleaned.push('/');
    }

    cleaned
}
