use std::io::Write;

/// Takes the bus number out of a shareable page URL.
///
/// Both forms the share pages produce are understood: a `track` query
/// parameter and a `/track/<id>` path segment.
pub fn target_from_url(url: &str) -> Option<String> {
    target_from_query(url).or_else(|| target_from_path(url))
}

fn target_from_query(url: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    let query = query.split_once('#').map_or(query, |(query, _)| query);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "track")
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

fn target_from_path(url: &str) -> Option<String> {
    let path = url.split_once('?').map_or(url, |(path, _)| path);
    let path = path.split_once('#').map_or(path, |(path, _)| path);
    let mut segments = path.split('/');
    while let Some(segment) = segments.next() {
        if segment == "track" {
            return segments
                .next()
                .map(|id| id.to_string())
                .filter(|id| !id.is_empty());
        }
    }
    None
}

/// Asks on the terminal, with the same wording the share page uses.
pub fn target_from_prompt() -> Option<String> {
    print!("Enter bus number to track (e.g., TN01AB1234): ");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    match std::io::stdin().read_line(&mut line) {
        Ok(_) => {
            let line = line.trim();
            (!line.is_empty()).then(|| line.to_string())
        }
        Err(_) => None,
    }
}

/// Picks the bus number to track: the flag wins over the URL, the URL over
/// the interactive prompt.
pub fn resolve_target(cli_track: Option<&str>, cli_url: Option<&str>) -> Option<String> {
    if let Some(track) = cli_track {
        return Some(track.to_string());
    }
    if let Some(url) = cli_url
        && let Some(track) = target_from_url(url)
    {
        return Some(track);
    }
    target_from_prompt()
}
