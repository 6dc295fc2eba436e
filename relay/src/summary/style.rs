// Style Formatter: shapes summary sentences according to a free-text style hint

pub const BULLETS_HEADER: &str = "Key Points:";
pub const ACTION_ITEMS_HEADER: &str = "Action Items:";
pub const EXECUTIVE_HEADER: &str = "Executive Summary:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleDirective {
    Bullets,
    ActionItems,
    Executive,
    Plain,
}

impl StyleDirective {
    /// Case-insensitive keyword match. The first matching rule wins, in declaration order.
    pub fn from_hint(hint: Option<&str>) -> Self {
        let hint = match hint {
            Some(h) => h.to_lowercase(),
            None => return StyleDirective::Plain,
        };

        if hint.contains("bullet") || hint.contains("points") {
            StyleDirective::Bullets
        } else if hint.contains("action") {
            StyleDirective::ActionItems
        } else if hint.contains("executive") {
            StyleDirective::Executive
        } else {
            StyleDirective::Plain
        }
    }
}

/// Formats an already-split list of sentences (the fallback path).
pub fn format_sentences<S: AsRef<str>>(sentences: &[S], directive: StyleDirective) -> String {
    match directive {
        StyleDirective::Bullets => with_header(
            BULLETS_HEADER,
            sentences
                .iter()
                .map(|s| format!("• {}.", s.as_ref().trim())),
        ),
        StyleDirective::ActionItems => with_header(
            ACTION_ITEMS_HEADER,
            sentences
                .iter()
                .enumerate()
                .map(|(i, s)| format!("{}. {}.", i + 1, s.as_ref().trim())),
        ),
        StyleDirective::Executive => {
            format!("{}\n\n{}", EXECUTIVE_HEADER, join_sentences(sentences))
        }
        StyleDirective::Plain => join_sentences(sentences),
    }
}

/// Formats free prose returned by the remote model. List styles split the prose on '.'.
pub fn format_prose(prose: &str, directive: StyleDirective) -> String {
    match directive {
        StyleDirective::Bullets | StyleDirective::ActionItems => {
            let sentences: Vec<&str> = prose
                .split('.')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            format_sentences(&sentences, directive)
        }
        StyleDirective::Executive => format!("{}\n\n{}", EXECUTIVE_HEADER, prose.trim()),
        StyleDirective::Plain => prose.to_string(),
    }
}

/// Joins with ". " and closes with a period. An empty list joins to an empty string.
pub fn join_sentences<S: AsRef<str>>(sentences: &[S]) -> String {
    if sentences.is_empty() {
        return String::new();
    }

    let joined = sentences
        .iter()
        .map(|s| s.as_ref().trim())
        .collect::<Vec<_>>()
        .join(". ");
    format!("{}.", joined)
}

fn with_header(header: &str, lines: impl Iterator<Item = String>) -> String {
    std::iter::once(header.to_string())
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\n")
}
