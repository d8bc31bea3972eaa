//! Line classification shared by the paginated renderers

/// One line of assembled text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `#`, `##` or `###` heading
    Heading(u8, &'a str),
    Body(&'a str),
    Blank,
}

/// Classify each line, stripping surrounding whitespace
pub fn lines(text: &str) -> impl Iterator<Item = Line<'_>> {
    text.lines().map(classify)
}

fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return Line::Blank;
    }

    for (prefix, level) in [("### ", 3), ("## ", 2), ("# ", 1)] {
        if let Some(rest) = line.strip_prefix(prefix) {
            return Line::Heading(level, rest.trim());
        }
    }

    Line::Body(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let parsed: Vec<Line> = lines("# Title\n\n  ## Sub  \nbody text\n#### deep\n#nospace").collect();
        assert_eq!(
            parsed,
            vec![
                Line::Heading(1, "Title"),
                Line::Blank,
                Line::Heading(2, "Sub"),
                Line::Body("body text"),
                Line::Body("#### deep"),
                Line::Body("#nospace"),
            ]
        );
    }
}
