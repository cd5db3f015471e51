use crate::config::MatchMode;

/// Find the leftmost occurrence of `needle` in `haystack` under `mode`.
///
/// Returns `(start, len)` in bytes of `haystack`; the range always lies on char
/// boundaries. An empty needle (or one that is empty after normalization) never matches.
pub fn find(haystack: &str, needle: &str, mode: MatchMode) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    if mode.is_exact() {
        return haystack.find(needle).map(|start| (start, needle.len()));
    }

    let needle = normalize_fragment(needle, mode);
    if needle.is_empty() {
        return None;
    }
    FoldedText::new(haystack, mode).find(&needle)
}

/// Apply the same folding to a keypoint that [`FoldedText`] applies to node text
pub fn normalize_fragment(fragment: &str, mode: MatchMode) -> String {
    let collapsed;
    let fragment = if mode.collapse_whitespace {
        collapsed = fragment.split_whitespace().collect::<Vec<_>>().join(" ");
        collapsed.as_str()
    } else {
        fragment
    };

    if mode.case_insensitive {
        fragment.chars().flat_map(char::to_lowercase).collect()
    } else {
        fragment.to_string()
    }
}

/// One source char (or whitespace run) and where its folded form starts
#[derive(Debug, Clone, Copy)]
struct Unit {
    folded_start: usize,
    source_start: usize,
    source_end: usize,
}

/// Folded copy of a text value that remembers which source bytes produced each folded char
struct FoldedText {
    text: String,
    units: Vec<Unit>,
}

impl FoldedText {
    fn new(source: &str, mode: MatchMode) -> Self {
        let mut text = String::with_capacity(source.len());
        let mut units = Vec::new();
        let mut chars = source.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            let folded_start = text.len();
            let mut end = start + c.len_utf8();

            if mode.collapse_whitespace && c.is_whitespace() {
                while let Some(&(next, n)) = chars.peek() {
                    if !n.is_whitespace() {
                        break;
                    }
                    end = next + n.len_utf8();
                    chars.next();
                }
                text.push(' ');
            } else if mode.case_insensitive {
                text.extend(c.to_lowercase());
            } else {
                text.push(c);
            }

            units.push(Unit {
                folded_start,
                source_start: start,
                source_end: end,
            });
        }

        Self { text, units }
    }

    fn find(&self, needle: &str) -> Option<(usize, usize)> {
        let mut from = 0;
        while let Some(pos) = self.text[from..].find(needle) {
            let start = from + pos;
            let end = start + needle.len();

            // A hit that begins or ends inside the expansion of a single source
            // char has no exact source range; keep looking.
            if let (Some(first), Some(last)) = (self.unit_starting_at(start), self.unit_ending_at(end)) {
                let source_start = self.units[first].source_start;
                let source_end = self.units[last].source_end;
                return Some((source_start, source_end - source_start));
            }

            from = start + self.text[start..].chars().next().map_or(1, char::len_utf8);
        }
        None
    }

    fn unit_starting_at(&self, folded: usize) -> Option<usize> {
        self.units.binary_search_by_key(&folded, |unit| unit.folded_start).ok()
    }

    fn unit_ending_at(&self, folded_end: usize) -> Option<usize> {
        if folded_end == self.text.len() {
            return self.units.len().checked_sub(1);
        }
        self.unit_starting_at(folded_end)?.checked_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_is_leftmost_literal() {
        assert_eq!(find("a fox, a fox", "fox", MatchMode::exact()), Some((2, 3)));
        assert_eq!(find("The Fox", "fox", MatchMode::exact()), None);
        assert_eq!(find("a.b", ".", MatchMode::exact()), Some((1, 1)));
        assert_eq!(find("anything", "", MatchMode::exact()), None);
    }

    #[test]
    fn test_exact_multibyte_offsets() {
        let text = "café au lait";
        let (start, len) = find(text, "au", MatchMode::exact()).unwrap();
        assert_eq!(&text[start..start + len], "au");
        assert_eq!(start, 6);
    }

    #[test]
    fn test_case_insensitive() {
        let mode = MatchMode {
            case_insensitive: true,
            collapse_whitespace: false,
        };
        let text = "The Quick Brown fox";
        let (start, len) = find(text, "quick BROWN", mode).unwrap();
        assert_eq!(&text[start..start + len], "Quick Brown");
    }

    #[test]
    fn test_collapse_whitespace_maps_back_to_source() {
        let mode = MatchMode {
            case_insensitive: false,
            collapse_whitespace: true,
        };
        let text = "The quick\n    brown fox";
        let (start, len) = find(text, "  quick brown ", mode).unwrap();
        assert_eq!(&text[start..start + len], "quick\n    brown");
    }

    #[test]
    fn test_normalized_whitespace_only_needle() {
        assert_eq!(find("a b", "   ", MatchMode::normalized()), None);
    }

    #[test]
    fn test_expansion_boundary_is_skipped() {
        // 'İ' lowercases to "i\u{307}"; a needle covering only the "i" has no exact source range.
        let mode = MatchMode {
            case_insensitive: true,
            collapse_whitespace: false,
        };
        assert_eq!(find("İx", "i", mode), None);
        let text = "İx ix";
        let (start, len) = find(text, "ix", mode).unwrap();
        assert_eq!(&text[start..start + len], "ix");
    }

    #[test]
    fn test_normalize_fragment() {
        assert_eq!(normalize_fragment("  Quick \t Brown ", MatchMode::normalized()), "quick brown");
        assert_eq!(normalize_fragment(" Quick ", MatchMode::exact()), " Quick ");
    }
}
