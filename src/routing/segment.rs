//! Path segmentation
//!
//! A path is cut at every `/` that is not the first byte of the current
//! segment, so each segment keeps its leading separator:
//!
//! ```text
//! "/a/b/c"  -> "/a" "/b" "/c"
//! "/a/b/c/" -> "/a" "/b" "/c" "/"
//! "//"      -> "/" "/"
//! ""        -> ""
//! ```

const SEPARATOR: u8 = b'/';

/// Return the segment starting at `start` and the start of the next one.
///
/// `None` means this was the last segment. A `start` past the end of the
/// path yields an empty last segment.
pub fn next_path_segment(path: &str, start: usize) -> (&str, Option<usize>) {
    if start > path.len() {
        return ("", None);
    }

    // '/' is ASCII, so any index holding it is a char boundary
    let end = path
        .bytes()
        .enumerate()
        .skip(start + 1)
        .find_map(|(i, b)| (b == SEPARATOR).then_some(i));

    match end {
        Some(i) => (&path[start..i], Some(i)),
        None => (&path[start..], None),
    }
}

/// Iterator over the segments of a path.
///
/// Always yields at least one segment; the empty path yields `""`.
pub struct Segments<'a> {
    path: &'a str,
    next: Option<usize>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next?;
        let (segment, next) = next_path_segment(self.path, start);
        self.next = next;
        Some(segment)
    }
}

pub const fn segments(path: &str) -> Segments<'_> {
    Segments {
        path,
        next: Some(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(path: &str) -> (Vec<&str>, Vec<Option<usize>>) {
        let mut segs = Vec::new();
        let mut nexts = Vec::new();
        let mut start = Some(0);
        while let Some(st) = start {
            let (seg, next) = next_path_segment(path, st);
            segs.push(seg);
            nexts.push(next);
            start = next;
        }
        (segs, nexts)
    }

    #[test]
    fn test_regular_path() {
        let (segs, nexts) = walk("/a/b/c");
        assert_eq!(segs, vec!["/a", "/b", "/c"]);
        assert_eq!(nexts, vec![Some(2), Some(4), None]);
    }

    #[test]
    fn test_trailing_slash() {
        let (segs, nexts) = walk("/a/b/c/");
        assert_eq!(segs, vec!["/a", "/b", "/c", "/"]);
        assert_eq!(nexts, vec![Some(2), Some(4), Some(6), None]);
    }

    #[test]
    fn test_empty_path() {
        let (segs, nexts) = walk("");
        assert_eq!(segs, vec![""]);
        assert_eq!(nexts, vec![None]);
    }

    #[test]
    fn test_consecutive_slashes() {
        let (segs, nexts) = walk("//");
        assert_eq!(segs, vec!["/", "/"]);
        assert_eq!(nexts, vec![Some(1), None]);
    }

    #[test]
    fn test_start_out_of_range() {
        assert_eq!(next_path_segment("/a", 5), ("", None));
    }

    #[test]
    fn test_segments_rebuild_path() {
        for path in ["", "/", "//", "/a/b/c", "/a//b/", "relative/x", "/héllo/wörld", "/health"] {
            let joined: String = segments(path).collect();
            assert_eq!(joined, path);
        }
    }

    #[test]
    fn test_segment_count_matches_separators() {
        for path in ["/a", "/a/b/c", "/x/y/z/w", "/"] {
            let slashes = path.matches('/').count();
            assert_eq!(segments(path).count(), slashes, "path {path}");
        }
        // A leading segment without a separator adds one
        assert_eq!(segments("a/b").count(), 2);
    }
}
