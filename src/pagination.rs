// Pagination controller: pure slices over the full file list.
// Pages are 1-based everywhere; requested pages clamp instead of erroring.

use crate::models::records::FileRecord;

/// Page size used by the related-files table.
pub const FILES_PER_PAGE: usize = 25;

/// `ceil(len / page_size)`, minimum 1 even for an empty list.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// Clamp a requested page into `[1, total_pages]`.
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

/// The slice of `files` visible on `page`.
pub fn page_slice(files: &[FileRecord], page: usize, page_size: usize) -> &[FileRecord] {
    let total = total_pages(files.len(), page_size);
    let page = clamp_page(page, total);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(files.len());
    if start >= files.len() {
        return &[];
    }
    &files[start..end]
}

/// 1-based inclusive display bounds for "showing X-Y of N". `(0, 0)` when empty.
pub fn page_bounds(len: usize, page: usize, page_size: usize) -> (usize, usize) {
    if len == 0 {
        return (0, 0);
    }
    let total = total_pages(len, page_size);
    let page = clamp_page(page, total);
    let start = (page - 1) * page_size + 1;
    let end = (page * page_size).min(len);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(n: usize) -> Vec<FileRecord> {
        (1..=n)
            .map(|i| FileRecord {
                id: format!("file_{i}"),
                name: format!("Account_Document_{i:03}.pdf"),
                size: "100 KB".to_string(),
                last_modified: "01/01/2026".to_string(),
                file_type: "PDF".to_string(),
                owner: "John Smith".to_string(),
            })
            .collect()
    }

    #[test]
    fn total_pages_is_ceiling_with_minimum_one() {
        assert_eq!(total_pages(0, 25), 1, "empty list still has one page");
        assert_eq!(total_pages(1, 25), 1);
        assert_eq!(total_pages(25, 25), 1);
        assert_eq!(total_pages(26, 25), 2);
        assert_eq!(total_pages(47, 25), 2, "the generated batch spans 2 pages");
        assert_eq!(total_pages(50, 25), 2);
        assert_eq!(total_pages(51, 25), 3);
    }

    #[test]
    fn clamp_page_never_leaves_valid_range() {
        for requested in 0..10 {
            let page = clamp_page(requested, 2);
            assert!(
                (1..=2).contains(&page),
                "requested {requested} clamped to {page}"
            );
        }
        assert_eq!(clamp_page(5, 0), 1, "degenerate total still yields page 1");
    }

    #[test]
    fn page_slice_splits_47_records_as_25_plus_22() {
        let files = batch(47);
        let page1 = page_slice(&files, 1, FILES_PER_PAGE);
        let page2 = page_slice(&files, 2, FILES_PER_PAGE);

        assert_eq!(page1.len(), 25);
        assert_eq!(page2.len(), 22);
        assert_eq!(page1[0].id, "file_1");
        assert_eq!(page2[0].id, "file_26");
        assert_eq!(page2[21].id, "file_47");
    }

    #[test]
    fn page_slice_clamps_out_of_range_pages() {
        let files = batch(47);
        assert_eq!(page_slice(&files, 0, 25)[0].id, "file_1");
        assert_eq!(page_slice(&files, 99, 25)[0].id, "file_26");
        assert!(page_slice(&[], 1, 25).is_empty());
    }

    #[test]
    fn page_bounds_match_display_expectations() {
        assert_eq!(page_bounds(47, 1, 25), (1, 25));
        assert_eq!(page_bounds(47, 2, 25), (26, 47));
        assert_eq!(page_bounds(0, 1, 25), (0, 0));
        assert_eq!(page_bounds(10, 1, 25), (1, 10));
    }
}
