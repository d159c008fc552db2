//! 页码选择表达式解析
//!
//! 表达式形式：
//! - 通配符 `all` / `*` / 空串 —— 表示整本文档
//! - 逗号分隔的单页和闭区间，例如 `1,3,5-7`
//!
//! 输出保证：1 起始、升序、去重、全部落在 `[1, page_count]` 内。
//! 越界页码静默丢弃；倒序区间（`5-3`）解析为空；非数字 token 报错。

use std::collections::BTreeSet;

use crate::error::PageRangeError;

/// 把选择表达式解析为具体页码序列
pub fn resolve_page_range(expr: &str, page_count: u16) -> Result<Vec<u16>, PageRangeError> {
    let expr = expr.trim().to_lowercase();

    if expr.is_empty() || expr == "all" || expr == "*" {
        return Ok((1..=page_count).collect());
    }

    let mut pages = BTreeSet::new();

    for part in expr.split(',') {
        let part = part.trim();
        if let Some((a, b)) = part.split_once('-') {
            let a = parse_page(a)?;
            let b = parse_page(b)?;
            // 下界抬到 1，上界压到 page_count；倒序区间自然为空
            for n in a.max(1)..=b.min(u64::from(page_count)) {
                pages.insert(n as u16);
            }
        } else {
            let n = parse_page(part)?;
            if (1..=u64::from(page_count)).contains(&n) {
                pages.insert(n as u16);
            }
        }
    }

    Ok(pages.into_iter().collect())
}

// 用 u64 解析：再大的数字页码也只算越界（静默丢弃），不算格式错误
fn parse_page(token: &str) -> Result<u64, PageRangeError> {
    token
        .trim()
        .parse::<u64>()
        .map_err(|_| PageRangeError::MalformedToken {
            token: token.trim().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_returns_full_range() {
        assert_eq!(resolve_page_range("all", 4).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(resolve_page_range("*", 3).unwrap(), vec![1, 2, 3]);
        assert_eq!(resolve_page_range("", 2).unwrap(), vec![1, 2]);
        assert_eq!(resolve_page_range("  ALL ", 2).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_singles_and_ranges_are_sorted_and_deduplicated() {
        assert_eq!(
            resolve_page_range("5-7,1,3,6", 10).unwrap(),
            vec![1, 3, 5, 6, 7]
        );
        assert_eq!(resolve_page_range("2,2,2", 10).unwrap(), vec![2]);
    }

    #[test]
    fn test_out_of_bounds_pages_are_silently_dropped() {
        assert_eq!(resolve_page_range("1,99", 3).unwrap(), vec![1]);
        // 数字再大也只是越界，不是格式错误
        assert_eq!(resolve_page_range("1,70000", 3).unwrap(), vec![1]);
        // 区间被压到页数上界
        assert_eq!(resolve_page_range("2-99", 3).unwrap(), vec![2, 3]);
        // 0 被抬到下界 1
        assert_eq!(resolve_page_range("0-2", 3).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_reversed_range_resolves_empty() {
        assert_eq!(resolve_page_range("5-3", 10).unwrap(), Vec::<u16>::new());
    }

    #[test]
    fn test_malformed_token_is_an_error() {
        assert!(matches!(
            resolve_page_range("1,abc", 10),
            Err(PageRangeError::MalformedToken { .. })
        ));
        assert!(resolve_page_range("1,,3", 10).is_err());
        assert!(resolve_page_range("-1", 10).is_err());
    }

    #[test]
    fn test_whitespace_around_tokens_is_tolerated() {
        assert_eq!(resolve_page_range(" 1 , 3 - 4 ", 10).unwrap(), vec![1, 3, 4]);
    }
}
