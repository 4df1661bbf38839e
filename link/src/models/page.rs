use serde::{Deserialize, Serialize};

/// One server-side page of a larger result set.
///
/// `number` is the zero-based index of this page as echoed by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The rows of this page
    pub content: Vec<T>,

    /// Total rows across all pages
    pub total_elements: u64,

    /// Total page count for the requested page size
    pub total_pages: u32,

    /// Requested page size
    pub size: u32,

    /// Zero-based index of this page
    pub number: u32,
}

impl<T> Page<T> {
    /// An empty first page
    pub fn empty(size: u32) -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            size,
            number: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_wire_format() {
        let json = r#"{
            "content": ["a", "b"],
            "totalElements": 47,
            "totalPages": 5,
            "size": 10,
            "number": 0
        }"#;
        let page: Page<String> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_elements, 47);
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.number, 0);
    }
}
