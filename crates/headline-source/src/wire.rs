//! Reddit API response shapes

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Any `{kind, data}` envelope
#[derive(Debug, Deserialize)]
pub(crate) struct Thing<T> {
    pub kind: String,
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Listing {
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub children: Vec<Thing<Submission>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Submission {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub permalink: String,
    pub created_utc: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing() {
        let json = r#"{
            "kind": "Listing",
            "data": {
                "after": "t3_abc",
                "dist": 1,
                "children": [
                    {"kind": "t3", "data": {
                        "title": "Stocks soar",
                        "url": "https://example.com/a",
                        "permalink": "/r/news/comments/abc/stocks_soar/",
                        "created_utc": 1700000000.0,
                        "score": 12
                    }}
                ]
            }
        }"#;

        let listing: Thing<Listing> = serde_json::from_str(json).unwrap();
        assert_eq!(listing.kind, "Listing");
        assert_eq!(listing.data.after.as_deref(), Some("t3_abc"));
        assert_eq!(listing.data.children[0].data.title, "Stocks soar");
    }

    #[test]
    fn test_parse_final_page() {
        let json = r#"{"kind": "Listing", "data": {"after": null, "children": []}}"#;
        let listing: Thing<Listing> = serde_json::from_str(json).unwrap();
        assert!(listing.data.after.is_none());
        assert!(listing.data.children.is_empty());
    }
}
