//! URLs of the Realtime Database REST API for the `incidents` collection.

use url::Url;

const COLLECTION: &str = "incidents";

#[derive(Clone, Debug)]
pub struct IncidentStore {
    base_url: Url,
}

impl IncidentStore {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// `<base>/incidents/<id>.json`
    ///
    /// The id is not checked; an empty id addresses `incidents/.json`.
    pub fn record_url(&self, id: &str) -> Url {
        self.url_with_segments(&[COLLECTION, format!("{id}.json").as_str()])
    }

    /// `<base>/incidents.json`
    pub fn collection_url(&self) -> Url {
        self.url_with_segments(&[format!("{COLLECTION}.json").as_str()])
    }

    /// `<base>/incidents.json?orderBy="assignee_id"&equalTo="<assignee_id>"`
    pub fn assignee_url(&self, assignee_id: &str) -> Url {
        let mut url = self.collection_url();
        url.query_pairs_mut()
            .append_pair("orderBy", &string_literal("assignee_id"))
            .append_pair("equalTo", &string_literal(assignee_id));
        url
    }

    fn url_with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Base URLs are validated as http(s) at startup, so they always have a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Query values are JSON literals, so strings go in double quotes.
fn string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_owned()).to_string()
}
