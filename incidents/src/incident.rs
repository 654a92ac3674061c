use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An incident record as stored under `incidents/<id>`.
///
/// Every field is a plain string. Fields missing from the inbound document
/// decode as empty strings and unknown fields are dropped, so the outbound
/// write always carries exactly these eight keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Incident {
    pub id: String,
    pub user_id: String,
    pub status: String,
    pub description: String,
    pub assignee_id: String,
    pub event_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub zone: String,
}

impl Incident {
    /// Decodes the first JSON document in `bytes`. Anything after it is ignored.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let mut documents = serde_json::Deserializer::from_slice(bytes).into_iter::<Incident>();
        match documents.next() {
            Some(result) => result,
            None => Err(de::Error::custom("empty body")),
        }
    }
}

/// Keys match case-insensitively (`ID`, `User_Id`, ...) and older clients
/// send the event key as `EventID`. A `null` value leaves the field as it was,
/// and when a key repeats the last value wins.
impl<'de> Deserialize<'de> for Incident {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(IncidentVisitor)
    }
}

struct IncidentVisitor;

impl<'de> Visitor<'de> for IncidentVisitor {
    type Value = Incident;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an incident object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Incident, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut incident = Incident::default();

        while let Some(key) = map.next_key::<String>()? {
            let field = match key.to_ascii_lowercase().as_str() {
                "id" => &mut incident.id,
                "user_id" => &mut incident.user_id,
                "status" => &mut incident.status,
                "description" => &mut incident.description,
                "assignee_id" => &mut incident.assignee_id,
                "event_id" | "eventid" => &mut incident.event_id,
                "type" => &mut incident.kind,
                "zone" => &mut incident.zone,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
            };

            if let Some(value) = map.next_value::<Option<String>>()? {
                *field = value;
            }
        }

        Ok(incident)
    }
}
