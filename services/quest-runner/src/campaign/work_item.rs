/// One subject of a campaign run, as listed by the remote work list.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct WorkItem {
    #[serde(rename = "number")]
    identifier: String,
    #[serde(rename = "api")]
    credential: String,
}

impl WorkItem {
    pub fn new(identifier: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            credential: credential.into(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }
}

/// Carriers a network test is submitted against, once per work item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    Mytel,
    Mpt,
    Ooredoo,
    Atom,
}

impl Operator {
    pub const ALL: [Self; 4] = [Self::Mytel, Self::Mpt, Self::Ooredoo, Self::Atom];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mytel => "MYTEL",
            Self::Mpt => "MPT",
            Self::Ooredoo => "OOREDOO",
            Self::Atom => "ATOM",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_item_maps_number_and_api_fields() {
        let items: Vec<WorkItem> = serde_json::from_str(
            r#"[{"api":"T1","number":"95912345678","extra":true},{"api":"T2","number":"959000"}]"#,
        )
        .unwrap();

        assert_eq!(
            items,
            vec![
                WorkItem::new("95912345678", "T1"),
                WorkItem::new("959000", "T2"),
            ]
        );
    }

    #[test]
    fn work_item_requires_both_fields() {
        let result = serde_json::from_str::<Vec<WorkItem>>(r#"[{"api":"T1"}]"#);

        assert!(result.is_err());
    }

    #[test]
    fn operators_serialize_as_uppercase_names() {
        let names: Vec<String> = Operator::ALL
            .iter()
            .map(|operator| serde_json::to_value(operator).unwrap())
            .map(|value| value.as_str().unwrap().to_string())
            .collect();

        assert_eq!(names, ["MYTEL", "MPT", "OOREDOO", "ATOM"]);
        assert!(
            Operator::ALL
                .iter()
                .all(|operator| operator.to_string() == operator.as_str())
        );
    }
}
