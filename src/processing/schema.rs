use geojson::FeatureCollection;
use serde::Serialize;
use std::collections::BTreeSet;

/// Popup configuration for a layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PopupSchema {
    /// No feature in the layer carries any property: the layer gets no popup.
    None,
    /// Sorted property keys, each shown with a `"key:"` alias.
    Fields {
        fields: Vec<String>,
        aliases: Vec<String>,
    },
}

impl PopupSchema {
    pub fn from_keys(keys: BTreeSet<String>) -> PopupSchema {
        if keys.is_empty() {
            return PopupSchema::None;
        }
        let fields: Vec<String> = keys.into_iter().collect();
        let aliases = fields.iter().map(|field| format!("{}:", field)).collect();
        PopupSchema::Fields { fields, aliases }
    }

    pub fn fields(&self) -> &[String] {
        match self {
            PopupSchema::None => &[],
            PopupSchema::Fields { fields, .. } => fields,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, PopupSchema::None)
    }
}

/// Union of the property keys of every feature, in sorted order. Features with
/// null or empty properties contribute nothing.
pub fn collect_property_keys(collection: &FeatureCollection) -> BTreeSet<String> {
    collection
        .features
        .iter()
        .filter_map(|feature| feature.properties.as_ref())
        .flat_map(|properties| properties.keys().cloned())
        .collect()
}

/// Popup schema for a whole layer.
pub fn discover_popup(collection: &FeatureCollection) -> PopupSchema {
    PopupSchema::from_keys(collect_property_keys(collection))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> FeatureCollection {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_union_of_keys_sorted() {
        let collection = parse(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "geometry": null, "properties": {"b": 1, "a": "x"}},
                    {"type": "Feature", "geometry": null, "properties": {"c": null, "b": 2}},
                    {"type": "Feature", "geometry": null, "properties": {}}
                ]
            }"#,
        );

        let popup = discover_popup(&collection);
        assert_eq!(popup.fields(), ["a", "b", "c"]);
        assert_eq!(
            popup,
            PopupSchema::Fields {
                fields: vec!["a".into(), "b".into(), "c".into()],
                aliases: vec!["a:".into(), "b:".into(), "c:".into()],
            }
        );
    }

    #[test]
    fn test_no_properties_means_no_popup() {
        let collection = parse(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "geometry": null, "properties": null},
                    {"type": "Feature", "geometry": null, "properties": {}}
                ]
            }"#,
        );

        let popup = discover_popup(&collection);
        assert!(popup.is_none());
        assert!(popup.fields().is_empty());
    }

    #[test]
    fn test_empty_collection_means_no_popup() {
        let collection = parse(r#"{"type": "FeatureCollection", "features": []}"#);
        assert_eq!(discover_popup(&collection), PopupSchema::None);
    }

    #[test]
    fn test_popup_serializes_with_kind_tag() {
        let popup = PopupSchema::from_keys(BTreeSet::from(["nome".to_string()]));
        let json = serde_json::to_value(&popup).unwrap();
        assert_eq!(json["kind"], "fields");
        assert_eq!(json["aliases"][0], "nome:");
        assert_eq!(
            serde_json::to_value(PopupSchema::None).unwrap()["kind"],
            "none"
        );
    }
}
