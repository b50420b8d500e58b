use maptool_model_version::ModelVersionTransformation;
use regex::Regex;


/// Migrates token properties from the old case-sensitive `propertyMap` to the
/// case-insensitive `propertyMapCI` introduced in `1.3.78`.
///
/// The case-insensitive map serializes its entries inside an additional `<store>` element:
///
/// ```text
/// <propertyMap><entry>..</entry></propertyMap>
///   becomes
/// <propertyMapCI><store><entry>..</entry></store></propertyMapCI>
/// ```
#[derive(Clone, Debug)]
pub struct TokenPropertyMapTransform {
    property_map_element: Regex,
    empty_property_map_element: Regex,
}

impl TokenPropertyMapTransform {
    pub fn new() -> Self {
        // PANIC SAFETY: Both patterns are constants that are known to compile.
        let property_map_element = Regex::new(r"(?s)<propertyMap>(.*?)</propertyMap>").unwrap();
        let empty_property_map_element = Regex::new(r"<propertyMap\s*/>").unwrap();

        Self {
            property_map_element,
            empty_property_map_element,
        }
    }
}

impl Default for TokenPropertyMapTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelVersionTransformation for TokenPropertyMapTransform {
    fn name(&self) -> &str {
        "token-property-map"
    }

    fn transform(&self, input: &str) -> String {
        let migrated = self
            .property_map_element
            .replace_all(input, "<propertyMapCI><store>${1}</store></propertyMapCI>");

        self.empty_property_map_element
            .replace_all(&migrated, "<propertyMapCI/>")
            .into_owned()
    }
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wraps_entries_in_a_store() {
        let input = "<token>\n<propertyMap>\n  <entry><string>Strength</string><int>12</int></entry>\n</propertyMap>\n</token>";

        assert_eq!(
            TokenPropertyMapTransform::new().transform(input),
            "<token>\n<propertyMapCI><store>\n  <entry><string>Strength</string><int>12</int></entry>\n</store></propertyMapCI>\n</token>"
        );
    }

    #[test]
    fn migrates_each_token_separately() {
        let input = "<propertyMap><a/></propertyMap><name>x</name><propertyMap><b/></propertyMap>";

        assert_eq!(
            TokenPropertyMapTransform::new().transform(input),
            "<propertyMapCI><store><a/></store></propertyMapCI><name>x</name>\
             <propertyMapCI><store><b/></store></propertyMapCI>"
        );
    }

    #[test]
    fn migrates_empty_maps() {
        assert_eq!(
            TokenPropertyMapTransform::new().transform("<propertyMap/><propertyMap />"),
            "<propertyMapCI/><propertyMapCI/>"
        );
    }

    #[test]
    fn already_migrated_maps_are_untouched() {
        let input = "<propertyMapCI><store><entry/></store></propertyMapCI>";

        assert_eq!(TokenPropertyMapTransform::new().transform(input), input);
    }
}
