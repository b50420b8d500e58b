use maptool_model_version::ModelVersionTransformation;
use regex::Regex;


/// Removes the `<exportInfo>` element that campaigns saved before `1.3.75` carried around.
#[derive(Clone, Debug)]
pub struct ExportInfoTransform {
    export_info_element: Regex,
}

impl ExportInfoTransform {
    pub fn new() -> Self {
        // PANIC SAFETY: The pattern is a constant that is known to compile.
        let export_info_element = Regex::new(r"(?s)<exportInfo>.*?</exportInfo>").unwrap();

        Self {
            export_info_element,
        }
    }
}

impl Default for ExportInfoTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelVersionTransformation for ExportInfoTransform {
    fn name(&self) -> &str {
        "export-info"
    }

    fn transform(&self, input: &str) -> String {
        self.export_info_element.replace_all(input, "").into_owned()
    }
}
