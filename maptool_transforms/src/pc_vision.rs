use maptool_model_version::ModelVersionTransformation;


const PC_TOKEN_TYPE_MARKER: &str = "<tokenType>PC</tokenType>";
const TOKEN_TYPE_OPENING_TAG: &str = "<tokenType>";
const SIGHT_OPENING_TAG: &str = "<hasSight>";
const SIGHT_DISABLED: &str = "<hasSight>false</hasSight>";
const SIGHT_ENABLED: &str = "<hasSight>true</hasSight>";


/// Gives every player-character token sight.
///
/// Before `1.3.51`, PC tokens were saved without vision. A token's section runs from
/// its `<tokenType>` marker up to the next `<tokenType>` marker (or the end of the input).
/// In the section of each `<tokenType>PC</tokenType>` marker, the first `hasSight` tag
/// is switched to `true` if it is `false`. Sections of other token types, and anything
/// before the first PC marker, are left as they are.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcVisionTransform;

impl PcVisionTransform {
    pub const fn new() -> Self {
        Self
    }
}

impl ModelVersionTransformation for PcVisionTransform {
    fn name(&self) -> &str {
        "pc-vision"
    }

    fn transform(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut remaining = input;

        while let Some(marker_index) = remaining.find(PC_TOKEN_TYPE_MARKER) {
            let section_start = marker_index + PC_TOKEN_TYPE_MARKER.len();
            let section_end = remaining[section_start..]
                .find(TOKEN_TYPE_OPENING_TAG)
                .map(|offset| section_start + offset)
                .unwrap_or(remaining.len());

            output.push_str(&remaining[..section_start]);

            let section = &remaining[section_start..section_end];

            match section.find(SIGHT_OPENING_TAG) {
                Some(sight_index) if section[sight_index..].starts_with(SIGHT_DISABLED) => {
                    output.push_str(&section[..sight_index]);
                    output.push_str(SIGHT_ENABLED);
                    output.push_str(&section[sight_index + SIGHT_DISABLED.len()..]);
                }
                _ => output.push_str(section),
            }

            remaining = &remaining[section_end..];
        }

        output.push_str(remaining);
        output
    }
}
