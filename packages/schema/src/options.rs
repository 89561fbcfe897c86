/// Configuration options for schema inference
#[derive(Debug, Clone)]
pub struct InferenceOptions {
    /// Derive human-readable labels from field keys
    /// When false, the raw key is used as the label
    pub humanize_labels: bool,

    /// Map arrays whose elements are all strings to `TagList`
    /// When false, such arrays become `Array` of `Text`
    pub tag_list_for_string_arrays: bool,

    /// Strings at or above this length infer as `Textarea`
    pub textarea_threshold: usize,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            humanize_labels: true,
            tag_list_for_string_arrays: true,
            textarea_threshold: 120,
        }
    }
}

impl InferenceOptions {
    /// Raw keys as labels, no tag-list heuristic, no textarea promotion
    pub fn minimal() -> Self {
        Self {
            humanize_labels: false,
            tag_list_for_string_arrays: false,
            textarea_threshold: usize::MAX,
        }
    }
}
