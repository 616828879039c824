use serde::Serialize;

/// One line of `labels.jsonl`.
#[derive(Serialize, Debug)]
pub struct JsonRecord {
    pub schema: &'static str,
    pub image: String,
    pub labels: Vec<u8>,
    pub spacing: [usize; 2],
    pub width: usize,
    pub seed: u64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub pad_left: bool,
}
