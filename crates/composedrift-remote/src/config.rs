/// Compose source endpoint, passed in explicitly at construction.
///
/// There is deliberately no file or environment lookup here: the base URL
/// is a compile-time constant of the binary, and tests construct configs
/// pointing at local mock servers.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub base_url: String,
}

impl SourceConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}
