use confique::Config as DeriveConfig;

#[derive(Debug, DeriveConfig)]
pub struct Config {
    /// How deep arrays/objects may nest before a document is rejected with
    /// `nesting-too-deep`. Raise this if you legitimately check very deeply
    /// nested documents.
    #[config(default = 128)]
    pub max_nesting_depth: usize,
}
