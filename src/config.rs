//! Compile options.

/// How cross-file references are found in raw source text.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReferenceScan {
    /// Every dotted path after the namespace header counts, comments
    /// included.
    #[default]
    Raw,
    /// Like `Raw`, but `//` comments are blanked out first.
    SkipComments,
}

/// Options for one compile run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    pub reference_scan: ReferenceScan,
    /// Lex all files on the rayon pool before the sequential parse.
    pub parallel_lex: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            reference_scan: ReferenceScan::Raw,
            parallel_lex: true,
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reference_scan(mut self, scan: ReferenceScan) -> Self {
        self.reference_scan = scan;
        self
    }

    pub fn with_parallel_lex(mut self, parallel: bool) -> Self {
        self.parallel_lex = parallel;
        self
    }
}
