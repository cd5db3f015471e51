use std::time::Duration;

/// Default address of the local summarization service
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:10000";

/// Class carried by every highlight marker
pub const DEFAULT_MARKER_CLASS: &str = "highlight";

/// How keypoints are compared against text node values.
///
/// The default is an exact, case-sensitive literal comparison. Either relaxation
/// can be enabled for keypoints that were reformatted by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchMode {
    /// Compare characters after lowercasing both sides
    pub case_insensitive: bool,

    /// Treat any run of whitespace as a single space and ignore leading/trailing whitespace in the keypoint
    pub collapse_whitespace: bool,
}

impl MatchMode {
    pub fn exact() -> Self {
        Self::default()
    }

    pub fn normalized() -> Self {
        Self {
            case_insensitive: true,
            collapse_whitespace: true,
        }
    }

    pub fn is_exact(&self) -> bool {
        !self.case_insensitive && !self.collapse_whitespace
    }
}

/// Options for a highlighting pass
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightOptions {
    /// Tag of the wrapper element (default: span)
    pub marker_tag: String,

    /// Class set on the wrapper element (default: highlight)
    pub marker_class: String,

    /// Keypoint comparison mode (default: exact)
    pub match_mode: MatchMode,

    /// Index text inside script/style/noscript/template (default: false)
    pub include_non_rendering: bool,

    /// Leave text that is already inside a marker out of the index (default: false)
    pub skip_marked_text: bool,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            marker_tag: "span".to_string(),
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
            match_mode: MatchMode::exact(),
            include_non_rendering: false,
            skip_marked_text: false,
        }
    }
}

impl HighlightOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker_tag(mut self, tag: impl Into<String>) -> Self {
        self.marker_tag = tag.into();
        self
    }

    pub fn marker_class(mut self, class: impl Into<String>) -> Self {
        self.marker_class = class.into();
        self
    }

    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn include_non_rendering(mut self, include: bool) -> Self {
        self.include_non_rendering = include;
        self
    }

    pub fn skip_marked_text(mut self, skip: bool) -> Self {
        self.skip_marked_text = skip;
        self
    }
}

/// Options for talking to the summarization service
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOptions {
    /// Base URL of the service (default: http://localhost:10000)
    pub base_url: String,

    /// Request timeout (default: 30 seconds)
    pub timeout: Duration,

    /// Output language forwarded with every request
    pub language: Option<String>,

    /// Desired summary length forwarded with every request
    pub length: Option<String>,

    /// Answer with canned text when the service cannot be reached (default: false)
    pub simulate_on_failure: bool,

    /// Refuse to send text shorter than this many characters (default: 0, no minimum)
    pub min_text_length: usize,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            timeout: Duration::from_secs(30),
            language: None,
            length: None,
            simulate_on_failure: false,
            min_text_length: 0,
        }
    }
}

impl ServiceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn length(mut self, length: impl Into<String>) -> Self {
        self.length = Some(length.into());
        self
    }

    pub fn simulate_on_failure(mut self, simulate: bool) -> Self {
        self.simulate_on_failure = simulate;
        self
    }

    pub fn min_text_length(mut self, min: usize) -> Self {
        self.min_text_length = min;
        self
    }
}
