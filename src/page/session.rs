use crate::{config::{HighlightOptions, ServiceOptions},
            dom::{DomTree, ElementNode},
            error::Result,
            extract::{ContentExtractor, TextSource},
            highlight::{HighlightOrchestrator, HighlightReport, PreconditionFailed},
            service::{Action, HttpSummarizer, ServiceOutcome, ServiceRequest, SimulatedResponses, Summarizer,
                      WithFallback},
            tools::{ToolContext, ToolRegistry, ToolResult}};
use std::path::Path;
use std::sync::Arc;

/// A loaded page together with the collaborators used to summarize and highlight it
pub struct PageSession {
    /// The document being highlighted
    tree: DomTree,

    highlight_options: HighlightOptions,

    service_options: ServiceOptions,

    extractor: ContentExtractor,

    summarizer: Box<dyn Summarizer>,

    /// Report of the most recent highlighting pass
    last_report: Option<HighlightReport>,

    /// Tool registry for executing page tools
    tool_registry: Arc<ToolRegistry>,
}

impl PageSession {
    /// Create a session talking to the summarization service described by `service_options`
    pub fn new(service_options: ServiceOptions, highlight_options: HighlightOptions) -> Self {
        let http = HttpSummarizer::new(&service_options);
        let summarizer: Box<dyn Summarizer> = if service_options.simulate_on_failure {
            Box::new(WithFallback::new(http, SimulatedResponses::default()))
        } else {
            Box::new(http)
        };

        Self {
            tree: DomTree::new(ElementNode::new("body")),
            highlight_options,
            service_options,
            extractor: ContentExtractor::default(),
            summarizer,
            last_report: None,
            tool_registry: Arc::new(ToolRegistry::with_defaults()),
        }
    }

    /// Replace the summarizer (e.g. with an offline stand-in)
    pub fn with_summarizer(mut self, summarizer: impl Summarizer + 'static) -> Self {
        self.summarizer = Box::new(summarizer);
        self
    }

    /// Replace the content extractor
    pub fn with_extractor(mut self, extractor: ContentExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Load a document from its JSON snapshot
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        self.load_tree(DomTree::from_json(json)?);
        Ok(())
    }

    /// Load a document from a JSON snapshot file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let json = std::fs::read_to_string(path)?;
        self.load_json(&json)
    }

    /// Load an already built document
    pub fn load_tree(&mut self, tree: DomTree) {
        log::info!("Loaded document with {} elements", tree.count_elements());
        self.tree = tree;
        self.last_report = None;
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn highlight_options(&self) -> &HighlightOptions {
        &self.highlight_options
    }

    pub fn set_highlight_options(&mut self, options: HighlightOptions) {
        self.highlight_options = options;
    }

    pub fn service_options(&self) -> &ServiceOptions {
        &self.service_options
    }

    pub fn last_report(&self) -> Option<&HighlightReport> {
        self.last_report.as_ref()
    }

    /// Text for a service request from the given source
    pub fn extract_text(&self, source: &TextSource) -> Result<String> {
        Ok(source.resolve(&self.tree, &self.extractor)?)
    }

    /// Build a request carrying the configured language and length, enforcing the minimum text length
    fn build_request(&self, source: &TextSource) -> std::result::Result<ServiceRequest, PreconditionFailed> {
        let text = source.resolve(&self.tree, &self.extractor)?;
        let request = ServiceRequest::new(&text)
            .with_language(self.service_options.language.clone())
            .with_length(self.service_options.length.clone());

        let actual = request.text.chars().count();
        let min = self.service_options.min_text_length;
        if actual < min {
            return Err(PreconditionFailed::TextTooShort { min, actual });
        }
        Ok(request)
    }

    /// Send text from `source` to the service endpoint selected by `action`
    pub fn request(&self, action: Action, source: &TextSource) -> Result<ServiceOutcome> {
        let request = self.build_request(source)?;
        self.summarizer.request(action, &request)
    }

    /// Highlight keypoints with the session's options
    pub fn highlight<S: AsRef<str>>(&mut self, keypoints: &[S]) -> HighlightReport {
        let options = self.highlight_options.clone();
        self.highlight_with(keypoints, &options)
    }

    /// Highlight keypoints with explicit options
    pub fn highlight_with<S: AsRef<str>>(&mut self, keypoints: &[S], options: &HighlightOptions) -> HighlightReport {
        let report = HighlightOrchestrator::new(options.clone()).apply_all(&mut self.tree.root, keypoints);
        self.last_report = Some(report.clone());
        report
    }

    /// Request keypoints for the whole document and highlight them.
    ///
    /// A document without (enough) text is reported as a precondition failure
    /// without contacting the service.
    pub fn fetch_and_highlight(&mut self) -> Result<(Vec<String>, HighlightReport)> {
        let request = match self.build_request(&TextSource::Document) {
            Ok(request) => request,
            Err(condition) => {
                log::info!("Not requesting keypoints: {}", condition);
                let report = HighlightReport::precondition_failed(condition);
                self.last_report = Some(report.clone());
                return Ok((Vec::new(), report));
            }
        };

        let keypoints = self.summarizer.keypoints(&request)?;
        log::info!("Service returned {} keypoints", keypoints.len());
        let report = self.highlight(&keypoints);
        Ok((keypoints, report))
    }

    /// Serialize the current document as HTML
    pub fn to_html(&self) -> String {
        self.tree.to_html()
    }

    /// Render the current document as Markdown
    pub fn to_markdown(&self) -> String {
        self.tree.to_markdown()
    }

    /// Get the tool registry
    pub fn tool_registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Execute a tool by name
    pub fn execute_tool(&mut self, name: &str, params: serde_json::Value) -> Result<ToolResult> {
        let registry = Arc::clone(&self.tool_registry);
        let mut context = ToolContext::new(self);
        registry.execute(name, params, &mut context)
    }
}

impl Default for PageSession {
    fn default() -> Self {
        Self::new(ServiceOptions::default(), HighlightOptions::default())
    }
}
