use crate::config::HighlightOptions;
use crate::dom::ElementNode;
use crate::highlight::index::TextNodeIndex;
use crate::highlight::locate::FragmentLocator;
use crate::highlight::marker::RangeHighlighter;
use crate::highlight::report::{HighlightReport, PreconditionFailed, SkipReason};

/// Applies a list of keypoints to a document, one at a time, in list order.
///
/// A keypoint that cannot be highlighted is recorded in the report and the pass
/// moves on; nothing is retried.
#[derive(Debug, Clone, Default)]
pub struct HighlightOrchestrator {
    options: HighlightOptions,
}

impl HighlightOrchestrator {
    pub fn new(options: HighlightOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &HighlightOptions {
        &self.options
    }

    pub fn apply_all<S: AsRef<str>>(&self, root: &mut ElementNode, keypoints: &[S]) -> HighlightReport {
        if keypoints.is_empty() {
            log::debug!("No keypoints supplied, skipping highlight pass");
            return HighlightReport::precondition_failed(PreconditionFailed::NoKeypoints);
        }
        // Marked text still counts as document text, whatever the index skips.
        let rendered = self.options.clone().skip_marked_text(false);
        if TextNodeIndex::build(root, &rendered).is_blank() {
            log::debug!("Document has no text, skipping highlight pass");
            return HighlightReport::precondition_failed(PreconditionFailed::EmptyDocument);
        }

        let locator = FragmentLocator::new(self.options.match_mode);
        let highlighter = RangeHighlighter::from_options(&self.options);
        let mut report = HighlightReport::default();

        for (index, keypoint) in keypoints.iter().enumerate() {
            let keypoint = keypoint.as_ref();

            // Every marker insertion shifts sibling paths, so each keypoint gets its own snapshot.
            let view = TextNodeIndex::build(root, &self.options);

            let outcome = locator
                .locate(&view, keypoint)
                .ok_or(SkipReason::NotFound)
                .and_then(|found| highlighter.highlight(root, &found));

            match outcome {
                Ok(marker) => {
                    log::debug!("Highlighted keypoint {} at {} (+{})", index, marker.path, marker.start);
                    report.record_applied(index, keypoint, marker);
                }
                Err(reason) => {
                    log::debug!("Skipped keypoint {} {:?}: {}", index, keypoint, reason);
                    report.record_skipped(index, keypoint, reason);
                }
            }
        }

        log::info!("{}", report.summary());
        report
    }
}
