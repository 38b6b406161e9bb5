use crate::client::{ReportError, ReportService};
use crate::domain::report::{GenerationRequest, Report, SectionId};
use crate::session::DisclosureSet;

/// Request lifecycle: `Idle -> Loading -> Success | Failure -> Loading -> ...`.
/// No state is terminal; every state accepts a new submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LifecycleState {
    #[default]
    Idle,
    Loading,
    Success(Report),
    Failure(String),
}

/// Ticket for one submission. Completions carrying an outdated ticket are
/// dropped, which is the whole staleness story: newest submission wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission(u64);

/// Owns the one current report view: lifecycle state plus the disclosure set
/// rendered against it. Single-writer; all transitions go through `begin`
/// and `complete`.
#[derive(Debug, Default)]
pub struct ReportSession {
    state: LifecycleState,
    disclosure: DisclosureSet,
    seq: u64,
}

impl ReportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LifecycleState::Loading)
    }

    pub fn report(&self) -> Option<&Report> {
        match &self.state {
            LifecycleState::Success(report) => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LifecycleState::Failure(message) => Some(message),
            _ => None,
        }
    }

    pub fn disclosure(&self) -> &DisclosureSet {
        &self.disclosure
    }

    pub fn toggle_section(&mut self, section: SectionId) {
        self.disclosure.toggle(section);
    }

    pub fn expand_section(&mut self, section: SectionId) {
        self.disclosure.expand(section);
    }

    pub fn expand_all_sections(&mut self) {
        self.disclosure = DisclosureSet::expanded_all();
    }

    /// Start a new submission: clears any prior report or error and moves to
    /// `Loading`. The returned ticket must be handed back to [`complete`].
    ///
    /// [`complete`]: ReportSession::complete
    pub fn begin(&mut self) -> Submission {
        self.seq += 1;
        self.state = LifecycleState::Loading;
        Submission(self.seq)
    }

    /// Apply the outcome of a submission. Returns `false` (and leaves all
    /// state untouched) when a newer submission has started since the ticket
    /// was issued.
    pub fn complete(
        &mut self,
        submission: Submission,
        outcome: Result<Report, ReportError>,
    ) -> bool {
        if submission.0 != self.seq {
            tracing::debug!(
                submission = submission.0,
                newest = self.seq,
                "dropping stale report response"
            );
            return false;
        }

        self.state = match outcome {
            Ok(report) => {
                // New report, fresh view: disclosure goes back to the default.
                self.disclosure.reset();
                LifecycleState::Success(report)
            }
            Err(err) => LifecycleState::Failure(err.user_message()),
        };
        true
    }

    /// Drive one submission end-to-end against the service. Serial callers
    /// get last-submission-wins for free; the ticket check still protects
    /// any caller that interleaves submissions.
    pub async fn submit(
        &mut self,
        service: &dyn ReportService,
        request: &GenerationRequest,
    ) -> bool {
        let ticket = self.begin();
        let outcome = service.generate_report(request).await;
        self.complete(ticket, outcome)
    }
}
