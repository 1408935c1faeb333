use super::functional::analyze_functionally;
use super::result::FunctionalAnalysisResult;
use super::AnalysisError;

/// Caller-owned analysis context. Keeps a history of functional
/// analyses so successive progressions can be compared; the engine
/// itself holds no global state.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    history: Vec<FunctionalAnalysisResult>,
}

impl AnalysisSession {
    pub fn new() -> AnalysisSession {
        AnalysisSession::default()
    }

    /// Analyze a progression and record the result in the session
    /// history. Errors are not recorded.
    pub fn analyze(
        &mut self,
        symbols: &[&str],
        parent_key: Option<&str>,
    ) -> Result<&FunctionalAnalysisResult, AnalysisError> {
        let result = analyze_functionally(symbols, parent_key)?;
        self.history.push(result);
        // Just pushed, so last() is always present.
        Ok(self.history.last().expect("history is empty"))
    }

    pub fn history(&self) -> &[FunctionalAnalysisResult] {
        &self.history
    }

    pub fn last(&self) -> Option<&FunctionalAnalysisResult> {
        self.history.last()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}
