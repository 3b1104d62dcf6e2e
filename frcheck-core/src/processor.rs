use crate::aggregator::IssueLog;
use crate::config::{GrammarMode, ScanConfig};
use crate::error::{InputError, QaError};
use crate::grammar::{GrammarAdapter, GrammarChecker, LanguageToolClient};
use crate::preprocessors::preprocessor_with;
use crate::rules::PatternLibrary;
use crate::scanner::ParagraphScanner;
use crate::types::*;
use std::path::Path;
use std::time::{Duration, Instant};

/// Stages of one document check, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStage {
    Extract,
    Index,
    Detect,
    /// Detectors and per-paragraph grammar requests, interleaved
    DetectWithGrammar,
    Grammar,
}

impl CheckStage {
    pub fn label(self) -> &'static str {
        match self {
            CheckStage::Extract => "document to paragraphs",
            CheckStage::Index => "line numbering",
            CheckStage::Detect => "pattern detectors",
            CheckStage::DetectWithGrammar => "detectors + grammar per paragraph",
            CheckStage::Grammar => "grammar (whole document)",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StageTiming {
    pub stage: CheckStage,
    pub elapsed: Duration,
}

/// Wall-clock time per check stage, printed with `--profile`.
pub struct StepProfiler {
    enabled: bool,
    timings: Vec<StageTiming>,
}

impl StepProfiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            timings: Vec::new(),
        }
    }

    pub fn time_step<F, R>(&mut self, stage: CheckStage, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if !self.enabled {
            return f();
        }

        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        tracing::debug!(
            stage = stage.label(),
            elapsed_ms = elapsed.as_millis() as u64,
            "stage finished"
        );
        println!("⏱️  {}: {}ms", stage.label(), elapsed.as_millis());
        self.timings.push(StageTiming { stage, elapsed });

        result
    }

    pub fn timings(&self) -> &[StageTiming] {
        &self.timings
    }

    pub fn total(&self) -> Duration {
        self.timings.iter().map(|t| t.elapsed).sum()
    }

    pub fn slowest(&self) -> Option<CheckStage> {
        self.timings
            .iter()
            .max_by_key(|t| t.elapsed)
            .map(|t| t.stage)
    }

    pub fn print_summary(&self) {
        let Some(slowest) = self.slowest().filter(|_| self.enabled) else {
            return;
        };

        let total = self.total();
        println!("\n📊 Check timings:");
        for timing in &self.timings {
            let share = if total.is_zero() {
                0.0
            } else {
                timing.elapsed.as_secs_f64() / total.as_secs_f64() * 100.0
            };
            let marker = if timing.stage == slowest { "  ◀ slowest" } else { "" };
            println!(
                "   {:.<38} {:>6}ms {:>5.1}%{}",
                timing.stage.label(),
                timing.elapsed.as_millis(),
                share,
                marker
            );
        }
        println!("   {:.<38} {:>6}ms", "all stages", total.as_millis());
    }
}

/// One QA run over a document: pattern detectors, then the grammar service
/// when one is configured.
pub struct DocumentChecker {
    config: ScanConfig,
    library: PatternLibrary,
    grammar: Option<Box<dyn GrammarChecker>>,
}

impl DocumentChecker {
    /// Build detectors from `config`. A LanguageTool client is attached when
    /// `config.grammar.enabled` is set.
    pub fn new(config: ScanConfig) -> Self {
        let grammar: Option<Box<dyn GrammarChecker>> = if config.grammar.enabled {
            let client = LanguageToolClient::new(&config.grammar);
            tracing::info!(
                url = client.check_url(),
                language = client.language(),
                mode = ?config.grammar.mode,
                "grammar service enabled"
            );
            Some(Box::new(client))
        } else {
            None
        };

        Self {
            library: PatternLibrary::from_config(&config),
            config,
            grammar,
        }
    }

    /// Use `checker` instead of whatever `config.grammar` would build.
    pub fn with_grammar_checker(config: ScanConfig, checker: Box<dyn GrammarChecker>) -> Self {
        Self {
            library: PatternLibrary::from_config(&config),
            config,
            grammar: Some(checker),
        }
    }

    /// Pattern detectors only, regardless of `config.grammar.enabled`.
    pub fn without_grammar(config: ScanConfig) -> Self {
        Self {
            library: PatternLibrary::from_config(&config),
            config,
            grammar: None,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Grammar mode in effect, or `None` when no grammar service is attached.
    pub fn grammar_mode(&self) -> Option<GrammarMode> {
        self.grammar.as_ref().map(|_| self.config.grammar.mode)
    }

    /// Check raw paragraph strings. Blank entries are dropped before line numbering.
    pub fn check_paragraphs<S: AsRef<str>>(
        &self,
        raw: &[S],
        page_offset: u32,
    ) -> Result<IssueLog, QaError> {
        self.check_paragraphs_with_profiler(raw, page_offset, &mut StepProfiler::new(false))
    }

    pub fn check_file(&self, input: &Path, page_offset: u32) -> Result<IssueLog, QaError> {
        self.check_file_with_profiling(input, page_offset, false)
    }

    /// Same as `check_file`, printing step timings when `enable_profiling` is set.
    pub fn check_file_with_profiling(
        &self,
        input: &Path,
        page_offset: u32,
        enable_profiling: bool,
    ) -> Result<IssueLog, QaError> {
        validate_page_offset(page_offset)?;
        let mut profiler = StepProfiler::new(enable_profiling);

        let preprocessor = preprocessor_with(input, &self.config.docx)?;
        tracing::info!(
            input = %input.display(),
            preprocessor = preprocessor.name(),
            "reading document"
        );
        let raw = profiler.time_step(CheckStage::Extract, || {
            preprocessor.process_file(input)
        })?;

        let log = self.check_paragraphs_with_profiler(&raw, page_offset, &mut profiler)?;
        profiler.print_summary();
        Ok(log)
    }

    fn check_paragraphs_with_profiler<S: AsRef<str>>(
        &self,
        raw: &[S],
        page_offset: u32,
        profiler: &mut StepProfiler,
    ) -> Result<IssueLog, QaError> {
        validate_page_offset(page_offset)?;

        let paragraphs = profiler.time_step(CheckStage::Index, || Paragraph::index(raw));
        tracing::info!(
            raw = raw.len(),
            paragraphs = paragraphs.len(),
            page_offset,
            "scanning paragraphs"
        );

        run_checks(
            &self.config,
            &self.library,
            self.grammar.as_deref(),
            &paragraphs,
            page_offset,
            profiler,
        )
    }
}

/// Scan raw paragraphs with the standard detectors, optionally consulting a
/// grammar checker one paragraph at a time.
pub fn scan<S: AsRef<str>>(
    paragraphs: &[S],
    page_offset: u32,
    grammar: Option<&dyn GrammarChecker>,
) -> Result<IssueLog, QaError> {
    validate_page_offset(page_offset)?;

    let config = ScanConfig::default();
    let library = PatternLibrary::from_config(&config);
    run_checks(
        &config,
        &library,
        grammar,
        &Paragraph::index(paragraphs),
        page_offset,
        &mut StepProfiler::new(false),
    )
}

fn validate_page_offset(page_offset: u32) -> Result<(), InputError> {
    if page_offset < 1 {
        return Err(InputError::InvalidPageOffset(page_offset));
    }
    Ok(())
}

/// The last paragraph has the highest page; if that fits, every page does.
fn validate_page_range(
    paragraphs: &[Paragraph],
    page_offset: u32,
    page_size: u32,
) -> Result<(), InputError> {
    match paragraphs.last() {
        Some(last) if checked_page_for_line(page_offset, last.line, page_size).is_none() => {
            Err(InputError::PageOverflow {
                page_offset,
                paragraphs: paragraphs.len(),
            })
        }
        _ => Ok(()),
    }
}

// Per-paragraph mode interleaves: detector issues of a paragraph, then its
// grammar issues. Whole-document mode appends grammar issues after all
// detector issues.
fn run_checks(
    config: &ScanConfig,
    library: &PatternLibrary,
    grammar: Option<&dyn GrammarChecker>,
    paragraphs: &[Paragraph],
    page_offset: u32,
    profiler: &mut StepProfiler,
) -> Result<IssueLog, QaError> {
    validate_page_range(paragraphs, page_offset, config.page_size)?;

    let scanner = ParagraphScanner::new(library, config, page_offset);
    let mut log = IssueLog::new();

    let adapter = grammar
        .map(|checker| GrammarAdapter::new(checker, config.grammar.mode, config.context_radius));

    match adapter {
        None => {
            profiler.time_step(CheckStage::Detect, || log.extend(scanner.scan(paragraphs)));
        }
        Some(adapter) if adapter.mode() == GrammarMode::PerParagraph => {
            profiler.time_step(CheckStage::DetectWithGrammar, || -> Result<(), QaError> {
                for paragraph in paragraphs {
                    log.extend(scanner.scan_paragraph(paragraph));
                    let page = scanner.page_of(paragraph);
                    log.extend(adapter.paragraph_issues(paragraph, page)?);
                }
                Ok(())
            })?;
        }
        Some(adapter) => {
            profiler.time_step(CheckStage::Detect, || log.extend(scanner.scan(paragraphs)));
            let grammar_issues = profiler.time_step(CheckStage::Grammar, || {
                adapter.document_issues(paragraphs, page_offset)
            })?;
            log.extend(grammar_issues);
        }
    }

    tracing::info!(issues = log.len(), "scan complete");
    Ok(log)
}
