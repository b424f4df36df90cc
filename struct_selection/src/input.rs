//! Line-oriented protocol around the [Eliminator]: a count line, then that many `<code> <value>`
//! lines, repeated until end of input. One verdict line is written per case.

use crate::{AbstractOp, Eliminator, Verdict};
use num_bigint::ParseBigIntError;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("line {line}: I/O error")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: expected an operation count, found {text:?}")]
    InvalidCount { line: usize, text: String },
    #[error("line {line}: expected `<code> <value>`, found {tokens} token(s)")]
    InvalidOperation { line: usize, tokens: usize },
    #[error("line {line}: invalid value {text:?}")]
    InvalidValue {
        line: usize,
        text: String,
        #[source]
        source: ParseBigIntError,
    },
    #[error("line {line}: input ended after {found} of {expected} operations")]
    TruncatedCase {
        line: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed input")]
    Input(#[from] InputError),
    #[error("failed to write verdict")]
    Output(#[from] io::Error),
}

/// Parses a count line. Surrounding whitespace is ignored.
pub fn parse_count(text: &str, line: usize) -> Result<usize, InputError> {
    let trimmed = text.trim();
    trimmed.parse().map_err(|_| InputError::InvalidCount {
        line,
        text: trimmed.to_string(),
    })
}

/// Parses an operation line of exactly two whitespace-separated tokens.
pub fn parse_operation(text: &str, line: usize) -> Result<AbstractOp, InputError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let [code, value] = tokens[..] else {
        return Err(InputError::InvalidOperation {
            line,
            tokens: tokens.len(),
        });
    };
    let value = value.parse().map_err(|source| InputError::InvalidValue {
        line,
        text: value.to_string(),
        source,
    })?;
    Ok(AbstractOp::from_code(code, value))
}

/// Reads cases one at a time, handing each operation to a visitor as soon as it is parsed.
pub struct CaseReader<R> {
    reader: R,
    buf: String,
    line: usize,
}

impl<R: BufRead> CaseReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line: 0,
        }
    }

    /// Number of lines consumed so far
    pub fn line(&self) -> usize {
        self.line
    }

    // Returns false at end of input.
    fn next_line(&mut self) -> Result<bool, InputError> {
        self.buf.clear();
        let line = self.line + 1;
        let read = self
            .reader
            .read_line(&mut self.buf)
            .map_err(|source| InputError::Io { line, source })?;
        if read == 0 {
            return Ok(false);
        }
        self.line = line;
        Ok(true)
    }

    /// Reads the next case, passing each operation to `visit`. Returns the case's operation count,
    /// or `None` once the input is exhausted. Blank lines before a count line are skipped.
    pub fn next_case(
        &mut self,
        mut visit: impl FnMut(AbstractOp),
    ) -> Result<Option<usize>, InputError> {
        loop {
            if !self.next_line()? {
                return Ok(None);
            }
            if !self.buf.trim().is_empty() {
                break;
            }
        }
        let count = parse_count(&self.buf, self.line)?;
        for found in 0..count {
            if !self.next_line()? {
                return Err(InputError::TruncatedCase {
                    line: self.line,
                    expected: count,
                    found,
                });
            }
            visit(parse_operation(&self.buf, self.line)?);
        }
        Ok(Some(count))
    }
}

/// Verdict tallies over a whole run
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub cases: usize,
    pub operations: usize,
    pub stack: usize,
    pub queue: usize,
    pub priority_queue: usize,
    pub not_sure: usize,
    pub impossible: usize,
}

impl RunSummary {
    pub fn record(&mut self, verdict: Verdict, operations: usize) {
        self.cases += 1;
        self.operations += operations;
        let tally = match verdict {
            Verdict::Stack => &mut self.stack,
            Verdict::Queue => &mut self.queue,
            Verdict::PriorityQueue => &mut self.priority_queue,
            Verdict::NotSure => &mut self.not_sure,
            Verdict::Impossible => &mut self.impossible,
        };
        *tally += 1;
    }
}

/// Opens a trace file for [run].
pub fn open_input(path: &Path) -> Result<BufReader<File>, RunError> {
    let file = File::open(path).map_err(|source| RunError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Classifies every case in `input`, writing one verdict line per case to `output`.
///
/// Verdicts for complete cases are written before a later malformed case is reported.
pub fn run<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    flush_each_case: bool,
) -> Result<RunSummary, RunError> {
    let mut cases = CaseReader::new(input);
    let mut summary = RunSummary::default();
    loop {
        let mut eliminator = Eliminator::new();
        let Some(count) = cases.next_case(|op| eliminator.observe(op))? else {
            break;
        };
        let verdict = eliminator.verdict();
        log::debug!(
            "case {} ({count} operations, ending at line {}): {verdict}",
            summary.cases + 1,
            cases.line()
        );
        writeln!(output, "{verdict}")?;
        if flush_each_case {
            output.flush()?;
        }
        summary.record(verdict, count);
    }
    output.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AbstractOp;
    use std::error::Error as _;

    fn collect_cases(text: &str) -> Result<Vec<Vec<AbstractOp>>, InputError> {
        let mut reader = CaseReader::new(text.as_bytes());
        let mut cases = Vec::new();
        loop {
            let mut ops = Vec::new();
            match reader.next_case(|op| ops.push(op))? {
                Some(count) => {
                    assert_eq!(count, ops.len());
                    cases.push(ops);
                }
                None => return Ok(cases),
            }
        }
    }

    #[test]
    fn test_reads_cases_in_order() {
        let cases = collect_cases("2\n1 4\n2 4\n0\n1\n1 -9\n").unwrap();
        assert_eq!(
            cases,
            vec![
                vec![AbstractOp::insert(4), AbstractOp::remove(4)],
                vec![],
                vec![AbstractOp::insert(-9)]
            ]
        );
    }

    #[test]
    fn test_empty_input_has_no_cases() {
        assert!(collect_cases("").unwrap().is_empty());
        assert!(collect_cases("\n  \n").unwrap().is_empty());
    }

    #[test]
    fn test_tolerates_extra_whitespace() {
        let cases = collect_cases("  1 \r\n1\t  3  \r\n").unwrap();
        assert_eq!(cases, vec![vec![AbstractOp::insert(3)]]);
    }

    #[test]
    fn test_missing_final_newline() {
        let cases = collect_cases("1\n2 8").unwrap();
        assert_eq!(cases, vec![vec![AbstractOp::remove(8)]]);
    }

    #[test]
    fn test_invalid_count() {
        let err = collect_cases("two\n").unwrap_err();
        assert!(matches!(err, InputError::InvalidCount { line: 1, .. }));
        let err = collect_cases("-1\n").unwrap_err();
        assert!(matches!(err, InputError::InvalidCount { line: 1, .. }));
    }

    #[test]
    fn test_wrong_token_count() {
        let err = collect_cases("1\n1\n").unwrap_err();
        assert!(matches!(
            err,
            InputError::InvalidOperation { line: 2, tokens: 1 }
        ));
        let err = collect_cases("1\n1 2 3\n").unwrap_err();
        assert!(matches!(
            err,
            InputError::InvalidOperation { line: 2, tokens: 3 }
        ));
        // A blank line inside a case is an operation line with no tokens
        let err = collect_cases("1\n\n").unwrap_err();
        assert!(matches!(
            err,
            InputError::InvalidOperation { line: 2, tokens: 0 }
        ));
    }

    #[test]
    fn test_non_integer_value() {
        let err = collect_cases("1\n1 x\n").unwrap_err();
        assert!(matches!(err, InputError::InvalidValue { line: 2, .. }));
    }

    #[test]
    fn test_values_are_not_word_sized() {
        let cases = collect_cases("2\n1 99999999999999999999\n2 -99999999999999999999\n").unwrap();
        let big: crate::Value = "99999999999999999999".parse().unwrap();
        assert_eq!(
            cases,
            vec![vec![AbstractOp::Insert(big.clone()), AbstractOp::Remove(-big)]]
        );
    }

    #[test]
    fn test_open_missing_file_keeps_io_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let err = open_input(&path).unwrap_err();
        assert!(matches!(&err, RunError::Open { path: p, .. } if *p == path));
        let source = err.source().and_then(|s| s.downcast_ref::<io::Error>());
        assert_eq!(source.map(io::Error::kind), Some(io::ErrorKind::NotFound));
    }

    #[test]
    fn test_truncated_case() {
        let err = collect_cases("3\n1 1\n").unwrap_err();
        assert!(matches!(
            err,
            InputError::TruncatedCase {
                expected: 3,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_run_writes_one_line_per_case() {
        let mut out = Vec::new();
        let summary = run("1\n1 5\n0\n".as_bytes(), &mut out, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "not sure\nnot sure\n");
        assert_eq!(summary.cases, 2);
        assert_eq!(summary.not_sure, 2);
        assert_eq!(summary.operations, 1);
    }

    #[test]
    fn test_run_keeps_verdicts_before_error() {
        let mut out = Vec::new();
        let err = run("2\n1 1\n2 1\n1\n1 q\n".as_bytes(), &mut out, false).unwrap_err();
        assert!(matches!(err, RunError::Input(InputError::InvalidValue { .. })));
        assert_eq!(String::from_utf8(out).unwrap(), "not sure\n");
    }
}
