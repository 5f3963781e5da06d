use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use super::table::{CompartmentValue, SimulationTable, TimeAxis};

/// Phrase that opens the prose section following a simulation table.
const TRAILING_PROSE_SENTINEL: &str = "what the numbers";

/// Digit-group separators some models put inside large numbers.
const DIGIT_GROUP_SEPARATORS: [char; 4] = ['\u{00A0}', '\u{2007}', '\u{2009}', '\u{202F}'];

static DATA_ROW: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\d+\s+\d+").ok());

#[derive(Debug)]
enum ParserState {
    SeekingHeader,
    ConsumingRows(HeaderColumns),
}

/// Header codes after dedup, plus the token position each one reads from.
#[derive(Debug)]
struct HeaderColumns {
    names: Vec<String>,
    positions: Vec<usize>,
}

impl HeaderColumns {
    fn from_tokens<'a>(tokens: impl Iterator<Item = &'a str>) -> Self {
        let mut names: Vec<String> = Vec::new();
        let mut positions = Vec::new();
        for (position, token) in tokens.enumerate() {
            if names.iter().any(|name| name == token) {
                continue;
            }
            names.push(token.to_owned());
            positions.push(position);
        }
        Self { names, positions }
    }

    fn align(&self, values: &[CompartmentValue]) -> Vec<CompartmentValue> {
        self.positions
            .iter()
            .map(|&position| values.get(position).copied().unwrap_or_default())
            .collect()
    }
}

/// Splits on ASCII whitespace so digit-group separators stay inside their
/// number token. A leading token that still holds Unicode whitespace means
/// the line is delimited by it, so the line is split on all whitespace.
fn tokens(line: &str) -> Vec<&str> {
    let ascii: Vec<&str> = line.split_ascii_whitespace().collect();
    match ascii.first() {
        Some(first) if first.contains(char::is_whitespace) => line.split_whitespace().collect(),
        _ => ascii,
    }
}

fn is_header_line(line: &str) -> bool {
    matches!(tokens(line).first().copied(), Some("Month" | "Day"))
}

fn is_data_row(line: &str) -> bool {
    DATA_ROW.as_ref().is_some_and(|pattern| pattern.is_match(line))
}

fn is_row_terminator(line: &str) -> bool {
    line.is_empty() || starts_with_ignore_ascii_case(line, TRAILING_PROSE_SENTINEL)
}

fn starts_with_ignore_ascii_case(line: &str, prefix: &str) -> bool {
    line.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Parses one value cell as an integer, falling back to a finite real.
pub(crate) fn parse_value_token(token: &str) -> Option<CompartmentValue> {
    let cleaned: String = token
        .chars()
        .filter(|ch| !DIGIT_GROUP_SEPARATORS.contains(ch))
        .collect();

    if let Ok(value) = cleaned.parse::<i64>() {
        return Some(CompartmentValue::Integer(value));
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(CompartmentValue::Real)
}

/// Parses a data row into its time index and positional values.
///
/// Returns `None` when any token is not numeric so the row is dropped whole.
fn parse_row(line: &str) -> Option<(u64, Vec<CompartmentValue>)> {
    let cells = tokens(line);
    let (time, rest) = cells.split_first()?;
    let time = time.parse::<u64>().ok()?;
    let values = rest
        .iter()
        .copied()
        .map(parse_value_token)
        .collect::<Option<Vec<_>>>()?;
    Some((time, values))
}

fn detect_time_axis(text: &str) -> TimeAxis {
    if text.lines().any(|line| line.trim_start().starts_with("Day")) {
        TimeAxis::Day
    } else {
        TimeAxis::Month
    }
}

/// Extracts the first simulation table from a reply.
///
/// The parser seeks a line whose first token is `Month` or `Day`, then
/// consumes numeric rows until a blank line or the "what the numbers"
/// sentinel. Non-numeric lines inside the table block are skipped without
/// ending it, and later header lines are ignored. A reply without a header
/// yields an empty table, which callers treat as "nothing to plot".
#[must_use]
pub fn extract_table(text: &str) -> SimulationTable {
    let mut state = ParserState::SeekingHeader;
    let mut rows: Vec<(u64, Vec<CompartmentValue>)> = Vec::new();
    let mut skipped = 0usize;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if let ParserState::ConsumingRows(header) = &state {
            if is_data_row(line) {
                match parse_row(line) {
                    Some((time, values)) => rows.push((time, header.align(&values))),
                    None => {
                        skipped += 1;
                        trace!(line, "skipping row with non-numeric cells");
                    }
                }
            } else if is_row_terminator(line) {
                break;
            }
        } else if is_header_line(line) {
            let header = HeaderColumns::from_tokens(tokens(line).into_iter().skip(1));
            debug!(columns = ?header.names, "found simulation table header");
            state = ParserState::ConsumingRows(header);
        }
    }

    let ParserState::ConsumingRows(header) = state else {
        debug!("no simulation table header found");
        return SimulationTable::default();
    };

    let mut table = SimulationTable::new(detect_time_axis(text), header.names);
    for (time, values) in &rows {
        table.push_row(*time, values);
    }
    debug!(
        rows = table.row_count(),
        skipped,
        time_axis = %table.time_axis(),
        "extracted simulation table"
    );
    table
}
