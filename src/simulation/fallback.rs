use super::table::{CompartmentValue, SimulationTable, TimeAxis};

/// Month marks of the fallback outbreak, `0, 12, ..., 120`.
pub const FALLBACK_TIME_POINTS: [u64; 11] = [0, 12, 24, 36, 48, 60, 72, 84, 96, 108, 120];

const FALLBACK_SUSCEPTIBLE: [i64; 11] = [1949, 1854, 1640, 1310, 876, 423, 90, 8, 0, 0, 0];
const FALLBACK_INFECTED: [i64; 11] = [50, 135, 311, 521, 714, 796, 714, 489, 285, 164, 95];
const FALLBACK_REMOVED: [i64; 11] = [0, 9, 48, 168, 409, 780, 1195, 1502, 1714, 1835, 1904];

/// Illustrative single-outbreak SIR curve drawn when a reply has no table.
#[must_use]
pub fn fallback_table() -> SimulationTable {
    let mut table = SimulationTable::new(TimeAxis::Month, ["S", "I", "R"]);
    for (index, time) in FALLBACK_TIME_POINTS.iter().copied().enumerate() {
        table.push_row(
            time,
            &[
                CompartmentValue::Integer(FALLBACK_SUSCEPTIBLE[index]),
                CompartmentValue::Integer(FALLBACK_INFECTED[index]),
                CompartmentValue::Integer(FALLBACK_REMOVED[index]),
            ],
        );
    }
    table
}
