//! Reading simulation output out of free-form model replies.

mod extract;
mod fallback;
mod model_type;
mod table;

pub use extract::extract_table;
pub use fallback::{FALLBACK_TIME_POINTS, fallback_table};
pub use model_type::{ModelType, detect_model_type};
pub use table::{CompartmentValue, SimulationTable, TimeAxis};
