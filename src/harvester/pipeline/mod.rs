// Pipeline stages: playlist enumeration, per-video record building and the
// orchestrator that drives both in playlist order

mod builder;
mod enumerator;
mod orchestrator;

pub use builder::build_record;
pub use enumerator::enumerate;
pub use orchestrator::Harvester;
